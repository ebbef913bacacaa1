mod cloud;
mod ranking;
mod source;

pub use cloud::*;
pub use ranking::*;
pub use source::*;
