mod options;
mod pagination;
mod type_filter;

pub use options::*;
pub use pagination::*;
pub use type_filter::*;
