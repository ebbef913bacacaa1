mod asset_type;
mod item;
mod tag;

pub use asset_type::*;
pub use item::*;
pub use tag::*;
