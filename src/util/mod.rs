mod parsers;

pub use parsers::*;
