pub mod queen;

pub use queen::*;
