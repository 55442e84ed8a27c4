pub mod line_item;
pub mod pricing;

pub use line_item::*;
pub use pricing::*;
