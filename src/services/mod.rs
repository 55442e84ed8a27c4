pub mod order_calculator;

pub use order_calculator::*;
