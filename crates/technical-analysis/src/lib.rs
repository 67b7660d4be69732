pub mod indicators;
pub mod series;
pub mod trend;

#[cfg(test)]
mod indicators_tests;

pub use indicators::*;
pub use series::*;
pub use trend::*;
