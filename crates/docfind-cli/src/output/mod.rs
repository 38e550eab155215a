//! Terminal output for batch runs

pub mod progress;

pub use progress::BatchProgress;
