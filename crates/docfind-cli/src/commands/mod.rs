//! Command implementations for the docfind CLI

mod convert;
mod run;

pub use convert::execute as convert_results;
pub use run::execute as run_batch;
