//! Command implementations.

mod classify;
mod process;

pub use classify::execute_classify;
pub use process::execute_process;
