//! Turns a LeetCode-style method plus a textual test-case input into a
//! complete runnable program for Python, Java or C++, and canonicalizes
//! the program's output for comparison.

pub mod classifier;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod judge;
pub mod lang;
pub mod literal;
pub mod normalizer;
pub mod sandbox;
pub mod signature;
pub mod tokenizer;
pub mod types;
pub mod wrapper;

pub use config::HarnessConfig;
pub use engine::{ExecutionEngine, LocalEngine};
pub use error::HarnessError;
pub use judge::Judge;
pub use normalizer::normalize_output;
pub use types::*;
pub use wrapper::{prepare_program, wrap_code_for_execution};
