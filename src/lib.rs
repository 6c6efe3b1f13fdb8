pub mod cache;
pub mod case;
pub mod checker;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod path_utils;
pub mod pattern;
pub mod reference;
pub mod scanner;

pub use error::{LayoutGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS_FOUND: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
