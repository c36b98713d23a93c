//! Engine module: CLI, hashing, progress and filesystem helpers

pub mod arg_parser;
pub mod cli;
pub mod hashing;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, setup_opts};
pub use hashing::{hash_bytes, hash_file};
pub use tools::{list_files, parse_color, path_relative_to, scan_files_recursive};
