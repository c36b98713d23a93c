pub mod assetpack_toml;
pub mod config;
pub mod logger;
pub mod outputs;

pub use assetpack_toml::{AssetpackToml, apply_file_to_opts, load_assetpack_toml};
pub use config::*;
pub use logger::{Colors, setup_logging};
pub use outputs::{WriteOutcome, resolve_destination, write_output};
