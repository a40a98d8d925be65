pub mod config;
pub mod error;
pub mod id;
pub mod registry;

pub use config::{load_config, parse_config, RegistryConfig};
pub use error::*;
pub use id::{parse_domain, parse_path, NamespacedId, PathGrammar, DEFAULT_DOMAIN};
pub use registry::{global, IdRegistry};
