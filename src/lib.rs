pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::client::RemoteRobot;
pub use crate::adapters::random::{ConfiguredRandom, ScriptedRandom, SeededRandom, ThreadRandom};
pub use crate::config::{toml_config::TomlConfig, ServiceSettings};
pub use crate::core::{service::SortingService, state_machine::SortingState};
pub use crate::domain::model::{Cubby, Item, Phase, Snapshot};
pub use crate::domain::ports::{RandomSource, SortingRobot};
pub use crate::utils::error::{ErrorCode, Result, SortingError};
