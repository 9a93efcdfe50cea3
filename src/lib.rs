pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::core::{agent::ProcessRunner, launcher::LaunchEngine};
pub use crate::domain::model::{AgentInvocation, AgentOutcome, AgentStatus, TeamPlan, TeamReport};
pub use crate::domain::ports::{AgentRunner, LaunchConfig};
pub use crate::utils::error::{LaunchError, Result};
