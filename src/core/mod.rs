pub mod agent;
pub mod launcher;

pub use crate::domain::model::{AgentInvocation, AgentOutcome, AgentStatus, TeamPlan, TeamReport};
pub use crate::domain::ports::{AgentRunner, LaunchConfig};
pub use crate::utils::error::Result;
