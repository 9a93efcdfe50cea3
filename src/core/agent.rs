use crate::domain::model::{AgentInvocation, AgentOutcome, AgentStatus};
use crate::domain::ports::AgentRunner;
use crate::utils::error::{LaunchError, Result};
use crate::utils::monitor::SystemMonitor;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::process::Command;

/// Runs one agent as a real child process and waits for it to exit.
#[derive(Clone, Default)]
pub struct ProcessRunner {
    monitor: Option<Arc<SystemMonitor>>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self { monitor: None }
    }

    pub fn with_monitor(monitor: Arc<SystemMonitor>) -> Self {
        Self {
            monitor: Some(monitor),
        }
    }
}

#[async_trait]
impl AgentRunner for ProcessRunner {
    async fn run(&self, invocation: AgentInvocation) -> Result<AgentOutcome> {
        tracing::debug!(
            "Spawning agent: {} {}",
            invocation.program,
            invocation.argv().join(" ")
        );

        let mut child = Command::new(&invocation.program)
            .args(invocation.argv())
            .spawn()
            .map_err(|source| LaunchError::SpawnError {
                program: invocation.program.clone(),
                source,
            })?;

        if let Some(monitor) = &self.monitor {
            if let Some(pid) = child.id() {
                monitor.track_agent(invocation.port, pid);
            }
        }

        let status = child.wait().await?;
        tracing::debug!("Agent on port {} exited with {}", invocation.port, status);

        Ok(AgentOutcome {
            port: invocation.port,
            status: AgentStatus::Exited {
                code: status.code(),
            },
        })
    }
}
