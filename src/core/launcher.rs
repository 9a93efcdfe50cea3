use crate::domain::model::{AgentOutcome, AgentStatus, TeamPlan, TeamReport};
use crate::domain::ports::AgentRunner;
use crate::utils::error::Result;
use std::sync::Arc;

pub struct LaunchEngine<R: AgentRunner + 'static> {
    runner: Arc<R>,
}

impl<R: AgentRunner + 'static> LaunchEngine<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }

    /// Starts every agent in the plan before waiting on any of them, then
    /// blocks until all have terminated. Per-agent failures end up in the
    /// report instead of failing the run.
    pub async fn run(&self, plan: TeamPlan) -> Result<TeamReport> {
        tracing::info!("Launching a team of {} agents", plan.invocations.len());

        let mut handles = Vec::with_capacity(plan.invocations.len());
        for invocation in plan.invocations {
            tracing::info!("Starting agent on port {}", invocation.port);
            let runner = self.runner.clone();
            let port = invocation.port;
            handles.push((
                port,
                tokio::spawn(async move { runner.run(invocation).await }),
            ));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (port, handle) in handles {
            match handle.await {
                Ok(Ok(outcome)) => {
                    if outcome.is_success() {
                        tracing::info!("Agent on port {} exited cleanly", port);
                    } else {
                        tracing::warn!(
                            "Agent on port {} did not exit cleanly: {:?}",
                            port,
                            outcome.status
                        );
                    }
                    outcomes.push(outcome);
                }
                Ok(Err(e)) => {
                    tracing::error!("Agent on port {} never started: {}", port, e);
                    outcomes.push(AgentOutcome {
                        port,
                        status: AgentStatus::SpawnFailed {
                            reason: e.to_string(),
                        },
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(TeamReport { outcomes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AgentInvocation;
    use crate::domain::ports::LaunchConfig;
    use crate::utils::error::LaunchError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::Barrier;

    struct TestConfig {
        port: u16,
    }

    impl LaunchConfig for TestConfig {
        fn hex_value(&self) -> &str {
            "deadbeef"
        }

        fn base_port(&self) -> u16 {
            self.port
        }

        fn program(&self) -> &str {
            "python3"
        }

        fn script(&self) -> &str {
            "main.py"
        }
    }

    #[derive(Clone)]
    struct MockRunner {
        seen: Arc<Mutex<Vec<AgentInvocation>>>,
        fail_port: Option<u16>,
        exit_code: i32,
    }

    impl MockRunner {
        fn new() -> Self {
            Self {
                seen: Arc::new(Mutex::new(Vec::new())),
                fail_port: None,
                exit_code: 0,
            }
        }
    }

    #[async_trait]
    impl AgentRunner for MockRunner {
        async fn run(&self, invocation: AgentInvocation) -> Result<AgentOutcome> {
            self.seen.lock().unwrap().push(invocation.clone());
            if self.fail_port == Some(invocation.port) {
                return Err(LaunchError::SpawnError {
                    program: invocation.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing program"),
                });
            }
            Ok(AgentOutcome {
                port: invocation.port,
                status: AgentStatus::Exited {
                    code: Some(self.exit_code),
                },
            })
        }
    }

    #[tokio::test]
    async fn test_one_invocation_per_port() {
        let runner = MockRunner::new();
        let seen = runner.seen.clone();
        let plan = TeamPlan::from_config(&TestConfig { port: 9000 }).unwrap();

        let report = LaunchEngine::new(runner).run(plan).await.unwrap();

        assert!(report.all_succeeded());
        assert_eq!(report.outcomes.len(), 2);

        let mut ports: Vec<u16> = seen.lock().unwrap().iter().map(|i| i.port).collect();
        ports.sort_unstable();
        assert_eq!(ports, vec![9000, 9001]);
        assert!(seen.lock().unwrap().iter().all(|i| i.hex_value == "deadbeef"));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_absorbed() {
        let runner = MockRunner {
            fail_port: Some(9000),
            ..MockRunner::new()
        };
        let plan = TeamPlan::from_config(&TestConfig { port: 9000 }).unwrap();

        let report = LaunchEngine::new(runner).run(plan).await.unwrap();

        assert!(!report.all_succeeded());
        assert!(matches!(
            report.outcome_for(9000).unwrap().status,
            AgentStatus::SpawnFailed { .. }
        ));
        assert!(report.outcome_for(9001).unwrap().is_success());
    }

    #[tokio::test]
    async fn test_nonzero_exit_does_not_fail_the_run() {
        let runner = MockRunner {
            exit_code: 3,
            ..MockRunner::new()
        };
        let plan = TeamPlan::from_config(&TestConfig { port: 9100 }).unwrap();

        let report = LaunchEngine::new(runner).run(plan).await.unwrap();

        assert!(!report.all_succeeded());
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.summary(), "0/2 agents exited cleanly");
    }

    struct RendezvousRunner {
        barrier: Arc<Barrier>,
    }

    #[async_trait]
    impl AgentRunner for RendezvousRunner {
        async fn run(&self, invocation: AgentInvocation) -> Result<AgentOutcome> {
            // Each agent finishes only once the other has started too.
            self.barrier.wait().await;
            Ok(AgentOutcome {
                port: invocation.port,
                status: AgentStatus::Exited { code: Some(0) },
            })
        }
    }

    #[tokio::test]
    async fn test_both_agents_start_before_either_finishes() {
        let engine = LaunchEngine::new(RendezvousRunner {
            barrier: Arc::new(Barrier::new(2)),
        });
        let plan = TeamPlan::from_config(&TestConfig { port: 9200 }).unwrap();

        let report = tokio::time::timeout(Duration::from_secs(5), engine.run(plan))
            .await
            .expect("engine never joined both agents")
            .unwrap();

        assert!(report.all_succeeded());
    }
}
