use serde::{Deserialize, Serialize};

use crate::domain::ports::LaunchConfig;
use crate::utils::error::{LaunchError, Result};

/// One agent child process: what to run and which port it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInvocation {
    pub program: String,
    pub script: String,
    pub hex_value: String,
    pub port: u16,
}

impl AgentInvocation {
    /// Arguments handed to the program: entry file, hex value, port.
    pub fn argv(&self) -> Vec<String> {
        vec![
            self.script.clone(),
            self.hex_value.clone(),
            self.port.to_string(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct TeamPlan {
    pub invocations: Vec<AgentInvocation>,
}

impl TeamPlan {
    /// Derives the two invocations: one on the base port, one right above it.
    pub fn from_config(config: &impl LaunchConfig) -> Result<Self> {
        let base_port = config.base_port();
        let paired_port =
            base_port
                .checked_add(1)
                .ok_or_else(|| LaunchError::InvalidConfigValueError {
                    field: "port".to_string(),
                    value: base_port.to_string(),
                    reason: "no room for the paired agent on port + 1".to_string(),
                })?;

        let invocation_on = |port: u16| AgentInvocation {
            program: config.program().to_string(),
            script: config.script().to_string(),
            hex_value: config.hex_value().to_string(),
            port,
        };

        Ok(Self {
            invocations: vec![invocation_on(base_port), invocation_on(paired_port)],
        })
    }
}

/// How a single agent ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStatus {
    /// The process ran to completion; `code` is None when it died to a signal.
    Exited { code: Option<i32> },
    SpawnFailed { reason: String },
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub port: u16,
    pub status: AgentStatus,
}

impl AgentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, AgentStatus::Exited { code: Some(0) })
    }
}

#[derive(Debug, Clone)]
pub struct TeamReport {
    pub outcomes: Vec<AgentOutcome>,
}

impl TeamReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(AgentOutcome::is_success)
    }

    pub fn outcome_for(&self, port: u16) -> Option<&AgentOutcome> {
        self.outcomes.iter().find(|o| o.port == port)
    }

    pub fn summary(&self) -> String {
        let clean = self.outcomes.iter().filter(|o| o.is_success()).count();
        format!("{}/{} agents exited cleanly", clean, self.outcomes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConfig {
        hex_value: String,
        port: u16,
    }

    impl LaunchConfig for TestConfig {
        fn hex_value(&self) -> &str {
            &self.hex_value
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

    #[test]
    fn test_plan_derives_adjacent_ports() {
        let config = TestConfig {
            hex_value: "deadbeef".to_string(),
            port: 9000,
        };
        let plan = TeamPlan::from_config(&config).unwrap();

        assert_eq!(plan.invocations.len(), 2);
        assert_eq!(plan.invocations[0].port, 9000);
        assert_eq!(plan.invocations[1].port, 9001);
        assert!(plan.invocations.iter().all(|i| i.hex_value == "deadbeef"));
    }

    #[test]
    fn test_plan_rejects_port_overflow() {
        let config = TestConfig {
            hex_value: "ff".to_string(),
            port: u16::MAX,
        };
        assert!(TeamPlan::from_config(&config).is_err());
    }

    #[test]
    fn test_argv_order_is_script_hex_port() {
        let invocation = AgentInvocation {
            program: "python3".to_string(),
            script: "main.py".to_string(),
            hex_value: "deadbeef".to_string(),
            port: 9000,
        };
        assert_eq!(invocation.argv(), vec!["main.py", "deadbeef", "9000"]);
    }

    #[test]
    fn test_report_summary_counts_clean_exits() {
        let report = TeamReport {
            outcomes: vec![
                AgentOutcome {
                    port: 9000,
                    status: AgentStatus::Exited { code: Some(0) },
                },
                AgentOutcome {
                    port: 9001,
                    status: AgentStatus::Exited { code: Some(3) },
                },
            ],
        };

        assert!(!report.all_succeeded());
        assert_eq!(report.summary(), "1/2 agents exited cleanly");
        assert!(report.outcome_for(9000).unwrap().is_success());
        assert!(!report.outcome_for(9001).unwrap().is_success());
    }
}
