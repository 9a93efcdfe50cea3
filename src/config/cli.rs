use crate::domain::ports::LaunchConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "snake-team")]
#[command(about = "Launch a team of two snake agents on adjacent ports")]
pub struct CliConfig {
    /// Hex value forwarded verbatim to both agents
    pub hex_value: String,

    /// Base port; the second agent gets port + 1
    pub port: u16,

    /// Interpreter used to run the agent entry file
    #[arg(long, default_value = "python3")]
    pub program: String,

    /// Agent entry file
    #[arg(long, default_value = "main.py")]
    pub script: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

impl LaunchConfig for CliConfig {
    fn hex_value(&self) -> &str {
        &self.hex_value
    }

    fn base_port(&self) -> u16 {
        self.port
    }

    fn program(&self) -> &str {
        &self.program
    }

    fn script(&self) -> &str {
        &self.script
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_port("port", self.port)?;
        validation::validate_non_empty_string("program", &self.program)?;
        validation::validate_non_empty_string("script", &self.script)?;
        Ok(())
    }
}
