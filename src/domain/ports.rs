use crate::domain::model::{AgentInvocation, AgentOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait LaunchConfig: Send + Sync {
    fn hex_value(&self) -> &str;
    fn base_port(&self) -> u16;
    fn program(&self) -> &str;
    fn script(&self) -> &str;
}

#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, invocation: AgentInvocation) -> Result<AgentOutcome>;
}
