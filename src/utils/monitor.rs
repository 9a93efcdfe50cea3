#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct AgentStats {
    pub port: u16,
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct LaunchStats {
    pub launcher_memory_mb: u64,
    pub team_memory_mb: u64,
    pub peak_team_memory_mb: u64,
    pub agents: Vec<AgentStats>,
    pub elapsed_time: Duration,
}

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    launcher_pid: Pid,
    agents: Mutex<Vec<(u16, Pid)>>,
    peak_team_memory: Mutex<u64>,
    start_time: Instant,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let launcher_pid = sysinfo::get_current_pid().expect("Failed to get current PID");

        system.refresh_all();

        Self {
            system: Mutex::new(system),
            launcher_pid,
            agents: Mutex::new(Vec::new()),
            peak_team_memory: Mutex::new(0),
            start_time: Instant::now(),
            enabled,
        }
    }

    /// Registers a freshly spawned agent so its usage shows up in stats.
    pub fn track_agent(&self, port: u16, pid: u32) {
        if !self.enabled {
            return;
        }
        if let Ok(mut agents) = self.agents.lock() {
            agents.push((port, Pid::from_u32(pid)));
        }
    }

    pub fn get_stats(&self) -> Option<LaunchStats> {
        if !self.enabled {
            return None;
        }

        let mut system = self.system.lock().ok()?;
        system.refresh_all();

        let launcher_memory_mb = system
            .process(self.launcher_pid)
            .map(|p| p.memory() / 1024 / 1024)
            .unwrap_or(0);

        let tracked = self.agents.lock().ok()?;
        let mut agents = Vec::with_capacity(tracked.len());
        for (port, pid) in tracked.iter() {
            // Agents that already exited simply drop out of the stats.
            if let Some(process) = system.process(*pid) {
                agents.push(AgentStats {
                    port: *port,
                    cpu_usage: process.cpu_usage(),
                    memory_usage_mb: process.memory() / 1024 / 1024,
                });
            }
        }

        let team_memory_mb =
            launcher_memory_mb + agents.iter().map(|a| a.memory_usage_mb).sum::<u64>();

        let mut peak = self.peak_team_memory.lock().ok()?;
        if team_memory_mb > *peak {
            *peak = team_memory_mb;
        }

        Some(LaunchStats {
            launcher_memory_mb,
            team_memory_mb,
            peak_team_memory_mb: *peak,
            agents,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            for agent in &stats.agents {
                tracing::debug!(
                    "📊 {} - agent on port {} - CPU: {:.1}%, Memory: {}MB",
                    phase,
                    agent.port,
                    agent.cpu_usage,
                    agent.memory_usage_mb
                );
            }
            tracing::info!(
                "📊 {} - Team Memory: {}MB (peak {}MB), Time: {:?}",
                phase,
                stats.team_memory_mb,
                stats.peak_team_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Team Memory: {}MB",
                stats.elapsed_time,
                stats.peak_team_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op implementation for builds without the CLI feature.
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn track_agent(&self, _port: u16, _pid: u32) {}

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
