use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use tracing::{debug, info, warn};

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }

    /// Sends SIGTERM to every recorded pid without waiting for any of them.
    fn terminate_all(state: &ShellState) {
        for &pid in state.processes() {
            match kill(pid, Signal::SIGTERM) {
                Ok(()) => debug!("sent SIGTERM to {}", pid),
                Err(Errno::ESRCH) => debug!("{} already gone", pid),
                Err(e) => warn!("failed to signal {}: {}", pid, e),
            }
        }
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        if !state.has_launched() {
            return Ok(Flow::Exit(0));
        }

        info!("terminating {} recorded processes", state.processes().len());
        Self::terminate_all(state);
        Ok(Flow::Exit(1))
    }
}
