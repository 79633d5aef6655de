use nix::unistd::Pid;

use crate::process::{ChildStatus, Mode, ModeController};

/// Session state owned by the read loop.
pub struct ShellState {
    processes: Vec<Pid>,
    last_status: ChildStatus,
    mode: ModeController,
    observed_mode: Mode,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(ModeController::new())
    }
}

impl ShellState {
    pub fn new(mode: ModeController) -> Self {
        let observed_mode = mode.mode();
        Self {
            processes: Vec::new(),
            last_status: ChildStatus::default(),
            mode,
            observed_mode,
        }
    }

    /// Every launched pid is kept for `exit`, even after it is reaped.
    pub fn record_process(&mut self, pid: Pid) {
        self.processes.push(pid);
    }

    pub fn processes(&self) -> &[Pid] {
        &self.processes
    }

    pub fn has_launched(&self) -> bool {
        !self.processes.is_empty()
    }

    pub fn last_status(&self) -> ChildStatus {
        self.last_status
    }

    pub fn set_last_status(&mut self, status: ChildStatus) {
        self.last_status = status;
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn mode_controller(&self) -> &ModeController {
        &self.mode
    }

    /// Returns the current mode if it changed since the previous call.
    ///
    /// An even number of toggles between two calls reads as no change.
    pub fn observe_mode_change(&mut self) -> Option<Mode> {
        let current = self.mode.mode();
        if current == self.observed_mode {
            return None;
        }
        self.observed_mode = current;
        Some(current)
    }
}
