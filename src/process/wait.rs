use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, error};

use super::state::ChildStatus;
use super::ProcessError;

/// Collects terminated children.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reaper;

impl Reaper {
    pub fn new() -> Self {
        Self
    }

    /// Blocks until `pid` terminates.
    pub fn wait_foreground(&self, pid: Pid) -> Result<ChildStatus, ProcessError> {
        loop {
            match waitpid(pid, None) {
                Ok(status) => {
                    debug!("waitpid({}) -> {:?}", pid, status);
                    if let Some(child) = ChildStatus::from_wait_status(status) {
                        return Ok(child);
                    }
                }
                // the stop-signal handler can interrupt the wait
                Err(Errno::EINTR) => continue,
                Err(e) => {
                    error!("waitpid({}) failed: {}", pid, e);
                    return Err(ProcessError::Wait(e));
                }
            }
        }
    }

    /// Non-blocking check on a single child.
    pub fn poll(&self, pid: Pid) -> Result<Option<ChildStatus>, ProcessError> {
        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(status) => Ok(ChildStatus::from_wait_status(status)),
            Err(Errno::EINTR) => Ok(None),
            Err(e) => Err(ProcessError::Wait(e)),
        }
    }

    /// Reaps every child that has already terminated, without blocking.
    pub fn sweep(&self) -> Vec<(Pid, ChildStatus)> {
        let mut done = Vec::new();
        loop {
            match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) => break,
                Ok(status) => {
                    if let (Some(pid), Some(child)) =
                        (status.pid(), ChildStatus::from_wait_status(status))
                    {
                        debug!("sweep reaped {} ({})", pid, child);
                        done.push((pid, child));
                    }
                }
                Err(Errno::EINTR) => continue,
                Err(Errno::ECHILD) => break,
                Err(e) => {
                    error!("background sweep failed: {}", e);
                    break;
                }
            }
        }
        done
    }
}
