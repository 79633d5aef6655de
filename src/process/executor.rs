use std::ffi::{CStr, CString};
use std::io::Write;
use std::os::unix::io::RawFd;

use libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2, execvp, fork, ForkResult, Pid};
use tracing::{debug, info};

use super::redirect::Invocation;
use super::{signal, Direction, ProcessError};
use crate::error::PREFIX;

/// Everything the child needs, converted before `fork` so the child does
/// no allocation on its success path.
struct ExecPlan {
    program: CString,
    argv: Vec<CString>,
    input: Option<CString>,
    output: Option<CString>,
    foreground: bool,
}

impl ExecPlan {
    fn new(invocation: &Invocation) -> Result<Self, ProcessError> {
        let argv = invocation
            .argv
            .iter()
            .map(|arg| to_cstring(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ExecPlan {
            program: to_cstring(invocation.program())?,
            argv,
            input: invocation.input.as_deref().map(to_cstring).transpose()?,
            output: invocation.output.as_deref().map(to_cstring).transpose()?,
            foreground: !invocation.background,
        })
    }
}

fn to_cstring(arg: &str) -> Result<CString, ProcessError> {
    CString::new(arg).map_err(|_| ProcessError::InvalidArgument(arg.to_string()))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Forks and execs `invocation`, returning the child's pid to the parent.
    ///
    /// Redirection and exec failures happen in the child: it reports them on
    /// stderr and exits with status 1. Only a failed `fork` is returned here.
    pub fn spawn(&self, invocation: &Invocation) -> Result<Pid, ProcessError> {
        let plan = ExecPlan::new(invocation)?;

        // buffered output would otherwise be duplicated into the child
        let _ = std::io::stdout().flush();

        debug!(
            "forking {:?} (background: {})",
            invocation.argv, invocation.background
        );
        match unsafe { fork() } {
            Ok(ForkResult::Parent { child }) => {
                info!("launched {} as pid {}", invocation.program(), child);
                Ok(child)
            }
            Ok(ForkResult::Child) => run_child(&plan, invocation),
            Err(e) => Err(ProcessError::Fork(e)),
        }
    }
}

fn run_child(plan: &ExecPlan, invocation: &Invocation) -> ! {
    let err = match exec_child(plan) {
        Ok(never) => match never {},
        Err(ChildFailure::Open(direction, errno)) => ProcessError::FileOpen {
            path: match direction {
                Direction::Input => invocation.input.clone().unwrap_or_default(),
                Direction::Output => invocation.output.clone().unwrap_or_default(),
            },
            direction,
            errno,
        },
        Err(ChildFailure::Exec(errno)) => ProcessError::Exec {
            program: invocation.program().to_string(),
            errno,
        },
    };
    eprintln!("{}: {}", PREFIX, err);
    // skip atexit handlers and stdio flushing inherited from the interpreter
    unsafe { libc::_exit(1) }
}

enum ChildFailure {
    Open(Direction, nix::errno::Errno),
    Exec(nix::errno::Errno),
}

fn exec_child(plan: &ExecPlan) -> Result<std::convert::Infallible, ChildFailure> {
    if let Some(path) = &plan.input {
        redirect(path, OFlag::O_RDONLY, STDIN_FILENO)
            .map_err(|e| ChildFailure::Open(Direction::Input, e))?;
    }
    if let Some(path) = &plan.output {
        redirect(
            path,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
            STDOUT_FILENO,
        )
        .map_err(|e| ChildFailure::Open(Direction::Output, e))?;
    }

    signal::prepare_child(plan.foreground).map_err(ChildFailure::Exec)?;

    execvp(&plan.program, &plan.argv).map_err(ChildFailure::Exec)
}

fn redirect(path: &CStr, flags: OFlag, target: RawFd) -> nix::Result<()> {
    let fd = open(path, flags, Mode::from_bits_truncate(0o644))?;
    if fd != target {
        dup2(fd, target)?;
        close(fd)?;
    }
    Ok(())
}
