use std::fmt;

use nix::errno::Errno;

pub mod executor;
pub mod redirect;
pub mod signal;
pub mod state;
pub mod wait;

pub use executor::ProcessLauncher;
pub use redirect::Invocation;
pub use signal::{Mode, ModeController};
pub use state::ChildStatus;
pub use wait::Reaper;

/// Which standard stream a redirection target was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug)]
pub enum ProcessError {
    Fork(Errno),
    FileOpen {
        path: String,
        direction: Direction,
        errno: Errno,
    },
    Exec {
        program: String,
        errno: Errno,
    },
    Wait(Errno),
    Syntax(String),
    InvalidArgument(String),
}

impl ProcessError {
    /// Losing the ability to create processes ends the interpreter.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Fork(_))
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Fork(e) => write!(f, "fork() failed: {}", e.desc()),
            ProcessError::FileOpen {
                path, direction, ..
            } => write!(f, "cannot open {} for {}", path, direction),
            ProcessError::Exec { program, errno } => write!(f, "{}: {}", program, errno.desc()),
            ProcessError::Wait(e) => write!(f, "waitpid() failed: {}", e.desc()),
            ProcessError::Syntax(msg) => write!(f, "syntax error: {}", msg),
            ProcessError::InvalidArgument(arg) => write!(f, "invalid argument: {}", arg),
        }
    }
}

impl std::error::Error for ProcessError {}
