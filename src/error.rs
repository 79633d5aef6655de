use crate::core::commands::CommandError;
use crate::process::ProcessError;

/// Leads every diagnostic the interpreter or its children print.
pub const PREFIX: &str = "minish";

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    InvalidUtf8,
    LineTooLong(usize),
    SignalSetup(String),
    FlagError(String),
    CommandError(CommandError),
    ProcessError(ProcessError),
}

impl ShellError {
    /// Errors after which the interpreter cannot keep reading commands.
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::ProcessError(e) => e.is_fatal(),
            ShellError::Readline(_) | ShellError::SignalSetup(_) => true,
            _ => false,
        }
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        match err {
            // the offending line is consumed; the next read starts fresh
            rustyline::error::ReadlineError::Io(e)
                if e.kind() == std::io::ErrorKind::InvalidData =>
            {
                ShellError::InvalidUtf8
            }
            err => ShellError::Readline(err),
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<CommandError> for ShellError {
    fn from(err: CommandError) -> Self {
        ShellError::CommandError(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::InvalidUtf8 => write!(f, "input line is not valid UTF-8"),
            ShellError::LineTooLong(len) => write!(f, "line too long ({} bytes)", len),
            ShellError::SignalSetup(msg) => write!(f, "Signal setup error: {}", msg),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
            ShellError::CommandError(e) => write!(f, "{}", e),
            ShellError::ProcessError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShellError {}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    #[test]
    fn test_only_fork_failures_are_fatal() {
        assert!(ShellError::ProcessError(ProcessError::Fork(Errno::EAGAIN)).is_fatal());
        assert!(!ShellError::ProcessError(ProcessError::Wait(Errno::ECHILD)).is_fatal());
        assert!(!ShellError::LineTooLong(4096).is_fatal());
        assert!(!ShellError::CommandError(CommandError::HomeNotSet).is_fatal());
    }

    #[test]
    fn test_invalid_utf8_read_is_not_fatal() {
        let invalid = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "stream did not contain valid UTF-8",
        );
        let err = ShellError::from(rustyline::error::ReadlineError::Io(invalid));
        assert!(matches!(err, ShellError::InvalidUtf8));
        assert!(!err.is_fatal());

        let lost = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert!(ShellError::from(rustyline::error::ReadlineError::Io(lost)).is_fatal());
    }

    #[test]
    fn test_line_too_long_display() {
        assert_eq!(
            ShellError::LineTooLong(3000).to_string(),
            "line too long (3000 bytes)"
        );
    }
}
