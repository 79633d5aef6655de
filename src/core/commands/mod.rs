use std::collections::BTreeMap;
use std::path::PathBuf;

mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use tracing::debug;

use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::process::{ChildStatus, Invocation, ProcessLauncher, Reaper};

#[derive(Debug)]
pub enum CommandError {
    DirectoryChange {
        path: PathBuf,
        source: std::io::Error,
    },
    HomeNotSet,
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::DirectoryChange { path, source } => {
                write!(f, "cd: {}: {}", path.display(), source)
            }
            CommandError::HomeNotSet => write!(f, "cd: HOME not set"),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// What the read loop does after a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

pub trait Command {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Status(StatusCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state),
            CommandType::Exit(cmd) => cmd.execute(args, state),
            CommandType::Status(cmd) => cmd.execute(args, state),
        }
    }
}

/// Routes a tokenized line to a built-in or to the process launcher.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<String, CommandType>,
    launcher: ProcessLauncher,
    reaper: Reaper,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut executor = Self {
            commands: BTreeMap::new(),
            launcher: ProcessLauncher::new(),
            reaper: Reaper::new(),
        };

        executor
            .commands
            .insert("cd".to_string(), CommandType::Cd(CdCommand::new()));
        executor
            .commands
            .insert("exit".to_string(), CommandType::Exit(ExitCommand::new()));
        executor.commands.insert(
            "status".to_string(),
            CommandType::Status(StatusCommand::new()),
        );

        executor
    }

    pub fn execute(&self, tokens: &[String], state: &mut ShellState) -> Result<Flow, ShellError> {
        let Some(command) = tokens.first() else {
            return Ok(Flow::Continue);
        };
        if command.starts_with('#') {
            return Ok(Flow::Continue);
        }

        match self.commands.get(command) {
            Some(builtin) => Ok(builtin.execute(&tokens[1..], state)?),
            None => self.launch(tokens, state),
        }
    }

    /// `exit` as triggered by end of input.
    pub fn exit(&self, state: &mut ShellState) -> Result<Flow, ShellError> {
        self.execute(&["exit".to_string()], state)
    }

    fn launch(&self, tokens: &[String], state: &mut ShellState) -> Result<Flow, ShellError> {
        let invocation = Invocation::parse(tokens, state.mode())?;
        let pid = self.launcher.spawn(&invocation)?;
        state.record_process(pid);

        if invocation.background {
            println!("background pid is {}", pid);
            if let Some(status) = self.reaper.poll(pid)? {
                Self::report_background(pid, status, state);
            }
        } else {
            let status = self.reaper.wait_foreground(pid)?;
            debug!("foreground {} finished: {}", pid, status);
            state.set_last_status(status);
            if status.is_signaled() {
                println!("{}", status);
            }
        }
        Ok(Flow::Continue)
    }

    /// Non-blocking sweep over finished background children.
    pub fn reap_background(&self, state: &mut ShellState) {
        for (pid, status) in self.reaper.sweep() {
            Self::report_background(pid, status, state);
        }
    }

    fn report_background(pid: nix::unistd::Pid, status: ChildStatus, state: &mut ShellState) {
        state.set_last_status(status);
        println!("background pid {} is done: {}", pid, status);
    }
}
