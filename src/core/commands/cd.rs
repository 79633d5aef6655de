use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn home_dir() -> Result<PathBuf, CommandError> {
        env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(CommandError::HomeNotSet)
    }

    /// Changes directory and returns the new absolute working directory.
    pub fn change_dir(&self, target: Option<&str>) -> Result<PathBuf, CommandError> {
        let path = match target {
            Some(path) => PathBuf::from(path),
            None => Self::home_dir()?,
        };

        env::set_current_dir(&path).map_err(|source| CommandError::DirectoryChange {
            path: path.clone(),
            source,
        })?;
        Ok(env::current_dir()?)
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], _state: &mut ShellState) -> Result<Flow, CommandError> {
        let cwd = self.change_dir(args.first().map(String::as_str))?;
        println!("{}", cwd.display());
        Ok(Flow::Continue)
    }
}
