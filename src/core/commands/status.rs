use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

/// Reports how the last reaped child finished.
#[derive(Clone, Default)]
pub struct StatusCommand;

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for StatusCommand {
    fn execute(&self, _args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        println!("{}", state.last_status());
        Ok(Flow::Continue)
    }
}
