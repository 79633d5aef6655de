use tracing::debug;

use crate::core::Flow;
use crate::error::ShellError;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<Flow, ShellError> {
        let tokens = self.tokenizer.tokenize(line)?;
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }

        debug!("tokens: {:?}", tokens);
        self.executor.execute(&tokens, &mut self.state)
    }
}
