use crate::error::ShellError;

/// Longest line the interpreter accepts, in bytes.
pub const MAX_LINE: usize = 2048;

const PID_MARKER: &str = "$$";

/// Splits input lines into arguments, expanding `$$` to the interpreter's pid.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    pid: String,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(std::process::id())
    }
}

impl Tokenizer {
    pub fn new(pid: u32) -> Self {
        Self {
            pid: pid.to_string(),
        }
    }

    pub fn tokenize(&self, line: &str) -> Result<Vec<String>, ShellError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if line.len() > MAX_LINE {
            return Err(ShellError::LineTooLong(line.len()));
        }

        Ok(line
            .split_whitespace()
            .map(|token| self.expand(token))
            .collect())
    }

    /// Every `$$`, scanning left to right, becomes the pid.
    fn expand(&self, token: &str) -> String {
        if token.contains(PID_MARKER) {
            token.replace(PID_MARKER, &self.pid)
        } else {
            token.to_owned()
        }
    }
}
