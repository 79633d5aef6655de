use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::error::ShellError;
use crate::flags::Flags;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "MINISH_LOG";

/// Picks the filter directive, or `None` when logging was not asked for.
pub fn filter_directive(flags: &Flags, env_value: Option<String>) -> Option<String> {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(directive) => Some(directive),
        None if flags.is_set("debug") => Some("debug".to_string()),
        None if flags.log_file().is_some() => Some("info".to_string()),
        None => None,
    }
}

/// Installs the tracing subscriber. Without `--debug`, `--log-file` or
/// `MINISH_LOG` nothing is installed and the terminal only shows shell output.
pub fn init(flags: &Flags) -> Result<(), ShellError> {
    let Some(directive) = filter_directive(flags, std::env::var(LOG_ENV).ok()) else {
        return Ok(());
    };
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| ShellError::FlagError(format!("invalid log filter {:?}: {}", directive, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    let result = match flags.log_file() {
        Some(path) => {
            let log_file = Arc::new(File::create(path)?);
            builder.with_ansi(false).with_writer(log_file).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| ShellError::FlagError(format!("logging setup failed: {}", e)))
}
