use std::io::{self, IsTerminal, Write};

use rustyline::DefaultEditor;
use tracing::{debug, error, info};

mod executor;

use crate::{
    core::{CommandExecutor, Flow, ShellState},
    error::{ShellError, PREFIX},
    flags::Flags,
    input::Tokenizer,
    process::{signal, ModeController},
};

use executor::CommandHandler;

pub const PROMPT: &str = ": ";

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) state: ShellState,
    pub(crate) flags: Flags,
    pub(crate) executor: CommandExecutor,
    interactive: bool,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;

        let mode = ModeController::new();
        signal::ignore_interrupts()
            .map_err(|e| ShellError::SignalSetup(format!("SIGINT: {}", e)))?;
        mode.install()
            .map_err(|e| ShellError::SignalSetup(format!("SIGTSTP: {}", e)))?;

        Ok(Shell {
            editor,
            tokenizer: Tokenizer::default(),
            state: ShellState::new(mode),
            flags,
            executor: CommandExecutor::new(),
            interactive: io::stdin().is_terminal(),
        })
    }

    /// Runs the read loop and returns the interpreter's exit status.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        debug!("starting read loop (debug: {})", self.flags.is_set("debug"));
        loop {
            let flow = match self.read_line() {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    self.execute_command(&line)
                }
                Err(rustyline::error::ReadlineError::Interrupted) => continue,
                Err(rustyline::error::ReadlineError::Eof) => {
                    debug!("end of input");
                    self.executor.exit(&mut self.state)
                }
                Err(e) => Err(e.into()),
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit(code)) => return Ok(code),
                Err(e) if e.is_fatal() => {
                    error!("fatal: {}", e);
                    return Err(e);
                }
                Err(e) => report(&e),
            }

            if let Some(mode) = self.state.observe_mode_change() {
                info!("mode changed to {:?}", mode);
            }
            self.executor.reap_background(&mut self.state);
        }
    }

    // rustyline only draws the prompt on a terminal
    fn read_line(&mut self) -> rustyline::Result<String> {
        if !self.interactive {
            let mut stdout = io::stdout().lock();
            stdout.write_all(PROMPT.as_bytes())?;
            stdout.flush()?;
        }
        self.editor.readline(PROMPT)
    }
}

// Built-in failures go where their success output goes: stdout.
fn report(err: &ShellError) {
    match err {
        ShellError::CommandError(_) => println!("{}: {}", PREFIX, err),
        _ => eprintln!("{}: {}", PREFIX, err),
    }
}
