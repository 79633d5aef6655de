pub mod commands;
pub mod state;

pub use commands::{CommandExecutor, Flow};
pub use state::ShellState;
