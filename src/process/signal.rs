use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::STDOUT_FILENO;
use nix::sys::signal::{signal, SigHandler, Signal};
use signal_hook::consts::SIGTSTP;
use signal_hook::SigId;
use tracing::{debug, info};

const ENTER_MESSAGE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_MESSAGE: &[u8] = b"\nExiting foreground-only mode\n";
const PROMPT: &[u8] = b": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    ForegroundOnly,
}

impl Mode {
    fn from_flag(foreground_only: bool) -> Self {
        if foreground_only {
            Mode::ForegroundOnly
        } else {
            Mode::Normal
        }
    }

    /// Banner announcing entry into this mode.
    pub fn banner(&self) -> &'static [u8] {
        match self {
            Mode::Normal => EXIT_MESSAGE,
            Mode::ForegroundOnly => ENTER_MESSAGE,
        }
    }
}

/// Foreground-only toggle driven by the stop signal.
///
/// The flag lives in an atomic shared with the handler; the handler flips it
/// and writes a fixed banner with a raw `write(2)`, nothing else.
#[derive(Clone, Default)]
pub struct ModeController {
    foreground_only: Arc<AtomicBool>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        Mode::from_flag(self.foreground_only.load(Ordering::SeqCst))
    }

    /// Flips the mode and returns the one now in effect.
    pub fn toggle(&self) -> Mode {
        flip(&self.foreground_only)
    }

    pub fn install(&self) -> std::io::Result<SigId> {
        let flag = Arc::clone(&self.foreground_only);
        let id = unsafe {
            signal_hook::low_level::register(SIGTSTP, move || {
                let mode = flip(&flag);
                write_raw(mode.banner());
                write_raw(PROMPT);
            })
        }?;
        info!("stop-signal handler installed");
        Ok(id)
    }
}

fn flip(flag: &AtomicBool) -> Mode {
    let was_foreground_only = flag.fetch_xor(true, Ordering::SeqCst);
    Mode::from_flag(!was_foreground_only)
}

// Must stay async-signal-safe: no allocation, no locks, no buffered stdout.
fn write_raw(bytes: &[u8]) {
    unsafe {
        libc::write(
            STDOUT_FILENO,
            bytes.as_ptr() as *const libc::c_void,
            bytes.len(),
        );
    }
}

/// The interpreter itself never dies from the interrupt signal.
pub fn ignore_interrupts() -> nix::Result<()> {
    unsafe { signal(Signal::SIGINT, SigHandler::SigIgn) }?;
    debug!("SIGINT ignored by interpreter");
    Ok(())
}

/// Dispositions applied in a freshly forked child just before exec.
///
/// Foreground children get the default (terminating) interrupt handling back,
/// background children keep ignoring it. All children ignore the stop signal.
pub(crate) fn prepare_child(foreground: bool) -> nix::Result<()> {
    if foreground {
        unsafe { signal(Signal::SIGINT, SigHandler::SigDfl) }?;
    }
    unsafe { signal(Signal::SIGTSTP, SigHandler::SigIgn) }?;
    Ok(())
}
