use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Output, Stdio};
use std::thread;
use std::time::Duration;

pub fn minish() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_minish"));
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env_remove("MINISH_LOG");
    command
}

/// Feeds `script` on stdin, closes it and collects everything.
pub fn run_script(script: &str, dir: &Path) -> Output {
    run_bytes(script.as_bytes(), dir)
}

pub fn run_bytes(input: &[u8], dir: &Path) -> Output {
    let mut child = minish()
        .current_dir(dir)
        .spawn()
        .expect("Failed to spawn minish");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input)
        .expect("Failed to write script");
    child.wait_with_output().expect("Failed to wait for minish")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// False once `pid` is gone or only a zombie is left.
pub fn is_running(pid: i32) -> bool {
    match fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => stat
            .rsplit(')')
            .next()
            .and_then(|rest| rest.trim_start().chars().next())
            .map_or(false, |state| state != 'Z' && state != 'X'),
        Err(_) => false,
    }
}

fn parent_of(pid: i32) -> Option<i32> {
    let stat = fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
    stat.rsplit(')').next()?.split_whitespace().nth(1)?.parse().ok()
}

/// Waits until a child of `parent` has exec'd `comm` and returns its pid.
pub fn wait_for_child(parent: i32, comm: &str) -> i32 {
    for _ in 0..100 {
        let entries = fs::read_dir("/proc").expect("Failed to list /proc");
        for entry in entries.flatten() {
            let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse().ok()) else {
                continue;
            };
            if parent_of(pid) != Some(parent) {
                continue;
            }
            let name = fs::read_to_string(format!("/proc/{}/comm", pid)).unwrap_or_default();
            if name.trim_end() == comm {
                return pid;
            }
        }
        thread::sleep(Duration::from_millis(50));
    }
    panic!("no {} child of {} appeared", comm, parent);
}

/// A running interpreter driven line by line.
pub struct Session {
    pub child: Child,
    reader: BufReader<ChildStdout>,
    pub transcript: String,
}

impl Session {
    pub fn start(dir: &Path) -> Self {
        let mut child = minish()
            .current_dir(dir)
            .spawn()
            .expect("Failed to spawn minish");
        let stdout = child.stdout.take().expect("stdout is piped");
        Self {
            child,
            reader: BufReader::new(stdout),
            transcript: String::new(),
        }
    }

    pub fn send(&mut self, line: &str) {
        let stdin = self.child.stdin.as_mut().expect("stdin is piped");
        writeln!(stdin, "{}", line).expect("Failed to write line");
        stdin.flush().expect("Failed to flush");
    }

    /// Reads stdout until a line containing `needle` shows up.
    pub fn expect(&mut self, needle: &str) {
        loop {
            let mut line = String::new();
            let n = self.reader.read_line(&mut line).expect("Failed to read");
            assert!(n > 0, "EOF before {:?}; got:\n{}", needle, self.transcript);
            self.transcript.push_str(&line);
            if line.contains(needle) {
                return;
            }
        }
    }

    pub fn pid(&self) -> i32 {
        self.child.id() as i32
    }

    /// Closes stdin and returns the exit code with the full transcript.
    pub fn finish(mut self) -> (Option<i32>, String) {
        drop(self.child.stdin.take());
        let mut rest = String::new();
        std::io::Read::read_to_string(&mut self.reader, &mut rest).expect("Failed to read");
        self.transcript.push_str(&rest);
        let status = self.child.wait().expect("Failed to wait");
        (status.code(), self.transcript)
    }
}
