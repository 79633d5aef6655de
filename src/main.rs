use minish::error::PREFIX;
use minish::flags::Flags;
use minish::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("{}: {}", PREFIX, e);
        return ExitCode::from(2);
    }

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("{} {}", PREFIX, env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if let Err(e) = minish::logging::init(&flags) {
        eprintln!("{}: {}", PREFIX, e);
        return ExitCode::from(2);
    }

    let result = Shell::new(flags).and_then(|mut shell| shell.run());
    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{}: {}", PREFIX, e);
            ExitCode::FAILURE
        }
    }
}
