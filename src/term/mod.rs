use ansi_term::Style;
use basic::lang::Error;
use basic::mach::{Config, Event, InputPolicy, Runtime, Termination};
use clap::Parser;
use log::{debug, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Run a line-numbered BASIC program.
#[derive(Parser, Debug)]
#[command(name = "basic", version)]
struct Args {
    /// Program file; `.bas` is appended when the name is not found.
    program: PathBuf,
    /// Log every executed statement to stderr.
    #[arg(long)]
    trace: bool,
    /// Report the run time when the program stops.
    #[arg(long)]
    time: bool,
    /// Abort on an unusable INPUT reply instead of asking again.
    #[arg(long)]
    strict_input: bool,
    /// Seed for RND.
    #[arg(long)]
    seed: Option<u64>,
}

pub fn main() -> i32 {
    let args = Args::parse();
    let level = if args.trace {
        log::Level::Trace
    } else {
        log::Level::Warn
    };
    if let Err(error) = simple_logger::init_with_level(level) {
        eprintln!("{}", error);
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!("Ctrl-C handler not installed: {}", error);
    }

    let source = match read_program(&args.program) {
        Ok(source) => source,
        Err(message) => {
            report(&message);
            return 2;
        }
    };
    let config = Config {
        input_policy: if args.strict_input {
            InputPolicy::Fail
        } else {
            InputPolicy::Redo
        },
        seed: args.seed,
        ..Config::default()
    };
    let mut runtime = match Runtime::load(&source, config) {
        Ok(runtime) => runtime,
        Err(error) => {
            report_error(&error);
            return 2;
        }
    };

    let started = Instant::now();
    let termination = match run(&mut runtime, &interrupted) {
        Ok(termination) => termination,
        Err(error) => {
            report(&error.to_string());
            return 2;
        }
    };
    if args.time {
        eprintln!("{:.3}s", started.elapsed().as_secs_f64());
    }
    match termination {
        Termination::End => 0,
        Termination::Break(line_number) => {
            let message = match line_number {
                Some(number) => format!("BREAK IN {}", number),
                None => "BREAK".to_string(),
            };
            report(&message);
            1
        }
        Termination::Error(error) => {
            report_error(&error);
            2
        }
    }
}

fn read_program(path: &Path) -> Result<String, String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Ok(source),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            let mut with_ext = path.as_os_str().to_os_string();
            with_ext.push(".bas");
            debug!("{} not found, trying {:?}", path.display(), with_ext);
            std::fs::read_to_string(&with_ext)
                .map_err(|_| format!("FILE NOT FOUND; {}", path.display()))
        }
        Err(error) => Err(format!("{}; {}", error, path.display())),
    }
}

fn run(runtime: &mut Runtime, interrupted: &AtomicBool) -> std::io::Result<Termination> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        match runtime.execute(5000) {
            Event::Running => {}
            Event::Print(s) => out.write_all(s.as_bytes())?,
            Event::Input(prompt) => {
                out.write_all(prompt.as_bytes())?;
                out.flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    out.write_all(b"\n")?;
                    let error = basic::error!(InputPastEnd, runtime.line_number());
                    return Ok(Termination::Error(error));
                }
                runtime.input(&line);
            }
            Event::Stopped(termination) => {
                out.flush()?;
                return Ok(termination);
            }
        }
    }
}

fn report_error(error: &Error) {
    report(&error.to_string());
}

fn report(message: &str) {
    eprintln!("{}", Style::new().bold().paint(format!("?{}", message)));
}
