#![allow(dead_code)]
use basic::mach::{Config, Event, InputPolicy, Runtime, Termination};

const CYCLES: usize = 5000;
const MAX_RUNNING: usize = 200;

pub fn config() -> Config {
    Config {
        seed: Some(1),
        ..Config::default()
    }
}

pub fn strict() -> Config {
    Config {
        input_policy: InputPolicy::Fail,
        ..config()
    }
}

pub fn exec(source: &str) -> String {
    exec_with(source, &[], config())
}

pub fn exec_input(source: &str, input: &[&str]) -> String {
    exec_with(source, input, config())
}

/// Runs a program to completion. Prompts and replies are echoed the way
/// a terminal shows them; errors and breaks print as `?` lines.
pub fn exec_with(source: &str, input: &[&str], config: Config) -> String {
    let mut runtime = match Runtime::load(source, config) {
        Ok(runtime) => runtime,
        Err(error) => return format!("?{}\n", error),
    };
    run(&mut runtime, input)
}

pub fn run(runtime: &mut Runtime, input: &[&str]) -> String {
    let mut s = String::new();
    let mut input = input.iter();
    let mut running = 0;
    loop {
        match runtime.execute(CYCLES) {
            Event::Running => {
                running += 1;
                if running > MAX_RUNNING {
                    s.push_str("\n?EXECUTION CYCLES EXCEEDED\n");
                    break;
                }
            }
            Event::Print(p) => s.push_str(&p),
            Event::Input(prompt) => {
                s.push_str(&prompt);
                match input.next() {
                    Some(line) => {
                        s.push_str(line);
                        s.push('\n');
                        runtime.input(line);
                    }
                    None => break,
                }
            }
            Event::Stopped(Termination::End) => break,
            Event::Stopped(Termination::Break(Some(n))) => {
                s.push_str(&format!("?BREAK IN {}\n", n));
                break;
            }
            Event::Stopped(Termination::Break(None)) => {
                s.push_str("?BREAK\n");
                break;
            }
            Event::Stopped(Termination::Error(error)) => {
                s.push_str(&format!("?{}\n", error));
                break;
            }
        }
    }
    s
}

pub fn load(source: &str) -> Runtime {
    match Runtime::load(source, config()) {
        Ok(runtime) => runtime,
        Err(error) => panic!("{}", error),
    }
}
