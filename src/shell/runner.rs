/*!
 * Shell Runner
 * Executes commands against a kernel and prints their results
 */

use super::command::Command;
use crate::core::types::{KernelResult, Pid};
use crate::kernel::{Kernel, KernelSnapshot};
use crate::monitoring::span_command;
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Successful result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { pid: Pid, running: Pid },
    Destroyed(usize),
    Running(Pid),
    Snapshot(Box<KernelSnapshot>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { pid, running } => {
                write!(f, "process {} created\nprocess {} running", pid, running)
            }
            Outcome::Destroyed(count) => write!(f, "{} processes destroyed", count),
            Outcome::Running(pid) => write!(f, "process {} running", pid),
            Outcome::Snapshot(snapshot) => write!(f, "{}", snapshot),
        }
    }
}

/// Interactive driver around a kernel
pub struct Shell<W: Write> {
    kernel: Kernel,
    out: W,
    json: bool,
    line_number: usize,
}

impl<W: Write> Shell<W> {
    pub fn new(kernel: Kernel, out: W) -> Self {
        Self {
            kernel,
            out,
            json: false,
            line_number: 0,
        }
    }

    /// Print `all` snapshots as JSON
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn into_parts(self) -> (Kernel, W) {
        (self.kernel, self.out)
    }

    /// Run one command against the kernel
    pub fn execute(&mut self, command: Command) -> KernelResult<Outcome> {
        let kernel = &mut self.kernel;
        let outcome = match command {
            Command::Init => Outcome::Running(kernel.init()),
            Command::Timeout => Outcome::Running(kernel.timeout()),
            Command::Create { priority } => {
                let pid = kernel.create_process(priority)?;
                Outcome::Created {
                    pid,
                    running: kernel.running(),
                }
            }
            Command::Destroy { pid } => Outcome::Destroyed(kernel.destroy_process(pid)?),
            Command::Request { resource, units } => {
                let running = kernel.running();
                Outcome::Running(kernel.request_resource(running, resource, units)?)
            }
            Command::Release { resource, units } => {
                let running = kernel.running();
                Outcome::Running(kernel.release_resource(running, resource, units)?)
            }
            Command::ShowAll => Outcome::Snapshot(Box::new(kernel.snapshot())),
        };
        Ok(outcome)
    }

    /// Parse, execute and print a single line
    pub fn run_line(&mut self, line: &str) -> io::Result<()> {
        self.line_number += 1;
        let span = span_command(self.line_number, line.trim());
        let _entered = span.enter();

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Rejected command");
                span.error(&e.to_string());
                return writeln!(self.out, "INVALID COMMAND");
            }
        };

        match self.execute(command) {
            Ok(Outcome::Snapshot(snapshot)) if self.json => {
                let json = serde_json::to_string_pretty(&snapshot).map_err(io::Error::from)?;
                span.success();
                writeln!(self.out, "{}", json)
            }
            Ok(outcome) => {
                span.success();
                writeln!(self.out, "{}", outcome)
            }
            Err(e) => {
                warn!(error = %e, "Operation failed");
                span.error(&e.to_string());
                writeln!(self.out, "ERROR: {}", e)
            }
        }
    }

    /// Run lines until end of input or the first blank line
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                break;
            }
            self.run_line(&line)?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{KernelError, ProcessError};

    fn shell() -> Shell<Vec<u8>> {
        Shell::new(Kernel::default(), Vec::new())
    }

    fn output(shell: Shell<Vec<u8>>) -> String {
        let (_, out) = shell.into_parts();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_execute_outcomes() {
        let mut shell = shell();
        assert_eq!(
            shell.execute(Command::Create { priority: 1 }),
            Ok(Outcome::Created { pid: 1, running: 1 })
        );
        assert_eq!(
            shell.execute(Command::Request {
                resource: 0,
                units: 1
            }),
            Ok(Outcome::Running(1))
        );
        assert_eq!(
            shell.execute(Command::Destroy { pid: 0 }),
            Err(KernelError::Process(ProcessError::CannotDestroyRoot))
        );
        assert_eq!(shell.execute(Command::Destroy { pid: 1 }), Ok(Outcome::Destroyed(1)));
        assert_eq!(shell.execute(Command::Init), Ok(Outcome::Running(0)));
    }

    #[test]
    fn test_run_prints_results() {
        let mut shell = shell();
        let script = "cr 1\ncr 2\nto\nrq 0 1\nde 0\nbogus\nde 1\n";
        shell.run(script.as_bytes()).unwrap();

        assert_eq!(
            output(shell),
            "process 1 created\n\
             process 1 running\n\
             process 2 created\n\
             process 2 running\n\
             process 2 running\n\
             process 2 running\n\
             ERROR: Cannot destroy the root process\n\
             INVALID COMMAND\n\
             ERROR: Process 1 is neither process 2 nor one of its descendants\n"
        );
    }

    #[test]
    fn test_run_stops_at_blank_line() {
        let mut shell = shell();
        shell.run("cr 1\n\ncr 1\n".as_bytes()).unwrap();
        assert_eq!(shell.kernel().processes().len(), 2);
    }

    #[test]
    fn test_show_all_json() {
        let mut shell = shell().with_json(true);
        shell.run_line("all").unwrap();
        let text = output(shell);

        let snapshot: KernelSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(snapshot.running, 0);
        assert_eq!(snapshot.resources.len(), 4);
    }
}
