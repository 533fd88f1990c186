use crate::builtin::{Cd, Exit, Find, Ls};
use crate::session::Session;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// Conventional exit code type used by shell commands.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// in-process against the session.
pub trait BuiltinCommand: Sized + FromArgs {
    /// Executes the command, writing everything it prints to `stdout`.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

/// A parsed command line, ready to run.
pub enum Command {
    Ls(Ls),
    Cd(Cd),
    Find(Find),
    Exit(Exit),
    /// `--help` output or an argument error reported by argh.
    Usage { output: String, is_error: bool },
}

impl Command {
    /// Parse `name` and its arguments. `None` means the command is unknown.
    pub fn parse(name: &str, args: &[&str]) -> Option<Self> {
        let command = match name {
            "ls" => parse_builtin(name, args, Command::Ls),
            "cd" => parse_builtin(name, args, Command::Cd),
            "find" => parse_builtin(name, args, Command::Find),
            "exit" => parse_builtin(name, args, Command::Exit),
            _ => return None,
        };
        Some(command)
    }

    /// Run the command.
    ///
    /// An error raised by the command is printed to `stdout` and turned into
    /// exit code 1; only failures to write output are returned as errors.
    pub fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let result = match self {
            Command::Ls(cmd) => cmd.execute(stdout, session),
            Command::Cd(cmd) => cmd.execute(stdout, session),
            Command::Find(cmd) => cmd.execute(stdout, session),
            Command::Exit(cmd) => cmd.execute(stdout, session),
            Command::Usage { output, is_error } => {
                writeln!(stdout, "{}", output.trim_end())?;
                Ok(if is_error { 1 } else { 0 })
            }
        };
        match result {
            Ok(code) => Ok(code),
            Err(e) => {
                writeln!(stdout, "{e:#}")?;
                Ok(1)
            }
        }
    }
}

fn parse_builtin<T: BuiltinCommand>(name: &str, args: &[&str], wrap: fn(T) -> Command) -> Command {
    match T::from_args(&[name], args) {
        Ok(cmd) => wrap(cmd),
        Err(EarlyExit { output, status }) => Command::Usage {
            output,
            is_error: status.is_err(),
        },
    }
}
