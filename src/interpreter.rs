use crate::command::{Command, ExitCode};
use crate::io_adapters::OutputCapture;
use crate::session::Session;
use crate::store::DataFile;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};
use std::io::Write;

/// The interactive shell over one opened file.
///
/// Each input line is expanded (`$NAME`), split on whitespace and dispatched
/// to a builtin. Unknown commands do nothing.
///
/// Example
/// ```
/// use roottools::Interpreter;
/// use roottools::store::JsonFile;
///
/// let file = JsonFile::from_json(r#"{ "type": "directory", "name": "" }"#).unwrap();
/// let mut sh = Interpreter::new("empty.json", Box::new(file));
/// let mut out = Vec::new();
/// assert_eq!(sh.execute_line("ls", &mut out).unwrap(), 0);
/// assert_eq!(out, b"\n");
/// ```
pub struct Interpreter {
    session: Session,
}

impl Interpreter {
    pub fn new(file_name: impl Into<String>, file: Box<dyn DataFile>) -> Self {
        Self {
            session: Session::new(file_name, file),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// Run one line of input, writing its output to `out`.
    ///
    /// Blank lines and unknown commands return 0 without printing anything.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let expanded = self.session.env.expand(line.trim());
        let mut words = expanded.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(0);
        };
        let args: Vec<&str> = words.collect();

        let Some(command) = Command::parse(name, &args) else {
            tracing::debug!(command = name, "unknown command, ignored");
            return Ok(0);
        };
        tracing::debug!(command = name, ?args, "dispatch");

        let mut capture = OutputCapture::new(out);
        let code = command.execute(&mut capture, &mut self.session)?;
        capture.finish()?;
        Ok(code)
    }

    /// Read-eval-print loop on the terminal. Returns after `exit`, Ctrl-C or
    /// end of input.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.session.env.should_exit {
            match rl.readline(&self.prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    let mut stdout = std::io::stdout();
                    match self.execute_line(&line, &mut stdout) {
                        Ok(code) if code != 0 => tracing::debug!(code, "command failed"),
                        Ok(_) => {}
                        Err(e) => tracing::error!("{e:#}"),
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}
