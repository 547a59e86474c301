//! Line-oriented command loop over any [`FsBackend`].
//!
//! One command per line, whitespace separated. Errors from the file system are printed and
//! the session goes on; only I/O failures on the session streams end it early.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ShellConfig;
use crate::core::FsBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir(String),
    Touch(String),
    Ls,
    Cd(String),
    Pwd,
    Rm(String),
    Rename(String, String),
    Mv(String, String),
    Cp(String, String),
    Cat(String),
    /// `nwfiletxt`: replace content with the lines that follow.
    Write(String),
    /// `appendtxt`: append the lines that follow.
    Append(String),
    Exit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown command arguments")]
pub struct UnknownCommand;

impl Command {
    /// Parses one input line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> std::result::Result<Option<Command>, UnknownCommand> {
        let mut tokens = line.split_whitespace();
        let Some(cmd) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let one = |f: fn(String) -> Command| match args.first() {
            Some(arg) => Ok(f(arg.clone())),
            None => Err(UnknownCommand),
        };
        let two = |f: fn(String, String) -> Command| match args.as_slice() {
            [a, b] => Ok(f(a.clone(), b.clone())),
            _ => Err(UnknownCommand),
        };

        let command = match cmd {
            "exit" => Ok(Command::Exit),
            "ls" => Ok(Command::Ls),
            "pwd" => Ok(Command::Pwd),
            "mkdir" => one(Command::Mkdir),
            "touch" => one(Command::Touch),
            "cd" => one(Command::Cd),
            "rm" => one(Command::Rm),
            "cat" => one(Command::Cat),
            "nwfiletxt" => one(Command::Write),
            "appendtxt" => one(Command::Append),
            "rename" => two(Command::Rename),
            "mv" => two(Command::Mv),
            "cp" => two(Command::Cp),
            _ => Err(UnknownCommand),
        }?;
        Ok(Some(command))
    }
}

/// What the loop does after a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive session: reads commands from `input`, prints to `output`.
pub struct Shell<B, R, W> {
    fs: B,
    input: R,
    output: W,
    config: ShellConfig,
}

impl<B: FsBackend, R: BufRead, W: Write> Shell<B, R, W> {
    pub fn new(fs: B, input: R, output: W, config: ShellConfig) -> Self {
        Self {
            fs,
            input,
            output,
            config,
        }
    }

    pub fn fs(&self) -> &B {
        &self.fs
    }

    /// Gives back the backend and the output sink.
    pub fn into_parts(self) -> (B, W) {
        (self.fs, self.output)
    }

    /// Runs until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        info!("session started");
        loop {
            if self.config.show_prompt {
                write!(self.output, "{}$ ", self.fs.cwd())?;
                self.output.flush().context("failed to flush prompt")?;
            }
            let Some(line) = self.read_line()? else {
                break;
            };
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };
            debug!(?command, "dispatching");
            let flow = self.execute(command)?;
            self.output.flush().context("failed to flush output")?;
            if flow == Flow::Exit {
                break;
            }
        }
        info!("session ended");
        self.output.flush().context("failed to flush output")?;
        Ok(())
    }

    /// One line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Collects lines up to the sentinel. End of input also ends entry.
    fn read_content(&mut self) -> Result<Vec<String>> {
        if self.config.entry_hint {
            writeln!(
                self.output,
                "enter the lines ({} means done)",
                self.config.sentinel
            )?;
        }
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line == self.config.sentinel {
                break;
            }
            lines.push(line);
        }
        Ok(lines)
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        let outcome = match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Ls => {
                for entry in self.fs.ls() {
                    if entry.is_dir {
                        writeln!(self.output, "{} folder", entry.name)?;
                    } else {
                        writeln!(self.output, "{}", entry.name)?;
                    }
                }
                Ok(())
            }
            Command::Pwd => {
                writeln!(self.output, "{}", self.fs.cwd())?;
                Ok(())
            }
            Command::Mkdir(name) => self.fs.mkdir(&name),
            Command::Touch(name) => match self.fs.touch(&name) {
                Ok(()) => {
                    writeln!(self.output, "File '{name}' created in the current directory.")?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Cd(path) => self.fs.cd(&path),
            Command::Rm(name) => self.fs.rm(&name),
            Command::Rename(old, new) => self.fs.rename(&old, &new),
            Command::Mv(src, dst) => self.fs.mv(&src, &dst),
            Command::Cp(src, dst) => self.fs.cp(&src, &dst),
            Command::Cat(path) => match self.fs.cat(&path) {
                Ok(lines) => {
                    for line in lines {
                        writeln!(self.output, "{line}")?;
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Write(path) => match self.fs.ensure_file(&path) {
                Ok(()) => {
                    let lines = self.read_content()?;
                    self.fs.write(&path, lines)
                }
                Err(e) => Err(e),
            },
            Command::Append(path) => match self.fs.ensure_file(&path) {
                Ok(()) => {
                    let lines = self.read_content()?;
                    self.fs.append(&path, lines)
                }
                Err(e) => Err(e),
            },
        };

        if let Err(e) = outcome {
            debug!(error = %e, "command failed");
            writeln!(self.output, "{e}")?;
        }
        Ok(Flow::Continue)
    }
}
