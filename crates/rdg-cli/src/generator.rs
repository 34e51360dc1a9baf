//! Text generation through an external command.
//!
//! The command receives the system prompt, a blank line and the user
//! prompt on stdin and must print the reply (a JSON array) on stdout.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use rdg_catalog::TextGenerator;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a command line on whitespace. Quoting is not supported.
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            bail!("empty generator command");
        };
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        info!(program = %self.program, "running text generator");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("spawn {}", self.program))?;

        // Write from a separate thread so a child that replies before
        // draining stdin cannot deadlock against a full pipe.
        let mut stdin = child.stdin.take().context("generator stdin unavailable")?;
        let prompt = format!("{system_prompt}\n\n{user_prompt}");
        let writer = thread::spawn(move || stdin.write_all(prompt.as_bytes()));

        let output = child
            .wait_with_output()
            .with_context(|| format!("wait for {}", self.program))?;
        writer
            .join()
            .map_err(|_| anyhow!("prompt writer for {} panicked", self.program))?
            .with_context(|| format!("write prompt to {}", self.program))?;
        if !output.status.success() {
            bail!("{} exited with {}", self.program, output.status);
        }
        let reply = String::from_utf8(output.stdout)
            .with_context(|| format!("{} printed non-UTF-8 output", self.program))?;
        debug!(bytes = reply.len(), "text generator replied");
        Ok(reply)
    }
}
