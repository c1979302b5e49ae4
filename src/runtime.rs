use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of player input lines
pub trait LineSource {
    /// Show `prompt` and block for the next line.
    /// Returns Ok(None) once input is exhausted (EOF).
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Production source: prompt on stdout, read from stdin
pub struct StdinLines {
    stdin: io::Stdin,
}

impl StdinLines {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for StdinLines {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        read_one(&mut self.stdin.lock())
    }
}

/// Bytes that are not UTF-8 still form a line; the round engine rejects them
fn read_one<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf)? {
        0 => Ok(None),
        _ => {
            let line = String::from_utf8_lossy(&buf);
            Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
        }
    }
}

/// Scripted source for tests; remembers every prompt it was shown
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
