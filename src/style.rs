use crossterm::style::Stylize;
use crossterm::tty::IsTty;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tone {
    Title,
    Hint,
    Info,
    Success,
    Failure,
}

/// ANSI coloring that collapses to plain text when disabled
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Color only when stdout is a terminal and the player did not opt out
    pub fn detect(no_color: bool, quiet: bool) -> Self {
        Self::new(std::io::stdout().is_tty() && !no_color && !quiet)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Title => text.bold().to_string(),
            Tone::Hint => text.yellow().to_string(),
            Tone::Info => text.blue().to_string(),
            Tone::Success => text.green().to_string(),
            Tone::Failure => text.red().to_string(),
        }
    }
}
