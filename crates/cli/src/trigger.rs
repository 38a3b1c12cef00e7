//! Host triggers typed on stdin while a composition plays.

/// A command read from one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Discard the current run and start a new one.
    Restart,
    /// Snapshot the surface and write it to disk.
    Save,
    Quit,
}

impl Trigger {
    /// Parses a trimmed, case-insensitive command word.
    pub fn parse(line: &str) -> Option<Trigger> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "restart" => Some(Trigger::Restart),
            "s" | "save" => Some(Trigger::Save),
            "q" | "quit" | "exit" => Some(Trigger::Quit),
            _ => None,
        }
    }
}
