//! Human-readable game trace, exported once when the game ends

use std::fs;
use std::path::Path;

use crate::core::error::Result;

/// Ordered trace lines
///
/// Search clones carry a disabled trace so speculative moves never reach the
/// exported log.
#[derive(Debug, Clone, Default)]
pub struct GameTrace {
    lines: Vec<String>,
    enabled: bool,
}

impl GameTrace {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            enabled: true,
        }
    }

    /// A trace that drops everything recorded into it
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record(&mut self, line: impl Into<String>) {
        if self.enabled {
            self.lines.push(line.into());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write every line, newline-terminated
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut contents = String::new();
        for line in &self.lines {
            contents.push_str(line);
            contents.push('\n');
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_trace_drops_lines() {
        let mut trace = GameTrace::disabled();
        trace.record("turn #1");
        assert!(trace.lines().is_empty());
    }

    #[test]
    fn test_enabled_trace_keeps_order() {
        let mut trace = GameTrace::new();
        trace.record("first");
        trace.record(String::from("second"));
        assert_eq!(trace.lines(), &["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_write_to_file() {
        let mut trace = GameTrace::new();
        trace.record("a");
        trace.record("b");
        let path = std::env::temp_dir().join(format!("wargame_trace_{}.txt", std::process::id()));
        trace.write_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "a\nb\n");
        let _ = std::fs::remove_file(&path);
    }
}
