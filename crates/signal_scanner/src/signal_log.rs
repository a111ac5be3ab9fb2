use core::time::Duration;
use std::collections::VecDeque;

use bevy::prelude::*;

use crate::config::LOG_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub at: Duration,
    pub text: String,
}

impl LogLine {
    /// `[mm:ss]` of the session time the line was written at.
    pub fn stamp(&self) -> String {
        let seconds = self.at.as_secs();
        format!("[{:02}:{:02}]", seconds / 60, seconds % 60)
    }

    pub fn is_acquisition(&self) -> bool {
        self.text.contains("ACQUIRED")
    }
}

/// The player-facing log panel, newest line first.
#[derive(Debug, Clone, Default)]
pub struct SignalLog {
    lines: VecDeque<LogLine>,
}

impl SignalLog {
    pub fn push(&mut self, at: Duration, text: impl Into<String>) {
        let text = text.into();
        info!("{text}");
        self.lines.push_front(LogLine { at, text });
        self.lines.truncate(LOG_DEPTH);
    }

    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    pub fn newest(&self) -> Option<&LogLine> {
        self.lines.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_newest_lines_first() {
        let mut log = SignalLog::default();
        for i in 0..10 {
            log.push(Duration::from_secs(i), format!("LINE {i}"));
        }
        assert_eq!(log.lines().count(), LOG_DEPTH, "older lines fall off");
        assert_eq!(
            log.newest().map(|line| line.text.as_str()),
            Some("LINE 9"),
            "newest line is on top"
        );
        assert_eq!(
            log.lines().last().map(|line| line.text.as_str()),
            Some("LINE 3"),
            "oldest kept line is at the bottom"
        );
    }

    #[test]
    fn stamps_minutes_and_seconds() {
        let line = LogLine {
            at: Duration::from_millis(125_900),
            text: "SIGNAL ACQUIRED: ID_4".to_string(),
        };
        assert_eq!(line.stamp(), "[02:05]", "125.9 s reads as two minutes five");
        assert!(line.is_acquisition(), "acquisitions are highlighted");
    }
}
