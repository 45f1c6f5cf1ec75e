// Refresh scheduling and activity console.
// Decides when the workspace query is re-issued and records what happened.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Refresh indicator shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// A query is in flight.
    Refreshing,
    /// Seconds until the next automatic refresh.
    NextIn(u64),
}

impl RefreshStatus {
    pub fn display(&self) -> String {
        match self {
            RefreshStatus::Refreshing => "Refreshing…".to_string(),
            RefreshStatus::NextIn(secs) => format!("Refresh in {}s", secs),
        }
    }
}

/// Fixed-cadence refresh timer. Never schedules overlapping queries.
#[derive(Debug, Clone)]
pub struct RefreshState {
    interval: Duration,
    last_started: Option<Instant>,
    in_flight: bool,
}

impl RefreshState {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_started: None,
            in_flight: false,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a query should be issued now.
    pub fn is_due(&self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        match self.last_started {
            None => true,
            Some(started) => now.saturating_duration_since(started) >= self.interval,
        }
    }

    /// Record that a query was just issued.
    pub fn start(&mut self, now: Instant) {
        self.last_started = Some(now);
        self.in_flight = true;
    }

    /// Record that the in-flight query finished, successfully or not.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn status(&self, now: Instant) -> RefreshStatus {
        if self.in_flight {
            return RefreshStatus::Refreshing;
        }
        let remaining = match self.last_started {
            None => Duration::ZERO,
            Some(started) => self
                .interval
                .saturating_sub(now.saturating_duration_since(started)),
        };
        // Round up so the countdown reads 15..1 rather than 14..0.
        let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
        RefreshStatus::NextIn(secs)
    }
}

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Info,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Warn,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ConsoleLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded activity log with an unread-error counter.
#[derive(Debug, Default)]
pub struct Console {
    messages: Vec<ConsoleMessage>,
    unread_errors: usize,
}

impl Console {
    const MAX_MESSAGES: usize = 500;

    pub fn push(&mut self, message: ConsoleMessage) {
        if message.level == ConsoleLevel::Error {
            self.unread_errors += 1;
        }
        self.messages.push(message);
        if self.messages.len() > Self::MAX_MESSAGES {
            let overflow = self.messages.len() - Self::MAX_MESSAGES;
            self.messages.drain(..overflow);
        }
    }

    pub fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }

    pub fn unread_errors(&self) -> usize {
        self.unread_errors
    }

    pub fn mark_read(&mut self) {
        self.unread_errors = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_refresh_is_due_immediately() {
        let state = RefreshState::new(Duration::from_secs(15));
        assert!(state.is_due(Instant::now()));
        assert_eq!(state.status(Instant::now()), RefreshStatus::NextIn(0));
    }

    #[test]
    fn test_no_overlapping_queries() {
        let mut state = RefreshState::new(Duration::from_secs(15));
        let start = Instant::now();
        state.start(start);

        assert!(!state.is_due(start + Duration::from_secs(60)));
        assert_eq!(state.status(start), RefreshStatus::Refreshing);

        state.finish();
        assert!(state.is_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_countdown() {
        let mut state = RefreshState::new(Duration::from_secs(15));
        let start = Instant::now();
        state.start(start);
        state.finish();

        assert_eq!(state.status(start), RefreshStatus::NextIn(15));
        assert_eq!(
            state.status(start + Duration::from_millis(4500)),
            RefreshStatus::NextIn(11)
        );
        assert!(!state.is_due(start + Duration::from_secs(14)));
        assert!(state.is_due(start + Duration::from_secs(15)));
        assert_eq!(
            state.status(start + Duration::from_secs(20)),
            RefreshStatus::NextIn(0)
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(RefreshStatus::Refreshing.display(), "Refreshing…");
        assert_eq!(RefreshStatus::NextIn(7).display(), "Refresh in 7s");
    }

    #[test]
    fn test_console_counts_errors_and_is_bounded() {
        let mut console = Console::default();
        console.push(ConsoleMessage::info("loaded"));
        console.push(ConsoleMessage::error("failed"));
        console.push(ConsoleMessage::warn("partial"));
        assert_eq!(console.unread_errors(), 1);

        console.mark_read();
        assert_eq!(console.unread_errors(), 0);

        for i in 0..600 {
            console.push(ConsoleMessage::info(format!("tick {}", i)));
        }
        assert_eq!(console.messages().len(), 500);
        assert_eq!(console.messages().last().unwrap().message, "tick 599");
    }
}
