use std::collections::HashMap;

use crate::{HomeworkStatus, SeenErrors};

pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_SEEN_ERRORS_CAPACITY: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Starting,
    Polling,
    Sleeping,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
    pub retry_period_secs: u64,
    pub seen_errors_capacity: usize,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            retry_period_secs: DEFAULT_RETRY_PERIOD_SECS,
            seen_errors_capacity: DEFAULT_SEEN_ERRORS_CAPACITY,
        }
    }
}

/// Everything the polling loop carries from one cycle to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopState {
    phase: Phase,
    cursor: i64,
    known_statuses: HashMap<String, HomeworkStatus>,
    seen_errors: SeenErrors,
    cycles: u64,
    settings: LoopSettings,
}

impl Default for LoopState {
    fn default() -> Self {
        Self::new(0, LoopSettings::default())
    }
}

impl LoopState {
    /// `now` seeds the cursor, in seconds since the epoch.
    pub fn new(now: i64, settings: LoopSettings) -> Self {
        Self {
            phase: Phase::Starting,
            cursor: now,
            known_statuses: HashMap::new(),
            seen_errors: SeenErrors::with_capacity(settings.seen_errors_capacity),
            cycles: 0,
            settings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn known_status(&self, homework_name: &str) -> Option<HomeworkStatus> {
        self.known_statuses.get(homework_name).copied()
    }

    pub fn seen_errors(&self) -> &SeenErrors {
        &self.seen_errors
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn settings(&self) -> LoopSettings {
        self.settings
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Never moves the cursor backwards.
    pub(crate) fn advance_cursor(&mut self, now: i64) {
        self.cursor = self.cursor.max(now);
    }

    pub(crate) fn remember_status(&mut self, homework_name: String, status: HomeworkStatus) {
        self.known_statuses.insert(homework_name, status);
    }

    pub(crate) fn seen_errors_mut(&mut self) -> &mut SeenErrors {
        &mut self.seen_errors
    }

    pub(crate) fn finish_cycle(&mut self) {
        self.cycles += 1;
        self.phase = Phase::Sleeping;
    }
}
