use crate::{CycleError, HomeworkStatus};

/// Process exit status after a rejected startup configuration.
pub const CONFIG_FAILURE_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Poll { from_date: i64 },
    SendNotification(Notification),
    /// Cycle failure to be logged.
    ReportFailure(CycleError),
    Sleep { seconds: u64 },
    /// Stop the process with `exit_code`.
    Terminate { exit_code: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    StatusChange {
        homework_name: String,
        status: HomeworkStatus,
    },
    Error,
}
