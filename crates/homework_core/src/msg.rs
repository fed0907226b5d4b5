use serde_json::Value;

use crate::{CycleError, DeliveryError, HomeworkStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Credentials failed validation at startup.
    ConfigRejected,
    /// Timer fired (or first start): begin a new cycle.
    CycleStarted,
    /// The API answered with a decoded payload at time `now`.
    PollSucceeded { payload: Value, now: i64 },
    /// The API call failed before a payload was available.
    PollFailed(CycleError),
    /// A status-change notification reached the chat.
    NotificationDelivered {
        homework_name: String,
        status: HomeworkStatus,
    },
    /// Any notification failed to reach the chat.
    NotificationFailed { error: DeliveryError },
    /// All effects of the current cycle have run.
    CycleFinished,
}
