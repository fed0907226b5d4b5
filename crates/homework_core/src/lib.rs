//! Homework notifier core: pure polling state machine and message formatting.
mod effect;
mod error;
mod format;
mod msg;
mod response;
mod seen;
mod state;
mod update;
mod verdict;

pub use effect::{Effect, Notification, NotificationKind, CONFIG_FAILURE_EXIT_CODE};
pub use error::{CycleError, DeliveryError, ERROR_NOTIFICATION_PREFIX};
pub use format::{
    format_status, parse_status, FormatError, StatusUpdate, HOMEWORK_NAME_FIELD, STATUS_FIELD,
};
pub use msg::Msg;
pub use response::{check_response, ShapeError, HOMEWORKS_FIELD};
pub use seen::SeenErrors;
pub use state::{
    LoopSettings, LoopState, Phase, DEFAULT_RETRY_PERIOD_SECS, DEFAULT_SEEN_ERRORS_CAPACITY,
};
pub use update::update;
pub use verdict::HomeworkStatus;
