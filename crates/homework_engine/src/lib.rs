//! Homework engine: HTTP poller, chat dispatcher and the effect-executing loop.
mod dispatch;
mod poll;
mod runner;
mod types;

pub use dispatch::{Dispatcher, Notifier, TelegramNotifier, TELEGRAM_MESSAGE_LIMIT};
pub use poll::{HomeworkApi, PracticumClient};
pub use runner::{CycleReport, Runner};
pub use types::{
    system_clock, ClientError, Clock, PollSettings, Secret, TelegramSettings,
    DEFAULT_PRACTICUM_ENDPOINT, DEFAULT_TELEGRAM_API_URL,
};
