use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use homework_core::{
    update, CycleError, Effect, LoopSettings, LoopState, Msg, Notification, NotificationKind,
};

use crate::{Clock, Dispatcher, HomeworkApi};

/// What happened during one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleReport {
    pub from_date: Option<i64>,
    pub sent: Vec<String>,
    pub failed_deliveries: usize,
    pub failures: Vec<CycleError>,
    pub sleep: Duration,
}

/// Executes the effects requested by the core state machine.
pub struct Runner {
    api: Arc<dyn HomeworkApi>,
    dispatcher: Dispatcher,
    clock: Clock,
    cycle_deadline: Duration,
}

impl Runner {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        dispatcher: Dispatcher,
        clock: Clock,
        cycle_deadline: Duration,
    ) -> Self {
        Self {
            api,
            dispatcher,
            clock,
            cycle_deadline,
        }
    }

    /// Fresh state with the cursor at the current time.
    pub fn initial_state(&self, settings: LoopSettings) -> LoopState {
        LoopState::new((self.clock)(), settings)
    }

    /// Runs cycles forever, sleeping the requested period between them.
    pub async fn run_forever(&self, mut state: LoopState) {
        engine_info!(
            "Polling started, cursor={} retry_period={}s",
            state.cursor(),
            state.settings().retry_period_secs
        );
        loop {
            let (next, report) = self.run_cycle(state).await;
            state = next;
            tokio::time::sleep(report.sleep).await;
        }
    }

    /// One poll, validate, format and dispatch pass. Never fails.
    pub async fn run_cycle(&self, state: LoopState) -> (LoopState, CycleReport) {
        engine_logging::set_cycle(state.cycles() + 1);
        let mut report = CycleReport::default();
        let (mut state, effects) = update(state, Msg::CycleStarted);
        let mut queue: VecDeque<Effect> = effects.into();
        let mut finishing = false;

        loop {
            let effect = match queue.pop_front() {
                Some(effect) => effect,
                None if !finishing => {
                    finishing = true;
                    let (next, effects) = update(state, Msg::CycleFinished);
                    state = next;
                    queue.extend(effects);
                    continue;
                }
                None => break,
            };

            let msg = match effect {
                Effect::Poll { from_date } => {
                    report.from_date = Some(from_date);
                    Some(self.poll(from_date).await)
                }
                Effect::SendNotification(notification) => {
                    self.deliver(notification, &mut report).await
                }
                Effect::ReportFailure(err) => {
                    engine_error!("{}", err.notification_text());
                    report.failures.push(err);
                    None
                }
                Effect::Sleep { seconds } => {
                    report.sleep = Duration::from_secs(seconds);
                    None
                }
                Effect::Terminate { exit_code } => {
                    engine_warn!("Exit with code {} requested mid-cycle; ignored", exit_code);
                    None
                }
            };

            if let Some(msg) = msg {
                let (next, effects) = update(state, msg);
                state = next;
                queue.extend(effects);
            }
        }

        engine_info!(
            "Cycle done: sent={} failed_deliveries={} failures={} cursor={}",
            report.sent.len(),
            report.failed_deliveries,
            report.failures.len(),
            state.cursor()
        );
        (state, report)
    }

    async fn poll(&self, from_date: i64) -> Msg {
        // Time of the request, so changes made while it is in flight fall into the next window.
        let now = (self.clock)();
        match tokio::time::timeout(self.cycle_deadline, self.api.fetch(from_date)).await {
            Ok(Ok(payload)) => {
                engine_debug!("Poll succeeded from_date={}", from_date);
                Msg::PollSucceeded { payload, now }
            }
            Ok(Err(err)) => Msg::PollFailed(err),
            Err(_) => Msg::PollFailed(CycleError::Timeout(self.cycle_deadline.as_secs())),
        }
    }

    async fn deliver(&self, notification: Notification, report: &mut CycleReport) -> Option<Msg> {
        let Notification { text, kind } = notification;
        match self.dispatcher.send(&text).await {
            Ok(()) => {
                report.sent.push(text);
                match kind {
                    NotificationKind::StatusChange {
                        homework_name,
                        status,
                    } => Some(Msg::NotificationDelivered {
                        homework_name,
                        status,
                    }),
                    NotificationKind::Error => None,
                }
            }
            Err(error) => {
                report.failed_deliveries += 1;
                Some(Msg::NotificationFailed { error })
            }
        }
    }
}
