use crate::{
    check_response, parse_status, CycleError, Effect, LoopState, Msg, Notification,
    NotificationKind, Phase, CONFIG_FAILURE_EXIT_CODE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: LoopState, msg: Msg) -> (LoopState, Vec<Effect>) {
    if state.phase() == Phase::Terminated {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::ConfigRejected => {
            state.set_phase(Phase::Terminated);
            vec![Effect::Terminate {
                exit_code: CONFIG_FAILURE_EXIT_CODE,
            }]
        }
        Msg::CycleStarted => match state.phase() {
            Phase::Starting | Phase::Sleeping => {
                state.set_phase(Phase::Polling);
                vec![Effect::Poll {
                    from_date: state.cursor(),
                }]
            }
            Phase::Polling | Phase::Terminated => Vec::new(),
        },
        Msg::PollSucceeded { payload, now } if state.phase() == Phase::Polling => {
            state.advance_cursor(now);
            let records = match check_response(&payload) {
                Ok(records) => records,
                Err(err) => return report_failure(state, err.into()),
            };

            let mut effects = Vec::with_capacity(records.len());
            for record in records {
                // First bad record aborts the rest of the cycle.
                let status_update = match parse_status(record) {
                    Ok(status_update) => status_update,
                    Err(err) => {
                        let (next, failure) = report_failure(state, err.into());
                        effects.extend(failure);
                        return (next, effects);
                    }
                };
                if state.known_status(&status_update.homework_name) == Some(status_update.status) {
                    continue;
                }
                effects.push(Effect::SendNotification(Notification {
                    text: status_update.message(),
                    kind: NotificationKind::StatusChange {
                        homework_name: status_update.homework_name,
                        status: status_update.status,
                    },
                }));
            }
            effects
        }
        Msg::PollFailed(err) if state.phase() == Phase::Polling => {
            return report_failure(state, err);
        }
        Msg::NotificationDelivered {
            homework_name,
            status,
        } => {
            state.remember_status(homework_name, status);
            Vec::new()
        }
        Msg::CycleFinished if state.phase() == Phase::Polling => {
            state.finish_cycle();
            vec![Effect::Sleep {
                seconds: state.settings().retry_period_secs,
            }]
        }
        Msg::PollSucceeded { .. }
        | Msg::PollFailed(_)
        | Msg::NotificationFailed { .. }
        | Msg::CycleFinished => Vec::new(),
    };

    (state, effects)
}

/// Log always, notify once per distinct text.
fn report_failure(mut state: LoopState, err: CycleError) -> (LoopState, Vec<Effect>) {
    let text = err.notification_text();
    let mut effects = vec![Effect::ReportFailure(err)];
    if state.seen_errors_mut().insert(text.clone()) {
        effects.push(Effect::SendNotification(Notification {
            text,
            kind: NotificationKind::Error,
        }));
    }
    (state, effects)
}
