use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use homework_core::{CycleError, DeliveryError, LoopSettings, ShapeError};
use homework_engine::{Clock, Dispatcher, HomeworkApi, Notifier, Runner};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Default)]
struct FakeApi {
    responses: Mutex<VecDeque<Result<Value, CycleError>>>,
    from_dates: Mutex<Vec<i64>>,
}

impl FakeApi {
    fn new(responses: Vec<Result<Value, CycleError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            from_dates: Mutex::new(Vec::new()),
        }
    }

    fn from_dates(&self) -> Vec<i64> {
        self.from_dates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HomeworkApi for FakeApi {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        self.from_dates.lock().unwrap().push(from_date);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"homeworks": []})))
    }
}

struct HangingApi;

#[async_trait::async_trait]
impl HomeworkApi for HangingApi {
    async fn fetch(&self, _from_date: i64) -> Result<Value, CycleError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(json!({"homeworks": []}))
    }
}

#[derive(Default)]
struct FakeNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl FakeNotifier {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Notifier for FakeNotifier {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        if self.fail {
            Err(DeliveryError::HttpStatus(500))
        } else {
            Ok(())
        }
    }
}

fn ticking_clock(start: i64, step: i64) -> Clock {
    let now = Arc::new(AtomicI64::new(start));
    Arc::new(move || now.fetch_add(step, Ordering::SeqCst))
}

fn runner(api: Arc<dyn HomeworkApi>, notifier: Arc<FakeNotifier>, clock: Clock) -> Runner {
    Runner::new(
        api,
        Dispatcher::new(notifier, "chat-1"),
        clock,
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn cycle_sends_one_message_per_record() {
    init_logging();
    let api = Arc::new(FakeApi::new(vec![Ok(json!({"homeworks": [
        {"homework_name": "hw1", "status": "approved"},
        {"homework_name": "hw2", "status": "reviewing"}
    ]}))]));
    let notifier = Arc::new(FakeNotifier::default());
    let runner = runner(api, notifier.clone(), ticking_clock(1_000, 0));

    let state = runner.initial_state(LoopSettings::default());
    let (_, report) = runner.run_cycle(state).await;

    assert_eq!(
        notifier.texts(),
        vec![
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!".to_string(),
            "Изменился статус проверки работы \"hw2\". Работа взята на проверку ревьюером.".to_string(),
        ]
    );
    assert_eq!(notifier.sent.lock().unwrap()[0].0, "chat-1");
    assert_eq!(report.sleep, Duration::from_secs(600));
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn empty_list_sends_nothing() {
    init_logging();
    let api = Arc::new(FakeApi::new(vec![Ok(json!({"homeworks": []}))]));
    let notifier = Arc::new(FakeNotifier::default());
    let runner = runner(api, notifier.clone(), ticking_clock(0, 0));

    let (_, report) = runner
        .run_cycle(runner.initial_state(LoopSettings::default()))
        .await;
    assert!(notifier.texts().is_empty());
    assert!(report.sent.is_empty());
}

#[tokio::test]
async fn identical_failure_is_notified_once_across_cycles() {
    init_logging();
    let api = Arc::new(FakeApi::new(vec![
        Err(CycleError::HttpStatus(500)),
        Err(CycleError::HttpStatus(500)),
    ]));
    let notifier = Arc::new(FakeNotifier::default());
    let runner = runner(api, notifier.clone(), ticking_clock(0, 0));

    let state = runner.initial_state(LoopSettings::default());
    let (state, first) = runner.run_cycle(state).await;
    let (state, second) = runner.run_cycle(state).await;

    assert_eq!(
        notifier.texts(),
        vec!["Сбой в работе программы: эндпоинт недоступен, код ответа API: 500".to_string()]
    );
    assert_eq!(first.failures, vec![CycleError::HttpStatus(500)]);
    assert_eq!(second.failures, vec![CycleError::HttpStatus(500)]);
    assert_eq!(state.cycles(), 2);
}

#[tokio::test]
async fn log_lines_are_tagged_with_the_running_cycle() {
    init_logging();
    let api = Arc::new(FakeApi::new(Vec::new()));
    let runner = runner(api, Arc::new(FakeNotifier::default()), ticking_clock(0, 0));

    let state = runner.initial_state(LoopSettings::default());
    let (state, _) = runner.run_cycle(state).await;
    assert_eq!(engine_logging::current_cycle(), 1);
    assert_eq!(engine_logging::CyclePrefix.to_string(), "[cycle 1] ");

    let (state, _) = runner.run_cycle(state).await;
    assert_eq!(engine_logging::current_cycle(), state.cycles());
    assert_eq!(engine_logging::CyclePrefix.to_string(), "[cycle 2] ");
}

#[tokio::test]
async fn shape_error_notifies_without_status_messages() {
    init_logging();
    let api = Arc::new(FakeApi::new(vec![Ok(json!(["not", "a", "mapping"]))]));
    let notifier = Arc::new(FakeNotifier::default());
    let runner = runner(api, notifier.clone(), ticking_clock(0, 0));

    let (_, report) = runner
        .run_cycle(runner.initial_state(LoopSettings::default()))
        .await;
    assert_eq!(
        report.failures,
        vec![CycleError::Shape(ShapeError::NotAMapping)]
    );
    assert_eq!(notifier.texts().len(), 1);
    assert!(notifier.texts()[0].starts_with("Сбой в работе программы"));
}

#[tokio::test]
async fn cursor_advances_between_successful_polls() {
    init_logging();
    let api = Arc::new(FakeApi::new(vec![
        Ok(json!({"homeworks": []})),
        Err(CycleError::Transport("dns".to_string())),
        Ok(json!({"homeworks": []})),
    ]));
    let notifier = Arc::new(FakeNotifier::default());
    let runner = runner(api.clone(), notifier, ticking_clock(100, 10));

    let mut state = runner.initial_state(LoopSettings::default());
    for _ in 0..4 {
        state = runner.run_cycle(state).await.0;
    }

    let dates = api.from_dates();
    assert_eq!(dates.len(), 4);
    assert_eq!(dates[0], 100);
    assert!(dates.windows(2).all(|pair| pair[1] >= pair[0]));
    // Failed poll does not move the cursor.
    assert_eq!(dates[1], dates[2]);
    assert!(dates[1] > dates[0]);
}

#[tokio::test]
async fn delivery_failure_does_not_stop_the_loop() {
    init_logging();
    let record = json!({"homeworks": [{"homework_name": "hw1", "status": "rejected"}]});
    let api = Arc::new(FakeApi::new(vec![Ok(record.clone()), Ok(record)]));
    let notifier = Arc::new(FakeNotifier::failing());
    let runner = runner(api, notifier.clone(), ticking_clock(0, 1));

    let state = runner.initial_state(LoopSettings::default());
    let (state, first) = runner.run_cycle(state).await;
    let (state, second) = runner.run_cycle(state).await;

    assert_eq!(first.failed_deliveries, 1);
    assert!(first.failures.is_empty());
    // Undelivered status is retried on the next cycle it shows up in.
    assert_eq!(second.failed_deliveries, 1);
    assert_eq!(notifier.texts().len(), 2);
    assert!(state.seen_errors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn hanging_api_is_cut_by_cycle_deadline() {
    init_logging();
    let notifier = Arc::new(FakeNotifier::default());
    let runner = runner(Arc::new(HangingApi), notifier.clone(), ticking_clock(0, 0));

    let (_, report) = runner
        .run_cycle(runner.initial_state(LoopSettings::default()))
        .await;
    assert_eq!(report.failures, vec![CycleError::Timeout(5)]);
    assert_eq!(
        notifier.texts(),
        vec!["Сбой в работе программы: API не ответил за 5 с".to_string()]
    );
}
