mod config;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use engine_logging::{engine_error, engine_info};
use homework_core::{update, Effect, LoopState, Msg, CONFIG_FAILURE_EXIT_CODE};
use homework_engine::{system_clock, Dispatcher, PracticumClient, Runner, TelegramNotifier};

use config::{Config, ConfigError};

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();
    logging::initialize(&logging::LogSettings::from_env());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => terminate(err),
    };

    let api = PracticumClient::new(config.poll_settings()).context("building API client")?;
    let notifier =
        TelegramNotifier::new(&config.telegram_settings()).context("building bot client")?;
    let runner = Runner::new(
        Arc::new(api),
        Dispatcher::new(Arc::new(notifier), config.chat_id.clone()),
        system_clock(),
        config.cycle_deadline(),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    engine_info!("Homework notifier starting, endpoint={}", config.endpoint);
    let state = runner.initial_state(config.loop_settings());
    runtime.block_on(runner.run_forever(state));
    Ok(())
}

fn terminate(err: ConfigError) -> ! {
    engine_error!("Startup aborted: {}", err);
    eprintln!("Ошибка конфигурации: {err}");
    std::process::exit(rejected_config_exit_code());
}

/// Exit status the state machine asks for when startup config is rejected.
fn rejected_config_exit_code() -> i32 {
    let (_, effects) = update(LoopState::default(), Msg::ConfigRejected);
    effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::Terminate { exit_code } => Some(exit_code),
            _ => None,
        })
        .unwrap_or(CONFIG_FAILURE_EXIT_CODE)
}
