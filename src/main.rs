use std::process::ExitCode;

use spa_dev_server::config::{self, Config};
use spa_dev_server::error::StartupError;
use spa_dev_server::{logger, server};

fn main() -> ExitCode {
    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match &err {
                StartupError::AddressInUse { port, .. } => logger::log_port_in_use(*port),
                other => logger::log_startup_failed(other),
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn start() -> Result<(), StartupError> {
    let root = config::resolve_root().map_err(StartupError::Root)?;
    let cfg = Config::load(&root)?;
    logger::init(&cfg).map_err(StartupError::Logger)?;

    // Worker thread count follows the config, defaulting to CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.performance.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(server::run(cfg))
}
