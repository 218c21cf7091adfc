//! Binario `stockflow`: ejecuta el recorrido completo una vez.
//!
//! Estado de salida: 0 si la ejecución termina sin aborto (y, en modo
//! estricto, con todos los invariantes cumplidos); 1 en cualquier otro caso,
//! incluido un panic.

use std::backtrace::Backtrace;
use std::panic;
use std::process::ExitCode;

use log::error;
use stockflow_rust::config::HarnessConfig;
use stockflow_rust::errors::HarnessError;
use stockflow_rust::run_harness;
use stock_client::init_dotenv;
use stock_core::TestContext;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // `init` también instala el puente para los registros de `log`.
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run() -> Result<(), HarnessError> {
    init_dotenv();
    let config = HarnessConfig::from_env()?;
    let strict = config.strict;
    let run = run_harness(&config, TestContext::generate())?;
    run.into_verdict(strict).map(|_| ())
}

fn main() -> ExitCode {
    init_logging();
    panic::set_hook(Box::new(|info| {
        error!("panic: {info}\n{}", Backtrace::force_capture());
    }));

    match panic::catch_unwind(run) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!("{e}");
            ExitCode::FAILURE
        }
        Err(_) => ExitCode::FAILURE,
    }
}
