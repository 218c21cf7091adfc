//! stockflow
//!
//! Harness de extremo a extremo para el API de inventario con ubicaciones:
//! - `config`: configuración completa del harness (cliente, aprobación,
//!   expectativas, modo estricto).
//! - `errors`: errores de nivel superior que el binario mapea a estado 1.
//! - `report`: cabecera, tabla resumen y banner final.
//!
//! `run_harness` arma el recorrido con el cliente real; `run_journey` acepta
//! cualquier `Transport` y agente para poder probarlo sin red.

pub mod config;
pub mod errors;
pub mod report;

use std::rc::Rc;

use log::{info, warn};
use stock_adapters::{core_journey, JourneySettings};
use stock_client::{build_agent, ApiClient, ApprovalAgent, Transport};
use stock_core::{FatalStepFailure, RunOutcome, RunSequencer, StepResult, TestContext};

use crate::config::HarnessConfig;
use crate::errors::HarnessError;

/// Una ejecución terminada, completa o abortada.
#[derive(Debug)]
pub struct HarnessRun {
    pub context: TestContext,
    pub result: Result<RunOutcome, FatalStepFailure>,
}

impl HarnessRun {
    pub fn results(&self) -> &[StepResult] {
        match &self.result {
            Ok(outcome) => &outcome.results,
            Err(failure) => &failure.results,
        }
    }

    pub fn aborted_at(&self) -> Option<&str> {
        self.result.as_ref().err().map(|f| f.step_id.as_str())
    }

    /// Veredicto del proceso. En modo estricto un fallo no fatal también es
    /// un error.
    pub fn into_verdict(self, strict: bool) -> Result<RunOutcome, HarnessError> {
        let outcome = self.result?;
        if strict && !outcome.all_invariants_held() {
            return Err(HarnessError::SoftFailures { failed: outcome.failed(),
                                                    not_verifiable: outcome.not_verifiable() });
        }
        Ok(outcome)
    }
}

/// Ejecuta el recorrido completo contra `api`.
pub fn run_journey(api: Rc<dyn Transport>,
                   agent: Box<dyn ApprovalAgent>,
                   settings: &JourneySettings,
                   mut context: TestContext)
                   -> HarnessRun {
    let mut sequencer = RunSequencer::new().add_steps(core_journey(api, agent, settings)).build();
    info!("run {} started for sapcode {}", sequencer.run_id(), context.sapcode());
    let result = sequencer.run(&mut context);
    match &result {
        Ok(outcome) => info!("run {} completed: {} passed, {} failed, {} not verifiable",
                             outcome.run_id,
                             outcome.passed(),
                             outcome.failed(),
                             outcome.not_verifiable()),
        Err(failure) => warn!("run {} aborted: {failure}", sequencer.run_id()),
    }
    HarnessRun { context, result }
}

/// Construye cliente y agente desde la configuración e imprime el informe de
/// consola alrededor de la ejecución.
pub fn run_harness(config: &HarnessConfig, context: TestContext) -> Result<HarnessRun, HarnessError> {
    let client = ApiClient::new(&config.client)?;
    let agent = build_agent(&config.approval);
    info!("approval agent: {}", agent.name());

    println!("{}", report::header(&context, client.base_url()));
    let run = run_journey(Rc::new(client), agent, &config.journey, context);

    println!("\n{}", report::summary_table(run.results()));
    println!("{}", report::final_banner(run.results(), run.aborted_at()));
    Ok(run)
}
