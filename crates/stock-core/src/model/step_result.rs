use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clasificación final de un step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepVerdict {
    Pass,
    Fail,
    /// El step no pudo evaluarse porque le faltaba un dato de un step previo.
    NotVerifiable,
}

impl StepVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            StepVerdict::Pass => "PASS",
            StepVerdict::Fail => "FAIL",
            StepVerdict::NotVerifiable => "NOT VERIFIABLE",
        }
    }
}

/// Resultado de una invocación de step.
///
/// Se crea en cada invocación y el driver lo consume al terminar la
/// ejecución; no se persiste. `fatal` indica que el step está clasificado
/// como fatal (su fallo aborta la ejecución), no que haya fallado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub step_id: String,
    pub step_name: String,
    pub passed: bool,
    pub fatal: bool,
    pub verdict: StepVerdict,
    pub detail: String,
    pub observed_value: Option<Value>,
}

impl StepResult {
    /// `true` si este resultado obliga a abortar la ejecución.
    pub fn aborts_run(&self) -> bool {
        self.fatal && !self.passed
    }
}
