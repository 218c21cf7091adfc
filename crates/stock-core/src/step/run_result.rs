use serde_json::Value;

/// Resultado abstracto de ejecutar un step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepRunResult {
    Passed { detail: String, observed: Option<Value> },
    PassedWithSignals {
        detail: String,
        observed: Option<Value>,
        signals: Vec<StepSignal>,
    },
    Failed { reason: String, observed: Option<Value> },
    NotVerifiable { reason: String },
}

impl StepRunResult {
    pub fn pass(detail: impl Into<String>, observed: Option<Value>) -> Self {
        Self::Passed { detail: detail.into(), observed }
    }

    pub fn fail(reason: impl Into<String>, observed: Option<Value>) -> Self {
        Self::Failed { reason: reason.into(), observed }
    }

    pub fn not_verifiable(reason: impl Into<String>) -> Self {
        Self::NotVerifiable { reason: reason.into() }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed { .. } | Self::PassedWithSignals { .. })
    }
}

/// Hito ligero emitido por un step; queda en el log de eventos sin alterar
/// el estado del step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSignal {
    pub signal: String,
    pub data: Value,
}

impl StepSignal {
    pub fn new(signal: impl Into<String>, data: Value) -> Self {
        Self { signal: signal.into(), data }
    }
}
