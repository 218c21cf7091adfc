//! ApproveStep (informativo): aprobación fuera de banda de la cuenta nueva.
//!
//! El resultado sólo dice si el comando se despachó. Un fallo se reporta y la
//! ejecución sigue: la verificación real es el login siguiente.

use serde_json::json;
use stock_client::ApprovalAgent;
use stock_core::{StepDefinition, StepRunResult, StepSeverity, StepSignal, TestContext};

pub struct ApproveStep {
    agent: Box<dyn ApprovalAgent>,
}

impl ApproveStep {
    pub fn new(agent: Box<dyn ApprovalAgent>) -> Self {
        Self { agent }
    }
}

impl StepDefinition for ApproveStep {
    fn id(&self) -> &str {
        "approve"
    }

    fn name(&self) -> &str {
        "Approve Agency Out Of Band"
    }

    fn severity(&self) -> StepSeverity {
        StepSeverity::Advisory
    }

    fn run(&self, ctx: &mut TestContext) -> StepRunResult {
        println!("[INFO] Auto-approving {} via {}...", ctx.email(), self.agent.name());
        match self.agent.approve(ctx.email()) {
            Ok(dispatched) => {
                let observed = json!({ "agent": dispatched.agent, "exit_code": dispatched.exit_code });
                StepRunResult::PassedWithSignals { detail: format!("Approval dispatched via {}", dispatched.agent),
                                                   observed: Some(observed.clone()),
                                                   signals: vec![StepSignal::new("approval_dispatched", observed)] }
            }
            Err(e) => StepRunResult::fail(format!("Approval could not be dispatched: {e}"), None),
        }
    }
}
