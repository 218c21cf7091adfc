//! RegisterStep (fatal): alta de la agencia con identificadores únicos.

use std::rc::Rc;

use stock_client::{Method, Transport};
use stock_core::{StepDefinition, StepRunResult, StepSeverity, TestContext};

use crate::extract::failure_message;
use crate::payloads::{RegisterRequest, REGISTER_PATH};

use super::{print_request, print_response, succeeded};

pub struct RegisterStep {
    api: Rc<dyn Transport>,
}

impl RegisterStep {
    pub fn new(api: Rc<dyn Transport>) -> Self {
        Self { api }
    }
}

impl StepDefinition for RegisterStep {
    fn id(&self) -> &str {
        "register"
    }

    fn name(&self) -> &str {
        "Register New Agency"
    }

    fn severity(&self) -> StepSeverity {
        StepSeverity::Fatal
    }

    fn run(&self, ctx: &mut TestContext) -> StepRunResult {
        let body = match serde_json::to_value(RegisterRequest::for_context(ctx)) {
            Ok(b) => b,
            Err(e) => return StepRunResult::fail(format!("could not encode registration: {e}"), None),
        };
        print_request(&Method::POST, REGISTER_PATH, Some(&body));
        let response = self.api.send(Method::POST, REGISTER_PATH, Some(&body), &[]);
        print_response(REGISTER_PATH, &response);

        if succeeded(&response) {
            StepRunResult::pass(format!("Agency registered successfully (sapcode {})", ctx.sapcode()),
                                Some(response.payload))
        } else {
            StepRunResult::fail(format!("Agency registration failed (status {}): {}",
                                        response.status,
                                        failure_message(&response.payload)),
                                Some(response.payload))
        }
    }
}
