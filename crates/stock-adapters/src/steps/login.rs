//! LoginStep (fatal): obtiene el token y el id de la agencia.

use std::rc::Rc;

use serde_json::json;
use stock_client::{Method, Transport};
use stock_core::{StepDefinition, StepRunResult, StepSeverity, TestContext};

use crate::extract::{failure_message, id_at, str_at};
use crate::payloads::{LoginRequest, LOGIN_PATH};

use super::{print_request, print_response, succeeded};

/// Nombre de la cookie de sesión que emite el servicio.
pub const TOKEN_COOKIE: &str = "token";

pub struct LoginStep {
    api: Rc<dyn Transport>,
}

impl LoginStep {
    pub fn new(api: Rc<dyn Transport>) -> Self {
        Self { api }
    }
}

impl StepDefinition for LoginStep {
    fn id(&self) -> &str {
        "login"
    }

    fn name(&self) -> &str {
        "Login and Get Token"
    }

    fn severity(&self) -> StepSeverity {
        StepSeverity::Fatal
    }

    fn run(&self, ctx: &mut TestContext) -> StepRunResult {
        let body = match serde_json::to_value(LoginRequest::for_context(ctx)) {
            Ok(b) => b,
            Err(e) => return StepRunResult::fail(format!("could not encode login: {e}"), None),
        };
        print_request(&Method::POST, LOGIN_PATH, Some(&body));
        let response = self.api.send(Method::POST, LOGIN_PATH, Some(&body), &[]);
        print_response(LOGIN_PATH, &response);

        if !succeeded(&response) {
            return StepRunResult::fail(format!("Login failed (status {}): {}",
                                               response.status,
                                               failure_message(&response.payload)),
                                       Some(response.payload));
        }

        // el token viaja en el cuerpo o, si no, en la cookie de sesión
        let token = str_at(&response.payload, &["token"]).or_else(|| {
                                                             response.cookie(TOKEN_COOKIE)
                                                                     .filter(|t| !t.is_empty())
                                                                     .map(str::to_string)
                                                         });
        let agency_id = id_at(&response.payload, &["agency"]);

        match (token, agency_id) {
            (Some(token), Some(agency_id)) => {
                let observed = json!({ "agency_id": agency_id, "token_present": true });
                ctx.record_login(token, agency_id.clone());
                StepRunResult::pass(format!("Login successful. Token obtained for agency {agency_id}"), Some(observed))
            }
            (None, _) => StepRunResult::fail("Login succeeded but no bearer token was returned", Some(response.payload)),
            (Some(_), None) => StepRunResult::fail("Login succeeded but no agency identifier was returned",
                                                   Some(response.payload)),
        }
    }
}
