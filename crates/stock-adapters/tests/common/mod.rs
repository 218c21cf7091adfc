#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::{json, Value};
use stock_client::{ApiResponse, ApprovalAgent, Dispatched, Method, Transport, TransportFailure};

/// Llamada registrada por el transporte guionizado.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Call {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// Transporte que responde en orden con respuestas preparadas. Si se agotan,
/// devuelve un error de transporte.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<ApiResponse>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResponse>) -> Rc<Self> {
        Rc::new(Self { responses: RefCell::new(responses.into()), calls: RefCell::new(Vec::new()) })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, method: Method, path: &str, body: Option<&Value>, headers: &[(String, String)]) -> ApiResponse {
        self.calls.borrow_mut().push(Call { method,
                                            path: path.to_string(),
                                            body: body.cloned(),
                                            headers: headers.to_vec() });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::transport_error("no scripted response left"))
    }
}

pub fn locations(total: u64) -> ApiResponse {
    ApiResponse::new(json!({ "success": true, "data": [], "pagination": { "page": 1, "limit": 20, "total": total } }), 200)
}

pub fn login_ok(token: &str, agency: &str) -> ApiResponse {
    ApiResponse::new(json!({ "success": true, "message": "Login successful", "token": token, "agency": { "_id": agency } }),
                     200)
}

pub fn vehicle_ok(vehicle_id: &str, stock_location_id: &str) -> ApiResponse {
    ApiResponse::new(json!({
                         "success": true,
                         "message": "Vehicle added successfully",
                         "vehicle": { "_id": vehicle_id, "stockLocationId": stock_location_id, "registrationNumber": "KL-07-AB-2025" }
                     }),
                     201)
}

/// Agente que recuerda los emails aprobados y puede simular un fallo.
pub struct RecordingAgent {
    pub fail: bool,
    pub seen: Rc<RefCell<Vec<String>>>,
}

impl RecordingAgent {
    pub fn new(fail: bool) -> (Self, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        (Self { fail, seen: seen.clone() }, seen)
    }
}

impl ApprovalAgent for RecordingAgent {
    fn name(&self) -> &str {
        "recording"
    }

    fn approve(&self, email: &str) -> Result<Dispatched, TransportFailure> {
        self.seen.borrow_mut().push(email.to_string());
        if self.fail {
            return Err(TransportFailure::Launch { program: "recording".into(),
                                                  source: std::io::Error::from(std::io::ErrorKind::NotFound) });
        }
        Ok(Dispatched { agent: "recording".into(), exit_code: Some(0), note: String::new() })
    }
}
