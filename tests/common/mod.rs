#![allow(dead_code)]

//! Servicio falso con estado en `127.0.0.1:0` para las pruebas del harness.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Header, Response, Server};

/// Comportamiento configurable del servicio falso.
#[derive(Clone, Copy)]
pub struct Behaviour {
    pub register_status: u16,
    pub default_locations: u64,
    pub link_vehicle_location: bool,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self { register_status: 201, default_locations: 2, link_vehicle_location: true }
    }
}

pub struct FakeService {
    pub base_url: String,
    server: Arc<Server>,
    seen: Arc<Mutex<Vec<String>>>,
    handle: thread::JoinHandle<()>,
}

impl FakeService {
    pub fn start(behaviour: Behaviour) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (srv, log) = (server.clone(), seen.clone());
        let handle = thread::spawn(move || {
            let mut vehicles = 0u64;
            for mut request in srv.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let authorized = request.headers()
                                        .iter()
                                        .any(|h| h.field.equiv("Authorization") && h.value.as_str() == "Bearer jwt-1");
                let line = format!("{} {}", request.method(), request.url());
                log.lock().unwrap().push(line.clone());

                let (status, payload): (u16, Value) = match line.as_str() {
                    "POST /auth/register" if behaviour.register_status == 201 => {
                        (201, json!({"success": true, "message": "Agency Added and admin created"}))
                    }
                    "POST /auth/register" => (behaviour.register_status,
                                              json!({"success": false, "message": "Agency with same email or sapcode already exists"})),
                    "POST /auth/login" => {
                        let creds: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                        if creds["password"] == "Test@123456" {
                            (200, json!({"success": true, "token": "jwt-1", "agency": {"_id": "agency-1", "status": "active"}}))
                        } else {
                            (401, json!({"success": false, "message": "Invalid credentials"}))
                        }
                    }
                    _ if !authorized => (401, json!({"success": false, "message": "Unauthorized"})),
                    "POST /inventory/vehicle" => {
                        vehicles += 1;
                        let mut vehicle = json!({"_id": "veh-1", "registrationNumber": "KL-07-AB-2025"});
                        if behaviour.link_vehicle_location {
                            vehicle["stockLocationId"] = json!("loc-vehicle-1");
                        }
                        (201, json!({"success": true, "message": "Vehicle added successfully", "vehicle": vehicle}))
                    }
                    "GET /inventory/stock-locations?type=VEHICLE" => {
                        let n = if behaviour.link_vehicle_location { vehicles } else { 0 };
                        (200, json!({"success": true, "data": [], "pagination": {"page": 1, "limit": 20, "total": n}}))
                    }
                    "GET /inventory/stock-locations" => {
                        let n = behaviour.default_locations + if behaviour.link_vehicle_location { vehicles } else { 0 };
                        (200, json!({"success": true, "data": [], "pagination": {"page": 1, "limit": 20, "total": n}}))
                    }
                    _ => (404, json!({"success": false, "message": "Not found"})),
                };
                let response = Response::from_string(payload.to_string())
                    .with_status_code(status)
                    .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
                let _ = request.respond(response);
            }
        });
        Self { base_url: format!("http://{addr}"), server, seen, handle }
    }

    pub fn stop(self) -> Vec<String> {
        self.server.unblock();
        let _ = self.handle.join();
        let seen = self.seen.lock().unwrap().clone();
        seen
    }
}
