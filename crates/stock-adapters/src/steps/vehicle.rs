//! CreateVehicleStep: registrar un vehículo debe materializar una ubicación
//! de stock enlazada (`vehicle.stockLocationId`).
//!
//! No es fatal, pero los dos invariantes siguientes dependen de los ids que
//! deja en el contexto y se reportan como no verificables si faltan.

use std::rc::Rc;

use serde_json::json;
use stock_client::{bearer_headers, Method, Transport};
use stock_core::{StepDefinition, StepRunResult, StepSeverity, TestContext};

use crate::extract::{failure_message, id_at};
use crate::payloads::{VehicleRequest, VEHICLE_PATH};

use super::{print_request, print_response, succeeded};

pub struct CreateVehicleStep {
    api: Rc<dyn Transport>,
    vehicle: VehicleRequest,
}

impl CreateVehicleStep {
    pub fn new(api: Rc<dyn Transport>, vehicle: VehicleRequest) -> Self {
        Self { api, vehicle }
    }
}

impl StepDefinition for CreateVehicleStep {
    fn id(&self) -> &str {
        "create_vehicle"
    }

    fn name(&self) -> &str {
        "Create Vehicle (Auto-Creates Location)"
    }

    fn severity(&self) -> StepSeverity {
        StepSeverity::Soft
    }

    fn run(&self, ctx: &mut TestContext) -> StepRunResult {
        let Some(token) = ctx.auth_token().map(str::to_string) else {
            return StepRunResult::not_verifiable("no bearer token in context");
        };
        let body = match serde_json::to_value(&self.vehicle) {
            Ok(b) => b,
            Err(e) => return StepRunResult::fail(format!("could not encode vehicle: {e}"), None),
        };
        print_request(&Method::POST, VEHICLE_PATH, Some(&body));
        let response = self.api.send(Method::POST, VEHICLE_PATH, Some(&body), &bearer_headers(&token));
        print_response(VEHICLE_PATH, &response);

        if !succeeded(&response) {
            return StepRunResult::fail(format!("Vehicle creation failed (status {}): {}",
                                               response.status,
                                               failure_message(&response.payload)),
                                       Some(response.payload));
        }

        let vehicle_id = id_at(&response.payload, &["vehicle", "_id"]);
        match id_at(&response.payload, &["vehicle", "stockLocationId"]) {
            Some(stock_location_id) => {
                let observed = json!({ "vehicle_id": vehicle_id, "stock_location_id": stock_location_id });
                ctx.record_vehicle(vehicle_id, stock_location_id.clone());
                StepRunResult::pass(format!("Vehicle created with stockLocationId: {stock_location_id}"), Some(observed))
            }
            None => StepRunResult::fail("Vehicle created but stockLocationId not populated", Some(response.payload)),
        }
    }
}
