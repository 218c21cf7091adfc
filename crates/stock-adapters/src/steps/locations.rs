//! VerifyLocationCountStep: compara `pagination.total` del listado de
//! ubicaciones con una expectativa exacta.
//!
//! El mismo step cubre los tres invariantes del recorrido: ubicaciones por
//! defecto, ubicación de tipo VEHICLE y total tras crear el vehículo.

use std::rc::Rc;

use serde_json::json;
use stock_client::{bearer_headers, Method, Transport};
use stock_core::{LocationCountExpectation, StepDefinition, StepRunResult, StepSeverity, TestContext};

use crate::extract::u64_at;
use crate::payloads::STOCK_LOCATIONS_PATH;

use super::{print_request, print_response};

pub struct VerifyLocationCountStep {
    id: String,
    name: String,
    api: Rc<dyn Transport>,
    expectation: LocationCountExpectation,
    requires_vehicle: bool,
    records_baseline: bool,
    /// Si está presente, lo esperado es `baseline observado + delta` en vez
    /// del literal de la expectativa.
    baseline_delta: Option<u64>,
}

impl VerifyLocationCountStep {
    pub fn new(id: impl Into<String>,
               name: impl Into<String>,
               api: Rc<dyn Transport>,
               expectation: LocationCountExpectation)
               -> Self {
        Self { id: id.into(),
               name: name.into(),
               api,
               expectation,
               requires_vehicle: false,
               records_baseline: false,
               baseline_delta: None }
    }

    /// Sólo verificable si la creación del vehículo dejó su ubicación.
    pub fn requiring_vehicle(mut self) -> Self {
        self.requires_vehicle = true;
        self
    }

    /// Guarda el total observado como baseline en el contexto.
    pub fn recording_baseline(mut self) -> Self {
        self.records_baseline = true;
        self
    }

    pub fn relative_to_baseline(mut self, delta: u64) -> Self {
        self.baseline_delta = Some(delta);
        self
    }

    fn expected(&self, ctx: &TestContext) -> Result<u64, String> {
        match self.baseline_delta {
            None => Ok(self.expectation.expected),
            Some(delta) => {
                let baseline = ctx.baseline_locations()
                                  .ok_or_else(|| "no baseline location total was observed".to_string())?;
                baseline.checked_add(delta)
                        .ok_or_else(|| format!("baseline location total {baseline} cannot be extended by {delta}"))
            }
        }
    }
}

impl StepDefinition for VerifyLocationCountStep {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn severity(&self) -> StepSeverity {
        StepSeverity::Soft
    }

    fn run(&self, ctx: &mut TestContext) -> StepRunResult {
        let Some(token) = ctx.auth_token().map(str::to_string) else {
            return StepRunResult::not_verifiable("no bearer token in context");
        };
        if self.requires_vehicle && !ctx.has_vehicle_location() {
            return StepRunResult::not_verifiable("vehicle creation produced no stock location identifier");
        }
        let expected = match self.expected(ctx) {
            Ok(n) => n,
            Err(reason) => return StepRunResult::not_verifiable(reason),
        };

        let path = format!("{STOCK_LOCATIONS_PATH}{}", self.expectation.filter.query_suffix());
        print_request(&Method::GET, &path, None);
        let response = self.api.send(Method::GET, &path, None, &bearer_headers(&token));
        print_response(&path, &response);

        let total = u64_at(&response.payload, &["pagination", "total"]);
        if self.records_baseline && response.is_success() {
            ctx.record_baseline(total);
        }
        let observed = json!({ "expectation": self.expectation.name, "expected": expected, "total": total });
        let what = self.expectation.filter.describe();
        let effective = LocationCountExpectation { expected, ..self.expectation.clone() };
        if effective.holds_for(total) {
            StepRunResult::pass(format!("{what}: total = {total} as expected"), Some(observed))
        } else {
            StepRunResult::fail(format!("{what}: expected {expected}, got {total} (status {})", response.status),
                                Some(observed))
        }
    }
}
