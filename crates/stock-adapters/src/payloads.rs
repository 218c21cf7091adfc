//! Cuerpos de petición del API.

use serde::{Deserialize, Serialize};
use stock_core::TestContext;

pub const AGENCY_NAME: &str = "TestLPG Agency";
pub const AFFILIATION_COMPANY: &str = "IOCL";

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const STOCK_LOCATIONS_PATH: &str = "/inventory/stock-locations";
pub const VEHICLE_PATH: &str = "/inventory/vehicle";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub gas_agency_name: String,
    pub sapcode: String,
    pub email: String,
    pub password: String,
    pub company: String,
}

impl RegisterRequest {
    pub fn for_context(ctx: &TestContext) -> Self {
        Self { gas_agency_name: AGENCY_NAME.to_string(),
               sapcode: ctx.sapcode().to_string(),
               email: ctx.email().to_string(),
               password: ctx.password().to_string(),
               company: AFFILIATION_COMPANY.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

impl LoginRequest {
    pub fn for_context(ctx: &TestContext) -> Self {
        Self { identifier: ctx.identifier(), password: ctx.password().to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub registration_number: String,
    pub vehicle_type: String,
    pub vehicle_name: String,
    pub make: String,
    pub model: String,
}

impl Default for VehicleRequest {
    fn default() -> Self {
        Self { registration_number: "KL-07-AB-2025".to_string(),
               vehicle_type: "TEMPO".to_string(),
               vehicle_name: "Delivery Tempo".to_string(),
               make: "Tata".to_string(),
               model: "ACE".to_string() }
    }
}
