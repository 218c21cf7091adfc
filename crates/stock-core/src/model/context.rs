//! Contexto mutable de una ejecución.
//!
//! Lo crea el driver una vez por ejecución y el secuenciador lo presta
//! (`&mut`) a cada step. Cada campo opcional sólo lo escribe el step que lo
//! produce: el token y la agencia el login, los ids del vehículo su creación.
use chrono::Utc;
use serde::Serialize;

use crate::constants::{EMAIL_DOMAIN, EMAIL_PREFIX, HARNESS_PASSWORD, IDENTIFIER_PREFIX, SAPCODE_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestContext {
    sapcode: String,
    email: String,
    password: String,
    auth_token: Option<String>,
    agency_id: Option<String>,
    vehicle_id: Option<String>,
    stock_location_id: Option<String>,
    baseline_locations: Option<u64>,
}

impl TestContext {
    /// Construye el contexto a partir de un sello temporal dado.
    pub fn from_stamp(stamp: i64) -> Self {
        Self { sapcode: format!("{SAPCODE_PREFIX}{stamp}"),
               email: format!("{EMAIL_PREFIX}{stamp}@{EMAIL_DOMAIN}"),
               password: HARNESS_PASSWORD.to_string(),
               auth_token: None,
               agency_id: None,
               vehicle_id: None,
               stock_location_id: None,
               baseline_locations: None }
    }

    /// Contexto nuevo con sello en milisegundos del reloj actual, de modo que
    /// dos ejecuciones consecutivas no compartan sapcode ni email.
    pub fn generate() -> Self {
        Self::from_stamp(Utc::now().timestamp_millis())
    }

    pub fn sapcode(&self) -> &str {
        &self.sapcode
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Identificador de login del usuario administrador.
    pub fn identifier(&self) -> String {
        format!("{IDENTIFIER_PREFIX}{}", self.sapcode)
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn agency_id(&self) -> Option<&str> {
        self.agency_id.as_deref()
    }

    pub fn vehicle_id(&self) -> Option<&str> {
        self.vehicle_id.as_deref()
    }

    pub fn stock_location_id(&self) -> Option<&str> {
        self.stock_location_id.as_deref()
    }

    /// Total de ubicaciones observado antes de crear el vehículo.
    pub fn baseline_locations(&self) -> Option<u64> {
        self.baseline_locations
    }

    /// `true` si la creación del vehículo dejó una ubicación enlazada.
    pub fn has_vehicle_location(&self) -> bool {
        self.stock_location_id.is_some()
    }

    pub fn record_login(&mut self, token: String, agency_id: String) {
        self.auth_token = Some(token);
        self.agency_id = Some(agency_id);
    }

    pub fn record_vehicle(&mut self, vehicle_id: Option<String>, stock_location_id: String) {
        self.vehicle_id = vehicle_id;
        self.stock_location_id = Some(stock_location_id);
    }

    pub fn record_baseline(&mut self, total: u64) {
        self.baseline_locations = Some(total);
    }
}
