//! Expectativas de conteo de ubicaciones.
//!
//! Son hechos del dominio que el harness codifica, no valores que calcule:
//! deben mantenerse alineados con la política de ubicaciones por defecto del
//! servicio. Los valores por defecto son 2 ubicaciones tras el alta, 1 de
//! tipo VEHICLE y 3 en total tras crear un vehículo.
use serde::{Deserialize, Serialize};

use crate::constants::VEHICLE_LOCATION_TYPE;

pub const DEFAULT_LOCATIONS: u64 = 2;
pub const VEHICLE_LOCATIONS: u64 = 1;

/// Filtro aplicado al listado de ubicaciones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationFilter {
    All,
    ByType(String),
}

impl LocationFilter {
    /// Sufijo de query string para el listado (`""` o `?type=...`).
    pub fn query_suffix(&self) -> String {
        match self {
            LocationFilter::All => String::new(),
            LocationFilter::ByType(t) => format!("?type={t}"),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LocationFilter::All => "all locations".to_string(),
            LocationFilter::ByType(t) => format!("locations of type {t}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCountExpectation {
    pub name: String,
    pub filter: LocationFilter,
    pub expected: u64,
}

impl LocationCountExpectation {
    pub fn new(name: impl Into<String>, filter: LocationFilter, expected: u64) -> Self {
        Self { name: name.into(), filter, expected }
    }

    /// Ubicaciones creadas por defecto al aprovisionar la agencia.
    pub fn default_locations(expected: u64) -> Self {
        Self::new("default_locations", LocationFilter::All, expected)
    }

    /// Ubicaciones de tipo VEHICLE tras registrar un vehículo.
    pub fn vehicle_locations(expected: u64) -> Self {
        Self::new("vehicle_locations",
                  LocationFilter::ByType(VEHICLE_LOCATION_TYPE.to_string()),
                  expected)
    }

    /// Total de ubicaciones tras registrar un vehículo.
    pub fn total_after_vehicle(expected: u64) -> Self {
        Self::new("total_after_vehicle", LocationFilter::All, expected)
    }

    /// Comparación exacta: los invariantes del dominio son conteos exactos.
    pub fn holds_for(&self, observed: u64) -> bool {
        observed == self.expected
    }
}
