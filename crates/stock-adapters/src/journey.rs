//! Ensamblado del recorrido completo.
//!
//! El orden es fijo y refleja un recorrido real de usuario: cada step
//! depende del efecto en el servidor del anterior.

use std::rc::Rc;

use stock_client::{ApprovalAgent, Transport};
use stock_core::model::expectation::{DEFAULT_LOCATIONS, VEHICLE_LOCATIONS};
use stock_core::{LocationCountExpectation, StepDefinition};

use crate::payloads::VehicleRequest;
use crate::steps::{ApproveStep, CreateVehicleStep, LoginStep, RegisterStep, VerifyLocationCountStep};

/// De dónde sale el total esperado tras crear el vehículo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationBaseline {
    /// `defaults + 1`, con los literales configurados.
    Configured,
    /// `total observado antes del vehículo + 1`.
    Observed,
}

impl std::str::FromStr for LocationBaseline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "configured" => Ok(Self::Configured),
            "observed" => Ok(Self::Observed),
            _ => Err("expected configured or observed".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneySettings {
    pub expected_default_locations: u64,
    pub expected_vehicle_locations: u64,
    pub baseline: LocationBaseline,
    pub vehicle: VehicleRequest,
}

impl Default for JourneySettings {
    fn default() -> Self {
        Self { expected_default_locations: DEFAULT_LOCATIONS,
               expected_vehicle_locations: VEHICLE_LOCATIONS,
               baseline: LocationBaseline::Configured,
               vehicle: VehicleRequest::default() }
    }
}

impl JourneySettings {
    /// Las tres expectativas de conteo: defaults, tipo VEHICLE y total.
    pub fn expectations(&self) -> [LocationCountExpectation; 3] {
        // un vehículo registrado = una ubicación más
        [LocationCountExpectation::default_locations(self.expected_default_locations),
         LocationCountExpectation::vehicle_locations(self.expected_vehicle_locations),
         LocationCountExpectation::total_after_vehicle(self.expected_default_locations.saturating_add(1))]
    }
}

/// Los siete steps del recorrido, listos para el secuenciador.
pub fn core_journey(api: Rc<dyn Transport>,
                    agent: Box<dyn ApprovalAgent>,
                    settings: &JourneySettings)
                    -> Vec<Box<dyn StepDefinition>> {
    let [defaults, vehicle_locations, total] = settings.expectations();

    let verify_total = VerifyLocationCountStep::new("verify_total_locations", "Verify Total Locations", api.clone(), total)
        .requiring_vehicle();
    let verify_total = match settings.baseline {
        LocationBaseline::Configured => verify_total,
        LocationBaseline::Observed => verify_total.relative_to_baseline(1),
    };

    let steps: Vec<Box<dyn StepDefinition>> =
        vec![Box::new(RegisterStep::new(api.clone())),
             Box::new(ApproveStep::new(agent)),
             Box::new(LoginStep::new(api.clone())),
             Box::new(VerifyLocationCountStep::new("verify_default_locations",
                                                   "Verify Default Locations Created",
                                                   api.clone(),
                                                   defaults).recording_baseline()),
             Box::new(CreateVehicleStep::new(api.clone(), settings.vehicle.clone())),
             Box::new(VerifyLocationCountStep::new("verify_vehicle_location",
                                                   "Verify Vehicle Location Auto-Created",
                                                   api,
                                                   vehicle_locations).requiring_vehicle()),
             Box::new(verify_total)];
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_expectations_match_location_policy() {
        let [d, v, t] = JourneySettings::default().expectations();
        assert_eq!((d.expected, v.expected, t.expected), (2, 1, 3));
        assert_eq!(v.filter.query_suffix(), "?type=VEHICLE");
    }

    #[test]
    fn huge_default_count_does_not_overflow() {
        let settings = JourneySettings { expected_default_locations: u64::MAX, ..JourneySettings::default() };
        let [d, _, t] = settings.expectations();
        assert_eq!(d.expected, u64::MAX);
        assert_eq!(t.expected, u64::MAX);
    }

    #[test]
    fn baseline_mode_parses() {
        assert_eq!("Observed".parse::<LocationBaseline>(), Ok(LocationBaseline::Observed));
        assert!("guess".parse::<LocationBaseline>().is_err());
    }
}
