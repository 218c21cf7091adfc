//! Configuración del harness.
//! Compone la configuración del cliente (URL, timeout), la del agente de
//! aprobación y las expectativas del recorrido. Todo viene del entorno (.env
//! incluido) y es opcional; un valor inválido detiene el harness antes de
//! ejecutar ningún step.

use stock_adapters::{JourneySettings, LocationBaseline};
use stock_client::config::{env_var, parse_opt};
use stock_client::{ApprovalConfig, ClientConfig, ConfigError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    pub client: ClientConfig,
    pub approval: ApprovalConfig,
    pub journey: JourneySettings,
    /// Con `strict`, un fallo no fatal también termina con estado 1.
    pub strict: bool,
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client = ClientConfig::from_lookup(lookup)?;
        let approval = ApprovalConfig::from_lookup(lookup)?;

        let mut journey = JourneySettings::default();
        if let Some(n) = parse_opt::<u64>(lookup, "STOCKFLOW_EXPECTED_DEFAULT_LOCATIONS")? {
            // el total esperado es defaults + 1
            if n.checked_add(1).is_none() {
                return Err(ConfigError::new("STOCKFLOW_EXPECTED_DEFAULT_LOCATIONS", n.to_string(), "value too large"));
            }
            journey.expected_default_locations = n;
        }
        if let Some(n) = parse_opt::<u64>(lookup, "STOCKFLOW_EXPECTED_VEHICLE_LOCATIONS")? {
            journey.expected_vehicle_locations = n;
        }
        if let Some(b) = parse_opt::<LocationBaseline>(lookup, "STOCKFLOW_LOCATION_BASELINE")? {
            journey.baseline = b;
        }
        if let Some(reg) = lookup("STOCKFLOW_REGISTRATION_NUMBER") {
            journey.vehicle.registration_number = reg;
        }

        let strict = match lookup("STOCKFLOW_STRICT") {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::new("STOCKFLOW_STRICT", raw.clone(), "expected true or false"))?,
        };

        Ok(Self { client, approval, journey, strict })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
