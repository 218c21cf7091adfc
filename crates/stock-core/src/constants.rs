//! Constantes del harness.
//!
//! Los prefijos forman los identificadores derivados del tiempo de cada
//! ejecución; cambiarlos cambia el formato que ve el servicio.

/// Password fija de la cuenta creada en cada ejecución.
pub const HARNESS_PASSWORD: &str = "Test@123456";

pub const SAPCODE_PREFIX: &str = "TEST_";
pub const EMAIL_PREFIX: &str = "testlpg_";
pub const EMAIL_DOMAIN: &str = "example.com";

/// El servicio crea el usuario administrador como `admin_<sapcode>`.
pub const IDENTIFIER_PREFIX: &str = "admin_";

/// Tipo de ubicación creada automáticamente al registrar un vehículo.
pub const VEHICLE_LOCATION_TYPE: &str = "VEHICLE";
