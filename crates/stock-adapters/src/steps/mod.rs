//! Steps del recorrido, en el orden en que los ejecuta el secuenciador:
//! registro (fatal), aprobación (informativa), login (fatal), y luego los
//! invariantes de ubicaciones y la creación del vehículo (no fatales).

pub mod approve;
pub mod locations;
pub mod login;
pub mod register;
pub mod vehicle;

pub use approve::ApproveStep;
pub use locations::VerifyLocationCountStep;
pub use login::LoginStep;
pub use register::RegisterStep;
pub use vehicle::CreateVehicleStep;

use log::debug;
use serde_json::Value;
use stock_client::{ApiResponse, Method};

/// Línea de petición y cuerpo (si lo hay) tal como se imprimen en consola.
pub(crate) fn format_request(method: &Method, path: &str, body: Option<&Value>) -> String {
    match body {
        Some(body) => {
            let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            format!("{method} {path}\n{pretty}")
        }
        None => format!("{method} {path}"),
    }
}

pub(crate) fn print_request(method: &Method, path: &str, body: Option<&Value>) {
    println!("{}", format_request(method, path, body));
}

/// Imprime el payload crudo antes de evaluarlo, para que una ejecución
/// fallida se pueda diagnosticar sólo con la salida de consola.
pub(crate) fn print_response(path: &str, response: &ApiResponse) {
    debug!("{path} -> HTTP {}", response.status);
    let pretty = serde_json::to_string_pretty(&response.payload).unwrap_or_else(|_| response.payload.to_string());
    println!("HTTP {}\n{}", response.status, pretty);
}

/// Una respuesta cuenta como éxito con status 2xx y `success: true`.
pub(crate) fn succeeded(response: &ApiResponse) -> bool {
    response.is_success() && crate::extract::bool_at(&response.payload, &["success"])
}
