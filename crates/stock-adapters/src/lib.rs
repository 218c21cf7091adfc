//! stock-adapters: Steps del recorrido de usuario contra el servicio de stock.
//!
//! Este crate provee:
//! - `payloads`: cuerpos de petición del API (registro, login, vehículo).
//! - `extract`: lectura tolerante de campos JSON (ausente = valor cero).
//! - `steps`: los siete steps del recorrido, en el orden del secuenciador.
//! - `journey`: ensamblado del recorrido completo a partir de la configuración.
//!
//! Nota: el core sólo conoce `TestContext` y `StepDefinition`; aquí viven las
//! rutas, los campos y las expectativas concretas del servicio.

pub mod extract;
pub mod journey;
pub mod payloads;
pub mod steps;

pub use journey::{core_journey, JourneySettings, LocationBaseline};
