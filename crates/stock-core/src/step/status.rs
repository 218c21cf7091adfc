/// Estado de un Step en tiempo de ejecución.
///
/// Las transiciones válidas son:
/// - `Pending` -> `Running`
/// - `Running` -> `Passed` | `Failed` | `NotVerifiable`
///
/// No se permiten reversiones: un step no se reintenta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// El paso está pendiente de ejecución.
    Pending,
    /// El paso está en ejecución.
    Running,
    /// El paso pasó.
    Passed,
    /// El paso falló.
    Failed,
    /// El paso no pudo evaluarse.
    NotVerifiable,
}
