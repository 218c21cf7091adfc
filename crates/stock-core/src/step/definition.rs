use crate::model::TestContext;

use super::run_result::StepRunResult;

/// Qué hace el secuenciador cuando el step no pasa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSeverity {
    /// El fallo invalida las precondiciones de todos los steps siguientes.
    Fatal,
    /// Acción lateral cuyo éxito no es verificable desde aquí; el fallo se
    /// registra y la ejecución sigue.
    Advisory,
    /// Invariante que se reporta y no detiene la ejecución.
    Soft,
}

/// Trait que define un Step del recorrido.
pub trait StepDefinition {
    /// Identificador estable y único dentro de la ejecución.
    fn id(&self) -> &str;

    /// Nombre amigable, usado en el banner y en el resumen.
    fn name(&self) -> &str { self.id() }

    fn severity(&self) -> StepSeverity;

    /// Ejecuta el step. No debe entrar en pánico ante respuestas inesperadas:
    /// cualquier anomalía se clasifica como `Failed` o `NotVerifiable`.
    fn run(&self, ctx: &mut TestContext) -> StepRunResult;
}
