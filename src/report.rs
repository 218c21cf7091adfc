//! Salida de consola del harness: cabecera, tabla de resultados y banner
//! final. Va a stdout; los logs van a stderr.

use std::fmt::Write as _;

use stock_core::{StepResult, TestContext};

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn header(ctx: &TestContext, base_url: &str) -> String {
    format!("{rule}\nLocation-Aware Stock System - Test Suite\n{rule}\nTarget:  {base_url}\nSapcode: {}\nEmail:   {}",
            ctx.sapcode(),
            ctx.email(),
            rule = rule())
}

/// Tabla con un renglón por step ejecutado.
pub fn summary_table(results: &[StepResult]) -> String {
    let id_width = results.iter().map(|r| r.step_id.len()).max().unwrap_or(0).max("STEP".len());
    let mut out = String::new();
    let _ = writeln!(out, "{:<id_width$}  {:<14}  DETAIL", "STEP", "VERDICT");
    for r in results {
        let marker = if r.fatal { " (fatal)" } else { "" };
        let _ = writeln!(out, "{:<id_width$}  {:<14}  {}{}", r.step_id, r.verdict.label(), r.detail, marker);
    }
    out
}

/// Banner final: éxito total, ejecución completa con fallos, o aborto.
pub fn final_banner(results: &[StepResult], aborted_at: Option<&str>) -> String {
    let headline = match aborted_at {
        Some(step) => format!("RUN ABORTED at step '{step}'"),
        None if results.iter().all(|r| r.passed) => "ALL CORE TESTS PASSED!".to_string(),
        None => {
            let failing = results.iter().filter(|r| !r.passed).count();
            format!("RUN COMPLETED WITH {failing} NON-PASSING STEP(S)")
        }
    };
    format!("\n{rule}\n{headline}\n{rule}", rule = rule())
}
