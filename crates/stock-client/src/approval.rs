//! Agente de aprobación fuera de banda.
//!
//! Una cuenta recién registrada queda pendiente de aprobación y el API
//! probado no expone esa acción. El agente la ejecuta directamente contra el
//! almacén (como haría una consola de operador). `approve` sólo informa si el
//! comando se despachó; que la mutación haya tenido efecto lo verifica el
//! login siguiente.

use std::io::Write;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::config::{ApprovalConfig, ApprovalMode};
use crate::error::TransportFailure;

/// Constancia de despacho. `exit_code` se registra pero no se interpreta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub agent: String,
    pub exit_code: Option<i32>,
    pub note: String,
}

pub trait ApprovalAgent {
    fn name(&self) -> &str;

    fn approve(&self, email: &str) -> Result<Dispatched, TransportFailure>;
}

/// Aprobación vía `mongosh`, alimentando el comando por stdin.
#[derive(Debug, Clone)]
pub struct MongoshApproval {
    program: String,
    uri: Option<String>,
    database: String,
}

impl MongoshApproval {
    pub fn new(program: impl Into<String>, database: impl Into<String>) -> Self {
        Self { program: program.into(), uri: None, database: database.into() }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Script que marca como aprobado el único usuario con ese email.
    pub fn command_for(&self, email: &str) -> String {
        format!("use {db}\ndb.users.updateOne(\n  {{ email: \"{email}\" }},\n  {{ $set: {{ approvalStatus: \"approved\" }} }}\n)\n",
                db = self.database,
                email = escape_js_string(email))
    }
}

impl ApprovalAgent for MongoshApproval {
    fn name(&self) -> &str {
        "mongosh"
    }

    fn approve(&self, email: &str) -> Result<Dispatched, TransportFailure> {
        let mut command = Command::new(&self.program);
        if let Some(uri) = &self.uri {
            command.arg(uri);
        }
        let mut child = command.stdin(Stdio::piped())
                               .stdout(Stdio::piped())
                               .stderr(Stdio::piped())
                               .spawn()
                               .map_err(|source| TransportFailure::Launch { program: self.program.clone(), source })?;

        let script = self.command_for(email);
        debug!("mongosh script:\n{script}");
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(script.as_bytes())
                 .map_err(|source| TransportFailure::Pipe { program: self.program.clone(), source })?;
        }
        let output = child.wait_with_output()
                          .map_err(|source| TransportFailure::Pipe { program: self.program.clone(), source })?;
        info!("approval for {email} dispatched via {} (exit {:?})", self.program, output.status.code());
        Ok(Dispatched { agent: self.name().to_string(),
                        exit_code: output.status.code(),
                        note: String::from_utf8_lossy(&output.stdout).trim().to_string() })
    }
}

/// Aprobación vía un programa externo que recibe el email como último
/// argumento (p. ej. `node approve_user.js <email>`).
#[derive(Debug, Clone)]
pub struct ScriptApproval {
    command: Vec<String>,
}

impl ScriptApproval {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl ApprovalAgent for ScriptApproval {
    fn name(&self) -> &str {
        "script"
    }

    fn approve(&self, email: &str) -> Result<Dispatched, TransportFailure> {
        let (program, args) = self.command
                                  .split_first()
                                  .ok_or_else(|| TransportFailure::NotConfigured(self.name().to_string()))?;
        let output = Command::new(program).args(args)
                                          .arg(email)
                                          .stdin(Stdio::null())
                                          .output()
                                          .map_err(|source| TransportFailure::Launch { program: program.clone(), source })?;
        info!("approval for {email} dispatched via {program} (exit {:?})", output.status.code());
        Ok(Dispatched { agent: self.name().to_string(),
                        exit_code: output.status.code(),
                        note: String::from_utf8_lossy(&output.stdout).trim().to_string() })
    }
}

/// Para entornos que aprueban solos: no despacha nada.
#[derive(Debug, Clone, Default)]
pub struct SkipApproval;

impl ApprovalAgent for SkipApproval {
    fn name(&self) -> &str {
        "skip"
    }

    fn approve(&self, email: &str) -> Result<Dispatched, TransportFailure> {
        info!("approval for {email} skipped by configuration");
        Ok(Dispatched { agent: self.name().to_string(),
                        exit_code: None,
                        note: "approval skipped by configuration".to_string() })
    }
}

/// Construye el agente según configuración.
pub fn build_agent(config: &ApprovalConfig) -> Box<dyn ApprovalAgent> {
    match config.mode {
        ApprovalMode::Mongosh => {
            let agent = MongoshApproval::new(config.mongosh_bin.clone(), config.mongo_db.clone());
            match &config.mongo_uri {
                Some(uri) => Box::new(agent.with_uri(uri.clone())),
                None => Box::new(agent),
            }
        }
        ApprovalMode::Script => Box::new(ScriptApproval::new(config.script.clone())),
        ApprovalMode::Skip => Box::new(SkipApproval),
    }
}

fn escape_js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
