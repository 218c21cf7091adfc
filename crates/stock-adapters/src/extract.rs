//! Lectura de campos por ruta en respuestas JSON.
//!
//! Un campo ausente o de otro tipo se lee como su valor cero (0, `false`,
//! `None`): la aserción degrada a un FAIL limpio, nunca a un pánico.

use serde_json::Value;

pub fn value_at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(payload, |v, key| v.get(*key))
}

/// Entero no negativo en `path`; 0 si falta.
pub fn u64_at(payload: &Value, path: &[&str]) -> u64 {
    value_at(payload, path).and_then(Value::as_u64).unwrap_or(0)
}

pub fn bool_at(payload: &Value, path: &[&str]) -> bool {
    value_at(payload, path).and_then(Value::as_bool).unwrap_or(false)
}

/// Cadena no vacía en `path`.
pub fn str_at(payload: &Value, path: &[&str]) -> Option<String> {
    value_at(payload, path).and_then(Value::as_str)
                           .filter(|s| !s.is_empty())
                           .map(str::to_string)
}

/// Identificador en `path`: cadena, o documento poblado con `_id`.
pub fn id_at(payload: &Value, path: &[&str]) -> Option<String> {
    let v = value_at(payload, path)?;
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => str_at(v, &["_id"]),
        _ => None,
    }
}

/// Mensaje legible de una respuesta fallida.
pub fn failure_message(payload: &Value) -> String {
    str_at(payload, &["message"]).or_else(|| str_at(payload, &["error"]))
                                 .unwrap_or_else(|| "no message".to_string())
}
