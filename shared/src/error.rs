//! Field-scoped validation errors
//!
//! Validation collects every violation before reporting, so a caller can
//! show all of them at once. Each error names the offending field.

use serde::{Deserialize, Serialize};

/// A single validation failure, scoped to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Wire name of the field that failed (e.g. `"fechaFin"`)
    pub campo: String,
    /// Human-readable message
    pub mensaje: String,
}

impl FieldError {
    pub fn new(campo: impl Into<String>, mensaje: impl Into<String>) -> Self {
        Self {
            campo: campo.into(),
            mensaje: mensaje.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.campo, self.mensaje)
    }
}
