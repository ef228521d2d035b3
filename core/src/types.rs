//! Domain DTOs for the articulos API.
//!
//! # Design
//! These types are defined independently from the mock-server's own schema;
//! the integration tests catch drift between the two. The client posts form
//! values verbatim as strings, so backends are free to echo numeric fields
//! either as numbers or as numeric strings. `Articulo` keeps those fields as
//! display text: one odd value (`"10.50"`, `2.5`) must not sink the whole list.

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned identifier of an articulo.
pub type ArticuloId = i64;

/// A single articulo as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Articulo {
    pub idarticulo: ArticuloId,
    #[serde(default, deserialize_with = "numeric_text")]
    pub idcategoria: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "numeric_text")]
    pub stock: Option<String>,
}

/// Request payload for both create and update.
///
/// Every field is the raw text of the matching form input. Nothing is
/// validated or trimmed; empty strings go over the wire unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticuloDraft {
    pub idcategoria: String,
    pub nombre: String,
    pub descripcion: String,
    pub stock: String,
}

/// Accepts a JSON number or a string and keeps it as text. Strings are
/// trimmed; blank and `null` decode to `None`.
fn numeric_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Int(n)) => Some(n.to_string()),
        Some(Raw::Float(f)) => Some(f.to_string()),
        Some(Raw::Text(text)) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    })
}
