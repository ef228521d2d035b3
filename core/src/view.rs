//! View model handed to hosts for rendering.
//!
//! Hosts never read controller internals; they render a [`PageView`] and send
//! form values back through `Event::Submit`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::controller::ActionKind;
use crate::toast::Toast;
use crate::types::{Articulo, ArticuloDraft, ArticuloId};

pub const TITLE_CREATE: &str = "Agregar Nuevo Artículo";
pub const TITLE_EDIT: &str = "Editar Artículo";
pub const EMPTY_LIST_MESSAGE: &str = "No hay artículos registrados";

const FALLBACK_NAME: &str = "Sin nombre";
const FALLBACK_DESCRIPTION: &str = "Sin descripción";
const FALLBACK_CATEGORY: &str = "No especificada";

/// Snapshot of everything a host needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub loading: bool,
    pub list: ListView,
    pub form: FormView,
    /// Id awaiting delete confirmation; `Some` means the prompt is open.
    pub delete_prompt: Option<ArticuloId>,
    pub toasts: Vec<Toast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListView {
    /// Cleared while a load is in progress.
    #[default]
    Blank,
    /// The collection came back empty.
    Empty,
    /// Inline error panel replacing the list.
    Error(String),
    Cards(Vec<ArticuloCard>),
}

impl ListView {
    pub fn cards(&self) -> &[ArticuloCard] {
        match self {
            ListView::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// One rendered articulo with display fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticuloCard {
    pub id: ArticuloId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub stock: String,
    pub actions: Vec<CardAction>,
}

impl ArticuloCard {
    pub fn from_articulo(articulo: &Articulo) -> Self {
        let id = articulo.idarticulo;
        Self {
            id,
            title: non_blank(&articulo.nombre).unwrap_or(FALLBACK_NAME).to_string(),
            description: non_blank(&articulo.descripcion)
                .unwrap_or(FALLBACK_DESCRIPTION)
                .to_string(),
            category: non_zero(&articulo.idcategoria)
                .unwrap_or(FALLBACK_CATEGORY)
                .to_string(),
            stock: articulo.stock.as_deref().unwrap_or("0").to_string(),
            actions: ActionKind::ALL
                .iter()
                .map(|&kind| CardAction { kind, id })
                .collect(),
        }
    }
}

/// A per-card control, tagged with the id it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardAction {
    pub kind: ActionKind,
    pub id: ArticuloId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub cancel_visible: bool,
    pub fields: FormFields,
}

/// Raw text of the five form inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    pub idarticulo: String,
    pub idcategoria: String,
    pub nombre: String,
    pub descripcion: String,
    pub stock: String,
}

impl FormFields {
    /// Populate from a fetched record. Absent values (and a zero stock or
    /// category) become empty strings.
    pub fn from_articulo(articulo: &Articulo) -> Self {
        Self {
            idarticulo: articulo.idarticulo.to_string(),
            idcategoria: non_zero(&articulo.idcategoria)
                .unwrap_or_default()
                .to_string(),
            nombre: articulo.nombre.clone().unwrap_or_default(),
            descripcion: articulo.descripcion.clone().unwrap_or_default(),
            stock: non_zero(&articulo.stock).unwrap_or_default().to_string(),
        }
    }

    /// The hidden `idarticulo` input is not part of the payload.
    pub fn to_draft(&self) -> ArticuloDraft {
        ArticuloDraft {
            idcategoria: self.idcategoria.clone(),
            nombre: self.nombre.clone(),
            descripcion: self.descripcion.clone(),
            stock: self.stock.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::IdArticulo => &self.idarticulo,
            FormField::IdCategoria => &self.idcategoria,
            FormField::Nombre => &self.nombre,
            FormField::Descripcion => &self.descripcion,
            FormField::Stock => &self.stock,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::IdArticulo => &mut self.idarticulo,
            FormField::IdCategoria => &mut self.idcategoria,
            FormField::Nombre => &mut self.nombre,
            FormField::Descripcion => &mut self.descripcion,
            FormField::Stock => &mut self.stock,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    IdArticulo,
    IdCategoria,
    Nombre,
    Descripcion,
    Stock,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::IdArticulo,
        FormField::IdCategoria,
        FormField::Nombre,
        FormField::Descripcion,
        FormField::Stock,
    ];

    /// Input name, as used by the page markup and the JSON payload.
    pub fn name(self) -> &'static str {
        match self {
            FormField::IdArticulo => "idarticulo",
            FormField::IdCategoria => "idcategoria",
            FormField::Nombre => "nombre",
            FormField::Descripcion => "descripcion",
            FormField::Stock => "stock",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Numeric text that reads as zero counts as unset; anything else is shown.
fn non_zero(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|s| s.parse::<f64>().map_or(true, |n| n != 0.0))
}
