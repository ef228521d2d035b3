//! Plain-text rendering of the page view model.

use std::fmt::{self, Write};

use articulos_core::{FormField, FormFields, ListView, PageView, EMPTY_LIST_MESSAGE};

/// Draw the whole page. `form` is what the user has typed so far, which may
/// be ahead of the controller's copy. With `form_first` the form section is
/// drawn above the list.
pub fn page(view: &PageView, form: &FormFields, form_first: bool) -> String {
    Page {
        view,
        form,
        form_first,
    }
    .to_string()
}

struct Page<'a> {
    view: &'a PageView,
    form: &'a FormFields,
    form_first: bool,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for toast in &self.view.toasts {
            writeln!(f, "[{}] {}", toast.severity.as_str(), toast.message)?;
        }
        if self.form_first {
            form_section(f, self.view, self.form)?;
            list_section(f, self.view)?;
        } else {
            list_section(f, self.view)?;
            form_section(f, self.view, self.form)?;
        }
        if let Some(id) = self.view.delete_prompt {
            writeln!(
                f,
                "?? ¿Eliminar el artículo #{id}? Esta acción no se puede deshacer. (confirm / dismiss)"
            )?;
        }
        Ok(())
    }
}

fn list_section(out: &mut impl Write, view: &PageView) -> fmt::Result {
    writeln!(out, "== Artículos ==")?;
    if view.loading {
        writeln!(out, "(cargando...)")?;
    }
    match &view.list {
        ListView::Blank => {}
        ListView::Empty => writeln!(out, "{EMPTY_LIST_MESSAGE}")?,
        ListView::Error(message) => writeln!(out, "Error: {message}")?,
        ListView::Cards(cards) => {
            for card in cards {
                writeln!(out, "[#{}] {}", card.id, card.title)?;
                writeln!(out, "    {}", card.description)?;
                writeln!(
                    out,
                    "    Categoría: {} | Stock: {}",
                    card.category, card.stock
                )?;
                let actions: Vec<String> = card
                    .actions
                    .iter()
                    .map(|action| format!("{} {}", action.kind, action.id))
                    .collect();
                writeln!(out, "    {}", actions.join(" | "))?;
            }
        }
    }
    Ok(())
}

fn form_section(out: &mut impl Write, view: &PageView, form: &FormFields) -> fmt::Result {
    writeln!(out, "-- {} --", view.form.title)?;
    for field in FormField::ALL {
        writeln!(out, "  {:<12} {}", field.name(), form.get(field))?;
    }
    if view.form.cancel_visible {
        writeln!(out, "  (cancel para salir de la edición)")?;
    }
    Ok(())
}
