//! Stateful page controller for the articulos CRUD screen.
//!
//! # Design
//! `ArticuloController` owns all session state and reacts to [`Event`]s by
//! mutating itself and returning [`Effect`]s. It never performs I/O: every
//! HTTP call leaves as `Effect::Http` with a [`Ticket`], and the host feeds
//! the result back as `Event::Response` carrying the same ticket.
//!
//! Tickets increase monotonically. A list or edit-load response is applied
//! only if it answers the most recent request of its kind, so a slow stale
//! response can never overwrite a newer view. Mutations are not guarded:
//! overlapping submits or deletes are all sent.
//!
//! The edited id and the id awaiting delete confirmation are separate fields,
//! so opening the delete prompt never clobbers an edit in progress.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::ArticulosClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::toast::{Severity, Toasts};
use crate::types::{Articulo, ArticuloId};
use crate::view::{ArticuloCard, FormFields, FormView, ListView, PageView, TITLE_CREATE, TITLE_EDIT};

/// Sequence number attached to each issued request.
pub type Ticket = u64;

const MSG_SAVED: &str = "Artículo guardado correctamente";
const MSG_DELETED: &str = "Artículo eliminado correctamente";
const ERR_CREATE: &str = "Error al crear el artículo";
const ERR_UPDATE: &str = "Error al actualizar el artículo";
const ERR_LOAD: &str = "Error al cargar el artículo";
const ERR_DELETE: &str = "Error al eliminar el artículo";

/// What the host observed after executing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Response(HttpResponse),
    /// The request never produced a response.
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page is ready: load the collection.
    Init,
    Reload,
    /// Form submitted with the values currently in its inputs.
    Submit(FormFields),
    CancelEdit,
    /// Delegated click on a card control.
    Action { kind: ActionKind, id: ArticuloId },
    ConfirmDelete,
    DismissDelete,
    Response { ticket: Ticket, outcome: Outcome },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Http { ticket: Ticket, request: HttpRequest },
    ScrollToForm,
}

/// Card control kinds. Parsed from the control's data attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Edit,
    Delete,
}

pub type ActionHandler = fn(&mut ArticuloController, ArticuloId) -> Vec<Effect>;

impl ActionKind {
    pub const ALL: [ActionKind; 2] = [ActionKind::Edit, ActionKind::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Edit => "edit",
            ActionKind::Delete => "delete",
        }
    }

    /// Dispatch table for delegated card clicks.
    pub fn handler(self) -> ActionHandler {
        match self {
            ActionKind::Edit => ArticuloController::edit_articulo,
            ActionKind::Delete => ArticuloController::show_delete_modal,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card action {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveMode {
    Create,
    Update(ArticuloId),
}

impl SaveMode {
    fn failure(self) -> &'static str {
        match self {
            SaveMode::Create => ERR_CREATE,
            SaveMode::Update(_) => ERR_UPDATE,
        }
    }

    /// Edit state the form must still be in for a completed save to reset it.
    fn editing(self) -> Option<ArticuloId> {
        match self {
            SaveMode::Create => None,
            SaveMode::Update(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    List,
    Load { id: ArticuloId },
    Save { mode: SaveMode },
    Delete { id: ArticuloId },
}

#[derive(Debug)]
pub struct ArticuloController {
    api: ArticulosClient,
    loading: bool,
    list: ListView,
    form: FormFields,
    form_revision: u64,
    editing: Option<ArticuloId>,
    pending_delete: Option<ArticuloId>,
    toasts: Toasts,
    next_ticket: Ticket,
    latest_list: Option<Ticket>,
    latest_load: Option<Ticket>,
    in_flight: HashMap<Ticket, Pending>,
}

impl ArticuloController {
    pub fn new(api: ArticulosClient) -> Self {
        Self {
            api,
            loading: false,
            list: ListView::default(),
            form: FormFields::default(),
            form_revision: 0,
            editing: None,
            pending_delete: None,
            toasts: Toasts::default(),
            next_ticket: 0,
            latest_list: None,
            latest_load: None,
            in_flight: HashMap::new(),
        }
    }

    /// Apply one event. `now` timestamps any toast the event raises.
    pub fn handle(&mut self, event: Event, now: Instant) -> Vec<Effect> {
        match event {
            Event::Init | Event::Reload => self.load_articulos(),
            Event::Submit(fields) => self.handle_form_submit(fields, now),
            Event::CancelEdit => {
                self.reset_form();
                Vec::new()
            }
            Event::Action { kind, id } => (kind.handler())(self, id),
            Event::ConfirmDelete => self.confirm_delete(),
            Event::DismissDelete => {
                self.pending_delete = None;
                Vec::new()
            }
            Event::Response { ticket, outcome } => self.handle_response(ticket, outcome, now),
        }
    }

    pub fn load_articulos(&mut self) -> Vec<Effect> {
        self.loading = true;
        self.list = ListView::Blank;
        let request = self.api.build_list_articulos();
        let effect = self.issue(Pending::List, request);
        self.latest_list = Some(self.next_ticket);
        vec![effect]
    }

    pub fn handle_form_submit(&mut self, fields: FormFields, now: Instant) -> Vec<Effect> {
        let draft = fields.to_draft();
        self.set_form(fields);
        let (mode, built) = match self.editing {
            Some(id) => (SaveMode::Update(id), self.api.build_update_articulo(id, &draft)),
            None => (SaveMode::Create, self.api.build_create_articulo(&draft)),
        };
        match built {
            Ok(request) => vec![self.issue(Pending::Save { mode }, request)],
            Err(err) => {
                warn!("could not encode articulo draft: {err}");
                self.fail(mode.failure(), now);
                Vec::new()
            }
        }
    }

    pub fn edit_articulo(&mut self, id: ArticuloId) -> Vec<Effect> {
        let request = self.api.build_get_articulo(id);
        let effect = self.issue(Pending::Load { id }, request);
        self.latest_load = Some(self.next_ticket);
        vec![effect]
    }

    pub fn show_delete_modal(&mut self, id: ArticuloId) -> Vec<Effect> {
        self.pending_delete = Some(id);
        Vec::new()
    }

    pub fn confirm_delete(&mut self) -> Vec<Effect> {
        let Some(id) = self.pending_delete else {
            warn!("delete confirmed with no articulo selected");
            return Vec::new();
        };
        let request = self.api.build_delete_articulo(id);
        vec![self.issue(Pending::Delete { id }, request)]
    }

    pub fn reset_form(&mut self) {
        self.set_form(FormFields::default());
        self.editing = None;
    }

    pub fn show_toast(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.toasts.push(message, severity, now);
    }

    /// Remove toasts whose lifetime has elapsed.
    pub fn expire_toasts(&mut self, now: Instant) -> usize {
        self.toasts.expire(now)
    }

    pub fn next_toast_deadline(&self) -> Option<Instant> {
        self.toasts.next_deadline()
    }

    pub fn editing(&self) -> Option<ArticuloId> {
        self.editing
    }

    pub fn pending_delete(&self) -> Option<ArticuloId> {
        self.pending_delete
    }

    /// Bumped every time the controller writes the form (submit, populate,
    /// reset). Hosts holding their own copy of the inputs resync on change.
    pub fn form_revision(&self) -> u64 {
        self.form_revision
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn view(&self) -> PageView {
        PageView {
            loading: self.loading,
            list: self.list.clone(),
            form: FormView {
                title: if self.editing.is_some() {
                    TITLE_EDIT
                } else {
                    TITLE_CREATE
                },
                cancel_visible: self.editing.is_some(),
                fields: self.form.clone(),
            },
            delete_prompt: self.pending_delete,
            toasts: self.toasts.active().to_vec(),
        }
    }

    fn issue(&mut self, pending: Pending, request: HttpRequest) -> Effect {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        debug!(ticket, method = %request.method, path = %request.path, "issuing request");
        self.in_flight.insert(ticket, pending);
        Effect::Http { ticket, request }
    }

    fn handle_response(&mut self, ticket: Ticket, outcome: Outcome, now: Instant) -> Vec<Effect> {
        let Some(pending) = self.in_flight.remove(&ticket) else {
            warn!(ticket, "response for unknown ticket ignored");
            return Vec::new();
        };
        let response = match outcome {
            Outcome::Response(response) => Ok(response),
            Outcome::Transport(message) => Err(ApiError::Transport(message)),
        };
        match pending {
            Pending::List => {
                self.finish_list(ticket, response);
                Vec::new()
            }
            Pending::Load { id } => self.finish_load(ticket, id, response, now),
            Pending::Save { mode } => self.finish_save(mode, response, now),
            Pending::Delete { id } => self.finish_delete(id, response, now),
        }
    }

    fn finish_list(&mut self, ticket: Ticket, response: Result<HttpResponse, ApiError>) {
        if self.latest_list != Some(ticket) {
            debug!(ticket, "discarding stale list response");
            return;
        }
        self.loading = false;
        self.list = match response.and_then(|r| self.api.parse_list_articulos(r)) {
            Ok(items) if items.is_empty() => ListView::Empty,
            Ok(items) => {
                info!(count = items.len(), "articulos loaded");
                ListView::Cards(items.iter().map(ArticuloCard::from_articulo).collect())
            }
            Err(err) => {
                warn!("loading articulos failed: {err}");
                ListView::Error(list_error_message(&err))
            }
        };
    }

    fn finish_load(
        &mut self,
        ticket: Ticket,
        id: ArticuloId,
        response: Result<HttpResponse, ApiError>,
        now: Instant,
    ) -> Vec<Effect> {
        if self.latest_load != Some(ticket) {
            debug!(ticket, id, "discarding stale articulo load");
            return Vec::new();
        }
        match response.and_then(|r| self.api.parse_get_articulo(r)) {
            Ok(articulo) => {
                self.enter_edit_mode(id, &articulo);
                vec![Effect::ScrollToForm]
            }
            Err(err) => {
                warn!(id, "loading articulo failed: {err}");
                self.fail(ERR_LOAD, now);
                Vec::new()
            }
        }
    }

    fn finish_save(
        &mut self,
        mode: SaveMode,
        response: Result<HttpResponse, ApiError>,
        now: Instant,
    ) -> Vec<Effect> {
        match response.and_then(|r| self.api.parse_mutation(r)) {
            Ok(()) => {
                info!(?mode, "articulo saved");
                if self.editing == mode.editing() {
                    self.reset_form();
                }
                let effects = self.load_articulos();
                self.show_toast(MSG_SAVED, Severity::Success, now);
                effects
            }
            Err(err) => {
                warn!(?mode, "saving articulo failed: {err}");
                self.fail(mode.failure(), now);
                Vec::new()
            }
        }
    }

    fn finish_delete(
        &mut self,
        id: ArticuloId,
        response: Result<HttpResponse, ApiError>,
        now: Instant,
    ) -> Vec<Effect> {
        self.pending_delete = None;
        match response.and_then(|r| self.api.parse_mutation(r)) {
            Ok(()) => {
                info!(id, "articulo deleted");
                if self.editing == Some(id) {
                    self.reset_form();
                }
                let effects = self.load_articulos();
                self.show_toast(MSG_DELETED, Severity::Success, now);
                effects
            }
            Err(err) => {
                warn!(id, "deleting articulo failed: {err}");
                self.fail(ERR_DELETE, now);
                Vec::new()
            }
        }
    }

    fn enter_edit_mode(&mut self, id: ArticuloId, articulo: &Articulo) {
        self.set_form(FormFields::from_articulo(articulo));
        self.editing = Some(id);
    }

    fn set_form(&mut self, fields: FormFields) {
        self.form = fields;
        self.form_revision += 1;
    }

    fn fail(&mut self, action: &str, now: Instant) {
        self.show_toast(format!("Error: {action}"), Severity::Danger, now);
    }
}

/// Inline panel text: the raw status when the server answered, otherwise the
/// error itself.
fn list_error_message(err: &ApiError) -> String {
    match err.status() {
        Some(status) => format!("Error HTTP: {status}"),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kinds_parse_from_data_attribute() {
        assert_eq!("edit".parse::<ActionKind>(), Ok(ActionKind::Edit));
        assert_eq!("delete".parse::<ActionKind>(), Ok(ActionKind::Delete));
        assert_eq!(
            "archive".parse::<ActionKind>(),
            Err(UnknownAction("archive".to_string()))
        );
    }

    #[test]
    fn list_error_message_prefers_status() {
        let err = ApiError::HttpError {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(list_error_message(&err), "Error HTTP: 503");
        assert_eq!(list_error_message(&ApiError::NotFound), "Error HTTP: 404");
        assert_eq!(
            list_error_message(&ApiError::Transport("connection refused".into())),
            "transport failed: connection refused"
        );
    }

    #[test]
    fn tickets_increase_monotonically() {
        let mut controller = ArticuloController::new(ArticulosClient::new("http://api"));
        let first = controller.load_articulos();
        let second = controller.edit_articulo(1);
        let ticket = |effects: &[Effect]| match &effects[0] {
            Effect::Http { ticket, .. } => *ticket,
            other => panic!("unexpected effect {other:?}"),
        };
        assert!(ticket(&second) > ticket(&first));
        assert_eq!(controller.in_flight(), 2);
    }
}
