//! Client core for the articulos CRUD screen.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and layers a page controller
//! on top that turns user events into requests and responses into a view
//! model.
//!
//! # Design
//! - `ArticulosClient` is stateless; it holds only `base_url`.
//! - `ArticuloController` owns the session state (list, form, edit and
//!   delete targets, toasts) and speaks in `Event`s and `Effect`s.
//! - `PageView` is the only thing a host renders.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod toast;
pub mod types;
pub mod view;

pub use client::ArticulosClient;
pub use controller::{ActionKind, ArticuloController, Effect, Event, Outcome, Ticket, UnknownAction};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use toast::{Severity, Toast, TOAST_LIFETIME};
pub use types::{Articulo, ArticuloDraft, ArticuloId};
pub use view::{
    ArticuloCard, CardAction, FormField, FormFields, FormView, ListView, PageView, UnknownField,
    EMPTY_LIST_MESSAGE, TITLE_CREATE, TITLE_EDIT,
};
