//! Terminal host for the articulos controller.
//!
//! # Design
//! The core builds requests and the view model; this crate supplies what a
//! browser page would: a blocking transport (`ureq`), a text renderer, and a
//! line-oriented command loop standing in for the page's buttons and form.

pub mod command;
pub mod config;
pub mod render;
pub mod shell;
pub mod transport;

pub use command::{Command, CommandError};
pub use config::Config;
pub use shell::{Flow, Shell};
pub use transport::{Transport, UreqTransport};
