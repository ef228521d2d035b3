//! Transient notifications.
//!
//! Toasts live for a fixed [`TOAST_LIFETIME`] and are never deduplicated.
//! Time is passed in by the caller so expiry stays deterministic.

use std::time::{Duration, Instant};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

impl Toast {
    pub fn expires_at(&self) -> Instant {
        self.shown_at + TOAST_LIFETIME
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Stack of currently visible toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    next_id: u64,
    active: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.active.push(Toast {
            id,
            message: message.into(),
            severity,
            shown_at: now,
        });
        id
    }

    /// Drop every toast whose lifetime has elapsed. Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|toast| !toast.is_expired(now));
        before - self.active.len()
    }

    /// Earliest instant at which `expire` would remove something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.iter().map(Toast::expires_at).min()
    }

    pub fn active(&self) -> &[Toast] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
