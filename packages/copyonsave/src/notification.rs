//! User-facing notifications.
//!
//! The host decides how notifications are shown: the hook command collects
//! them into its JSON response, the watch command prints them to the terminal.
//! Notifications are fire-and-forget; nothing reads a reply.

use std::sync::Mutex;

use bon::Builder;
use color_print::ceprintln;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[display("info")]
    Info,

    #[display("warning")]
    Warning,

    #[display("error")]
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Builder)]
pub struct Notification {
    pub level: Level,

    #[builder(into)]
    pub message: String,
}

/// Somewhere notifications can be sent.
///
/// Copy tasks run concurrently, so implementations must be `Sync`.
pub trait Notifier: Sync {
    /// Deliver one notification.
    fn notify(&self, notification: Notification);

    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::builder().level(Level::Info).message(message).build());
    }

    fn warning(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::builder().level(Level::Warning).message(message).build());
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::builder().level(Level::Error).message(message).build());
    }
}

/// Collects notifications in memory, in delivery order.
#[derive(Debug, Default)]
pub struct Collector(Mutex<Vec<Notification>>);

impl Collector {
    /// Take the notifications collected so far.
    pub fn take(&self) -> Vec<Notification> {
        match self.0.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for Collector {
    fn notify(&self, notification: Notification) {
        tracing::debug!(?notification, "collect notification");
        match self.0.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

/// Prints notifications to stderr with colored severity tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Notifier for Console {
    fn notify(&self, notification: Notification) {
        let Notification { level, message } = notification;
        match level {
            Level::Info => ceprintln!("<green><bold>info:</bold></green> {}", message),
            Level::Warning => ceprintln!("<yellow><bold>warning:</bold></yellow> {}", message),
            Level::Error => ceprintln!("<red><bold>error:</bold></red> {}", message),
        }
    }
}
