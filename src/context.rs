//! Read-only collaborators handed to every screen
//!
//! Theme, identity, toast surface, id generation and the clock are passed
//! down explicitly instead of being looked up globally, so each session can
//! be built and tested on its own.

use chrono::{Local, Timelike};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::notify::{Notifier, TracingNotifier};
use crate::timer::{Clock, TokioClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Display identity used for greetings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub full_name: String,
    pub first_name: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            full_name: "Guest User".to_string(),
            first_name: "Guest".to_string(),
        }
    }
}

impl Identity {
    /// e.g. "Good Evening, Guest"
    pub fn greet(&self, hour: u32) -> String {
        format!("{}, {}", greeting(hour), self.first_name)
    }

    pub fn greet_now(&self) -> String {
        self.greet(Local::now().hour())
    }
}

/// Time-of-day salutation for a 0-23 hour
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub theme: Theme,
    pub identity: Identity,
    pub notifier: Arc<dyn Notifier>,
    pub ids: Arc<dyn IdGenerator>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Production wiring: tokio time, UUIDs, toasts to the log
    pub fn new(config: Config) -> Self {
        let identity = Identity {
            full_name: config.identity.full_name.clone(),
            first_name: config.identity.first_name.clone(),
        };

        Self {
            theme: config.app.theme,
            identity,
            config: Arc::new(config),
            notifier: Arc::new(TracingNotifier),
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(TokioClock),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
