//! Top-level app shell
//!
//! Owns the current stage (splash -> sign-in -> home), the shared voice
//! library and the applied effect, and builds each screen's session with
//! those passed in explicitly.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::call::CallSession;
use crate::catalog::{demo_effects, Contact, VoiceEffect};
use crate::context::AppContext;
use crate::error::ValidationError;
use crate::forms::{PasswordChange, SignInForm, SignUpForm};
use crate::notify::Toast;
use crate::recording::{Library, RecordingSession};
use crate::room::RoomSession;
use crate::routes::Route;
use crate::splash::SplashSequencer;
use crate::timer::TickEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Splash,
    SignIn,
    Home,
}

pub struct App {
    ctx: AppContext,
    stage: Arc<watch::Sender<Stage>>,
    splash: Option<SplashSequencer>,
    library: Library,
    applied_effect: Option<VoiceEffect>,
    route: Route,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let (stage, _) = watch::channel(Stage::Splash);
        let library = Library::new(Arc::clone(&ctx.ids));

        Self {
            ctx,
            stage: Arc::new(stage),
            splash: None,
            library,
            applied_effect: None,
            route: Route::SignIn,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn stage(&self) -> Stage {
        *self.stage.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Stage> {
        self.stage.subscribe()
    }

    /// Start the splash countdown. On completion the stage moves to SignIn.
    pub fn show_splash(&mut self) -> bool {
        if self.stage() != Stage::Splash || self.splash.is_some() {
            return false;
        }

        let stage = Arc::clone(&self.stage);
        let splash = SplashSequencer::start(
            &self.ctx.config.splash,
            Arc::clone(&self.ctx.clock),
            move || {
                stage.send_if_modified(|s| {
                    if *s == Stage::Splash {
                        *s = Stage::SignIn;
                        true
                    } else {
                        false
                    }
                });
            },
        );

        self.splash = Some(splash);
        true
    }

    pub fn splash(&self) -> Option<&SplashSequencer> {
        self.splash.as_ref()
    }

    /// Wait until the stage equals `target`
    pub async fn wait_for_stage(&self, target: Stage) {
        let mut rx = self.subscribe();
        while *rx.borrow_and_update() != target {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    pub fn sign_in(&mut self, form: &SignInForm) -> Result<(), ValidationError> {
        self.report(form.validate())?;
        self.ctx
            .notifier
            .notify(Toast::info("Success", "Signed in successfully"));
        self.enter_home();
        Ok(())
    }

    pub fn sign_up(&mut self, form: &SignUpForm) -> Result<(), ValidationError> {
        self.report(form.validate())?;
        self.ctx
            .notifier
            .notify(Toast::info("Welcome", "Account created successfully"));
        self.enter_home();
        Ok(())
    }

    pub fn change_password(&self, change: &PasswordChange) -> Result<(), ValidationError> {
        self.report(change.validate())?;
        self.ctx.notifier.notify(Toast::info(
            "Password Updated",
            "Your password has been changed successfully.",
        ));
        Ok(())
    }

    /// Resolve a path. Anything but sign-in/sign-up lands on SignIn until
    /// the user reaches Home.
    pub fn navigate(&mut self, path: &str) -> &Route {
        let route = Route::parse(path);

        self.route = if self.stage() != Stage::Home && !route.is_public() {
            debug!("{} requires sign-in", route);
            Route::SignIn
        } else {
            route
        };

        info!("Navigated to {}", self.route);
        &self.route
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Apply a catalog effect by id; later calls start with it selected
    pub fn apply_effect(&mut self, id: &str) -> Option<&VoiceEffect> {
        let Some(effect) = demo_effects().into_iter().find(|e| e.id == id) else {
            debug!("unknown effect {}", id);
            return None;
        };

        info!("Applied effect {}", effect.name);
        self.ctx
            .notifier
            .notify(Toast::info("Effect Applied", effect.name.clone()));
        self.applied_effect = Some(effect);
        self.applied_effect.as_ref()
    }

    pub fn applied_effect(&self) -> Option<&VoiceEffect> {
        self.applied_effect.as_ref()
    }

    pub fn greeting(&self) -> String {
        self.ctx.identity.greet_now()
    }

    /// A recording session that saves into the shared library
    pub fn voice_clone(&self) -> (RecordingSession, mpsc::UnboundedReceiver<TickEvent>) {
        RecordingSession::new(
            &self.ctx.config.recording,
            self.library.clone(),
            Arc::clone(&self.ctx.clock),
        )
    }

    pub async fn prank_call(
        &self,
        contact: Option<Contact>,
    ) -> (CallSession, mpsc::UnboundedReceiver<TickEvent>) {
        let (call, events) =
            CallSession::new(&self.ctx.config.call, contact, Arc::clone(&self.ctx.clock));

        if let Some(effect) = &self.applied_effect {
            call.select_voice(effect.name.clone()).await;
        }

        (call, events)
    }

    pub fn noise_room(&self) -> RoomSession {
        RoomSession::new(Arc::clone(&self.ctx.ids))
    }

    fn enter_home(&mut self) {
        // Dropping the splash cancels a completion that has not fired yet
        self.splash = None;
        self.stage.send_replace(Stage::Home);
        self.route = Route::Home;
        info!("Signed in as {}", self.ctx.identity.full_name);
    }

    fn report(&self, result: Result<(), ValidationError>) -> Result<(), ValidationError> {
        if let Err(e) = &result {
            self.ctx.notifier.notify(e.to_toast());
        }
        result
    }
}
