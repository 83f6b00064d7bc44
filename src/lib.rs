pub mod app;
pub mod call;
pub mod catalog;
pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod forms;
pub mod ids;
pub mod notify;
pub mod recording;
pub mod room;
pub mod routes;
pub mod splash;
pub mod timer;

pub use app::{App, Stage};
pub use call::{format_duration, CallSession, CallStatus};
pub use config::{Config, ConfigError};
pub use context::{AppContext, Identity, Theme};
pub use error::ValidationError;
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use notify::{MemoryNotifier, Notifier, Severity, Toast, TracingNotifier};
pub use recording::{ArtifactCandidate, Library, RecordingSession, RecordingStatus, VoiceArtifact};
pub use room::{RoomMember, RoomSession};
pub use routes::Route;
pub use splash::SplashSequencer;
pub use timer::{Clock, ManualClock, TickEvent, TokioClock};
