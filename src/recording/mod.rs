//! Voice clone recording
//!
//! A take ticks once per second up to a hard ceiling. Manual stops shorter
//! than the minimum length are dropped; longer ones wait in Stopped until the
//! user saves them to the library or discards them.

mod library;
mod session;

pub use library::{Library, VoiceArtifact};
pub use session::{ArtifactCandidate, RecordingSession, RecordingStatus};
