//! Noise rooms: local, single-user room membership with no timers

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::ids::IdGenerator;

/// Entry in the room browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub private: bool,
    pub members_online: u32,
}

pub fn demo_rooms() -> Vec<Room> {
    [
        ("r1", "Gaming Squad", true, 5),
        ("r2", "Music Lovers", false, 3),
        ("r3", "Meme Review", false, 8),
    ]
    .into_iter()
    .map(|(id, name, private, members_online)| Room {
        id: id.to_string(),
        name: name.to_string(),
        private,
        members_online,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomMember {
    pub display_name: String,
    pub muted: bool,
    pub speaking: bool,
}

impl RoomMember {
    fn new(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            muted: false,
            speaking: false,
        }
    }
}

/// Voices selectable inside a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomVoice {
    pub id: String,
    pub name: String,
}

pub fn room_voices() -> Vec<RoomVoice> {
    ["Robot", "Chipmunk", "Deep Voice", "My Voice Clone"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| RoomVoice {
            id: (i + 1).to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedRoom {
    pub id: String,
    /// Set when the room was created here; joined rooms are known by code only
    pub name: Option<String>,
    pub private: bool,
    pub members: Vec<RoomMember>,
}

/// The fixed demo roster every room shows
fn demo_roster() -> Vec<RoomMember> {
    ["You", "Alex", "Taylor", "Jordan"]
        .into_iter()
        .map(RoomMember::new)
        .collect()
}

pub struct RoomSession {
    ids: Arc<dyn IdGenerator>,
    joined: Option<JoinedRoom>,
    voice_id: String,
}

impl RoomSession {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            joined: None,
            voice_id: "1".to_string(),
        }
    }

    /// Create a room and join it. A non-empty password makes it private.
    pub fn create_room(
        &mut self,
        name: &str,
        password: Option<&str>,
    ) -> Result<String, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::MissingField("room name"));
        }

        let id = self.ids.next_id();
        let private = password.is_some_and(|p| !p.is_empty());
        info!("Created room \"{}\" ({}), private={}", name, id, private);

        self.joined = Some(JoinedRoom {
            id: id.clone(),
            name: Some(name.to_string()),
            private,
            members: demo_roster(),
        });

        Ok(id)
    }

    /// Join by id or code. Every code succeeds, including an empty one.
    pub fn join_room(&mut self, code: &str) {
        if let Some(previous) = &self.joined {
            debug!("leaving {} to join {}", previous.id, code);
        }

        let known = demo_rooms().into_iter().find(|r| r.id == code);
        info!("Joined room {}", code);

        self.joined = Some(JoinedRoom {
            id: code.to_string(),
            private: known.as_ref().is_some_and(|r| r.private),
            name: known.map(|r| r.name),
            members: demo_roster(),
        });
    }

    pub fn leave_room(&mut self) -> bool {
        match self.joined.take() {
            Some(room) => {
                info!("Left room {}", room.id);
                true
            }
            None => false,
        }
    }

    pub fn joined(&self) -> Option<&JoinedRoom> {
        self.joined.as_ref()
    }

    pub fn members(&self) -> &[RoomMember] {
        self.joined
            .as_ref()
            .map(|room| room.members.as_slice())
            .unwrap_or(&[])
    }

    /// Flip a member's mute flag. Returns the new value, or None if no such
    /// member is in the current room.
    pub fn toggle_mute(&mut self, member: &str) -> Option<bool> {
        let m = self.member_mut(member)?;
        m.muted = !m.muted;
        Some(m.muted)
    }

    pub fn set_speaking(&mut self, member: &str, speaking: bool) -> bool {
        match self.member_mut(member) {
            Some(m) => {
                m.speaking = speaking;
                true
            }
            None => false,
        }
    }

    /// Pick the voice applied in the room. Unknown ids are ignored.
    pub fn select_voice(&mut self, id: &str) -> bool {
        if !room_voices().iter().any(|v| v.id == id) {
            debug!("unknown room voice {}", id);
            return false;
        }
        self.voice_id = id.to_string();
        true
    }

    pub fn selected_voice(&self) -> Option<RoomVoice> {
        room_voices().into_iter().find(|v| v.id == self.voice_id)
    }

    fn member_mut(&mut self, name: &str) -> Option<&mut RoomMember> {
        self.joined
            .as_mut()?
            .members
            .iter_mut()
            .find(|m| m.display_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn session() -> RoomSession {
        RoomSession::new(Arc::new(SequentialIds::new("room")))
    }

    #[test]
    fn test_create_room_joins_with_generated_id() {
        let mut rooms = session();

        let id = rooms.create_room("Late Night", Some("hunter2")).unwrap();
        assert_eq!(id, "room-1");

        let joined = rooms.joined().unwrap();
        assert_eq!(joined.name.as_deref(), Some("Late Night"));
        assert!(joined.private);
        assert_eq!(joined.members.len(), 4);
    }

    #[test]
    fn test_create_room_requires_name() {
        let mut rooms = session();
        assert_eq!(
            rooms.create_room("", None),
            Err(ValidationError::MissingField("room name"))
        );
        assert!(rooms.joined().is_none());
    }

    #[test]
    fn test_empty_password_is_public() {
        let mut rooms = session();
        rooms.create_room("Open", Some("")).unwrap();
        assert!(!rooms.joined().unwrap().private);
    }

    #[test]
    fn test_join_any_code_then_leave() {
        let mut rooms = session();

        rooms.join_room("XK42");
        assert_eq!(rooms.joined().unwrap().id, "XK42");
        assert_eq!(rooms.joined().unwrap().name, None);

        rooms.join_room("r1");
        let joined = rooms.joined().unwrap();
        assert_eq!(joined.name.as_deref(), Some("Gaming Squad"));
        assert!(joined.private);

        assert!(rooms.leave_room());
        assert!(rooms.joined().is_none());
        assert!(!rooms.leave_room());
    }

    #[test]
    fn test_join_with_empty_code() {
        let mut rooms = session();
        rooms.join_room("");

        let joined = rooms.joined().unwrap();
        assert_eq!(joined.id, "");
        assert_eq!(joined.name, None);
        assert!(!joined.private);
        assert_eq!(rooms.members().len(), 4);
    }

    #[test]
    fn test_member_flags_are_independent() {
        let mut rooms = session();
        rooms.join_room("r2");

        assert_eq!(rooms.toggle_mute("Alex"), Some(true));
        assert!(rooms.set_speaking("Taylor", true));

        let alex = &rooms.members()[1];
        assert!(alex.muted && !alex.speaking);
        let taylor = &rooms.members()[2];
        assert!(!taylor.muted && taylor.speaking);

        assert_eq!(rooms.toggle_mute("Alex"), Some(false));
        assert_eq!(rooms.toggle_mute("Nobody"), None);
    }

    #[test]
    fn test_members_empty_when_not_joined() {
        let mut rooms = session();
        assert!(rooms.members().is_empty());
        assert_eq!(rooms.toggle_mute("You"), None);
    }

    #[test]
    fn test_select_voice() {
        let mut rooms = session();
        assert_eq!(rooms.selected_voice().unwrap().name, "Robot");

        assert!(rooms.select_voice("4"));
        assert_eq!(rooms.selected_voice().unwrap().name, "My Voice Clone");

        assert!(!rooms.select_voice("99"));
        assert_eq!(rooms.selected_voice().unwrap().id, "4");
    }
}
