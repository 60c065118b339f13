//! Outbound notifications.
//!
//! Events are small structured records the engine emits for a UI or
//! notification layer. The engine never renders them.

use serde::{Deserialize, Serialize};

use crate::board::player::{Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Conquest,
    Defense,
    /// A mission, card or deployment was invalidated.
    Neutralized,
    GameOver,
    NuclearAlert,
    SecondaryMission,
    Intelligence,
}

impl EventKind {
    pub const fn color(self) -> &'static str {
        match self {
            EventKind::Conquest => "#c0392b",
            EventKind::Defense => "#27ae60",
            EventKind::Neutralized => "#e67e22",
            EventKind::GameOver => "#f1c40f",
            EventKind::NuclearAlert => "#ff0000",
            EventKind::SecondaryMission => "#2980b9",
            EventKind::Intelligence => "#8e44ad",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub message: String,
    pub color: String,
    /// Display name of the player who caused the event.
    pub actor: Option<String>,
    pub actor_id: Option<PlayerId>,
    /// Set when only one player should see the event.
    pub recipient: Option<PlayerId>,
}

impl Event {
    pub fn new(kind: EventKind, actor: Option<&Player>, title: impl Into<String>, message: impl Into<String>) -> Self {
        Event {
            kind,
            title: title.into(),
            message: message.into(),
            color: kind.color().to_string(),
            actor: actor.map(|p| p.name.clone()),
            actor_id: actor.map(|p| p.id),
            recipient: None,
        }
    }

    /// Restricts the event to a single player.
    pub fn to(mut self, recipient: PlayerId) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn is_private(&self) -> bool {
        self.recipient.is_some()
    }
}
