//! Ending identities and the synthesized-ending table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pages::PanelId;

/// Identifier an ending unlocks under.
///
/// Panel endings unlock under their panel id; synthesized endings unlock
/// under whatever identifier was requested, so the set of unlocked ids is
/// open even though the content table is closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndingId(pub String);

impl EndingId {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PanelId> for EndingId {
    fn from(panel: PanelId) -> Self {
        Self(panel.as_str().to_string())
    }
}

impl fmt::Display for EndingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of endings the resolver can synthesize for identifiers with
/// no matching panel. Identifiers outside the table fall back to
/// `Mystery`, so resolution is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptedEnding {
    TreasureRoom,
    MagicDoor,
    FollowCreature,
    LeaveGrove,
    Mystery,
}

/// Rendered body of a synthesized ending panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndingContent {
    pub title: &'static str,
    pub text: &'static str,
    pub badge: &'static str,
}

impl ScriptedEnding {
    /// Resolve a requested identifier to a table entry. Total by design:
    /// anything unknown is the mystery ending.
    #[must_use]
    pub fn resolve(requested: &str) -> Self {
        match requested {
            "treasure-room" => Self::TreasureRoom,
            "magic-door" => Self::MagicDoor,
            "follow-creature" => Self::FollowCreature,
            "leave-grove" => Self::LeaveGrove,
            _ => Self::Mystery,
        }
    }

    #[must_use]
    pub const fn content(self) -> EndingContent {
        match self {
            Self::TreasureRoom => EndingContent {
                title: "The Treasure Hunter",
                text: "You discover a room filled with ancient gold and magical artifacts. \
                       Your newfound wealth allows you to fund expeditions that help others in need.",
                badge: "💰 Treasure Ending Unlocked",
            },
            Self::MagicDoor => EndingContent {
                title: "The Portal Master",
                text: "The magic door leads to a nexus of portals connecting all realms. \
                       You become the guardian of interdimensional travel.",
                badge: "🚪 Portal Ending Unlocked",
            },
            Self::FollowCreature => EndingContent {
                title: "The Beast Whisperer",
                text: "Following the creature leads you to a sanctuary of magical beasts. \
                       You become their protector and learn to speak with all creatures.",
                badge: "🦌 Beast Ending Unlocked",
            },
            Self::LeaveGrove => EndingContent {
                title: "The Wanderer",
                text: "You choose to continue your journey, becoming a legendary wanderer \
                       whose tales inspire future adventurers across the realm.",
                badge: "🗺️ Wanderer Ending Unlocked",
            },
            Self::Mystery => EndingContent {
                title: "The Mysterious Path",
                text: "Your unique choices have led you down an unexpected path, \
                       creating a story that has never been told before.",
                badge: "❓ Mystery Ending Unlocked",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_hits_resolve_to_their_entry() {
        let treasure = ScriptedEnding::resolve("treasure-room");
        assert_eq!(treasure, ScriptedEnding::TreasureRoom);
        assert_eq!(treasure.content().title, "The Treasure Hunter");
        assert_eq!(treasure.content().badge, "💰 Treasure Ending Unlocked");
    }

    #[test]
    fn anything_else_is_the_mystery_ending() {
        for requested in ["dragon-lair", "", "start-screen-2", "TREASURE-ROOM"] {
            let ending = ScriptedEnding::resolve(requested);
            assert_eq!(ending, ScriptedEnding::Mystery);
            assert_eq!(ending.content().badge, "❓ Mystery Ending Unlocked");
        }
    }

    #[test]
    fn ending_id_trims_and_orders() {
        let id = EndingId::new("  wisdom-reward ");
        assert_eq!(id.as_str(), "wisdom-reward");
        assert_eq!(EndingId::from(PanelId::WisdomReward), id);
    }
}
