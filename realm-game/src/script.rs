//! The story script: narrative copy and the ordered choice actions each
//! panel offers. The web layer renders panels straight from this table;
//! quick-select key mapping indexes into the same choice order.

use crate::pages::{Character, PanelId};

/// What activating a choice button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryAction {
    /// Leave the title screen.
    Start,
    /// Navigate to the named target; unscripted targets synthesize endings.
    GoTo(&'static str),
    Restart,
}

/// One choice button, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub action: StoryAction,
}

/// Static body of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelScript {
    pub title: &'static str,
    pub text: &'static str,
    /// Present on ending panels only.
    pub badge: Option<&'static str>,
    pub choices: &'static [Choice],
}

/// The single choice every ending offers, synthesized endings included.
pub const RESTART_ONLY: &[Choice] = &[Choice {
    label: "Begin New Adventure",
    action: StoryAction::Restart,
}];

/// Script lookup, total over the panel set.
#[must_use]
pub const fn script_for(panel: PanelId) -> PanelScript {
    match panel {
        PanelId::StartScreen => PanelScript {
            title: "Enchanted Realm Adventure",
            text: "Beyond the mist lies a realm of shimmering groves and forgotten \
                   magic. Every path you take writes a different tale.",
            badge: None,
            choices: &[Choice {
                label: "Begin Your Adventure",
                action: StoryAction::Start,
            }],
        },
        // Character cards are their own click surface; this panel exposes
        // no choice buttons to the quick-select keys.
        PanelId::CharacterSelect => PanelScript {
            title: "Choose Your Hero",
            text: "Three travelers stand at the edge of the realm. Whose story \
                   will you live?",
            badge: None,
            choices: &[],
        },
        PanelId::ForestEntrance => PanelScript {
            title: "The Forest Entrance",
            text: "Ancient trees arch over a path dusted with silver light. A \
                   shrine hums softly to your left, and something glitters deep \
                   within a crystal cave.",
            badge: None,
            choices: &[
                Choice {
                    label: "Follow the glowing path",
                    action: StoryAction::GoTo("mystic-clearing"),
                },
                Choice {
                    label: "Examine the ancient shrine",
                    action: StoryAction::GoTo("examine-shrine"),
                },
                Choice {
                    label: "Slip into the crystal chamber",
                    action: StoryAction::GoTo("crystal-chamber"),
                },
            ],
        },
        PanelId::MysticClearing => PanelScript {
            title: "The Mystic Clearing",
            text: "Moonflowers bloom around a ring of standing stones. A silver \
                   creature watches you from the treeline, and something metallic \
                   gleams beneath the roots.",
            badge: None,
            choices: &[
                Choice {
                    label: "Face the guardian's trial",
                    action: StoryAction::GoTo("guardian-trial"),
                },
                Choice {
                    label: "Search the roots for treasure",
                    action: StoryAction::GoTo("treasure-room"),
                },
                Choice {
                    label: "Follow the silver creature",
                    action: StoryAction::GoTo("follow-creature"),
                },
            ],
        },
        PanelId::GuardianTrial => PanelScript {
            title: "The Guardian's Trial",
            text: "A towering guardian of living stone offers you a single gift. \
                   Choose well; the realm remembers.",
            badge: None,
            choices: &[
                Choice {
                    label: "Claim the gift of wisdom",
                    action: StoryAction::GoTo("wisdom-reward"),
                },
                Choice {
                    label: "Claim the gift of power",
                    action: StoryAction::GoTo("power-reward"),
                },
                Choice {
                    label: "Claim the gift of friendship",
                    action: StoryAction::GoTo("friendship-reward"),
                },
                Choice {
                    label: "Refuse, and walk to the crossroads",
                    action: StoryAction::GoTo("realm-crossroads"),
                },
            ],
        },
        PanelId::RealmCrossroads => PanelScript {
            title: "The Realm Crossroads",
            text: "Five roads meet under a sky of slow-turning stars. Each one \
                   ends a story; only one of them ends yours.",
            badge: None,
            choices: &[
                Choice {
                    label: "Unite the fractured realm",
                    action: StoryAction::GoTo("unite-realm"),
                },
                Choice {
                    label: "Seek the lost artifact",
                    action: StoryAction::GoTo("seek-artifact"),
                },
                Choice {
                    label: "Become the realm's guardian",
                    action: StoryAction::GoTo("become-guardian"),
                },
                Choice {
                    label: "Open the shimmering door",
                    action: StoryAction::GoTo("magic-door"),
                },
                Choice {
                    label: "Leave the grove behind",
                    action: StoryAction::GoTo("leave-grove"),
                },
            ],
        },
        PanelId::WisdomReward => PanelScript {
            title: "The Sage of the Grove",
            text: "The guardian's gift settles behind your eyes. Scholars will \
                   cross oceans to hear you speak of the realm.",
            badge: Some("📜 Wisdom Ending Unlocked"),
            choices: RESTART_ONLY,
        },
        PanelId::PowerReward => PanelScript {
            title: "The Storm Sovereign",
            text: "Raw magic answers your call. The realm bows, though you wonder \
                   what it whispers when you are not listening.",
            badge: Some("⚡ Power Ending Unlocked"),
            choices: RESTART_ONLY,
        },
        PanelId::FriendshipReward => PanelScript {
            title: "The Heart of the Realm",
            text: "The guardian steps down from its pedestal and walks beside \
                   you. No road is long with good company.",
            badge: Some("💞 Friendship Ending Unlocked"),
            choices: RESTART_ONLY,
        },
        PanelId::UniteRealm => PanelScript {
            title: "The Realm United",
            text: "Banners of every grove fly over one table. Your name is the \
                   first word of the new age's histories.",
            badge: Some("👑 Unity Ending Unlocked"),
            choices: RESTART_ONLY,
        },
        PanelId::SeekArtifact => PanelScript {
            title: "The Relic Seeker",
            text: "The lost artifact sings in your hands. Its light will outlive \
                   every map that failed to find it.",
            badge: Some("🔮 Artifact Ending Unlocked"),
            choices: RESTART_ONLY,
        },
        PanelId::BecomeGuardian => PanelScript {
            title: "The New Guardian",
            text: "Stone creeps gently over your shoulders like a cloak. The \
                   realm is safe, for as long as you choose to stand.",
            badge: Some("🛡️ Guardian Ending Unlocked"),
            choices: RESTART_ONLY,
        },
        PanelId::CrystalChamber => PanelScript {
            title: "The Crystal Chamber",
            text: "Facets of living crystal show every story at once, and one of \
                   them is yours, already ending happily.",
            badge: Some("💎 Crystal Ending Unlocked"),
            choices: RESTART_ONLY,
        },
        PanelId::ExamineShrine => PanelScript {
            title: "The Shrine Keeper",
            text: "The shrine accepts your vigil. Travelers will leave offerings \
                   here for a keeper they never see, only feel.",
            badge: Some("⛩️ Shrine Ending Unlocked"),
            choices: RESTART_ONLY,
        },
    }
}

/// Ordered choice buttons for a panel.
#[must_use]
pub const fn choices(panel: PanelId) -> &'static [Choice] {
    script_for(panel).choices
}

/// A character card on the selection panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCard {
    pub character: Character,
    pub name: &'static str,
    pub blurb: &'static str,
}

pub const CHARACTERS: [CharacterCard; 3] = [
    CharacterCard {
        character: Character::Warrior,
        name: "Brannan the Warrior",
        blurb: "A shield arm the realm already trusts.",
    },
    CharacterCard {
        character: Character::Mage,
        name: "Isolde the Mage",
        blurb: "She reads the grove's light like a book.",
    },
    CharacterCard {
        character: Character::Rogue,
        name: "Fen the Rogue",
        blurb: "No door in the realm has ever stayed locked to him.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageTarget;

    #[test]
    fn every_panel_has_copy_and_endings_offer_restart() {
        for panel in PanelId::ALL {
            let script = script_for(panel);
            assert!(!script.title.is_empty());
            assert!(!script.text.is_empty());
            assert_eq!(script.badge.is_some(), panel.is_ending(), "{panel}");
            if panel.is_ending() {
                assert_eq!(script.choices, RESTART_ONLY);
            }
        }
    }

    #[test]
    fn character_select_exposes_no_choice_buttons() {
        assert!(choices(PanelId::CharacterSelect).is_empty());
        assert_eq!(CHARACTERS.len(), 3);
    }

    #[test]
    fn scripted_targets_split_between_panels_and_synthesized_endings() {
        let mut known = 0;
        let mut unscripted = 0;
        for panel in PanelId::ALL {
            for choice in choices(panel) {
                if let StoryAction::GoTo(target) = choice.action {
                    match PageTarget::parse(target) {
                        PageTarget::Known(_) => known += 1,
                        PageTarget::Unscripted(_) => unscripted += 1,
                    }
                }
            }
        }
        assert!(known >= 8, "panel routes missing");
        // treasure-room, follow-creature, magic-door, leave-grove
        assert_eq!(unscripted, 4);
    }

    #[test]
    fn every_ending_panel_is_reachable_from_the_script() {
        for ending in PanelId::ALL.iter().filter(|p| p.is_ending()) {
            let reachable = PanelId::ALL.iter().any(|panel| {
                choices(*panel)
                    .iter()
                    .any(|c| matches!(c.action, StoryAction::GoTo(t) if t == ending.as_str()))
            });
            assert!(reachable, "{ending} unreachable");
        }
    }
}
