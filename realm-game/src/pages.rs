use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of story panels baked into the page deck.
///
/// Identifiers match the DOM ids of the panels one-to-one, so `as_str`
/// output is usable directly as an element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelId {
    StartScreen,
    CharacterSelect,
    ForestEntrance,
    MysticClearing,
    GuardianTrial,
    RealmCrossroads,
    WisdomReward,
    PowerReward,
    FriendshipReward,
    UniteRealm,
    SeekArtifact,
    BecomeGuardian,
    CrystalChamber,
    ExamineShrine,
}

impl PanelId {
    pub const ALL: [Self; 14] = [
        Self::StartScreen,
        Self::CharacterSelect,
        Self::ForestEntrance,
        Self::MysticClearing,
        Self::GuardianTrial,
        Self::RealmCrossroads,
        Self::WisdomReward,
        Self::PowerReward,
        Self::FriendshipReward,
        Self::UniteRealm,
        Self::SeekArtifact,
        Self::BecomeGuardian,
        Self::CrystalChamber,
        Self::ExamineShrine,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartScreen => "start-screen",
            Self::CharacterSelect => "character-select",
            Self::ForestEntrance => "forest-entrance",
            Self::MysticClearing => "mystic-clearing",
            Self::GuardianTrial => "guardian-trial",
            Self::RealmCrossroads => "realm-crossroads",
            Self::WisdomReward => "wisdom-reward",
            Self::PowerReward => "power-reward",
            Self::FriendshipReward => "friendship-reward",
            Self::UniteRealm => "unite-realm",
            Self::SeekArtifact => "seek-artifact",
            Self::BecomeGuardian => "become-guardian",
            Self::CrystalChamber => "crystal-chamber",
            Self::ExamineShrine => "examine-shrine",
        }
    }

    /// Whether reaching this panel unlocks an ending.
    #[must_use]
    pub const fn is_ending(self) -> bool {
        matches!(
            self,
            Self::WisdomReward
                | Self::PowerReward
                | Self::FriendshipReward
                | Self::UniteRealm
                | Self::SeekArtifact
                | Self::BecomeGuardian
                | Self::CrystalChamber
                | Self::ExamineShrine
        )
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|panel| panel.as_str() == s)
            .ok_or(())
    }
}

/// Selectable protagonist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Warrior,
    Mage,
    Rogue,
}

impl Character {
    pub const ALL: [Self; 3] = [Self::Warrior, Self::Mage, Self::Rogue];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Mage => "mage",
            Self::Rogue => "rogue",
        }
    }

    /// Body class applied while this protagonist is active.
    #[must_use]
    pub fn theme_class(self) -> String {
        format!("character-{}", self.as_str())
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Character {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warrior" => Ok(Self::Warrior),
            "mage" => Ok(Self::Mage),
            "rogue" => Ok(Self::Rogue),
            _ => Err(()),
        }
    }
}

/// Navigation target accepted by the navigator.
///
/// Any requested identifier resolves to something: identifiers with no
/// matching panel become synthesized endings instead of errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageTarget {
    Known(PanelId),
    Unscripted(String),
}

impl PageTarget {
    #[must_use]
    pub fn parse(requested: &str) -> Self {
        requested
            .parse::<PanelId>()
            .map_or_else(|()| Self::Unscripted(requested.to_string()), Self::Known)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Known(panel) => panel.as_str(),
            Self::Unscripted(id) => id,
        }
    }
}

impl From<&str> for PageTarget {
    fn from(requested: &str) -> Self {
        Self::parse(requested)
    }
}

impl From<PanelId> for PageTarget {
    fn from(panel: PanelId) -> Self {
        Self::Known(panel)
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_ids_roundtrip_through_strings() {
        for panel in PanelId::ALL {
            assert_eq!(panel.as_str().parse::<PanelId>(), Ok(panel));
        }
        assert!("treasure-room".parse::<PanelId>().is_err());
    }

    #[test]
    fn eight_panels_are_endings() {
        let endings = PanelId::ALL.iter().filter(|p| p.is_ending()).count();
        assert_eq!(endings, 8);
        assert!(!PanelId::StartScreen.is_ending());
        assert!(PanelId::CrystalChamber.is_ending());
    }

    #[test]
    fn unknown_identifier_becomes_unscripted_target() {
        assert_eq!(
            PageTarget::parse("forest-entrance"),
            PageTarget::Known(PanelId::ForestEntrance)
        );
        let target = PageTarget::parse("treasure-room");
        assert_eq!(target, PageTarget::Unscripted("treasure-room".to_string()));
        assert_eq!(target.id(), "treasure-room");
    }

    #[test]
    fn character_theme_class_matches_body_convention() {
        assert_eq!(Character::Mage.theme_class(), "character-mage");
        assert_eq!("rogue".parse::<Character>(), Ok(Character::Rogue));
    }
}
