use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::endings::EndingId;
use crate::pages::{Character, PanelId};

/// Progress ceiling; progress is a percentage.
pub const PROGRESS_MAX: u8 = 100;

/// The panel currently shown: either a real panel from the deck, or a
/// synthesized ending rendered over the last real panel's element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrentPage {
    Panel(PanelId),
    Synthesized(EndingId),
}

impl CurrentPage {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Panel(id) => id.as_str(),
            Self::Synthesized(id) => id.as_str(),
        }
    }

    /// The real panel, when one is shown.
    #[must_use]
    pub const fn panel(&self) -> Option<PanelId> {
        match self {
            Self::Panel(id) => Some(*id),
            Self::Synthesized(_) => None,
        }
    }

    #[must_use]
    pub const fn is_ending(&self) -> bool {
        match self {
            Self::Panel(id) => id.is_ending(),
            Self::Synthesized(_) => true,
        }
    }
}

impl fmt::Display for CurrentPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn default_audio_enabled() -> bool {
    true
}

fn default_current_page() -> CurrentPage {
    CurrentPage::Panel(PanelId::StartScreen)
}

/// The single mutable session record. Lives exactly as long as the
/// browsing session; nothing here is ever written to durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default = "default_current_page")]
    pub current_page: CurrentPage,
    #[serde(default)]
    pub character: Option<Character>,
    /// Human-readable action history, append-only until restart.
    #[serde(default)]
    pub choice_log: Vec<String>,
    /// Grows monotonically for the whole session; restart never clears it.
    #[serde(default)]
    pub unlocked_endings: BTreeSet<EndingId>,
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
    /// 0..=100, non-decreasing within a playthrough.
    #[serde(default)]
    pub progress: u8,
    /// One-shot; the permanent highlight it grants is never removed.
    #[serde(default)]
    pub easter_egg_found: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_page: default_current_page(),
            character: None,
            choice_log: Vec::new(),
            unlocked_endings: BTreeSet::new(),
            audio_enabled: true,
            progress: 0,
            easter_egg_found: false,
        }
    }
}

impl SessionState {
    /// Raise progress to `target`, never lowering it, clamped to 100.
    pub fn advance_progress(&mut self, target: u8) {
        self.progress = self.progress.max(target.min(PROGRESS_MAX));
    }

    /// Add `delta` to progress, clamped to 100.
    pub fn step_progress(&mut self, delta: u8) {
        self.progress = self.progress.saturating_add(delta).min(PROGRESS_MAX);
    }

    pub fn record_choice(&mut self, entry: String) {
        self.choice_log.push(entry);
    }

    /// True when `id` was newly inserted.
    pub fn unlock_ending(&mut self, id: EndingId) -> bool {
        self.unlocked_endings.insert(id)
    }

    /// Successor state after a restart: everything resets except the
    /// unlocked endings, the audio preference, and the easter-egg flag.
    #[must_use]
    pub fn restarted(&self) -> Self {
        Self {
            unlocked_endings: self.unlocked_endings.clone(),
            audio_enabled: self.audio_enabled,
            easter_egg_found: self.easter_egg_found,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_monotone_and_clamped() {
        let mut state = SessionState::default();
        state.advance_progress(40);
        assert_eq!(state.progress, 40);
        state.advance_progress(20);
        assert_eq!(state.progress, 40, "progress must never decrease");
        state.step_progress(15);
        assert_eq!(state.progress, 55);
        state.step_progress(200);
        assert_eq!(state.progress, 100);
        state.advance_progress(255);
        assert_eq!(state.progress, 100);
    }

    #[test]
    fn restart_preserves_only_the_session_wide_state() {
        let mut state = SessionState::default();
        state.current_page = CurrentPage::Panel(PanelId::WisdomReward);
        state.character = Some(Character::Mage);
        state.record_choice("Went to wisdom-reward".to_string());
        state.unlock_ending(EndingId::new("wisdom-reward"));
        state.audio_enabled = false;
        state.progress = 100;
        state.easter_egg_found = true;

        let fresh = state.restarted();
        assert_eq!(fresh.current_page, CurrentPage::Panel(PanelId::StartScreen));
        assert_eq!(fresh.character, None);
        assert!(fresh.choice_log.is_empty());
        assert_eq!(fresh.progress, 0);
        assert!(fresh.unlocked_endings.contains(&EndingId::new("wisdom-reward")));
        assert!(!fresh.audio_enabled);
        assert!(fresh.easter_egg_found);
    }

    #[test]
    fn unlock_reports_first_insertion_only() {
        let mut state = SessionState::default();
        assert!(state.unlock_ending(EndingId::new("crystal-chamber")));
        assert!(!state.unlock_ending(EndingId::new("crystal-chamber")));
        assert_eq!(state.unlocked_endings.len(), 1);
    }

    #[test]
    fn snapshot_serializes_with_stable_ids() {
        let mut state = SessionState::default();
        state.unlock_ending(EndingId::new("magic-door"));
        let json = serde_json::to_value(&state).expect("serializable");
        assert_eq!(json["current_page"], "start-screen");
        assert_eq!(json["unlocked_endings"][0], "magic-door");
    }
}
