//! Enchanted Realm story engine
//!
//! Platform-agnostic core for the Enchanted Realm Adventure: session
//! state, the panel navigator, the synthesized-ending resolver, keyboard
//! mapping, and the transition timeline. Presentation and audio live
//! behind the [`Stage`] and [`EffectPlayer`] traits so the web frontend
//! and the headless tester drive the same machine.

pub mod effects;
pub mod endings;
pub mod input;
pub mod navigator;
pub mod pages;
pub mod progress;
pub mod rng;
pub mod script;
pub mod state;
pub mod timeline;

// Re-export commonly used types
pub use effects::Effect;
pub use endings::{EndingContent, EndingId, ScriptedEnding};
pub use input::{QuickAction, SECRET_SEQUENCE, SequenceTracker, quick_action};
pub use navigator::{EASTER_EGG_MESSAGE, Navigator};
pub use pages::{Character, PageTarget, PanelId};
pub use progress::{
    CHARACTER_PROGRESS, ProgressStage, START_PROGRESS, TRANSITION_PROGRESS_STEP,
};
pub use script::{CHARACTERS, CharacterCard, Choice, PanelScript, StoryAction};
pub use state::{CurrentPage, PROGRESS_MAX, SessionState};
pub use timeline::{
    CHARACTER_FOLLOWUP_DELAY_MS, PAGE_SWAP_DELAY_MS, StageCue, TRANSITION_CLEAR_MS, Timeline,
    TransitionVariant,
};

use thiserror::Error;

/// Failure reported by a presentation operation. Navigation never
/// propagates these; they are logged and the operation is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("presentation element missing: {0}")]
    MissingElement(String),
    #[error("presentation backend failure: {0}")]
    Backend(String),
}

/// Presentation surface the navigator drives.
///
/// Implementations own the panel deck: one mutually exclusive visible
/// panel at a time, addressed by the ids in [`pages::PanelId`]. Every
/// operation is best-effort; returning an error only means the visual
/// nicety was skipped.
pub trait Stage {
    /// Mark the outgoing panel as leaving (the pre-swap loading state).
    fn set_leaving(&mut self, page: &CurrentPage) -> Result<(), StageError>;

    /// Hide `from`, show `to`, and apply the transition variant class.
    fn swap_visible(
        &mut self,
        from: &CurrentPage,
        to: &CurrentPage,
        variant: TransitionVariant,
    ) -> Result<(), StageError>;

    /// Remove the transition variant class once the animation settles.
    fn clear_transition(&mut self, page: &CurrentPage) -> Result<(), StageError>;

    /// Reset the deck so only the start panel is visible.
    fn show_only_start(&mut self) -> Result<(), StageError>;

    /// Replace the visible panel's content with a synthesized ending.
    fn render_synthesized_ending(&mut self, content: &EndingContent) -> Result<(), StageError>;

    /// Celebration burst when a new ending unlocks.
    fn celebrate(&mut self) -> Result<(), StageError>;

    /// Decorative sparkles on the freshly shown panel.
    fn sparkle(&mut self) -> Result<(), StageError>;

    /// Reflect the audio preference in the visible indicator.
    fn set_audio_indicator(&mut self, enabled: bool) -> Result<(), StageError>;

    /// Apply (or clear, with `None`) the protagonist body theme.
    fn set_character_theme(&mut self, character: Option<Character>) -> Result<(), StageError>;

    /// Full-screen easter-egg flourish.
    fn flourish(&mut self) -> Result<(), StageError>;

    /// Informational acknowledgment dialog.
    fn acknowledge(&mut self, message: &str) -> Result<(), StageError>;

    /// Permanent golden highlight on every story panel.
    fn highlight_all_panels(&mut self) -> Result<(), StageError>;

    /// Announce a page change to assistive technology.
    fn announce(&mut self, title: &str) -> Result<(), StageError>;
}

/// Short synthesized audio cues plus the ambient track. Fire-and-forget:
/// playback problems stay inside the implementation.
pub trait EffectPlayer {
    fn play(&mut self, effect: Effect);
    fn resume_ambient(&mut self);
    fn pause_ambient(&mut self);
}
