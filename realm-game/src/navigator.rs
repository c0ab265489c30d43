//! The navigation state machine binding session state to the
//! presentation surface and effect player.

use crate::endings::{EndingId, ScriptedEnding};
use crate::input::{QuickAction, SequenceTracker, quick_action};
use crate::pages::{Character, PageTarget, PanelId};
use crate::progress::{
    CHARACTER_PROGRESS, ProgressStage, START_PROGRESS, TRANSITION_PROGRESS_STEP,
};
use crate::rng::VariantPicker;
use crate::script::{self, Choice, StoryAction};
use crate::state::{CurrentPage, PROGRESS_MAX, SessionState};
use crate::timeline::{
    CHARACTER_FOLLOWUP_DELAY_MS, PAGE_SWAP_DELAY_MS, StageCue, TRANSITION_CLEAR_MS, Timeline,
};
use crate::{Effect, EffectPlayer, Stage, StageError};

/// Dialog copy shown when the secret sequence lands.
pub const EASTER_EGG_MESSAGE: &str = "🎉 Easter Egg Activated! 🎉\n\
    You've discovered the secret Konami Code!\n\
    All story paths are now highlighted with golden sparkles!";

/// One navigator per session. Owns the session record, the pending
/// presentation cues, and the seeded variant stream; everything visible
/// or audible goes through the two collaborator seams.
///
/// State mutation is synchronous; only panel visibility follows the
/// timeline. Callers must not assume the visible panel matches
/// `state().current_page` until the pending swap cue has been applied
/// via [`Navigator::advance_time`].
#[derive(Debug)]
pub struct Navigator<S, E> {
    state: SessionState,
    stage: S,
    effects: E,
    timeline: Timeline,
    variants: VariantPicker,
    sequence: SequenceTracker,
    swap_pending: bool,
}

impl<S: Stage, E: EffectPlayer> Navigator<S, E> {
    /// Fresh session showing the start panel.
    #[must_use]
    pub fn new(seed: u64, stage: S, effects: E) -> Self {
        Self::from_state(SessionState::default(), seed, stage, effects)
    }

    /// Bind an existing session record (the tester uses this to seed
    /// precondition states).
    #[must_use]
    pub fn from_state(state: SessionState, seed: u64, stage: S, effects: E) -> Self {
        Self {
            state,
            stage,
            effects,
            timeline: Timeline::new(),
            variants: VariantPicker::from_user_seed(seed),
            sequence: SequenceTracker::new(),
            swap_pending: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply a closure to the mutable session record.
    pub fn with_state_mut<R>(&mut self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.state)
    }

    #[must_use]
    pub const fn stage(&self) -> &S {
        &self.stage
    }

    pub const fn effects_mut(&mut self) -> &mut E {
        &mut self.effects
    }

    /// Display label for the current progress percentage.
    #[must_use]
    pub const fn progress_stage(&self) -> ProgressStage {
        ProgressStage::for_percent(self.state.progress)
    }

    /// Choice buttons on the currently shown panel, in document order.
    #[must_use]
    pub fn visible_choices(&self) -> &'static [Choice] {
        match &self.state.current_page {
            CurrentPage::Panel(panel) => script::choices(*panel),
            CurrentPage::Synthesized(_) => script::RESTART_ONLY,
        }
    }

    /// Earliest pending presentation cue, for hosts that sleep between
    /// clock ticks.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.timeline.next_due()
    }

    /// Leave the title screen: click cue, progress floor, then a normal
    /// transition to the protagonist selection panel.
    pub fn start_adventure(&mut self, now_ms: u64) {
        self.play(Effect::Click);
        self.state.advance_progress(START_PROGRESS);
        self.go_to_page(PanelId::CharacterSelect.as_str(), now_ms);
    }

    /// Record the chosen protagonist and schedule the follow-up
    /// navigation into the forest.
    pub fn select_character(&mut self, character: Character, now_ms: u64) {
        self.state.character = Some(character);
        self.state.record_choice(format!("Selected {character}"));
        self.play(Effect::Success);
        self.state.advance_progress(CHARACTER_PROGRESS);
        best_effort(self.stage.set_character_theme(Some(character)));
        self.timeline.post(
            now_ms + CHARACTER_FOLLOWUP_DELAY_MS,
            StageCue::FollowUp {
                target: PageTarget::Known(PanelId::ForestEntrance),
            },
        );
    }

    /// Navigate to any requested identifier. Known panels transition
    /// normally; anything else becomes a synthesized ending instead of an
    /// error. No return value: side effects are the whole contract.
    pub fn go_to_page(&mut self, requested: &str, now_ms: u64) {
        if self.swap_pending {
            log::debug!("transition in flight; ignoring request for {requested}");
            return;
        }
        match PageTarget::parse(requested) {
            PageTarget::Known(panel) => self.transition_to(panel, now_ms),
            PageTarget::Unscripted(id) => self.synthesize_ending(&id),
        }
    }

    /// Restart: fresh session record, keeping only the unlocked endings,
    /// the audio preference, and the easter-egg highlight.
    pub fn restart(&mut self) {
        self.play(Effect::Click);
        self.state = self.state.restarted();
        self.timeline.clear();
        self.swap_pending = false;
        best_effort(self.stage.set_character_theme(None));
        best_effort(self.stage.show_only_start());
    }

    /// Flip the audio preference. Only the enable path emits a cue.
    pub fn toggle_audio(&mut self) {
        self.state.audio_enabled = !self.state.audio_enabled;
        best_effort(self.stage.set_audio_indicator(self.state.audio_enabled));
        if self.state.audio_enabled {
            self.effects.resume_ambient();
            self.play(Effect::Toggle);
        } else {
            self.effects.pause_ambient();
        }
    }

    /// Activate the nth visible choice button (click and key paths both
    /// land here).
    pub fn activate_choice(&mut self, idx: usize, now_ms: u64) {
        let Some(choice) = self.visible_choices().get(idx) else {
            return;
        };
        match choice.action {
            StoryAction::Start => self.start_adventure(now_ms),
            StoryAction::GoTo(target) => self.go_to_page(target, now_ms),
            StoryAction::Restart => self.restart(),
        }
    }

    /// Feed one key press: secret-sequence tracking plus the quick-select
    /// and hotkey mappings. `key` and `code` are the DOM event fields.
    pub fn handle_key(&mut self, key: &str, code: &str, now_ms: u64) {
        if self.sequence.feed(code) {
            self.activate_easter_egg();
        }
        match quick_action(key, self.visible_choices().len()) {
            Some(QuickAction::Choice(idx)) => self.activate_choice(idx, now_ms),
            Some(QuickAction::Restart) => self.restart(),
            Some(QuickAction::ToggleAudio) => self.toggle_audio(),
            None => {}
        }
    }

    /// Apply every presentation cue due at or before `now_ms`.
    pub fn advance_time(&mut self, now_ms: u64) {
        for cue in self.timeline.drain_due(now_ms) {
            self.apply_cue(cue, now_ms);
        }
    }

    /// Serialize the session record for inspection. Debug-only surface;
    /// not part of the stable interface.
    #[must_use]
    pub fn debug_snapshot(&self) -> serde_json::Value {
        serde_json::to_value(&self.state).unwrap_or_default()
    }

    /// Unlock every panel ending at once. Debug-only surface.
    pub fn unlock_all_endings(&mut self) {
        for panel in PanelId::ALL {
            if panel.is_ending() {
                self.state.unlocked_endings.insert(EndingId::from(panel));
            }
        }
        log::info!("all endings unlocked for testing");
    }

    fn transition_to(&mut self, panel: PanelId, now_ms: u64) {
        let from = self.state.current_page.clone();
        self.play(Effect::Transition);
        self.state.record_choice(format!("Went to {panel}"));
        let to = CurrentPage::Panel(panel);
        self.state.current_page = to.clone();
        self.state.step_progress(TRANSITION_PROGRESS_STEP);
        if panel.is_ending() {
            self.unlock_ending(EndingId::from(panel));
        }

        let variant = self.variants.pick();
        self.swap_pending = true;
        self.timeline
            .post(now_ms, StageCue::BeginLeave { from: from.clone() });
        self.timeline.post(
            now_ms + PAGE_SWAP_DELAY_MS,
            StageCue::Swap {
                from,
                to: to.clone(),
                variant,
            },
        );
        self.timeline.post(
            now_ms + PAGE_SWAP_DELAY_MS + TRANSITION_CLEAR_MS,
            StageCue::ClearTransition { on: to },
        );
    }

    fn synthesize_ending(&mut self, requested: &str) {
        let content = ScriptedEnding::resolve(requested).content();
        best_effort(self.stage.render_synthesized_ending(&content));
        best_effort(self.stage.announce(content.title));
        self.state.current_page = CurrentPage::Synthesized(EndingId::new(requested));
        self.unlock_ending(EndingId::new(requested));
    }

    /// Idempotent: the cue, the celebration, and the unlock log fire only
    /// on the first visit; the progress floor applies every time.
    fn unlock_ending(&mut self, id: EndingId) {
        if self.state.unlock_ending(id.clone()) {
            self.play(Effect::Success);
            best_effort(self.stage.celebrate());
            log::info!(
                "new ending unlocked: {id} ({} discovered)",
                self.state.unlocked_endings.len()
            );
        }
        self.state.advance_progress(PROGRESS_MAX);
    }

    fn activate_easter_egg(&mut self) {
        if self.state.easter_egg_found {
            return;
        }
        self.state.easter_egg_found = true;
        self.play(Effect::Success);
        best_effort(self.stage.flourish());
        best_effort(self.stage.acknowledge(EASTER_EGG_MESSAGE));
        best_effort(self.stage.highlight_all_panels());
    }

    fn apply_cue(&mut self, cue: StageCue, now_ms: u64) {
        match cue {
            StageCue::BeginLeave { from } => {
                best_effort(self.stage.set_leaving(&from));
            }
            StageCue::Swap { from, to, variant } => {
                self.swap_pending = false;
                best_effort(self.stage.swap_visible(&from, &to, variant));
                if let Some(panel) = to.panel() {
                    best_effort(self.stage.announce(script::script_for(panel).title));
                }
                best_effort(self.stage.sparkle());
            }
            StageCue::ClearTransition { on } => {
                best_effort(self.stage.clear_transition(&on));
            }
            StageCue::FollowUp { target } => {
                let requested = target.id().to_string();
                self.go_to_page(&requested, now_ms);
            }
        }
    }

    fn play(&mut self, effect: Effect) {
        if self.state.audio_enabled {
            self.effects.play(effect);
        }
    }

}

/// Presentation failures never propagate; log and move on.
fn best_effort(result: Result<(), StageError>) {
    if let Err(err) = result {
        log::warn!("presentation operation skipped: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EndingContent;
    use crate::timeline::TransitionVariant;

    #[derive(Default)]
    struct RecordingStage {
        events: Vec<String>,
    }

    impl RecordingStage {
        fn count(&self, prefix: &str) -> usize {
            self.events.iter().filter(|e| e.starts_with(prefix)).count()
        }
    }

    impl Stage for RecordingStage {
        fn set_leaving(&mut self, page: &CurrentPage) -> Result<(), StageError> {
            self.events.push(format!("leave:{page}"));
            Ok(())
        }

        fn swap_visible(
            &mut self,
            from: &CurrentPage,
            to: &CurrentPage,
            variant: TransitionVariant,
        ) -> Result<(), StageError> {
            self.events
                .push(format!("swap:{from}->{to}:{}", variant.class_name()));
            Ok(())
        }

        fn clear_transition(&mut self, page: &CurrentPage) -> Result<(), StageError> {
            self.events.push(format!("clear:{page}"));
            Ok(())
        }

        fn show_only_start(&mut self) -> Result<(), StageError> {
            self.events.push("reset".to_string());
            Ok(())
        }

        fn render_synthesized_ending(&mut self, content: &EndingContent) -> Result<(), StageError> {
            self.events.push(format!("synth:{}", content.title));
            Ok(())
        }

        fn celebrate(&mut self) -> Result<(), StageError> {
            self.events.push("celebrate".to_string());
            Ok(())
        }

        fn sparkle(&mut self) -> Result<(), StageError> {
            self.events.push("sparkle".to_string());
            Ok(())
        }

        fn set_audio_indicator(&mut self, enabled: bool) -> Result<(), StageError> {
            self.events.push(format!("audio-indicator:{enabled}"));
            Ok(())
        }

        fn set_character_theme(&mut self, character: Option<Character>) -> Result<(), StageError> {
            let theme = character.map_or("none", Character::as_str);
            self.events.push(format!("theme:{theme}"));
            Ok(())
        }

        fn flourish(&mut self) -> Result<(), StageError> {
            self.events.push("flourish".to_string());
            Ok(())
        }

        fn acknowledge(&mut self, _message: &str) -> Result<(), StageError> {
            self.events.push("acknowledge".to_string());
            Ok(())
        }

        fn highlight_all_panels(&mut self) -> Result<(), StageError> {
            self.events.push("highlight".to_string());
            Ok(())
        }

        fn announce(&mut self, title: &str) -> Result<(), StageError> {
            self.events.push(format!("announce:{title}"));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingEffects {
        played: Vec<Effect>,
        ambient: Vec<&'static str>,
    }

    impl EffectPlayer for RecordingEffects {
        fn play(&mut self, effect: Effect) {
            self.played.push(effect);
        }

        fn resume_ambient(&mut self) {
            self.ambient.push("resume");
        }

        fn pause_ambient(&mut self) {
            self.ambient.push("pause");
        }
    }

    fn navigator() -> Navigator<RecordingStage, RecordingEffects> {
        Navigator::new(0xE11C, RecordingStage::default(), RecordingEffects::default())
    }

    #[test]
    fn state_moves_synchronously_while_visibility_follows_the_timeline() {
        let mut nav = navigator();
        nav.start_adventure(1_000);

        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::CharacterSelect)
        );
        assert_eq!(nav.state().progress, 35, "20 floor plus the 15 step");
        assert_eq!(nav.state().choice_log, vec!["Went to character-select"]);
        assert!(nav.stage().events.is_empty());

        nav.advance_time(1_000);
        assert_eq!(nav.stage().events, vec!["leave:start-screen"]);

        nav.advance_time(1_299);
        assert_eq!(nav.stage().events.len(), 1, "swap not due yet");

        nav.advance_time(1_300);
        assert!(
            nav.stage().events[1].starts_with("swap:start-screen->character-select:"),
            "{:?}",
            nav.stage().events
        );
        assert_eq!(nav.stage().events[2], "announce:Choose Your Hero");
        assert_eq!(nav.stage().events[3], "sparkle");

        nav.advance_time(2_100);
        assert_eq!(nav.stage().events[4], "clear:character-select");
    }

    #[test]
    fn rapid_second_transition_is_ignored_until_the_swap_lands() {
        let mut nav = navigator();
        nav.start_adventure(0);
        nav.go_to_page("forest-entrance", 10);
        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::CharacterSelect),
            "request during pending swap must be ignored"
        );

        nav.advance_time(300);
        nav.go_to_page("forest-entrance", 310);
        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::ForestEntrance)
        );
    }

    #[test]
    fn character_selection_defers_the_forest_transition() {
        let mut nav = navigator();
        nav.start_adventure(0);
        nav.advance_time(300);
        nav.select_character(Character::Mage, 400);

        assert_eq!(nav.state().character, Some(Character::Mage));
        assert_eq!(nav.state().progress, 40);
        assert!(
            nav.state()
                .choice_log
                .iter()
                .any(|entry| entry == "Selected mage")
        );
        assert!(nav.stage().events.contains(&"theme:mage".to_string()));
        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::CharacterSelect),
            "navigation waits for the follow-up delay"
        );

        nav.advance_time(900);
        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::ForestEntrance)
        );
        assert_eq!(nav.state().progress, 55);
    }

    #[test]
    fn unknown_target_synthesizes_an_ending_instead_of_failing() {
        let mut nav = navigator();
        nav.go_to_page("treasure-room", 0);

        assert_eq!(nav.state().current_page.id(), "treasure-room");
        assert!(nav.state().current_page.is_ending());
        assert_eq!(nav.state().progress, 100);
        assert!(
            nav.state()
                .unlocked_endings
                .contains(&EndingId::new("treasure-room"))
        );
        assert!(
            nav.stage()
                .events
                .contains(&"synth:The Treasure Hunter".to_string())
        );
        assert_eq!(nav.effects_mut().played, vec![Effect::Success]);
        assert!(
            nav.state().choice_log.is_empty(),
            "synthesized endings do not log a navigation entry"
        );

        // Quick-select sees the synthesized restart button.
        assert_eq!(nav.visible_choices(), script::RESTART_ONLY);
    }

    #[test]
    fn ending_unlock_is_idempotent() {
        let mut nav = navigator();
        nav.go_to_page("examine-shrine", 0);
        nav.advance_time(2_000);
        assert_eq!(nav.stage().count("celebrate"), 1);
        assert_eq!(nav.state().unlocked_endings.len(), 1);

        nav.go_to_page("examine-shrine", 3_000);
        nav.advance_time(5_000);
        assert_eq!(nav.stage().count("celebrate"), 1, "no repeat celebration");
        assert_eq!(nav.state().unlocked_endings.len(), 1);
        assert_eq!(nav.state().progress, 100);
    }

    #[test]
    fn restart_preserves_endings_audio_and_easter_egg_only() {
        let mut nav = navigator();
        nav.go_to_page("wisdom-reward", 0);
        nav.advance_time(2_000);
        nav.toggle_audio();
        nav.with_state_mut(|state| state.easter_egg_found = true);

        nav.restart();
        let state = nav.state();
        assert_eq!(state.current_page, CurrentPage::Panel(PanelId::StartScreen));
        assert_eq!(state.character, None);
        assert!(state.choice_log.is_empty());
        assert_eq!(state.progress, 0);
        assert!(
            state
                .unlocked_endings
                .contains(&EndingId::new("wisdom-reward"))
        );
        assert!(!state.audio_enabled);
        assert!(state.easter_egg_found);
        assert!(nav.stage().events.contains(&"theme:none".to_string()));
        assert!(nav.stage().events.contains(&"reset".to_string()));
        assert_eq!(nav.next_due(), None, "restart drops pending cues");
    }

    #[test]
    fn muted_sessions_emit_no_cues() {
        let mut nav = navigator();
        nav.toggle_audio();
        assert_eq!(nav.effects_mut().ambient, vec!["pause"]);
        assert!(nav.effects_mut().played.is_empty(), "no cue on mute");

        nav.go_to_page("forest-entrance", 0);
        assert!(nav.effects_mut().played.is_empty());

        nav.toggle_audio();
        assert_eq!(nav.effects_mut().played, vec![Effect::Toggle]);
        assert_eq!(nav.effects_mut().ambient, vec!["pause", "resume"]);
    }

    #[test]
    fn quick_select_addresses_visible_choices_positionally() {
        let mut nav = navigator();
        nav.with_state_mut(|state| {
            state.current_page = CurrentPage::Panel(PanelId::ForestEntrance);
        });

        nav.handle_key("9", "Digit9", 0);
        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::ForestEntrance),
            "digit past the visible list does nothing"
        );

        nav.handle_key("2", "Digit2", 0);
        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::ExamineShrine)
        );
    }

    #[test]
    fn hotkeys_restart_and_toggle() {
        let mut nav = navigator();
        nav.go_to_page("forest-entrance", 0);
        nav.handle_key("R", "KeyR", 50);
        assert_eq!(
            nav.state().current_page,
            CurrentPage::Panel(PanelId::StartScreen)
        );

        nav.handle_key("m", "KeyM", 60);
        assert!(!nav.state().audio_enabled);
    }

    #[test]
    fn easter_egg_fires_exactly_once() {
        let mut nav = navigator();
        for _ in 0..2 {
            for code in crate::input::SECRET_SEQUENCE {
                nav.handle_key("", code, 0);
            }
        }
        assert!(nav.state().easter_egg_found);
        assert_eq!(nav.stage().count("flourish"), 1);
        assert_eq!(nav.stage().count("acknowledge"), 1);
        assert_eq!(nav.stage().count("highlight"), 1);
    }

    #[test]
    fn debug_surface_dumps_state_and_unlocks_everything() {
        let mut nav = navigator();
        nav.unlock_all_endings();
        assert_eq!(nav.state().unlocked_endings.len(), 8);
        let snapshot = nav.debug_snapshot();
        assert_eq!(snapshot["current_page"], "start-screen");
        assert_eq!(snapshot["progress"], 0);
    }
}
