//! Synthesized-ending determinism and restart preservation, observed
//! through the presentation seam.

use realm_game::{
    Character, CurrentPage, Effect, EffectPlayer, EndingContent, EndingId, Navigator, PanelId,
    SessionState, Stage, StageError, TransitionVariant,
};

#[derive(Default)]
struct ContentStage {
    rendered: Vec<(String, String)>,
}

impl Stage for ContentStage {
    fn set_leaving(&mut self, _page: &CurrentPage) -> Result<(), StageError> {
        Ok(())
    }

    fn swap_visible(
        &mut self,
        _from: &CurrentPage,
        _to: &CurrentPage,
        _variant: TransitionVariant,
    ) -> Result<(), StageError> {
        Ok(())
    }

    fn clear_transition(&mut self, _page: &CurrentPage) -> Result<(), StageError> {
        Ok(())
    }

    fn show_only_start(&mut self) -> Result<(), StageError> {
        Ok(())
    }

    fn render_synthesized_ending(&mut self, content: &EndingContent) -> Result<(), StageError> {
        self.rendered
            .push((content.title.to_string(), content.badge.to_string()));
        Ok(())
    }

    fn celebrate(&mut self) -> Result<(), StageError> {
        Ok(())
    }

    fn sparkle(&mut self) -> Result<(), StageError> {
        Ok(())
    }

    fn set_audio_indicator(&mut self, _enabled: bool) -> Result<(), StageError> {
        Ok(())
    }

    fn set_character_theme(&mut self, _character: Option<Character>) -> Result<(), StageError> {
        Ok(())
    }

    fn flourish(&mut self) -> Result<(), StageError> {
        Ok(())
    }

    fn acknowledge(&mut self, _message: &str) -> Result<(), StageError> {
        Ok(())
    }

    fn highlight_all_panels(&mut self) -> Result<(), StageError> {
        Ok(())
    }

    fn announce(&mut self, _title: &str) -> Result<(), StageError> {
        Ok(())
    }
}

struct SilentEffects;

impl EffectPlayer for SilentEffects {
    fn play(&mut self, _effect: Effect) {}
    fn resume_ambient(&mut self) {}
    fn pause_ambient(&mut self) {}
}

fn navigator() -> Navigator<ContentStage, SilentEffects> {
    Navigator::new(99, ContentStage::default(), SilentEffects)
}

#[test]
fn scripted_identifiers_render_their_table_entry() {
    let mut nav = navigator();
    nav.go_to_page("treasure-room", 0);

    let rendered = &nav.stage().rendered;
    assert_eq!(
        rendered.last(),
        Some(&(
            "The Treasure Hunter".to_string(),
            "💰 Treasure Ending Unlocked".to_string()
        ))
    );
}

#[test]
fn identifiers_outside_the_table_render_the_mystery_ending() {
    let mut nav = navigator();
    nav.go_to_page("sunken-library", 0);

    let rendered = &nav.stage().rendered;
    assert_eq!(
        rendered.last(),
        Some(&(
            "The Mysterious Path".to_string(),
            "❓ Mystery Ending Unlocked".to_string()
        ))
    );
    assert_eq!(nav.state().current_page.id(), "sunken-library");
    assert!(
        nav.state()
            .unlocked_endings
            .contains(&EndingId::new("sunken-library")),
        "the requested identifier is what unlocks"
    );
}

#[test]
fn restart_carries_endings_and_audio_preference_forward() {
    let mut state = SessionState::default();
    state.unlock_ending(EndingId::new("wisdom-reward"));
    state.audio_enabled = false;
    let mut nav = Navigator::from_state(state, 1, ContentStage::default(), SilentEffects);

    nav.go_to_page("magic-door", 0);
    nav.restart();

    let state = nav.state();
    assert_eq!(state.current_page, CurrentPage::Panel(PanelId::StartScreen));
    assert_eq!(state.character, None);
    assert!(state.choice_log.is_empty());
    assert_eq!(state.progress, 0);
    assert!(!state.audio_enabled);
    assert!(
        state.unlocked_endings.contains(&EndingId::new("wisdom-reward"))
            && state.unlocked_endings.contains(&EndingId::new("magic-door"))
    );
}
