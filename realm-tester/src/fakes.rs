//! Recording doubles for the navigator's collaborator seams.

use realm_game::{
    Character, CurrentPage, Effect, EffectPlayer, EndingContent, Navigator, PanelId, Stage,
    StageError, TransitionVariant,
};

/// Mirrors what the DOM would show while recording every operation, so
/// scenarios can assert both the ordering and the final visible panel.
pub struct RecordingStage {
    pub visible: String,
    pub events: Vec<String>,
    pub celebrations: usize,
    pub rendered_titles: Vec<String>,
}

impl Default for RecordingStage {
    fn default() -> Self {
        Self {
            visible: PanelId::StartScreen.as_str().to_string(),
            events: Vec::new(),
            celebrations: 0,
            rendered_titles: Vec::new(),
        }
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
        self.visible = to.id().to_string();
        Ok(())
    }

    fn clear_transition(&mut self, page: &CurrentPage) -> Result<(), StageError> {
        self.events.push(format!("clear:{page}"));
        Ok(())
    }

    fn show_only_start(&mut self) -> Result<(), StageError> {
        self.events.push("reset".to_string());
        self.visible = PanelId::StartScreen.as_str().to_string();
        Ok(())
    }

    fn render_synthesized_ending(&mut self, content: &EndingContent) -> Result<(), StageError> {
        self.events.push(format!("synth:{}", content.title));
        self.rendered_titles.push(content.title.to_string());
        Ok(())
    }

    fn celebrate(&mut self) -> Result<(), StageError> {
        self.events.push("celebrate".to_string());
        self.celebrations += 1;
        Ok(())
    }

    fn sparkle(&mut self) -> Result<(), StageError> {
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
pub struct RecordingEffects {
    pub played: Vec<Effect>,
    pub ambient: Vec<&'static str>,
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

pub type TestNavigator = Navigator<RecordingStage, RecordingEffects>;

#[must_use]
pub fn navigator(seed: u64) -> TestNavigator {
    Navigator::new(seed, RecordingStage::default(), RecordingEffects::default())
}

/// Apply every pending presentation cue in due order, like the browser
/// clock eventually would.
pub fn settle(nav: &mut TestNavigator) {
    while let Some(due) = nav.next_due() {
        nav.advance_time(due);
    }
}
