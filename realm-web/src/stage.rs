//! DOM presentation surface: class toggling on the fixed panel deck plus
//! the decorative layers (sparkles, celebration bursts, particles).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use realm_game::rng::{SPARKLE_STREAM, derive_stream_seed};
use realm_game::{
    Character, CurrentPage, EndingContent, Stage, StageError, TransitionVariant, script,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::a11y;
use crate::dom;

const ACTIVE_CONTENT_SELECTOR: &str = ".story-page.active .story-content";
const SPARKLE_COUNT: usize = 5;
const SPARKLE_LIFETIME_MS: i32 = 1_500;
const CELEBRATION_COUNT: usize = 20;
const CELEBRATION_LIFETIME_MS: i32 = 2_000;
const CELEBRATION_GLYPHS: [&str; 4] = ["✨", "🌟", "💫", "⭐"];
const PARTICLE_COUNT: usize = 50;
const FLOURISH_MS: i32 = 2_000;

fn js_backend(err: JsValue) -> StageError {
    StageError::Backend(dom::js_error_message(&err))
}

/// Stage implementation over the real document.
///
/// Panels are `.story-page` sections addressed by id; exactly one carries
/// the `active` class at a time. Sparkle placement draws from a seeded
/// stream so a replayed session decorates identically.
pub struct DomStage {
    sparkle_rng: SmallRng,
}

impl DomStage {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            sparkle_rng: SmallRng::seed_from_u64(derive_stream_seed(seed, SPARKLE_STREAM)),
        }
    }

    fn panel(&self, id: &str) -> Result<Element, StageError> {
        dom::element_by_id(id).ok_or_else(|| StageError::MissingElement(id.to_string()))
    }

    fn active_content() -> Result<Element, StageError> {
        dom::document()
            .query_selector(ACTIVE_CONTENT_SELECTOR)
            .ok()
            .flatten()
            .ok_or_else(|| StageError::MissingElement(ACTIVE_CONTENT_SELECTOR.to_string()))
    }

    fn pct(&mut self) -> f64 {
        self.sparkle_rng.random_range(0.0..100.0)
    }
}

impl Stage for DomStage {
    fn set_leaving(&mut self, page: &CurrentPage) -> Result<(), StageError> {
        self.panel(page.id())?
            .class_list()
            .add_1("loading")
            .map_err(js_backend)
    }

    fn swap_visible(
        &mut self,
        from: &CurrentPage,
        to: &CurrentPage,
        variant: TransitionVariant,
    ) -> Result<(), StageError> {
        self.panel(from.id())?
            .class_list()
            .remove_2("active", "loading")
            .map_err(js_backend)?;
        self.panel(to.id())?
            .class_list()
            .add_2("active", variant.class_name())
            .map_err(js_backend)
    }

    fn clear_transition(&mut self, page: &CurrentPage) -> Result<(), StageError> {
        self.panel(page.id())?
            .class_list()
            .remove_3("slide-left", "slide-right", "zoom")
            .map_err(js_backend)
    }

    fn show_only_start(&mut self) -> Result<(), StageError> {
        for panel in dom::query_all(".story-page") {
            panel
                .class_list()
                .remove_2("active", "loading")
                .map_err(js_backend)?;
            panel
                .class_list()
                .remove_3("slide-left", "slide-right", "zoom")
                .map_err(js_backend)?;
        }
        self.panel("start-screen")?
            .class_list()
            .add_1("active")
            .map_err(js_backend)
    }

    fn render_synthesized_ending(&mut self, content: &EndingContent) -> Result<(), StageError> {
        let host = dom::document()
            .query_selector(".story-page.active")
            .ok()
            .flatten()
            .ok_or_else(|| StageError::MissingElement(".story-page.active".to_string()))?;
        host.set_inner_html(&format!(
            r#"<div class="story-content">
                <h2 class="page-title">{title}</h2>
                <div class="story-text">
                    <p>{text}</p>
                    <div class="ending-badge">{badge}</div>
                </div>
                <div class="choices">
                    <button class="choice-btn primary" data-action="restart">
                        <span class="btn-text">{restart_label}</span>
                        <span class="btn-glow"></span>
                    </button>
                </div>
            </div>"#,
            title = content.title,
            text = content.text,
            badge = content.badge,
            restart_label = script::RESTART_ONLY[0].label,
        ));
        host.class_list().add_1("ending").map_err(js_backend)
    }

    fn celebrate(&mut self) -> Result<(), StageError> {
        let content = Self::active_content()?;
        let document = dom::document();
        let mut spawned = Vec::with_capacity(CELEBRATION_COUNT);
        for idx in 0..CELEBRATION_COUNT {
            let glyph_idx = self.sparkle_rng.random_range(0..CELEBRATION_GLYPHS.len());
            let float = document.create_element("div").map_err(js_backend)?;
            float.set_class_name("celebration-float");
            float.set_text_content(Some(CELEBRATION_GLYPHS[glyph_idx]));
            float
                .set_attribute(
                    "style",
                    &format!(
                        "left:{:.2}%;top:{:.2}%;animation-delay:{:.2}s",
                        self.pct(),
                        self.pct(),
                        idx as f64 * 0.1,
                    ),
                )
                .map_err(js_backend)?;
            content.append_child(&float).map_err(js_backend)?;
            spawned.push(float);
        }
        let lifetime =
            CELEBRATION_LIFETIME_MS + i32::try_from(CELEBRATION_COUNT).unwrap_or(0) * 100;
        spawn_local(async move {
            let _ = dom::sleep_ms(lifetime).await;
            for float in spawned {
                float.remove();
            }
        });
        Ok(())
    }

    fn sparkle(&mut self) -> Result<(), StageError> {
        let content = Self::active_content()?;
        for stale in dom::query_all(&format!("{ACTIVE_CONTENT_SELECTOR} .magic-sparkle")) {
            stale.remove();
        }
        let document = dom::document();
        let mut spawned = Vec::with_capacity(SPARKLE_COUNT);
        for _ in 0..SPARKLE_COUNT {
            let sparkle = document.create_element("div").map_err(js_backend)?;
            sparkle.set_class_name("magic-sparkle");
            sparkle
                .set_attribute(
                    "style",
                    &format!(
                        "left:{:.2}%;top:{:.2}%;animation-delay:{:.2}s",
                        self.pct(),
                        self.pct(),
                        self.sparkle_rng.random_range(0.0..1.0),
                    ),
                )
                .map_err(js_backend)?;
            content.append_child(&sparkle).map_err(js_backend)?;
            spawned.push(sparkle);
        }
        spawn_local(async move {
            let _ = dom::sleep_ms(SPARKLE_LIFETIME_MS).await;
            for sparkle in spawned {
                sparkle.remove();
            }
        });
        Ok(())
    }

    fn set_audio_indicator(&mut self, enabled: bool) -> Result<(), StageError> {
        let icon = dom::element_by_id("audio-icon")
            .ok_or_else(|| StageError::MissingElement("audio-icon".to_string()))?;
        icon.set_text_content(Some(if enabled { "🔊" } else { "🔇" }));
        Ok(())
    }

    fn set_character_theme(&mut self, character: Option<Character>) -> Result<(), StageError> {
        let body = dom::document()
            .body()
            .ok_or_else(|| StageError::MissingElement("body".to_string()))?;
        body.set_class_name(&character.map(Character::theme_class).unwrap_or_default());
        Ok(())
    }

    fn flourish(&mut self) -> Result<(), StageError> {
        let body = dom::document()
            .body()
            .ok_or_else(|| StageError::MissingElement("body".to_string()))?;
        body.set_attribute("style", "animation: rainbow 2s ease-in-out")
            .map_err(js_backend)?;
        spawn_local(async move {
            let _ = dom::sleep_ms(FLOURISH_MS).await;
            let _ = body.remove_attribute("style");
        });
        Ok(())
    }

    fn acknowledge(&mut self, message: &str) -> Result<(), StageError> {
        dom::window()
            .alert_with_message(message)
            .map_err(js_backend)
    }

    fn highlight_all_panels(&mut self) -> Result<(), StageError> {
        for content in dom::query_all(".story-content") {
            content
                .class_list()
                .add_1("golden-glow")
                .map_err(js_backend)?;
        }
        Ok(())
    }

    fn announce(&mut self, title: &str) -> Result<(), StageError> {
        a11y::announce_page(title);
        Ok(())
    }
}

/// Fill the fixed backdrop with drifting particles. Runs once at mount.
pub fn scatter_particles(seed: u64) {
    let Some(container) = dom::document()
        .query_selector(".particles")
        .ok()
        .flatten()
    else {
        log::warn!("particles container missing; backdrop skipped");
        return;
    };
    let mut rng = SmallRng::seed_from_u64(derive_stream_seed(seed, SPARKLE_STREAM));
    let document = dom::document();
    for _ in 0..PARTICLE_COUNT {
        let Ok(particle) = document.create_element("div") else {
            continue;
        };
        particle.set_class_name("magic-sparkle");
        let _ = particle.set_attribute(
            "style",
            &format!(
                "left:{:.2}%;top:{:.2}%;animation-delay:{:.2}s;animation-duration:{:.2}s",
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..3.0),
                rng.random_range(2.0..5.0),
            ),
        );
        let _ = container.append_child(&particle);
    }
}
