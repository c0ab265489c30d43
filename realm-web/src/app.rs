//! Application shell: mounts the panel deck, owns the navigator, and
//! bridges DOM events onto it.

use std::cell::RefCell;
use std::rc::Rc;

use realm_game::{Character, Navigator, PanelId, script};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::a11y;
use crate::audio::WebAudioEffects;
use crate::components::character_card::CharacterCard;
use crate::components::choice_button::ChoiceButton;
use crate::components::progress_hud::ProgressHud;
use crate::dom;
use crate::stage::{self, DomStage};

pub type WebNavigator = Navigator<DomStage, WebAudioEffects>;

type Session = Rc<RefCell<(u64, WebNavigator)>>;

/// User intent coming off the DOM event surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Activate the nth visible choice button.
    Choice(usize),
    Select(Character),
    Restart,
    ToggleAudio,
}

/// Apply every pending presentation cue, sleeping until each comes due.
fn pump(session: &Session, refresh: &Callback<()>) {
    let session = session.clone();
    let refresh = refresh.clone();
    spawn_local(async move {
        loop {
            let due = session.borrow().1.next_due();
            let Some(due) = due else { break };
            let now = dom::now_ms();
            if due > now {
                let _ = dom::sleep_ms(i32::try_from(due - now).unwrap_or(i32::MAX)).await;
            }
            session.borrow_mut().1.advance_time(dom::now_ms());
            refresh.emit(());
        }
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let session: Session = use_mut_ref(|| {
        let seed = dom::now_ms();
        (
            seed,
            Navigator::new(seed, DomStage::new(seed), WebAudioEffects::new()),
        )
    });
    let update = use_force_update();
    let refresh = Callback::from(move |()| update.force_update());

    let act = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |action: UiAction| {
            let now = dom::now_ms();
            {
                let mut guard = session.borrow_mut();
                let nav = &mut guard.1;
                match action {
                    UiAction::Choice(idx) => nav.activate_choice(idx, now),
                    UiAction::Select(character) => nav.select_character(character, now),
                    UiAction::Restart => nav.restart(),
                    UiAction::ToggleAudio => nav.toggle_audio(),
                }
            }
            pump(&session, &refresh);
            refresh.emit(());
        })
    };

    // Backdrop particles plus the document-level key surface, once.
    {
        let session = session.clone();
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            stage::scatter_particles(session.borrow().0);

            let keydown = {
                let session = session.clone();
                let refresh = refresh.clone();
                Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                    session
                        .borrow_mut()
                        .1
                        .handle_key(&event.key(), &event.code(), dom::now_ms());
                    pump(&session, &refresh);
                    refresh.emit(());
                })
            };
            let _ = dom::document()
                .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
            move || {
                let _ = dom::document().remove_event_listener_with_callback(
                    "keydown",
                    keydown.as_ref().unchecked_ref(),
                );
            }
        });
    }

    // Synthesized ending panels inject their restart button as plain
    // markup; a delegated listener on the deck picks it up.
    let on_deck_click = {
        let act = act.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if target
                .closest("[data-action='restart']")
                .ok()
                .flatten()
                .is_some()
            {
                act.emit(UiAction::Restart);
            }
        })
    };

    let (progress, label, endings) = {
        let guard = session.borrow();
        let nav = &guard.1;
        (
            nav.state().progress,
            nav.progress_stage().label(),
            nav.state().unlocked_endings.len(),
        )
    };

    let on_toggle = {
        let act = act.clone();
        Callback::from(move |_: MouseEvent| act.emit(UiAction::ToggleAudio))
    };

    html! {
        <>
            <style>{ a11y::visible_focus_css() }</style>
            <div class="background-overlay"></div>
            <div class="particles"></div>
            <audio id="ambient-sound" loop=true src="assets/audio/ambient.ogg"></audio>
            <div id="page-announcer" class="sr-only" aria-live="polite" aria-atomic="true"></div>
            <header class="hud">
                <ProgressHud {progress} label={label} {endings} />
                <button class="settings-btn" onclick={on_toggle} aria-label="Toggle audio">
                    <span id="audio-icon">{ "🔊" }</span>
                </button>
            </header>
            <main class="story-deck" onclick={on_deck_click}>
                <StoryDeck on_action={act} />
            </main>
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct DeckProps {
    #[prop_or_default]
    pub on_action: Callback<UiAction>,
}

/// The full fixed panel deck. Visibility is class-driven by the stage;
/// only the start panel begins `active`.
#[function_component(StoryDeck)]
pub fn story_deck(p: &DeckProps) -> Html {
    html! {
        <>
            { for PanelId::ALL.iter().map(|panel| render_panel(*panel, &p.on_action)) }
        </>
    }
}

fn render_panel(panel: PanelId, act: &Callback<UiAction>) -> Html {
    let page = script::script_for(panel);
    let classes = classes!(
        "story-page",
        panel.is_ending().then_some("ending"),
        (panel == PanelId::StartScreen).then_some("active"),
    );
    let body = if panel == PanelId::CharacterSelect {
        render_characters(act)
    } else {
        render_choices(panel, act)
    };
    html! {
        <section id={panel.as_str()} class={classes}>
            <div class="story-content">
                <h2 class="page-title">{ page.title }</h2>
                <div class="story-text">
                    <p>{ page.text }</p>
                    if let Some(badge) = page.badge {
                        <div class="ending-badge">{ badge }</div>
                    }
                </div>
                { body }
            </div>
        </section>
    }
}

fn render_choices(panel: PanelId, act: &Callback<UiAction>) -> Html {
    let on_activate = {
        let act = act.clone();
        Callback::from(move |idx: usize| act.emit(UiAction::Choice(idx)))
    };
    html! {
        <div class="choices">
            { for script::choices(panel).iter().enumerate().map(|(idx, choice)| html! {
                <ChoiceButton label={choice.label} index={idx} on_activate={on_activate.clone()} />
            }) }
        </div>
    }
}

fn render_characters(act: &Callback<UiAction>) -> Html {
    let on_select = {
        let act = act.clone();
        Callback::from(move |character: Character| act.emit(UiAction::Select(character)))
    };
    html! {
        <div class="character-grid">
            { for script::CHARACTERS.iter().map(|card| html! {
                <CharacterCard
                    character={card.character}
                    name={card.name}
                    blurb={card.blurb}
                    on_select={on_select.clone()}
                />
            }) }
        </div>
    }
}
