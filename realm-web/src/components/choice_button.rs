use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    /// Position within the panel's choice list, document order.
    pub index: usize,
    #[prop_or_default]
    pub on_activate: Callback<usize>,
}

#[function_component(ChoiceButton)]
pub fn choice_button(p: &Props) -> Html {
    let index = p.index;
    let on_activate = p.on_activate.clone();
    let onclick = Callback::from(move |_| on_activate.emit(index));
    html! {
        <button class="choice-btn" {onclick}>
            <span class="btn-text">{ p.label.clone() }</span>
            <span class="btn-glow"></span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn choice_button_renders_label() {
        let props = Props {
            label: AttrValue::from("Follow the glowing path"),
            index: 0,
            on_activate: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ChoiceButton>::with_props(props).render());
        assert!(html.contains("Follow the glowing path"));
        assert!(html.contains("choice-btn"));
    }
}
