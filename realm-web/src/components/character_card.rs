use realm_game::Character;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub character: Character,
    pub name: AttrValue,
    pub blurb: AttrValue,
    #[prop_or_default]
    pub on_select: Callback<Character>,
}

#[function_component(CharacterCard)]
pub fn character_card(p: &Props) -> Html {
    let character = p.character;
    let on_select = p.on_select.clone();
    let onclick = Callback::from(move |_| on_select.emit(character));
    html! {
        <button class={classes!("character-card", character.theme_class())} {onclick}>
            <h3 class="card-name">{ p.name.clone() }</h3>
            <p class="card-blurb">{ p.blurb.clone() }</p>
        </button>
    }
}
