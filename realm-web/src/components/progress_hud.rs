use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// 0..=100.
    pub progress: u8,
    /// Chapter label for the current progress band.
    pub label: AttrValue,
    /// Distinct endings discovered this session.
    pub endings: usize,
}

#[function_component(ProgressHud)]
pub fn progress_hud(p: &Props) -> Html {
    html! {
        <div class="progress-hud">
            <div class="progress-bar">
                <div class="progress-fill" style={format!("width:{}%", p.progress)}></div>
            </div>
            <span class="progress-text">{ p.label.clone() }</span>
            <span class="endings-count">{ format!("Endings discovered: {}", p.endings) }</span>
        </div>
    }
}
