#![forbid(unsafe_code)]

pub mod a11y;
pub mod app;
pub mod audio;
pub mod components;
pub mod dom;
pub mod stage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    yew::Renderer::<app::App>::new().render();
}
