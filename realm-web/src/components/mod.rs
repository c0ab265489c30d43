pub mod character_card;
pub mod choice_button;
pub mod progress_hud;
