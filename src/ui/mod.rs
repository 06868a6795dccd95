pub mod main_screen;
pub mod mvi;
pub mod terminal;
