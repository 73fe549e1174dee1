pub mod controls;
pub mod crop_interaction;
mod helpers;
pub mod menu_bar;
pub mod status;
pub mod viewport;
