pub mod cleanup;
pub mod heat_map;
pub mod layout;
pub mod legend;
pub mod popularity;
pub mod selection;
pub mod sessions;
pub mod view;
