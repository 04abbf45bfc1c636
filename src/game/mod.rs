// Game layer: characters and their controls

pub mod characters;
pub mod controls;
