// Engine modules: game loop, physics, input

pub mod game_loop;
pub mod input;
pub mod physics;
