// Input handling system
//
// Window events are mapped to per-player `Action` state:
//
// - `action`: game actions and default bindings
// - `config`: per-player and global bindings
// - `player`: pressed / just-pressed state for one player
// - `manager`: routes winit keyboard and mouse events to players
//
// The game layer reads `PlayerInput` once per frame and then calls
// `InputManager::end_frame`.

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use action::Action;
pub use manager::InputManager;
pub use player::PlayerInput;
