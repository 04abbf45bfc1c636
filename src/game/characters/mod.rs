// Character system
//
// - `state`: the controller arbitrating movement and actions
// - `action`: dodge, jump and attack phase machines
// - `arc` / `sync`: motion arcs and animation synchronization helpers
// - `animation`: animator capability and the frame-based player
// - `character`: character entities wired to physics

pub mod action;
pub mod animation;
pub mod arc;
pub mod attack;
pub mod character;
pub mod config;
pub mod profile;
pub mod state;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use character::CharacterManager;
pub use config::CharacterConfig;
pub use state::MovementState;
