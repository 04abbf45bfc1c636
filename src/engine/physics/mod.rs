// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyView, PhysicsBody};
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};
