// Character entity and management

use glam::Vec2;

use crate::engine::input::{InputManager, PlayerInput};
use crate::engine::physics::{
    presets, BodyView, ColliderHandle, PhysicsBody, PhysicsWorld, RigidBodyHandle,
};
use crate::game::controls::{ControlEvent, ControlTranslator};

use super::animation::AnimationPlayer;
use super::config::{CharacterConfig, ConfigError};
use super::state::{CharacterStateMachine, MovementState};

/// Unique identifier for a character
pub type CharacterId = u32;

/// Collider footprint of a brawler
const CHARACTER_WIDTH: f32 = 0.6;
const CHARACTER_HEIGHT: f32 = 1.8;

/// A controlled brawler: controller, animation and physics body
#[derive(Debug)]
pub struct Character {
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,
    /// Player index controlling this character, or None for scripted characters
    pub player_index: Option<usize>,

    // Physics
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    /// Visual scale; x carries the facing flip
    pub scale: Vec2,

    pub controller: CharacterStateMachine,
    pub animation: AnimationPlayer,
    controls: ControlTranslator,
}

impl Character {
    /// Create a new character and add its body to the physics world
    pub fn new(
        id: CharacterId,
        name: &str,
        player_index: Option<usize>,
        controller: CharacterStateMachine,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
    ) -> Self {
        let body_handle = physics.add_rigid_body(presets::character_body(spawn.x, spawn.y));
        let collider = presets::character_collider(CHARACTER_WIDTH, CHARACTER_HEIGHT);
        let collider_handle = physics.add_collider(collider, body_handle);

        Self {
            id,
            name: name.to_string(),
            player_index,
            body_handle,
            collider_handle,
            scale: Vec2::ONE,
            controller,
            animation: AnimationPlayer::with_standard_animations(),
            controls: ControlTranslator::new(),
        }
    }

    /// Forward a control event to the controller
    pub fn handle_event(&mut self, event: ControlEvent) -> bool {
        let accepted = self.controller.handle_event(event);
        if !accepted {
            log::trace!("{} ignored {:?}", self.name, event);
        }
        accepted
    }

    /// Translate this frame's player input into control events
    pub fn apply_input(&mut self, input: &PlayerInput) {
        for event in self.controls.collect(input) {
            self.handle_event(event);
        }
    }

    /// Simulation tick, before the physics step
    pub fn fixed_update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            log::warn!("{} has no rigid body", self.name);
            return;
        };
        let mut view = BodyView::new(body, &mut self.scale);
        self.controller
            .fixed_update(dt, &mut view, &mut self.animation);
    }

    /// Display tick: advance animation, then let actions observe it
    pub fn frame_update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        self.animation.update(dt);

        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            return;
        };
        let mut view = BodyView::new(body, &mut self.scale);
        self.controller
            .frame_update(dt, &mut view, &mut self.animation);
    }

    /// Get character's current position
    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let pos = body.translation();
            Vec2::new(pos.x, pos.y)
        })
    }

    /// Get character's current velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let vel = body.linvel();
            Vec2::new(vel.x, vel.y)
        })
    }

    pub fn movement_state(&self) -> MovementState {
        self.controller.movement_state()
    }

    /// End any action in flight and move the character to `position`
    pub fn respawn(&mut self, physics: &mut PhysicsWorld, position: Vec2) {
        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            return;
        };
        let mut view = BodyView::new(body, &mut self.scale);
        self.controller.force_end(&mut view);
        view.set_position(position);
        view.set_velocity(Vec2::ZERO);
        log::info!("{} respawned at ({:.2}, {:.2})", self.name, position.x, position.y);
    }
}

/// Manages all characters in the game
#[derive(Debug, Default)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a new character, rejecting invalid tunables
    pub fn spawn(
        &mut self,
        name: &str,
        player_index: Option<usize>,
        config: CharacterConfig,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
    ) -> Result<CharacterId, ConfigError> {
        config.validate()?;
        Ok(self.spawn_with(name, player_index, CharacterStateMachine::new(config), physics, spawn))
    }

    /// Spawn a character around an already built controller
    pub fn spawn_with(
        &mut self,
        name: &str,
        player_index: Option<usize>,
        controller: CharacterStateMachine,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
    ) -> CharacterId {
        let id = self.next_id;
        self.next_id += 1;

        let character = Character::new(id, name, player_index, controller, physics, spawn);
        log::info!("Spawned {} (id {})", character.name, id);
        self.characters.push(character);
        id
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn get_by_player_mut(&mut self, player_index: usize) -> Option<&mut Character> {
        self.characters
            .iter_mut()
            .find(|c| c.player_index == Some(player_index))
    }

    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    /// Send an event to the character controlled by `player_index`
    pub fn dispatch(&mut self, player_index: usize, event: ControlEvent) -> bool {
        self.get_by_player_mut(player_index)
            .is_some_and(|character| character.handle_event(event))
    }

    /// Feed each player-controlled character its player's input
    pub fn apply_input(&mut self, input: &InputManager) {
        for character in &mut self.characters {
            let Some(player) = character.player_index.and_then(|index| input.player(index)) else {
                continue;
            };
            character.apply_input(player);
        }
    }

    /// Run one simulation tick for every character, then step physics
    pub fn fixed_update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        for character in &mut self.characters {
            character.fixed_update(physics, dt);
        }
        physics.step();
    }

    /// Run one display tick for every character
    pub fn frame_update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        for character in &mut self.characters {
            character.frame_update(physics, dt);
        }
    }

    /// Respawn every character whose horizontal position left `[-half_width, half_width]`.
    /// Returns how many were reset.
    pub fn respawn_out_of_bounds(
        &mut self,
        physics: &mut PhysicsWorld,
        half_width: f32,
        spawn: Vec2,
    ) -> usize {
        let mut reset = 0;
        for character in &mut self.characters {
            let outside = character
                .position(physics)
                .is_some_and(|position| position.x.abs() > half_width);
            if outside {
                character.respawn(physics, spawn);
                reset += 1;
            }
        }
        reset
    }

    /// Remove a character and its body
    pub fn remove(&mut self, id: CharacterId, physics: &mut PhysicsWorld) -> Option<Character> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        let character = self.characters.remove(pos);
        physics.remove_rigid_body(character.body_handle);
        Some(character)
    }

    pub fn count(&self) -> usize {
        self.characters.len()
    }
}
