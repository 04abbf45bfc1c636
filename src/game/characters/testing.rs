// Deterministic test rig for controller tests

use glam::Vec2;

use crate::engine::physics::PhysicsBody;

use super::animation::AnimationPlayer;
use super::config::CharacterConfig;
use super::state::CharacterStateMachine;

pub const DT: f32 = 1.0 / 60.0;

/// In-memory body that integrates its velocity like a kinematic body
#[derive(Debug, Clone)]
pub struct TestBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub scale: Vec2,
}

impl TestBody {
    pub fn new() -> Self {
        Self::at(Vec2::ZERO)
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl PhysicsBody for TestBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }
}

/// A controller wired to a test body and a real animation player.
/// One `tick` runs a fixed step, the physics step and a display frame.
pub struct Rig {
    pub machine: CharacterStateMachine,
    pub body: TestBody,
    pub animator: AnimationPlayer,
}

impl Rig {
    pub fn new(config: CharacterConfig) -> Self {
        Self::with_parts(
            CharacterStateMachine::new(config),
            AnimationPlayer::with_standard_animations(),
        )
    }

    pub fn with_parts(machine: CharacterStateMachine, animator: AnimationPlayer) -> Self {
        Self {
            machine,
            body: TestBody::new(),
            animator,
        }
    }

    pub fn tick(&mut self) {
        self.machine
            .fixed_update(DT, &mut self.body, &mut self.animator);
        self.body.integrate(DT);
        self.animator.update(DT);
        self.machine
            .frame_update(DT, &mut self.body, &mut self.animator);
    }

    pub fn ticks(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Tick until `done` holds, returning how many ticks it took
    pub fn run_until(
        &mut self,
        max_ticks: usize,
        done: impl Fn(&CharacterStateMachine) -> bool,
    ) -> Option<usize> {
        for count in 1..=max_ticks {
            self.tick();
            if done(&self.machine) {
                return Some(count);
            }
        }
        None
    }
}
