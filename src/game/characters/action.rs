// Timed action sequences: dodge, jump and attack
//
// Each action is a small phase machine advanced by the two ticks that drive a
// character: the fixed simulation tick moves the body, the display tick polls
// the animator. An action never blocks; it returns `Continue` until it has
// restored the character to a consistent grounded pose.

use glam::Vec2;

use crate::core::math::drifted;
use crate::engine::physics::PhysicsBody;

use super::animation::{AnimationKey, Animator};
use super::arc::MotionArc;
use super::attack::AttackTrigger;
use super::config::CharacterConfig;
use super::sync::{AnimationSync, AnimationWait, WaitStatus};

/// Vertical drift tolerated before a landing snaps back to the start height
pub const SNAP_EPSILON: f32 = 0.01;

/// Which scheduler tick is advancing an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Fixed-rate simulation tick
    Fixed,
    /// Display-rate animation tick
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Dodge,
    Jump,
    Attack,
}

/// How an action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// Its animation never started within the configured wait
    TimedOut,
    /// Ended early by the owner
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStep {
    Continue,
    Finished(ActionOutcome),
}

/// Collaborators and inputs an action may touch while advancing
pub struct ActionEnv<'a, B: PhysicsBody, A: Animator> {
    pub config: &'a CharacterConfig,
    /// Run modifier at the time of the tick
    pub running: bool,
    pub body: &'a mut B,
    pub animator: &'a mut A,
}

/// Stop the body and put it back on the ground line it left from
fn settle(body: &mut impl PhysicsBody, ground_y: f32) {
    body.set_velocity(Vec2::ZERO);
    let position = body.position();
    if drifted(position.y, ground_y, SNAP_EPSILON) {
        body.set_position(Vec2::new(position.x, ground_y));
    }
}

/// Keep horizontal motion to the physics step and place the body on the arc
fn follow_arc(body: &mut impl PhysicsBody, velocity_x: f32, origin_y: f32, height: f32) {
    body.set_velocity(Vec2::new(velocity_x, 0.0));
    let position = body.position();
    body.set_position(Vec2::new(position.x, origin_y + height));
}

#[derive(Debug, Clone, PartialEq)]
enum DodgePhase {
    Start,
    /// One fixed tick for the animator to pick up the trigger
    Settle,
    AwaitAnimation(AnimationWait),
    Moving {
        arc: MotionArc,
        velocity_x: f32,
        elapsed: f32,
    },
}

/// Short hop opposite to the facing direction, timed to the dodge clip
#[derive(Debug, Clone, PartialEq)]
pub struct DodgeAction {
    direction: f32,
    origin: Vec2,
    phase: DodgePhase,
}

impl DodgeAction {
    /// `direction` is the horizontal sign of the hop
    pub fn new(direction: f32) -> Self {
        Self {
            direction,
            origin: Vec2::ZERO,
            phase: DodgePhase::Start,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    fn advance<B: PhysicsBody, A: Animator>(
        &mut self,
        tick: Tick,
        dt: f32,
        env: &mut ActionEnv<'_, B, A>,
    ) -> ActionStep {
        let mut next = None;
        let step = match (&mut self.phase, tick) {
            (DodgePhase::Start, Tick::Fixed) => {
                env.body.set_velocity(Vec2::ZERO);
                self.origin = env.body.position();
                if let Some(trigger) = AnimationKey::Dodge.trigger_name() {
                    env.animator.set_trigger(trigger);
                }
                next = Some(DodgePhase::Settle);
                ActionStep::Continue
            }
            (DodgePhase::Settle, Tick::Fixed) => {
                next = Some(DodgePhase::AwaitAnimation(AnimationSync::wait_for_start(
                    AnimationKey::Dodge,
                    env.config.max_animation_wait,
                )));
                ActionStep::Continue
            }
            (DodgePhase::AwaitAnimation(wait), Tick::Frame) => match wait.poll(&*env.animator, dt) {
                WaitStatus::Pending => ActionStep::Continue,
                WaitStatus::Started => {
                    let duration = AnimationSync::clip_length(&*env.animator, AnimationKey::Dodge);
                    next = Some(DodgePhase::Moving {
                        arc: MotionArc::new(duration, env.config.dodge_height),
                        velocity_x: self.direction * env.config.dodge_distance / duration,
                        elapsed: 0.0,
                    });
                    ActionStep::Continue
                }
                WaitStatus::TimedOut => {
                    settle(env.body, self.origin.y);
                    ActionStep::Finished(ActionOutcome::TimedOut)
                }
            },
            (
                DodgePhase::Moving {
                    arc,
                    velocity_x,
                    elapsed,
                },
                Tick::Fixed,
            ) => {
                if arc.is_complete(*elapsed) {
                    settle(env.body, self.origin.y);
                    ActionStep::Finished(ActionOutcome::Completed)
                } else {
                    follow_arc(env.body, *velocity_x, self.origin.y, arc.height_at(*elapsed));
                    *elapsed += dt;
                    ActionStep::Continue
                }
            }
            _ => ActionStep::Continue,
        };

        if let Some(phase) = next {
            self.phase = phase;
        }
        step
    }

    fn elapsed(&self) -> f32 {
        match &self.phase {
            DodgePhase::Moving { elapsed, .. } => *elapsed,
            _ => 0.0,
        }
    }

    fn has_started(&self) -> bool {
        self.phase != DodgePhase::Start
    }
}

/// Arc jump carrying the current move direction
#[derive(Debug, Clone, PartialEq)]
pub struct JumpAction {
    direction: Vec2,
    arc: MotionArc,
    origin: Option<Vec2>,
    elapsed: f32,
}

impl JumpAction {
    /// Jump along `move_input` (normalized; zero input jumps in place)
    pub fn new(move_input: Vec2, config: &CharacterConfig) -> Self {
        Self {
            direction: move_input.normalize_or_zero(),
            arc: MotionArc::new(config.jump_total_time, config.jump_force),
            origin: None,
            elapsed: 0.0,
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    fn advance<B: PhysicsBody, A: Animator>(
        &mut self,
        tick: Tick,
        dt: f32,
        env: &mut ActionEnv<'_, B, A>,
    ) -> ActionStep {
        if tick != Tick::Fixed {
            return ActionStep::Continue;
        }

        let origin = match self.origin {
            Some(origin) => origin,
            None => {
                let origin = env.body.position();
                if let Some(trigger) = AnimationKey::Jump.trigger_name() {
                    env.animator.set_trigger(trigger);
                }
                self.origin = Some(origin);
                origin
            }
        };

        if self.arc.is_complete(self.elapsed) {
            settle(env.body, origin.y);
            return ActionStep::Finished(ActionOutcome::Completed);
        }

        let speed = env.config.ground_speed(env.running);
        follow_arc(
            env.body,
            self.direction.x * speed,
            origin.y,
            self.arc.height_at(self.elapsed),
        );
        self.elapsed += dt;
        ActionStep::Continue
    }
}

#[derive(Debug, Clone, PartialEq)]
enum AttackPhase {
    Start,
    AwaitAnimation(AnimationWait),
    /// Locked until the attack clip has played out
    Recover { remaining: f32, elapsed: f32 },
}

/// Stationary melee swing locked to its animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AttackAction {
    trigger: AttackTrigger,
    phase: AttackPhase,
}

impl AttackAction {
    pub fn new(trigger: AttackTrigger) -> Self {
        Self {
            trigger,
            phase: AttackPhase::Start,
        }
    }

    pub fn trigger(&self) -> AttackTrigger {
        self.trigger
    }

    fn advance<B: PhysicsBody, A: Animator>(
        &mut self,
        tick: Tick,
        dt: f32,
        env: &mut ActionEnv<'_, B, A>,
    ) -> ActionStep {
        let key = AnimationKey::Attack(self.trigger);
        let mut next = None;
        let step = match (&mut self.phase, tick) {
            (AttackPhase::Start, Tick::Fixed) => {
                env.body.set_velocity(Vec2::ZERO);
                env.animator.set_trigger(self.trigger.name());
                next = Some(AttackPhase::AwaitAnimation(AnimationSync::wait_for_start(
                    key,
                    env.config.max_animation_wait,
                )));
                ActionStep::Continue
            }
            (AttackPhase::AwaitAnimation(wait), Tick::Frame) => match wait.poll(&*env.animator, dt) {
                WaitStatus::Pending => ActionStep::Continue,
                WaitStatus::Started => {
                    next = Some(AttackPhase::Recover {
                        remaining: AnimationSync::clip_length(&*env.animator, key),
                        elapsed: 0.0,
                    });
                    ActionStep::Continue
                }
                WaitStatus::TimedOut => {
                    env.body.set_velocity(Vec2::ZERO);
                    ActionStep::Finished(ActionOutcome::TimedOut)
                }
            },
            (AttackPhase::Recover { remaining, elapsed }, Tick::Frame) => {
                *remaining -= dt;
                *elapsed += dt;
                if *remaining <= 0.0 {
                    ActionStep::Finished(ActionOutcome::Completed)
                } else {
                    ActionStep::Continue
                }
            }
            _ => ActionStep::Continue,
        };

        if let Some(phase) = next {
            self.phase = phase;
        }
        step
    }

    fn elapsed(&self) -> f32 {
        match &self.phase {
            AttackPhase::Recover { elapsed, .. } => *elapsed,
            _ => 0.0,
        }
    }
}

/// The single in-flight action of a character
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveAction {
    Dodge(DodgeAction),
    Jump(JumpAction),
    Attack(AttackAction),
}

impl ActiveAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Dodge(_) => ActionKind::Dodge,
            Self::Jump(_) => ActionKind::Jump,
            Self::Attack(_) => ActionKind::Attack,
        }
    }

    /// Animation the action is synchronized to
    pub fn animation(&self) -> AnimationKey {
        match self {
            Self::Dodge(_) => AnimationKey::Dodge,
            Self::Jump(_) => AnimationKey::Jump,
            Self::Attack(attack) => AnimationKey::Attack(attack.trigger),
        }
    }

    /// Seconds spent in the timed part of the action
    pub fn elapsed(&self) -> f32 {
        match self {
            Self::Dodge(dodge) => dodge.elapsed(),
            Self::Jump(jump) => jump.elapsed,
            Self::Attack(attack) => attack.elapsed(),
        }
    }

    /// Body position when the action took effect, once it has
    pub fn origin(&self) -> Option<Vec2> {
        match self {
            Self::Dodge(dodge) if dodge.has_started() => Some(dodge.origin),
            Self::Dodge(_) => None,
            Self::Jump(jump) => jump.origin,
            Self::Attack(_) => None,
        }
    }

    pub fn advance<B: PhysicsBody, A: Animator>(
        &mut self,
        tick: Tick,
        dt: f32,
        env: &mut ActionEnv<'_, B, A>,
    ) -> ActionStep {
        match self {
            Self::Dodge(dodge) => dodge.advance(tick, dt, env),
            Self::Jump(jump) => jump.advance(tick, dt, env),
            Self::Attack(attack) => attack.advance(tick, dt, env),
        }
    }

    /// End the action now, leaving the body as a natural finish would
    pub fn cancel(&self, body: &mut impl PhysicsBody) {
        match self.origin() {
            Some(origin) => settle(body, origin.y),
            None => body.set_velocity(Vec2::ZERO),
        }
    }
}
