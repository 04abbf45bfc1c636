// Character state machine

use glam::Vec2;

use crate::core::math::axis_sign;
use crate::engine::physics::PhysicsBody;
use crate::game::controls::ControlEvent;

use super::action::{
    ActionEnv, ActionKind, ActionOutcome, ActionStep, ActiveAction, AttackAction, DodgeAction,
    JumpAction, Tick,
};
use super::animation::{AnimatorParam, Animator};
use super::attack::{AttackKind, ComboStage};
use super::config::CharacterConfig;
use super::profile::{CharacterProfile, PlayerProfile};

/// Horizontal facing of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left
    pub fn sign(&self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Coarse state derived from the character flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Walking or running on ground
    Moving,
    /// In the air during a jump
    Jumping,
    Dodging,
    Attacking,
}

impl MovementState {
    /// On the ground with no action in flight
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Idle | Self::Moving)
    }

    /// Whether an action currently owns the body
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Jumping | Self::Dodging | Self::Attacking)
    }

    /// Whether a new dodge, jump or attack may begin from this state
    pub fn can_start_action(&self) -> bool {
        !self.is_action()
    }
}

/// Mutable run-time state of one character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    /// Latest movement input
    pub move_input: Vec2,
    pub facing: Facing,
    pub is_running: bool,
    pub is_grounded: bool,
    pub is_dodging: bool,
    pub is_attacking: bool,
    /// Last combo stage played, `None` once the combo has reset
    pub combo: Option<ComboStage>,
    pub last_attack_time: f32,
    pub last_dodge_time: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            move_input: Vec2::ZERO,
            facing: Facing::Right,
            is_running: false,
            is_grounded: true,
            is_dodging: false,
            is_attacking: false,
            combo: None,
            last_attack_time: f32::NEG_INFINITY,
            last_dodge_time: f32::NEG_INFINITY,
        }
    }
}

impl CharacterState {
    /// Combo counter (0 when no combo is running, otherwise 1..=3)
    pub fn combo_index(&self) -> u8 {
        self.combo.map_or(0, |stage| stage.index())
    }

    pub fn movement_state(&self) -> MovementState {
        if self.is_dodging {
            MovementState::Dodging
        } else if self.is_attacking {
            MovementState::Attacking
        } else if !self.is_grounded {
            MovementState::Jumping
        } else if self.move_input != Vec2::ZERO {
            MovementState::Moving
        } else {
            MovementState::Idle
        }
    }
}

/// Arbitrates between normal movement and the timed actions of one character.
///
/// Input arrives through the `on_*` entry points, which only validate and
/// record intent. The fixed tick applies ground velocity and advances motion;
/// the display tick lets actions observe the animator.
#[derive(Debug)]
pub struct CharacterStateMachine {
    config: CharacterConfig,
    profile: Box<dyn CharacterProfile>,
    state: CharacterState,
    action: Option<ActiveAction>,
    current_state: MovementState,
    previous_state: MovementState,
    state_time: f32,
    /// Simulation time, advanced by fixed ticks
    clock: f32,
}

impl CharacterStateMachine {
    pub fn new(config: CharacterConfig) -> Self {
        Self::with_profile(config, PlayerProfile::default())
    }

    pub fn with_profile(config: CharacterConfig, profile: impl CharacterProfile + 'static) -> Self {
        Self {
            config,
            profile: Box::new(profile),
            state: CharacterState::default(),
            action: None,
            current_state: MovementState::Idle,
            previous_state: MovementState::Idle,
            state_time: 0.0,
            clock: 0.0,
        }
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Current coarse state
    pub fn movement_state(&self) -> MovementState {
        self.state.movement_state()
    }

    /// State observed before the last transition seen by a tick
    pub fn previous_state(&self) -> MovementState {
        self.previous_state
    }

    /// Time spent in the current state, as of the last fixed tick
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Check if state just changed on the last fixed tick
    pub fn state_just_changed(&self) -> bool {
        self.state_time == 0.0
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn active_action(&self) -> Option<&ActiveAction> {
        self.action.as_ref()
    }

    fn is_busy(&self) -> bool {
        self.action.is_some()
            || self.state.is_dodging
            || self.state.is_attacking
            || !self.state.is_grounded
    }

    /// Dispatch an input event to its entry point. Returns whether it was accepted.
    pub fn handle_event(&mut self, event: ControlEvent) -> bool {
        match event {
            ControlEvent::Move(input) => {
                self.on_move(input);
                true
            }
            ControlEvent::Run(pressed) => {
                self.on_run(pressed);
                true
            }
            ControlEvent::Dodge => self.on_dodge(),
            ControlEvent::Jump => self.on_jump(),
            ControlEvent::Attack(kind) => self.on_attack(kind),
        }
    }

    pub fn on_move(&mut self, input: Vec2) {
        self.state.move_input = input;

        if input != Vec2::ZERO && !self.state.is_attacking {
            if let Some(sign) = axis_sign(input.x, 0.0) {
                self.state.facing = Facing::from_sign(sign);
            }
        }
    }

    pub fn on_run(&mut self, pressed: bool) {
        self.state.is_running = pressed;
    }

    pub fn on_dodge(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        if self.clock - self.state.last_dodge_time < self.config.dodge_cooldown {
            log::debug!("Dodge rejected: cooling down");
            return false;
        }

        let direction = self.profile.dodge_direction(self.state.facing);
        self.state.is_dodging = true;
        self.state.last_dodge_time = self.clock;
        self.begin(ActiveAction::Dodge(DodgeAction::new(direction)));
        true
    }

    pub fn on_jump(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }

        self.state.is_grounded = false;
        let jump = JumpAction::new(self.state.move_input, &self.config);
        self.begin(ActiveAction::Jump(jump));
        true
    }

    pub fn on_attack(&mut self, kind: AttackKind) -> bool {
        if self.state.is_running || self.is_busy() {
            return false;
        }

        if self.clock - self.state.last_attack_time > self.config.combo_reset_time {
            self.state.combo = None;
        }
        let stage = ComboStage::next(self.state.combo);
        self.state.combo = Some(stage);

        let trigger = self.profile.attack_trigger(kind, stage);
        self.state.is_attacking = true;
        self.begin(ActiveAction::Attack(AttackAction::new(trigger)));
        true
    }

    fn begin(&mut self, action: ActiveAction) {
        log::debug!(
            "{:?} started ({})",
            action.kind(),
            action.animation().state_name()
        );
        self.action = Some(action);
    }

    /// Fixed-rate simulation tick
    pub fn fixed_update<B: PhysicsBody, A: Animator>(
        &mut self,
        dt: f32,
        body: &mut B,
        animator: &mut A,
    ) {
        self.clock += dt;
        self.apply_facing(body);

        if self.state.is_dodging {
            // The dodge owns velocity; only mirror it to the animator
            animator.set_float(AnimatorParam::Speed.name(), body.velocity().length());
        } else if !self.state.is_grounded || self.state.is_attacking {
            // The running action owns the body
        } else {
            let speed = self.config.ground_speed(self.state.is_running);
            let velocity = self.state.move_input * speed;
            body.set_velocity(velocity);
            animator.set_float(AnimatorParam::Speed.name(), velocity.length());
        }

        animator.set_bool(AnimatorParam::Grounded.name(), self.state.is_grounded);
        animator.set_bool(AnimatorParam::Running.name(), self.state.is_running);

        self.advance_action(Tick::Fixed, dt, body, animator);
        self.track_state(dt);
    }

    /// Display-rate animation tick
    pub fn frame_update<B: PhysicsBody, A: Animator>(
        &mut self,
        dt: f32,
        body: &mut B,
        animator: &mut A,
    ) {
        self.advance_action(Tick::Frame, dt, body, animator);
    }

    /// End the in-flight action immediately with the same repair a natural
    /// finish performs. Input never does this; owners use it for resets.
    pub fn force_end(&mut self, body: &mut impl PhysicsBody) {
        if let Some(action) = self.action.take() {
            action.cancel(body);
            self.finish(action.kind(), ActionOutcome::Cancelled);
        }
    }

    fn advance_action<B: PhysicsBody, A: Animator>(
        &mut self,
        tick: Tick,
        dt: f32,
        body: &mut B,
        animator: &mut A,
    ) {
        let Some(action) = self.action.as_mut() else {
            return;
        };

        let mut env = ActionEnv {
            config: &self.config,
            running: self.state.is_running,
            body,
            animator,
        };

        if let ActionStep::Finished(outcome) = action.advance(tick, dt, &mut env) {
            let kind = action.kind();
            self.action = None;
            self.finish(kind, outcome);
        }
    }

    fn finish(&mut self, kind: ActionKind, outcome: ActionOutcome) {
        match kind {
            ActionKind::Dodge => self.state.is_dodging = false,
            ActionKind::Jump => self.state.is_grounded = true,
            ActionKind::Attack => {
                self.state.is_attacking = false;
                self.state.last_attack_time = self.clock;
            }
        }

        match outcome {
            ActionOutcome::TimedOut => {
                log::warn!("{:?} gave up waiting for its animation to start", kind)
            }
            _ => log::debug!("{:?} finished: {:?}", kind, outcome),
        }
    }

    fn apply_facing(&self, body: &mut impl PhysicsBody) {
        let scale = body.scale();
        let flipped = scale.x.abs() * self.state.facing.sign();
        if flipped != scale.x {
            body.set_scale(Vec2::new(flipped, scale.y));
        }
    }

    fn track_state(&mut self, dt: f32) {
        let state = self.state.movement_state();
        if state != self.current_state {
            log::debug!("State {:?} -> {:?}", self.current_state, state);
            self.previous_state = self.current_state;
            self.current_state = state;
            self.state_time = 0.0;
        } else {
            self.state_time += dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::animation::{AnimationPlayer, AnimationKey};
    use crate::game::characters::profile::ComboEscalation;
    use crate::game::characters::testing::{Rig, TestBody, DT};
    use approx::assert_abs_diff_eq;

    fn scenario_config() -> CharacterConfig {
        CharacterConfig {
            walk_speed: 0.8,
            run_speed: 1.5,
            ..CharacterConfig::default()
        }
    }

    /// Finish an attack and leave the combo window open
    fn attack_and_recover(rig: &mut Rig, kind: AttackKind) -> u8 {
        assert!(rig.machine.on_attack(kind));
        let index = rig.machine.state().combo_index();
        rig.run_until(120, |m| !m.state().is_attacking)
            .expect("attack finishes");
        index
    }

    #[test]
    fn test_initial_state() {
        let sm = CharacterStateMachine::new(CharacterConfig::default());
        assert_eq!(sm.movement_state(), MovementState::Idle);
        assert!(sm.state().is_grounded);
        assert_eq!(sm.state().combo_index(), 0);
        assert_eq!(sm.state().facing, Facing::Right);
        assert!(sm.active_action().is_none());
    }

    #[test]
    fn test_walk_then_run_velocity() {
        let mut sm = CharacterStateMachine::new(scenario_config());
        let mut body = TestBody::new();
        let mut animator = AnimationPlayer::with_standard_animations();

        sm.on_move(Vec2::new(1.0, 0.0));
        sm.fixed_update(DT, &mut body, &mut animator);
        assert_eq!(body.velocity, Vec2::new(0.8, 0.0));
        assert_eq!(animator.get_float("Speed"), Some(0.8));

        sm.on_run(true);
        sm.fixed_update(DT, &mut body, &mut animator);
        assert_eq!(body.velocity, Vec2::new(1.5, 0.0));
        assert_eq!(animator.get_bool("Running"), Some(true));
    }

    #[test]
    fn test_ground_movement_uses_both_axes() {
        let mut rig = Rig::new(scenario_config());
        rig.machine.on_move(Vec2::new(0.0, -1.0));
        rig.tick();
        assert_eq!(rig.body.velocity, Vec2::new(0.0, -0.8));
        assert_eq!(rig.machine.movement_state(), MovementState::Moving);
    }

    #[test]
    fn test_facing_follows_horizontal_input() {
        let mut rig = Rig::new(CharacterConfig::default());

        rig.machine.on_move(Vec2::new(-0.5, 0.2));
        assert_eq!(rig.machine.state().facing, Facing::Left);
        rig.tick();
        assert_eq!(rig.body.scale, Vec2::new(-1.0, 1.0));

        // Purely vertical input keeps the previous facing
        rig.machine.on_move(Vec2::new(0.0, 1.0));
        assert_eq!(rig.machine.state().facing, Facing::Left);

        rig.machine.on_move(Vec2::new(1.0, 0.0));
        rig.tick();
        assert_eq!(rig.body.scale, Vec2::ONE);
    }

    #[test]
    fn test_facing_locked_while_attacking() {
        let mut rig = Rig::new(CharacterConfig::default());
        assert!(rig.machine.on_attack(AttackKind::Punch));

        rig.machine.on_move(Vec2::new(-1.0, 0.0));
        assert_eq!(rig.machine.state().facing, Facing::Right);
        assert_eq!(rig.machine.state().move_input, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_dodge_is_idempotent() {
        let mut rig = Rig::new(CharacterConfig::default());
        assert!(rig.machine.on_dodge());
        let before = rig.machine.state().clone();

        assert!(!rig.machine.on_dodge());
        assert_eq!(rig.machine.state(), &before);
        assert_eq!(
            rig.machine.active_action().map(|a| a.kind()),
            Some(ActionKind::Dodge)
        );
    }

    #[test]
    fn test_dodge_backsteps_and_lands() {
        let mut rig = Rig::new(CharacterConfig::default());
        rig.body.position = Vec2::new(3.0, 2.0);
        assert!(rig.machine.on_dodge());

        let mut peak: f32 = 2.0;
        let mut ticks = 0;
        while rig.machine.state().is_dodging && ticks < 200 {
            rig.tick();
            peak = peak.max(rig.body.position.y);
            ticks += 1;
        }

        assert!(!rig.machine.state().is_dodging);
        assert!(rig.machine.state().is_grounded);
        assert_eq!(rig.body.velocity, Vec2::ZERO);
        assert_abs_diff_eq!(rig.body.position.y, 2.0, epsilon = 0.01);
        // Facing right, so the dodge goes left by roughly the dodge distance
        assert_abs_diff_eq!(rig.body.position.x, 3.0 - 1.2, epsilon = 0.05);
        assert_abs_diff_eq!(peak, 2.0 + 0.25, epsilon = 0.02);
    }

    #[test]
    fn test_dodge_direction_opposes_facing() {
        let mut rig = Rig::new(CharacterConfig::default());
        rig.machine.on_move(Vec2::new(-1.0, 0.0));
        rig.machine.on_move(Vec2::ZERO);
        assert!(rig.machine.on_dodge());
        rig.run_until(200, |m| !m.state().is_dodging)
            .expect("dodge finishes");
        assert!(rig.body.position.x > 1.0);
    }

    #[test]
    fn test_dodge_cooldown() {
        let config = CharacterConfig {
            dodge_cooldown: 2.0,
            ..CharacterConfig::default()
        };
        let mut rig = Rig::new(config);
        assert!(rig.machine.on_dodge());
        rig.run_until(200, |m| !m.state().is_dodging)
            .expect("dodge finishes");

        assert!(!rig.machine.on_dodge());
        rig.run_until(200, |m| m.clock() > 2.05)
            .expect("clock advances");
        assert!(rig.machine.on_dodge());
    }

    #[test]
    fn test_dodge_rejected_while_airborne_or_attacking() {
        let mut rig = Rig::new(CharacterConfig::default());
        assert!(rig.machine.on_jump());
        assert!(!rig.machine.on_dodge());

        let mut rig = Rig::new(CharacterConfig::default());
        assert!(rig.machine.on_attack(AttackKind::Kick));
        assert!(!rig.machine.on_dodge());
        assert!(!rig.machine.state().is_dodging);
    }

    #[test]
    fn test_dodge_times_out_without_animation() {
        let config = CharacterConfig {
            max_animation_wait: 0.1,
            ..CharacterConfig::default()
        };
        let machine = CharacterStateMachine::new(config);
        let mut rig = Rig::with_parts(machine, AnimationPlayer::new());
        rig.body.position = Vec2::new(0.0, 1.0);

        assert!(rig.machine.on_dodge());
        let ticks = rig
            .run_until(60, |m| !m.state().is_dodging)
            .expect("bounded wait ends the dodge");

        assert!(ticks <= 12);
        assert_eq!(rig.body.velocity, Vec2::ZERO);
        assert_eq!(rig.body.position, Vec2::new(0.0, 1.0));
        assert!(rig.machine.active_action().is_none());
    }

    #[test]
    fn test_dodge_missing_clip_uses_default_length() {
        let mut animator = AnimationPlayer::new();
        animator.add_trigger_transition(AnimationKey::Dodge);
        let machine = CharacterStateMachine::new(CharacterConfig::default());
        let mut rig = Rig::with_parts(machine, animator);

        assert!(rig.machine.on_dodge());
        let ticks = rig
            .run_until(200, |m| !m.state().is_dodging)
            .expect("dodge finishes");

        // One second of motion plus the start and settle ticks
        assert!((60..=64).contains(&ticks), "took {ticks} ticks");
        assert_abs_diff_eq!(rig.body.position.x, -1.2, epsilon = 0.05);
    }

    #[test]
    fn test_jump_scenario() {
        let config = CharacterConfig {
            jump_total_time: 0.3,
            jump_force: 1.0,
            ..CharacterConfig::default()
        };
        let mut rig = Rig::new(config);
        assert!(rig.machine.on_jump());
        assert!(!rig.machine.state().is_grounded);
        assert_eq!(rig.machine.movement_state(), MovementState::Jumping);

        let mut peak: f32 = 0.0;
        let mut ticks = 0;
        while !rig.machine.state().is_grounded && ticks < 100 {
            rig.tick();
            peak = peak.max(rig.body.position.y);
            ticks += 1;
        }

        assert!(rig.machine.state().is_grounded);
        assert!((19..=21).contains(&ticks), "took {ticks} ticks");
        assert!(ticks as f32 * DT >= 0.3);
        assert_abs_diff_eq!(peak, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(rig.body.position.y, 0.0, epsilon = 0.01);
        assert_eq!(rig.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_jump_carries_move_direction() {
        let config = CharacterConfig {
            jump_total_time: 0.3,
            ..scenario_config()
        };
        let mut rig = Rig::new(config);
        rig.machine.on_move(Vec2::new(1.0, 0.0));
        assert!(rig.machine.on_jump());

        rig.run_until(100, |m| m.state().is_grounded)
            .expect("jump lands");
        // 0.8 units/s for the 0.3s arc
        assert_abs_diff_eq!(rig.body.position.x, 0.24, epsilon = 0.03);
        assert_eq!(rig.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_jump_rejected_while_airborne() {
        let mut rig = Rig::new(CharacterConfig::default());
        assert!(rig.machine.on_jump());
        rig.ticks(3);
        assert!(!rig.machine.on_jump());
        assert!(!rig.machine.on_attack(AttackKind::Punch));
    }

    #[test]
    fn test_attack_locks_movement() {
        let mut rig = Rig::new(scenario_config());
        assert!(rig.machine.on_attack(AttackKind::Punch));
        rig.machine.on_move(Vec2::new(1.0, 0.0));

        for _ in 0..10 {
            rig.tick();
            assert_eq!(rig.body.velocity, Vec2::ZERO);
        }
        assert_eq!(rig.machine.movement_state(), MovementState::Attacking);
    }

    #[test]
    fn test_dodge_ignores_walk_path() {
        let mut rig = Rig::new(scenario_config());
        assert!(rig.machine.on_dodge());
        rig.machine.on_move(Vec2::new(1.0, 0.0));

        rig.ticks(5);
        assert!(rig.machine.state().is_dodging);
        assert!(rig.body.velocity.x < 0.0);
        assert_eq!(rig.body.velocity.y, 0.0);
    }

    #[test]
    fn test_airborne_ignores_walk_path() {
        let mut rig = Rig::new(scenario_config());
        assert!(rig.machine.on_jump());
        rig.tick();
        rig.machine.on_move(Vec2::new(1.0, 0.0));

        for _ in 0..5 {
            rig.tick();
            assert!(!rig.machine.state().is_grounded);
            assert_eq!(rig.body.velocity.x, 0.0);
        }

        rig.run_until(100, |m| m.state().is_grounded)
            .expect("jump lands");
        // The jump keeps the direction it started with
        assert_eq!(rig.body.position.x, 0.0);
        assert_abs_diff_eq!(rig.body.position.y, 0.0, epsilon = 0.01);
        assert_eq!(rig.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_attack_sequence() {
        let mut rig = Rig::new(CharacterConfig::default());
        assert!(rig.machine.on_attack(AttackKind::Punch));
        assert!(rig.machine.state().is_attacking);

        rig.tick();
        assert_eq!(rig.animator.current_animation(), "Punch1");

        // Punch1 lasts 0.4s
        let ticks = rig
            .run_until(120, |m| !m.state().is_attacking)
            .expect("attack finishes");
        assert!((23..=27).contains(&ticks), "took {ticks} ticks");
        assert_abs_diff_eq!(
            rig.machine.state().last_attack_time,
            rig.machine.clock(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_attack_rejected_while_running() {
        let mut rig = Rig::new(CharacterConfig::default());
        rig.machine.on_run(true);
        assert!(!rig.machine.on_attack(AttackKind::Kick));
        assert_eq!(rig.machine.state().combo_index(), 0);
    }

    #[test]
    fn test_attack_rejected_while_dodging() {
        let mut rig = Rig::new(CharacterConfig::default());
        assert!(rig.machine.on_dodge());
        assert!(!rig.machine.on_attack(AttackKind::Punch));
        assert!(!rig.machine.state().is_attacking);
    }

    #[test]
    fn test_combo_cycles() {
        let mut rig = Rig::new(CharacterConfig::default());
        let indices: Vec<u8> = (0..4)
            .map(|_| attack_and_recover(&mut rig, AttackKind::Punch))
            .collect();
        assert_eq!(indices, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_combo_resets_after_window() {
        let mut rig = Rig::new(CharacterConfig::default());
        assert_eq!(attack_and_recover(&mut rig, AttackKind::Kick), 1);
        assert_eq!(attack_and_recover(&mut rig, AttackKind::Kick), 2);

        // Combo window is 1.0s
        rig.ticks(70);
        assert_eq!(attack_and_recover(&mut rig, AttackKind::Kick), 1);
    }

    #[test]
    fn test_first_stage_animation_by_default() {
        let mut rig = Rig::new(CharacterConfig::default());
        attack_and_recover(&mut rig, AttackKind::Punch);

        assert!(rig.machine.on_attack(AttackKind::Punch));
        assert_eq!(rig.machine.state().combo_index(), 2);
        rig.tick();
        assert_eq!(rig.animator.current_animation(), "Punch1");
    }

    #[test]
    fn test_follow_combo_profile() {
        let machine = CharacterStateMachine::with_profile(
            CharacterConfig::default(),
            PlayerProfile::new(ComboEscalation::FollowCombo),
        );
        let mut rig = Rig::with_parts(machine, AnimationPlayer::with_standard_animations());
        attack_and_recover(&mut rig, AttackKind::Kick);

        assert!(rig.machine.on_attack(AttackKind::Kick));
        rig.tick();
        assert_eq!(rig.animator.current_animation(), "Kick2");
    }

    #[test]
    fn test_force_end_mid_jump() {
        let mut rig = Rig::new(CharacterConfig::default());
        rig.machine.on_move(Vec2::new(1.0, 0.0));
        assert!(rig.machine.on_jump());
        rig.ticks(10);
        assert!(rig.body.position.y > 0.1);

        rig.machine.force_end(&mut rig.body);
        assert!(rig.machine.state().is_grounded);
        assert!(rig.machine.active_action().is_none());
        assert_eq!(rig.body.position.y, 0.0);
        assert_eq!(rig.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_handle_event_dispatch() {
        let mut sm = CharacterStateMachine::new(CharacterConfig::default());
        assert!(sm.handle_event(ControlEvent::Move(Vec2::new(-1.0, 0.0))));
        assert_eq!(sm.state().facing, Facing::Left);
        assert!(sm.handle_event(ControlEvent::Run(true)));
        assert!(sm.state().is_running);
        // Running blocks attacks
        assert!(!sm.handle_event(ControlEvent::Attack(AttackKind::Punch)));
        assert!(sm.handle_event(ControlEvent::Jump));
        assert!(!sm.handle_event(ControlEvent::Dodge));
    }

    #[test]
    fn test_state_tracking() {
        let mut rig = Rig::new(CharacterConfig::default());
        rig.tick();
        assert_eq!(rig.machine.state_time(), DT);

        rig.machine.on_move(Vec2::new(1.0, 0.0));
        rig.tick();
        assert!(rig.machine.state_just_changed());
        assert_eq!(rig.machine.previous_state(), MovementState::Idle);

        rig.tick();
        assert!(!rig.machine.state_just_changed());
    }

    #[test]
    fn test_movement_state_helpers() {
        assert!(MovementState::Idle.is_grounded());
        assert!(MovementState::Moving.is_grounded());
        assert!(!MovementState::Jumping.is_grounded());
        // The dodge hop leaves the ground and attacks own the body
        assert!(!MovementState::Dodging.is_grounded());
        assert!(!MovementState::Attacking.is_grounded());
        assert!(MovementState::Moving.can_start_action());
        assert!(!MovementState::Attacking.can_start_action());
    }

    #[test]
    fn test_facing_sign() {
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::from_sign(-0.3), Facing::Left);
        assert_eq!(Facing::from_sign(2.0), Facing::Right);
    }
}
