// Character animation system

use std::collections::HashMap;

use super::attack::AttackTrigger;

/// Animation states the controller knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Idle,
    Walk,
    Run,
    Jump,
    Dodge,
    Attack(AttackTrigger),
}

impl AnimationKey {
    /// Name of the animator state (and clip) for this key
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walk => "Walk",
            Self::Run => "Run",
            Self::Jump => "Jump",
            Self::Dodge => "Unarmed_Dodge",
            Self::Attack(trigger) => trigger.name(),
        }
    }

    /// Trigger that enters this state, if it is entered by a trigger
    pub fn trigger_name(&self) -> Option<&'static str> {
        match self {
            Self::Jump => Some("Jump"),
            Self::Dodge => Some("Dodge"),
            Self::Attack(trigger) => Some(trigger.name()),
            Self::Idle | Self::Walk | Self::Run => None,
        }
    }
}

/// Animator parameters written by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatorParam {
    /// Float: current velocity magnitude
    Speed,
    /// Bool: character is on the ground
    Grounded,
    /// Bool: run modifier held
    Running,
}

impl AnimatorParam {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::Grounded => "Grounded",
            Self::Running => "Running",
        }
    }
}

/// Animation playback capability consumed by the controller
pub trait Animator {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_trigger(&mut self, name: &str);
    /// Whether `state` is the visually active state right now
    fn is_state_active(&self, state: &str) -> bool;
    /// Available clips as (name, duration in seconds)
    fn clips(&self) -> Vec<(&str, f32)>;
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "Idle", "Punch1")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

const LOCOMOTION_STATES: [AnimationKey; 4] = [
    AnimationKey::Idle,
    AnimationKey::Walk,
    AnimationKey::Run,
    AnimationKey::Jump,
];

/// Speed below which locomotion falls back to idle
const IDLE_SPEED: f32 = 0.01;

/// Plays character clips and resolves animator parameters into states.
///
/// Triggers are queued by the controller and consumed on the next
/// [`AnimationPlayer::update`], so a triggered state becomes active one
/// display frame after the trigger is set. One-shot states return to
/// locomotion (idle/walk/run/jump, picked from the parameters) once their
/// clip finishes.
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Trigger name -> state it enters
    transitions: HashMap<String, String>,
    /// Triggers set since the last update
    pending_triggers: Vec<String>,
    floats: HashMap<String, f32>,
    bools: HashMap<String, bool>,
    /// Currently playing animation name
    current_animation: String,
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    playing: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            transitions: HashMap::new(),
            pending_triggers: Vec::new(),
            floats: HashMap::new(),
            bools: HashMap::new(),
            current_animation: AnimationKey::Idle.state_name().to_string(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
        }
    }

    /// Create an animation player with the unarmed brawler clip set
    pub fn with_standard_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("Idle", 8, 10.0));
        player.add_animation(AnimationClip::looping("Walk", 8, 12.0));
        player.add_animation(AnimationClip::looping("Run", 8, 16.0));
        player.add_animation(AnimationClip::looping("Jump", 6, 10.0));
        // 0.6s backstep
        player.add_animation(AnimationClip::one_shot("Unarmed_Dodge", 12, 20.0));

        for (trigger, frames) in AttackTrigger::all().into_iter().zip([8, 10, 12, 10, 12, 14]) {
            player.add_animation(AnimationClip::one_shot(trigger.name(), frames, 20.0));
        }

        for key in [AnimationKey::Jump, AnimationKey::Dodge] {
            player.add_trigger_transition(key);
        }
        for trigger in AttackTrigger::all() {
            player.add_trigger_transition(AnimationKey::Attack(trigger));
        }

        player.play(AnimationKey::Idle.state_name());
        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Make `trigger` enter `state` on the next update
    pub fn add_transition(&mut self, trigger: &str, state: &str) {
        self.transitions
            .insert(trigger.to_string(), state.to_string());
    }

    /// Register the trigger transition for a triggered key
    pub fn add_trigger_transition(&mut self, key: AnimationKey) {
        if let Some(trigger) = key.trigger_name() {
            self.add_transition(trigger, key.state_name());
        }
    }

    /// Play an animation by name
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.play_from_start(name);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) {
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Advance playback by one display frame
    pub fn update(&mut self, dt: f32) {
        if let Some(state) = self.take_triggered_state() {
            self.play_from_start(&state);
            return;
        }

        self.advance_frames(dt);

        if self.is_finished() || self.in_locomotion() {
            let next = self.locomotion_state().state_name();
            self.play(next);
        }
    }

    fn take_triggered_state(&mut self) -> Option<String> {
        let triggers = std::mem::take(&mut self.pending_triggers);
        let mut entered = None;
        for trigger in triggers {
            match self.transitions.get(&trigger) {
                Some(state) if entered.is_none() => entered = Some(state.clone()),
                Some(_) => {}
                None => log::debug!("Animator trigger '{}' has no transition", trigger),
            }
        }
        entered
    }

    fn advance_frames(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count.saturating_sub(1);
                    self.playing = false;
                    break;
                }
            }
        }
    }

    fn in_locomotion(&self) -> bool {
        LOCOMOTION_STATES
            .iter()
            .any(|key| key.state_name() == self.current_animation)
    }

    /// Locomotion state implied by the current parameters
    pub fn locomotion_state(&self) -> AnimationKey {
        if !self.get_bool(AnimatorParam::Grounded.name()).unwrap_or(true) {
            return AnimationKey::Jump;
        }

        let speed = self.get_float(AnimatorParam::Speed.name()).unwrap_or(0.0);
        if speed < IDLE_SPEED {
            AnimationKey::Idle
        } else if self.get_bool(AnimatorParam::Running.name()).unwrap_or(false) {
            AnimationKey::Run
        } else {
            AnimationKey::Walk
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Triggers waiting for the next update
    pub fn pending_triggers(&self) -> &[String] {
        &self.pending_triggers
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current animation has finished (for non-looping animations)
    pub fn is_finished(&self) -> bool {
        if let Some(clip) = self.animations.get(&self.current_animation) {
            !clip.looping
                && self.current_frame >= clip.frame_count.saturating_sub(1)
                && !self.playing
        } else {
            // A state without a clip holds until the next trigger
            false
        }
    }
}

impl Animator for AnimationPlayer {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn set_trigger(&mut self, name: &str) {
        if !self.pending_triggers.iter().any(|t| t == name) {
            self.pending_triggers.push(name.to_string());
        }
    }

    fn is_state_active(&self, state: &str) -> bool {
        self.current_animation == state
    }

    fn clips(&self) -> Vec<(&str, f32)> {
        self.animations
            .values()
            .map(|clip| (clip.name.as_str(), clip.total_duration()))
            .collect()
    }
}
