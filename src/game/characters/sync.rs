// Aligning physics-driven motion with animation timing

use super::animation::{AnimationKey, Animator};

/// Clip length assumed when the animator has no clip for a key
pub const DEFAULT_CLIP_LENGTH: f32 = 1.0;

/// Result of polling an [`AnimationWait`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    Pending,
    Started,
    TimedOut,
}

/// Read-only queries against the animation playback collaborator
pub struct AnimationSync;

impl AnimationSync {
    /// Begin waiting for `key` to become the active animator state.
    /// The wait gives up after `max_wait` seconds of polling.
    pub fn wait_for_start(key: AnimationKey, max_wait: f32) -> AnimationWait {
        AnimationWait {
            key,
            waited: 0.0,
            max_wait,
        }
    }

    /// Authored duration of the clip for `key`, or [`DEFAULT_CLIP_LENGTH`]
    pub fn clip_length(animator: &impl Animator, key: AnimationKey) -> f32 {
        let name = key.state_name();
        match animator
            .clips()
            .into_iter()
            .find(|(clip, _)| *clip == name)
        {
            Some((_, duration)) if duration > 0.0 => duration,
            Some((_, duration)) => {
                log::warn!(
                    "Clip '{}' has non-positive length {}, using {}s",
                    name,
                    duration,
                    DEFAULT_CLIP_LENGTH
                );
                DEFAULT_CLIP_LENGTH
            }
            None => {
                log::warn!("Clip '{}' not found, using {}s", name, DEFAULT_CLIP_LENGTH);
                DEFAULT_CLIP_LENGTH
            }
        }
    }
}

/// A pending wait for an animation state to start, polled once per display frame
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationWait {
    key: AnimationKey,
    waited: f32,
    max_wait: f32,
}

impl AnimationWait {
    pub fn poll(&mut self, animator: &impl Animator, dt: f32) -> WaitStatus {
        if animator.is_state_active(self.key.state_name()) {
            return WaitStatus::Started;
        }

        self.waited += dt;
        if self.waited >= self.max_wait {
            WaitStatus::TimedOut
        } else {
            WaitStatus::Pending
        }
    }

    pub fn key(&self) -> AnimationKey {
        self.key
    }

    /// Seconds spent waiting so far
    pub fn waited(&self) -> f32 {
        self.waited
    }
}
