// Input manager - Main coordination system for all input

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Routes window input events to per-player action state
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,
    players: Vec<PlayerInput>,
    /// Global actions pressed since the last `end_frame`
    global_pressed: HashSet<Action>,
}

impl InputManager {
    pub fn new(max_players: usize) -> Self {
        Self {
            config: InputConfig::new(max_players),
            players: (0..max_players).map(PlayerInput::new).collect(),
            global_pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        // Key repeats are not new presses
        if event.repeat && event.state == ElementState::Pressed {
            return;
        }
        self.process_source(InputSource::key(key_code), event.state);
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state);
    }

    fn process_source(&mut self, source: InputSource, state: ElementState) {
        if let Some(action) = self.config.global_action(source) {
            if state == ElementState::Pressed {
                self.global_pressed.insert(action);
            }
        }

        for player in &mut self.players {
            let Some(action) = self.config.player_action(player.player_id(), source) else {
                continue;
            };
            match state {
                ElementState::Pressed => player.press(action),
                ElementState::Released => player.release(action),
            }
        }
    }

    /// Whether a global action was pressed this frame
    pub fn global_just_pressed(&self, action: Action) -> bool {
        self.global_pressed.contains(&action)
    }

    /// Clear per-frame edges. Call once per frame after input is consumed.
    pub fn end_frame(&mut self) {
        self.global_pressed.clear();
        for player in &mut self.players {
            player.end_frame();
        }
    }

    pub fn player(&self, player_id: usize) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    pub fn players(&self) -> &[PlayerInput] {
        &self.players
    }

    /// Drop all held input, e.g. when the window loses focus
    pub fn reset_all(&mut self) {
        self.global_pressed.clear();
        for player in &mut self.players {
            player.reset();
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(4)
    }
}
