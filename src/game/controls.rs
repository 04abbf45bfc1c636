// Translation from per-frame player input to character control events

use glam::Vec2;

use crate::engine::input::{Action, PlayerInput};
use crate::game::characters::attack::AttackKind;

/// A discrete control request for a character controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Movement input changed
    Move(Vec2),
    /// Run modifier pressed or released
    Run(bool),
    Dodge,
    Jump,
    Attack(AttackKind),
}

/// Turns held/pressed actions into edge-triggered control events.
///
/// Move and Run follow the held state and are sent only when it changes,
/// so a press or release that never reached `collect` (focus loss, pause)
/// still resolves on the next frame. The moves fire on their press edge.
#[derive(Debug, Default)]
pub struct ControlTranslator {
    last_move: Vec2,
    last_running: bool,
}

impl ControlTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for this frame, in the order they should be dispatched
    pub fn collect(&mut self, input: &PlayerInput) -> Vec<ControlEvent> {
        let mut events = Vec::new();

        let direction = input.direction();
        if direction != self.last_move {
            self.last_move = direction;
            events.push(ControlEvent::Move(direction));
        }

        let running = input.is_pressed(Action::Run);
        if running != self.last_running {
            self.last_running = running;
            events.push(ControlEvent::Run(running));
        }

        let moves = [
            (Action::Dodge, ControlEvent::Dodge),
            (Action::Jump, ControlEvent::Jump),
            (Action::Punch, ControlEvent::Attack(AttackKind::Punch)),
            (Action::Kick, ControlEvent::Attack(AttackKind::Kick)),
        ];
        events.extend(
            moves
                .into_iter()
                .filter(|(action, _)| input.just_pressed(*action))
                .map(|(_, event)| event),
        );

        events
    }
}
