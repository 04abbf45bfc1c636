// Input bindings

use super::action::{default_p1_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Source-to-action map for one player
#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    bindings: HashMap<InputSource, Action>,
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bindings from a list of pairs
    pub fn from_pairs(pairs: Vec<(InputSource, Action)>) -> Self {
        let mut bindings = Self::new();
        for (source, action) in pairs {
            bindings.bind(source, action);
        }
        bindings
    }

    /// Default bindings for a local player; only player 0 has any
    pub fn defaults_for(player_id: usize) -> Self {
        match player_id {
            0 => Self::from_pairs(default_p1_bindings()),
            _ => Self::new(),
        }
    }

    /// Bind a source to an action, replacing any previous binding of the source
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

/// Bindings for all players plus the global (non-player) bindings
#[derive(Debug)]
pub struct InputConfig {
    players: Vec<InputBindings>,
    global: InputBindings,
}

impl InputConfig {
    pub fn new(max_players: usize) -> Self {
        Self {
            players: (0..max_players).map(InputBindings::defaults_for).collect(),
            global: InputBindings::from_pairs(global_bindings()),
        }
    }

    pub fn player(&self, player_id: usize) -> Option<&InputBindings> {
        self.players.get(player_id)
    }

    /// Player-specific action for `source`
    pub fn player_action(&self, player_id: usize, source: InputSource) -> Option<Action> {
        self.player(player_id)?.get_action(source)
    }

    /// Global action for `source`
    pub fn global_action(&self, source: InputSource) -> Option<Action> {
        self.global.get_action(source)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_later_binding_replaces_source() {
        let source = InputSource::key(KeyCode::KeyA);
        let bindings = InputBindings::from_pairs(vec![
            (source, Action::MoveLeft),
            (source, Action::MoveRight),
        ]);
        assert_eq!(bindings.get_action(source), Some(Action::MoveRight));
    }

    #[test]
    fn test_only_first_player_has_defaults() {
        let config = InputConfig::new(2);
        let space = InputSource::key(KeyCode::Space);
        assert_eq!(config.player_action(0, space), Some(Action::Jump));
        assert_eq!(config.player_action(1, space), None);
        assert!(config.player(2).is_none());
    }

    #[test]
    fn test_global_action() {
        let config = InputConfig::default();
        let escape = InputSource::key(KeyCode::Escape);
        assert_eq!(config.global_action(escape), Some(Action::Menu));
        assert_eq!(config.player_action(0, escape), None);
    }
}
