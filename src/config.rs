use crate::board::Symbol;
use crate::error::Result;
use crate::policy::PolicyKind;
use serde::{Deserialize, Serialize};

/// Per-game setup: who controls each symbol and who moves first.
///
/// Fixed once a game starts. Defaults to a human `X` against the easy tier,
/// with `X` opening.
///
/// ```rust
/// use minimax_ttt::config::GameConfig;
/// use minimax_ttt::policy::PolicyKind;
///
/// let config = GameConfig::from_yaml_str("x: hardAI\no: human\n").unwrap();
/// assert_eq!(config.x, PolicyKind::Optimal);
/// assert_eq!(config.o, PolicyKind::Human);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub x: PolicyKind,
    pub o: PolicyKind,
    pub first_player: Symbol,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            x: PolicyKind::Human,
            o: PolicyKind::UniformRandom,
            first_player: Symbol::X,
        }
    }
}

impl GameConfig {
    pub fn new(x: PolicyKind, o: PolicyKind) -> Self {
        Self {
            x,
            o,
            ..Self::default()
        }
    }

    pub fn with_first_player(mut self, first_player: Symbol) -> Self {
        self.first_player = first_player;
        self
    }

    /// Returns the policy bound to `symbol`.
    pub fn policy(&self, symbol: Symbol) -> PolicyKind {
        match symbol {
            Symbol::X => self.x,
            Symbol::O => self.o,
        }
    }

    pub fn set_policy(&mut self, symbol: Symbol, kind: PolicyKind) {
        match symbol {
            Symbol::X => self.x = kind,
            Symbol::O => self.o = kind,
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_match_the_setup_screen() {
        let config = GameConfig::default();
        assert_eq!(config.policy(Symbol::X), PolicyKind::Human);
        assert_eq!(config.policy(Symbol::O), PolicyKind::UniformRandom);
        assert_eq!(config.first_player, Symbol::X);
    }

    #[test]
    fn yaml_round_trip() {
        // arrange
        let config =
            GameConfig::new(PolicyKind::Optimal, PolicyKind::UniformRandom).with_first_player(Symbol::O);

        // act
        let yaml = config.to_yaml_string().unwrap();
        let parsed = GameConfig::from_yaml_str(&yaml).unwrap();

        // assert
        assert!(yaml.contains("hard"), "{yaml}");
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = GameConfig::from_yaml_str("o: hard\n").unwrap();
        assert_eq!(config.x, PolicyKind::Human);
        assert_eq!(config.o, PolicyKind::Optimal);
        assert_eq!(config.first_player, Symbol::X);
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err = GameConfig::from_yaml_str("x: grandmaster\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("grandmaster"), "{err}");
    }

    #[test]
    fn set_policy_targets_one_symbol() {
        let mut config = GameConfig::default();
        config.set_policy(Symbol::O, PolicyKind::Optimal);
        assert_eq!(config.o, PolicyKind::Optimal);
        assert_eq!(config.x, PolicyKind::Human);
    }
}
