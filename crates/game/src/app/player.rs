use std::collections::BTreeSet;

use tracing::info;

use super::config::{ModuleId, PLAYER_MAX_HEALTH, PLAYER_START_HEALTH};

const XP_PER_COMPLETION: u32 = 50;
const XP_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayerProgress {
    health: u32,
    xp: u32,
    level: u32,
    completed: BTreeSet<ModuleId>,
    selected_module: Option<ModuleId>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            health: PLAYER_START_HEALTH.min(PLAYER_MAX_HEALTH),
            xp: 0,
            level: 1,
            completed: BTreeSet::new(),
            selected_module: None,
        }
    }
}

impl PlayerProgress {
    pub(crate) fn health(&self) -> u32 {
        self.health
    }

    #[cfg(test)]
    pub(crate) fn max_health(&self) -> u32 {
        PLAYER_MAX_HEALTH
    }

    #[cfg(test)]
    pub(crate) fn set_health(&mut self, health: u32) {
        self.health = health.min(PLAYER_MAX_HEALTH);
    }

    pub(crate) fn xp(&self) -> u32 {
        self.xp
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    #[cfg(test)]
    pub(crate) fn is_completed(&self, module: ModuleId) -> bool {
        self.completed.contains(&module)
    }

    pub(crate) fn select_module(&mut self, module: ModuleId) {
        self.selected_module = Some(module);
    }

    #[cfg(test)]
    pub(crate) fn selected_module(&self) -> Option<ModuleId> {
        self.selected_module
    }

    pub(crate) fn take_selected_module(&mut self) -> Option<ModuleId> {
        self.selected_module.take()
    }

    /// Returns true only for the first completion of `module`.
    pub(crate) fn record_completion(&mut self, module: ModuleId) -> bool {
        if !self.completed.insert(module) {
            return false;
        }
        self.xp = self.xp.saturating_add(XP_PER_COMPLETION);
        self.level = 1 + self.xp / XP_PER_LEVEL;
        info!(
            module = module.id(),
            xp = self.xp,
            level = self.level,
            "module_completed"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_clamped_to_max() {
        let mut player = PlayerProgress::default();
        assert_eq!(player.health(), 5);
        player.set_health(9);
        assert_eq!(player.health(), player.max_health());
        player.set_health(0);
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn selection_is_consumed_once() {
        let mut player = PlayerProgress::default();
        player.select_module(ModuleId::Php);
        assert_eq!(player.selected_module(), Some(ModuleId::Php));
        assert_eq!(player.take_selected_module(), Some(ModuleId::Php));
        assert_eq!(player.take_selected_module(), None);
    }

    #[test]
    fn completion_grants_xp_once_and_levels_up() {
        let mut player = PlayerProgress::default();
        assert!(player.record_completion(ModuleId::CSharp));
        assert!(!player.record_completion(ModuleId::CSharp));
        assert_eq!(player.xp(), 50);
        assert_eq!(player.level(), 1);

        assert!(player.record_completion(ModuleId::Python));
        assert_eq!(player.xp(), 100);
        assert_eq!(player.level(), 2);
        assert!(player.is_completed(ModuleId::Python));
        assert!(!player.is_completed(ModuleId::Php));
    }
}
