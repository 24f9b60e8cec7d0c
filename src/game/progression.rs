//! Progression Tracker and Shop
//!
//! Two lifetimes of state live here. Run-scoped: the distance score, wiped on
//! restart. Session-scoped: currency, jump level and jump XP, which survive
//! any number of crashes. Jumping is the sole XP source; the only spend is
//! the shop's repeatable jump-level purchase between runs.

use serde::{Deserialize, Serialize};

use crate::game::config::GameConfig;

/// Score, currency and jump skill.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Progression {
    /// Distance covered this run, in world units
    pub distance: f32,
    /// Coins banked this session; spendable between runs
    pub currency: u32,
    /// Jump skill level, `1..=max_jump_level`
    pub jump_level: u8,
    /// Jumps performed since the last level-up
    pub jump_xp: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    /// Fresh session: nothing earned, skill at level 1.
    pub fn new() -> Self {
        Self {
            distance: 0.0,
            currency: 0,
            jump_level: 1,
            jump_xp: 0,
        }
    }

    /// Distance score as displayed on the HUD.
    #[inline]
    pub fn score(&self) -> u32 {
        self.distance as u32
    }

    /// Accrue one frame of forward travel.
    #[inline]
    pub fn advance(&mut self, run_speed: f32) {
        self.distance += run_speed;
    }

    /// Credit one executed jump.
    ///
    /// XP needed for the next level scales with the current level
    /// (`level * xp_per_level`). Returns the new level on level-up; XP resets
    /// then and only then.
    pub fn record_jump(&mut self, config: &GameConfig) -> Option<u8> {
        self.jump_xp += 1;

        let threshold = self.jump_level as u32 * config.xp_per_level;
        if self.jump_xp >= threshold && self.jump_level < config.max_jump_level {
            self.jump_level += 1;
            self.jump_xp = 0;
            return Some(self.jump_level);
        }
        None
    }

    /// Airborne deceleration at the current skill level.
    ///
    /// Gravity is divided by `1 + level * hang_factor`: monotonically longer
    /// hang time per level, approaching but never reaching zero fall rate.
    #[inline]
    pub fn effective_gravity(&self, config: &GameConfig) -> f32 {
        config.gravity / (1.0 + self.jump_level as f32 * config.hang_factor)
    }

    /// Bank a collected coin; returns the new balance.
    pub fn collect_coin(&mut self, value: u32) -> u32 {
        self.currency = self.currency.saturating_add(value);
        self.currency
    }

    /// Shop: buy one jump level for `upgrade_cost` currency.
    ///
    /// Silently rejected when underfunded or already at max level; repeatable
    /// while funds allow. Returns whether the purchase went through.
    pub fn try_buy_jump_level(&mut self, config: &GameConfig) -> bool {
        if self.jump_level >= config.max_jump_level || self.currency < config.upgrade_cost {
            return false;
        }
        self.currency -= config.upgrade_cost;
        self.jump_level += 1;
        true
    }

    /// Start a new run: distance resets, everything session-scoped persists.
    pub fn reset_run(&mut self) {
        self.distance = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::Player;

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_xp_threshold_scales_with_level() {
        let config = cfg();
        let mut prog = Progression::new();

        // Level 1 -> 2 takes xp_per_level jumps
        for _ in 0..config.xp_per_level - 1 {
            assert_eq!(prog.record_jump(&config), None);
        }
        assert_eq!(prog.record_jump(&config), Some(2));
        assert_eq!(prog.jump_xp, 0, "XP resets on level-up");

        // Level 2 -> 3 takes twice as many
        for _ in 0..2 * config.xp_per_level - 1 {
            assert_eq!(prog.record_jump(&config), None);
        }
        assert_eq!(prog.record_jump(&config), Some(3));
    }

    #[test]
    fn test_level_caps_at_max() {
        let config = cfg();
        let mut prog = Progression::new();
        prog.jump_level = config.max_jump_level;

        for _ in 0..1000 {
            assert_eq!(prog.record_jump(&config), None);
        }
        assert_eq!(prog.jump_level, config.max_jump_level);
    }

    #[test]
    fn test_purchase_rules() {
        let config = cfg();
        let mut prog = Progression::new();

        // Below cost: currency and level unchanged
        prog.currency = config.upgrade_cost - 1;
        assert!(!prog.try_buy_jump_level(&config));
        assert_eq!(prog.currency, config.upgrade_cost - 1);
        assert_eq!(prog.jump_level, 1);

        // At cost: currency -= cost, level += 1
        prog.currency = config.upgrade_cost;
        assert!(prog.try_buy_jump_level(&config));
        assert_eq!(prog.currency, 0);
        assert_eq!(prog.jump_level, 2);

        // Repeatable while funds allow
        prog.currency = config.upgrade_cost * 3;
        assert!(prog.try_buy_jump_level(&config));
        assert!(prog.try_buy_jump_level(&config));
        assert!(prog.try_buy_jump_level(&config));
        assert!(!prog.try_buy_jump_level(&config));
        assert_eq!(prog.jump_level, 5);
    }

    #[test]
    fn test_purchase_blocked_at_max_level() {
        let config = cfg();
        let mut prog = Progression::new();
        prog.jump_level = config.max_jump_level;
        prog.currency = config.upgrade_cost * 10;

        assert!(!prog.try_buy_jump_level(&config));
        assert_eq!(prog.currency, config.upgrade_cost * 10);
    }

    #[test]
    fn test_currency_monotonic_outside_purchases() {
        let config = cfg();
        let mut prog = Progression::new();

        let mut last = prog.currency;
        for i in 0..100 {
            prog.collect_coin(config.coin_value);
            if i % 7 == 0 {
                prog.record_jump(&config);
            }
            prog.advance(config.run_speed);
            assert!(prog.currency >= last);
            last = prog.currency;
        }

        prog.reset_run();
        assert_eq!(prog.currency, last, "restart must not touch currency");
        assert_eq!(prog.distance, 0.0);
    }

    /// Frames a jump stays airborne at a given skill level.
    fn airtime_at_level(level: u8, config: &GameConfig) -> u32 {
        let mut prog = Progression::new();
        prog.jump_level = level;

        let mut player = Player::new(config);
        player.trigger_jump(config.jump_velocity);

        let mut frames = 0;
        while player.is_jumping() && frames < 100_000 {
            player.integrate(0.0, prog.effective_gravity(config), config);
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_airtime_non_decreasing_with_level() {
        let config = cfg();
        let mut last = 0;
        for level in 1..=config.max_jump_level {
            let airtime = airtime_at_level(level, &config);
            assert!(
                airtime >= last,
                "level {level}: airtime {airtime} < previous {last}"
            );
            last = airtime;
        }
    }
}
