use crate::battle::conditions::ConditionHooks;
use crate::battle::rng::TurnRng;
use crate::battle::stats::{calculate_max_hp, calculate_stat, clamp_stage, effective_stat};
use schema::{ConditionId, MoveData, PokemonType, SpeciesData, StatBoost, StatType};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use strum::EnumCount;
use tracing::debug;

/// A known move plus its remaining PP.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveInstance {
    data: Arc<MoveData>,
    pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with full PP.
    pub fn new(data: Arc<MoveData>) -> Self {
        let pp = data.max_pp;
        Self { data, pp }
    }

    pub fn data(&self) -> &MoveData {
        &self.data
    }

    pub fn shared_data(&self) -> Arc<MoveData> {
        Arc::clone(&self.data)
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn pp(&self) -> u8 {
        self.pp
    }

    pub fn max_pp(&self) -> u8 {
        self.data.max_pp
    }

    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }

    /// Spend one PP. Returns false (and changes nothing) when none is left.
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    pub fn restore_pp(&mut self, amount: u8) {
        self.pp = self.pp.saturating_add(amount).min(self.max_pp());
    }

    pub fn set_pp(&mut self, pp: u8) {
        self.pp = pp.min(self.max_pp());
    }
}

/// Level-scaled stats, computed once when the Pokemon is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStats {
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

/// A Pokemon's live state, carried by its party between battles.
#[derive(Debug, Clone)]
pub struct PokemonInst {
    species: Arc<SpeciesData>,
    level: u8,
    max_hp: u16,
    stats: CurrentStats,
    hp: u16,
    moves: Vec<MoveInstance>,
    stat_stages: [i8; StatType::COUNT],
    status: Option<ConditionId>,
    volatile_status: Option<ConditionId>,
    /// Turns left on the persistent status (sleep).
    pub(crate) status_time: i8,
    /// Turns left on the volatile status (confusion).
    pub(crate) volatile_status_time: i8,
    status_changes: VecDeque<String>,
}

impl PokemonInst {
    /// Create a Pokemon at full HP. Only the first four moves are kept.
    pub fn new(species: Arc<SpeciesData>, level: u8, mut moves: Vec<MoveInstance>) -> Self {
        let base = species.base_stats;
        let stats = CurrentStats {
            attack: calculate_stat(base.attack, level),
            defense: calculate_stat(base.defense, level),
            sp_attack: calculate_stat(base.sp_attack, level),
            sp_defense: calculate_stat(base.sp_defense, level),
            speed: calculate_stat(base.speed, level),
        };
        let max_hp = calculate_max_hp(base.hp, level);
        moves.truncate(4);

        Self {
            species,
            level,
            max_hp,
            stats,
            hp: max_hp,
            moves,
            stat_stages: [0; StatType::COUNT],
            status: None,
            volatile_status: None,
            status_time: 0,
            volatile_status_time: 0,
            status_changes: VecDeque::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn species(&self) -> &SpeciesData {
        &self.species
    }

    pub fn types(&self) -> &[PokemonType] {
        &self.species.types
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn base_stats(&self) -> CurrentStats {
        self.stats
    }

    // === HP ===

    pub fn hp(&self) -> u16 {
        self.hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.max_hp);
    }

    pub fn set_hp_to_max(&mut self) {
        self.hp = self.max_hp;
    }

    /// Returns true if this damage caused the Pokemon to faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        self.hp = self.hp.saturating_sub(damage);
        self.is_fainted()
    }

    pub fn heal(&mut self, amount: u16) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    // === Moves ===

    pub fn moves(&self) -> &[MoveInstance] {
        &self.moves
    }

    pub fn moves_mut(&mut self) -> &mut [MoveInstance] {
        &mut self.moves
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(MoveInstance::has_pp)
    }

    /// Pick uniformly among the moves that still have PP.
    pub fn random_move_index(&self, rng: &mut TurnRng) -> Option<usize> {
        let usable: Vec<usize> = self
            .moves
            .iter()
            .enumerate()
            .filter(|(_, move_instance)| move_instance.has_pp())
            .map(|(index, _)| index)
            .collect();
        if usable.is_empty() {
            return None;
        }
        let pick = rng.range("opponent move choice", 0, usable.len() as u32 - 1) as usize;
        usable.get(pick).copied()
    }

    // === Stats and boosts ===

    pub fn attack(&self) -> u16 {
        self.boosted(self.stats.attack, StatType::Attack)
    }

    pub fn defense(&self) -> u16 {
        self.boosted(self.stats.defense, StatType::Defense)
    }

    pub fn sp_attack(&self) -> u16 {
        self.boosted(self.stats.sp_attack, StatType::SpAttack)
    }

    pub fn sp_defense(&self) -> u16 {
        self.boosted(self.stats.sp_defense, StatType::SpDefense)
    }

    pub fn speed(&self) -> u16 {
        self.boosted(self.stats.speed, StatType::Speed)
    }

    fn boosted(&self, base: u16, stat: StatType) -> u16 {
        effective_stat(base, self.stat_stage(stat))
    }

    pub fn stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages[stat.index()]
    }

    /// Shift stat stages, clamped to [-6, 6], narrating each change.
    pub fn apply_boosts(&mut self, boosts: &[StatBoost]) {
        for boost in boosts {
            let slot = &mut self.stat_stages[boost.stat.index()];
            *slot = clamp_stage(*slot as i16 + boost.boost as i16);

            let direction = if boost.boost > 0 { "rose" } else { "fell" };
            let message = format!("{}'s {} {}!", self.species.name, boost.stat, direction);
            self.status_changes.push_back(message);
            debug!(pokemon = %self.species.name, stat = %boost.stat, stage = *slot, "stat stage changed");
        }
    }

    pub fn reset_stat_stages(&mut self) {
        self.stat_stages = [0; StatType::COUNT];
    }

    // === Status conditions ===

    pub fn status(&self) -> Option<ConditionId> {
        self.status
    }

    pub fn volatile_status(&self) -> Option<ConditionId> {
        self.volatile_status
    }

    pub fn status_time(&self) -> i8 {
        self.status_time
    }

    pub fn volatile_status_time(&self) -> i8 {
        self.volatile_status_time
    }

    /// Apply a persistent status. Does nothing while another one is active.
    pub fn set_status(&mut self, condition: ConditionId, rng: &mut TurnRng) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(condition);
        condition.on_start(self, rng);
        let message = format!("{} {}", self.species.name, condition.start_message());
        self.status_changes.push_back(message);
        true
    }

    /// Apply a volatile status. Independent of the persistent one.
    pub fn set_volatile_status(&mut self, condition: ConditionId, rng: &mut TurnRng) -> bool {
        if self.volatile_status.is_some() {
            return false;
        }
        self.volatile_status = Some(condition);
        condition.on_start(self, rng);
        let message = format!("{} {}", self.species.name, condition.start_message());
        self.status_changes.push_back(message);
        true
    }

    pub fn cure_status(&mut self) {
        self.status = None;
        self.status_time = 0;
    }

    pub fn cure_volatile_status(&mut self) {
        self.volatile_status = None;
        self.volatile_status_time = 0;
    }

    /// Run the before-move hooks of both statuses. Both run even if the first blocks.
    pub fn on_before_move(&mut self, rng: &mut TurnRng) -> bool {
        let mut can_move = true;
        if let Some(status) = self.status {
            if !status.on_before_move(self, rng) {
                can_move = false;
            }
        }
        if let Some(volatile) = self.volatile_status {
            if !volatile.on_before_move(self, rng) {
                can_move = false;
            }
        }
        can_move
    }

    pub fn on_after_turn(&mut self) {
        if let Some(status) = self.status {
            status.on_after_turn(self);
        }
        if let Some(volatile) = self.volatile_status {
            volatile.on_after_turn(self);
        }
    }

    /// Clear everything that only lasts for one battle.
    pub fn on_battle_over(&mut self) {
        self.cure_volatile_status();
        self.reset_stat_stages();
    }

    // === Narration queue ===

    pub fn push_status_change(&mut self, message: String) {
        self.status_changes.push_back(message);
    }

    pub fn drain_status_changes(&mut self) -> Vec<String> {
        self.status_changes.drain(..).collect()
    }
}
