use crate::pokemon::PokemonInst;
use schema::ConditionId;
use serde::{Deserialize, Serialize};

/// Default upper bound on party size.
pub const MAX_PARTY_SIZE: usize = 6;

/// Snapshot of one party member for the party-selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySlotInfo {
    pub name: String,
    pub level: u8,
    pub hp: u16,
    pub max_hp: u16,
    pub fainted: bool,
    pub status: Option<ConditionId>,
}

impl PartySlotInfo {
    pub fn from_pokemon(pokemon: &PokemonInst) -> Self {
        Self {
            name: pokemon.name().to_string(),
            level: pokemon.level(),
            hp: pokemon.hp(),
            max_hp: pokemon.max_hp(),
            fainted: pokemon.is_fainted(),
            status: pokemon.status(),
        }
    }
}

/// An ordered roster of Pokemon.
#[derive(Debug, Clone, Default)]
pub struct Party {
    pokemon: Vec<PokemonInst>,
}

impl Party {
    pub fn new(pokemon: Vec<PokemonInst>) -> Self {
        Self { pokemon }
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PokemonInst> {
        self.pokemon.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PokemonInst> {
        self.pokemon.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PokemonInst> {
        self.pokemon.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PokemonInst> {
        self.pokemon.iter_mut()
    }

    /// Index of the first member that has not fainted.
    pub fn healthy_pokemon_index(&self) -> Option<usize> {
        self.pokemon.iter().position(|pokemon| !pokemon.is_fainted())
    }

    pub fn healthy_pokemon(&self) -> Option<&PokemonInst> {
        self.healthy_pokemon_index().and_then(|index| self.pokemon.get(index))
    }

    pub fn has_healthy_pokemon(&self) -> bool {
        self.healthy_pokemon_index().is_some()
    }

    /// Append a member. Returns false, leaving the party unchanged, once it holds `max_size`.
    pub fn add_pokemon(&mut self, pokemon: PokemonInst, max_size: usize) -> bool {
        if self.pokemon.len() >= max_size {
            return false;
        }
        self.pokemon.push(pokemon);
        true
    }

    pub fn roster(&self) -> Vec<PartySlotInfo> {
        self.pokemon.iter().map(PartySlotInfo::from_pokemon).collect()
    }

    pub fn into_pokemon(self) -> Vec<PokemonInst> {
        self.pokemon
    }
}

impl std::ops::Index<usize> for Party {
    type Output = PokemonInst;

    fn index(&self, index: usize) -> &PokemonInst {
        &self.pokemon[index]
    }
}

impl std::ops::IndexMut<usize> for Party {
    fn index_mut(&mut self, index: usize) -> &mut PokemonInst {
        &mut self.pokemon[index]
    }
}

/// A named party owner: the player, or an opposing trainer.
#[derive(Debug, Clone)]
pub struct Trainer {
    pub name: String,
    pub party: Party,
}

impl Trainer {
    pub fn new(name: impl Into<String>, pokemon: Vec<PokemonInst>) -> Self {
        Self {
            name: name.into(),
            party: Party::new(pokemon),
        }
    }
}

/// What the player is up against.
#[derive(Debug, Clone)]
pub enum Encounter {
    Wild(PokemonInst),
    Trainer(Trainer),
}
