use crate::errors::{DexError, DexResult};
use crate::pokemon::{MoveInstance, PokemonInst};
use schema::{MoveData, MoveEffects, SpeciesData};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const BUILTIN_SPECIES: &str = include_str!("../data/species.ron");
const BUILTIN_MOVES: &str = include_str!("../data/moves.ron");

/// Read-only registry of every species and move definition.
///
/// Built once and shared behind an `Arc`; Pokemon created from it hold `Arc`s to
/// their definitions so the registry never has to outlive them.
#[derive(Debug, Clone, Default)]
pub struct Dex {
    species: HashMap<String, Arc<SpeciesData>>,
    moves: HashMap<String, Arc<MoveData>>,
}

impl Dex {
    /// The species and moves shipped in `data/`.
    pub fn builtin() -> DexResult<Self> {
        Self::from_ron(BUILTIN_SPECIES, BUILTIN_MOVES)
    }

    pub fn from_ron(species_source: &str, moves_source: &str) -> DexResult<Self> {
        let species: Vec<SpeciesData> =
            ron::from_str(species_source).map_err(|err| DexError::Parse {
                source_name: "species",
                message: err.to_string(),
            })?;
        let moves: Vec<MoveData> = ron::from_str(moves_source).map_err(|err| DexError::Parse {
            source_name: "moves",
            message: err.to_string(),
        })?;
        Self::from_definitions(species, moves)
    }

    /// Validates and indexes already-parsed definitions.
    pub fn from_definitions(species: Vec<SpeciesData>, moves: Vec<MoveData>) -> DexResult<Self> {
        let mut dex = Dex::default();

        for move_data in moves {
            validate_move(&move_data)?;
            dex.moves
                .insert(move_data.name.clone(), Arc::new(move_data));
        }

        for species_data in species {
            dex.validate_species(&species_data)?;
            dex.species
                .insert(species_data.name.clone(), Arc::new(species_data));
        }

        debug!(
            species = dex.species.len(),
            moves = dex.moves.len(),
            "dex loaded"
        );
        Ok(dex)
    }

    pub fn species(&self, name: &str) -> DexResult<Arc<SpeciesData>> {
        self.species
            .get(name)
            .cloned()
            .ok_or_else(|| DexError::SpeciesNotFound(name.to_string()))
    }

    pub fn move_data(&self, name: &str) -> DexResult<Arc<MoveData>> {
        self.moves
            .get(name)
            .cloned()
            .ok_or_else(|| DexError::MoveNotFound(name.to_string()))
    }

    /// Create a Pokemon knowing the (up to four) moves its learnset grants at `level`.
    pub fn create_pokemon(&self, species: &str, level: u8) -> DexResult<PokemonInst> {
        if !(1..=100).contains(&level) {
            return Err(DexError::InvalidLevel(level));
        }
        let species_data = self.species(species)?;
        let move_names: Vec<String> = species_data
            .moves_at_level(level)
            .into_iter()
            .map(str::to_string)
            .collect();
        if move_names.is_empty() {
            return Err(DexError::NoMoves(species.to_string()));
        }
        let names: Vec<&str> = move_names.iter().map(String::as_str).collect();
        self.create_pokemon_with_moves(species, level, &names)
    }

    /// Create a Pokemon with an explicit move list. Only the first four are kept.
    pub fn create_pokemon_with_moves(
        &self,
        species: &str,
        level: u8,
        moves: &[&str],
    ) -> DexResult<PokemonInst> {
        if !(1..=100).contains(&level) {
            return Err(DexError::InvalidLevel(level));
        }
        let species_data = self.species(species)?;
        let moves = moves
            .iter()
            .take(4)
            .map(|name| self.move_data(name).map(MoveInstance::new))
            .collect::<DexResult<Vec<_>>>()?;
        Ok(PokemonInst::new(species_data, level, moves))
    }

    fn validate_species(&self, species: &SpeciesData) -> DexResult<()> {
        let invalid = |reason: String| DexError::InvalidData {
            name: species.name.clone(),
            reason,
        };

        if species.types.is_empty() || species.types.len() > 2 {
            return Err(invalid(format!(
                "expected one or two types, found {}",
                species.types.len()
            )));
        }
        for learnable in &species.learnable_moves {
            if !self.moves.contains_key(&learnable.move_name) {
                return Err(invalid(format!(
                    "learnset references unknown move {}",
                    learnable.move_name
                )));
            }
        }
        Ok(())
    }
}

fn validate_move(move_data: &MoveData) -> DexResult<()> {
    let invalid = |reason: &str| DexError::InvalidData {
        name: move_data.name.clone(),
        reason: reason.to_string(),
    };

    if !move_data.always_hits && !(1..=100).contains(&move_data.accuracy) {
        return Err(invalid("accuracy must be within 1..=100"));
    }
    if move_data.max_pp == 0 {
        return Err(invalid("max_pp must be positive"));
    }
    validate_effects(&move_data.effects).map_err(|reason| invalid(reason))?;
    for secondary in &move_data.secondary_effects {
        if !(1..=100).contains(&secondary.chance) {
            return Err(invalid("secondary effect chance must be within 1..=100"));
        }
        validate_effects(&secondary.effects).map_err(|reason| invalid(reason))?;
    }
    Ok(())
}

fn validate_effects(effects: &MoveEffects) -> Result<(), &'static str> {
    if effects.status.is_some_and(|status| status.is_volatile()) {
        return Err("status must name a persistent condition");
    }
    if effects
        .volatile_status
        .is_some_and(|status| !status.is_volatile())
    {
        return Err("volatile_status must name a volatile condition");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ONE_MOVE: &str = r#"[
        (name: "Tackle", move_type: Normal, power: 40, accuracy: 100, max_pp: 35,
         category: Physical, target: Foe),
    ]"#;

    #[test]
    fn builtin_data_loads() {
        let dex = Dex::builtin().expect("builtin data should be valid");
        assert!(dex.species("Pikachu").is_ok());
        assert_eq!(dex.move_data("Quick Attack").unwrap().priority, 1);
    }

    #[test]
    fn unknown_lookups_are_errors() {
        let dex = Dex::builtin().unwrap();
        assert_eq!(
            dex.species("Missingno").unwrap_err(),
            DexError::SpeciesNotFound("Missingno".to_string())
        );
        assert!(matches!(
            dex.move_data("Splash"),
            Err(DexError::MoveNotFound(_))
        ));
    }

    #[test]
    fn created_pokemon_knows_level_moves() {
        let dex = Dex::builtin().unwrap();
        let pikachu = dex.create_pokemon("Pikachu", 5).unwrap();
        let names: Vec<&str> = pikachu.moves().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Thunder Shock", "Growl"]);
    }

    #[test]
    fn level_out_of_range_is_rejected() {
        let dex = Dex::builtin().unwrap();
        assert_eq!(
            dex.create_pokemon("Pikachu", 0).unwrap_err(),
            DexError::InvalidLevel(0)
        );
        assert_eq!(
            dex.create_pokemon("Pikachu", 101).unwrap_err(),
            DexError::InvalidLevel(101)
        );
        assert_eq!(
            dex.create_pokemon_with_moves("Pikachu", 0, &["Tackle"])
                .unwrap_err(),
            DexError::InvalidLevel(0)
        );
    }

    #[test]
    fn learnset_must_reference_known_moves() {
        let species = r#"[
            (name: "Oddity", types: [Normal],
             base_stats: (hp: 1, attack: 1, defense: 1, sp_attack: 1, sp_defense: 1, speed: 1),
             catch_rate: 1, learnable_moves: [(level: 1, move_name: "Splash")]),
        ]"#;
        let err = Dex::from_ron(species, ONE_MOVE).unwrap_err();
        assert!(matches!(err, DexError::InvalidData { .. }));
    }

    #[test]
    fn species_needs_one_or_two_types() {
        let species = r#"[
            (name: "Oddity", types: [Normal, Fire, Water],
             base_stats: (hp: 1, attack: 1, defense: 1, sp_attack: 1, sp_defense: 1, speed: 1),
             catch_rate: 1, learnable_moves: []),
        ]"#;
        assert!(matches!(
            Dex::from_ron(species, ONE_MOVE),
            Err(DexError::InvalidData { .. })
        ));
    }

    #[test]
    fn zero_accuracy_is_rejected_unless_always_hits() {
        let moves = r#"[
            (name: "Blink", move_type: Normal, power: 0, accuracy: 0, max_pp: 5,
             category: Status, target: User),
        ]"#;
        assert!(matches!(
            Dex::from_ron("[]", moves),
            Err(DexError::InvalidData { .. })
        ));

        let always = r#"[
            (name: "Blink", move_type: Normal, power: 0, accuracy: 0, always_hits: true,
             max_pp: 5, category: Status, target: User),
        ]"#;
        assert!(Dex::from_ron("[]", always).is_ok());
    }

    #[test]
    fn malformed_ron_reports_source() {
        let err = Dex::from_ron("[", ONE_MOVE).unwrap_err();
        assert!(matches!(
            err,
            DexError::Parse {
                source_name: "species",
                ..
            }
        ));
    }
}
