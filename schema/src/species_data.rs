use crate::{BaseStats, PokemonType};
use serde::{Deserialize, Serialize};

/// A move a species picks up once it reaches `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnableMove {
    pub level: u8,
    pub move_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub catch_rate: u8,
    pub learnable_moves: Vec<LearnableMove>,
}

impl SpeciesData {
    /// Moves known at `level`: learnset entries at or below it, in data order, capped at four.
    pub fn moves_at_level(&self, level: u8) -> Vec<&str> {
        self.learnable_moves
            .iter()
            .filter(|learnable| learnable.level <= level)
            .take(4)
            .map(|learnable| learnable.move_name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpeciesData {
        ron::from_str(
            r#"(
                name: "Sample",
                types: [Normal],
                base_stats: (hp: 40, attack: 45, defense: 40, sp_attack: 35, sp_defense: 35, speed: 56),
                catch_rate: 255,
                learnable_moves: [
                    (level: 1, move_name: "Tackle"),
                    (level: 1, move_name: "Growl"),
                    (level: 5, move_name: "Gust"),
                    (level: 9, move_name: "Sand Attack"),
                    (level: 12, move_name: "Quick Attack"),
                    (level: 20, move_name: "Wing Attack"),
                ],
            )"#,
        )
        .expect("sample species should parse")
    }

    #[test]
    fn moves_at_level_respects_level_gate() {
        assert_eq!(sample().moves_at_level(4), vec!["Tackle", "Growl"]);
    }

    #[test]
    fn moves_at_level_stops_at_four() {
        assert_eq!(
            sample().moves_at_level(50),
            vec!["Tackle", "Growl", "Gust", "Sand Attack"]
        );
    }
}
