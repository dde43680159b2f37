use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Display, EnumIter,
)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
}

impl PokemonType {
    /// Multiplier for an attack of `attacking` type against a single `defending` type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: PokemonType, defending: PokemonType) -> f32 {
        use PokemonType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Rock) => 0.5,
            (Normal, Ghost) => 0.0,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) => 2.0,

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, Water) | (Electric, Flying) => 2.0,

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon) => 0.5,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,

            // Ice
            (Ice, Fire) | (Ice, Water) | (Ice, Ice) => 0.5,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,

            // Fighting
            (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => 0.5,
            (Fighting, Ghost) => 0.0,
            (Fighting, Normal) | (Fighting, Ice) | (Fighting, Rock) => 2.0,

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
            (Poison, Grass) => 2.0,

            // Ground
            (Ground, Grass) | (Ground, Bug) => 0.5,
            (Ground, Flying) => 0.0,
            (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock) => 2.0,

            // Flying
            (Flying, Electric) | (Flying, Rock) => 0.5,
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,

            // Psychic
            (Psychic, Psychic) => 0.5,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,

            // Bug
            (Bug, Fire) | (Bug, Fighting) | (Bug, Poison) | (Bug, Flying) | (Bug, Ghost) => 0.5,
            (Bug, Grass) | (Bug, Psychic) => 2.0,

            // Rock
            (Rock, Fighting) | (Rock, Ground) => 0.5,
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,

            // Ghost
            (Ghost, Normal) => 0.0,
            (Ghost, Psychic) => 0.5,
            (Ghost, Ghost) => 2.0,

            // Dragon
            (Dragon, Dragon) => 2.0,

            _ => 1.0,
        }
    }

    /// Compound multiplier against every type of the defender (one or two).
    pub fn effectiveness_against(self, defending: &[PokemonType]) -> f32 {
        defending
            .iter()
            .map(|&defender| Self::type_effectiveness(self, defender))
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_type_lookups() {
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Water, PokemonType::Fire), 2.0);
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Fire, PokemonType::Water), 0.5);
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Normal, PokemonType::Ghost), 0.0);
        assert_eq!(PokemonType::type_effectiveness(PokemonType::Normal, PokemonType::Water), 1.0);
    }

    #[test]
    fn dual_types_compound() {
        use PokemonType::*;
        assert_eq!(Ice.effectiveness_against(&[Grass, Flying]), 4.0);
        assert_eq!(Fire.effectiveness_against(&[Water, Rock]), 0.25);
        assert_eq!(Electric.effectiveness_against(&[Water, Ground]), 0.0);
        assert_eq!(Grass.effectiveness_against(&[Normal]), 1.0);
    }
}
