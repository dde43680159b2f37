//! Stat formulas: level scaling and boost-stage multipliers.

pub const MAX_STAGE: i8 = 6;

/// Multipliers for combat stats at stages 0..=6. Negative stages divide.
pub const STAT_BOOST_TABLE: [f32; 7] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];

/// Multipliers for accuracy and evasion at stages 0..=6. Negative stages divide.
pub const ACCURACY_BOOST_TABLE: [f32; 7] = [
    1.0,
    4.0 / 3.0,
    5.0 / 3.0,
    2.0,
    7.0 / 3.0,
    8.0 / 3.0,
    3.0,
];

/// A non-HP stat at `level`: `floor(base * level / 100) + 5`.
pub fn calculate_stat(base: u16, level: u8) -> u16 {
    (base as u32 * level as u32 / 100) as u16 + 5
}

/// Max HP at `level`: `floor(base * level / 100) + 10 + level`.
pub fn calculate_max_hp(base_hp: u16, level: u8) -> u16 {
    (base_hp as u32 * level as u32 / 100) as u16 + 10 + level as u16
}

pub fn clamp_stage(stage: i16) -> i8 {
    stage.clamp(-(MAX_STAGE as i16), MAX_STAGE as i16) as i8
}

fn table_multiplier(table: &[f32; 7], stage: i8) -> f32 {
    let index = stage.unsigned_abs().min(MAX_STAGE as u8) as usize;
    if stage >= 0 {
        table[index]
    } else {
        1.0 / table[index]
    }
}

/// Apply a combat-stat stage to `base`, flooring the result.
pub fn effective_stat(base: u16, stage: i8) -> u16 {
    let index = stage.unsigned_abs().min(MAX_STAGE as u8) as usize;
    let boosted = if stage >= 0 {
        base as f32 * STAT_BOOST_TABLE[index]
    } else {
        base as f32 / STAT_BOOST_TABLE[index]
    };
    boosted.floor() as u16
}

pub fn accuracy_multiplier(stage: i8) -> f32 {
    table_multiplier(&ACCURACY_BOOST_TABLE, stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, 0, 100)]
    #[case(100, 1, 150)]
    #[case(100, 6, 400)]
    #[case(100, -1, 66)]
    #[case(100, -2, 50)]
    #[case(100, -6, 25)]
    #[case(15, 1, 22)]
    fn effective_stat_follows_boost_table(
        #[case] base: u16,
        #[case] stage: i8,
        #[case] expected: u16,
    ) {
        assert_eq!(effective_stat(base, stage), expected);
    }

    #[rstest]
    #[case(0, 1.0)]
    #[case(3, 2.0)]
    #[case(-3, 0.5)]
    #[case(6, 3.0)]
    fn accuracy_multiplier_follows_table(#[case] stage: i8, #[case] expected: f32) {
        assert!((accuracy_multiplier(stage) - expected).abs() < 1e-6);
    }

    #[test]
    fn level_scaling() {
        assert_eq!(calculate_stat(55, 25), 18);
        assert_eq!(calculate_stat(90, 25), 27);
        assert_eq!(calculate_max_hp(35, 25), 43);
        assert_eq!(calculate_max_hp(50, 100), 160);
    }

    #[test]
    fn stages_clamp_to_six() {
        assert_eq!(clamp_stage(9), 6);
        assert_eq!(clamp_stage(-12), -6);
        assert_eq!(clamp_stage(-2), -2);
    }
}
