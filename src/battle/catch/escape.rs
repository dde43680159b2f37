use crate::battle::rng::TurnRng;
use tracing::debug;

/// Odds (out of 256) of fleeing: `(playerSpeed*128/enemySpeed + 30*attempts) % 256`.
pub fn escape_odds(player_speed: u16, enemy_speed: u16, attempts: u32) -> u32 {
    let speed_term = player_speed as u32 * 128 / enemy_speed.max(1) as u32;
    (speed_term + 30 * attempts) % 256
}

/// Roll an escape attempt. A faster player always gets away without a roll.
pub fn try_escape(player_speed: u16, enemy_speed: u16, attempts: u32, rng: &mut TurnRng) -> bool {
    if enemy_speed < player_speed {
        return true;
    }
    let odds = escape_odds(player_speed, enemy_speed, attempts);
    let roll = rng.range("escape roll", 0, 255);
    debug!(player_speed, enemy_speed, attempts, odds, roll, "escape attempt");
    roll < odds
}
