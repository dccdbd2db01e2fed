use std::time::Duration;

use clap::Parser;

/// How long the cross stays up after a crash.
pub const LOSS_GLYPH_DELAY: Duration = Duration::from_millis(800);
/// Pause between the score finishing and the next round.
pub const RESTART_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Parser)]
#[command(name = "matrix-snake", version, about = "Snake on an 8x8 pixel matrix")]
pub struct Config {
    /// Starting tick period in milliseconds
    #[arg(long, env = "SNAKE_TICK_DELAY", default_value_t = 400, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_delay: u64,

    /// How much faster each piece of food makes the game, in milliseconds
    #[arg(long, env = "SNAKE_TICK_MODIFIER", default_value_t = 10)]
    pub tick_modifier: u64,

    /// The tick period never drops below this, in milliseconds
    #[arg(long, env = "SNAKE_MIN_TICK_DELAY", default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub min_tick_delay: u64,

    /// Maze to start on (wraps around the catalog)
    #[arg(long, env = "SNAKE_MAZE", default_value_t = 0)]
    pub maze: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config { tick_delay: 400, tick_modifier: 10, min_tick_delay: 50, maze: 0 }
    }
}

impl Config {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay)
    }

    /// The period after one more piece of food, clamped to the floor.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let floor = Duration::from_millis(self.min_tick_delay.min(self.tick_delay));
        current
            .checked_sub(Duration::from_millis(self.tick_modifier))
            .map_or(floor, |d| d.max(floor))
    }
}
