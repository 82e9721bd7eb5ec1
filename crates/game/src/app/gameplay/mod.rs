use engine::{
    Camera2D, InputAction, InputSnapshot, Rect, TileGrid, TileKind, Vec2, Viewport,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::{EnemyConfig, GameConfig};
use super::worldgen;

const MOVEMENT_TOLERANCE: f32 = 0.1;
const NPC_MAX_STEP: f32 = 5.0;
const WANDER_MOVE_TIME_MIN_SECONDS: f32 = 3.0;
const WANDER_MOVE_TIME_MAX_SECONDS: f32 = 10.0;
const WANDER_PAUSE_TIME_MIN_SECONDS: f32 = 1.0;
const WANDER_PAUSE_TIME_MAX_SECONDS: f32 = 8.0;
const MINING_SECONDS_PER_ENERGY: f32 = 1.0;
const ENEMY_SLAY_REWARD_DIVISOR: i32 = 10;

include!("types.rs");
include!("spawn.rs");
include!("movement.rs");
include!("behavior.rs");
include!("world.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
