use serde::{Deserialize, Serialize};

use super::gameplay::{EnemyKind, MonsterKind, OreKind};

type ConfigResult<T> = Result<T, String>;

/// All tuning data for one world, injected at construction time. Defaults
/// reproduce the shipped balance; operators can override any subset via a
/// JSON file because every section falls back field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GameConfig {
    pub(crate) map: MapConfig,
    pub(crate) viewport: ViewportConfig,
    pub(crate) spawn: SpawnConfig,
    pub(crate) player: PlayerConfig,
    pub(crate) npc: NpcConfig,
    pub(crate) enemy: EnemyConfig,
    pub(crate) monster: MonsterConfig,
    pub(crate) ore_types: Vec<OreTypeConfig>,
    pub(crate) monster_types: Vec<MonsterTypeConfig>,
    pub(crate) enemy_types: Vec<EnemyTypeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MapConfig {
    pub(crate) cols: u32,
    pub(crate) rows: u32,
    pub(crate) tile_size: f32,
    pub(crate) wall_walks: u32,
    pub(crate) wall_walk_length: u32,
    pub(crate) water_walks: u32,
    pub(crate) water_walk_length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ViewportConfig {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SpawnConfig {
    pub(crate) ore_deposits: u32,
    pub(crate) monsters: u32,
    pub(crate) enemies: u32,
    pub(crate) placement_attempt_cap: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PlayerConfig {
    pub(crate) move_speed: f32,
    pub(crate) max_hp: i32,
    pub(crate) attack_radius: f32,
    pub(crate) attack_damage: i32,
    pub(crate) attack_interval_seconds: f32,
    pub(crate) multishot_targets: usize,
    pub(crate) mining_range: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct NpcConfig {
    pub(crate) move_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct EnemyConfig {
    pub(crate) aggro_radius: f32,
    pub(crate) aggro_lose_radius_min: f32,
    pub(crate) aggro_lose_radius_max: f32,
    pub(crate) pursuit_speed_multiplier: f32,
    pub(crate) attack_radius: f32,
    pub(crate) attack_damage: i32,
    pub(crate) attack_interval_seconds: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MonsterConfig {
    pub(crate) follow_distance: f32,
    pub(crate) catch_chance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OreTypeConfig {
    pub(crate) kind: OreKind,
    pub(crate) weight: u32,
    pub(crate) energy_min: u32,
    pub(crate) energy_max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MonsterTypeConfig {
    pub(crate) kind: MonsterKind,
    pub(crate) weight: u32,
    pub(crate) hp_min: i32,
    pub(crate) hp_max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct EnemyTypeConfig {
    pub(crate) kind: EnemyKind,
    pub(crate) weight: u32,
    pub(crate) hp_min: i32,
    pub(crate) hp_max: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 40,
            tile_size: 50.0,
            wall_walks: 5,
            wall_walk_length: 20,
            water_walks: 3,
            water_walk_length: 15,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1800.0,
            height: 800.0,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            ore_deposits: 10,
            monsters: 5,
            enemies: 3,
            placement_attempt_cap: 10_000,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 200.0,
            max_hp: 100,
            attack_radius: 200.0,
            attack_damage: 5,
            attack_interval_seconds: 1.0,
            multishot_targets: 1,
            mining_range: 75.0,
        }
    }
}

impl Default for NpcConfig {
    fn default() -> Self {
        // A quarter of the player's speed.
        Self { move_speed: 50.0 }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            aggro_radius: 300.0,
            aggro_lose_radius_min: 330.0,
            aggro_lose_radius_max: 450.0,
            pursuit_speed_multiplier: 1.2,
            attack_radius: 75.0,
            attack_damage: 5,
            attack_interval_seconds: 1.5,
        }
    }
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            follow_distance: 100.0,
            catch_chance: 0.5,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            viewport: ViewportConfig::default(),
            spawn: SpawnConfig::default(),
            player: PlayerConfig::default(),
            npc: NpcConfig::default(),
            enemy: EnemyConfig::default(),
            monster: MonsterConfig::default(),
            ore_types: vec![
                OreTypeConfig {
                    kind: OreKind::Lavasteel,
                    weight: 70,
                    energy_min: 1,
                    energy_max: 3,
                },
                OreTypeConfig {
                    kind: OreKind::Mithril,
                    weight: 25,
                    energy_min: 2,
                    energy_max: 6,
                },
                OreTypeConfig {
                    kind: OreKind::Obsidianite,
                    weight: 5,
                    energy_min: 8,
                    energy_max: 12,
                },
            ],
            monster_types: vec![
                MonsterTypeConfig {
                    kind: MonsterKind::Fluffel,
                    weight: 40,
                    hp_min: 10,
                    hp_max: 20,
                },
                MonsterTypeConfig {
                    kind: MonsterKind::Grumblet,
                    weight: 30,
                    hp_min: 15,
                    hp_max: 25,
                },
                MonsterTypeConfig {
                    kind: MonsterKind::Sparkleon,
                    weight: 15,
                    hp_min: 20,
                    hp_max: 30,
                },
                MonsterTypeConfig {
                    kind: MonsterKind::Rocko,
                    weight: 10,
                    hp_min: 25,
                    hp_max: 35,
                },
                MonsterTypeConfig {
                    kind: MonsterKind::Wispwing,
                    weight: 5,
                    hp_min: 30,
                    hp_max: 40,
                },
            ],
            enemy_types: vec![
                EnemyTypeConfig {
                    kind: EnemyKind::Goblin,
                    weight: 50,
                    hp_min: 20,
                    hp_max: 30,
                },
                EnemyTypeConfig {
                    kind: EnemyKind::Troll,
                    weight: 30,
                    hp_min: 30,
                    hp_max: 40,
                },
                EnemyTypeConfig {
                    kind: EnemyKind::Wraith,
                    weight: 20,
                    hp_min: 25,
                    hp_max: 35,
                },
            ],
        }
    }
}

impl GameConfig {
    pub(crate) fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let config: GameConfig = match serde_path_to_error::deserialize(&mut deserializer) {
            Ok(config) => config,
            Err(error) => {
                let path = error.path().to_string();
                let source = error.into_inner();
                if path.is_empty() || path == "." {
                    return Err(format!("parse config json: {source}"));
                }
                return Err(format!("parse config json at {path}: {source}"));
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> ConfigResult<()> {
        if self.map.cols == 0 || self.map.rows == 0 {
            return Err(format!(
                "map dimensions must be positive, got {}x{}",
                self.map.cols, self.map.rows
            ));
        }
        if !(self.map.tile_size > 0.0) {
            return Err(format!("tile_size must be positive, got {}", self.map.tile_size));
        }
        if !(self.viewport.width > 0.0) || !(self.viewport.height > 0.0) {
            return Err(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            ));
        }
        if self.spawn.placement_attempt_cap == 0 {
            return Err("placement_attempt_cap must be at least 1".to_string());
        }

        let tile_count = self.map.cols as u64 * self.map.rows as u64;
        let entity_count = self.spawn.ore_deposits as u64 + self.spawn.monsters as u64
            + self.spawn.enemies as u64
            + 1;
        if entity_count > tile_count {
            return Err(format!(
                "spawn counts require {entity_count} distinct tiles but the map has {tile_count}"
            ));
        }

        validate_weight_table("ore_types", self.ore_types.iter().map(|row| row.weight))?;
        validate_weight_table(
            "monster_types",
            self.monster_types.iter().map(|row| row.weight),
        )?;
        validate_weight_table("enemy_types", self.enemy_types.iter().map(|row| row.weight))?;

        for (index, row) in self.ore_types.iter().enumerate() {
            if row.energy_min == 0 || row.energy_min > row.energy_max {
                return Err(format!(
                    "ore_types[{index}]: bad energy range {}..{}",
                    row.energy_min, row.energy_max
                ));
            }
        }
        for (index, row) in self.monster_types.iter().enumerate() {
            if row.hp_min <= 0 || row.hp_min > row.hp_max {
                return Err(format!(
                    "monster_types[{index}]: bad hp range {}..{}",
                    row.hp_min, row.hp_max
                ));
            }
        }
        for (index, row) in self.enemy_types.iter().enumerate() {
            if row.hp_min <= 0 || row.hp_min > row.hp_max {
                return Err(format!(
                    "enemy_types[{index}]: bad hp range {}..{}",
                    row.hp_min, row.hp_max
                ));
            }
        }

        if !(self.player.move_speed > 0.0) || !(self.npc.move_speed > 0.0) {
            return Err("move speeds must be positive".to_string());
        }
        if self.player.max_hp <= 0 {
            return Err(format!("player max_hp must be positive, got {}", self.player.max_hp));
        }
        if self.player.multishot_targets == 0 {
            return Err("multishot_targets must be at least 1".to_string());
        }
        if !(self.player.mining_range > 0.0) {
            return Err(format!(
                "mining_range must be positive, got {}",
                self.player.mining_range
            ));
        }
        if !(self.enemy.aggro_radius > 0.0) {
            return Err(format!(
                "aggro_radius must be positive, got {}",
                self.enemy.aggro_radius
            ));
        }
        if self.enemy.aggro_lose_radius_min < self.enemy.aggro_radius {
            return Err(format!(
                "aggro_lose_radius_min {} must not undercut aggro_radius {}",
                self.enemy.aggro_lose_radius_min, self.enemy.aggro_radius
            ));
        }
        if self.enemy.aggro_lose_radius_max < self.enemy.aggro_lose_radius_min {
            return Err(format!(
                "aggro_lose_radius_max {} is below aggro_lose_radius_min {}",
                self.enemy.aggro_lose_radius_max, self.enemy.aggro_lose_radius_min
            ));
        }
        if !(self.enemy.pursuit_speed_multiplier > 0.0) {
            return Err("pursuit_speed_multiplier must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.monster.catch_chance) {
            return Err(format!(
                "catch_chance must be within 0..=1, got {}",
                self.monster.catch_chance
            ));
        }
        if self.monster.follow_distance < 0.0 {
            return Err(format!(
                "follow_distance must not be negative, got {}",
                self.monster.follow_distance
            ));
        }
        Ok(())
    }
}

fn validate_weight_table(name: &str, weights: impl Iterator<Item = u32>) -> ConfigResult<()> {
    let mut total = 0u64;
    let mut rows = 0usize;
    for weight in weights {
        total += weight as u64;
        rows += 1;
    }
    if rows == 0 {
        return Err(format!("{name} must not be empty"));
    }
    if total == 0 {
        return Err(format!("{name} weights sum to zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GameConfig::default().validate().expect("default config");
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).expect("encode");
        let parsed = GameConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let parsed = GameConfig::from_json_str(r#"{"spawn": {"enemies": 7}}"#).expect("parse");
        assert_eq!(parsed.spawn.enemies, 7);
        assert_eq!(parsed.spawn.ore_deposits, 10);
        assert_eq!(parsed.map.cols, 40);
    }

    #[test]
    fn parse_error_reports_field_path() {
        let err = GameConfig::from_json_str(r#"{"spawn": {"enemies": "many"}}"#).expect_err("err");
        assert!(err.contains("spawn.enemies"), "unexpected message: {err}");
    }

    #[test]
    fn zero_weight_table_is_rejected() {
        let mut config = GameConfig::default();
        for row in &mut config.ore_types {
            row.weight = 0;
        }
        let err = config.validate().expect_err("err");
        assert!(err.contains("ore_types"), "unexpected message: {err}");
    }

    #[test]
    fn empty_enemy_table_is_rejected() {
        let mut config = GameConfig::default();
        config.enemy_types.clear();
        let err = config.validate().expect_err("err");
        assert!(err.contains("enemy_types"), "unexpected message: {err}");
    }

    #[test]
    fn overpacked_spawn_counts_are_rejected() {
        let mut config = GameConfig::default();
        config.map.cols = 3;
        config.map.rows = 3;
        let err = config.validate().expect_err("err");
        assert!(err.contains("distinct tiles"), "unexpected message: {err}");
    }

    #[test]
    fn lose_radius_may_not_undercut_aggro_radius() {
        let mut config = GameConfig::default();
        config.enemy.aggro_lose_radius_min = 100.0;
        let err = config.validate().expect_err("err");
        assert!(err.contains("aggro_lose_radius_min"), "unexpected message: {err}");
    }

    #[test]
    fn catch_chance_outside_unit_interval_is_rejected() {
        let mut config = GameConfig::default();
        config.monster.catch_chance = 1.5;
        assert!(config.validate().is_err());
    }
}
