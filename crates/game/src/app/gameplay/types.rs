#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct EntityId(pub(crate) u64);

#[derive(Debug, Default)]
pub(crate) struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub(crate) fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunState {
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum OreKind {
    Lavasteel,
    Mithril,
    Obsidianite,
}

impl OreKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Lavasteel => "Lavasteel",
            Self::Mithril => "Mithril",
            Self::Obsidianite => "Obsidianite",
        }
    }

    pub(crate) fn color_hex(self) -> &'static str {
        match self {
            Self::Lavasteel => "#FFA07A",
            Self::Mithril => "#FFFFE0",
            Self::Obsidianite => "#4B0082",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum MonsterKind {
    Fluffel,
    Grumblet,
    Sparkleon,
    Rocko,
    Wispwing,
}

impl MonsterKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Fluffel => "Fluffel",
            Self::Grumblet => "Grumblet",
            Self::Sparkleon => "Sparkleon",
            Self::Rocko => "Rocko",
            Self::Wispwing => "Wispwing",
        }
    }

    pub(crate) fn color_hex(self) -> &'static str {
        match self {
            Self::Fluffel => "#FFD700",
            Self::Grumblet => "#8B4513",
            Self::Sparkleon => "#FF69B4",
            Self::Rocko => "#808080",
            Self::Wispwing => "#87CEEB",
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            Self::Fluffel => "A fluffy creature that loves to nap.",
            Self::Grumblet => "A grumpy beast with a loud roar.",
            Self::Sparkleon => "A shiny creature that glows in the dark.",
            Self::Rocko => "A sturdy rock-like monster with a tough shell.",
            Self::Wispwing => "A wispy flyer that drifts with the wind.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum EnemyKind {
    Goblin,
    Troll,
    Wraith,
}

impl EnemyKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Goblin => "Goblin",
            Self::Troll => "Troll",
            Self::Wraith => "Wraith",
        }
    }

    pub(crate) fn letter(self) -> char {
        match self {
            Self::Goblin => 'G',
            Self::Troll => 'T',
            Self::Wraith => 'W',
        }
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            Self::Goblin => "A sneaky creature with sharp claws.",
            Self::Troll => "A large brute that guards its territory.",
            Self::Wraith => "A ghostly figure with a chilling presence.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OreDeposit {
    pub(crate) id: EntityId,
    pub(crate) rect: Rect,
    pub(crate) kind: OreKind,
    pub(crate) energy: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WanderPhase {
    Moving,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Heading {
    Left,
    Right,
    Up,
    Down,
}

impl Heading {
    pub(crate) fn roll(rng: &mut StdRng) -> Self {
        match rng.gen_range(0..4u32) {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Up,
            _ => Self::Down,
        }
    }

    pub(crate) fn unit(self) -> Vec2 {
        match self {
            Self::Left => Vec2 { x: -1.0, y: 0.0 },
            Self::Right => Vec2 { x: 1.0, y: 0.0 },
            Self::Up => Vec2 { x: 0.0, y: -1.0 },
            Self::Down => Vec2 { x: 0.0, y: 1.0 },
        }
    }
}

fn roll_move_time(rng: &mut StdRng) -> f32 {
    rng.gen_range(WANDER_MOVE_TIME_MIN_SECONDS..WANDER_MOVE_TIME_MAX_SECONDS)
}

fn roll_pause_time(rng: &mut StdRng) -> f32 {
    rng.gen_range(WANDER_PAUSE_TIME_MIN_SECONDS..WANDER_PAUSE_TIME_MAX_SECONDS)
}

/// Two-phase dwell timer shared by every non-player creature. `elapsed`
/// resets to zero on every transition, and the dwell duration of the
/// entered phase is re-rolled on entry; entering `Moving` also rolls a
/// fresh heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WanderState {
    pub(crate) phase: WanderPhase,
    pub(crate) heading: Heading,
    pub(crate) move_time_seconds: f32,
    pub(crate) pause_time_seconds: f32,
    pub(crate) elapsed_seconds: f32,
}

impl WanderState {
    pub(crate) fn roll(rng: &mut StdRng) -> Self {
        Self {
            phase: WanderPhase::Moving,
            heading: Heading::roll(rng),
            move_time_seconds: roll_move_time(rng),
            pause_time_seconds: roll_pause_time(rng),
            elapsed_seconds: 0.0,
        }
    }

    /// Advance the dwell timer. Returns true when the creature should take
    /// a movement step this tick (it still moves on the tick that flips it
    /// into `Paused`).
    pub(crate) fn tick(&mut self, dt_seconds: f32, rng: &mut StdRng) -> bool {
        self.elapsed_seconds += dt_seconds;
        match self.phase {
            WanderPhase::Moving => {
                if self.elapsed_seconds >= self.move_time_seconds {
                    self.phase = WanderPhase::Paused;
                    self.elapsed_seconds = 0.0;
                    self.pause_time_seconds = roll_pause_time(rng);
                }
                true
            }
            WanderPhase::Paused => {
                if self.elapsed_seconds >= self.pause_time_seconds {
                    self.phase = WanderPhase::Moving;
                    self.elapsed_seconds = 0.0;
                    self.move_time_seconds = roll_move_time(rng);
                    self.heading = Heading::roll(rng);
                }
                false
            }
        }
    }

    pub(crate) fn reroll_heading(&mut self, rng: &mut StdRng) {
        self.heading = Heading::roll(rng);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Monster {
    pub(crate) id: EntityId,
    pub(crate) rect: Rect,
    pub(crate) kind: MonsterKind,
    pub(crate) hp: i32,
    pub(crate) move_speed: f32,
    pub(crate) wander: WanderState,
    pub(crate) tamed: bool,
    pub(crate) catch_chance: f32,
    pub(crate) follow_distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Enemy {
    pub(crate) id: EntityId,
    pub(crate) rect: Rect,
    pub(crate) kind: EnemyKind,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) move_speed: f32,
    pub(crate) wander: WanderState,
    pub(crate) aggroed: bool,
    // Wander phase saved on aggro entry and restored on exit, so a chase
    // does not consume the dwell the enemy had banked.
    pub(crate) was_moving: bool,
    pub(crate) saved_elapsed_seconds: f32,
    pub(crate) aggro_lose_radius: f32,
    pub(crate) attack_damage: i32,
    pub(crate) attack_interval_seconds: f32,
    pub(crate) attack_cooldown_seconds: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Player {
    pub(crate) rect: Rect,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) move_speed: f32,
    pub(crate) total_energy: u32,
    pub(crate) attack_radius: f32,
    pub(crate) attack_damage: i32,
    pub(crate) attack_interval_seconds: f32,
    pub(crate) attack_cooldown_seconds: f32,
    pub(crate) multishot_targets: usize,
    pub(crate) mining_range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MiningSession {
    pub(crate) target: EntityId,
    pub(crate) hold_seconds: f32,
}

/// Snapshot for progress-bar rendering: `fraction` is how far the current
/// one-second hold has progressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MiningProgress {
    pub(crate) target: EntityId,
    pub(crate) fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TameOutcome {
    Tamed,
    Enraged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum WorldEvent {
    EnergyMined { deposit: EntityId },
    OreDepleted { deposit: EntityId },
    AggroGained { enemy: EntityId },
    AggroLost { enemy: EntityId },
    PlayerHit { enemy: EntityId, damage: i32 },
    EnemyStruck { enemy: EntityId, damage: i32 },
    EnemySlain { enemy: EntityId, reward: u32 },
    MonsterTamed { monster: EntityId },
    MonsterEnraged { monster: EntityId, enemy: EntityId },
    PlayerDied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorldEventKind {
    EnergyMined,
    OreDepleted,
    AggroGained,
    AggroLost,
    PlayerHit,
    EnemyStruck,
    EnemySlain,
    MonsterTamed,
    MonsterEnraged,
    PlayerDied,
}

impl WorldEvent {
    fn kind(self) -> WorldEventKind {
        match self {
            Self::EnergyMined { .. } => WorldEventKind::EnergyMined,
            Self::OreDepleted { .. } => WorldEventKind::OreDepleted,
            Self::AggroGained { .. } => WorldEventKind::AggroGained,
            Self::AggroLost { .. } => WorldEventKind::AggroLost,
            Self::PlayerHit { .. } => WorldEventKind::PlayerHit,
            Self::EnemyStruck { .. } => WorldEventKind::EnemyStruck,
            Self::EnemySlain { .. } => WorldEventKind::EnemySlain,
            Self::MonsterTamed { .. } => WorldEventKind::MonsterTamed,
            Self::MonsterEnraged { .. } => WorldEventKind::MonsterEnraged,
            Self::PlayerDied => WorldEventKind::PlayerDied,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WorldEventCounts {
    pub(crate) total: u32,
    pub(crate) energy_mined: u32,
    pub(crate) ore_depleted: u32,
    pub(crate) aggro_gained: u32,
    pub(crate) aggro_lost: u32,
    pub(crate) player_hit: u32,
    pub(crate) enemy_struck: u32,
    pub(crate) enemy_slain: u32,
    pub(crate) monster_tamed: u32,
    pub(crate) monster_enraged: u32,
    pub(crate) player_died: u32,
}

impl WorldEventCounts {
    fn record(&mut self, kind: WorldEventKind) {
        self.total = self.total.saturating_add(1);
        match kind {
            WorldEventKind::EnergyMined => self.energy_mined = self.energy_mined.saturating_add(1),
            WorldEventKind::OreDepleted => self.ore_depleted = self.ore_depleted.saturating_add(1),
            WorldEventKind::AggroGained => self.aggro_gained = self.aggro_gained.saturating_add(1),
            WorldEventKind::AggroLost => self.aggro_lost = self.aggro_lost.saturating_add(1),
            WorldEventKind::PlayerHit => self.player_hit = self.player_hit.saturating_add(1),
            WorldEventKind::EnemyStruck => self.enemy_struck = self.enemy_struck.saturating_add(1),
            WorldEventKind::EnemySlain => self.enemy_slain = self.enemy_slain.saturating_add(1),
            WorldEventKind::MonsterTamed => {
                self.monster_tamed = self.monster_tamed.saturating_add(1)
            }
            WorldEventKind::MonsterEnraged => {
                self.monster_enraged = self.monster_enraged.saturating_add(1)
            }
            WorldEventKind::PlayerDied => self.player_died = self.player_died.saturating_add(1),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct WorldEventBus {
    current_tick_events: Vec<WorldEvent>,
    last_tick_counts: WorldEventCounts,
}

impl WorldEventBus {
    pub(crate) fn emit(&mut self, event: WorldEvent) {
        self.current_tick_events.push(event);
    }

    /// Count and log the tick's events, then clear for the next tick.
    pub(crate) fn finish_tick_rollover(&mut self) {
        let mut counts = WorldEventCounts::default();
        for event in self.current_tick_events.drain(..) {
            counts.record(event.kind());
            match event {
                WorldEvent::EnergyMined { deposit } => {
                    debug!(deposit = deposit.0, "energy_mined");
                }
                WorldEvent::OreDepleted { deposit } => {
                    debug!(deposit = deposit.0, "ore_depleted");
                }
                WorldEvent::AggroGained { enemy } => {
                    debug!(enemy = enemy.0, "aggro_gained");
                }
                WorldEvent::AggroLost { enemy } => {
                    debug!(enemy = enemy.0, "aggro_lost");
                }
                WorldEvent::PlayerHit { enemy, damage } => {
                    debug!(enemy = enemy.0, damage, "player_hit");
                }
                WorldEvent::EnemyStruck { enemy, damage } => {
                    debug!(enemy = enemy.0, damage, "enemy_struck");
                }
                WorldEvent::EnemySlain { enemy, reward } => {
                    debug!(enemy = enemy.0, reward, "enemy_slain");
                }
                WorldEvent::MonsterTamed { monster } => {
                    debug!(monster = monster.0, "monster_tamed");
                }
                WorldEvent::MonsterEnraged { monster, enemy } => {
                    debug!(monster = monster.0, enemy = enemy.0, "monster_enraged");
                }
                WorldEvent::PlayerDied => {
                    debug!("player_died");
                }
            }
        }
        self.last_tick_counts = counts;
    }

    pub(crate) fn last_tick_counts(&self) -> WorldEventCounts {
        self.last_tick_counts
    }
}
