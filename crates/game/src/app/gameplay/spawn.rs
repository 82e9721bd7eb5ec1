/// Cumulative-threshold selection over integer weights. Weights do not
/// have to sum to 100; the draw is uniform over the actual total.
#[derive(Debug, Clone)]
pub(crate) struct SpawnTable<K: Copy> {
    thresholds: Vec<(K, u32)>,
    total: u32,
}

impl<K: Copy> SpawnTable<K> {
    pub(crate) fn new(rows: &[(K, u32)]) -> Result<Self, String> {
        let mut thresholds = Vec::with_capacity(rows.len());
        let mut total = 0u32;
        for (kind, weight) in rows {
            total = total.saturating_add(*weight);
            thresholds.push((*kind, total));
        }
        if thresholds.is_empty() || total == 0 {
            return Err("spawn table needs at least one row with a positive weight".to_string());
        }
        Ok(Self { thresholds, total })
    }

    pub(crate) fn pick(&self, rng: &mut StdRng) -> K {
        self.pick_with_draw(rng.gen_range(0.0..self.total as f32))
    }

    /// First kind whose cumulative threshold is >= the draw; a draw past
    /// every threshold falls back to the first row.
    fn pick_with_draw(&self, draw: f32) -> K {
        let mut picked = self.thresholds[0].0;
        for (kind, threshold) in &self.thresholds {
            if draw <= *threshold as f32 {
                picked = *kind;
                break;
            }
        }
        picked
    }
}

/// Rejection-sample a tile-aligned position whose tile-sized rect sits on
/// walkable ground, clear of every placed deposit, and not coincident with
/// any position in `occupied`. The attempt cap turns a degenerate map
/// (e.g. fully walled) into an error instead of a hang.
fn sample_tile_position(
    grid: &TileGrid,
    deposits: &[OreDeposit],
    occupied: &[Vec2],
    rng: &mut StdRng,
    attempt_cap: u32,
    what: &str,
) -> Result<Vec2, String> {
    let tile = grid.tile_size();
    for _ in 0..attempt_cap {
        let col = rng.gen_range(0..grid.cols());
        let row = rng.gen_range(0..grid.rows());
        let position = Vec2 {
            x: col as f32 * tile,
            y: row as f32 * tile,
        };
        let rect = Rect::new(position.x, position.y, tile, tile);
        if !grid.rect_is_walkable(&rect) {
            continue;
        }
        if deposits.iter().any(|deposit| rect.overlaps(&deposit.rect)) {
            continue;
        }
        if occupied.iter().any(|taken| *taken == position) {
            continue;
        }
        return Ok(position);
    }
    Err(format!(
        "failed to place {what} after {attempt_cap} attempts; not enough walkable tiles"
    ))
}

pub(crate) fn spawn_ore_deposits(
    config: &GameConfig,
    grid: &TileGrid,
    rng: &mut StdRng,
    allocator: &mut EntityIdAllocator,
) -> Result<Vec<OreDeposit>, String> {
    let rows: Vec<(usize, u32)> = config
        .ore_types
        .iter()
        .enumerate()
        .map(|(index, row)| (index, row.weight))
        .collect();
    let table = SpawnTable::new(&rows)?;
    let tile = grid.tile_size();

    let mut deposits = Vec::with_capacity(config.spawn.ore_deposits as usize);
    for _ in 0..config.spawn.ore_deposits {
        let occupied: Vec<Vec2> = deposits
            .iter()
            .map(|deposit: &OreDeposit| Vec2 {
                x: deposit.rect.x,
                y: deposit.rect.y,
            })
            .collect();
        let position = sample_tile_position(
            grid,
            &deposits,
            &occupied,
            rng,
            config.spawn.placement_attempt_cap,
            "ore deposit",
        )?;
        let row = &config.ore_types[table.pick(rng)];
        let energy = rng.gen_range(row.energy_min..=row.energy_max);
        deposits.push(OreDeposit {
            id: allocator.allocate(),
            rect: Rect::new(position.x, position.y, tile, tile),
            kind: row.kind,
            energy,
        });
    }
    Ok(deposits)
}

pub(crate) fn sample_player_position(
    config: &GameConfig,
    grid: &TileGrid,
    deposits: &[OreDeposit],
    rng: &mut StdRng,
) -> Result<Vec2, String> {
    sample_tile_position(
        grid,
        deposits,
        &[],
        rng,
        config.spawn.placement_attempt_cap,
        "player",
    )
}

pub(crate) fn spawn_monsters(
    config: &GameConfig,
    grid: &TileGrid,
    deposits: &[OreDeposit],
    player_position: Vec2,
    rng: &mut StdRng,
    allocator: &mut EntityIdAllocator,
) -> Result<Vec<Monster>, String> {
    let rows: Vec<(usize, u32)> = config
        .monster_types
        .iter()
        .enumerate()
        .map(|(index, row)| (index, row.weight))
        .collect();
    let table = SpawnTable::new(&rows)?;
    let tile = grid.tile_size();

    let mut monsters = Vec::with_capacity(config.spawn.monsters as usize);
    for _ in 0..config.spawn.monsters {
        let mut occupied: Vec<Vec2> = monsters
            .iter()
            .map(|monster: &Monster| Vec2 {
                x: monster.rect.x,
                y: monster.rect.y,
            })
            .collect();
        occupied.push(player_position);
        let position = sample_tile_position(
            grid,
            deposits,
            &occupied,
            rng,
            config.spawn.placement_attempt_cap,
            "monster",
        )?;
        let row = &config.monster_types[table.pick(rng)];
        let hp = rng.gen_range(row.hp_min..=row.hp_max);
        monsters.push(Monster {
            id: allocator.allocate(),
            rect: Rect::new(position.x, position.y, tile, tile),
            kind: row.kind,
            hp,
            move_speed: config.npc.move_speed,
            wander: WanderState::roll(rng),
            tamed: false,
            catch_chance: config.monster.catch_chance,
            follow_distance: config.monster.follow_distance,
        });
    }
    Ok(monsters)
}

pub(crate) fn spawn_enemies(
    config: &GameConfig,
    grid: &TileGrid,
    deposits: &[OreDeposit],
    monsters: &[Monster],
    player_position: Vec2,
    rng: &mut StdRng,
    allocator: &mut EntityIdAllocator,
) -> Result<Vec<Enemy>, String> {
    let rows: Vec<(usize, u32)> = config
        .enemy_types
        .iter()
        .enumerate()
        .map(|(index, row)| (index, row.weight))
        .collect();
    let table = SpawnTable::new(&rows)?;
    let tile = grid.tile_size();

    let mut enemies = Vec::with_capacity(config.spawn.enemies as usize);
    for _ in 0..config.spawn.enemies {
        let mut occupied: Vec<Vec2> = enemies
            .iter()
            .map(|enemy: &Enemy| Vec2 {
                x: enemy.rect.x,
                y: enemy.rect.y,
            })
            .collect();
        occupied.extend(monsters.iter().map(|monster| Vec2 {
            x: monster.rect.x,
            y: monster.rect.y,
        }));
        occupied.push(player_position);
        let position = sample_tile_position(
            grid,
            deposits,
            &occupied,
            rng,
            config.spawn.placement_attempt_cap,
            "enemy",
        )?;
        let row = &config.enemy_types[table.pick(rng)];
        let hp = rng.gen_range(row.hp_min..=row.hp_max);
        enemies.push(new_enemy(
            allocator.allocate(),
            Rect::new(position.x, position.y, tile, tile),
            row.kind,
            hp,
            hp,
            config,
            rng,
        ));
    }
    Ok(enemies)
}

/// Shared by world generation and failed taming. The aggro-lose radius is
/// rolled once here and never again; hysteresis depends on it staying put.
fn new_enemy(
    id: EntityId,
    rect: Rect,
    kind: EnemyKind,
    hp: i32,
    max_hp: i32,
    config: &GameConfig,
    rng: &mut StdRng,
) -> Enemy {
    Enemy {
        id,
        rect,
        kind,
        hp,
        max_hp,
        move_speed: config.npc.move_speed,
        wander: WanderState::roll(rng),
        aggroed: false,
        was_moving: false,
        saved_elapsed_seconds: 0.0,
        aggro_lose_radius: rng.gen_range(
            config.enemy.aggro_lose_radius_min..=config.enemy.aggro_lose_radius_max,
        ),
        attack_damage: config.enemy.attack_damage,
        attack_interval_seconds: config.enemy.attack_interval_seconds,
        attack_cooldown_seconds: 0.0,
    }
}
