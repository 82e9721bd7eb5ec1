/// Single owner of all game state. The presentation layer reads the view
/// accessors and calls `update` once per fixed tick with the measured
/// elapsed time and a semantic input snapshot; nothing else mutates the
/// world. Every timer in here is accumulated virtual time, so a paused
/// world holds all in-progress state bit-for-bit.
pub(crate) struct GameWorld {
    config: GameConfig,
    grid: TileGrid,
    deposits: Vec<OreDeposit>,
    monsters: Vec<Monster>,
    enemies: Vec<Enemy>,
    player: Player,
    camera: Camera2D,
    rng: StdRng,
    allocator: EntityIdAllocator,
    enemy_table: SpawnTable<usize>,
    run_state: RunState,
    mining: Option<MiningSession>,
    events: WorldEventBus,
    started: bool,
    tick_count: u64,
}

impl GameWorld {
    /// Fresh world with OS entropy; two runs never share a map.
    pub(crate) fn new(config: GameConfig) -> Result<Self, String> {
        Self::build(config, StdRng::from_entropy())
    }

    pub(crate) fn with_seed(config: GameConfig, seed: u64) -> Result<Self, String> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: GameConfig, mut rng: StdRng) -> Result<Self, String> {
        config.validate()?;

        let mut allocator = EntityIdAllocator::default();
        let grid = worldgen::generate_tile_grid(&config.map, &mut rng);
        let deposits = spawn_ore_deposits(&config, &grid, &mut rng, &mut allocator)?;
        let player_position = sample_player_position(&config, &grid, &deposits, &mut rng)?;
        let monsters = spawn_monsters(
            &config,
            &grid,
            &deposits,
            player_position,
            &mut rng,
            &mut allocator,
        )?;
        let enemies = spawn_enemies(
            &config,
            &grid,
            &deposits,
            &monsters,
            player_position,
            &mut rng,
            &mut allocator,
        )?;

        let enemy_rows: Vec<(usize, u32)> = config
            .enemy_types
            .iter()
            .enumerate()
            .map(|(index, row)| (index, row.weight))
            .collect();
        let enemy_table = SpawnTable::new(&enemy_rows)?;

        let tile = grid.tile_size();
        let player = Player {
            rect: Rect::new(player_position.x, player_position.y, tile, tile),
            hp: config.player.max_hp,
            max_hp: config.player.max_hp,
            move_speed: config.player.move_speed,
            total_energy: 0,
            attack_radius: config.player.attack_radius,
            attack_damage: config.player.attack_damage,
            attack_interval_seconds: config.player.attack_interval_seconds,
            attack_cooldown_seconds: 0.0,
            multishot_targets: config.player.multishot_targets,
            mining_range: config.player.mining_range,
        };

        let mut camera = Camera2D::default();
        camera.follow(
            player.rect.center(),
            Viewport {
                width: config.viewport.width,
                height: config.viewport.height,
            },
            grid.width(),
            grid.height(),
        );

        info!(
            deposits = deposits.len(),
            monsters = monsters.len(),
            enemies = enemies.len(),
            player_x = player.rect.x,
            player_y = player.rect.y,
            "world_generated"
        );

        Ok(Self {
            config,
            grid,
            deposits,
            monsters,
            enemies,
            player,
            camera,
            rng,
            allocator,
            enemy_table,
            run_state: RunState::Running,
            mining: None,
            events: WorldEventBus::default(),
            started: false,
            tick_count: 0,
        })
    }

    pub(crate) fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        if input.pause_pressed() {
            self.toggle_pause();
        }
        if self.run_state != RunState::Running {
            return;
        }

        let mut npc_rects: Vec<(EntityId, Rect)> = self
            .monsters
            .iter()
            .map(|monster| (monster.id, monster.rect))
            .chain(self.enemies.iter().map(|enemy| (enemy.id, enemy.rect)))
            .collect();

        for index in 0..self.monsters.len() {
            let mut ctx = NpcContext {
                grid: &self.grid,
                deposits: &self.deposits,
                npc_rects: &mut npc_rects,
                rng: &mut self.rng,
            };
            update_monster(&mut self.monsters[index], dt_seconds, &self.player, &mut ctx);
        }

        for index in 0..self.enemies.len() {
            let mut ctx = NpcContext {
                grid: &self.grid,
                deposits: &self.deposits,
                npc_rects: &mut npc_rects,
                rng: &mut self.rng,
            };
            update_enemy(
                &mut self.enemies[index],
                dt_seconds,
                &mut self.player,
                &self.config.enemy,
                &mut ctx,
                &mut self.events,
            );
        }

        self.update_player_movement(dt_seconds, input);
        self.update_player_auto_attack(dt_seconds);
        self.resolve_enemy_deaths();
        self.update_mining(dt_seconds, input);

        if self.player.hp <= 0 && self.run_state == RunState::Running {
            self.run_state = RunState::GameOver;
            self.events.emit(WorldEvent::PlayerDied);
            info!(tick = self.tick_count, "game_over");
        }

        self.camera.follow(
            self.player.rect.center(),
            Viewport {
                width: self.config.viewport.width,
                height: self.config.viewport.height,
            },
            self.grid.width(),
            self.grid.height(),
        );

        self.events.finish_tick_rollover();
        self.started = true;
        self.tick_count += 1;
    }

    pub(crate) fn toggle_pause(&mut self) {
        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                info!(tick = self.tick_count, "paused");
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                info!(tick = self.tick_count, "resumed");
            }
            RunState::GameOver => {}
        }
    }

    fn update_player_movement(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        // An active mining hold roots the player in place.
        if self.mining.is_some() {
            return;
        }

        let speed = self.player.move_speed * dt_seconds;
        let mut dx = 0.0f32;
        let mut dy = 0.0f32;
        if input.is_down(InputAction::MoveLeft) {
            dx -= speed;
        }
        if input.is_down(InputAction::MoveRight) {
            dx += speed;
        }
        if input.is_down(InputAction::MoveUp) {
            dy -= speed;
        }
        if input.is_down(InputAction::MoveDown) {
            dy += speed;
        }
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let obstacles: Vec<Rect> = self.deposits.iter().map(|deposit| deposit.rect).collect();
        let resolved = resolve_move(
            &self.grid,
            Vec2 {
                x: self.player.rect.x,
                y: self.player.rect.y,
            },
            self.player.rect.width,
            self.player.rect.height,
            Vec2 { x: dx, y: dy },
            &obstacles,
        );
        self.player.rect.x = resolved.position.x;
        self.player.rect.y = resolved.position.y;
    }

    fn update_player_auto_attack(&mut self, dt_seconds: f32) {
        self.player.attack_cooldown_seconds =
            (self.player.attack_cooldown_seconds - dt_seconds).max(0.0);
        // Held off until the very first update has finished world setup.
        if !self.started {
            return;
        }
        if self.player.attack_cooldown_seconds > 0.0 {
            return;
        }

        let player_center = self.player.rect.center();
        let candidates: Vec<usize> = (0..self.enemies.len())
            .filter(|&index| {
                self.enemies[index]
                    .rect
                    .center()
                    .distance_to(player_center)
                    <= self.player.attack_radius
            })
            .collect();
        if candidates.is_empty() {
            return;
        }

        let target_count = self.player.multishot_targets.min(candidates.len());
        let chosen: Vec<usize> = candidates
            .choose_multiple(&mut self.rng, target_count)
            .copied()
            .collect();
        for index in chosen {
            let enemy = &mut self.enemies[index];
            enemy.hp -= self.player.attack_damage;
            self.events.emit(WorldEvent::EnemyStruck {
                enemy: enemy.id,
                damage: self.player.attack_damage,
            });
        }
        self.player.attack_cooldown_seconds = self.player.attack_interval_seconds;
    }

    fn resolve_enemy_deaths(&mut self) {
        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].hp > 0 {
                index += 1;
                continue;
            }
            let enemy = self.enemies.remove(index);
            let reward = (enemy.max_hp / ENEMY_SLAY_REWARD_DIVISOR).max(0) as u32;
            self.player.total_energy += reward;
            self.events.emit(WorldEvent::EnemySlain {
                enemy: enemy.id,
                reward,
            });
        }
    }

    fn update_mining(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        if self.mining.is_none() && input.primary_pressed() {
            if let Some(cursor) = input.cursor_position_world() {
                let player_center = self.player.rect.center();
                let target = self.deposits.iter().find(|deposit| {
                    deposit.rect.contains_point(cursor)
                        && deposit.rect.center().distance_to(player_center)
                            <= self.player.mining_range
                });
                if let Some(deposit) = target {
                    self.mining = Some(MiningSession {
                        target: deposit.id,
                        hold_seconds: 0.0,
                    });
                    debug!(deposit = deposit.id.0, kind = deposit.kind.label(), "mining_started");
                }
            }
        }

        let Some(session) = self.mining.as_mut() else {
            return;
        };
        let Some(index) = self
            .deposits
            .iter()
            .position(|deposit| deposit.id == session.target)
        else {
            self.mining = None;
            return;
        };

        let cursor_over_target = input
            .cursor_position_world()
            .map(|cursor| self.deposits[index].rect.contains_point(cursor))
            .unwrap_or(false);
        if !input.primary_held() || !cursor_over_target {
            debug!(deposit = self.deposits[index].id.0, "mining_interrupted");
            self.mining = None;
            return;
        }

        session.hold_seconds += dt_seconds;
        let mut depleted = false;
        while session.hold_seconds >= MINING_SECONDS_PER_ENERGY {
            session.hold_seconds -= MINING_SECONDS_PER_ENERGY;
            let deposit = &mut self.deposits[index];
            deposit.energy -= 1;
            self.player.total_energy += 1;
            self.events.emit(WorldEvent::EnergyMined { deposit: deposit.id });
            if deposit.energy == 0 {
                depleted = true;
                break;
            }
        }

        if depleted {
            let deposit = self.deposits.remove(index);
            let (col, row) = self.grid.tile_coord_of(deposit.rect.x, deposit.rect.y);
            self.grid.set_tile(col, row, TileKind::Walkable);
            self.events.emit(WorldEvent::OreDepleted { deposit: deposit.id });
            self.mining = None;
        }
    }

    /// Roll against the monster's catch chance. Success turns it into a
    /// follower; failure converts it into a fresh enemy on the spot with
    /// the hp it had. Returns `None` for unknown or already-tamed targets.
    pub(crate) fn attempt_tame(&mut self, monster_id: EntityId) -> Option<TameOutcome> {
        let index = self
            .monsters
            .iter()
            .position(|monster| monster.id == monster_id)?;
        if self.monsters[index].tamed {
            return None;
        }

        let roll: f32 = self.rng.gen();
        if roll < self.monsters[index].catch_chance {
            let monster = &mut self.monsters[index];
            monster.tamed = true;
            self.events.emit(WorldEvent::MonsterTamed { monster: monster.id });
            return Some(TameOutcome::Tamed);
        }

        let monster = self.monsters.remove(index);
        let row = &self.config.enemy_types[self.enemy_table.pick(&mut self.rng)];
        let enemy = new_enemy(
            self.allocator.allocate(),
            monster.rect,
            row.kind,
            monster.hp,
            monster.hp,
            &self.config,
            &mut self.rng,
        );
        self.events.emit(WorldEvent::MonsterEnraged {
            monster: monster.id,
            enemy: enemy.id,
        });
        self.enemies.push(enemy);
        Some(TameOutcome::Enraged)
    }

    pub(crate) fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub(crate) fn deposits(&self) -> &[OreDeposit] {
        &self.deposits
    }

    pub(crate) fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub(crate) fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub(crate) fn player(&self) -> &Player {
        &self.player
    }

    pub(crate) fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub(crate) fn run_state(&self) -> RunState {
        self.run_state
    }

    pub(crate) fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub(crate) fn mining_progress(&self) -> Option<MiningProgress> {
        self.mining.as_ref().map(|session| MiningProgress {
            target: session.target,
            fraction: (session.hold_seconds / MINING_SECONDS_PER_ENERGY).clamp(0.0, 1.0),
        })
    }

    /// Hover query for the tooltip layer.
    pub(crate) fn deposit_under(&self, point: Vec2) -> Option<&OreDeposit> {
        self.deposits
            .iter()
            .find(|deposit| deposit.rect.contains_point(point))
    }

    pub(crate) fn last_tick_counts(&self) -> WorldEventCounts {
        self.events.last_tick_counts()
    }
}
