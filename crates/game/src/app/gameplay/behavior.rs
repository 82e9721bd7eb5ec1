/// World context threaded into every creature update. Entities never hold
/// references to each other; everything they may collide with arrives
/// here, and `npc_rects` is patched in place after each resolved move so
/// later movers in the same tick see current positions.
pub(crate) struct NpcContext<'a> {
    pub(crate) grid: &'a TileGrid,
    pub(crate) deposits: &'a [OreDeposit],
    pub(crate) npc_rects: &'a mut Vec<(EntityId, Rect)>,
    pub(crate) rng: &'a mut StdRng,
}

impl NpcContext<'_> {
    fn obstacles_for(&self, mover: EntityId) -> Vec<Rect> {
        self.deposits
            .iter()
            .map(|deposit| deposit.rect)
            .chain(
                self.npc_rects
                    .iter()
                    .filter(|(id, _)| *id != mover)
                    .map(|(_, rect)| *rect),
            )
            .collect()
    }

    fn sync_rect(&mut self, mover: EntityId, rect: Rect) {
        if let Some(entry) = self.npc_rects.iter_mut().find(|(id, _)| *id == mover) {
            entry.1 = rect;
        }
    }
}

fn wander_step(
    mover: EntityId,
    rect: &mut Rect,
    move_speed: f32,
    wander: &mut WanderState,
    dt_seconds: f32,
    ctx: &mut NpcContext<'_>,
) {
    if !wander.tick(dt_seconds, ctx.rng) {
        return;
    }

    let step = (move_speed * dt_seconds).min(NPC_MAX_STEP);
    let unit = wander.heading.unit();
    let delta = Vec2 {
        x: unit.x * step,
        y: unit.y * step,
    };
    let obstacles = ctx.obstacles_for(mover);
    let resolved = resolve_move(
        ctx.grid,
        Vec2 { x: rect.x, y: rect.y },
        rect.width,
        rect.height,
        delta,
        &obstacles,
    );

    if resolved.displaced {
        rect.x = resolved.position.x;
        rect.y = resolved.position.y;
        ctx.sync_rect(mover, *rect);
    } else {
        // Grinding against the same wall every tick gets us nowhere; try a
        // different direction next time.
        wander.reroll_heading(ctx.rng);
    }
}

fn step_toward(
    mover: EntityId,
    rect: &mut Rect,
    move_speed: f32,
    target_center: Vec2,
    dt_seconds: f32,
    ctx: &mut NpcContext<'_>,
) {
    let center = rect.center();
    let dx = target_center.x - center.x;
    let dy = target_center.y - center.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= f32::EPSILON {
        return;
    }

    let step = (move_speed * dt_seconds).min(NPC_MAX_STEP).min(distance);
    let delta = Vec2 {
        x: dx / distance * step,
        y: dy / distance * step,
    };
    let obstacles = ctx.obstacles_for(mover);
    let resolved = resolve_move(
        ctx.grid,
        Vec2 { x: rect.x, y: rect.y },
        rect.width,
        rect.height,
        delta,
        &obstacles,
    );
    if resolved.displaced {
        rect.x = resolved.position.x;
        rect.y = resolved.position.y;
        ctx.sync_rect(mover, *rect);
    }
}

pub(crate) fn update_monster(
    monster: &mut Monster,
    dt_seconds: f32,
    player: &Player,
    ctx: &mut NpcContext<'_>,
) {
    if monster.tamed {
        // A tame companion holds position once close enough; no wander.
        let distance = monster.rect.center().distance_to(player.rect.center());
        if distance > monster.follow_distance {
            step_toward(
                monster.id,
                &mut monster.rect,
                monster.move_speed,
                player.rect.center(),
                dt_seconds,
                ctx,
            );
        }
    } else {
        wander_step(
            monster.id,
            &mut monster.rect,
            monster.move_speed,
            &mut monster.wander,
            dt_seconds,
            ctx,
        );
    }
}

pub(crate) fn update_enemy(
    enemy: &mut Enemy,
    dt_seconds: f32,
    player: &mut Player,
    config: &EnemyConfig,
    ctx: &mut NpcContext<'_>,
    events: &mut WorldEventBus,
) {
    enemy.attack_cooldown_seconds = (enemy.attack_cooldown_seconds - dt_seconds).max(0.0);

    let distance = enemy.rect.center().distance_to(player.rect.center());
    if !enemy.aggroed && distance <= config.aggro_radius {
        enemy.aggroed = true;
        enemy.was_moving = enemy.wander.phase == WanderPhase::Moving;
        enemy.saved_elapsed_seconds = enemy.wander.elapsed_seconds;
        enemy.wander.phase = WanderPhase::Paused;
        enemy.wander.elapsed_seconds = 0.0;
        events.emit(WorldEvent::AggroGained { enemy: enemy.id });
    } else if enemy.aggroed && distance > enemy.aggro_lose_radius {
        enemy.aggroed = false;
        enemy.wander.elapsed_seconds = enemy.saved_elapsed_seconds;
        if enemy.was_moving {
            enemy.wander.phase = WanderPhase::Moving;
        }
        // Restore the banked dwell but not the stale trajectory.
        enemy.wander.reroll_heading(ctx.rng);
        events.emit(WorldEvent::AggroLost { enemy: enemy.id });
    }

    if !enemy.aggroed {
        wander_step(
            enemy.id,
            &mut enemy.rect,
            enemy.move_speed,
            &mut enemy.wander,
            dt_seconds,
            ctx,
        );
        return;
    }

    if distance > config.attack_radius {
        step_toward(
            enemy.id,
            &mut enemy.rect,
            enemy.move_speed * config.pursuit_speed_multiplier,
            player.rect.center(),
            dt_seconds,
            ctx,
        );
    }

    let distance = enemy.rect.center().distance_to(player.rect.center());
    if distance <= config.attack_radius && enemy.attack_cooldown_seconds <= 0.0 {
        player.hp -= enemy.attack_damage;
        enemy.attack_cooldown_seconds = enemy.attack_interval_seconds;
        events.emit(WorldEvent::PlayerHit {
            enemy: enemy.id,
            damage: enemy.attack_damage,
        });
    }
}
