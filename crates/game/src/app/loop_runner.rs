use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use engine::{FixedTimestep, InputAction, InputSnapshot};
use tracing::{debug, error, info};

use super::bootstrap::AppWiring;
use super::gameplay::{GameWorld, RunState};

const PROGRESS_LOG_INTERVAL_TICKS: u64 = 300;
const DEMO_DIRECTION_HOLD_TICKS: u64 = 240;
const TAME_ATTEMPT_RANGE: f32 = 100.0;

/// Headless demo drive: generate a world and run it at a fixed timestep
/// with a scripted input sweep, so the whole simulation can be exercised
/// without a window. The presentation layer replaces this loop with its
/// own frame scheduler and real input.
pub(crate) fn run(app: AppWiring) -> ExitCode {
    let build_result = match app.seed {
        Some(seed) => GameWorld::with_seed(app.game_config, seed),
        None => GameWorld::new(app.game_config),
    };
    let mut world = match build_result {
        Ok(world) => world,
        Err(err) => {
            error!(error = %err, "world_generation_failed");
            return ExitCode::FAILURE;
        }
    };
    log_world_manifest(&world);

    let mut clock = FixedTimestep::new(&app.loop_config);
    let fixed_dt_seconds = clock.fixed_dt_seconds();
    let mut last_frame_instant = Instant::now();

    'frames: while world.tick_count() < app.demo_tick_budget {
        let now = Instant::now();
        let frame_delta = now.saturating_duration_since(last_frame_instant);
        last_frame_instant = now;

        let plan = clock.advance(frame_delta);
        for _ in 0..plan.ticks_to_run {
            let input = demo_input(&world);
            world.update(fixed_dt_seconds, &input);
            log_tick_events(&world);
            attempt_nearby_tame(&mut world);

            if world.tick_count() % PROGRESS_LOG_INTERVAL_TICKS == 0 {
                info!(
                    tick = world.tick_count(),
                    total_energy = world.player().total_energy,
                    player_hp = world.player().hp,
                    camera_x = world.camera().position.x,
                    camera_y = world.camera().position.y,
                    enemies = world.enemies().len(),
                    deposits = world.deposits().len(),
                    "demo_progress"
                );
                if let Some(progress) = world.mining_progress() {
                    debug!(
                        deposit = progress.target.0,
                        fraction = progress.fraction,
                        "mining_in_progress"
                    );
                }
            }
            if world.run_state() == RunState::GameOver
                || world.tick_count() >= app.demo_tick_budget
            {
                break 'frames;
            }
        }

        thread::sleep(Duration::from_millis(2));
    }

    info!(
        ticks = world.tick_count(),
        run_state = ?world.run_state(),
        total_energy = world.player().total_energy,
        player_hp = world.player().hp,
        player_max_hp = world.player().max_hp,
        enemies_left = world.enemies().len(),
        "demo_finished"
    );
    ExitCode::SUCCESS
}

/// Mine any deposit in reach, otherwise sweep the player through the four
/// directions so the demo covers movement, collision sliding, mining, and
/// camera follow.
fn demo_input(world: &GameWorld) -> InputSnapshot {
    let player_center = world.player().rect.center();
    let reachable = world.deposits().iter().find(|deposit| {
        deposit.rect.center().distance_to(player_center) <= world.player().mining_range
    });
    if let Some(deposit) = reachable {
        let cursor = deposit.rect.center();
        let starting = world.mining_progress().is_none();
        if starting {
            if let Some(hovered) = world.deposit_under(cursor) {
                debug!(
                    deposit = hovered.id.0,
                    kind = hovered.kind.label(),
                    energy = hovered.energy,
                    "demo_mining_target"
                );
            }
        }
        return InputSnapshot::empty()
            .with_cursor_position_world(Some(cursor))
            .with_primary_pressed(starting)
            .with_primary_held(true);
    }

    let action = match (world.tick_count() / DEMO_DIRECTION_HOLD_TICKS) % 4 {
        0 => InputAction::MoveRight,
        1 => InputAction::MoveDown,
        2 => InputAction::MoveLeft,
        _ => InputAction::MoveUp,
    };
    InputSnapshot::empty().with_action_down(action, true)
}

fn attempt_nearby_tame(world: &mut GameWorld) {
    let player_center = world.player().rect.center();
    let candidate = world
        .monsters()
        .iter()
        .find(|monster| {
            !monster.tamed
                && monster.rect.center().distance_to(player_center) <= TAME_ATTEMPT_RANGE
        })
        .map(|monster| monster.id);
    if let Some(monster_id) = candidate {
        let outcome = world.attempt_tame(monster_id);
        info!(monster = monster_id.0, outcome = ?outcome, "tame_attempted");
    }
}

fn log_world_manifest(world: &GameWorld) {
    info!(
        map_cols = world.grid().cols(),
        map_rows = world.grid().rows(),
        tile_size = world.grid().tile_size(),
        "map_ready"
    );
    for deposit in world.deposits() {
        debug!(
            id = deposit.id.0,
            kind = deposit.kind.label(),
            color = deposit.kind.color_hex(),
            energy = deposit.energy,
            "deposit"
        );
    }
    for monster in world.monsters() {
        debug!(
            id = monster.id.0,
            kind = monster.kind.label(),
            color = monster.kind.color_hex(),
            about = monster.kind.description(),
            hp = monster.hp,
            "monster"
        );
    }
    for enemy in world.enemies() {
        debug!(
            id = enemy.id.0,
            kind = enemy.kind.label(),
            letter = %enemy.kind.letter(),
            about = enemy.kind.description(),
            hp = enemy.hp,
            "enemy"
        );
    }
}

fn log_tick_events(world: &GameWorld) {
    let counts = world.last_tick_counts();
    if counts.total == 0 {
        return;
    }
    debug!(
        tick = world.tick_count(),
        total = counts.total,
        energy_mined = counts.energy_mined,
        ore_depleted = counts.ore_depleted,
        aggro_gained = counts.aggro_gained,
        aggro_lost = counts.aggro_lost,
        hits_taken = counts.player_hit,
        hits_dealt = counts.enemy_struck,
        enemies_slain = counts.enemy_slain,
        monsters_tamed = counts.monster_tamed,
        monsters_enraged = counts.monster_enraged,
        player_died = counts.player_died,
        "tick_events"
    );
}
