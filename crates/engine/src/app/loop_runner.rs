use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks_to_run: u32,
    pub dropped_backlog: Duration,
}

/// Fixed-timestep accumulator. The external frame scheduler measures the
/// elapsed wall time per display frame and feeds it in; `advance` answers
/// how many fixed simulation ticks to run. A hitch longer than
/// `max_frame_delta` is clamped so the simulation never spirals trying to
/// catch up, and any backlog beyond `max_ticks_per_frame` is dropped.
#[derive(Debug)]
pub struct FixedTimestep {
    fixed_dt: Duration,
    max_frame_delta: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(config: &LoopConfig) -> Self {
        let target_tps = config.target_tps.max(1);
        let max_frame_delta =
            normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
        Self {
            fixed_dt: Duration::from_secs_f64(1.0 / target_tps as f64),
            max_frame_delta,
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn fixed_dt_seconds(&self) -> f32 {
        self.fixed_dt.as_secs_f32()
    }

    pub fn advance(&mut self, frame_delta: Duration) -> StepPlan {
        let clamped = if frame_delta > self.max_frame_delta {
            warn!(
                frame_delta_ms = frame_delta.as_millis() as u64,
                max_frame_delta_ms = self.max_frame_delta.as_millis() as u64,
                "frame_delta_clamped"
            );
            self.max_frame_delta
        } else {
            frame_delta
        };
        self.accumulator = self.accumulator.saturating_add(clamped);

        let mut ticks_to_run = 0u32;
        while self.accumulator >= self.fixed_dt && ticks_to_run < self.max_ticks_per_frame {
            self.accumulator -= self.fixed_dt;
            ticks_to_run += 1;
        }

        let mut dropped_backlog = Duration::ZERO;
        if ticks_to_run == self.max_ticks_per_frame && self.accumulator >= self.fixed_dt {
            // Keep at most one fixed step of remainder; drop the rest.
            let kept = Duration::from_secs_f64(
                self.accumulator.as_secs_f64() % self.fixed_dt.as_secs_f64(),
            );
            dropped_backlog = self.accumulator - kept;
            self.accumulator = kept;
            warn!(
                dropped_backlog_ms = dropped_backlog.as_millis() as u64,
                max_ticks_per_frame = self.max_ticks_per_frame,
                "sim_clamp_triggered"
            );
        }

        StepPlan {
            ticks_to_run,
            dropped_backlog,
        }
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestep(target_tps: u32, max_ticks_per_frame: u32) -> FixedTimestep {
        FixedTimestep::new(&LoopConfig {
            target_tps,
            max_ticks_per_frame,
            ..LoopConfig::default()
        })
    }

    #[test]
    fn whole_frames_produce_matching_tick_count() {
        // 50 tps keeps the fixed step an exact 20 ms.
        let mut clock = timestep(50, 5);
        let plan = clock.advance(Duration::from_millis(40));
        assert_eq!(plan.ticks_to_run, 2);
        assert_eq!(plan.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn remainder_carries_into_next_frame() {
        let mut clock = timestep(50, 5);

        assert_eq!(clock.advance(Duration::from_millis(12)).ticks_to_run, 0);
        assert_eq!(clock.advance(Duration::from_millis(12)).ticks_to_run, 1);
    }

    #[test]
    fn ticks_per_frame_are_bounded_and_backlog_dropped() {
        let mut clock = timestep(50, 3);
        let plan = clock.advance(Duration::from_millis(200));
        assert_eq!(plan.ticks_to_run, 3);
        assert!(plan.dropped_backlog > Duration::ZERO);

        // After the drop the next normal frame is back to a single tick.
        let plan = clock.advance(Duration::from_millis(20));
        assert_eq!(plan.ticks_to_run, 1);
    }

    #[test]
    fn runaway_frame_delta_is_clamped() {
        let mut clock = timestep(50, 60);
        let plan = clock.advance(Duration::from_secs(10));
        // The 250 ms clamp at 50 tps is 12 whole ticks.
        assert_eq!(plan.ticks_to_run, 12);
    }

    #[test]
    fn degenerate_config_is_normalized() {
        let mut clock = FixedTimestep::new(&LoopConfig {
            target_tps: 0,
            max_frame_delta: Duration::ZERO,
            max_ticks_per_frame: 0,
        });
        assert!((clock.fixed_dt_seconds() - 1.0).abs() < 0.0001);

        // The zero frame-delta cap falls back to 250 ms, so one simulated
        // second arrives in four clamped frames.
        for _ in 0..3 {
            assert_eq!(clock.advance(Duration::from_secs(1)).ticks_to_run, 0);
        }
        assert_eq!(clock.advance(Duration::from_secs(1)).ticks_to_run, 1);
    }
}
