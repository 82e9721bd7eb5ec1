mod camera;
mod geometry;
mod grid;
mod input;
mod loop_runner;

pub use camera::{Camera2D, Viewport};
pub use geometry::{Rect, Vec2};
pub use grid::{TileGrid, TileGridError, TileKind};
pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{FixedTimestep, LoopConfig, StepPlan};
