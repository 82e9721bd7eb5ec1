pub mod app;

pub use app::{
    Camera2D, FixedTimestep, InputAction, InputSnapshot, LoopConfig, Rect, StepPlan, TileGrid,
    TileGridError, TileKind, Vec2, Viewport,
};
