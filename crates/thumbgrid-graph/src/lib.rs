pub mod geometry;
pub mod grid;
pub mod hit_tester;
pub mod index_mapper;
pub mod render;

pub use geometry::{Rect, Vec2};
pub use grid::{
    CELL_SIZE, COLUMNS, CONTROL_INSET, CONTROL_SIZE, DEFAULT_CONTROL_ROW_HEIGHT, GridLayout,
    IMAGE_INSET, PADDING,
};
pub use hit_tester::{HitResult, HitTester, HotZone};
pub use index_mapper::IndexMapper;
pub use render::{Color, DrawCommand, DrawList, RenderSurface, palette};
