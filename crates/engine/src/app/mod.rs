mod display;
mod geometry;
mod input;
mod loop_runner;
mod metrics;
mod rendering;

pub use display::Display;
pub use geometry::{Point, Rect};
pub use input::{InputEvent, Key, MouseButton, PointerState};
pub use loop_runner::{run_app, App, AppError, FrameControl, FrameInput, LoopConfig};
pub use rendering::{rgb, with_alpha, BitmapFont, Canvas, Color, Image, ImageLoadError};
