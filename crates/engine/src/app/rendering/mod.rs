mod canvas;
mod font;
mod image_data;
mod presenter;

pub use canvas::{rgb, with_alpha, Canvas, Color};
pub use font::BitmapFont;
pub use image_data::{Image, ImageLoadError};
pub(crate) use presenter::Presenter;
