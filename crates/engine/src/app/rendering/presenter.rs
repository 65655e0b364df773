use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::canvas::Canvas;

pub(crate) struct Presenter {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    buffer_size: (u32, u32),
}

impl Presenter {
    pub(crate) fn new(window: Arc<Window>, buffer_size: (u32, u32)) -> Result<Self, Error> {
        let pixels = Self::build_pixels(Arc::clone(&window), buffer_size)?;
        Ok(Self {
            window,
            pixels,
            buffer_size,
        })
    }

    pub(crate) fn set_buffer_size(&mut self, buffer_size: (u32, u32)) -> Result<(), Error> {
        if buffer_size == self.buffer_size {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), buffer_size)?;
        self.buffer_size = buffer_size;
        Ok(())
    }

    pub(crate) fn rebuild_surface(&mut self) -> Result<(), Error> {
        self.pixels = Self::build_pixels(Arc::clone(&self.window), self.buffer_size)?;
        Ok(())
    }

    /// Maps a physical window position into buffer pixels; positions outside
    /// the scaled buffer map to coordinates outside the buffer.
    pub(crate) fn window_to_buffer(&self, x: f32, y: f32) -> (i32, i32) {
        match self.pixels.window_pos_to_pixel((x, y)) {
            Ok((px, py)) => (px as i32, py as i32),
            Err((px, py)) => (px as i32, py as i32),
        }
    }

    pub(crate) fn present(&mut self, canvas: &Canvas) -> Result<(), Error> {
        let frame = self.pixels.frame_mut();
        if frame.len() == canvas.as_bytes().len() {
            frame.copy_from_slice(canvas.as_bytes());
        }
        self.pixels.render()
    }

    fn build_pixels(window: Arc<Window>, buffer_size: (u32, u32)) -> Result<Pixels<'static>, Error> {
        let surface_size = window.inner_size();
        let surface = SurfaceTexture::new(
            surface_size.width.max(1),
            surface_size.height.max(1),
            window,
        );
        Pixels::new(buffer_size.0.max(1), buffer_size.1.max(1), surface)
    }
}
