#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    resolution: (u32, u32),
    pending_resize: Option<(u32, u32)>,
}

impl Display {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: (width.max(1), height.max(1)),
            pending_resize: None,
        }
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: (u32, u32)) {
        let resolution = (resolution.0.max(1), resolution.1.max(1));
        if resolution == self.resolution {
            return;
        }
        self.resolution = resolution;
        self.pending_resize = Some(resolution);
    }

    pub(crate) fn take_resize_request(&mut self) -> Option<(u32, u32)> {
        self.pending_resize.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_resolution_is_visible_immediately_and_queues_one_request() {
        let mut display = Display::new(1280, 720);
        display.set_resolution((1280, 800));

        assert_eq!(display.resolution(), (1280, 800));
        assert_eq!(display.take_resize_request(), Some((1280, 800)));
        assert_eq!(display.take_resize_request(), None);
    }

    #[test]
    fn unchanged_resolution_queues_nothing() {
        let mut display = Display::new(1280, 720);
        display.set_resolution((1280, 720));
        assert_eq!(display.take_resize_request(), None);
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let display = Display::new(0, 0);
        assert_eq!(display.resolution(), (1, 1));
    }
}
