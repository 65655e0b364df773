use engine::{rgb, AssetStore, Canvas, Point, PointerState, Rect};

use super::Widget;
use crate::app::config::{palette, HEART_EMPTY, HEART_FULL};
use crate::app::placeholders::draw_heart;

const HEART_SIZE: i32 = 30;
const HEART_SPACING: i32 = 35;

#[derive(Debug, Clone)]
pub(crate) struct HealthBar {
    origin: Point,
    max_health: u32,
    current_health: u32,
}

impl HealthBar {
    pub(crate) fn new(origin: Point, max_health: u32) -> Self {
        Self {
            origin,
            max_health,
            current_health: max_health,
        }
    }

    pub(crate) fn set_health(&mut self, health: u32) {
        self.current_health = health.min(self.max_health);
    }

    #[cfg(test)]
    pub(crate) fn health(&self) -> u32 {
        self.current_health
    }
}

impl Widget for HealthBar {
    fn bounds(&self) -> Rect {
        let slots = self.max_health as i32;
        let width = if slots == 0 {
            0
        } else {
            (slots - 1) * HEART_SPACING + HEART_SIZE
        };
        Rect::new(self.origin.x, self.origin.y, width, HEART_SIZE)
    }

    fn update(&mut self, _pointer: PointerState, _dt_seconds: f32) {}

    fn draw(&self, canvas: &mut Canvas, assets: &AssetStore) {
        for slot in 0..self.max_health {
            let top_left = self.origin.offset(slot as i32 * HEART_SPACING, 0);
            let full = slot < self.current_health;
            let key = if full { &HEART_FULL } else { &HEART_EMPTY };
            match assets.image(key) {
                Some(heart) => canvas.draw_image(heart, top_left),
                None => {
                    let color = if full { palette::RED } else { rgb(80, 80, 80) };
                    draw_heart(canvas, top_left, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_health_clamps_to_max() {
        let mut bar = HealthBar::new(Point::new(0, 0), 5);
        bar.set_health(12);
        assert_eq!(bar.health(), 5);
        bar.set_health(2);
        assert_eq!(bar.health(), 2);
    }

    #[test]
    fn bounds_cover_every_heart() {
        let bar = HealthBar::new(Point::new(1080, 20), 5);
        assert_eq!(bar.bounds(), Rect::new(1080, 20, 170, 30));
    }

    #[test]
    fn draws_full_then_empty_hearts() {
        let assets = AssetStore::new();
        let mut bar = HealthBar::new(Point::new(0, 0), 3);
        bar.set_health(1);
        let mut canvas = Canvas::new(120, 40);
        bar.draw(&mut canvas, &assets);

        assert_eq!(canvas.pixel(15, 15), Some(palette::RED));
        assert_eq!(canvas.pixel(35 + 15, 15), Some(rgb(80, 80, 80)));
    }
}
