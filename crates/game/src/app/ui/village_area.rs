use engine::{rgb, with_alpha, AssetStore, Canvas, FontSize, Point, PointerState, Rect};

use super::{HoverState, Widget};
use crate::app::config::{palette, AreaId};

const ZONE_SIZE: i32 = 120;

#[derive(Debug, Clone)]
pub(crate) struct VillageArea {
    area: AreaId,
    center: Point,
    rect: Rect,
    state: HoverState,
}

impl VillageArea {
    pub(crate) fn new(area: AreaId) -> Self {
        let center = area.info().position;
        Self {
            area,
            center,
            rect: Rect::from_center(center, ZONE_SIZE, ZONE_SIZE),
            state: HoverState::default(),
        }
    }

    pub(crate) fn area(&self) -> AreaId {
        self.area
    }

    pub(crate) fn center(&self) -> Point {
        self.center
    }

    pub(crate) fn is_hovered(&self) -> bool {
        self.state.hovered
    }
}

impl Widget for VillageArea {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, pointer: PointerState, _dt_seconds: f32) {
        self.state = HoverState::from_pointer(self.rect, true, pointer);
    }

    fn draw(&self, canvas: &mut Canvas, assets: &AssetStore) {
        let (x, y) = (self.center.x, self.center.y);
        canvas.fill_circle(self.center, 50, palette::BROWN_LIGHT);

        canvas.fill_rect(Rect::new(x - 5, y + 60, 10, 40), palette::WOOD);
        let sign = Rect::new(x - 50, y + 55, 100, 30);
        canvas.fill_rounded_rect(sign, 3, rgb(180, 140, 100));
        canvas.stroke_rounded_rect(sign, 3, rgb(100, 70, 40), 2);
        canvas.draw_text_centered(
            assets.font_for(FontSize::Small),
            self.area.info().name,
            sign.center(),
            palette::TEXT_DARK,
        );

        if self.state.hovered {
            canvas.stroke_circle(self.center, 55, with_alpha(palette::GOLD, 100), 3);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_is_centered_on_area_position() {
        let zone = VillageArea::new(AreaId::Potions);
        assert_eq!(zone.bounds(), Rect::new(940, 140, 120, 120));
        assert!(zone.hit_test(Point::new(1000, 200)));
        assert!(!zone.hit_test(Point::new(1060, 200)));
    }

    #[test]
    fn hover_clears_when_pointer_leaves() {
        let mut zone = VillageArea::new(AreaId::Training);
        zone.update(PointerState::at(Point::new(280, 200)), 0.016);
        assert!(zone.is_hovered());
        zone.update(PointerState::default(), 0.016);
        assert!(!zone.is_hovered());
    }
}
