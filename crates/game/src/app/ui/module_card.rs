use std::f32::consts::TAU;

use engine::{rgb, with_alpha, AssetStore, Canvas, FontSize, Point, PointerState, Rect};

use super::{wrap_words, HoverState, Widget};
use crate::app::config::{palette, ModuleId};

const CARD_WIDTH: i32 = 220;
const CARD_HEIGHT: i32 = 200;
const PULSE_SPEED: f32 = 3.0;
const ICON_RISE: i32 = 20;
const PLATE_HEIGHT: i32 = 80;
const NAME_LINE_HEIGHT: i32 = 18;

#[derive(Debug, Clone)]
pub(crate) struct ModuleCard {
    module: ModuleId,
    anchor: Point,
    rect: Rect,
    state: HoverState,
    pulse: f32,
    highlighted: bool,
}

impl ModuleCard {
    pub(crate) fn new(module: ModuleId, anchor: Point) -> Self {
        Self {
            module,
            anchor,
            rect: Rect::new(anchor.x - CARD_WIDTH / 2, anchor.y - 80, CARD_WIDTH, CARD_HEIGHT),
            state: HoverState::default(),
            pulse: 0.0,
            highlighted: false,
        }
    }

    pub(crate) fn module(&self) -> ModuleId {
        self.module
    }

    #[cfg(test)]
    pub(crate) fn is_hovered(&self) -> bool {
        self.state.hovered
    }

    #[cfg(test)]
    pub(crate) fn pulse(&self) -> f32 {
        self.pulse
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}

impl Widget for ModuleCard {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self, pointer: PointerState, dt_seconds: f32) {
        self.state = HoverState::from_pointer(self.rect, true, pointer);
        self.pulse = (self.pulse + dt_seconds * PULSE_SPEED).rem_euclid(TAU);
    }

    fn draw(&self, canvas: &mut Canvas, assets: &AssetStore) {
        let info = self.module.info();

        if self.state.hovered || self.highlighted {
            let glow = (10.0 + 5.0 * self.pulse.sin()) as i32;
            canvas.fill_ellipse(
                self.rect.inflate(glow * 2, glow * 2),
                with_alpha(info.color, 80),
            );
        }

        let icon_center = self.anchor.offset(0, -ICON_RISE);
        match assets.image(&self.module.icon_key()) {
            Some(icon) => canvas.draw_image_centered(icon, icon_center),
            None => {
                canvas.fill_circle(icon_center, 50, info.color);
                canvas.stroke_circle(icon_center, 50, palette::WHITE, 3);
            }
        }

        let plate = Rect::new(
            self.anchor.x - CARD_WIDTH / 2,
            self.anchor.y + 35,
            CARD_WIDTH,
            PLATE_HEIGHT,
        );
        canvas.fill_rounded_rect(plate, 5, palette::BROWN_DARK);
        canvas.stroke_rounded_rect(plate, 5, rgb(80, 50, 30), 2);

        let font = assets.font_for(FontSize::Small);
        let lines = wrap_words(font, &info.name.to_uppercase(), (CARD_WIDTH - 20) as u32);
        let total_height = lines.len() as i32 * NAME_LINE_HEIGHT;
        let start_y = plate.center().y - total_height / 2 + NAME_LINE_HEIGHT / 2;
        for (index, line) in lines.iter().enumerate() {
            canvas.draw_text_centered(
                font,
                line,
                Point::new(self.anchor.x, start_y + index as i32 * NAME_LINE_HEIGHT),
                palette::TEXT_LIGHT,
            );
        }
    }
}
