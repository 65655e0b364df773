use engine::{rgb, AssetStore, Canvas, Color, FontSize, PointerState, Rect};

use super::{HoverState, Widget};
use crate::app::config::palette;

const CORNER_RADIUS: i32 = 8;
const SHADOW_OFFSET: i32 = 4;
const PRESS_OFFSET: i32 = 2;
const SHADOW_COLOR: Color = rgb(30, 20, 15);
const DISABLED_COLOR: Color = rgb(80, 80, 80);
const IDLE_BORDER: Color = rgb(100, 70, 50);

#[derive(Debug, Clone)]
pub(crate) struct Button {
    rect: Rect,
    label: &'static str,
    color: Color,
    hover_color: Color,
    text_color: Color,
    font: FontSize,
    enabled: bool,
    state: HoverState,
}

impl Button {
    pub(crate) fn new(rect: Rect, label: &'static str) -> Self {
        Self {
            rect,
            label,
            color: palette::BROWN_DARK,
            hover_color: palette::BROWN_LIGHT,
            text_color: palette::TEXT_LIGHT,
            font: FontSize::Medium,
            enabled: true,
            state: HoverState::default(),
        }
    }

    pub(crate) fn with_colors(mut self, color: Color, hover_color: Color) -> Self {
        self.color = color;
        self.hover_color = hover_color;
        self
    }

    pub(crate) fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[cfg(test)]
    pub(crate) fn is_hovered(&self) -> bool {
        self.state.hovered
    }

    #[cfg(test)]
    pub(crate) fn is_pressed(&self) -> bool {
        self.state.pressed
    }

    pub(crate) fn label(&self) -> &'static str {
        self.label
    }
}

impl Widget for Button {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn update(&mut self, pointer: PointerState, _dt_seconds: f32) {
        self.state = HoverState::from_pointer(self.rect, self.enabled, pointer);
    }

    fn draw(&self, canvas: &mut Canvas, assets: &AssetStore) {
        let fill = if !self.enabled {
            DISABLED_COLOR
        } else if self.state.hovered {
            self.hover_color
        } else {
            self.color
        };
        let body = if self.state.pressed {
            self.rect.translate(0, PRESS_OFFSET)
        } else {
            self.rect
        };
        let border = if self.state.hovered {
            palette::GOLD
        } else {
            IDLE_BORDER
        };

        canvas.fill_rounded_rect(
            self.rect.translate(0, SHADOW_OFFSET),
            CORNER_RADIUS,
            SHADOW_COLOR,
        );
        canvas.fill_rounded_rect(body, CORNER_RADIUS, fill);
        canvas.stroke_rounded_rect(body, CORNER_RADIUS, border, 3);
        canvas.draw_text_centered(
            assets.font_for(self.font),
            self.label,
            body.center(),
            self.text_color,
        );
    }
}
