use std::f32::consts::TAU;
use std::rc::Rc;

use engine::{rgb, with_alpha, AssetStore, Canvas, FontSize, InputEvent, Point, Rect};
use tracing::{debug, info};

use super::{Scene, SceneContext, SceneId, Transition};
use crate::app::config::{
    palette, AreaId, PLAYER_SPRITE, SCREEN_HEIGHT, SCREEN_WIDTH, VILLAGE_BACKGROUND,
};
use crate::app::placeholders::hexagon_points;
use crate::app::ui::{Button, VillageArea, Widget};

const FLOAT_SPEED: f32 = 2.0;
const TITLE: &str = "VILLAGE";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tooltip {
    Description(AreaId),
    ComingSoon(AreaId),
}

impl Tooltip {
    fn text(&self) -> String {
        match self {
            Tooltip::Description(area) => area.info().description.to_string(),
            Tooltip::ComingSoon(area) => format!("{} - Coming soon!", area.info().name),
        }
    }
}

pub(crate) struct VillageHub {
    assets: Rc<AssetStore>,
    areas: Vec<VillageArea>,
    back: Button,
    float_phase: f32,
    tooltip: Option<Tooltip>,
    pending: Option<Transition>,
}

impl VillageHub {
    pub(crate) fn new(assets: Rc<AssetStore>) -> Self {
        Self {
            assets,
            areas: AreaId::ALL.into_iter().map(VillageArea::new).collect(),
            back: Button::new(Rect::new(50, 650, 150, 40), "< Back"),
            float_phase: 0.0,
            tooltip: None,
            pending: None,
        }
    }

    pub(crate) fn tooltip_text(&self) -> Option<String> {
        self.tooltip.as_ref().map(Tooltip::text)
    }

    fn hovered_area(&self) -> Option<AreaId> {
        self.areas
            .iter()
            .find(|zone| zone.is_hovered())
            .map(VillageArea::area)
    }

    fn draw_floor(canvas: &mut Canvas) {
        canvas.clear(rgb(210, 210, 230));
        let center = Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
        let hexagon = hexagon_points(center, 380.0);
        canvas.fill_polygon(&hexagon, palette::WOOD);
        for plank in -5..=5 {
            let y = center.y + plank * 60;
            canvas.draw_line(
                Point::new(center.x - 350, y),
                Point::new(center.x + 350, y),
                rgb(120, 70, 35),
                2,
            );
        }
        canvas.stroke_polygon(&hexagon, rgb(100, 60, 30), 5);
    }

    fn draw_building(canvas: &mut Canvas, zone: &VillageArea) {
        let Point { x, y } = zone.center();
        let roof = rgb(139, 69, 19);
        match zone.area() {
            AreaId::Training => {
                canvas.fill_rect(Rect::new(x - 50, y - 80, 100, 100), rgb(150, 130, 110));
                canvas.fill_polygon(
                    &[
                        Point::new(x - 55, y - 80),
                        Point::new(x, y - 130),
                        Point::new(x + 55, y - 80),
                    ],
                    roof,
                );
                let target = Point::new(x + 30, y - 40);
                canvas.fill_circle(target, 15, rgb(200, 50, 50));
                canvas.fill_circle(target, 10, palette::WHITE);
                canvas.fill_circle(target, 5, rgb(200, 50, 50));
            }
            AreaId::Potions => {
                canvas.fill_ellipse(Rect::new(x - 40, y - 30, 80, 50), rgb(40, 40, 40));
                canvas.fill_ellipse(Rect::new(x - 30, y - 25, 60, 30), rgb(50, 200, 50));
                canvas.fill_circle(Point::new(x - 10, y - 35), 8, rgb(100, 255, 100));
                canvas.fill_circle(Point::new(x + 15, y - 40), 5, rgb(100, 255, 100));
            }
            AreaId::Arena => {
                canvas.fill_ellipse(Rect::new(x - 70, y - 50, 140, 80), rgb(180, 140, 100));
                canvas.fill_ellipse(Rect::new(x - 60, y - 40, 120, 60), rgb(150, 110, 70));
                canvas.draw_line(Point::new(x - 50, y - 60), Point::new(x - 50, y - 100), roof, 3);
                canvas.fill_polygon(
                    &[
                        Point::new(x - 50, y - 100),
                        Point::new(x - 30, y - 90),
                        Point::new(x - 50, y - 80),
                    ],
                    rgb(200, 50, 50),
                );
            }
            AreaId::Greenhouse => {
                canvas.fill_rect(Rect::new(x - 50, y - 60, 100, 80), rgb(180, 150, 120));
                canvas.fill_polygon(
                    &[
                        Point::new(x - 55, y - 60),
                        Point::new(x, y - 100),
                        Point::new(x + 55, y - 60),
                    ],
                    roof,
                );
                canvas.fill_rect(Rect::new(x - 20, y - 40, 40, 30), rgb(100, 150, 200));
                canvas.draw_line(Point::new(x, y - 40), Point::new(x, y - 10), roof, 2);
                canvas.draw_line(Point::new(x - 20, y - 25), Point::new(x + 20, y - 25), roof, 2);
                canvas.fill_rect(Rect::new(x - 15, y - 5, 30, 25), rgb(100, 60, 30));
            }
        }
    }

    fn draw_player(&self, canvas: &mut Canvas) {
        let center = Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
        let platform_y = center.y + 30;
        let glow = (50.0 + 20.0 * self.float_phase.sin()) as u8;
        canvas.fill_ellipse(
            Rect::new(center.x - 40, platform_y, 80, 30),
            with_alpha(rgb(100, 200, 255), glow),
        );
        canvas.fill_ellipse(
            Rect::new(center.x - 35, platform_y + 5, 70, 20),
            rgb(150, 220, 255),
        );

        match self.assets.image(&PLAYER_SPRITE) {
            Some(sprite) => {
                let bob = (self.float_phase.sin() * 3.0) as i32;
                canvas.draw_image_scaled(
                    sprite,
                    Rect::new(center.x - 40, center.y - 50 + bob, 80, 80),
                );
            }
            None => {
                canvas.fill_circle(center.offset(0, -30), 20, rgb(255, 200, 180));
                canvas.fill_rect(Rect::new(center.x - 15, center.y - 10, 30, 40), palette::ORANGE);
            }
        }
    }

    fn draw_tooltip(&self, canvas: &mut Canvas, text: &str) {
        let font = self.assets.font_for(FontSize::Medium);
        let (width, height) = font.measure(text);
        let center = Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT - 60);
        let panel = Rect::from_center(center, width as i32, height as i32).inflate(30, 15);
        canvas.fill_rounded_rect(panel, 8, with_alpha(rgb(40, 40, 50), 220));
        canvas.stroke_rounded_rect(panel, 8, palette::GOLD, 2);
        canvas.draw_text_centered(font, text, center, palette::TEXT_LIGHT);
    }
}

impl Scene for VillageHub {
    fn id(&self) -> SceneId {
        SceneId::VillageHub
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut SceneContext<'_>) {
        if self.back.is_clicked(event) {
            self.pending = Some(Transition::Goto(SceneId::MainMenu));
        }
        let Some(area) = self
            .areas
            .iter()
            .find(|zone| zone.is_clicked(event))
            .map(VillageArea::area)
        else {
            return;
        };
        if area == AreaId::Training {
            info!(area = ?area, "training_selected");
            self.pending = Some(Transition::Goto(SceneId::Challenge));
        } else {
            debug!(area = ?area, "area_not_available");
            self.tooltip = Some(Tooltip::ComingSoon(area));
        }
    }

    fn update(&mut self, dt_seconds: f32, ctx: &mut SceneContext<'_>) {
        let pointer = ctx.pointer;
        self.back.update(pointer, dt_seconds);
        for zone in &mut self.areas {
            zone.update(pointer, dt_seconds);
        }
        self.float_phase = (self.float_phase + dt_seconds * FLOAT_SPEED).rem_euclid(TAU);

        let hovered = self.hovered_area();
        self.tooltip = match (self.tooltip.take(), hovered) {
            (_, None) => None,
            (Some(Tooltip::ComingSoon(notice)), Some(area)) if notice == area => {
                Some(Tooltip::ComingSoon(notice))
            }
            (_, Some(area)) => Some(Tooltip::Description(area)),
        };
    }

    fn draw(&self, canvas: &mut Canvas) {
        let assets = self.assets.as_ref();
        match assets.image(&VILLAGE_BACKGROUND) {
            Some(background) => canvas.draw_image(background, Point::new(0, 0)),
            None => Self::draw_floor(canvas),
        }

        for zone in &self.areas {
            Self::draw_building(canvas, zone);
            zone.draw(canvas, assets);
        }
        self.draw_player(canvas);
        self.back.draw(canvas, assets);

        canvas.draw_text_centered(
            assets.font_for(FontSize::Title),
            TITLE,
            Point::new(SCREEN_WIDTH / 2, 40),
            palette::TEXT_DARK,
        );

        if let Some(text) = self.tooltip_text() {
            self.draw_tooltip(canvas, &text);
        }
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use engine::{Display, MouseButton, PointerState};

    use super::*;
    use crate::app::player::PlayerProgress;

    struct Harness {
        hub: VillageHub,
        player: PlayerProgress,
        display: Display,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                hub: VillageHub::new(Rc::new(AssetStore::new())),
                player: PlayerProgress::default(),
                display: Display::new(1280, 720),
            }
        }

        fn frame(&mut self, pointer: Option<Point>, release: bool) {
            let pointer = pointer.map(PointerState::at).unwrap_or_default();
            let mut ctx = SceneContext {
                player: &mut self.player,
                display: &mut self.display,
                pointer,
            };
            if let (true, Some(position)) = (release, pointer.position) {
                self.hub.handle_event(
                    &InputEvent::PointerReleased {
                        button: MouseButton::Primary,
                        position,
                    },
                    &mut ctx,
                );
            }
            self.hub.update(0.016, &mut ctx);
        }
    }

    #[test]
    fn training_area_requests_challenge() {
        let mut harness = Harness::new();
        harness.frame(Some(Point::new(280, 200)), true);
        assert_eq!(
            harness.hub.take_transition(),
            Some(Transition::Goto(SceneId::Challenge))
        );
    }

    #[test]
    fn back_button_returns_to_menu() {
        let mut harness = Harness::new();
        harness.frame(Some(Point::new(100, 670)), true);
        assert_eq!(
            harness.hub.take_transition(),
            Some(Transition::Goto(SceneId::MainMenu))
        );
    }

    #[test]
    fn hover_shows_description_and_leaving_clears_it() {
        let mut harness = Harness::new();
        harness.frame(Some(Point::new(1000, 520)), false);
        assert_eq!(
            harness.hub.tooltip_text().as_deref(),
            Some(AreaId::Greenhouse.info().description)
        );

        harness.frame(Some(Point::new(640, 100)), false);
        assert_eq!(harness.hub.tooltip_text(), None);
    }

    #[test]
    fn coming_soon_notice_lasts_while_area_is_hovered() {
        let mut harness = Harness::new();
        harness.frame(Some(Point::new(1000, 200)), true);
        assert_eq!(harness.hub.take_transition(), None);
        let notice = format!("{} - Coming soon!", AreaId::Potions.info().name);
        assert_eq!(harness.hub.tooltip_text(), Some(notice.clone()));

        harness.frame(Some(Point::new(1010, 210)), false);
        assert_eq!(harness.hub.tooltip_text(), Some(notice));

        harness.frame(Some(Point::new(280, 520)), false);
        assert_eq!(
            harness.hub.tooltip_text().as_deref(),
            Some(AreaId::Arena.info().description)
        );

        harness.frame(None, false);
        assert_eq!(harness.hub.tooltip_text(), None);
    }
}
