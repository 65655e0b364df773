use std::f32::consts::TAU;
use std::rc::Rc;

use engine::{rgb, with_alpha, AssetStore, Canvas, FontSize, InputEvent, Point, Rect};
use tracing::info;

use super::{Scene, SceneContext, SceneId, Transition};
use crate::app::config::{
    palette, ModuleId, PLAYER_MAX_HEALTH, PLAYER_SPRITE, PORTAL_SPRITE, SCREEN_HEIGHT,
    SCREEN_WIDTH, SPACE_BACKGROUND,
};
use crate::app::placeholders::XorShift;
use crate::app::ui::{Button, HealthBar, ModuleCard, Widget};

const CARD_ANCHORS: [Point; 4] = [
    Point::new(200, 200),
    Point::new(1080, 200),
    Point::new(200, 520),
    Point::new(1080, 520),
];
const PORTAL_SPEED: f32 = 2.0;
const TWINKLE_STARS: u64 = 50;
const TITLE: &str = "CODE FRONTIER";
const SUBTITLE: &str = "Learn Programming by Playing!";
const MODULE_PROMPT: &str = "CHOOSE A MODULE";

pub(crate) struct MainMenu {
    assets: Rc<AssetStore>,
    play: Button,
    village: Button,
    settings: Button,
    quit: Button,
    cards: Vec<ModuleCard>,
    health_bar: HealthBar,
    choosing_module: bool,
    portal_pulse: f32,
    pending: Option<Transition>,
}

impl MainMenu {
    pub(crate) fn new(assets: Rc<AssetStore>) -> Self {
        let center_x = SCREEN_WIDTH / 2;
        Self {
            assets,
            play: Button::new(Rect::new(center_x - 100, 550, 200, 50), "PLAY")
                .with_colors(palette::GREEN, rgb(80, 220, 80)),
            village: Button::new(Rect::new(center_x - 100, 610, 200, 50), "VILLAGE"),
            settings: Button::new(Rect::new(center_x - 250, 670, 150, 40), "Settings").disabled(),
            quit: Button::new(Rect::new(center_x + 100, 670, 150, 40), "Quit")
                .with_colors(palette::RED, rgb(250, 80, 80)),
            cards: ModuleId::ALL
                .into_iter()
                .zip(CARD_ANCHORS)
                .map(|(module, anchor)| ModuleCard::new(module, anchor))
                .collect(),
            health_bar: HealthBar::new(Point::new(SCREEN_WIDTH - 200, 20), PLAYER_MAX_HEALTH),
            choosing_module: false,
            portal_pulse: 0.0,
            pending: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_choosing_module(&self) -> bool {
        self.choosing_module
    }

    fn buttons_mut(&mut self) -> [&mut Button; 4] {
        [
            &mut self.play,
            &mut self.village,
            &mut self.settings,
            &mut self.quit,
        ]
    }

    fn draw_twinkling_stars(&self, canvas: &mut Canvas) {
        let brightness = (200.0 + 55.0 * (self.portal_pulse * 2.0).sin()) as u8;
        for index in 0..TWINKLE_STARS {
            let mut rng = XorShift::new(index + 100);
            let x = rng.range_inclusive(0, SCREEN_WIDTH);
            let y = rng.range_inclusive(0, SCREEN_HEIGHT);
            if rng.next_u32() % 2 == 0 {
                continue;
            }
            let size = (2.0 + (self.portal_pulse + index as f32).sin()) as i32;
            canvas.fill_circle(
                Point::new(x, y),
                size.max(1),
                rgb(brightness, brightness, brightness),
            );
        }
    }

    fn draw_portal(&self, canvas: &mut Canvas) {
        let center = Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2 - 80);
        if let Some(portal) = self.assets.image(&PORTAL_SPRITE) {
            canvas.draw_image_centered(portal, center);
        }
        for ring in 0..8 {
            let sway = ((self.portal_pulse + ring as f32 * 0.5).sin() * 5.0) as i32;
            let width = 100 - ring * 8;
            let height = 140 - ring * 10;
            let color = with_alpha(
                rgb(100 + ring as u8 * 10, 150 + ring as u8 * 10, 255),
                (150 - ring * 15) as u8,
            );
            canvas.stroke_ellipse(
                Rect::from_center(center.offset(sway, 0), width, height),
                color,
                4,
            );
        }
        canvas.fill_ellipse(
            Rect::from_center(center, 60, 80),
            with_alpha(rgb(200, 220, 255), 100),
        );
    }

    fn draw_pet(canvas: &mut Canvas) {
        let origin = Point::new(SCREEN_WIDTH / 2 + 80, SCREEN_HEIGHT / 2 + 50);
        let fur = rgb(200, 180, 160);
        let ear = rgb(180, 160, 140);
        let at = |dx: i32, dy: i32| origin.offset(dx, dy);

        canvas.fill_ellipse(Rect::new(origin.x, origin.y, 40, 30), fur);
        canvas.fill_circle(at(35, 5), 15, fur);
        canvas.fill_polygon(&[at(25, -5), at(30, 5), at(35, -8)], ear);
        canvas.fill_polygon(&[at(40, -8), at(35, 5), at(45, -5)], ear);
        canvas.fill_circle(at(32, 3), 3, rgb(0, 0, 0));
        canvas.fill_circle(at(40, 3), 3, rgb(0, 0, 0));
        canvas.fill_rounded_rect(Rect::new(origin.x + 5, origin.y + 15, 30, 15), 3, palette::ORANGE);
    }
}

impl Scene for MainMenu {
    fn id(&self) -> SceneId {
        SceneId::MainMenu
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>) {
        if self.play.is_clicked(event) {
            self.choosing_module = true;
            for card in &mut self.cards {
                card.set_highlighted(true);
            }
        }
        if self.village.is_clicked(event) {
            self.pending = Some(Transition::Goto(SceneId::VillageHub));
        }
        if self.quit.is_clicked(event) {
            info!(button = self.quit.label(), "quit_selected");
            self.pending = Some(Transition::Quit);
        }
        if let Some(card) = self.cards.iter().find(|card| card.is_clicked(event)) {
            let module = card.module();
            ctx.player.select_module(module);
            let target = if module.opens_lesson() {
                SceneId::Lesson
            } else {
                SceneId::Challenge
            };
            info!(module = module.id(), target = ?target, "module_selected");
            self.pending = Some(Transition::Goto(target));
        }
    }

    fn update(&mut self, dt_seconds: f32, ctx: &mut SceneContext<'_>) {
        let pointer = ctx.pointer;
        for button in self.buttons_mut() {
            button.update(pointer, dt_seconds);
        }
        for card in &mut self.cards {
            card.update(pointer, dt_seconds);
        }
        self.health_bar.set_health(ctx.player.health());
        self.portal_pulse = (self.portal_pulse + dt_seconds * PORTAL_SPEED).rem_euclid(TAU);
    }

    fn draw(&self, canvas: &mut Canvas) {
        let assets = self.assets.as_ref();
        match assets.image(&SPACE_BACKGROUND) {
            Some(background) => canvas.draw_image(background, Point::new(0, 0)),
            None => canvas.clear(palette::SPACE_DARK),
        }
        self.draw_twinkling_stars(canvas);
        self.draw_portal(canvas);

        if let Some(player) = assets.image(&PLAYER_SPRITE) {
            canvas.draw_image_scaled(
                player,
                Rect::new(SCREEN_WIDTH / 2 - 64, SCREEN_HEIGHT / 2 - 30, 128, 128),
            );
        }
        Self::draw_pet(canvas);

        for card in &self.cards {
            card.draw(canvas, assets);
        }
        self.health_bar.draw(canvas, assets);
        for button in [&self.play, &self.village, &self.settings, &self.quit] {
            button.draw(canvas, assets);
        }

        let title_font = assets.font_for(FontSize::Huge);
        let title_center = Point::new(SCREEN_WIDTH / 2, 50);
        canvas.draw_text_centered(title_font, TITLE, title_center.offset(3, 3), rgb(50, 30, 0));
        canvas.draw_text_centered(title_font, TITLE, title_center, palette::GOLD);
        canvas.draw_text_centered(
            assets.font_for(FontSize::Medium),
            SUBTITLE,
            Point::new(SCREEN_WIDTH / 2, 95),
            palette::TEXT_LIGHT,
        );

        if self.choosing_module {
            canvas.draw_text_centered(
                assets.font_for(FontSize::Large),
                MODULE_PROMPT,
                Point::new(SCREEN_WIDTH / 2, 515),
                palette::GOLD,
            );
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

    fn release_at(x: i32, y: i32) -> InputEvent {
        InputEvent::PointerReleased {
            button: MouseButton::Primary,
            position: Point::new(x, y),
        }
    }

    fn click(menu: &mut MainMenu, player: &mut PlayerProgress, x: i32, y: i32) {
        let mut display = Display::new(1280, 720);
        let mut ctx = SceneContext {
            player,
            display: &mut display,
            pointer: PointerState::at(Point::new(x, y)),
        };
        menu.handle_event(&release_at(x, y), &mut ctx);
        menu.update(0.016, &mut ctx);
    }

    #[test]
    fn python_card_requests_lesson_and_records_selection() {
        let mut menu = MainMenu::new(Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        click(&mut menu, &mut player, 1080, 200);

        assert_eq!(menu.take_transition(), Some(Transition::Goto(SceneId::Lesson)));
        assert_eq!(menu.take_transition(), None);
        assert_eq!(player.selected_module(), Some(ModuleId::Python));
    }

    #[test]
    fn php_card_requests_challenge() {
        let mut menu = MainMenu::new(Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        click(&mut menu, &mut player, 200, 520);

        assert_eq!(
            menu.take_transition(),
            Some(Transition::Goto(SceneId::Challenge))
        );
        assert_eq!(player.selected_module(), Some(ModuleId::Php));
    }

    #[test]
    fn play_only_opens_module_prompt() {
        let mut menu = MainMenu::new(Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        click(&mut menu, &mut player, 640, 575);

        assert!(menu.is_choosing_module());
        assert_eq!(menu.take_transition(), None);
    }

    #[test]
    fn village_quit_and_disabled_settings() {
        let mut menu = MainMenu::new(Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();

        click(&mut menu, &mut player, 640, 635);
        assert_eq!(
            menu.take_transition(),
            Some(Transition::Goto(SceneId::VillageHub))
        );

        click(&mut menu, &mut player, 460, 690);
        assert_eq!(menu.take_transition(), None);

        click(&mut menu, &mut player, 810, 690);
        assert_eq!(menu.take_transition(), Some(Transition::Quit));
    }
}
