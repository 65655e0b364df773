use std::rc::Rc;

use engine::{rgb, AssetKey, AssetStore, Canvas, Color, FontSize, InputEvent, Key, Point};
use tracing::{debug, info};

use super::{Scene, SceneContext, SceneId, Transition};
use crate::app::config::{lesson_image_key, palette, ModuleId, LESSON_RESOLUTION};

/// Full-bleed lesson image shown at the larger lesson resolution.
pub(crate) struct Lesson {
    assets: Rc<AssetStore>,
    module: Option<ModuleId>,
    image_key: AssetKey,
    saved_resolution: Option<(u32, u32)>,
    pending: Option<Transition>,
}

impl Lesson {
    pub(crate) fn new(assets: Rc<AssetStore>) -> Self {
        Self {
            assets,
            module: None,
            image_key: lesson_image_key(None),
            saved_resolution: None,
            pending: None,
        }
    }

    pub(crate) fn configure(&mut self, module: Option<ModuleId>) {
        self.module = module;
        self.image_key = lesson_image_key(module);
        debug!(image = %self.image_key, "lesson_configured");
    }

    #[cfg(test)]
    pub(crate) fn image_key(&self) -> &AssetKey {
        &self.image_key
    }

    /// Rows of the text panel shown when the lesson image is missing.
    fn fallback_lines(&self) -> Vec<(FontSize, String, Color)> {
        let Some(module) = self.module else {
            return vec![(
                FontSize::Large,
                "Lesson - Click to go back".to_string(),
                palette::WHITE,
            )];
        };
        let info = module.info();
        let mut lines = vec![
            (
                FontSize::Large,
                format!("{} - Click to go back", info.name),
                palette::WHITE,
            ),
            (FontSize::Small, info.description.to_string(), palette::TEXT_LIGHT),
        ];
        lines.extend(
            info.lessons
                .iter()
                .map(|topic| (FontSize::Medium, topic.to_string(), palette::GOLD)),
        );
        lines
    }

    fn draw_fallback(&self, canvas: &mut Canvas) {
        canvas.clear(rgb(50, 50, 80));
        let mut y = 400;
        for (size, text, color) in self.fallback_lines() {
            canvas.draw_text_centered(
                self.assets.font_for(size),
                &text,
                Point::new(640, y),
                color,
            );
            y += if size == FontSize::Large { 45 } else { 30 };
        }
    }
}

impl Scene for Lesson {
    fn id(&self) -> SceneId {
        SceneId::Lesson
    }

    fn handle_event(&mut self, event: &InputEvent, _ctx: &mut SceneContext<'_>) {
        match event {
            InputEvent::KeyPressed(Key::Escape) | InputEvent::PointerReleased { .. } => {
                self.pending = Some(Transition::Goto(SceneId::MainMenu));
            }
            _ => {}
        }
    }

    fn update(&mut self, _dt_seconds: f32, _ctx: &mut SceneContext<'_>) {}

    fn draw(&self, canvas: &mut Canvas) {
        match self.assets.image(&self.image_key) {
            Some(image) => {
                canvas.clear(palette::SPACE_DARK);
                canvas.draw_image(image, Point::new(0, 0));
            }
            None => self.draw_fallback(canvas),
        }
    }

    fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        self.saved_resolution = Some(ctx.display.resolution());
        ctx.display.set_resolution(LESSON_RESOLUTION);
        info!(
            image = %self.image_key,
            width = LESSON_RESOLUTION.0,
            height = LESSON_RESOLUTION.1,
            "lesson_opened"
        );
    }

    fn on_exit(&mut self, ctx: &mut SceneContext<'_>) {
        if let Some(resolution) = self.saved_resolution.take() {
            ctx.display.set_resolution(resolution);
        }
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use engine::{Display, Image, MouseButton, PointerState};

    use super::*;
    use crate::app::player::PlayerProgress;

    #[test]
    fn image_key_follows_module() {
        let mut lesson = Lesson::new(Rc::new(AssetStore::new()));
        assert_eq!(lesson.image_key().as_str(), "lesson_default");
        lesson.configure(Some(ModuleId::Python));
        assert_eq!(lesson.image_key().as_str(), "lesson");
        lesson.configure(Some(ModuleId::CSharp));
        assert_eq!(lesson.image_key().as_str(), "lesson_csharp");
        lesson.configure(Some(ModuleId::Php));
        assert_eq!(lesson.image_key().as_str(), "lesson_default");
    }

    #[test]
    fn fallback_panel_lists_description_and_topics() {
        let mut lesson = Lesson::new(Rc::new(AssetStore::new()));
        assert_eq!(lesson.fallback_lines().len(), 1);

        lesson.configure(Some(ModuleId::Python));
        let info = ModuleId::Python.info();
        let texts: Vec<String> = lesson
            .fallback_lines()
            .into_iter()
            .map(|(_, text, _)| text)
            .collect();
        assert_eq!(texts[0], format!("{} - Click to go back", info.name));
        assert_eq!(texts[1], info.description);
        assert_eq!(texts.len(), 2 + info.lessons.len());
    }

    #[test]
    fn resolution_is_restored_after_exit() {
        let mut lesson = Lesson::new(Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        let mut display = Display::new(1024, 600);
        let mut ctx = SceneContext {
            player: &mut player,
            display: &mut display,
            pointer: PointerState::default(),
        };

        lesson.on_enter(&mut ctx);
        assert_eq!(ctx.display.resolution(), (1280, 800));
        lesson.handle_event(
            &InputEvent::PointerReleased {
                button: MouseButton::Secondary,
                position: Point::new(1, 1),
            },
            &mut ctx,
        );
        assert_eq!(
            lesson.take_transition(),
            Some(Transition::Goto(SceneId::MainMenu))
        );
        lesson.on_exit(&mut ctx);
        assert_eq!(ctx.display.resolution(), (1024, 600));

        lesson.on_exit(&mut ctx);
        assert_eq!(ctx.display.resolution(), (1024, 600));
    }

    #[test]
    fn draws_loaded_image_at_origin() {
        let mut store = AssetStore::new();
        let red = Image::from_rgba(2, 2, [200, 0, 0, 255].repeat(4)).expect("valid image");
        store.insert_image(AssetKey::from_static("lesson"), red);
        let mut lesson = Lesson::new(Rc::new(store));
        lesson.configure(Some(ModuleId::Python));

        let mut canvas = Canvas::new(1280, 800);
        lesson.draw(&mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(rgb(200, 0, 0)));
        assert_eq!(canvas.pixel(5, 5), Some(palette::SPACE_DARK));
    }
}
