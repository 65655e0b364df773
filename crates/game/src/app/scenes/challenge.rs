use std::rc::Rc;

use engine::{rgb, with_alpha, AssetStore, Canvas, Color, FontSize, InputEvent, Point, Rect};
use tracing::info;

use super::{Scene, SceneContext, SceneId, Transition};
use crate::app::config::{palette, ModuleId, PLAYER_MAX_HEALTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::app::ui::{wrap_words, Button, ChatBox, CodeEditor, HealthBar, Widget};

const GREETING: &str =
    "If you have a question or get stuck anywhere in the code, just ask me!";
const RUN_SUCCESS: &str = "Congratulations! Code ran successfully!";
const FRUIT_ON_TREE: u32 = 8;
const FRUIT_PER_RUN: u32 = 5;

struct ChallengeContent {
    title: &'static str,
    hint: &'static str,
    objective: &'static str,
    code: &'static str,
}

const CSHARP: ChallengeContent = ChallengeContent {
    title: "Help Kayan tend the orchard and collect its fruit",
    hint: "Remember what functions X and Y did in the last lesson...",
    objective: "Call SpawnMango inside the Awake method",
    code: "using x.y;
using x.y.z;

private class GetMangos : MonoBehaviour {

    private void SpawnMango(5);

    // Write your code from here

    private void Awake() {
        // ...
    }
}",
};

const PYTHON: ChallengeContent = ChallengeContent {
    title: "Finish the magic loop to harvest every fruit",
    hint: "Use a for loop with range() to iterate over the amount",
    objective: "Complete the harvest function",
    code: "# Magic Loops with Python

def harvest(amount):
    fruits = []

    # Write your code from here
    for i in range(amount):
        fruits.append(f\"fruit_{i}\")

    return fruits

# Try your function
result = harvest(5)
print(result)",
};

const PHP: ChallengeContent = ChallengeContent {
    title: "Implement the castSpell method of the Wizard",
    hint: "The method should check that there is enough mana",
    objective: "Complete the Wizard class",
    code: "<?php
// Arcane Challenges with PHP

class Wizard {
    private $power;
    private $mana;

    // Write your code from here

    public function castSpell($name) {
        // ...
    }
}
?>",
};

const JAVASCRIPT: ChallengeContent = ChallengeContent {
    title: "Build the item forge system",
    hint: "Use arrays to store the required materials",
    objective: "Implement the createItem method",
    code: "import x from 'y';
import z from 'y';

// Upgrading Resources with JavaScript

class ItemForge {
    constructor() {
        this.resources = [];
    }

    // Write your code from here

    createItem(name, materials) {
        // ...
    }
}",
};

fn content_for(module: ModuleId) -> &'static ChallengeContent {
    match module {
        ModuleId::CSharp => &CSHARP,
        ModuleId::Python => &PYTHON,
        ModuleId::Php => &PHP,
        ModuleId::JavaScript => &JAVASCRIPT,
    }
}

/// Code challenge for one module. Rebuilt on every entry.
pub(crate) struct Challenge {
    module: ModuleId,
    content: &'static ChallengeContent,
    assets: Rc<AssetStore>,
    editor: CodeEditor,
    chat: ChatBox,
    health_bar: HealthBar,
    back: Button,
    run: Button,
    hint: Button,
    succeeded: bool,
    fruits_collected: u32,
    animation_time: f32,
    pending: Option<Transition>,
}

impl Challenge {
    pub(crate) fn new(module: ModuleId, assets: Rc<AssetStore>) -> Self {
        let half = SCREEN_WIDTH / 2;
        let content = content_for(module);

        let mut editor = CodeEditor::new(Rect::new(
            half + 20,
            80,
            half - 40,
            SCREEN_HEIGHT / 2 - 50,
        ));
        editor.set_code(content.code);
        let mut chat = ChatBox::new(Rect::new(half + 20, SCREEN_HEIGHT - 180, half - 40, 160));
        chat.add_message(GREETING, true);

        Self {
            module,
            content,
            assets,
            editor,
            chat,
            health_bar: HealthBar::new(Point::new(SCREEN_WIDTH - 200, 20), PLAYER_MAX_HEALTH),
            back: Button::new(Rect::new(20, 20, 120, 40), "< Back"),
            run: Button::new(Rect::new(half + 20, SCREEN_HEIGHT / 2 + 50, 150, 45), "> Run")
                .with_colors(palette::GREEN, rgb(80, 220, 80)),
            hint: Button::new(Rect::new(half + 190, SCREEN_HEIGHT / 2 + 50, 150, 45), "? Hint")
                .with_colors(palette::BLUE, rgb(100, 150, 255)),
            succeeded: false,
            fruits_collected: 0,
            animation_time: 0.0,
            pending: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn module(&self) -> ModuleId {
        self.module
    }

    #[cfg(test)]
    pub(crate) fn chat(&self) -> &ChatBox {
        &self.chat
    }

    #[cfg(test)]
    pub(crate) fn editor(&self) -> &CodeEditor {
        &self.editor
    }

    #[cfg(test)]
    pub(crate) fn succeeded(&self) -> bool {
        self.succeeded
    }

    #[cfg(test)]
    pub(crate) fn fruits_collected(&self) -> u32 {
        self.fruits_collected
    }

    /// Always reports success; the code is never evaluated.
    fn run_code(&mut self, ctx: &mut SceneContext<'_>) {
        self.succeeded = true;
        self.fruits_collected = FRUIT_PER_RUN;
        self.chat.add_message(RUN_SUCCESS, true);
        let first_completion = ctx.player.record_completion(self.module);
        info!(
            module = self.module.id(),
            fruits = self.fruits_collected,
            first_completion,
            "code_run_simulated"
        );
    }

    fn fruit_color(&self) -> Color {
        match self.module {
            ModuleId::CSharp => rgb(255, 200, 50),
            _ => rgb(255, 165, 0),
        }
    }

    fn draw_orchard(&self, canvas: &mut Canvas) {
        let half = SCREEN_WIDTH / 2;
        canvas.fill_rect(Rect::new(0, 0, half, SCREEN_HEIGHT), rgb(135, 206, 235));
        canvas.fill_rect(Rect::new(0, SCREEN_HEIGHT - 150, half, 150), rgb(34, 139, 34));

        for index in 0..5 {
            let trunk_x = 50 + index * 120;
            let crown = Point::new(trunk_x, 200);
            canvas.fill_circle(crown, 60, rgb(34, 100, 34));
            canvas.fill_circle(crown.offset(-30, 20), 40, rgb(50, 120, 50));
            canvas.fill_circle(crown.offset(30, 20), 40, rgb(50, 120, 50));
            canvas.fill_rect(Rect::new(trunk_x - 15, 240, 30, 80), rgb(139, 69, 19));
        }

        let tree = Point::new(SCREEN_WIDTH / 4, SCREEN_HEIGHT / 2);
        canvas.fill_rect(Rect::new(tree.x - 30, tree.y, 60, 150), rgb(101, 67, 33));
        canvas.fill_circle(tree.offset(0, -50), 120, rgb(34, 139, 34));
        canvas.fill_circle(tree.offset(-80, 0), 80, rgb(50, 160, 50));
        canvas.fill_circle(tree.offset(80, 0), 80, rgb(50, 160, 50));
        canvas.fill_circle(tree.offset(0, 30), 90, rgb(40, 150, 40));

        let fruit = self.fruit_color();
        let rind = rgb(fruit[0].saturating_sub(30), fruit[1].saturating_sub(30), 0);
        let spots = [
            (-60, -80),
            (40, -70),
            (-20, -30),
            (70, -20),
            (-80, 10),
            (30, 20),
            (-40, 50),
            (60, 40),
        ];
        let remaining = FRUIT_ON_TREE.saturating_sub(self.fruits_collected) as usize;
        for (index, (dx, dy)) in spots.into_iter().enumerate().take(remaining) {
            let bob = ((self.animation_time * 2.0 + index as f32).sin() * 3.0) as i32;
            let shape = Rect::new(tree.x + dx - 12, tree.y + dy + bob - 15, 24, 30);
            canvas.fill_ellipse(shape, fruit);
            canvas.stroke_ellipse(shape, rind, 2);
        }

        self.draw_collector(
            canvas,
            Point::new(150, SCREEN_HEIGHT - 200),
            0.0,
            rgb(200, 50, 50),
            rgb(139, 90, 43),
            30,
        );
        self.draw_collector(
            canvas,
            Point::new(280, SCREEN_HEIGHT - 180),
            1.0,
            rgb(50, 100, 200),
            rgb(101, 67, 33),
            35,
        );
    }

    fn draw_collector(
        &self,
        canvas: &mut Canvas,
        base: Point,
        phase: f32,
        shirt: Color,
        skin: Color,
        reach: i32,
    ) {
        let bounce = ((self.animation_time * 3.0 + phase).sin() * 5.0) as i32;
        let body = base.offset(0, bounce);
        canvas.fill_rect(Rect::new(body.x - 15, body.y, 30, 40), shirt);
        canvas.fill_circle(body.offset(0, -15), 18, skin);
        canvas.fill_ellipse(Rect::new(body.x - 15, body.y - 30, 30, 20), rgb(30, 30, 30));
        canvas.draw_line(body.offset(-15, 10), body.offset(-reach, -reach + 10), skin, 5);
        canvas.draw_line(body.offset(15, 10), body.offset(reach, -reach + 10), skin, 5);
    }

    fn draw_mission(&self, canvas: &mut Canvas) {
        let panel = Rect::new(20, 60, SCREEN_WIDTH / 2 - 40, 100);
        canvas.fill_rounded_rect(panel, 10, rgb(255, 230, 150));
        canvas.stroke_rounded_rect(panel, 10, rgb(200, 150, 50), 3);
        canvas.fill_circle(Point::new(panel.right() - 30, panel.y + 30), 20, rgb(100, 100, 200));

        let font = self.assets.font_for(FontSize::Small);
        let width = (panel.width - 80) as u32;
        let step = font.line_height() as i32 + 4;
        let mut y = panel.y + 12;
        for line in wrap_words(font, self.content.title, width) {
            canvas.draw_text(font, &line, Point::new(panel.x + 15, y), palette::TEXT_DARK);
            y += step;
        }
        for line in wrap_words(font, self.content.hint, width) {
            canvas.draw_text(font, &line, Point::new(panel.x + 15, y), rgb(100, 100, 100));
            y += step;
        }
        let objective = format!("Goal: {}", self.content.objective);
        canvas.draw_text(font, &objective, Point::new(panel.x + 15, y), rgb(120, 60, 20));
    }

    fn draw_code_panel(&self, canvas: &mut Canvas) {
        let half = SCREEN_WIDTH / 2;
        let assets = self.assets.as_ref();
        canvas.fill_rect(Rect::new(half, 0, half, SCREEN_HEIGHT), rgb(25, 25, 35));
        canvas.fill_rect(Rect::new(half, 0, half, 60), rgb(35, 35, 50));
        canvas.draw_text(
            assets.font_for(FontSize::Large),
            "Code Editor",
            Point::new(half + 20, 20),
            palette::TEXT_LIGHT,
        );

        self.editor.draw(canvas, assets);
        self.run.draw(canvas, assets);
        self.hint.draw(canvas, assets);
        canvas.draw_line(
            Point::new(half + 20, SCREEN_HEIGHT / 2 + 110),
            Point::new(SCREEN_WIDTH - 20, SCREEN_HEIGHT / 2 + 110),
            rgb(60, 60, 80),
            2,
        );
        self.chat.draw(canvas, assets);
    }

    fn draw_result(&self, canvas: &mut Canvas) {
        let banner = Rect::new(80, 180, SCREEN_WIDTH / 2 - 160, 50);
        canvas.fill_rounded_rect(banner, 10, with_alpha(rgb(20, 80, 20), 220));
        canvas.stroke_rounded_rect(banner, 10, palette::GOLD, 2);
        let text = format!("Success! {} fruits collected", self.fruits_collected);
        canvas.draw_text_centered(
            self.assets.font_for(FontSize::Medium),
            &text,
            banner.center(),
            palette::WHITE,
        );
    }
}

impl Scene for Challenge {
    fn id(&self) -> SceneId {
        SceneId::Challenge
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>) {
        if self.back.is_clicked(event) {
            self.pending = Some(Transition::Goto(SceneId::MainMenu));
        }
        if self.run.is_clicked(event) {
            self.run_code(ctx);
        }
        if self.hint.is_clicked(event) {
            self.chat.add_message(self.content.hint, true);
        }
        self.chat.handle_event(event);
    }

    fn update(&mut self, dt_seconds: f32, ctx: &mut SceneContext<'_>) {
        let pointer = ctx.pointer;
        for button in [&mut self.back, &mut self.run, &mut self.hint] {
            button.update(pointer, dt_seconds);
        }
        self.editor.update(pointer, dt_seconds);
        self.chat.update(pointer, dt_seconds);
        self.health_bar.set_health(ctx.player.health());
        self.animation_time += dt_seconds;
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.draw_orchard(canvas);
        self.draw_mission(canvas);
        if self.succeeded {
            self.draw_result(canvas);
        }
        self.draw_code_panel(canvas);

        let assets = self.assets.as_ref();
        self.back.draw(canvas, assets);
        self.health_bar.draw(canvas, assets);
    }

    fn take_transition(&mut self) -> Option<Transition> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use engine::{Display, Key, MouseButton, PointerState};

    use super::*;
    use crate::app::player::PlayerProgress;

    fn send(challenge: &mut Challenge, player: &mut PlayerProgress, event: InputEvent) {
        let mut display = Display::new(1280, 720);
        let mut ctx = SceneContext {
            player,
            display: &mut display,
            pointer: PointerState::default(),
        };
        challenge.handle_event(&event, &mut ctx);
        challenge.update(0.016, &mut ctx);
    }

    fn click(challenge: &mut Challenge, player: &mut PlayerProgress, x: i32, y: i32) {
        send(
            challenge,
            player,
            InputEvent::PointerReleased {
                button: MouseButton::Primary,
                position: Point::new(x, y),
            },
        );
    }

    fn last_message(challenge: &Challenge) -> Option<String> {
        challenge.chat().messages().last().map(|m| m.text.clone())
    }

    #[test]
    fn starts_with_module_code_and_greeting() {
        let challenge = Challenge::new(ModuleId::Php, Rc::new(AssetStore::new()));
        assert_eq!(challenge.module(), ModuleId::Php);
        assert_eq!(challenge.editor().lines()[0], "<?php");
        assert_eq!(last_message(&challenge).as_deref(), Some(GREETING));
        assert!(!challenge.succeeded());
    }

    #[test]
    fn run_always_succeeds_and_records_completion() {
        let mut challenge = Challenge::new(ModuleId::JavaScript, Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        click(&mut challenge, &mut player, 735, 432);

        assert!(challenge.succeeded());
        assert_eq!(challenge.fruits_collected(), 5);
        assert_eq!(last_message(&challenge).as_deref(), Some(RUN_SUCCESS));
        assert!(player.is_completed(ModuleId::JavaScript));
        assert_eq!(player.xp(), 50);

        click(&mut challenge, &mut player, 735, 432);
        assert_eq!(player.xp(), 50);
        assert_eq!(challenge.take_transition(), None);
    }

    #[test]
    fn hint_posts_module_hint() {
        let mut challenge = Challenge::new(ModuleId::Python, Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        click(&mut challenge, &mut player, 905, 432);
        assert_eq!(last_message(&challenge).as_deref(), Some(PYTHON.hint));
    }

    #[test]
    fn back_returns_to_menu() {
        let mut challenge = Challenge::new(ModuleId::CSharp, Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        click(&mut challenge, &mut player, 80, 40);
        assert_eq!(
            challenge.take_transition(),
            Some(Transition::Goto(SceneId::MainMenu))
        );
    }

    #[test]
    fn chat_questions_get_canned_reply() {
        let mut challenge = Challenge::new(ModuleId::CSharp, Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        let field = challenge.chat().input_rect().center();
        send(
            &mut challenge,
            &mut player,
            InputEvent::PointerPressed {
                button: MouseButton::Primary,
                position: field,
            },
        );
        for ch in "help".chars() {
            send(&mut challenge, &mut player, InputEvent::TextEntered(ch));
        }
        send(&mut challenge, &mut player, InputEvent::KeyPressed(Key::Enter));

        let texts: Vec<String> = challenge.chat().messages().map(|m| m.text.clone()).collect();
        assert_eq!(texts[texts.len() - 2], "help");
        assert_eq!(texts[texts.len() - 1], crate::app::ui::CANNED_REPLY);
    }

    #[test]
    fn draws_without_loaded_assets() {
        let mut challenge = Challenge::new(ModuleId::CSharp, Rc::new(AssetStore::new()));
        let mut player = PlayerProgress::default();
        click(&mut challenge, &mut player, 735, 432);
        let mut canvas = Canvas::new(1280, 720);
        challenge.draw(&mut canvas);
        assert_eq!(canvas.pixel(5, 5), Some(rgb(135, 206, 235)));
    }
}
