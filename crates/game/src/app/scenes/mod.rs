use engine::{Canvas, Display, InputEvent, PointerState};

use super::player::PlayerProgress;

mod challenge;
mod lesson;
mod main_menu;
mod village_hub;

pub(crate) use challenge::Challenge;
pub(crate) use lesson::Lesson;
pub(crate) use main_menu::MainMenu;
pub(crate) use village_hub::VillageHub;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SceneId {
    MainMenu,
    VillageHub,
    Challenge,
    Lesson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Goto(SceneId),
    Quit,
}

/// Mutable game state a scene may touch while it is active.
pub(crate) struct SceneContext<'a> {
    pub(crate) player: &'a mut PlayerProgress,
    pub(crate) display: &'a mut Display,
    pub(crate) pointer: PointerState,
}

pub(crate) trait Scene {
    fn id(&self) -> SceneId;

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>);

    fn update(&mut self, dt_seconds: f32, ctx: &mut SceneContext<'_>);

    fn draw(&self, canvas: &mut Canvas);

    fn on_enter(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// Must undo anything `on_enter` changed outside the scene.
    fn on_exit(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// One-shot: the request is cleared once taken.
    fn take_transition(&mut self) -> Option<Transition>;
}
