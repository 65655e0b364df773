use std::rc::Rc;

use engine::{App, AssetStore, Canvas, Display, FrameControl, FrameInput, InputEvent, Key};
use tracing::info;

use super::config::ModuleId;
use super::player::PlayerProgress;
use super::scenes::{
    Challenge, Lesson, MainMenu, Scene, SceneContext, SceneId, Transition, VillageHub,
};

struct Scenes {
    main_menu: MainMenu,
    village_hub: VillageHub,
    challenge: Challenge,
    lesson: Lesson,
}

impl Scenes {
    fn get(&self, id: SceneId) -> &dyn Scene {
        match id {
            SceneId::MainMenu => &self.main_menu,
            SceneId::VillageHub => &self.village_hub,
            SceneId::Challenge => &self.challenge,
            SceneId::Lesson => &self.lesson,
        }
    }

    fn get_mut(&mut self, id: SceneId) -> &mut dyn Scene {
        match id {
            SceneId::MainMenu => &mut self.main_menu,
            SceneId::VillageHub => &mut self.village_hub,
            SceneId::Challenge => &mut self.challenge,
            SceneId::Lesson => &mut self.lesson,
        }
    }
}

/// Owns every scene and routes each frame to the active one.
pub(crate) struct SceneHost {
    assets: Rc<AssetStore>,
    player: PlayerProgress,
    scenes: Scenes,
    active: SceneId,
    started: bool,
}

impl SceneHost {
    pub(crate) fn new(assets: AssetStore) -> Self {
        let assets = Rc::new(assets);
        Self {
            scenes: Scenes {
                main_menu: MainMenu::new(Rc::clone(&assets)),
                village_hub: VillageHub::new(Rc::clone(&assets)),
                challenge: Challenge::new(ModuleId::default(), Rc::clone(&assets)),
                lesson: Lesson::new(Rc::clone(&assets)),
            },
            assets,
            player: PlayerProgress::default(),
            active: SceneId::MainMenu,
            started: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn active_scene(&self) -> SceneId {
        self.scenes.get(self.active).id()
    }

    fn switch_scene(
        scenes: &mut Scenes,
        assets: &Rc<AssetStore>,
        active: &mut SceneId,
        target: SceneId,
        ctx: &mut SceneContext<'_>,
    ) {
        let leaving = scenes.get_mut(*active);
        let outgoing = leaving.id();
        leaving.on_exit(ctx);

        match target {
            SceneId::Challenge => {
                let module = ctx.player.take_selected_module().unwrap_or_default();
                scenes.challenge = Challenge::new(module, Rc::clone(assets));
            }
            SceneId::Lesson => scenes.lesson.configure(ctx.player.take_selected_module()),
            SceneId::MainMenu | SceneId::VillageHub => {}
        }

        *active = target;
        let entering = scenes.get_mut(target);
        entering.on_enter(ctx);
        // Widget hover flags are stale from the last visit until refreshed.
        entering.update(0.0, ctx);
        info!(from = ?outgoing, to = ?target, "scene_switched");
    }
}

impl App for SceneHost {
    fn frame(&mut self, input: FrameInput<'_>, display: &mut Display) -> FrameControl {
        let mut ctx = SceneContext {
            player: &mut self.player,
            display,
            pointer: input.pointer,
        };
        if !self.started {
            self.started = true;
            self.scenes.get_mut(self.active).on_enter(&mut ctx);
            info!(scene = ?self.active, "scene_entered");
        }

        let mut forced = None;
        for event in input.events {
            match event {
                InputEvent::QuitRequested => return FrameControl::Quit,
                InputEvent::KeyPressed(Key::Escape) if self.active == SceneId::MainMenu => {
                    info!(reason = "escape", "quit_requested");
                    return FrameControl::Quit;
                }
                InputEvent::KeyPressed(Key::Escape) => {
                    forced = Some(SceneId::MainMenu);
                    break;
                }
                _ => self
                    .scenes
                    .get_mut(self.active)
                    .handle_event(event, &mut ctx),
            }
        }

        let scene = self.scenes.get_mut(self.active);
        scene.update(input.dt_seconds, &mut ctx);
        let requested = scene.take_transition();

        match forced.map(Transition::Goto).or(requested) {
            Some(Transition::Quit) => {
                info!(scene = ?self.active, "quit_requested");
                FrameControl::Quit
            }
            Some(Transition::Goto(target)) => {
                Self::switch_scene(
                    &mut self.scenes,
                    &self.assets,
                    &mut self.active,
                    target,
                    &mut ctx,
                );
                FrameControl::Continue
            }
            None => FrameControl::Continue,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.scenes.get(self.active).draw(canvas);
    }

    fn shutdown(&mut self, display: &mut Display) {
        let mut ctx = SceneContext {
            player: &mut self.player,
            display,
            pointer: Default::default(),
        };
        self.scenes.get_mut(self.active).on_exit(&mut ctx);
        info!(
            scene = ?self.active,
            xp = self.player.xp(),
            level = self.player.level(),
            "shutdown"
        );
    }
}
