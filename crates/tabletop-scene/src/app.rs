use std::path::Path;

use tabletop_engine::core::{App, AppControl, FrameCtx};
use tabletop_engine::input::{InputEvent, Key, KeyState};
use tabletop_engine::render::{MeshRenderer, TextureData};
use tabletop_engine::scene::{DrawList, EmptyStackError, TransformStack};
use tabletop_engine::time::{AnimationClock, FpsCounter};

use crate::animation::BoxAnimation;
use crate::config::SceneConfig;
use crate::controls::OrbitControls;
use crate::scene::{self, SceneAssets, SceneTextures};

/// Scene state driven by the engine runtime.
///
/// Owns everything that changes between frames; nothing lives in globals.
pub struct TabletopApp {
    config: SceneConfig,

    renderer: MeshRenderer,
    assets:   SceneAssets,

    stack:     TransformStack,
    draw_list: DrawList,

    clock:     AnimationClock,
    animation: BoxAnimation,
    controls:  OrbitControls,
    fps:       FpsCounter,
}

impl TabletopApp {
    /// Decodes the scene textures and registers meshes. GPU upload is deferred
    /// to the first frame.
    pub fn new(config: SceneConfig) -> Self {
        let textures = SceneTextures {
            floor:     load_or_checkerboard(&config.floor_texture_path(), [150, 110, 70, 255]),
            table:     load_or_checkerboard(&config.table_texture_path(), [120, 80, 40, 255]),
            crate_box: load_or_checkerboard(&config.box_texture_path(), [200, 170, 110, 255]),
        };

        let mut renderer = MeshRenderer::new();
        let assets = SceneAssets::register(&mut renderer, textures);

        let anim = config.animation;
        Self {
            renderer,
            assets,
            stack:     TransformStack::new(),
            draw_list: DrawList::new(),
            clock:     AnimationClock::new(),
            animation: BoxAnimation::new(anim),
            controls:  OrbitControls::new(anim.initial_radius, anim.radius_step),
            fps:       FpsCounter::new(),
            config,
        }
    }
}

/// Loads an image, or substitutes a checkerboard tinted with `tint` so the
/// scene still renders without its assets.
fn load_or_checkerboard(path: &Path, tint: [u8; 4]) -> TextureData {
    match TextureData::load(path) {
        Ok(tex) => {
            log::info!("loaded texture {} ({}x{})", path.display(), tex.width, tex.height);
            tex
        }
        Err(err) => {
            log::warn!("{:#}; using a checkerboard", anyhow::Error::new(err));
            let label = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            TextureData::checkerboard(label, 64, 8, tint, [40, 40, 40, 255])
        }
    }
}

/// Runs `traverse` and reports whether `list` holds a complete frame.
///
/// On a traversal error the error is logged and the partial draw list is
/// discarded, so only the clear colour is presented.
fn record_frame<F>(stack: &mut TransformStack, list: &mut DrawList, traverse: F) -> bool
where
    F: FnOnce(&mut TransformStack, &mut DrawList) -> Result<(), EmptyStackError>,
{
    match traverse(stack, list) {
        Ok(()) => true,
        Err(err) => {
            log::error!("scene traversal failed: {err}; skipping draw");
            list.clear();
            false
        }
    }
}

impl App for TabletopApp {
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::Key { key, state, repeat, .. } => {
                match state {
                    KeyState::Pressed if !*repeat => log::debug!("key down: {key}"),
                    KeyState::Pressed => {}
                    KeyState::Released => log::debug!("key up: {key}"),
                }
                if *key == Key::Escape && *state == KeyState::Pressed {
                    log::info!("escape pressed; exiting");
                    return AppControl::Exit;
                }
            }
            InputEvent::PointerMoved(p) => log::trace!("pointer moved: ({:.1}, {:.1})", p.x, p.y),
            InputEvent::PointerButton(b) => {
                log::trace!("pointer {:?} {:?} at ({:.1}, {:.1})", b.button, b.state, b.x, b.y)
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let now = ctx.time.now;

        if let Some(fps) = self.fps.frame(now) {
            log::info!("{fps} fps");
            ctx.window.set_title(&format!("{} ({fps} fps)", self.config.title));
        }

        // ── Update ────────────────────────────────────────────────────────
        let radius = self.controls.update(ctx.input);
        let elapsed = self.clock.elapsed(now);
        let box_position = self.animation.update(elapsed, radius);

        // ── Compose + render ──────────────────────────────────────────────
        let camera = self.config.camera;
        let assets = self.assets;
        let stack = &mut self.stack;
        let draw_list = &mut self.draw_list;
        let renderer = &mut self.renderer;

        ctx.render(self.config.clear, |rctx, target| {
            let projection = camera.projection(rctx.aspect_ratio());
            let recorded = record_frame(stack, draw_list, |stack, list| {
                scene::compose(stack, list, projection, camera.view(), &assets, box_position)
            });
            if recorded {
                renderer.render(rctx, target, draw_list);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};
    use tabletop_engine::scene::{MeshId, TextureId};

    use super::*;

    #[test]
    fn balanced_traversal_is_recorded() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        let ok = record_frame(&mut stack, &mut list, |stack, list| {
            stack.scoped(|stack| {
                stack.translate(Vec3::Y);
                list.push(stack, MeshId(0), TextureId(0));
                Ok(())
            })
        });
        assert!(ok);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn unbalanced_traversal_skips_the_draw() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        list.begin(Mat4::IDENTITY);

        // The closure pops the entry the scope saved, so the scope's own restore fails.
        let ok = record_frame(&mut stack, &mut list, |stack, list| {
            list.push(stack, MeshId(0), TextureId(0));
            stack.scoped(|stack| {
                list.push(stack, MeshId(1), TextureId(1));
                stack.restore()
            })
        });

        assert!(!ok);
        assert!(list.is_empty());
        assert_eq!(list.projection(), Mat4::IDENTITY);
    }

    #[test]
    fn escape_press_exits() {
        let mut app = TabletopApp::new(crate::config::SceneConfig::default().with_assets_override(Some("/nonexistent".into())));
        let press = |state| InputEvent::Key {
            key: Key::Escape,
            state,
            modifiers: Default::default(),
            code: 0,
            repeat: false,
        };
        assert_eq!(app.on_input(&press(KeyState::Released)), AppControl::Continue);
        assert_eq!(app.on_input(&press(KeyState::Pressed)), AppControl::Exit);
    }
}
