//! The twelve demonstrations and what they share.
//!
//! Every demo records one frame into a [`DrawList`] per call. Demos keep their own
//! animation state for the life of the program, so leaving a demo and coming back
//! resumes where it stopped.

pub mod clear;
pub mod collision;
pub mod color;
pub mod common;
pub mod context;
pub mod font;
pub mod map;
pub mod menu;
pub mod particle;
pub mod poly;
pub mod rotate;
pub mod shapes;
pub mod sprite;
pub mod texture;

use rand::Rng;

use crate::engine::graphics::DrawList;
use crate::game::assets::Assets;
use crate::game::demo::DemoKind;

pub use context::FrameContext;

pub trait Demo {
    /// Reacts to input, advances the animation and records the frame.
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList);

    /// Called whenever the demo becomes the current one.
    fn activate(&mut self) {}
}

/// One instance of every demo, indexed by [`DemoKind`].
pub struct Demos {
    demos: Vec<Box<dyn Demo>>,
    current: Option<DemoKind>,
}

impl Demos {
    pub fn new<R: Rng>(assets: &Assets, rng: &mut R) -> Self {
        let demos: Vec<Box<dyn Demo>> = vec![
            Box::new(clear::ClearDemo),
            Box::new(poly::PolyDemo),
            Box::new(color::ColorDemo),
            Box::new(rotate::RotateDemo::default()),
            Box::new(shapes::ShapesDemo::default()),
            Box::new(texture::TextureDemo::new(assets)),
            Box::new(sprite::SpriteDemo::new(assets)),
            Box::new(font::FontDemo::new(assets)),
            Box::new(collision::CollisionDemo::new(assets, rng)),
            Box::new(menu::MenuDemo::new(assets)),
            Box::new(map::MapDemo::new(assets)),
            Box::new(particle::ParticleDemo::new(assets)),
        ];
        debug_assert_eq!(demos.len(), DemoKind::ALL.len());
        Self { demos, current: None }
    }

    /// Runs one frame of `kind`, activating it first if it was not running last frame.
    pub fn frame(&mut self, kind: DemoKind, ctx: &mut FrameContext, draw: &mut DrawList) {
        let Some(demo) = self.demos.get_mut(kind.index()) else {
            return;
        };
        if self.current != Some(kind) {
            demo.activate();
            self.current = Some(kind);
        }
        demo.frame(ctx, draw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::testing::RecordingPlayer;
    use crate::engine::input::InputHandler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_demo_draws_or_clears() {
        let assets = Assets::untextured();
        let mut rng = StdRng::seed_from_u64(1);
        let mut demos = Demos::new(&assets, &mut rng);
        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        for kind in DemoKind::ALL {
            for paused in [false, true] {
                let mut draw = DrawList::new();
                let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);
                ctx.paused = paused;
                demos.frame(kind, &mut ctx, &mut draw);
                assert!(!ctx.quit_requested(), "{:?} asked to quit", kind);
            }
        }
    }
}
