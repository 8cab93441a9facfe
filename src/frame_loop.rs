//! Fixed-step frame driver. One tick = one update followed by one render; the
//! browser calls [`FrameLoop::tick`] from `requestAnimationFrame`, tests drive it
//! with [`FrameLoop::run`] and a stop condition.

use crate::render::{Painter, render};
use crate::world::World;

#[derive(Debug, Default)]
pub struct FrameLoop {
    frame: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn tick<P: Painter + ?Sized>(&mut self, world: &mut World, painter: &mut P) {
        // update is a no-op after game over; the frozen scene still redraws
        world.update();
        render(world, painter);
        self.frame += 1;
    }

    /// Tick until `stop` returns true (checked before every frame). Returns the
    /// number of frames ticked by this call.
    pub fn run<P, F>(&mut self, world: &mut World, painter: &mut P, mut stop: F) -> u64
    where
        P: Painter + ?Sized,
        F: FnMut(&World, u64) -> bool,
    {
        let start = self.frame;
        while !stop(world, self.frame) {
            self.tick(world, painter);
        }
        self.frame - start
    }
}
