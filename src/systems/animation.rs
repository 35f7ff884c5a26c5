use bevy_ecs::prelude::{Entity, Query, Res, Resource, World};

use crate::components::primitive::{Polyline, ProjectionResult, RenderPrimitive};

/// Seconds (or whatever unit the render loop counts in) since the scene started.
#[derive(Resource, Copy, Clone, Debug, Default, PartialEq)]
pub struct ElapsedTime(pub f64);

/// Per-frame update for one primitive. Only polylines animate; calling it
/// again with the same time leaves the primitive unchanged.
pub fn advance(primitive: &mut RenderPrimitive, elapsed: f64) {
    match primitive {
        RenderPrimitive::Point(_) => {}
        RenderPrimitive::Line(line) => AnimationSystem::advance_line(line, elapsed),
    }
}

impl ProjectionResult {
    pub fn update(&mut self, elapsed: f64) {
        for primitive in self.primitives.iter_mut() {
            advance(primitive, elapsed);
        }
    }

    /// Moves every primitive into `world` as its own entity.
    pub fn spawn(self, world: &mut World) -> Vec<Entity> {
        self.primitives
            .into_iter()
            .map(|primitive| match primitive {
                RenderPrimitive::Point(point) => world.spawn(point).id(),
                RenderPrimitive::Line(line) => world.spawn(line).id(),
            })
            .collect()
    }
}

pub struct AnimationSystem {}

impl AnimationSystem {
    pub fn advance_line(line: &mut Polyline, elapsed: f64) {
        line.dash_offset = elapsed * line.dash_rate;
    }

    pub fn advance_dash_offsets(time: Res<ElapsedTime>, mut lines: Query<&mut Polyline>) {
        for mut line in &mut lines {
            AnimationSystem::advance_line(&mut line, time.0);
        }
    }

    // scene teardown
    pub fn despawn(world: &mut World, entities: &[Entity]) {
        for entity in entities {
            world.despawn(*entity);
        }
    }
}
