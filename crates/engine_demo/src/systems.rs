//! Demo systems.
//!
//! Each system receives a component group and nothing else. None of them know
//! how the world stores its entities.

use engine_group::{ComponentGroup, Contains, ErasedGroup, GroupView};
use glam::Vec2;
use tracing::debug;

use crate::components::{Name, Position, Velocity};
use crate::world::DemoWorld;

/// Downward acceleration in world units per second squared.
pub const GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Advance the position by the velocity and return the displacement.
pub fn integrate(group: ComponentGroup<'_, (Position, Velocity)>, dt: f32) -> Vec2 {
    let (position, velocity) = group.into_parts();
    let delta = velocity.0 * dt;
    position.value += delta;
    delta
}

/// Accelerate the velocity by [`GRAVITY`].
pub fn apply_gravity(mut group: ComponentGroup<'_, (Position, Velocity)>, dt: f32) {
    group.get_mut::<Velocity, _>().0 += GRAVITY * dt;
}

/// Distance from the origin of any group that carries a [`Position`].
pub fn distance_from_origin<L, I>(view: GroupView<'_, L>) -> f32
where
    L: Contains<Position, I>,
{
    view.get::<Position, _>().value.length()
}

/// The entity's name, if the group carries one.
pub fn label<'a>(group: ErasedGroup<'a>) -> &'a str {
    group
        .try_get::<Name>()
        .map(|name| name.value.as_str())
        .unwrap_or("<unnamed>")
}

/// Run gravity and integration over every moving entity. Returns the number
/// of entities moved.
pub fn tick(world: &mut DemoWorld, dt: f32) -> usize {
    let mut moved = 0;
    world.for_each_moving(|name, mut group| {
        let mut before = Position::default();
        let mut velocity = Velocity::default();
        group.extract_into((&mut before, &mut velocity));

        apply_gravity(group.reborrow(), dt);
        let delta = integrate(group, dt);

        debug!(
            entity = %name.value,
            from = ?before.value,
            velocity = ?velocity.0,
            speed = velocity.speed(),
            delta = ?delta,
            "moved entity"
        );
        moved += 1;
    });
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut position = Position::new(3.0, 4.0);
        let mut velocity = Velocity::from_xy(1.0, 0.0);

        let delta = integrate(ComponentGroup::new((&mut position, &mut velocity)), 2.0);

        assert_eq!(delta, Vec2::new(2.0, 0.0));
        assert_eq!(position, Position::new(5.0, 4.0));
    }

    #[test]
    fn test_apply_gravity_only_touches_velocity() {
        let mut position = Position::new(0.0, 0.0);
        let mut velocity = Velocity::default();

        apply_gravity(ComponentGroup::new((&mut position, &mut velocity)), 1.0);

        assert_eq!(velocity.0, GRAVITY);
        assert_eq!(position, Position::default());
    }

    #[test]
    fn test_distance_from_any_group_with_position() {
        let name = Name::new("ship");
        let position = Position::new(3.0, 4.0);
        let velocity = Velocity::default();

        let short = GroupView::<(Position,)>::new((&position,));
        let long = GroupView::<(Name, Velocity, Position)>::new((&name, &velocity, &position));

        assert_eq!(distance_from_origin(short), 5.0);
        assert_eq!(distance_from_origin(long), 5.0);
    }

    #[test]
    fn test_label_falls_back_without_name() {
        let name = Name::new("ship");
        let position = Position::default();

        let named = GroupView::<(Name, Position)>::new((&name, &position));
        let unnamed = GroupView::<(Position,)>::new((&position,));

        assert_eq!(label(named.erase()), "ship");
        assert_eq!(label(unnamed.erase()), "<unnamed>");
    }

    #[test]
    fn test_tick_moves_only_entities_with_velocity() {
        let mut world = DemoWorld::new();
        world.spawn(Name::new("rock"), Position::new(0.0, 0.0), None);
        world.spawn(
            Name::new("ship"),
            Position::new(0.0, 0.0),
            Some(Velocity::from_xy(1.0, 0.0)),
        );

        let moved = tick(&mut world, 1.0);
        assert_eq!(moved, 1);

        let positions: Vec<Position> = world
            .views()
            .map(|view| *view.get::<Position, _>())
            .collect();
        assert_eq!(positions[0], Position::new(0.0, 0.0));
        assert_eq!(positions[1], Position::new(1.0, -9.81));
    }
}
