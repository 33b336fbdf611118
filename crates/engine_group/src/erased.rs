//! Runtime-checked access to a group whose component list is not known
//! statically.
//!
//! Query and matching code often only has a group's id array to work with.
//! [`ErasedGroup`] keeps that array next to the slots and checks the id tag
//! before every cast, trading the compile-time guarantee of
//! [`ComponentGroup::get`](crate::ComponentGroup::get) for a lookup that can
//! fail with [`GroupError::MissingComponent`].

use std::fmt;

use engine_component::{Component, ComponentTypeId, Registry, Signature};

use crate::error::GroupError;
use crate::slot::Slot;

/// A read-only, type-erased group.
#[derive(Clone, Copy)]
pub struct ErasedGroup<'a> {
    ids: &'static [ComponentTypeId],
    slots: &'a [Slot],
}

impl<'a> ErasedGroup<'a> {
    /// # Safety
    ///
    /// `ids` and `slots` must have the same length, and slot `i` must address
    /// a live value of the type identified by `ids[i]` in the global registry,
    /// readable and not mutably aliased for `'a`.
    pub(crate) unsafe fn new(ids: &'static [ComponentTypeId], slots: &'a [Slot]) -> Self {
        debug_assert_eq!(ids.len(), slots.len());
        Self { ids, slots }
    }

    /// The component type ids in declaration order.
    #[must_use]
    pub fn ids(&self) -> &'static [ComponentTypeId] {
        self.ids
    }

    /// Returns the number of components in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the group holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` if the group holds a component with the given id.
    #[must_use]
    pub fn contains(&self, type_id: ComponentTypeId) -> bool {
        self.ids.contains(&type_id)
    }

    /// Returns the position of the first component with the given id.
    #[must_use]
    pub fn position(&self, type_id: ComponentTypeId) -> Option<usize> {
        self.ids.iter().position(|&id| id == type_id)
    }

    /// Returns the slot of the first component with the given id.
    #[must_use]
    pub fn slot(&self, type_id: ComponentTypeId) -> Option<Slot> {
        self.position(type_id).map(|index| self.slots[index])
    }

    /// Returns `true` if every component of this group is in `signature`.
    #[must_use]
    pub fn is_within(&self, signature: &Signature) -> bool {
        signature.is_superset_of(self.ids)
    }

    /// Returns the component of type `T`.
    ///
    /// If `T` appears more than once, the first occurrence is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::MissingComponent`] if the group holds no `T`.
    pub fn try_get<T: Component>(&self) -> Result<&'a T, GroupError> {
        let slot = Registry::global()
            .lookup::<T>()
            .and_then(|id| self.slot(id))
            .ok_or(GroupError::MissingComponent {
                name: T::type_name(),
            })?;
        // SAFETY: The slot's id tag matched `T`, and the slot is readable for
        // `'a`.
        Ok(unsafe { slot.as_ref::<T>() })
    }
}

impl fmt::Debug for ErasedGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = Registry::global();
        let mut list = f.debug_list();
        for (id, slot) in self.ids.iter().zip(self.slots) {
            list.entry(&(registry.name_of(*id).unwrap_or("<unknown>"), slot));
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use engine_component::impl_component;

    use super::*;
    use crate::group::ComponentGroup;
    use crate::view::GroupView;

    #[derive(Debug, Clone, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity {
        dx: i32,
        dy: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Absent;

    impl_component!(Position, Velocity, Absent);

    #[test]
    fn test_try_get_present_component() {
        let pos = Position { x: 3, y: 4 };
        let vel = Velocity { dx: 1, dy: 0 };
        let view = GroupView::<(Position, Velocity)>::new((&pos, &vel));
        let erased = view.erase();

        assert_eq!(erased.len(), 2);
        assert!(std::ptr::eq(erased.try_get::<Velocity>().unwrap(), &vel));
        assert_eq!(erased.try_get::<Position>().unwrap(), &pos);
    }

    #[test]
    fn test_try_get_missing_component() {
        let pos = Position { x: 0, y: 0 };
        let view = GroupView::<(Position,)>::new((&pos,));
        let erased = view.erase();

        let err = erased.try_get::<Absent>().unwrap_err();
        assert!(matches!(err, GroupError::MissingComponent { .. }));
        assert!(err.to_string().contains("Absent"));
    }

    #[test]
    fn test_positions_and_contains() {
        let mut pos = Position { x: 0, y: 0 };
        let mut vel = Velocity { dx: 0, dy: 0 };
        let group = ComponentGroup::<(Velocity, Position)>::new((&mut vel, &mut pos));
        let erased = group.erase();

        let pos_id = ComponentTypeId::of::<Position>();
        assert!(erased.contains(pos_id));
        assert_eq!(erased.position(pos_id), Some(1));
        assert_eq!(erased.slot(pos_id), Some(group.slots()[1]));
        assert_eq!(erased.position(ComponentTypeId::of::<Absent>()), None);
    }

    #[test]
    fn test_duplicates_resolve_to_first_occurrence() {
        let first = Position { x: 1, y: 1 };
        let second = Position { x: 2, y: 2 };
        let view = GroupView::<(Position, Position)>::new((&first, &second));

        assert!(std::ptr::eq(view.erase().try_get::<Position>().unwrap(), &first));
        assert!(std::ptr::eq(view.at::<1>(), &second));
    }

    #[test]
    fn test_is_within_signature() {
        let pos = Position { x: 0, y: 0 };
        let vel = Velocity { dx: 0, dy: 0 };
        let view = GroupView::<(Position, Velocity)>::new((&pos, &vel));

        let entity = Signature::new()
            .with::<Position>()
            .with::<Velocity>()
            .with::<Absent>();
        assert!(view.erase().is_within(&entity));
        assert!(!view.erase().is_within(&Signature::new().with::<Position>()));
    }

    #[test]
    fn test_debug_names_components() {
        let pos = Position { x: 0, y: 0 };
        let view = GroupView::<(Position,)>::new((&pos,));
        assert!(format!("{:?}", view.erase()).contains("Position"));
    }
}
