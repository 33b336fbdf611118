//! Minimal entity storage for the demo.
//!
//! Components live in parallel columns, one row per entity. Every row has a
//! slot in every column; the entity's [`Signature`] says which components it
//! actually carries.

use engine_component::{Component, Signature};
use engine_group::{ComponentGroup, ComponentList, GroupView};

use crate::components::{Name, Position, Velocity};

/// Column storage for the demo's entities.
#[derive(Debug, Default)]
pub struct DemoWorld {
    names: Vec<Name>,
    positions: Vec<Position>,
    velocities: Vec<Velocity>,
    signatures: Vec<Signature>,
}

impl DemoWorld {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity and return its row. Entities without a velocity are
    /// never moved.
    pub fn spawn(&mut self, name: Name, position: Position, velocity: Option<Velocity>) -> usize {
        let mut signature = Signature::new().with::<Name>().with::<Position>();
        if velocity.is_some() {
            signature.insert(Velocity::component_type_id());
        }

        self.names.push(name);
        self.positions.push(position);
        self.velocities.push(velocity.unwrap_or_default());
        self.signatures.push(signature);
        self.names.len() - 1
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the world has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the signature of the entity at `row`.
    #[must_use]
    pub fn signature(&self, row: usize) -> Option<&Signature> {
        self.signatures.get(row)
    }

    /// Call `f` with a movement group for every entity carrying both a
    /// position and a velocity.
    pub fn for_each_moving(
        &mut self,
        mut f: impl FnMut(&Name, ComponentGroup<'_, (Position, Velocity)>),
    ) {
        let rows = self
            .names
            .iter()
            .zip(&mut self.positions)
            .zip(&mut self.velocities)
            .zip(&self.signatures);

        for (((name, position), velocity), signature) in rows {
            if <(Position, Velocity)>::matched_by(signature) {
                f(name, ComponentGroup::new((position, velocity)));
            }
        }
    }

    /// Read-only views of every entity's name and position.
    pub fn views(&self) -> impl Iterator<Item = GroupView<'_, (Name, Position)>> {
        self.names
            .iter()
            .zip(&self.positions)
            .map(|(name, position)| GroupView::new((name, position)))
    }
}
