//! Entity signatures.
//!
//! A [`Signature`] is the set of component types an entity currently carries.
//! Query and matching code compares a signature against the id array of a
//! component list to decide whether an entity can supply that list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentTypeId};

/// A sorted set of [`ComponentTypeId`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    types: BTreeSet<ComponentTypeId>,
}

impl Signature {
    /// Create an empty signature.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: BTreeSet::new(),
        }
    }

    /// Add `T` to the signature.
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self {
        self.types.insert(ComponentTypeId::of::<T>());
        self
    }

    /// Add a component type. Returns `true` if it was not already present.
    pub fn insert(&mut self, type_id: ComponentTypeId) -> bool {
        self.types.insert(type_id)
    }

    /// Remove a component type. Returns `true` if it was present.
    pub fn remove(&mut self, type_id: ComponentTypeId) -> bool {
        self.types.remove(&type_id)
    }

    /// Returns `true` if the signature contains the given component type.
    #[must_use]
    pub fn contains(&self, type_id: ComponentTypeId) -> bool {
        self.types.contains(&type_id)
    }

    /// Returns `true` if every id in `ids` is part of this signature.
    ///
    /// An empty `ids` slice is trivially matched.
    #[must_use]
    pub fn is_superset_of(&self, ids: &[ComponentTypeId]) -> bool {
        ids.iter().all(|id| self.types.contains(id))
    }

    /// Returns the number of component types in the signature.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the signature has no component types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate the component types in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.types.iter().copied()
    }
}

impl FromIterator<ComponentTypeId> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentTypeId>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl Extend<ComponentTypeId> for Signature {
    fn extend<I: IntoIterator<Item = ComponentTypeId>>(&mut self, iter: I) {
        self.types.extend(iter);
    }
}

impl From<&[ComponentTypeId]> for Signature {
    fn from(ids: &[ComponentTypeId]) -> Self {
        ids.iter().copied().collect()
    }
}
