//! Component type identity registry.
//!
//! The registry hands out [`ComponentTypeId`]s from a monotonically increasing
//! counter, one per distinct Rust type, the first time a type is identified.
//! Later requests for the same type observe the already-assigned value.
//!
//! Assignment is a get-or-insert on a sharded map: the insert path runs while
//! holding the shard's write lock, so two threads racing on the first request
//! for a brand-new type still assign it exactly once. Once assigned, lookups
//! only take the shard's read lock.
//!
//! The registry also caches the ordered id array of every component list it
//! is asked about. The arrays are owned by the registry and are never moved
//! or replaced once computed, so borrows of them live as long as the registry.
//! The global registry is never dropped, which makes its arrays `'static`.

use std::any::TypeId;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;

use crate::component::{Component, ComponentMeta, ComponentTypeId};
use crate::config::RegistryConfig;

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| Registry::new(RegistryConfig::from_env()));

/// Returns the [`ComponentTypeId`] of `T` from the global registry.
///
/// Shorthand for [`ComponentTypeId::of`].
#[must_use]
pub fn identify<T: Component>() -> ComponentTypeId {
    Registry::global().identify::<T>()
}

/// Assigns and remembers a unique [`ComponentTypeId`] per component type.
#[derive(Debug)]
pub struct Registry {
    /// The identifier handed to the next newly seen type.
    next_id: AtomicU64,
    /// Assigned identifiers keyed by Rust type.
    ids: DashMap<TypeId, ComponentTypeId>,
    /// Metadata for every assigned identifier.
    metas: DashMap<ComponentTypeId, ComponentMeta>,
    /// Cached id arrays of component lists, keyed by the list's Rust type.
    /// Entries are never removed or overwritten.
    lists: DashMap<TypeId, Box<[ComponentTypeId]>>,
}

impl Registry {
    /// Create an empty registry. Identifiers start at zero.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        let (ids, metas, lists) = match config.effective_shard_amount() {
            Some(shards) => (
                DashMap::with_capacity_and_shard_amount(config.capacity, shards),
                DashMap::with_capacity_and_shard_amount(config.capacity, shards),
                DashMap::with_capacity_and_shard_amount(config.capacity, shards),
            ),
            None => (
                DashMap::with_capacity(config.capacity),
                DashMap::with_capacity(config.capacity),
                DashMap::with_capacity(config.capacity),
            ),
        };

        Self {
            next_id: AtomicU64::new(0),
            ids,
            metas,
            lists,
        }
    }

    /// The process-wide registry used by [`ComponentTypeId::of`].
    ///
    /// Built on first use from [`RegistryConfig::from_env`].
    #[must_use]
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Returns the identifier of `T`, assigning the next free one if `T` has
    /// not been seen by this registry yet.
    pub fn identify<T: Component>(&self) -> ComponentTypeId {
        let key = TypeId::of::<T>();
        if let Some(id) = self.ids.get(&key).map(|entry| *entry) {
            return id;
        }

        let name = T::type_name();
        *self.ids.entry(key).or_insert_with(|| {
            let id = ComponentTypeId(self.next_id.fetch_add(1, Ordering::Relaxed));
            self.metas.insert(id, ComponentMeta::named::<T>(id, name));
            debug!(id = id.0, component = name, "assigned component type id");
            id
        })
    }

    /// Returns the identifier of `T` if it has already been assigned.
    #[must_use]
    pub fn lookup<T: Component>(&self) -> Option<ComponentTypeId> {
        self.ids.get(&TypeId::of::<T>()).map(|entry| *entry)
    }

    /// Returns the cached id array for the component list `K`, computing it
    /// with `compute` if this is the first request for `K`.
    ///
    /// `compute` runs at most once per list type, and every caller receives
    /// the same slice.
    pub fn list_ids<K: ?Sized + 'static>(
        &self,
        compute: impl FnOnce(&Self) -> Vec<ComponentTypeId>,
    ) -> &[ComponentTypeId] {
        let key = TypeId::of::<K>();
        let (ptr, len) = match self.lists.get(&key) {
            Some(ids) => (ids.as_ptr(), ids.len()),
            None => {
                let ids = self.lists.entry(key).or_insert_with(|| {
                    let ids = compute(self).into_boxed_slice();
                    debug!(
                        list = std::any::type_name::<K>(),
                        ids = ?ids,
                        "cached component list ids"
                    );
                    ids
                });
                (ids.as_ptr(), ids.len())
            }
        };
        // SAFETY: The boxed slice is never removed or replaced while `self`
        // lives, and moving the box inside the map does not move its heap
        // allocation. The slice is never written after insertion.
        unsafe { std::slice::from_raw_parts(ptr, len) }
    }

    /// Returns the metadata recorded for `id`.
    #[must_use]
    pub fn meta(&self, id: ComponentTypeId) -> Option<ComponentMeta> {
        self.metas.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns the name recorded for `id`.
    #[must_use]
    pub fn name_of(&self, id: ComponentTypeId) -> Option<&'static str> {
        self.metas.get(&id).map(|entry| entry.name)
    }

    /// Returns the number of component types identified so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no component type has been identified yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the metadata of every identified type, ordered by identifier.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ComponentMeta> {
        let mut metas: Vec<ComponentMeta> =
            self.metas.iter().map(|entry| entry.value().clone()).collect();
        metas.sort_by_key(|meta| meta.type_id);
        metas
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
