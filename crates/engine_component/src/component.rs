//! Core [`Component`] trait and associated metadata.
//!
//! Every piece of data bundled into a component group must implement
//! [`Component`]. The trait requires `Send + Sync + 'static` so groups over
//! components can be handed to other threads.
//!
//! ## Type Identity
//!
//! [`ComponentTypeId`] is assigned by the [`Registry`] the first time a type is
//! identified. Identifiers are handed out from a counter starting at zero, so
//! the numeric value only means "distinct from every other component type in
//! this process". It must not be persisted or compared across runs.

use std::alloc::Layout;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// A unique identifier for a component type within the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// Returns the [`ComponentTypeId`] of `T` from the global registry,
    /// assigning one if `T` has never been identified before.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Registry::global().identify::<T>()
    }

    /// Returns the [`ComponentTypeId`] of the value's type.
    ///
    /// Handy when the type is only spelled through a reference or a `Box`:
    /// identity is always computed on the pointee.
    #[must_use]
    pub fn of_val<T: Component>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentTypeId({})", self.0)
    }
}

/// Metadata about an identified component type.
///
/// Recorded by the [`Registry`] alongside every assigned identifier, mostly
/// for diagnostics and for code that handles components without knowing their
/// static type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentMeta {
    /// The unique type identifier.
    pub type_id: ComponentTypeId,
    /// The human-readable name of the component (e.g. `"Position"`).
    pub name: &'static str,
    /// Size of one component instance in bytes.
    pub size: usize,
    /// Alignment of one component instance in bytes.
    pub align: usize,
}

impl ComponentMeta {
    /// Describe `T` under an already-assigned identifier.
    #[must_use]
    pub fn new<T: Component>(type_id: ComponentTypeId) -> Self {
        Self::named::<T>(type_id, T::type_name())
    }

    pub(crate) fn named<T: Component>(type_id: ComponentTypeId, name: &'static str) -> Self {
        Self {
            type_id,
            name,
            size: std::mem::size_of::<T>(),
            align: std::mem::align_of::<T>(),
        }
    }

    /// The memory layout of one component instance.
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        Layout::from_size_align(self.size, self.align).ok()
    }
}

/// The core component trait.
///
/// All data bundled into a group must implement this trait. The defaults are
/// enough for almost every type, so an empty impl (or [`impl_component!`])
/// is the usual way to opt in.
///
/// # Examples
///
/// ```rust
/// use engine_component::{Component, ComponentTypeId};
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
///
/// assert_eq!(Health::component_type_id(), ComponentTypeId::of::<Health>());
/// ```
///
/// [`impl_component!`]: crate::impl_component
pub trait Component: Sized + Send + Sync + 'static {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::of::<Self>()
    }

    /// Returns the [`ComponentMeta`] descriptor for this component type.
    fn meta() -> ComponentMeta {
        ComponentMeta::new::<Self>(Self::component_type_id())
    }
}

/// Implements [`Component`] with the default methods for each listed type.
///
/// ```rust
/// #[derive(Debug, Clone, Copy)]
/// struct Position { x: i32, y: i32 }
/// #[derive(Debug, Clone, Copy)]
/// struct Velocity { dx: i32, dy: i32 }
///
/// engine_component::impl_component!(Position, Velocity);
/// ```
#[macro_export]
macro_rules! impl_component {
    ($($ty:ty),+ $(,)?) => {
        $( impl $crate::Component for $ty {} )+
    };
}

impl_component!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, String
);
