//! # engine_group
//!
//! Bundles of references to distinct components of one logical entity.
//!
//! A [`ComponentGroup`] binds an ordered list of component types, such as
//! `(Position, Velocity)`, to the addresses of live values of those types. It
//! never owns or allocates component storage: building one captures one
//! address per component, and passing one along copies only that address
//! array. Receivers read components by type or by position, destructure the
//! group into individual bindings, or copy every value out at once.
//!
//! This crate provides:
//!
//! - [`Slot`]: the type-erased address stored per component.
//! - [`ComponentList`]: implemented for tuples of 1 to 12 components; maps
//!   types to positions ([`Contains`]) and positions to types ([`Nth`]).
//! - [`ComponentGroup`]: mutable group. [`GroupView`]: read-only, `Copy` view.
//! - [`ErasedGroup`]: runtime-checked access for code that only knows ids.
//!
//! ## Usage
//!
//! ```rust
//! use engine_component::impl_component;
//! use engine_group::ComponentGroup;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Position { x: i32, y: i32 }
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Velocity { dx: i32, dy: i32 }
//! impl_component!(Position, Velocity);
//!
//! fn step(group: ComponentGroup<'_, (Position, Velocity)>) {
//!     let (pos, vel) = group.into_parts();
//!     pos.x += vel.dx;
//!     pos.y += vel.dy;
//! }
//!
//! let mut pos = Position { x: 3, y: 4 };
//! let mut vel = Velocity { dx: 1, dy: 0 };
//!
//! let mut group = ComponentGroup::<(Position, Velocity)>::new((&mut pos, &mut vel));
//! assert_eq!(group.get::<Position, _>().x, 3);
//! step(group.reborrow());
//! assert_eq!(group.at::<0>().x, 4);
//! ```

pub mod erased;
pub mod error;
pub mod group;
pub mod list;
pub mod slot;
pub mod view;

pub use erased::ErasedGroup;
pub use error::GroupError;
pub use group::ComponentGroup;
pub use list::{ComponentList, Contains, ExtractList, Index, IntoSlots, Nth};
pub use slot::{IntoSlot, Slot};
pub use view::GroupView;
