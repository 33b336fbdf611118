//! Component lists: the static half of a group.
//!
//! A component list is a tuple of component types such as
//! `(Position, Velocity)`. Everything a group knows about its components is
//! derived from the list at compile time: the arity, the slot array type,
//! which position each type lives at ([`Contains`]), and which type lives at
//! each position ([`Nth`]). Nothing of this is stored per group value.
//!
//! The traits are implemented for tuples of 1 to 12 components.
//!
//! ## Duplicate types
//!
//! Lists are expected to hold distinct types. A list that repeats a type still
//! works positionally, but looking that type up by type is ambiguous and
//! rejected at compile time. The first request for such a list's ids logs a
//! warning.

use engine_component::{Component, ComponentTypeId, Registry, Signature};
use tracing::warn;

use crate::error::GroupError;
use crate::slot::{IntoSlot, Slot};

/// A compile-time position marker used to resolve [`Contains`].
///
/// Callers never name it; it is inferred, which is why typed lookups are
/// written `group.get::<Position, _>()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Index<const N: usize>;

/// An ordered, fixed-arity list of component types.
///
/// # Safety
///
/// `Slots`, `Refs`, `Views`, and `Ptrs` must all list the components in the
/// same declaration order, one entry per component, and `refs`/`views` must
/// cast slot `i` to the type declared at position `i`.
pub unsafe trait ComponentList: Sized + 'static {
    /// The number of components in the list.
    const SIZE: usize;

    /// The erased address array, `[Slot; SIZE]`.
    type Slots: Copy + AsRef<[Slot]> + std::fmt::Debug;

    /// A tuple of mutable references, one per component.
    type Refs<'a>;

    /// A tuple of shared references, one per component.
    type Views<'a>;

    /// A tuple of raw pointers, one per component.
    type Ptrs;

    /// Identify every component type in declaration order, using `registry`.
    fn type_ids_in(registry: &Registry) -> Vec<ComponentTypeId>;

    /// The names of the component types in declaration order.
    fn names() -> Vec<&'static str>;

    /// The cached id array of this list in `registry`.
    fn ids_in(registry: &Registry) -> &[ComponentTypeId] {
        registry.list_ids::<Self>(|registry| {
            let ids = Self::type_ids_in(registry);
            if has_duplicates(&ids) {
                warn!(
                    components = ?Self::names(),
                    "component list declares a type more than once; typed lookup is unavailable"
                );
            }
            ids
        })
    }

    /// The process-wide id array of this list.
    ///
    /// Computed on first request and shared by every group over this list.
    fn ids() -> &'static [ComponentTypeId] {
        Self::ids_in(Registry::global())
    }

    /// Returns `true` if an entity with `signature` carries every component
    /// in this list.
    fn matched_by(signature: &Signature) -> bool {
        signature.is_superset_of(Self::ids())
    }

    /// Capture the addresses of shared references.
    fn view_slots(views: Self::Views<'_>) -> Self::Slots;

    /// Capture raw pointers, rejecting null ones.
    fn ptr_slots(ptrs: Self::Ptrs) -> Result<Self::Slots, GroupError>;

    /// Recover typed mutable references from `slots`.
    ///
    /// # Safety
    ///
    /// Slot `i` must hold a writable address of a live value of the `i`-th
    /// component type, unaliased for `'a`.
    unsafe fn refs<'a>(slots: Self::Slots) -> Self::Refs<'a>;

    /// Recover typed shared references from `slots`.
    ///
    /// # Safety
    ///
    /// Slot `i` must hold the address of a live value of the `i`-th component
    /// type, not mutably aliased for `'a`.
    unsafe fn views<'a>(slots: Self::Slots) -> Self::Views<'a>;
}

/// Maps component type `T` to its position in the list.
///
/// `I` is an [`Index`] marker picked by inference. If `T` is not in the list
/// there is no impl and the lookup fails to compile.
///
/// # Safety
///
/// The type declared at position `INDEX` must be `T`.
pub unsafe trait Contains<T: Component, I>: ComponentList {
    /// Position of `T` in the list.
    const INDEX: usize;
}

/// Maps position `N` to the component type declared there.
///
/// Only implemented for `N < SIZE`.
///
/// # Safety
///
/// `Type` must be the type declared at position `N`.
pub unsafe trait Nth<const N: usize>: ComponentList {
    /// The component type at position `N`.
    type Type: Component;
}

/// Copy every component of a list out into existing instances.
pub trait ExtractList: ComponentList {
    /// Assign each value in `source` to the matching place in `dest`, in
    /// declaration order, using `Clone::clone_from`.
    ///
    /// Not atomic: if one assignment panics, earlier positions stay written.
    fn extract(source: Self::Views<'_>, dest: Self::Refs<'_>);
}

/// A tuple of [`IntoSlot`] sources, one per component of `L`.
///
/// # Safety
///
/// `into_slots` must return, at position `i`, the address of a live value of
/// the `i`-th component type of `L`, exclusively borrowed for `'a`.
pub unsafe trait IntoSlots<'a, L: ComponentList> {
    /// Capture every address in declaration order.
    fn into_slots(self) -> L::Slots;
}

fn has_duplicates(ids: &[ComponentTypeId]) -> bool {
    ids.iter()
        .enumerate()
        .any(|(i, id)| ids[..i].contains(id))
}

macro_rules! impl_position {
    ([$($all:ident),+]; $idx:tt => $ty:ident) => {
        // SAFETY: `$ty` is declared at position `$idx` of the tuple.
        unsafe impl<$($all: Component),+> Contains<$ty, Index<$idx>> for ($($all,)+) {
            const INDEX: usize = $idx;
        }

        // SAFETY: `$ty` is declared at position `$idx` of the tuple.
        unsafe impl<$($all: Component),+> Nth<$idx> for ($($all,)+) {
            type Type = $ty;
        }
    };
}

macro_rules! impl_component_list {
    ($size:literal; $all:tt; $($idx:tt => $ty:ident $src:ident),+) => {
        // SAFETY: every associated item lists the tuple's elements in order.
        unsafe impl<$($ty: Component),+> ComponentList for ($($ty,)+) {
            const SIZE: usize = $size;

            type Slots = [Slot; $size];
            type Refs<'a> = ($(&'a mut $ty,)+);
            type Views<'a> = ($(&'a $ty,)+);
            type Ptrs = ($(*mut $ty,)+);

            fn type_ids_in(registry: &Registry) -> Vec<ComponentTypeId> {
                vec![$(registry.identify::<$ty>()),+]
            }

            fn names() -> Vec<&'static str> {
                vec![$($ty::type_name()),+]
            }

            fn view_slots(views: Self::Views<'_>) -> Self::Slots {
                [$(Slot::from_ref(views.$idx)),+]
            }

            fn ptr_slots(ptrs: Self::Ptrs) -> Result<Self::Slots, GroupError> {
                Ok([$(
                    Slot::from_ptr(ptrs.$idx).ok_or(GroupError::NullPointer {
                        position: $idx,
                        name: $ty::type_name(),
                    })?
                ),+])
            }

            unsafe fn refs<'a>(slots: Self::Slots) -> Self::Refs<'a> {
                // SAFETY: Upheld by the caller.
                unsafe { ($(slots[$idx].as_mut::<$ty>(),)+) }
            }

            unsafe fn views<'a>(slots: Self::Slots) -> Self::Views<'a> {
                // SAFETY: Upheld by the caller.
                unsafe { ($(slots[$idx].as_ref::<$ty>(),)+) }
            }
        }

        impl<$($ty: Component + Clone),+> ExtractList for ($($ty,)+) {
            fn extract(source: Self::Views<'_>, dest: Self::Refs<'_>) {
                $( Clone::clone_from(dest.$idx, source.$idx); )+
            }
        }

        // SAFETY: each element is an `IntoSlot` for the component at its position.
        unsafe impl<'a, $($ty: Component, $src: IntoSlot<'a, $ty>),+> IntoSlots<'a, ($($ty,)+)>
            for ($($src,)+)
        {
            fn into_slots(self) -> [Slot; $size] {
                [$(self.$idx.into_slot()),+]
            }
        }

        $( impl_position!($all; $idx => $ty); )+
    };
}

impl_component_list!(1; [A]; 0 => A SA);
impl_component_list!(2; [A, B]; 0 => A SA, 1 => B SB);
impl_component_list!(3; [A, B, C]; 0 => A SA, 1 => B SB, 2 => C SC);
impl_component_list!(4; [A, B, C, D]; 0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD);
impl_component_list!(5; [A, B, C, D, E];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE);
impl_component_list!(6; [A, B, C, D, E, F];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE, 5 => F SF);
impl_component_list!(7; [A, B, C, D, E, F, G];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE, 5 => F SF, 6 => G SG);
impl_component_list!(8; [A, B, C, D, E, F, G, H];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE, 5 => F SF, 6 => G SG, 7 => H SH);
impl_component_list!(9; [A, B, C, D, E, F, G, H, I];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE, 5 => F SF, 6 => G SG, 7 => H SH,
    8 => I SI);
impl_component_list!(10; [A, B, C, D, E, F, G, H, I, J];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE, 5 => F SF, 6 => G SG, 7 => H SH,
    8 => I SI, 9 => J SJ);
impl_component_list!(11; [A, B, C, D, E, F, G, H, I, J, K];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE, 5 => F SF, 6 => G SG, 7 => H SH,
    8 => I SI, 9 => J SJ, 10 => K SK);
impl_component_list!(12; [A, B, C, D, E, F, G, H, I, J, K, L];
    0 => A SA, 1 => B SB, 2 => C SC, 3 => D SD, 4 => E SE, 5 => F SF, 6 => G SG, 7 => H SH,
    8 => I SI, 9 => J SJ, 10 => K SK, 11 => L SL);

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use engine_component::impl_component;

    use super::*;

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
    struct Mass(f32);

    impl_component!(Position, Velocity, Mass);

    type Body = (Position, Velocity, Mass);

    fn same_type<T: 'static, U: 'static>() -> bool {
        TypeId::of::<T>() == TypeId::of::<U>()
    }

    fn index_of<L: Contains<T, I>, T: Component, I>() -> usize {
        L::INDEX
    }

    #[test]
    fn test_size() {
        assert_eq!(<(Position,)>::SIZE, 1);
        assert_eq!(Body::SIZE, 3);
        assert_eq!(<(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, bool, char)>::SIZE, 12);
    }

    #[test]
    fn test_nth_yields_declared_types() {
        assert!(same_type::<<Body as Nth<0>>::Type, Position>());
        assert!(same_type::<<Body as Nth<1>>::Type, Velocity>());
        assert!(same_type::<<Body as Nth<2>>::Type, Mass>());
    }

    #[test]
    fn test_contains_resolves_positions() {
        assert_eq!(index_of::<Body, Position, _>(), 0);
        assert_eq!(index_of::<Body, Velocity, _>(), 1);
        assert_eq!(index_of::<Body, Mass, _>(), 2);
        assert_eq!(index_of::<(Mass, Position), Position, _>(), 1);
    }

    #[test]
    fn test_ids_follow_declaration_order() {
        let registry = Registry::default();
        let ids = Body::ids_in(&registry);
        assert_eq!(
            ids,
            &[
                registry.identify::<Position>(),
                registry.identify::<Velocity>(),
                registry.identify::<Mass>(),
            ]
        );
    }

    #[test]
    fn test_ids_shared_per_list() {
        assert!(std::ptr::eq(Body::ids(), Body::ids()));
        assert_eq!(Body::ids()[1], ComponentTypeId::of::<Velocity>());
    }

    #[test]
    fn test_duplicate_types_keep_positional_ids() {
        let registry = Registry::default();
        let ids = <(Mass, Mass)>::ids_in(&registry);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], ids[1]);
        assert!(has_duplicates(ids));
    }

    #[test]
    fn test_names() {
        let names = <(Position, Velocity)>::names();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("Position"));
        assert!(names[1].ends_with("Velocity"));
    }

    #[test]
    fn test_matched_by_signature() {
        let full = Signature::new().with::<Position>().with::<Velocity>().with::<Mass>();
        let partial = Signature::new().with::<Position>();

        assert!(Body::matched_by(&full));
        assert!(!Body::matched_by(&partial));
        assert!(<(Position,)>::matched_by(&partial));
    }

    #[test]
    fn test_ptr_slots_reports_null_position() {
        let mut pos = Position { x: 0, y: 0 };
        let ptrs = (&mut pos as *mut Position, std::ptr::null_mut::<Velocity>());
        let err = <(Position, Velocity)>::ptr_slots(ptrs).unwrap_err();
        match err {
            GroupError::NullPointer { position, name } => {
                assert_eq!(position, 1);
                assert!(name.ends_with("Velocity"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_overwrites_destination() {
        let pos = Position { x: 10, y: 4 };
        let vel = Velocity { dx: 1, dy: 0 };
        let mut out_pos = Position { x: 0, y: 0 };
        let mut out_vel = Velocity { dx: -5, dy: -5 };

        <(Position, Velocity)>::extract((&pos, &vel), (&mut out_pos, &mut out_vel));

        assert_eq!(out_pos, pos);
        assert_eq!(out_vel, vel);
    }
}
