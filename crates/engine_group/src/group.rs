//! Mutable component groups.
//!
//! A [`ComponentGroup`] binds a component list `L` to one address per
//! component. It is built from exclusive borrows, so while it exists nothing
//! else can touch the grouped components; through it they can be read,
//! written, destructured, or copied out.
//!
//! Holding exclusive access, a group cannot be `Copy`. Passing it down a call
//! chain moves it, and [`ComponentGroup::reborrow`] hands a callee a second
//! group over the same addresses for a shorter borrow, so the caller can keep
//! using the original afterwards. Either way only the address array is copied.

use std::fmt;
use std::marker::PhantomData;

use engine_component::{Component, ComponentTypeId};

use crate::erased::ErasedGroup;
use crate::error::GroupError;
use crate::list::{ComponentList, Contains, ExtractList, IntoSlots, Nth};
use crate::slot::Slot;
use crate::view::GroupView;

/// A non-owning group of exclusively borrowed components.
pub struct ComponentGroup<'a, L: ComponentList> {
    slots: L::Slots,
    _marker: PhantomData<&'a mut L>,
}

// SAFETY: A group behaves like a tuple of `&'a mut T` over `Send + Sync`
// components.
unsafe impl<L: ComponentList> Send for ComponentGroup<'_, L> {}
// SAFETY: As above; shared access to a group only hands out `&T`.
unsafe impl<L: ComponentList> Sync for ComponentGroup<'_, L> {}

impl<'a, L: ComponentList> ComponentGroup<'a, L> {
    /// The number of components in the group.
    pub const SIZE: usize = L::SIZE;

    /// Build a group from one source per component of `L`.
    ///
    /// A source is `&mut T`, or `&mut Box<T>` to group the boxed value.
    #[must_use]
    pub fn new<S: IntoSlots<'a, L>>(sources: S) -> Self {
        Self {
            slots: sources.into_slots(),
            _marker: PhantomData,
        }
    }

    /// Build a group from raw pointers, one per component of `L`.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::NullPointer`] if any pointer is null.
    ///
    /// # Safety
    ///
    /// Every non-null pointer must be aligned and point to a live, initialised
    /// value of the type declared at its position, and must stay valid for
    /// `'a`. While the group is used, the values must not be accessed through
    /// references other than those the group hands out.
    pub unsafe fn from_ptrs(ptrs: L::Ptrs) -> Result<Self, GroupError> {
        Ok(Self {
            slots: L::ptr_slots(ptrs)?,
            _marker: PhantomData,
        })
    }

    /// Returns the number of components in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        L::SIZE
    }

    /// Returns `true` if the group holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        L::SIZE == 0
    }

    /// The process-wide id array of the group's component list.
    #[must_use]
    pub fn ids(&self) -> &'static [ComponentTypeId] {
        L::ids()
    }

    /// The component type names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        L::names()
    }

    /// The erased address array.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        self.slots.as_ref()
    }

    /// Returns the component of type `T`.
    ///
    /// Asking for a type the list does not declare fails to compile:
    ///
    /// ```compile_fail
    /// use engine_component::impl_component;
    /// use engine_group::ComponentGroup;
    ///
    /// struct Position(i32);
    /// struct Velocity(i32);
    /// struct Mass(f32);
    /// impl_component!(Position, Velocity, Mass);
    ///
    /// let (mut pos, mut vel) = (Position(0), Velocity(0));
    /// let group = ComponentGroup::<(Position, Velocity)>::new((&mut pos, &mut vel));
    /// let _ = group.get::<Mass, _>();
    /// ```
    #[must_use]
    pub fn get<T: Component, I>(&self) -> &T
    where
        L: Contains<T, I>,
    {
        self.view().get::<T, I>()
    }

    /// Returns the component of type `T` mutably.
    #[must_use]
    pub fn get_mut<T: Component, I>(&mut self) -> &mut T
    where
        L: Contains<T, I>,
    {
        let slot = self.slots.as_ref()[<L as Contains<T, I>>::INDEX];
        // SAFETY: `Contains` guarantees position `INDEX` holds a `T`; the slot
        // was captured from an exclusive borrow and `&mut self` keeps it unique.
        unsafe { slot.as_mut::<T>() }
    }

    /// Returns the component at position `N`.
    ///
    /// A position past the end of the list fails to compile:
    ///
    /// ```compile_fail
    /// use engine_component::impl_component;
    /// use engine_group::ComponentGroup;
    ///
    /// struct Position(i32);
    /// struct Velocity(i32);
    /// impl_component!(Position, Velocity);
    ///
    /// let (mut pos, mut vel) = (Position(0), Velocity(0));
    /// let group = ComponentGroup::<(Position, Velocity)>::new((&mut pos, &mut vel));
    /// let _ = group.at::<2>();
    /// ```
    ///
    /// The same list accepts positions `0` and `1`:
    ///
    /// ```rust
    /// use engine_component::impl_component;
    /// use engine_group::ComponentGroup;
    ///
    /// struct Position(i32);
    /// struct Velocity(i32);
    /// impl_component!(Position, Velocity);
    ///
    /// let (mut pos, mut vel) = (Position(3), Velocity(1));
    /// let group = ComponentGroup::<(Position, Velocity)>::new((&mut pos, &mut vel));
    /// assert_eq!(group.at::<0>().0 + group.at::<1>().0, 4);
    /// ```
    #[must_use]
    pub fn at<const N: usize>(&self) -> &<L as Nth<N>>::Type
    where
        L: Nth<N>,
    {
        self.view().at::<N>()
    }

    /// Returns the component at position `N` mutably.
    #[must_use]
    pub fn at_mut<const N: usize>(&mut self) -> &mut <L as Nth<N>>::Type
    where
        L: Nth<N>,
    {
        let slot = self.slots.as_ref()[N];
        // SAFETY: `Nth` guarantees position `N` holds a `Type`; see `get_mut`.
        unsafe { slot.as_mut::<<L as Nth<N>>::Type>() }
    }

    /// Destructure into a tuple of shared references.
    #[must_use]
    pub fn parts(&self) -> L::Views<'_> {
        self.view().parts()
    }

    /// Destructure into a tuple of mutable references for the borrow of
    /// `self`.
    #[must_use]
    pub fn parts_mut(&mut self) -> L::Refs<'_> {
        // SAFETY: The slots hold exclusive borrows of distinct components,
        // and `&mut self` keeps the group from handing out anything else.
        unsafe { L::refs(self.slots) }
    }

    /// Consume the group into a tuple of mutable references for `'a`.
    ///
    /// `let (pos, vel) = group.into_parts();` binds each component by name,
    /// equivalent to taking `at_mut::<0>()`, `at_mut::<1>()`, and so on.
    #[must_use]
    pub fn into_parts(self) -> L::Refs<'a> {
        // SAFETY: The group is consumed, so the returned references are the
        // only access to the components for the rest of `'a`.
        unsafe { L::refs(self.slots) }
    }

    /// A second group over the same components for the borrow of `self`.
    #[must_use]
    pub fn reborrow(&mut self) -> ComponentGroup<'_, L> {
        ComponentGroup {
            slots: self.slots,
            _marker: PhantomData,
        }
    }

    /// A read-only view over the same components.
    #[must_use]
    pub fn view(&self) -> GroupView<'_, L> {
        // SAFETY: The slots are readable for as long as `self` is borrowed.
        unsafe { GroupView::from_slots(self.slots) }
    }

    /// A runtime-checked view for code that does not know `L`.
    #[must_use]
    pub fn erase(&self) -> ErasedGroup<'_> {
        // SAFETY: `L::ids()` lists the slot types in order, and the slots are
        // readable for as long as `self` is borrowed.
        unsafe { ErasedGroup::new(L::ids(), self.slots.as_ref()) }
    }

    /// Copy every component into the existing instances in `dest`.
    ///
    /// Assigns position by position with `Clone::clone_from`. A panic in one
    /// position leaves earlier positions written.
    pub fn extract_into(&self, dest: L::Refs<'_>)
    where
        L: ExtractList,
    {
        self.view().extract_into(dest);
    }
}

impl<'a, L: ComponentList> From<&'a ComponentGroup<'_, L>> for GroupView<'a, L> {
    fn from(group: &'a ComponentGroup<'_, L>) -> Self {
        group.view()
    }
}

impl<L: ComponentList> fmt::Debug for ComponentGroup<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentGroup")
            .field("components", &L::names())
            .field("slots", &self.slots)
            .finish()
    }
}
