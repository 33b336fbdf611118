//! Read-only component groups.

use std::fmt;
use std::marker::PhantomData;

use engine_component::{Component, ComponentTypeId};

use crate::erased::ErasedGroup;
use crate::list::{ComponentList, Contains, ExtractList, Nth};
use crate::slot::Slot;

/// A read-only group of borrowed components.
///
/// The shared counterpart of [`ComponentGroup`](crate::ComponentGroup). A view
/// is `Copy`: passing it along copies its address array and nothing else, and
/// every reference it hands out lives for the full borrow `'a`.
pub struct GroupView<'a, L: ComponentList> {
    slots: L::Slots,
    _marker: PhantomData<&'a L>,
}

// SAFETY: A view behaves like a tuple of `&'a T` over `Send + Sync` components.
unsafe impl<L: ComponentList> Send for GroupView<'_, L> {}
// SAFETY: As above.
unsafe impl<L: ComponentList> Sync for GroupView<'_, L> {}

impl<L: ComponentList> Clone for GroupView<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: ComponentList> Copy for GroupView<'_, L> {}

impl<'a, L: ComponentList> GroupView<'a, L> {
    /// The number of components in the group.
    pub const SIZE: usize = L::SIZE;

    /// Build a view over shared references, one per component of `L`.
    #[must_use]
    pub fn new(views: L::Views<'a>) -> Self {
        Self {
            slots: L::view_slots(views),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Slot `i` must address a live value of the `i`-th component of `L`,
    /// readable and not mutably aliased for `'a`.
    pub(crate) unsafe fn from_slots(slots: L::Slots) -> Self {
        Self {
            slots,
            _marker: PhantomData,
        }
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
    #[must_use]
    pub fn get<T: Component, I>(&self) -> &'a T
    where
        L: Contains<T, I>,
    {
        let slot = self.slots.as_ref()[<L as Contains<T, I>>::INDEX];
        // SAFETY: `Contains` guarantees position `INDEX` holds a `T`, and the
        // view's construction guarantees it is readable for `'a`.
        unsafe { slot.as_ref::<T>() }
    }

    /// Returns the component at position `N`.
    #[must_use]
    pub fn at<const N: usize>(&self) -> &'a <L as Nth<N>>::Type
    where
        L: Nth<N>,
    {
        let slot = self.slots.as_ref()[N];
        // SAFETY: `Nth` guarantees position `N` holds a `Type`.
        unsafe { slot.as_ref::<<L as Nth<N>>::Type>() }
    }

    /// Destructure the view into a tuple of shared references.
    ///
    /// `let (pos, vel) = view.parts();` is equivalent to binding
    /// `view.at::<0>()` and `view.at::<1>()`.
    #[must_use]
    pub fn parts(&self) -> L::Views<'a> {
        // SAFETY: Every slot is readable for `'a`.
        unsafe { L::views(self.slots) }
    }

    /// Copy every component into the existing instances in `dest`.
    ///
    /// Assigns position by position with `Clone::clone_from`. A panic in one
    /// position leaves earlier positions written.
    pub fn extract_into(&self, dest: L::Refs<'_>)
    where
        L: ExtractList,
    {
        L::extract(self.parts(), dest);
    }

    /// A runtime-checked view for code that does not know `L`.
    #[must_use]
    pub fn erase(&self) -> ErasedGroup<'_> {
        // SAFETY: `L::ids()` lists the types of the slots in order, and every
        // slot is readable for `'a`, which outlives the borrow of `self`.
        unsafe { ErasedGroup::new(L::ids(), self.slots.as_ref()) }
    }
}

impl<L: ComponentList> fmt::Debug for GroupView<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupView")
            .field("components", &L::names())
            .field("slots", &self.slots)
            .finish()
    }
}
