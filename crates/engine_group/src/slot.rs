//! Type-erased component addresses.
//!
//! A [`Slot`] is one entry of a group's address array. It remembers where a
//! component lives but not what type it is; the type is recovered from the
//! group's static component list, never from the slot itself.

use std::fmt;
use std::ptr::NonNull;

use engine_component::Component;

/// The erased address of one grouped component.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Slot(NonNull<()>);

impl Slot {
    /// Capture the address of a mutably borrowed value.
    #[must_use]
    pub fn from_mut<T>(value: &mut T) -> Self {
        Self(NonNull::from(value).cast())
    }

    /// Capture the address of a shared value.
    ///
    /// The resulting slot must only ever be read through.
    #[must_use]
    pub fn from_ref<T>(value: &T) -> Self {
        Self(NonNull::from(value).cast())
    }

    /// Capture a raw pointer, or `None` if it is null.
    #[must_use]
    pub fn from_ptr<T>(ptr: *mut T) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self(ptr.cast()))
    }

    /// Returns the stored address.
    #[must_use]
    pub fn as_ptr(self) -> *mut () {
        self.0.as_ptr()
    }

    /// Reinterpret the slot as a shared reference to `T`.
    ///
    /// # Safety
    ///
    /// The slot must hold the address of a live, initialised `T` that is not
    /// mutably aliased for the whole of `'a`.
    #[must_use]
    pub unsafe fn as_ref<'a, T>(self) -> &'a T {
        // SAFETY: Upheld by the caller.
        unsafe { self.0.cast::<T>().as_ref() }
    }

    /// Reinterpret the slot as a mutable reference to `T`.
    ///
    /// # Safety
    ///
    /// The slot must hold the address of a live, initialised `T`, captured
    /// with write permission, that no other reference aliases for the whole
    /// of `'a`.
    #[must_use]
    pub unsafe fn as_mut<'a, T>(self) -> &'a mut T {
        // SAFETY: Upheld by the caller.
        unsafe { self.0.cast::<T>().as_mut() }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({:p})", self.0)
    }
}

/// A source a group slot can be captured from.
///
/// `&mut T` stores the address of `T` itself. `&mut Box<T>` stores the address
/// of the boxed `T`, not of the box.
///
/// # Safety
///
/// `into_slot` must return the address of a live `T` that stays valid and
/// exclusively borrowed for `'a`.
pub unsafe trait IntoSlot<'a, T: Component> {
    /// Capture the component's address.
    fn into_slot(self) -> Slot;
}

// SAFETY: The exclusive borrow lives for `'a`.
unsafe impl<'a, T: Component> IntoSlot<'a, T> for &'a mut T {
    fn into_slot(self) -> Slot {
        Slot::from_mut(self)
    }
}

// SAFETY: Borrowing the box exclusively for `'a` borrows its pointee too.
unsafe impl<'a, T: Component> IntoSlot<'a, T> for &'a mut Box<T> {
    fn into_slot(self) -> Slot {
        Slot::from_mut(&mut **self)
    }
}
