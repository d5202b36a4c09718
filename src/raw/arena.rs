use alloc::vec::Vec;
use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a slot in an [`Arena`].
///
/// Stored off by one in a `NonZero` so that `Option<Handle>` (an absent child
/// or parent link) costs nothing extra.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((index + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Slot storage with a free list. Freed handles are recycled by later
/// allocations, so a handle is only meaningful while its element is live.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns mutable references to two distinct live elements.
    pub(crate) fn get_pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (i, j) = (a.to_index(), b.to_index());
        assert!(i != j, "`Arena::get_pair_mut()` - handles alias!");
        let (low, high) = if i < j { (i, j) } else { (j, i) };
        let (head, tail) = self.slots.split_at_mut(high);
        let first = head[low].as_mut().expect("`Arena::get_pair_mut()` - `handle` is invalid!");
        let second = tail[0].as_mut().expect("`Arena::get_pair_mut()` - `handle` is invalid!");
        if i < j { (first, second) } else { (second, first) }
    }

    /// Returns a pointer to the first slot. Iterators that hand out references
    /// to distinct elements one at a time index from it with
    /// [`slot_mut`](Self::slot_mut), so the slot buffer as a whole is never
    /// reborrowed while earlier references are alive.
    pub(crate) fn slots_mut_ptr(&mut self) -> *mut Option<T> {
        self.slots.as_mut_ptr()
    }

    /// Returns a mutable reference to the live element at `handle`, reached
    /// from a pointer returned by [`slots_mut_ptr`](Self::slots_mut_ptr).
    ///
    /// # Safety
    /// - `base` must come from `slots_mut_ptr` on an arena that is neither
    ///   resized nor otherwise accessed for `'a`.
    /// - `handle` must be in bounds for that arena.
    /// - No other live reference may point to the element at `handle`.
    #[inline]
    pub(crate) unsafe fn slot_mut<'a>(base: *mut Option<T>, handle: Handle) -> &'a mut T {
        // SAFETY: Caller guarantees the slot is in bounds and unaliased; only
        // this one slot is borrowed.
        let slot = unsafe { &mut *base.add(handle.to_index()) };
        slot.as_mut().expect("`Arena::slot_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
