//! # Slot Pool
//!
//! Fixed-capacity slot storage with generational handles.

/// A pool of slots addressed by generational handles.
///
/// Objects can be inserted and freed individually in O(1). Every free bumps
/// the slot's generation, so handles kept past the free no longer resolve.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. The picker runs on the single firmware thread.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: Pool<SceneObject> = Pool::new(64);
///
/// let handle = pool.insert(object).ok_or(PickerError::OutOfMemory)?;
/// let object = pool.remove(handle);
/// assert!(pool.get(handle).is_none());
/// ```
pub struct Pool<T> {
    /// The storage array.
    slots: Box<[Slot<T>]>,
    /// Free list - indices of available slots.
    free_list: Vec<u32>,
    /// Number of live objects.
    len: usize,
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Handle to a live object in a [`Pool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    /// Index into the pool.
    index: u32,
    /// Generation of the slot when the handle was issued.
    generation: u32,
}

impl Handle {
    /// Slot index of this handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation this handle was issued for.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl<T> Pool<T> {
    /// Creates a new pool with the specified capacity.
    ///
    /// All slots are reserved upfront.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero, exceeds `u32::MAX`, or cannot be allocated.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Some(pool) => pool,
            None => panic!("Cannot reserve a pool of {capacity} slots"),
        }
    }

    /// Creates a new pool with the specified capacity, or `None` if the
    /// capacity is zero, exceeds `u32::MAX`, or the slots cannot be
    /// allocated.
    #[must_use]
    pub fn try_new(capacity: usize) -> Option<Self> {
        if capacity == 0 {
            return None;
        }
        let top = u32::try_from(capacity).ok()?;

        let mut slots: Vec<Slot<T>> = Vec::new();
        slots.try_reserve_exact(capacity).ok()?;
        slots.extend((0..capacity).map(|_| Slot {
            generation: 0,
            value: None,
        }));

        // Pop from the back so low indices are handed out first.
        let mut free_list: Vec<u32> = Vec::new();
        free_list.try_reserve_exact(capacity).ok()?;
        free_list.extend((0..top).rev());

        Some(Self {
            slots: slots.into_boxed_slice(),
            free_list,
            len: 0,
        })
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live objects.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no objects are live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` in a free slot.
    ///
    /// Returns `None` if every slot is taken.
    pub fn insert(&mut self, value: T) -> Option<Handle> {
        let index = self.free_list.pop()?;
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.len += 1;

        Some(Handle {
            index,
            generation: slot.generation,
        })
    }

    /// Frees the object behind `handle` and returns it.
    ///
    /// Returns `None` if the handle is stale or out of range.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        self.len -= 1;

        Some(value)
    }

    /// Returns true if `handle` refers to a live object.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Gets a reference to a live object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Gets a mutable reference to a live object.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Iterates over all live objects.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().zip(0u32..).filter_map(|(slot, index)| {
            slot.value.as_ref().map(|value| {
                (
                    Handle {
                        index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }
}
