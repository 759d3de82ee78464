//! Handle-based resource pools.
//!
//! A [`Pool`] owns its values in a dense slot array and hands out small
//! integer handles. Freed slots go on a free list and are reused by later
//! allocations. Handles carry no generation, so the caller must not use a
//! handle after freeing it.

use std::fmt;
use std::marker::PhantomData;

/// A typed pool handle.
pub trait PoolId: Copy + Eq + fmt::Debug {
    /// Human-readable resource name used in log and error messages.
    const KIND: &'static str;

    fn from_index(index: u32) -> Self;
    fn index(self) -> u32;
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl PoolId for $name {
            const KIND: &'static str = $kind;

            #[inline]
            fn from_index(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Handle to a vertex position buffer.
    VertexBufferId,
    "vertex buffer"
);
define_id!(
    /// Handle to a per-vertex attribute buffer.
    AttributeBufferId,
    "attribute buffer"
);
define_id!(
    /// Handle to a triangle index buffer.
    IndexBufferId,
    "index buffer"
);
define_id!(
    /// Handle to an 8-bit or palette object texture.
    ObjectTextureId,
    "object texture"
);
define_id!(
    /// Handle to an object material.
    ObjectMaterialId,
    "object material"
);

/// Upper bound on simultaneously allocated slots per pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    pub max_slots: usize,
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            max_slots: u32::MAX as usize,
        }
    }
}

/// Dense slot array with a free list.
pub struct Pool<I: PoolId, T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
    max_slots: usize,
    _id: PhantomData<I>,
}

impl<I: PoolId, T> Pool<I, T> {
    pub fn new(limits: PoolLimits) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            max_slots: limits.max_slots,
            _id: PhantomData,
        }
    }

    /// Stores `value` in a free slot, returning `None` when the pool is full.
    pub fn try_alloc(&mut self, value: T) -> Option<I> {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(value);
            return Some(I::from_index(index));
        }

        if self.slots.len() >= self.max_slots {
            return None;
        }

        let index = u32::try_from(self.slots.len()).ok()?;
        self.slots.push(Some(value));
        Some(I::from_index(index))
    }

    #[inline]
    pub fn get(&self, id: I) -> Option<&T> {
        self.slots.get(id.index() as usize)?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.index() as usize)?.as_mut()
    }

    /// Releases the slot, returning its value. Unknown handles return `None`.
    pub fn free(&mut self, id: I) -> Option<T> {
        let value = self.slots.get_mut(id.index() as usize)?.take()?;
        self.free.push(id.index());
        Some(value)
    }

    /// Drops every value and forgets all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<I: PoolId, T> Default for Pool<I, T> {
    fn default() -> Self {
        Self::new(PoolLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_dense_indices() {
        let mut pool: Pool<ObjectTextureId, &str> = Pool::default();
        assert_eq!(pool.try_alloc("a"), Some(ObjectTextureId(0)));
        assert_eq!(pool.try_alloc("b"), Some(ObjectTextureId(1)));
        assert_eq!(pool.get(ObjectTextureId(1)), Some(&"b"));
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut pool: Pool<ObjectMaterialId, u8> = Pool::default();
        let a = pool.try_alloc(1).unwrap();
        let _b = pool.try_alloc(2).unwrap();
        assert_eq!(pool.free(a), Some(1));
        assert_eq!(pool.get(a), None);

        let c = pool.try_alloc(3).unwrap();
        assert_eq!(c, a);
        assert_eq!(pool.get(c), Some(&3));
    }

    #[test]
    fn exhausted_pool_rejects_allocation() {
        let mut pool: Pool<IndexBufferId, u8> = Pool::new(PoolLimits { max_slots: 1 });
        let id = pool.try_alloc(0).unwrap();
        assert_eq!(pool.try_alloc(1), None);

        pool.free(id);
        assert!(pool.try_alloc(2).is_some());
    }

    #[test]
    fn double_free_is_ignored() {
        let mut pool: Pool<VertexBufferId, u8> = Pool::default();
        let id = pool.try_alloc(7).unwrap();
        assert_eq!(pool.free(id), Some(7));
        assert_eq!(pool.free(id), None);
        assert_eq!(pool.free(VertexBufferId(99)), None);
        assert_eq!(pool.get(id), None);
    }
}
