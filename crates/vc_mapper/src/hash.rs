//! Hash containers used by the registry and the plan cache.
//!
//! Both hash through a fixed `foldhash` seed, so lookups never depend on a
//! random source.

use core::any::TypeId;

use foldhash::fast::FixedState;
use hashbrown::hash_map::Entry;

pub(crate) const FIXED_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// A [`hashbrown::HashMap`] hashing through [`FIXED_STATE`].
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`], with the operations the registry and the plan
/// cache need.
pub(crate) struct TypeIdMap<V>(HashMap<TypeId, V>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(FIXED_STATE))
    }

    /// Returns the value of `type_id`, inserting the result of `f` first if
    /// the key is absent.
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Inserts a value, returning the one it replaced.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Tests
