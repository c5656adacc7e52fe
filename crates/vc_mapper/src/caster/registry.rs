use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::caster::{Cast, Caster, CasterKey, DateTimeCaster, TypedCaster};
use crate::error::CasterNotFound;
use crate::hash::{FIXED_STATE, HashMap, TypeIdMap};
use crate::value::Value;

// -----------------------------------------------------------------------------
// CasterRegistry

/// Casters keyed by type or by name.
///
/// The registry is filled while configuring an engine and is immutable once
/// the engine is built.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use vc_mapper::caster::{CasterRegistry, DateTimeCaster};
/// use vc_mapper::CasterKey;
///
/// let mut registry = CasterRegistry::new();
/// assert!(registry.resolve(&CasterKey::of::<DateTime<Utc>>()).is_ok());
/// assert!(registry.resolve(&CasterKey::named("birthday")).is_err());
///
/// registry.register_named("birthday", DateTimeCaster::<DateTime<Utc>>::with_format("%d-%m-%Y"));
/// assert!(registry.resolve(&CasterKey::named("birthday")).is_ok());
/// ```
pub struct CasterRegistry {
    by_type: TypeIdMap<Arc<dyn Caster>>,
    by_name: HashMap<Cow<'static, str>, Arc<dyn Caster>>,
    #[cfg(feature = "auto_register")]
    auto_registered: bool,
}

impl Default for CasterRegistry {
    /// See [`CasterRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl CasterRegistry {
    /// Creates a registry without any caster.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            by_type: TypeIdMap::new(),
            by_name: HashMap::with_hasher(FIXED_STATE),
            #[cfg(feature = "auto_register")]
            auto_registered: false,
        }
    }

    /// Creates a registry with the built-in casters.
    ///
    /// - `bool` `char` `String` `f32` `f64`
    /// - `i8` `i16` `i32` `i64` `isize`
    /// - `u8` `u16` `u32` `u64` `usize`
    /// - `DateTime<Utc>` `DateTime<FixedOffset>` `NaiveDateTime` `NaiveDate`,
    ///   with their default formats
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_cast::<bool>();
        registry.register_cast::<char>();
        registry.register_cast::<String>();
        registry.register_cast::<f32>();
        registry.register_cast::<f64>();
        registry.register_cast::<i8>();
        registry.register_cast::<i16>();
        registry.register_cast::<i32>();
        registry.register_cast::<i64>();
        registry.register_cast::<isize>();
        registry.register_cast::<u8>();
        registry.register_cast::<u16>();
        registry.register_cast::<u32>();
        registry.register_cast::<u64>();
        registry.register_cast::<usize>();
        registry.register_type::<DateTime<Utc>>(DateTimeCaster::<DateTime<Utc>>::new());
        registry.register_type::<DateTime<FixedOffset>>(DateTimeCaster::<DateTime<FixedOffset>>::new());
        registry.register_type::<NaiveDateTime>(DateTimeCaster::<NaiveDateTime>::new());
        registry.register_type::<NaiveDate>(DateTimeCaster::<NaiveDate>::new());
        registry
    }

    /// Registers `caster` under `key`, returning the caster it replaced.
    pub fn register(
        &mut self,
        key: CasterKey,
        caster: Arc<dyn Caster>,
    ) -> Option<Arc<dyn Caster>> {
        let replaced = match &key {
            CasterKey::Type { id, .. } => self.by_type.insert(*id, caster),
            CasterKey::Name(name) => self.by_name.insert(name.clone(), caster),
        };
        if replaced.is_some() {
            log::warn!("caster for {key} was replaced");
        }
        replaced
    }

    /// Associates `caster` with the type `T`.
    #[inline]
    pub fn register_type<T: Value>(&mut self, caster: impl Caster) {
        self.register(CasterKey::of::<T>(), Arc::new(caster));
    }

    /// Registers `caster` under a name that members can reference.
    #[inline]
    pub fn register_named(&mut self, name: impl Into<Cow<'static, str>>, caster: impl Caster) {
        self.register(CasterKey::named(name), Arc::new(caster));
    }

    /// Associates the [`Cast`] implementation of `T` with `T`.
    #[inline]
    pub fn register_cast<T: Cast>(&mut self) {
        self.register_type::<T>(TypedCaster::<T>::new());
    }

    /// Returns the caster registered under `key`.
    pub fn resolve(&self, key: &CasterKey) -> Result<Arc<dyn Caster>, CasterNotFound> {
        let caster = match key {
            CasterKey::Type { id, .. } => self.by_type.get(id),
            CasterKey::Name(name) => self.by_name.get(name),
        };
        caster.cloned().ok_or_else(|| CasterNotFound(key.clone()))
    }

    /// Returns the caster associated with a type.
    #[inline]
    pub fn get_type(&self, type_id: TypeId) -> Option<&Arc<dyn Caster>> {
        self.by_type.get(&type_id)
    }

    #[inline]
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.by_type.contains(&type_id)
    }

    #[inline]
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered casters, typed and named.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_type.len() + self.by_name.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty() && self.by_name.is_empty()
    }

    /// Adds every caster declared through [`submit_caster!`](crate::submit_caster).
    ///
    /// Returns `true` if static registration is available. Later calls do
    /// nothing and return `true` again.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled, it
    /// does nothing and returns `false`.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        if !self.auto_registered {
            crate::caster::auto_register::register_all(self);
            self.auto_registered = true;
        }
        true
    }

    /// Adds every caster declared through [`submit_caster!`](crate::submit_caster).
    ///
    /// The `auto_register` feature is disabled, so this does nothing and
    /// returns `false`.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// Tests
