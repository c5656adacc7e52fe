use alloc::borrow::Cow;
use alloc::boxed::Box;

use crate::caster::{Cast, Caster, CasterRegistry};
use crate::engine::MappingEngine;
use crate::naming::{KeyFormatter, SnakeCase};
use crate::value::Value;

// -----------------------------------------------------------------------------
// EngineBuilder

/// Configures a [`MappingEngine`].
///
/// Casters registered later replace earlier ones for the same key,
/// including built-ins and statically submitted casters.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use vc_mapper::caster::DateTimeCaster;
/// use vc_mapper::{MappingEngine, Verbatim};
///
/// let engine = MappingEngine::builder()
///     .key_formatter(Verbatim)
///     .caster::<NaiveDate>(DateTimeCaster::<NaiveDate>::with_format("%d/%m/%Y"))
///     .named_caster("year", DateTimeCaster::<NaiveDate>::with_format("%Y"))
///     .build();
///
/// assert!(engine.casters().contains_name("year"));
/// ```
pub struct EngineBuilder {
    casters: CasterRegistry,
    key_formatter: Box<dyn KeyFormatter>,
}

impl Default for EngineBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Starts from the built-in casters and [`SnakeCase`] keys.
    pub fn new() -> Self {
        Self::with_registry(CasterRegistry::new())
    }

    /// Starts from an existing registry.
    pub fn with_registry(casters: CasterRegistry) -> Self {
        Self {
            casters,
            key_formatter: Box::new(SnakeCase),
        }
    }

    /// Formats the keys of members without an explicit key.
    pub fn key_formatter(mut self, formatter: impl KeyFormatter) -> Self {
        self.key_formatter = Box::new(formatter);
        self
    }

    /// Associates `caster` with the type `T`.
    pub fn caster<T: Value>(mut self, caster: impl Caster) -> Self {
        self.casters.register_type::<T>(caster);
        self
    }

    /// Associates the [`Cast`] implementation of `T` with `T`.
    pub fn cast<T: Cast>(mut self) -> Self {
        self.casters.register_cast::<T>();
        self
    }

    /// Registers a caster members can reference by name.
    pub fn named_caster(mut self, name: impl Into<Cow<'static, str>>, caster: impl Caster) -> Self {
        self.casters.register_named(name, caster);
        self
    }

    /// Adds the casters declared through [`submit_caster!`](crate::submit_caster).
    ///
    /// Does nothing without the `auto_register` feature.
    pub fn auto_register(mut self) -> Self {
        self.casters.auto_register();
        self
    }

    #[inline]
    pub fn casters_mut(&mut self) -> &mut CasterRegistry {
        &mut self.casters
    }

    pub fn build(self) -> MappingEngine {
        MappingEngine::from_parts(self.casters, self.key_formatter)
    }
}
