//! The mapping engine: owns the casters, the key formatter and the cache of
//! resolved class plans.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod plan;

// -----------------------------------------------------------------------------
// Exports

pub use builder::EngineBuilder;
pub use plan::{Branch, ClassPlan, MemberPlan};

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_plain::{Plain, PlainKind, PlainMap};

use crate::caster::CasterRegistry;
use crate::de::ObjectHydrator;
use crate::descriptor::{MemberDescriptor, Object, TypeKind, TypeRef};
use crate::error::{DescriptorError, HydrateError, SerializeError};
use crate::hash::TypeIdMap;
use crate::naming::KeyFormatter;
use crate::ser::ObjectSerializer;

// -----------------------------------------------------------------------------
// MappingEngine

/// Maps objects to plain maps and back.
///
/// The engine is `Send + Sync`; every operation takes `&self` and may run
/// concurrently. Class plans are built on first use and kept for the
/// lifetime of the engine.
///
/// # Examples
///
/// ```
/// use vc_mapper::{ClassDescriptor, MappingEngine, Member, Object};
/// use vc_plain::{Plain, PlainMap};
///
/// #[derive(Debug, PartialEq)]
/// struct Account {
///     display_name: String,
///     logins: u32,
/// }
///
/// impl Object for Account {
///     fn describe() -> ClassDescriptor {
///         ClassDescriptor::builder::<Self>()
///             .member(Member::scalar::<String>("displayName").field(|a: &Self| &a.display_name))
///             .member(Member::scalar::<u32>("logins").field(|a: &Self| &a.logins))
///             .construct(|args| {
///                 Ok(Self {
///                     display_name: args.take("displayName")?,
///                     logins: args.take("logins")?,
///                 })
///             })
///     }
/// }
///
/// let engine = MappingEngine::new();
/// let account = Account { display_name: "ada".into(), logins: 3 };
///
/// let payload = engine.serialize_object(&account).unwrap();
/// assert_eq!(payload.get("display_name"), Some(&Plain::from("ada")));
/// assert_eq!(payload.get("logins"), Some(&Plain::Int(3)));
///
/// let back: Account = engine.hydrate_object(&payload).unwrap();
/// assert_eq!(back, account);
/// ```
pub struct MappingEngine {
    casters: CasterRegistry,
    key_formatter: Box<dyn KeyFormatter>,
    plans: RwLock<TypeIdMap<Arc<ClassPlan>>>,
}

impl Default for MappingEngine {
    /// See [`MappingEngine::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MappingEngine {
    /// An engine with the built-in casters, the statically submitted ones
    /// and [`SnakeCase`](crate::SnakeCase) keys.
    pub fn new() -> Self {
        EngineBuilder::new().auto_register().build()
    }

    #[inline]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(casters: CasterRegistry, key_formatter: Box<dyn KeyFormatter>) -> Self {
        Self {
            casters,
            key_formatter,
            plans: RwLock::new(TypeIdMap::new()),
        }
    }

    #[inline]
    pub fn casters(&self) -> &CasterRegistry {
        &self.casters
    }

    #[inline]
    pub fn key_formatter(&self) -> &dyn KeyFormatter {
        &*self.key_formatter
    }

    /// The serialized key of `member`: its explicit key, or its formatted name.
    #[inline]
    pub fn resolve_key(&self, member: &MemberDescriptor) -> String {
        resolve_key(&*self.key_formatter, member)
    }

    /// The plan of `T`, built on first use.
    #[inline]
    pub fn plan_of<T: Object>(&self) -> Result<Arc<ClassPlan>, DescriptorError> {
        self.plan(&TypeRef::class::<T>())
    }

    /// The plan of the class referenced by `ty`, built on first use.
    ///
    /// Plans are built outside of the cache lock; when two threads race,
    /// both get the plan that was cached first.
    pub fn plan(&self, ty: &TypeRef) -> Result<Arc<ClassPlan>, DescriptorError> {
        let TypeKind::Class(describe) = ty.kind() else {
            return Err(DescriptorError::NotAClass { ty: ty.name() });
        };

        if let Some(plan) = self.read_plans().get(&ty.id()) {
            return Ok(plan.clone());
        }

        let built = Arc::new(ClassPlan::build(
            describe(),
            &self.casters,
            &*self.key_formatter,
        )?);

        let mut inserted = false;
        let plan = self
            .write_plans()
            .get_or_insert(ty.id(), || {
                inserted = true;
                built
            })
            .clone();
        if inserted {
            log::debug!(
                "plan of `{}` cached with {} members",
                plan.type_name(),
                plan.members().len(),
            );
        }
        Ok(plan)
    }

    /// Number of cached plans.
    pub fn plan_count(&self) -> usize {
        self.read_plans().len()
    }

    /// Reads every readable member of `instance` into a plain map, in
    /// declared order.
    pub fn serialize_object<T: Object>(&self, instance: &T) -> Result<PlainMap, SerializeError> {
        ObjectSerializer::new(self).serialize(instance)
    }

    /// Serializes each instance; errors name the failing index.
    pub fn serialize_objects<T: Object>(&self, instances: &[T]) -> Result<Vec<PlainMap>, SerializeError> {
        let plan = self.plan_of::<T>()?;
        let mut serializer = ObjectSerializer::new(self);
        let mut out = Vec::with_capacity(instances.len());
        for (index, instance) in instances.iter().enumerate() {
            serializer.trail.push_index(index);
            out.push(serializer.serialize_with(&plan, instance)?);
            serializer.trail.pop();
        }
        Ok(out)
    }

    /// Builds an instance of `T` from a plain map.
    pub fn hydrate_object<T: Object>(&self, map: &PlainMap) -> Result<T, HydrateError> {
        ObjectHydrator::new(self).hydrate(map)
    }

    /// Hydrates each element of a plain list; every element must be a map.
    pub fn hydrate_objects<T: Object>(&self, items: &[Plain]) -> Result<Vec<T>, HydrateError> {
        let mut hydrator = ObjectHydrator::new(self);
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            hydrator.trail.push_index(index);
            let Plain::Map(map) = item else {
                return Err(HydrateError::UnexpectedPlain {
                    path: hydrator.trail.path(),
                    expected: PlainKind::Map,
                    found: item.kind(),
                });
            };
            out.push(hydrator.hydrate_at(map)?);
            hydrator.trail.pop();
        }
        Ok(out)
    }

    fn read_plans(&self) -> RwLockReadGuard<'_, TypeIdMap<Arc<ClassPlan>>> {
        self.plans.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_plans(&self) -> RwLockWriteGuard<'_, TypeIdMap<Arc<ClassPlan>>> {
        self.plans.write().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn resolve_key(formatter: &dyn KeyFormatter, member: &MemberDescriptor) -> String {
    match member.key_override() {
        Some(key) => String::from(key),
        None => formatter.format_key(member.name()),
    }
}

// -----------------------------------------------------------------------------
// Tests
