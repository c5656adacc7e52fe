//! Plain maps to objects.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::type_name;
use core::fmt::Display;

use vc_plain::{Plain, PlainKind, PlainMap};

use crate::descriptor::Object;
use crate::engine::{Branch, ClassPlan, MappingEngine, MemberPlan};
use crate::error::HydrateError;
use crate::trail::{Trail, trace_walk};
use crate::union::{UnionResolver, candidate_names};
use crate::value::{Hydrated, Value};

// -----------------------------------------------------------------------------
// Arguments

/// The hydrated members handed to a class constructor, by member name.
///
/// Each argument can be taken once.
///
/// # Examples
///
/// ```
/// use vc_mapper::{ClassDescriptor, MappingEngine, Member, Object};
/// use vc_plain::PlainMap;
///
/// struct Tag {
///     name: String,
///     color: Option<String>,
///     aliases: Vec<String>,
/// }
///
/// impl Object for Tag {
///     fn describe() -> ClassDescriptor {
///         ClassDescriptor::builder::<Self>()
///             .member(Member::scalar::<String>("name"))
///             .member(Member::scalar::<String>("color").nullable())
///             .member(Member::scalar::<String>("aliases").list().default_list(Vec::new))
///             .construct(|args| {
///                 let name: String = args.take("name")?;
///                 if name.is_empty() {
///                     return Err(args.fail("empty name"));
///                 }
///                 Ok(Self {
///                     name,
///                     color: args.take_optional("color")?,
///                     aliases: args.take_list("aliases")?,
///                 })
///             })
///     }
/// }
///
/// let engine = MappingEngine::new();
///
/// let payload: PlainMap = [("name", "urgent")].into_iter().collect();
/// let tag: Tag = engine.hydrate_object(&payload).unwrap();
/// assert_eq!(tag.name, "urgent");
/// assert_eq!(tag.color, None);
/// assert!(tag.aliases.is_empty());
///
/// let payload: PlainMap = [("name", "")].into_iter().collect();
/// assert!(engine.hydrate_object::<Tag>(&payload).is_err());
/// ```
pub struct Arguments {
    class: &'static str,
    slots: Vec<(&'static str, Option<Hydrated>)>,
}

impl Arguments {
    pub(crate) fn new(class: &'static str, capacity: usize) -> Self {
        Self {
            class,
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, value: Hydrated) {
        self.slots.push((name, Some(value)));
    }

    /// The class being constructed.
    #[inline]
    pub const fn class(&self) -> &'static str {
        self.class
    }

    /// Whether `name` was provided and not taken yet.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|(n, v)| *n == name && v.is_some())
    }

    /// Takes a non-null, non-list argument.
    pub fn take<V: Value>(&mut self, name: &'static str) -> Result<V, HydrateError> {
        match self.slot(name)? {
            Hydrated::Value(value) => self.downcast(name, value),
            other => Err(self.mismatch::<V>(name, other.describe())),
        }
    }

    /// Takes an argument of a nullable member.
    pub fn take_optional<V: Value>(&mut self, name: &'static str) -> Result<Option<V>, HydrateError> {
        match self.slot(name)? {
            Hydrated::Null => Ok(None),
            Hydrated::Value(value) => self.downcast(name, value).map(Some),
            other => Err(self.mismatch::<V>(name, other.describe())),
        }
    }

    /// Takes the argument of a list member.
    pub fn take_list<V: Value>(&mut self, name: &'static str) -> Result<Vec<V>, HydrateError> {
        match self.slot(name)? {
            Hydrated::List(items) => self.downcast_list(name, items),
            other => Err(self.mismatch::<Vec<V>>(name, other.describe())),
        }
    }

    /// Takes the argument of a nullable list member.
    pub fn take_optional_list<V: Value>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<Vec<V>>, HydrateError> {
        match self.slot(name)? {
            Hydrated::Null => Ok(None),
            Hydrated::List(items) => self.downcast_list(name, items).map(Some),
            other => Err(self.mismatch::<Vec<V>>(name, other.describe())),
        }
    }

    /// An error reported as a failed construction of the class.
    #[cold]
    pub fn fail(&self, message: impl Display) -> HydrateError {
        HydrateError::Construction {
            class: self.class,
            message: message.to_string(),
        }
    }

    fn slot(&mut self, name: &'static str) -> Result<Hydrated, HydrateError> {
        self.slots
            .iter_mut()
            .find(|(n, _)| *n == name)
            .and_then(|(_, value)| value.take())
            .ok_or(HydrateError::MissingArgument {
                class: self.class,
                name,
            })
    }

    fn downcast<V: Value>(&self, name: &'static str, value: Box<dyn Value>) -> Result<V, HydrateError> {
        value
            .take::<V>()
            .map_err(|value| self.mismatch::<V>(name, (*value).value_type_name()))
    }

    fn downcast_list<V: Value>(
        &self,
        name: &'static str,
        items: Vec<Hydrated>,
    ) -> Result<Vec<V>, HydrateError> {
        items
            .into_iter()
            .map(|item| match item {
                Hydrated::Value(value) => self.downcast(name, value),
                other => Err(self.mismatch::<V>(name, other.describe())),
            })
            .collect()
    }

    #[cold]
    fn mismatch<V>(&self, name: &'static str, found: &'static str) -> HydrateError {
        HydrateError::ArgumentType {
            class: self.class,
            name,
            expected: type_name::<V>(),
            found,
        }
    }
}

// -----------------------------------------------------------------------------
// ObjectHydrator

/// Builds objects from plain maps through their plans.
///
/// Every writable member is hydrated first, then the constructor receives
/// them all at once.
pub struct ObjectHydrator<'e> {
    engine: &'e MappingEngine,
    pub(crate) trail: Trail,
}

impl<'e> ObjectHydrator<'e> {
    #[inline]
    pub const fn new(engine: &'e MappingEngine) -> Self {
        Self {
            engine,
            trail: Trail::new(),
        }
    }

    pub fn hydrate<T: Object>(&mut self, map: &PlainMap) -> Result<T, HydrateError> {
        self.trail = Trail::new();
        self.hydrate_at(map)
    }

    /// Hydrates without resetting the trail.
    pub(crate) fn hydrate_at<T: Object>(&mut self, map: &PlainMap) -> Result<T, HydrateError> {
        let plan = self.engine.plan_of::<T>()?;
        let value = self.hydrate_with(&plan, map)?;
        value.take::<T>().map_err(|value| HydrateError::InstanceMismatch {
            expected: type_name::<T>(),
            found: (*value).value_type_name(),
        })
    }

    fn hydrate_with(&mut self, plan: &ClassPlan, map: &PlainMap) -> Result<Box<dyn Value>, HydrateError> {
        let Some(constructor) = plan.constructor() else {
            return Err(HydrateError::NotConstructible {
                class: plan.type_name(),
            });
        };

        let mut args = Arguments::new(plan.type_name(), plan.members().len());
        for member in plan.members() {
            let descriptor = member.descriptor();
            if !descriptor.is_writable() {
                continue;
            }

            let value = match map.get(member.key()) {
                Some(Plain::Null) if descriptor.is_nullable() => Hydrated::Null,
                Some(plain) => {
                    self.trail.push_key(member.key());
                    let value = self.member(member, plain)?;
                    self.trail.pop();
                    value
                }
                None => match descriptor.default_fn() {
                    Some(default) => default(),
                    None if descriptor.is_nullable() => Hydrated::Null,
                    None => {
                        return Err(HydrateError::MissingKey {
                            path: self.trail.path(),
                            key: String::from(member.key()),
                        });
                    }
                },
            };
            args.push(descriptor.name(), value);
        }

        constructor(&mut args)
    }

    fn member(&mut self, member: &MemberPlan, plain: &Plain) -> Result<Hydrated, HydrateError> {
        if !member.descriptor().is_list() {
            return self.single(member, plain);
        }
        let Plain::List(items) = plain else {
            return Err(HydrateError::UnexpectedPlain {
                path: self.trail.path(),
                expected: PlainKind::List,
                found: plain.kind(),
            });
        };
        let mut list = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.trail.push_index(index);
            list.push(self.single(member, item)?);
            self.trail.pop();
        }
        Ok(Hydrated::List(list))
    }

    fn single(&mut self, member: &MemberPlan, plain: &Plain) -> Result<Hydrated, HydrateError> {
        let adapter = member.union_adapter();

        let branch = match adapter {
            Some(_) => {
                let branch = UnionResolver::new(self.engine).branch_for_plain(member, plain)?;
                let branch = branch.ok_or_else(|| self.union_mismatch(member, plain))?;
                trace_walk!(self.trail, "union resolved to `{}`", branch.type_ref().name());
                branch
            }
            None => member
                .branches()
                .first()
                .ok_or_else(|| self.union_mismatch(member, plain))?,
        };

        let value = match branch {
            Branch::Scalar { caster, .. } => caster.to_value(plain).map_err(|source| HydrateError::Cast {
                path: self.trail.path(),
                source,
            })?,
            Branch::Class(ty) => {
                let Plain::Map(map) = plain else {
                    return Err(HydrateError::UnexpectedPlain {
                        path: self.trail.path(),
                        expected: PlainKind::Map,
                        found: plain.kind(),
                    });
                };
                let plan = self.engine.plan(ty)?;
                self.hydrate_with(&plan, map)?
            }
        };

        match adapter {
            Some(adapter) => (adapter.wrap)(value)
                .map(Hydrated::Value)
                .map_err(|_| self.union_mismatch(member, plain)),
            None => Ok(Hydrated::Value(value)),
        }
    }

    #[cold]
    fn union_mismatch(&self, member: &MemberPlan, plain: &Plain) -> HydrateError {
        HydrateError::UnionMismatch {
            path: self.trail.path(),
            found: plain.kind(),
            candidates: candidate_names(member),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
