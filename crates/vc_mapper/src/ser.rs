//! Objects to plain maps.

use alloc::vec::Vec;

use vc_plain::{Plain, PlainMap};

use crate::descriptor::Object;
use crate::engine::{Branch, ClassPlan, MappingEngine, MemberPlan};
use crate::error::SerializeError;
use crate::trail::{Trail, trace_walk};
use crate::union::{UnionResolver, candidate_names};
use crate::value::{Fetched, Value};

// -----------------------------------------------------------------------------
// ObjectSerializer

/// Walks an object through its plan and produces a [`PlainMap`].
///
/// Members are read in declared order; members without read access are
/// skipped. The instance is never mutated.
pub struct ObjectSerializer<'e> {
    engine: &'e MappingEngine,
    pub(crate) trail: Trail,
}

impl<'e> ObjectSerializer<'e> {
    #[inline]
    pub const fn new(engine: &'e MappingEngine) -> Self {
        Self {
            engine,
            trail: Trail::new(),
        }
    }

    pub fn serialize<T: Object>(&mut self, instance: &T) -> Result<PlainMap, SerializeError> {
        self.trail = Trail::new();
        let plan = self.engine.plan_of::<T>()?;
        self.serialize_with(&plan, instance)
    }

    pub(crate) fn serialize_with(
        &mut self,
        plan: &ClassPlan,
        instance: &dyn Value,
    ) -> Result<PlainMap, SerializeError> {
        let mut map = PlainMap::with_capacity(plan.members().len());
        for member in plan.members() {
            let Some(reader) = member.descriptor().reader() else {
                continue;
            };
            self.trail.push_key(member.key());
            let fetched = reader(instance).ok_or_else(|| SerializeError::InstanceMismatch {
                path: self.trail.path(),
                expected: plan.type_name(),
                found: instance.value_type_name(),
            })?;
            let plain = self.member(member, fetched)?;
            self.trail.pop();
            map.insert(member.key(), plain);
        }
        Ok(map)
    }

    fn member(&mut self, member: &MemberPlan, fetched: Fetched<'_>) -> Result<Plain, SerializeError> {
        if !member.descriptor().is_list() {
            return self.single(member, fetched);
        }
        match fetched {
            Fetched::List(items) => {
                let mut list = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    self.trail.push_index(index);
                    list.push(self.single(member, item)?);
                    self.trail.pop();
                }
                Ok(Plain::List(list))
            }
            Fetched::Null => Ok(Plain::Null),
            _ => Err(SerializeError::NotAList {
                path: self.trail.path(),
            }),
        }
    }

    fn single(&mut self, member: &MemberPlan, fetched: Fetched<'_>) -> Result<Plain, SerializeError> {
        match fetched {
            Fetched::Null => Ok(Plain::Null),
            Fetched::Borrowed(value) => self.value(member, value),
            Fetched::Owned(value) => self.value(member, &*value),
            Fetched::List(_) => Err(SerializeError::UnexpectedList {
                path: self.trail.path(),
            }),
        }
    }

    fn value(&mut self, member: &MemberPlan, value: &dyn Value) -> Result<Plain, SerializeError> {
        let resolver = UnionResolver::new(self.engine);

        let (value, branch) = match member.union_adapter() {
            Some(adapter) => {
                let inner = (adapter.branch)(value).ok_or_else(|| SerializeError::InstanceMismatch {
                    path: self.trail.path(),
                    expected: adapter.name,
                    found: value.value_type_name(),
                })?;
                let branch = resolver.branch_for_value(member, inner).ok_or_else(|| {
                    SerializeError::UnionMismatch {
                        path: self.trail.path(),
                        found: inner.value_type_name(),
                        candidates: candidate_names(member),
                    }
                })?;
                trace_walk!(self.trail, "union resolved to `{}`", branch.type_ref().name());
                (inner, branch)
            }
            None => {
                let branch = resolver.branch_for_value(member, value).ok_or_else(|| {
                    SerializeError::InstanceMismatch {
                        path: self.trail.path(),
                        expected: member
                            .descriptor()
                            .candidates()
                            .first()
                            .map_or("unknown", |ty| ty.name()),
                        found: value.value_type_name(),
                    }
                })?;
                (value, branch)
            }
        };

        match branch {
            Branch::Scalar { caster, .. } => caster.to_plain(value).map_err(|source| SerializeError::Cast {
                path: self.trail.path(),
                source,
            }),
            Branch::Class(ty) => {
                let plan = self.engine.plan(ty)?;
                self.serialize_with(&plan, value).map(Plain::Map)
            }
        }
    }
}
