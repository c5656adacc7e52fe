use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::caster::{Caster, CasterKey, CasterRef, CasterRegistry};
use crate::descriptor::{ClassDescriptor, Constructor, MemberDescriptor, TypeKind, TypeRef, UnionAdapter};
use crate::error::DescriptorError;
use crate::naming::KeyFormatter;

// -----------------------------------------------------------------------------
// Branch

/// A candidate of a member with the way it is mapped.
#[derive(Clone)]
pub enum Branch {
    /// Mapped by a caster: the type-associated one, or the member's explicit one.
    Scalar { ty: TypeRef, caster: Arc<dyn Caster> },
    /// Walked member by member through its own plan.
    Class(TypeRef),
}

impl Branch {
    #[inline]
    pub const fn type_ref(&self) -> &TypeRef {
        match self {
            Branch::Scalar { ty, .. } | Branch::Class(ty) => ty,
        }
    }
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Scalar { ty, caster } => f
                .debug_struct("Scalar")
                .field("ty", ty)
                .field("kind", &caster.kind())
                .finish(),
            Branch::Class(ty) => f.debug_tuple("Class").field(ty).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberPlan

/// A member with its serialized key and resolved branches.
#[derive(Debug)]
pub struct MemberPlan {
    descriptor: MemberDescriptor,
    key: String,
    branches: Vec<Branch>,
}

impl MemberPlan {
    #[inline]
    pub const fn descriptor(&self) -> &MemberDescriptor {
        &self.descriptor
    }

    /// The serialized key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// One branch per candidate, in declared order.
    #[inline]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    #[inline]
    pub(crate) const fn union_adapter(&self) -> Option<UnionAdapter> {
        self.descriptor.union_adapter()
    }

    fn resolve(
        class: &'static str,
        descriptor: MemberDescriptor,
        key: String,
        casters: &CasterRegistry,
    ) -> Result<Self, DescriptorError> {
        let explicit = match descriptor.caster() {
            None => None,
            Some(CasterRef::Instance(caster)) => Some(caster.clone()),
            Some(CasterRef::Named(name)) => Some(
                casters
                    .resolve(&CasterKey::Name(name.clone()))
                    .map_err(|_| DescriptorError::UnknownNamedCaster {
                        class,
                        member: descriptor.name(),
                        name: name.to_string(),
                    })?,
            ),
        };

        let mut branches = Vec::with_capacity(descriptor.candidates().len());
        for ty in descriptor.candidates() {
            let branch = match (&explicit, ty.kind()) {
                (Some(caster), _) => Branch::Scalar {
                    ty: *ty,
                    caster: caster.clone(),
                },
                (None, TypeKind::Class(_)) => Branch::Class(*ty),
                (None, TypeKind::Scalar) => match casters.get_type(ty.id()) {
                    Some(caster) => Branch::Scalar {
                        ty: *ty,
                        caster: caster.clone(),
                    },
                    None => {
                        return Err(DescriptorError::UnresolvableCaster {
                            class,
                            member: descriptor.name(),
                            ty: ty.name(),
                        });
                    }
                },
            };
            branches.push(branch);
        }

        Ok(Self {
            descriptor,
            key,
            branches,
        })
    }
}

// -----------------------------------------------------------------------------
// ClassPlan

/// A class descriptor resolved against one engine: keys are computed and
/// casters are bound.
///
/// Plans are built once per engine and class, then shared.
pub struct ClassPlan {
    id: TypeId,
    name: &'static str,
    members: Vec<MemberPlan>,
    constructor: Option<Constructor>,
}

impl ClassPlan {
    pub(crate) fn build(
        descriptor: ClassDescriptor,
        casters: &CasterRegistry,
        key_formatter: &dyn KeyFormatter,
    ) -> Result<Self, DescriptorError> {
        let id = descriptor.type_id();
        let name = descriptor.type_name();
        let (descriptors, constructor) = descriptor.into_parts();

        let mut members: Vec<MemberPlan> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            // Constructor arguments are looked up by name.
            if members.iter().any(|member| member.descriptor.name() == descriptor.name()) {
                return Err(DescriptorError::DuplicateName {
                    class: name,
                    name: descriptor.name(),
                });
            }
            let key = super::resolve_key(key_formatter, &descriptor);
            if members.iter().any(|member| member.key == key) {
                return Err(DescriptorError::DuplicateKey { class: name, key });
            }
            members.push(MemberPlan::resolve(name, descriptor, key, casters)?);
        }

        Ok(Self {
            id,
            name,
            members,
            constructor,
        })
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    /// Members in declared order.
    #[inline]
    pub fn members(&self) -> &[MemberPlan] {
        &self.members
    }

    pub fn member_by_key(&self, key: &str) -> Option<&MemberPlan> {
        self.members.iter().find(|member| member.key == key)
    }

    #[inline]
    pub const fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    #[inline]
    pub(crate) fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }
}

impl fmt::Debug for ClassPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassPlan")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
