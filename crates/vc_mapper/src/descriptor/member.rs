use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use crate::caster::{Caster, CasterRef};
use crate::descriptor::{Object, TypeRef};
use crate::union::Union;
use crate::value::{Fetched, Hydrated, Value};

// -----------------------------------------------------------------------------
// Internal types

pub(crate) type Reader = Arc<dyn for<'a> Fn(&'a dyn Value) -> Option<Fetched<'a>> + Send + Sync>;

pub(crate) type DefaultFn = Arc<dyn Fn() -> Hydrated + Send + Sync>;

#[inline(always)]
fn reader<F>(f: F) -> Reader
where
    F: for<'a> Fn(&'a dyn Value) -> Option<Fetched<'a>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Moves between a union enum and its branches.
#[derive(Clone, Copy)]
pub(crate) struct UnionAdapter {
    pub name: &'static str,
    pub branch: fn(&dyn Value) -> Option<&dyn Value>,
    pub wrap: fn(Box<dyn Value>) -> Result<Box<dyn Value>, Box<dyn Value>>,
}

fn branch_of<U: Union>(value: &dyn Value) -> Option<&dyn Value> {
    value.downcast_ref::<U>().map(U::branch)
}

fn wrap_into<U: Union>(value: Box<dyn Value>) -> Result<Box<dyn Value>, Box<dyn Value>> {
    U::from_branch(value).map(|union| Box::new(union) as Box<dyn Value>)
}

// -----------------------------------------------------------------------------
// Access

/// How a member is read during serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Not readable; the member only feeds the constructor.
    None,
    /// Read from a public field.
    Field,
    /// Read through an accessor method.
    Accessor,
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// Type-erased metadata of one member, as stored on a [`ClassDescriptor`].
///
/// Built through [`Member`].
///
/// [`ClassDescriptor`]: crate::ClassDescriptor
#[derive(Clone)]
pub struct MemberDescriptor {
    name: &'static str,
    key: Option<&'static str>,
    candidates: Vec<TypeRef>,
    union: Option<UnionAdapter>,
    list: bool,
    nullable: bool,
    caster: Option<CasterRef>,
    access: Access,
    reader: Option<Reader>,
    writable: bool,
    default: Option<DefaultFn>,
}

impl MemberDescriptor {
    /// The logical member name, also used as the constructor argument name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The explicit serialized key, if any.
    #[inline]
    pub const fn key_override(&self) -> Option<&'static str> {
        self.key
    }

    /// Candidate types in declared order. Unions have more than one.
    #[inline]
    pub fn candidates(&self) -> &[TypeRef] {
        &self.candidates
    }

    #[inline]
    pub const fn is_union(&self) -> bool {
        self.union.is_some()
    }

    #[inline]
    pub const fn is_list(&self) -> bool {
        self.list
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The explicit caster, which wins over type-associated ones.
    #[inline]
    pub const fn caster(&self) -> Option<&CasterRef> {
        self.caster.as_ref()
    }

    #[inline]
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Whether the member is passed to the constructor.
    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether hydration fails when the key is absent.
    #[inline]
    pub const fn is_required(&self) -> bool {
        self.writable && !self.nullable && self.default.is_none()
    }

    #[inline]
    pub(crate) fn reader(&self) -> Option<&Reader> {
        self.reader.as_ref()
    }

    #[inline]
    pub(crate) fn default_fn(&self) -> Option<&DefaultFn> {
        self.default.as_ref()
    }

    #[inline]
    pub(crate) const fn union_adapter(&self) -> Option<UnionAdapter> {
        self.union
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("candidates", &self.candidates)
            .field("list", &self.list)
            .field("nullable", &self.nullable)
            .field("caster", &self.caster)
            .field("access", &self.access)
            .field("writable", &self.writable)
            .field("default", &self.default.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Member

/// Typed builder of a [`MemberDescriptor`].
///
/// `V` is the member type, or the element type for list members.
///
/// # Examples
///
/// ```
/// use vc_mapper::{Access, Member, MemberDescriptor};
///
/// struct Invoice {
///     lines: Vec<u32>,
/// }
///
/// impl Invoice {
///     fn total(&self) -> u32 {
///         self.lines.iter().sum()
///     }
/// }
///
/// let total: MemberDescriptor = Member::scalar::<u32>("grandTotal")
///     .accessor(Invoice::total)
///     .read_only()
///     .into();
/// assert_eq!(total.access(), Access::Accessor);
/// assert!(!total.is_writable());
///
/// let lines: MemberDescriptor = Member::scalar::<u32>("lines")
///     .list_field(|i: &Invoice| i.lines.as_slice())
///     .key("invoice_lines")
///     .into();
/// assert!(lines.is_list());
/// assert_eq!(lines.key_override(), Some("invoice_lines"));
/// ```
pub struct Member<V> {
    inner: MemberDescriptor,
    _marker: PhantomData<fn() -> V>,
}

impl Member<()> {
    fn with<V>(
        name: &'static str,
        candidates: Vec<TypeRef>,
        union: Option<UnionAdapter>,
    ) -> Member<V> {
        Member {
            inner: MemberDescriptor {
                name,
                key: None,
                candidates,
                union,
                list: false,
                nullable: false,
                caster: None,
                access: Access::None,
                reader: None,
                writable: true,
                default: None,
            },
            _marker: PhantomData,
        }
    }

    /// A member mapped by the caster of `V`.
    pub fn scalar<V: Value>(name: &'static str) -> Member<V> {
        Self::with(name, vec![TypeRef::scalar::<V>()], None)
    }

    /// A member holding a nested object.
    pub fn object<V: Object>(name: &'static str) -> Member<V> {
        Self::with(name, vec![TypeRef::class::<V>()], None)
    }

    /// A member whose type is one of the candidates of `U`, tried in order.
    pub fn union<U: Union>(name: &'static str) -> Member<U> {
        let adapter = UnionAdapter {
            name: type_name::<U>(),
            branch: branch_of::<U>,
            wrap: wrap_into::<U>,
        };
        Self::with(name, U::candidates(), Some(adapter))
    }
}

impl<V: Value> Member<V> {
    /// Overrides the serialized key; it is used unchanged.
    pub fn key(mut self, key: &'static str) -> Self {
        self.inner.key = Some(key);
        self
    }

    /// Maps the member through `caster` instead of the type-associated one.
    ///
    /// This also applies to every union candidate and replaces nested
    /// object walking.
    pub fn caster(mut self, caster: impl Caster) -> Self {
        self.inner.caster = Some(CasterRef::Instance(Arc::new(caster)));
        self
    }

    /// Maps the member through the caster registered under `name`.
    pub fn caster_named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.inner.caster = Some(CasterRef::Named(name.into()));
        self
    }

    /// Marks the member as a list of `V`.
    pub fn list(mut self) -> Self {
        self.inner.list = true;
        self
    }

    /// Marks the member as optional; it maps to and from `Null`.
    pub fn nullable(mut self) -> Self {
        self.inner.nullable = true;
        self
    }

    /// Serializes the member but never passes it to the constructor.
    pub fn read_only(mut self) -> Self {
        self.inner.writable = false;
        self
    }

    /// Uses a clone of `value` when the key is absent.
    pub fn default_value(self, value: V) -> Self
    where
        V: Clone + Send + Sync,
    {
        self.default_with(move || value.clone())
    }

    /// Calls `f` when the key is absent.
    pub fn default_with(mut self, f: impl Fn() -> V + Send + Sync + 'static) -> Self {
        self.inner.default = Some(Arc::new(move || Hydrated::Value(Box::new(f()))));
        self
    }

    /// Calls `f` when the key of a list member is absent.
    pub fn default_list(mut self, f: impl Fn() -> Vec<V> + Send + Sync + 'static) -> Self {
        self.inner.default = Some(Arc::new(move || {
            Hydrated::List(
                f().into_iter()
                    .map(|v| Hydrated::Value(Box::new(v)))
                    .collect(),
            )
        }));
        self
    }

    /// Reads the member from a public field.
    pub fn field<C: Value>(mut self, get: fn(&C) -> &V) -> Self {
        self.inner.access = Access::Field;
        self.inner.reader = Some(reader(move |instance| {
            let instance = instance.downcast_ref::<C>()?;
            Some(Fetched::Borrowed(get(instance)))
        }));
        self
    }

    /// Reads the member through an accessor method.
    pub fn accessor<C: Value>(mut self, get: fn(&C) -> V) -> Self {
        self.inner.access = Access::Accessor;
        self.inner.reader = Some(reader(move |instance| {
            let instance = instance.downcast_ref::<C>()?;
            Some(Fetched::Owned(Box::new(get(instance))))
        }));
        self
    }

    /// Reads a list member from a public field.
    pub fn list_field<C: Value>(mut self, get: fn(&C) -> &[V]) -> Self {
        self.inner.list = true;
        self.inner.access = Access::Field;
        self.inner.reader = Some(reader(move |instance| {
            let instance = instance.downcast_ref::<C>()?;
            let items = get(instance)
                .iter()
                .map(|v| Fetched::Borrowed(v as &dyn Value))
                .collect();
            Some(Fetched::List(items))
        }));
        self
    }

    /// Reads a list member through an accessor method.
    pub fn list_accessor<C: Value>(mut self, get: fn(&C) -> Vec<V>) -> Self {
        self.inner.list = true;
        self.inner.access = Access::Accessor;
        self.inner.reader = Some(reader(move |instance| {
            let instance = instance.downcast_ref::<C>()?;
            let items = get(instance)
                .into_iter()
                .map(|v| Fetched::Owned(Box::new(v)))
                .collect();
            Some(Fetched::List(items))
        }));
        self
    }

    /// Reads an optional member from a public field. Implies [`nullable`](Self::nullable).
    pub fn optional_field<C: Value>(mut self, get: fn(&C) -> Option<&V>) -> Self {
        self.inner.nullable = true;
        self.inner.access = Access::Field;
        self.inner.reader = Some(reader(move |instance| {
            let instance = instance.downcast_ref::<C>()?;
            Some(match get(instance) {
                Some(v) => Fetched::Borrowed(v),
                None => Fetched::Null,
            })
        }));
        self
    }

    /// Reads an optional member through an accessor method. Implies [`nullable`](Self::nullable).
    pub fn optional_accessor<C: Value>(mut self, get: fn(&C) -> Option<V>) -> Self {
        self.inner.nullable = true;
        self.inner.access = Access::Accessor;
        self.inner.reader = Some(reader(move |instance| {
            let instance = instance.downcast_ref::<C>()?;
            Some(match get(instance) {
                Some(v) => Fetched::Owned(Box::new(v)),
                None => Fetched::Null,
            })
        }));
        self
    }
}

impl<V> From<Member<V>> for MemberDescriptor {
    #[inline]
    fn from(member: Member<V>) -> Self {
        member.inner
    }
}

// -----------------------------------------------------------------------------
// Tests
