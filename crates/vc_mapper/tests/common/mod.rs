#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use vc_mapper::caster::DateTimeCaster;
use vc_mapper::{ClassDescriptor, Member, Object, impl_union};
use vc_plain::PlainMap;

/// Parses a JSON object, keeping its key order.
pub fn payload(json: &str) -> PlainMap {
    serde_json::from_str(json).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_hms_opt(0, 0, 0).unwrap().and_utc()
}

// -----------------------------------------------------------------------------
// Public field and accessor

#[derive(Debug, Clone, PartialEq)]
pub struct ClassWithCamelCaseProperty {
    pub snake_case: String,
}

impl Object for ClassWithCamelCaseProperty {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::scalar::<String>("snakeCase").field(|c: &Self| &c.snake_case))
            .construct(|args| {
                Ok(Self {
                    snake_case: args.take("snakeCase")?,
                })
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassWithCamelCasePublicMethod {
    camel_case: String,
}

impl ClassWithCamelCasePublicMethod {
    pub fn new(camel_case: &str) -> Self {
        Self {
            camel_case: String::from(camel_case),
        }
    }

    pub fn camel_case(&self) -> String {
        self.camel_case.clone()
    }
}

impl Object for ClassWithCamelCasePublicMethod {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::scalar::<String>("camelCase").accessor(Self::camel_case))
            .construct(|args| {
                Ok(Self {
                    camel_case: args.take("camelCase")?,
                })
            })
    }
}

// -----------------------------------------------------------------------------
// List of objects and timestamps

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Object(ClassWithCamelCasePublicMethod),
    Timestamp(DateTime<Utc>),
}

impl_union!(Child {
    Object(ClassWithCamelCasePublicMethod) => class,
    Timestamp(DateTime<Utc>) => scalar,
});

#[derive(Debug, Clone, PartialEq)]
pub struct ClassWithListOfObjects {
    pub children: Vec<Child>,
}

impl Object for ClassWithListOfObjects {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::union::<Child>("children").list_field(|c: &Self| c.children.as_slice()))
            .construct(|args| {
                Ok(Self {
                    children: args.take_list("children")?,
                })
            })
    }
}

// -----------------------------------------------------------------------------
// Custom date formats

pub const DAY_MONTH_YEAR: &str = "day_month_year";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassWithCustomDateTimeSerialization {
    pub promoted_public_property: DateTime<Utc>,
    pub regular_public_property: DateTime<Utc>,
    getter_property: NaiveDate,
}

impl ClassWithCustomDateTimeSerialization {
    pub fn new(promoted: DateTime<Utc>, regular: DateTime<Utc>, getter: NaiveDate) -> Self {
        Self {
            promoted_public_property: promoted,
            regular_public_property: regular,
            getter_property: getter,
        }
    }

    pub fn getter_property(&self) -> NaiveDate {
        self.getter_property
    }
}

impl Object for ClassWithCustomDateTimeSerialization {
    /// The regular property names a caster the engine must register.
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(
                Member::scalar::<DateTime<Utc>>("promotedPublicProperty")
                    .field(|c: &Self| &c.promoted_public_property)
                    .caster(DateTimeCaster::<DateTime<Utc>>::with_format("%d-%m-%Y")),
            )
            .member(
                Member::scalar::<DateTime<Utc>>("regularPublicProperty")
                    .field(|c: &Self| &c.regular_public_property)
                    .caster_named(DAY_MONTH_YEAR),
            )
            .member(
                Member::scalar::<NaiveDate>("getterProperty")
                    .accessor(Self::getter_property)
                    .caster(DateTimeCaster::<NaiveDate>::with_format("%d-%m-%Y")),
            )
            .construct(|args| {
                Ok(Self {
                    promoted_public_property: args.take("promotedPublicProperty")?,
                    regular_public_property: args.take("regularPublicProperty")?,
                    getter_property: args.take("getterProperty")?,
                })
            })
    }
}

// -----------------------------------------------------------------------------
// Unions

#[derive(Debug, Clone, PartialEq)]
pub struct ClassReferencedByUnionOne {
    pub number: i64,
}

impl Object for ClassReferencedByUnionOne {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::scalar::<i64>("number").field(|c: &Self| &c.number))
            .construct(|args| {
                Ok(Self {
                    number: args.take("number")?,
                })
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassReferencedByUnionTwo {
    pub text: String,
}

impl Object for ClassReferencedByUnionTwo {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::scalar::<String>("text").field(|c: &Self| &c.text))
            .construct(|args| {
                Ok(Self {
                    text: args.take("text")?,
                })
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReferencedUnion {
    One(ClassReferencedByUnionOne),
    Two(ClassReferencedByUnionTwo),
}

impl_union!(ReferencedUnion {
    One(ClassReferencedByUnionOne) => class,
    Two(ClassReferencedByUnionTwo) => class,
});

#[derive(Debug, Clone, PartialEq)]
pub enum BuiltInUnion {
    Text(String),
    Number(i64),
}

impl_union!(BuiltInUnion {
    Text(String) => scalar,
    Number(i64) => scalar,
});

#[derive(Debug, Clone, PartialEq)]
pub enum MixedUnion {
    One(ClassReferencedByUnionOne),
    Number(i64),
}

impl_union!(MixedUnion {
    One(ClassReferencedByUnionOne) => class,
    Number(i64) => scalar,
});

#[derive(Debug, Clone, PartialEq)]
pub struct ClassWithUnionProperty {
    pub union: ReferencedUnion,
    pub built_in_union: BuiltInUnion,
    pub mixed_union: MixedUnion,
}

impl Object for ClassWithUnionProperty {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::union::<ReferencedUnion>("union").field(|c: &Self| &c.union))
            .member(Member::union::<BuiltInUnion>("builtInUnion").field(|c: &Self| &c.built_in_union))
            .member(Member::union::<MixedUnion>("mixedUnion").field(|c: &Self| &c.mixed_union))
            .construct(|args| {
                Ok(Self {
                    union: args.take("union")?,
                    built_in_union: args.take("builtInUnion")?,
                    mixed_union: args.take("mixedUnion")?,
                })
            })
    }
}
