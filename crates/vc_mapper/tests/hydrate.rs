mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::*;
use vc_mapper::caster::DateTimeCaster;
use vc_mapper::{
    CastError, ClassDescriptor, HydrateError, MappingEngine, Member, Object, impl_union,
};
use vc_plain::{Plain, PlainKind, PlainMap};

// -----------------------------------------------------------------------------
// Round trips of the serialization fixtures

#[test]
fn hydrating_public_fields_and_accessors() {
    let engine = MappingEngine::new();

    let object: ClassWithCamelCaseProperty = engine
        .hydrate_object(&payload(r#"{"snake_case": "some_property"}"#))
        .unwrap();
    assert_eq!(object.snake_case, "some_property");

    let object: ClassWithCamelCasePublicMethod = engine
        .hydrate_object(&payload(r#"{"camel_case": "some_property"}"#))
        .unwrap();
    assert_eq!(object.camel_case(), "some_property");
}

#[test]
fn hydrating_a_mixed_list() {
    let engine = MappingEngine::new();
    let stamp = Utc.timestamp_opt(1_700_000_000, 123_456_000).unwrap();
    let object = ClassWithListOfObjects {
        children: vec![
            Child::Object(ClassWithCamelCasePublicMethod::new("first_element")),
            Child::Timestamp(stamp),
            Child::Object(ClassWithCamelCasePublicMethod::new("second_element")),
        ],
    };

    let payload = engine.serialize_object(&object).unwrap();
    let back: ClassWithListOfObjects = engine.hydrate_object(&payload).unwrap();

    assert_eq!(back, object);
}

#[test]
fn hydrating_custom_date_time_formats() {
    let engine = MappingEngine::builder()
        .named_caster(
            DAY_MONTH_YEAR,
            DateTimeCaster::<DateTime<Utc>>::with_format("%d-%m-%Y"),
        )
        .build();

    let object: ClassWithCustomDateTimeSerialization = engine
        .hydrate_object(&payload(
            r#"{
                "promoted_public_property": "24-11-1987",
                "regular_public_property": "25-11-1987",
                "getter_property": "26-11-1987"
            }"#,
        ))
        .unwrap();

    assert_eq!(object.promoted_public_property, midnight(1987, 11, 24));
    assert_eq!(object.regular_public_property, midnight(1987, 11, 25));
    assert_eq!(object.getter_property(), date(1987, 11, 26));
}

#[test]
fn hydrating_a_class_with_a_union() {
    let engine = MappingEngine::new();

    let object: ClassWithUnionProperty = engine
        .hydrate_object(&payload(
            r#"{"union": {"number": 1234}, "built_in_union": "name", "mixed_union": {"number": 1234}}"#,
        ))
        .unwrap();
    assert_eq!(
        object,
        ClassWithUnionProperty {
            union: ReferencedUnion::One(ClassReferencedByUnionOne { number: 1234 }),
            built_in_union: BuiltInUnion::Text(String::from("name")),
            mixed_union: MixedUnion::One(ClassReferencedByUnionOne { number: 1234 }),
        }
    );

    let object: ClassWithUnionProperty = engine
        .hydrate_object(&payload(
            r#"{"union": {"text": "name"}, "built_in_union": 1234, "mixed_union": 2345}"#,
        ))
        .unwrap();
    assert_eq!(
        object,
        ClassWithUnionProperty {
            union: ReferencedUnion::Two(ClassReferencedByUnionTwo {
                text: String::from("name"),
            }),
            built_in_union: BuiltInUnion::Number(1234),
            mixed_union: MixedUnion::Number(2345),
        }
    );
}

// -----------------------------------------------------------------------------
// Union order

#[derive(Debug, PartialEq)]
enum TextFirst {
    Text(String),
    Stamp(DateTime<Utc>),
}

impl_union!(TextFirst {
    Text(String) => scalar,
    Stamp(DateTime<Utc>) => scalar,
});

#[derive(Debug, PartialEq)]
enum StampFirst {
    Stamp(DateTime<Utc>),
    Text(String),
}

impl_union!(StampFirst {
    Stamp(DateTime<Utc>) => scalar,
    Text(String) => scalar,
});

struct Ordered {
    text_first: TextFirst,
    stamp_first: StampFirst,
}

impl Object for Ordered {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::union::<TextFirst>("textFirst"))
            .member(Member::union::<StampFirst>("stampFirst"))
            .construct(|args| {
                Ok(Self {
                    text_first: args.take("textFirst")?,
                    stamp_first: args.take("stampFirst")?,
                })
            })
    }
}

#[test]
fn union_candidates_are_tried_in_declared_order() {
    let engine = MappingEngine::new();
    let stamp = "2024-02-03 04:05:06.000000+0000";
    let expected = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();

    let map: PlainMap = [("text_first", stamp), ("stamp_first", stamp)].into_iter().collect();
    let ordered: Ordered = engine.hydrate_object(&map).unwrap();
    assert_eq!(ordered.text_first, TextFirst::Text(String::from(stamp)));
    assert_eq!(ordered.stamp_first, StampFirst::Stamp(expected));

    // A string that is not a timestamp falls through to the next candidate.
    let map: PlainMap = [("text_first", "soon"), ("stamp_first", "soon")].into_iter().collect();
    let ordered: Ordered = engine.hydrate_object(&map).unwrap();
    assert_eq!(ordered.stamp_first, StampFirst::Text(String::from("soon")));
}

#[test]
fn union_mismatch_names_path_and_candidates() {
    let engine = MappingEngine::new();

    let err = engine
        .hydrate_object::<ClassWithUnionProperty>(&payload(
            r#"{"union": {"number": 1, "text": "both"}, "built_in_union": 1, "mixed_union": 1}"#,
        ))
        .unwrap_err();
    assert_eq!(
        err,
        HydrateError::UnionMismatch {
            path: String::from("$.union"),
            found: PlainKind::Map,
            candidates: format!(
                "{}, {}",
                core::any::type_name::<ClassReferencedByUnionOne>(),
                core::any::type_name::<ClassReferencedByUnionTwo>(),
            ),
        }
    );

    let err = engine
        .hydrate_object::<ClassWithListOfObjects>(&payload(
            r#"{"children": [{"camel_case": "a"}, {"camelCase": "b"}]}"#,
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        HydrateError::UnionMismatch { path, found: PlainKind::Map, .. } if path == "$.children[1]"
    ));

    // A float never matches an integer candidate.
    let err = engine
        .hydrate_object::<ClassWithUnionProperty>(&payload(
            r#"{"union": {"number": 1}, "built_in_union": 1.5, "mixed_union": 1}"#,
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        HydrateError::UnionMismatch { path, found: PlainKind::Float, .. } if path == "$.built_in_union"
    ));
}

#[derive(Debug, Clone, PartialEq)]
struct Tagged {
    items: Vec<i64>,
}

impl Tagged {
    fn count(&self) -> usize {
        self.items.len()
    }
}

impl Object for Tagged {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::scalar::<i64>("items").list_field(|t: &Self| t.items.as_slice()))
            .member(Member::scalar::<usize>("count").accessor(Self::count).read_only())
            .construct(|args| {
                Ok(Self {
                    items: args.take_list("items")?,
                })
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TaggedOrCount {
    Tagged(Tagged),
    Count(i64),
}

impl_union!(TaggedOrCount {
    Tagged(Tagged) => class,
    Count(i64) => scalar,
});

#[derive(Debug, PartialEq)]
struct Bag {
    value: TaggedOrCount,
}

impl Object for Bag {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::union::<TaggedOrCount>("value").field(|b: &Self| &b.value))
            .construct(|args| {
                Ok(Self {
                    value: args.take("value")?,
                })
            })
    }
}

#[test]
fn union_classes_ignore_read_only_keys() {
    let engine = MappingEngine::new();
    let bag = Bag {
        value: TaggedOrCount::Tagged(Tagged { items: vec![1, 2] }),
    };

    let payload = engine.serialize_object(&bag).unwrap();
    assert_eq!(payload, common::payload(r#"{"value": {"items": [1, 2], "count": 2}}"#));

    let back: Bag = engine.hydrate_object(&payload).unwrap();
    assert_eq!(back, bag);

    // Keys no member declares still reject the candidate.
    let err = engine
        .hydrate_object::<Bag>(&common::payload(r#"{"value": {"items": [1], "size": 1}}"#))
        .unwrap_err();
    assert!(matches!(err, HydrateError::UnionMismatch { path, .. } if path == "$.value"));
}

// -----------------------------------------------------------------------------
// Optional members, defaults and access modes

#[derive(Debug, PartialEq)]
struct Settings {
    theme: String,
    nickname: Option<String>,
    aliases: Vec<String>,
    token: String,
}

impl Settings {
    fn alias_count(&self) -> u32 {
        self.aliases.len() as u32
    }
}

impl Object for Settings {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(
                Member::scalar::<String>("theme")
                    .field(|s: &Self| &s.theme)
                    .default_with(|| String::from("light")),
            )
            .member(Member::scalar::<String>("nickname").optional_field(|s: &Self| s.nickname.as_ref()))
            .member(
                Member::scalar::<String>("aliases")
                    .list_field(|s: &Self| s.aliases.as_slice())
                    .default_list(Vec::new),
            )
            .member(Member::scalar::<u32>("aliasCount").accessor(Self::alias_count).read_only())
            .member(Member::scalar::<String>("token"))
            .construct(|args| {
                Ok(Self {
                    theme: args.take("theme")?,
                    nickname: args.take_optional("nickname")?,
                    aliases: args.take_list("aliases")?,
                    token: args.take("token")?,
                })
            })
    }
}

#[test]
fn optional_members_and_defaults() {
    let engine = MappingEngine::new();

    let settings: Settings = engine.hydrate_object(&payload(r#"{"token": "t"}"#)).unwrap();
    assert_eq!(
        settings,
        Settings {
            theme: String::from("light"),
            nickname: None,
            aliases: Vec::new(),
            token: String::from("t"),
        }
    );

    let settings: Settings = engine
        .hydrate_object(&payload(
            r#"{"theme": "dark", "nickname": null, "aliases": ["a", "b"], "token": "t"}"#,
        ))
        .unwrap();
    assert_eq!(settings.theme, "dark");
    assert_eq!(settings.nickname, None);
    assert_eq!(settings.aliases, ["a", "b"]);
}

#[test]
fn read_only_and_constructor_only_members() {
    let engine = MappingEngine::new();
    let settings = Settings {
        theme: String::from("dark"),
        nickname: Some(String::from("ada")),
        aliases: vec![String::from("a")],
        token: String::from("secret"),
    };

    // The token has no reader and is never written out.
    let out = engine.serialize_object(&settings).unwrap();
    assert_eq!(
        out,
        payload(r#"{"theme": "dark", "nickname": "ada", "aliases": ["a"], "alias_count": 1}"#)
    );

    // The read-only count is not a constructor key, so unknown to the hydrator.
    let mut input = out;
    input.insert("token", "secret");
    let back: Settings = engine.hydrate_object(&input).unwrap();
    assert_eq!(back, settings);
}

// -----------------------------------------------------------------------------
// Errors

#[derive(Debug)]
struct Address {
    street: String,
}

impl Object for Address {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::scalar::<String>("street").field(|a: &Self| &a.street))
            .construct(|args| {
                Ok(Self {
                    street: args.take("street")?,
                })
            })
    }
}

#[derive(Debug)]
struct Person {
    address: Address,
}

impl Object for Person {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::object::<Address>("address").field(|p: &Self| &p.address))
            .construct(|args| {
                Ok(Self {
                    address: args.take("address")?,
                })
            })
    }
}

#[test]
fn missing_keys_name_the_enclosing_path() {
    let engine = MappingEngine::new();

    let err = engine.hydrate_object::<ClassWithCamelCaseProperty>(&PlainMap::new()).unwrap_err();
    assert_eq!(
        err,
        HydrateError::MissingKey {
            path: String::from("$"),
            key: String::from("snake_case"),
        }
    );

    let err = engine.hydrate_object::<Person>(&payload(r#"{"address": {}}"#)).unwrap_err();
    assert_eq!(
        err,
        HydrateError::MissingKey {
            path: String::from("$.address"),
            key: String::from("street"),
        }
    );

    let person: Person = engine
        .hydrate_object(&payload(r#"{"address": {"street": "Main"}}"#))
        .unwrap();
    assert_eq!(person.address.street, "Main");
}

#[test]
fn malformed_values_are_reported_unchanged() {
    let engine = MappingEngine::new();

    let err = engine
        .hydrate_object::<ClassWithCamelCaseProperty>(&payload(r#"{"snake_case": 5}"#))
        .unwrap_err();
    assert_eq!(
        err,
        HydrateError::Cast {
            path: String::from("$.snake_case"),
            source: CastError::UnexpectedPlain {
                expected: PlainKind::String,
                found: PlainKind::Int,
            },
        }
    );

    let err = engine
        .hydrate_object::<ClassWithListOfObjects>(&payload(r#"{"children": "none"}"#))
        .unwrap_err();
    assert_eq!(
        err,
        HydrateError::UnexpectedPlain {
            path: String::from("$.children"),
            expected: PlainKind::List,
            found: PlainKind::String,
        }
    );

    let err = engine.hydrate_object::<Person>(&payload(r#"{"address": "Main"}"#)).unwrap_err();
    assert!(matches!(err, HydrateError::UnexpectedPlain { expected: PlainKind::Map, .. }));
}

#[derive(Debug)]
struct WriteOnly;

impl Object for WriteOnly {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>().build()
    }
}

#[test]
fn classes_without_constructor_cannot_be_hydrated() {
    let engine = MappingEngine::new();
    let err = engine.hydrate_object::<WriteOnly>(&PlainMap::new()).unwrap_err();
    assert_eq!(
        err,
        HydrateError::NotConstructible {
            class: core::any::type_name::<WriteOnly>(),
        }
    );
}

#[test]
fn hydrating_top_level_lists() {
    let engine = MappingEngine::new();
    let items = [
        Plain::Map(payload(r#"{"camel_case": "a"}"#)),
        Plain::Map(payload(r#"{"camel_case": "b"}"#)),
    ];

    let objects: Vec<ClassWithCamelCasePublicMethod> = engine.hydrate_objects(&items).unwrap();
    assert_eq!(
        objects,
        [
            ClassWithCamelCasePublicMethod::new("a"),
            ClassWithCamelCasePublicMethod::new("b"),
        ]
    );

    let items = [Plain::Map(payload(r#"{"camel_case": "a"}"#)), Plain::Int(1)];
    let err = engine.hydrate_objects::<ClassWithCamelCasePublicMethod>(&items).unwrap_err();
    assert_eq!(
        err,
        HydrateError::UnexpectedPlain {
            path: String::from("$[1]"),
            expected: PlainKind::Map,
            found: PlainKind::Int,
        }
    );
}
