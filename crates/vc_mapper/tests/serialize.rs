mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::*;
use vc_mapper::caster::DateTimeCaster;
use vc_mapper::{
    CastError, ClassDescriptor, DescriptorError, MappingEngine, Member, Object, SerializeError,
    TypeRef, Union, Value,
};
use vc_plain::Plain;

fn date_engine() -> MappingEngine {
    MappingEngine::builder()
        .named_caster(
            DAY_MONTH_YEAR,
            DateTimeCaster::<DateTime<Utc>>::with_format("%d-%m-%Y"),
        )
        .build()
}

#[test]
fn serializing_an_object_with_a_public_property() {
    let engine = MappingEngine::new();
    let object = ClassWithCamelCaseProperty {
        snake_case: String::from("some_property"),
    };

    let payload = engine.serialize_object(&object).unwrap();

    assert_eq!(payload, common::payload(r#"{"snake_case": "some_property"}"#));
}

#[test]
fn serializing_an_object_with_a_public_method() {
    let engine = MappingEngine::new();
    let object = ClassWithCamelCasePublicMethod::new("some_property");

    let payload = engine.serialize_object(&object).unwrap();

    assert_eq!(payload, common::payload(r#"{"camel_case": "some_property"}"#));
}

#[test]
fn serializing_a_list_of_custom_objects() {
    let engine = MappingEngine::new();
    let object = ClassWithListOfObjects {
        children: vec![
            Child::Object(ClassWithCamelCasePublicMethod::new("first_element")),
            Child::Object(ClassWithCamelCasePublicMethod::new("second_element")),
        ],
    };

    let payload = engine.serialize_object(&object).unwrap();

    assert_eq!(
        payload,
        common::payload(
            r#"{"children": [
                {"camel_case": "first_element"},
                {"camel_case": "second_element"}
            ]}"#
        )
    );
}

#[test]
fn serializing_a_list_of_internal_objects() {
    let engine = MappingEngine::new();
    let now = Utc.timestamp_opt(1_700_000_000, 123_456_000).unwrap();
    let now_formatted = now.format("%Y-%m-%d %H:%M:%S%.6f%z").to_string();
    let object = ClassWithListOfObjects {
        children: vec![Child::Timestamp(now)],
    };

    let payload = engine.serialize_object(&object).unwrap();

    assert_eq!(
        payload.get("children"),
        Some(&Plain::List(vec![Plain::String(now_formatted)]))
    );
}

#[test]
fn serializing_using_custom_date_time_formats() {
    let engine = date_engine();
    let object = ClassWithCustomDateTimeSerialization::new(
        midnight(1987, 11, 24),
        midnight(1987, 11, 25),
        date(1987, 11, 26),
    );

    let payload = engine.serialize_object(&object).unwrap();

    assert_eq!(
        payload,
        common::payload(
            r#"{
                "promoted_public_property": "24-11-1987",
                "regular_public_property": "25-11-1987",
                "getter_property": "26-11-1987"
            }"#
        )
    );
}

#[test]
fn named_casters_must_be_registered() {
    let engine = MappingEngine::new();
    let object = ClassWithCustomDateTimeSerialization::new(
        midnight(1987, 11, 24),
        midnight(1987, 11, 25),
        date(1987, 11, 26),
    );

    let err = engine.serialize_object(&object).unwrap_err();

    assert_eq!(
        err,
        SerializeError::Descriptor(DescriptorError::UnknownNamedCaster {
            class: core::any::type_name::<ClassWithCustomDateTimeSerialization>(),
            member: "regularPublicProperty",
            name: String::from(DAY_MONTH_YEAR),
        })
    );
}

#[test]
fn serializing_a_class_with_a_union() {
    let engine = MappingEngine::new();
    let object1 = ClassWithUnionProperty {
        union: ReferencedUnion::One(ClassReferencedByUnionOne { number: 1234 }),
        built_in_union: BuiltInUnion::Text(String::from("name")),
        mixed_union: MixedUnion::One(ClassReferencedByUnionOne { number: 1234 }),
    };
    let object2 = ClassWithUnionProperty {
        union: ReferencedUnion::Two(ClassReferencedByUnionTwo {
            text: String::from("name"),
        }),
        built_in_union: BuiltInUnion::Number(1234),
        mixed_union: MixedUnion::Number(2345),
    };

    let payload1 = engine.serialize_object(&object1).unwrap();
    let payload2 = engine.serialize_object(&object2).unwrap();

    assert_eq!(
        payload1,
        common::payload(
            r#"{
                "union": {"number": 1234},
                "built_in_union": "name",
                "mixed_union": {"number": 1234}
            }"#
        )
    );
    assert_eq!(
        payload2,
        common::payload(
            r#"{
                "union": {"text": "name"},
                "built_in_union": 1234,
                "mixed_union": 2345
            }"#
        )
    );
}

#[test]
fn serialized_payloads_write_as_json_in_declared_order() {
    let engine = date_engine();
    let object = ClassWithCustomDateTimeSerialization::new(
        Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap(),
        midnight(2001, 2, 4),
        date(2001, 2, 5),
    );

    let payload = engine.serialize_object(&object).unwrap();

    assert_eq!(
        serde_json::to_string(&payload).unwrap(),
        r#"{"promoted_public_property":"03-02-2001","regular_public_property":"04-02-2001","getter_property":"05-02-2001"}"#
    );
}

// -----------------------------------------------------------------------------
// Errors

#[derive(Debug)]
enum Partial {
    Known(i64),
    Unknown(u8),
}

// Deliberately lists fewer candidates than variants.
impl Union for Partial {
    fn candidates() -> Vec<TypeRef> {
        vec![TypeRef::scalar::<i64>()]
    }

    fn branch(&self) -> &dyn Value {
        match self {
            Partial::Known(v) => v,
            Partial::Unknown(v) => v,
        }
    }

    fn from_branch(value: Box<dyn Value>) -> Result<Self, Box<dyn Value>> {
        value.take::<i64>().map(Partial::Known)
    }
}

struct Faulty {
    value: Partial,
    counter: u64,
}

impl Object for Faulty {
    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .member(Member::union::<Partial>("value").field(|f: &Self| &f.value))
            .member(Member::scalar::<u64>("counter").field(|f: &Self| &f.counter))
            .build()
    }
}

#[test]
fn values_outside_the_candidates_are_rejected() {
    let engine = MappingEngine::new();

    let ok = Faulty {
        value: Partial::Known(1),
        counter: 1,
    };
    assert!(engine.serialize_object(&ok).is_ok());

    let err = engine
        .serialize_object(&Faulty {
            value: Partial::Unknown(1),
            counter: 1,
        })
        .unwrap_err();
    assert_eq!(
        err,
        SerializeError::UnionMismatch {
            path: String::from("$.value"),
            found: "u8",
            candidates: String::from("i64"),
        }
    );
}

#[test]
fn cast_failures_carry_the_member_path() {
    let engine = MappingEngine::new();
    let err = engine
        .serialize_object(&Faulty {
            value: Partial::Known(1),
            counter: u64::MAX,
        })
        .unwrap_err();

    let SerializeError::Cast { path, source } = err else {
        panic!("expected a cast error");
    };
    assert_eq!(path, "$.counter");
    assert!(matches!(source, CastError::OutOfRange { target: "i64", .. }));
}

#[test]
fn list_errors_carry_the_index() {
    let engine = MappingEngine::new();
    let objects = [
        Faulty {
            value: Partial::Known(1),
            counter: 1,
        },
        Faulty {
            value: Partial::Unknown(2),
            counter: 1,
        },
    ];

    let err = engine.serialize_objects(&objects).unwrap_err();

    assert!(matches!(err, SerializeError::UnionMismatch { path, .. } if path == "$[1].value"));
    assert_eq!(engine.serialize_objects(&objects[..1]).unwrap().len(), 1);
}
