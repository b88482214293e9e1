//! Resolution-table tests: the verb/identifier matrix, explicit-action
//! precedence and normalization, custom-verb recognition, and identifier
//! extraction with the route→query fallback.

use http::Method;
use restdispatch::resolver::{
    extract_identifier, normalize_action, resolve, ArgShape, Resolution, ResolvedAction, Verb,
};
use restdispatch::RestRequest;
use serde_json::{json, Value};

fn no_custom(_: &str) -> bool {
    false
}

fn resolved(verb: Verb, args: ArgShape) -> Resolution {
    Resolution::Resolved(ResolvedAction { verb, args })
}

#[test]
fn test_verb_table_for_every_method_and_identifier_combination() {
    let cases = [
        (Method::GET, true, resolved(Verb::Get, ArgShape::Identifier)),
        (Method::GET, false, resolved(Verb::GetList, ArgShape::None)),
        (
            Method::PUT,
            true,
            resolved(Verb::Update, ArgShape::IdentifierAndData),
        ),
        (Method::PUT, false, resolved(Verb::ReplaceList, ArgShape::Data)),
        (
            Method::PATCH,
            true,
            resolved(Verb::Patch, ArgShape::IdentifierAndData),
        ),
        (Method::PATCH, false, resolved(Verb::PatchList, ArgShape::Data)),
        (
            Method::DELETE,
            true,
            resolved(Verb::Delete, ArgShape::Identifier),
        ),
        (
            Method::DELETE,
            false,
            resolved(Verb::DeleteList, ArgShape::None),
        ),
        (Method::HEAD, true, resolved(Verb::Head, ArgShape::Identifier)),
        (Method::HEAD, false, resolved(Verb::Head, ArgShape::None)),
        (Method::OPTIONS, true, resolved(Verb::Options, ArgShape::None)),
        (Method::OPTIONS, false, resolved(Verb::Options, ArgShape::None)),
    ];

    for (method, identifier_present, expected) in cases {
        let resolution = resolve(&method, None, identifier_present, no_custom);
        assert_eq!(
            resolution, expected,
            "method {method}, identifier {identifier_present}"
        );
    }
}

#[test]
fn test_post_always_resolves_to_create() {
    for identifier_present in [true, false] {
        let resolution = resolve(&Method::POST, None, identifier_present, no_custom);
        assert_eq!(resolution, resolved(Verb::Create, ArgShape::Data));
    }
}

#[test]
fn test_registered_custom_method_resolves() {
    let resolution = resolve(
        &Method::from_bytes(b"DESCRIBE").unwrap(),
        None,
        false,
        |name| name == "DESCRIBE",
    );
    assert_eq!(
        resolution,
        resolved(Verb::Custom("DESCRIBE".to_string()), ArgShape::None)
    );
}

#[test]
fn test_unknown_method_is_not_allowed() {
    let resolution = resolve(
        &Method::from_bytes(b"PROPFIND").unwrap(),
        None,
        false,
        no_custom,
    );
    assert_eq!(resolution, Resolution::NotAllowed);
}

#[test]
fn test_resolution_is_idempotent() {
    let first = resolve(&Method::PATCH, None, true, no_custom);
    let second = resolve(&Method::PATCH, None, true, no_custom);
    assert_eq!(first, second);
}

#[test]
fn test_action_name_normalization() {
    assert_eq!(
        normalize_action("test.some-strangely_separated.words"),
        "testSomeStrangelySeparatedWords"
    );
    assert_eq!(normalize_action("purge-all"), "purgeAll");
    assert_eq!(normalize_action("already_camelCase"), "alreadyCamelCase");
    assert_eq!(normalize_action("Leading"), "leading");
}

#[test]
fn test_identifier_comes_from_route_params_first() {
    let request = RestRequest::new(Method::GET)
        .with_route_param("id", 7)
        .with_query_param("id", "99");
    assert_eq!(extract_identifier(&request, "id"), Some(json!(7)));
}

#[test]
fn test_zero_identifier_counts_as_present() {
    let request = RestRequest::new(Method::GET).with_route_param("id", 0);
    assert_eq!(extract_identifier(&request, "id"), Some(json!(0)));
}

#[test]
fn test_false_route_param_falls_back_to_query() {
    let request = RestRequest::new(Method::GET)
        .with_route_param("name", false)
        .with_query_param("name", "bar");
    assert_eq!(
        extract_identifier(&request, "name"),
        Some(Value::String("bar".to_string()))
    );
}

#[test]
fn test_missing_identifier_everywhere_is_absent() {
    let request = RestRequest::new(Method::GET);
    assert_eq!(extract_identifier(&request, "id"), None);
}

#[test]
fn test_identifier_respects_configured_name() {
    let request = RestRequest::new(Method::GET)
        .with_route_param("id", 1)
        .with_route_param("name", "foo");
    assert_eq!(extract_identifier(&request, "name"), Some(json!("foo")));
}
