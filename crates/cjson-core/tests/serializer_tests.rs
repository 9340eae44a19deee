use cjson_core::{to_string_compact, Indent, Json, JsonError, Layout, Serializer};

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn serialize_null_default() {
    let json = Json::new();
    assert!(json.is_null());
    assert_eq!(json.serialize(), "null");
}

#[test]
fn serialize_after_assignment() {
    let mut json = Json::new();

    json.set(true);
    assert!(json.is_bool());
    assert_eq!(json.serialize(), "true");

    json.set(false);
    assert_eq!(json.serialize(), "false");

    json.set(3);
    assert!(json.is_number());
    assert_eq!(json.serialize(), "3");

    json.set("3");
    assert!(json.is_string());
    assert_eq!(json.serialize(), "\"3\"");
}

#[test]
fn empty_string_is_not_null() {
    let json = Json::from("");
    assert!(json.is_string());
    assert_eq!(json.serialize(), "\"\"");
}

#[test]
fn serialize_into_matches_serialize() {
    let json = Json::from(vec![Json::from("a"), Json::from(1.5)]);
    let mut out = String::new();
    json.serialize_into(&mut out).unwrap();
    assert_eq!(out, json.serialize());
}

#[test]
fn display_matches_serialize() {
    let json: Json = [("k", Json::from([1, 2]))].into_iter().collect();
    assert_eq!(json.to_string(), json.serialize());
    assert_eq!(format!("{json}"), "{\n\t\"k\": [\n\t\t1,\n\t\t2\n\t]\n}");
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn two_level_object() {
    let mut json = Json::new();
    json["on"] = true.into();
    assert_eq!(json.serialize(), "{\n\t\"on\": true\n}");
}

#[test]
fn array_after_push() {
    let mut json = Json::new_array();
    json.push(3).unwrap();
    assert_eq!(json.serialize(), "[\n\t3\n]");
}

#[test]
fn objects_serialize_in_key_order() {
    let mut json = Json::new();
    json["zeta"] = 1.into();
    json["alpha"] = 2.into();
    json["mid"] = 3.into();
    assert_eq!(
        json.serialize(),
        "{\n\t\"alpha\": 2,\n\t\"mid\": 3,\n\t\"zeta\": 1\n}"
    );
}

#[test]
fn nested_indentation_grows_by_one_unit() {
    let json = Json::from(vec![Json::from(vec![Json::from(vec![Json::Null])])]);
    assert_eq!(json.serialize(), "[\n\t[\n\t\t[\n\t\t\tnull\n\t\t]\n\t]\n]");
}

#[test]
fn four_space_indent() {
    let mut json = Json::new();
    json["list"] = Json::from([1]);
    let text = Serializer::new(Layout::Indented(Indent::Spaces(4)))
        .serialize(&json)
        .unwrap();
    assert_eq!(text, "{\n    \"list\": [\n        1\n    ]\n}");
}

#[test]
fn compact_output_is_single_line() {
    let json: Json = [
        ("b", Json::from(vec![Json::from(true), Json::Null])),
        ("a", Json::from("x y")),
    ]
    .into_iter()
    .collect();
    let text = to_string_compact(&json).unwrap();
    assert_eq!(text, r#"{"a":"x y","b":[true,null]}"#);
    assert!(!text.contains('\n'));
}

#[test]
fn serializing_does_not_mutate() {
    let json: Json = r#"{"a": [1, 2.5, "s"], "b": {}}"#.parse().unwrap();
    let before = json.clone();
    let _ = json.serialize();
    let _ = to_string_compact(&json);
    assert_eq!(json, before);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn unrepresentable_value_serializes_to_empty_text() {
    let mut json = Json::new_object();
    json["bad"] = f64::NAN.into();
    assert_eq!(json.serialize(), "");
    assert!(matches!(json.try_serialize(), Err(JsonError::Serialize(_))));
}

#[test]
fn display_renders_unrepresentable_value_as_empty_text() {
    let mut json = Json::new_object();
    json["bad"] = f64::NAN.into();
    assert_eq!(json.to_string(), "");
    assert_eq!(format!("[{json}]"), "[]");
    assert_eq!(Json::from(f64::NAN).to_string(), "");
    assert_eq!(Json::from(f64::INFINITY).to_string(), "");
}
