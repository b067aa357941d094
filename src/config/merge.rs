//! Deep merge for extension settings.
//!
//! Project values override global values field-by-field.
//! Arrays are replaced entirely, not concatenated.

use serde_json::{Map, Value};

/// Deep merge two settings objects, with `overrides` taking precedence over `base`.
///
/// - Nested objects are merged recursively
/// - Arrays, strings, numbers, booleans and nulls in `overrides` replace the base value
/// - Keys present only in `base` are kept, keys present only in `overrides` are added
///
/// # Example
/// ```
/// use serde_json::{json, Value};
/// use pi_extension_settings::config::deep_merge;
///
/// let Value::Object(base) = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// }) else { unreachable!() };
/// let Value::Object(overrides) = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// }) else { unreachable!() };
///
/// let merged = deep_merge(base, overrides);
/// assert_eq!(
///     Value::Object(merged),
///     json!({ "server": { "port": 9000, "host": "localhost" }, "features": ["c"] })
/// );
/// ```
pub fn deep_merge(mut base: Map<String, Value>, overrides: Map<String, Value>) -> Map<String, Value> {
    for (key, override_value) in overrides {
        let merged_value = match (base.remove(&key), override_value) {
            (Some(Value::Object(base_map)), Value::Object(override_map)) => {
                Value::Object(deep_merge(base_map, override_map))
            }
            (_, override_value) => override_value,
        };
        base.insert(key, merged_value);
    }
    base
}

/// Deep merge two untyped values, with `overlay` taking precedence over `base`.
///
/// Two objects are merged with [`deep_merge`]; in every other case the overlay
/// replaces the base.
pub fn deep_merge_value(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(deep_merge(base_map, overlay_map))
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn merge(base: Value, overrides: Value) -> Value {
        Value::Object(deep_merge(obj(base), obj(overrides)))
    }

    #[test]
    fn test_merge_simple_objects() {
        let result = merge(json!({"a": 1, "b": 2}), json!({"b": 3, "c": 4}));
        assert_eq!(result, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_merge_nested_objects() {
        let result = merge(
            json!({"a": {"x": 1, "y": 2}}),
            json!({"a": {"y": 3}}),
        );
        assert_eq!(result, json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn test_arrays_replaced_not_merged() {
        let result = merge(json!({"a": [1, 2]}), json!({"a": [3]}));
        assert_eq!(result, json!({"a": [3]}));
    }

    #[test]
    fn test_null_override_replaces_base() {
        let result = merge(json!({"a": 1, "b": {"c": 2}}), json!({"a": null, "b": {"c": null}}));
        assert_eq!(result, json!({"a": null, "b": {"c": null}}));
    }

    #[test]
    fn test_null_base_replaced_by_object() {
        let result = merge(json!({"a": null}), json!({"a": {"x": 1}}));
        assert_eq!(result, json!({"a": {"x": 1}}));
    }

    #[test]
    fn test_deep_nested_merge() {
        let result = merge(
            json!({"level1": {"level2": {"level3": {"a": 1, "b": 2}}}}),
            json!({"level1": {"level2": {"level3": {"b": 3, "c": 4}}}}),
        );
        assert_eq!(
            result,
            json!({"level1": {"level2": {"level3": {"a": 1, "b": 3, "c": 4}}}})
        );
    }

    #[test]
    fn test_overlay_replaces_primitive_with_object() {
        let result = merge(json!({"value": 42}), json!({"value": {"nested": true}}));
        assert_eq!(result, json!({"value": {"nested": true}}));
    }

    #[test]
    fn test_overlay_replaces_object_with_primitive() {
        let result = merge(json!({"value": {"nested": true}}), json!({"value": 42}));
        assert_eq!(result, json!({"value": 42}));
    }

    #[test]
    fn test_object_replaced_by_array() {
        let result = merge(json!({"value": {"a": 1}}), json!({"value": [1]}));
        assert_eq!(result, json!({"value": [1]}));
    }

    #[test]
    fn test_empty_overrides_keep_base() {
        let base = json!({"timeout": 30, "nested": {"a": 1}});
        assert_eq!(merge(base.clone(), json!({})), base);
    }

    #[test]
    fn test_empty_base_takes_overrides() {
        let overrides = json!({"debug": true, "list": [1, 2]});
        assert_eq!(merge(json!({}), overrides.clone()), overrides);
    }

    #[test]
    fn test_merge_value_non_objects() {
        assert_eq!(deep_merge_value(json!({"a": 1}), json!([1])), json!([1]));
        assert_eq!(deep_merge_value(json!(1), json!({"a": 1})), json!({"a": 1}));
        assert_eq!(
            deep_merge_value(json!({"a": {"b": 1}}), json!({"a": {"c": 2}})),
            json!({"a": {"b": 1, "c": 2}})
        );
    }
}
