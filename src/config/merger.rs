//! Deep merge for configuration records.
//!
//! A configuration is layered from the project file, the program flags and
//! the command overrides; later layers win.
//!
//! # Merge Rules
//!
//! - Objects are merged recursively
//! - Arrays are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_json::{Map, Value};

/// Deep merge two configuration records.
///
/// Neither input is modified; a new value is returned.
///
/// # Arguments
///
/// * `base` - The base configuration
/// * `overlay` - The overlay configuration (takes precedence)
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Object(result)
        }

        // Overlay is not an object, or base is not an object: overlay wins
        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple records in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Object(Map::new()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_replaces_at_conflict_point() {
        let base = json!({
            "output": { "path": "public", "publicPath": "/public/" }
        });
        let overlay = json!({ "output": { "path": "dist" } });

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["output"]["path"], "dist");
        assert_eq!(result["output"]["publicPath"], "/public/");
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let base = json!({ "type": ["web", "node"] });
        let overlay = json!({ "type": ["web"] });

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["type"], json!(["web"]));
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = json!({ "devtool": "eval", "port": 9000 });
        let overlay = json!({ "devtool": null });

        let result = deep_merge(&base, &overlay);

        assert!(result.get("devtool").is_none());
        assert_eq!(result["port"], 9000);
    }

    #[test]
    fn scalar_overlay_replaces_object_base() {
        let base = json!({ "install": { "check": true } });
        let overlay = json!({ "install": false });

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["install"], false);
    }

    #[test]
    fn merge_configs_merges_multiple_in_order() {
        let configs = vec![
            json!({ "a": 1, "b": 2 }),
            json!({ "b": 3, "c": 4 }),
            json!({ "c": 5 }),
        ];

        let result = merge_configs(&configs);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let base = json!({ "env": "dev" });
        let overlay = json!({ "env": "prod" });

        let _ = deep_merge(&base, &overlay);

        assert_eq!(base["env"], "dev");
        assert_eq!(overlay["env"], "prod");
    }

    #[test]
    fn merge_empty_configs_returns_empty() {
        let result = merge_configs(&[]);
        assert!(result.as_object().unwrap().is_empty());
    }
}
