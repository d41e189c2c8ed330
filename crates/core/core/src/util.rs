//! Path and query helpers shared by the dispatcher and the resource protocol.

use serde_json::Value;

/// Pluralizes a snake_case resource name (`customer` -> `customers`).
pub fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| name.ends_with(suffix))
    {
        return format!("{}es", name);
    }

    format!("{}s", name)
}

/// Flattens request params into query pairs.
///
/// Nested objects use `key[child]`, arrays use `key[]`, nulls are skipped.
pub fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    if let Value::Object(map) = params {
        for (key, value) in map {
            flatten_into(key.clone(), value, &mut pairs);
        }
    }

    pairs
}

fn flatten_into(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::Array(items) => {
            for item in items {
                flatten_into(format!("{}[]", key), item, pairs);
            }
        }
        Value::Object(map) => {
            for (child, item) in map {
                flatten_into(format!("{}[{}]", key, child), item, pairs);
            }
        }
    }
}

/// Removes the `"{api_version}/"` qualifier from an envelope key.
pub fn strip_api_version<'a>(key: &'a str, api_version: &str) -> &'a str {
    key.strip_prefix(api_version)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("customer"), "customers");
        assert_eq!(pluralize("api_key"), "api_keys");
        assert_eq!(pluralize("currency"), "currencies");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("batch"), "batches");
        assert_eq!(pluralize("payout_request"), "payout_requests");
    }

    #[test]
    fn test_query_pairs() {
        let pairs = query_pairs(&json!({
            "page": 2,
            "status": "approved",
            "skip": null,
            "ids": [1, 2],
            "filter": { "currency": "XOF" }
        }));

        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("status".to_string(), "approved".to_string())));
        assert!(pairs.contains(&("ids[]".to_string(), "1".to_string())));
        assert!(pairs.contains(&("ids[]".to_string(), "2".to_string())));
        assert!(pairs.contains(&("filter[currency]".to_string(), "XOF".to_string())));
        assert!(!pairs.iter().any(|(key, _)| key == "skip"));
    }

    #[test]
    fn test_query_pairs_non_object() {
        assert!(query_pairs(&json!(null)).is_empty());
        assert!(query_pairs(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_strip_api_version() {
        assert_eq!(strip_api_version("v1/customer", "v1"), "customer");
        assert_eq!(strip_api_version("meta", "v1"), "meta");
        assert_eq!(strip_api_version("v2/customer", "v1"), "v2/customer");
        assert_eq!(strip_api_version("v1customer", "v1"), "v1customer");
    }
}
