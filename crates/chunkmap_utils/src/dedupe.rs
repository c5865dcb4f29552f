use std::collections::BTreeSet;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Removes structurally equal records and orders the rest by their canonical JSON form.
///
/// The output only depends on the content of `items`, never on their order, so two sessions
/// producing the same records emit byte-identical manifests. Keys are sorted before comparing,
/// so `{type, file}` records come out ordered by file rather than grouped by type.
pub fn dedupe<T>(items: impl IntoIterator<Item = T>) -> anyhow::Result<Vec<T>>
where
  T: Serialize + DeserializeOwned,
{
  let mut canonical = BTreeSet::new();
  for item in items {
    canonical.insert(canonical_json(&item)?);
  }

  canonical.iter().map(|json| serde_json::from_str(json).map_err(Into::into)).collect()
}

/// Serializes `value` with object keys sorted at every depth.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
  Ok(sort_keys(serde_json::to_value(value)?).to_string())
}

fn sort_keys(value: Value) -> Value {
  match value {
    Value::Object(map) => {
      let mut entries = map.into_iter().collect::<Vec<_>>();
      entries.sort_by(|(a, _), (b, _)| a.cmp(b));
      Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect::<Map<_, _>>())
    }
    Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use serde::{Deserialize, Serialize};

  use super::{canonical_json, dedupe};

  #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
  struct Record {
    r#type: String,
    file: String,
  }

  fn record(r#type: &str, file: &str) -> Record {
    Record { r#type: r#type.to_string(), file: file.to_string() }
  }

  #[test]
  fn removes_duplicates_and_sorts() {
    let deduped = dedupe(vec![
      record("module", "b.js"),
      record("style", "a.css"),
      record("module", "b.js"),
    ])
    .unwrap();
    assert_eq!(deduped, vec![record("style", "a.css"), record("module", "b.js")]);
  }

  #[test]
  fn order_independent_and_idempotent() {
    let items = vec![record("module", "x.js"), record("script", "y.js"), record("style", "z.css")];
    let mut reversed = items.clone();
    reversed.reverse();

    let a = dedupe(items).unwrap();
    let b = dedupe(reversed).unwrap();
    assert_eq!(a, b);
    assert_eq!(dedupe(a.clone()).unwrap(), a);
  }

  #[test]
  fn canonical_form_sorts_nested_keys() {
    let value = serde_json::json!({ "z": 1, "a": { "d": [ { "c": null, "b": true } ], "a": "s" } });
    assert_eq!(canonical_json(&value).unwrap(), r#"{"a":{"a":"s","d":[{"b":true,"c":null}]},"z":1}"#);
  }

  #[test]
  fn works_on_arbitrary_json() {
    let deduped = dedupe(vec![
      serde_json::json!({ "b": 1, "a": 2 }),
      serde_json::json!({ "a": 2, "b": 1 }),
      serde_json::json!(null),
    ])
    .unwrap();
    assert_eq!(deduped, vec![serde_json::json!(null), serde_json::json!({ "a": 2, "b": 1 })]);
  }
}
