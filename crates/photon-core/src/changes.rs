//! Change sets — the fields an edit actually modified.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result, photo::Photo};

/// Mapping from JSON field name to new value, as sent in a save request.
///
/// Nested records (e.g. `Description`) carry only their changed members. A
/// field present before the edit and absent after it is sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Changes(Map<String, Value>);

impl Changes {
  pub fn new() -> Self { Self::default() }

  /// Diff two photos by their serialized form.
  pub fn between(original: &Photo, edited: &Photo) -> Result<Self> {
    let before = to_object(original)?;
    let after = to_object(edited)?;
    Ok(Self(diff_objects(&before, &after)))
  }

  pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }

  /// Look up a value by path, e.g. `["Description", "PhotoNotes"]`.
  pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
    let (first, rest) = path.split_first()?;
    rest
      .iter()
      .try_fold(self.0.get(*first)?, |value, key| value.get(key))
  }

  pub fn insert(&mut self, field: impl Into<String>, value: Value) {
    self.0.insert(field.into(), value);
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn into_inner(self) -> Map<String, Value> { self.0 }
}

impl From<Map<String, Value>> for Changes {
  fn from(map: Map<String, Value>) -> Self { Self(map) }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
  match serde_json::to_value(value)? {
    Value::Object(map) => Ok(map),
    other => Err(Error::InvalidData(format!(
      "expected a JSON object to diff, got {other}"
    ))),
  }
}

fn diff_objects(
  before: &Map<String, Value>,
  after: &Map<String, Value>,
) -> Map<String, Value> {
  let mut out = Map::new();
  for (key, new) in after {
    match (before.get(key), new) {
      (Some(old), _) if old == new => {}
      (Some(Value::Object(old)), Value::Object(new)) => {
        let nested = diff_objects(old, new);
        if !nested.is_empty() {
          out.insert(key.clone(), Value::Object(nested));
        }
      }
      _ => {
        out.insert(key.clone(), new.clone());
      }
    }
  }
  for key in before.keys() {
    if !after.contains_key(key) {
      out.insert(key.clone(), Value::Null);
    }
  }
  out
}
