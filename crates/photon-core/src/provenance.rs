//! Provenance assignment for edit submissions.
//!
//! Each field group is declared once in [`FIELD_GROUPS`] with its member
//! paths and a per-field "touched" predicate. A group whose member was set to
//! a meaningful value in the change set is stamped [`Source::Manual`]. Groups
//! without a meaningful change keep whatever tag they had; this module never
//! demotes a tag.

use serde_json::Value;

use crate::{
  changes::Changes,
  source::{FieldGroup, Source},
};

// ─── Predicates ──────────────────────────────────────────────────────────────

/// Decides whether a changed value counts as a manual edit of its group.
pub type Touched = fn(&Value) -> bool;

/// Non-empty string.
pub fn non_empty_text(value: &Value) -> bool {
  value.as_str().is_some_and(|s| !s.is_empty())
}

/// Number other than zero. Clearing a coordinate to `0` does not count.
pub fn non_zero_number(value: &Value) -> bool {
  value.as_f64().is_some_and(|n| n != 0.0)
}

/// Foreign key other than the unset id `0`.
pub fn non_zero_id(value: &Value) -> bool {
  value.as_u64().is_some_and(|id| id != 0)
}

/// Timestamp present (not `null`, not empty).
pub fn present_timestamp(value: &Value) -> bool {
  non_empty_text(value)
}

// ─── Field table ─────────────────────────────────────────────────────────────

/// A field participating in a group, addressed by its JSON path.
#[derive(Debug, Clone, Copy)]
pub struct Member {
  pub path:    &'static [&'static str],
  pub touched: Touched,
}

const fn member(path: &'static [&'static str], touched: Touched) -> Member {
  Member { path, touched }
}

#[derive(Debug, Clone, Copy)]
pub struct GroupSpec {
  pub group:   FieldGroup,
  pub members: &'static [Member],
}

pub static FIELD_GROUPS: &[GroupSpec] = &[
  GroupSpec {
    group:   FieldGroup::Title,
    members: &[member(&["PhotoTitle"], non_empty_text)],
  },
  GroupSpec {
    group:   FieldGroup::Description,
    members: &[
      member(&["Description", "PhotoDescription"], non_empty_text),
      member(&["Description", "PhotoKeywords"], non_empty_text),
      member(&["Description", "PhotoNotes"], non_empty_text),
      member(&["Description", "PhotoSubject"], non_empty_text),
      member(&["Description", "PhotoArtist"], non_empty_text),
      member(&["Description", "PhotoCopyright"], non_empty_text),
      member(&["Description", "PhotoLicense"], non_empty_text),
    ],
  },
  GroupSpec {
    group:   FieldGroup::Location,
    members: &[
      member(&["PhotoLat"], non_zero_number),
      member(&["PhotoLng"], non_zero_number),
    ],
  },
  GroupSpec {
    group:   FieldGroup::Taken,
    members: &[
      member(&["TakenAt"], present_timestamp),
      member(&["TimeZone"], non_empty_text),
    ],
  },
  GroupSpec {
    group:   FieldGroup::Camera,
    members: &[
      member(&["CameraID"], non_zero_id),
      member(&["LensID"], non_zero_id),
      member(&["PhotoFocalLength"], non_zero_number),
      member(&["PhotoFNumber"], non_zero_number),
      member(&["PhotoIso"], non_zero_number),
      member(&["PhotoExposure"], non_empty_text),
    ],
  },
];

impl GroupSpec {
  pub fn is_touched(&self, changes: &Changes) -> bool {
    self.members.iter().any(|m| {
      changes.get_path(m.path).is_some_and(|value| (m.touched)(value))
    })
  }
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// Groups with a meaningful change in `changes`, in table order.
pub fn touched_groups(changes: &Changes) -> Vec<FieldGroup> {
  FIELD_GROUPS
    .iter()
    .filter(|spec| spec.is_touched(changes))
    .map(|spec| spec.group)
    .collect()
}

/// Stamp every touched group's source field with [`Source::Manual`].
pub fn assign_provenance(mut changes: Changes) -> Changes {
  for group in touched_groups(&changes) {
    changes.insert(
      group.source_field(),
      Value::String(Source::Manual.as_str().to_string()),
    );
  }
  changes
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn changes(value: Value) -> Changes {
    match value {
      Value::Object(map) => Changes::from(map),
      _ => panic!("expected object"),
    }
  }

  fn sources(c: &Changes) -> Vec<&str> {
    FieldGroup::ALL
      .iter()
      .map(|g| g.source_field())
      .filter(|f| c.get(f).is_some())
      .collect()
  }

  #[test]
  fn title_only() {
    let out = assign_provenance(changes(json!({"PhotoTitle": "Sunset"})));
    assert_eq!(out.get("TitleSrc"), Some(&json!("manual")));
    assert_eq!(sources(&out), vec!["TitleSrc"]);
    assert_eq!(out.get("PhotoTitle"), Some(&json!("Sunset")));
  }

  #[test]
  fn zero_coordinates_do_not_touch_location() {
    let out =
      assign_provenance(changes(json!({"PhotoLat": 0, "PhotoLng": 0.0})));
    assert!(out.get("LocationSrc").is_none());
    assert_eq!(out.len(), 2);
  }

  #[test]
  fn one_coordinate_is_enough() {
    let out =
      assign_provenance(changes(json!({"PhotoLat": 0, "PhotoLng": 13.4})));
    assert_eq!(out.get("LocationSrc"), Some(&json!("manual")));
  }

  #[test]
  fn empty_change_set_stays_empty() {
    assert!(assign_provenance(Changes::new()).is_empty());
  }

  #[test]
  fn cleared_title_is_not_manual() {
    let out = assign_provenance(changes(json!({"PhotoTitle": ""})));
    assert!(out.get("TitleSrc").is_none());
  }

  #[test]
  fn nested_description_member() {
    let out = assign_provenance(changes(
      json!({"Description": {"PhotoCopyright": "CC-BY"}}),
    ));
    assert_eq!(sources(&out), vec!["DescriptionSrc"]);

    let out =
      assign_provenance(changes(json!({"Description": {"PhotoNotes": ""}})));
    assert!(out.get("DescriptionSrc").is_none());
  }

  #[test]
  fn time_and_camera_groups() {
    let out = assign_provenance(changes(json!({
      "TimeZone": "Europe/Berlin",
      "PhotoIso": 200,
      "LensID": 0
    })));
    assert_eq!(sources(&out), vec!["TakenSrc", "CameraSrc"]);

    let out = assign_provenance(changes(json!({
      "TakenAt": "2020-05-01T10:00:00Z"
    })));
    assert_eq!(sources(&out), vec!["TakenSrc"]);

    let out = assign_provenance(changes(json!({"TakenAt": null, "CameraID": 0})));
    assert!(sources(&out).is_empty());
  }

  #[test]
  fn every_group_at_once() {
    let out = assign_provenance(changes(json!({
      "PhotoTitle": "t",
      "Description": {"PhotoKeywords": "k"},
      "PhotoLng": -3.7,
      "TakenAt": "2021-01-01T00:00:00Z",
      "PhotoExposure": "1/250"
    })));
    assert_eq!(sources(&out), vec![
      "TitleSrc",
      "DescriptionSrc",
      "LocationSrc",
      "TakenSrc",
      "CameraSrc",
    ]);
  }

  #[test]
  fn unrelated_fields_touch_nothing() {
    let out = assign_provenance(changes(json!({
      "PhotoFavorite": true,
      "PhotoPrivate": true
    })));
    assert!(sources(&out).is_empty());
  }
}
