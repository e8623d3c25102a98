//! Edit flow tests against an in-memory `PhotoApi`.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, Ordering},
};

use serde_json::{Map, Value, json};

use crate::{
  Error,
  api::PhotoApi,
  changes::Changes,
  draft::Draft,
  fit::Size,
  photo::{Label, Photo, PhotoLabel},
  source::{FieldGroup, Source},
};

// ─── Fake server ─────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("fake server unavailable")]
struct Unavailable;

/// Holds one photo as JSON and records every request body it receives.
struct FakeApi {
  stored:   Mutex<Value>,
  requests: Mutex<Vec<(String, Value)>>,
  failing:  AtomicBool,
}

impl FakeApi {
  fn new(stored: Value) -> Self {
    Self {
      stored:   Mutex::new(stored),
      requests: Mutex::new(Vec::new()),
      failing:  AtomicBool::new(false),
    }
  }

  fn fail(&self) { self.failing.store(true, Ordering::SeqCst); }

  fn requests(&self) -> Vec<(String, Value)> {
    self.requests.lock().unwrap().clone()
  }

  fn handle(
    &self,
    request: &str,
    body: Value,
    apply: impl FnOnce(&mut Map<String, Value>),
  ) -> Result<Photo, Unavailable> {
    self
      .requests
      .lock()
      .unwrap()
      .push((request.to_string(), body));
    if self.failing.load(Ordering::SeqCst) {
      return Err(Unavailable);
    }
    let mut stored = self.stored.lock().unwrap();
    if let Value::Object(map) = &mut *stored {
      apply(map);
    }
    Ok(serde_json::from_value(stored.clone()).unwrap())
  }
}

fn merge(target: &mut Map<String, Value>, changes: &Map<String, Value>) {
  for (key, value) in changes {
    match (target.get_mut(key), value) {
      (Some(Value::Object(old)), Value::Object(new)) => merge(old, new),
      _ => {
        target.insert(key.clone(), value.clone());
      }
    }
  }
}

impl PhotoApi for FakeApi {
  type Error = Unavailable;

  async fn get_photo(&self, uid: &str) -> Result<Photo, Unavailable> {
    self.handle(&format!("GET {uid}"), Value::Null, |_| {})
  }

  async fn update_photo(
    &self,
    uid: &str,
    changes: &Changes,
  ) -> Result<Photo, Unavailable> {
    let body = serde_json::to_value(changes).unwrap();
    let patch = changes.clone().into_inner();
    self.handle(&format!("PUT {uid}"), body, |map| merge(map, &patch))
  }

  async fn like(&self, uid: &str) -> Result<(), Unavailable> {
    self
      .handle(&format!("POST {uid}/like"), Value::Null, |map| {
        map.insert("PhotoFavorite".into(), json!(true));
      })
      .map(|_| ())
  }

  async fn unlike(&self, uid: &str) -> Result<(), Unavailable> {
    self
      .handle(&format!("DELETE {uid}/like"), Value::Null, |map| {
        map.insert("PhotoFavorite".into(), json!(false));
      })
      .map(|_| ())
  }

  async fn add_label(
    &self,
    uid: &str,
    name: &str,
    priority: i32,
  ) -> Result<Photo, Unavailable> {
    let body = json!({"LabelName": name, "LabelPriority": priority});
    let label = json!({
      "LabelID": 7,
      "Uncertainty": 0,
      "LabelSrc": "manual",
      "Label": {"ID": 7, "LabelName": name, "LabelPriority": priority}
    });
    self.handle(&format!("POST {uid}/label"), body, |map| {
      if let Some(Value::Array(labels)) = map.get_mut("Labels") {
        labels.push(label);
      } else {
        map.insert("Labels".into(), json!([label]));
      }
    })
  }

  async fn activate_label(
    &self,
    uid: &str,
    label_id: u64,
  ) -> Result<Photo, Unavailable> {
    let body = json!({"Uncertainty": 0});
    self.handle(&format!("PUT {uid}/label/{label_id}"), body, |map| {
      with_label(map, label_id, |l| {
        l.insert("Uncertainty".into(), json!(0));
      })
    })
  }

  async fn rename_label(
    &self,
    uid: &str,
    label_id: u64,
    name: &str,
  ) -> Result<Photo, Unavailable> {
    let body = json!({"Label": {"LabelName": name}});
    self.handle(&format!("PUT {uid}/label/{label_id}"), body, |map| {
      with_label(map, label_id, |l| {
        if let Some(Value::Object(inner)) = l.get_mut("Label") {
          inner.insert("LabelName".into(), json!(name));
        }
      })
    })
  }

  async fn remove_label(
    &self,
    uid: &str,
    label_id: u64,
  ) -> Result<Photo, Unavailable> {
    self.handle(&format!("DELETE {uid}/label/{label_id}"), Value::Null, |map| {
      if let Some(Value::Array(labels)) = map.get_mut("Labels") {
        labels.retain(|l| l.get("LabelID") != Some(&json!(label_id)));
      }
    })
  }
}

fn with_label(
  map: &mut Map<String, Value>,
  label_id: u64,
  f: impl FnOnce(&mut Map<String, Value>),
) {
  let Some(Value::Array(labels)) = map.get_mut("Labels") else {
    return;
  };
  if let Some(Value::Object(l)) = labels
    .iter_mut()
    .find(|l| l.get("LabelID") == Some(&json!(label_id)))
  {
    f(l);
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn stored_photo() -> Value {
  json!({
    "ID": 42,
    "PhotoUUID": "pq1",
    "PhotoTitle": "Untitled",
    "TitleSrc": "image",
    "LocationSrc": "exif",
    "TakenSrc": "exif",
    "CameraSrc": "exif",
    "DescriptionSrc": "xmp",
    "PhotoLat": 48.1,
    "PhotoLng": 11.5,
    "Description": {"PhotoNotes": "", "PhotoArtist": "Jane"},
    "Files": [
      {"FileHash": "raw", "FilePrimary": false, "FileWidth": 6000, "FileHeight": 4000},
      {"FileHash": "jpg", "FilePrimary": true, "FileWidth": 4000, "FileHeight": 3000}
    ],
    "Labels": [
      {"LabelID": 3, "Uncertainty": 40, "LabelSrc": "image",
       "Label": {"ID": 3, "LabelName": "beach", "LabelPriority": 0}}
    ]
  })
}

fn draft() -> Draft { Draft::new(Photo::from_json(stored_photo()).unwrap()).unwrap() }

// ─── Save ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_title_marks_only_title_manual() {
  let api = FakeApi::new(stored_photo());
  let mut d = draft();
  d.photo_mut().photo_title = "Sunset".into();

  d.save(&api).await.unwrap();

  let requests = api.requests();
  assert_eq!(requests.len(), 1);
  assert_eq!(requests[0].0, "PUT pq1");
  assert_eq!(
    requests[0].1,
    json!({"PhotoTitle": "Sunset", "TitleSrc": "manual"})
  );

  let p = d.photo();
  assert_eq!(p.photo_title, "Sunset");
  assert_eq!(p.source(FieldGroup::Title), Source::Manual);
  assert_eq!(p.source(FieldGroup::Description), Source::Xmp);
  assert_eq!(p.source(FieldGroup::Location), Source::Exif);
  assert_eq!(p.source(FieldGroup::Taken), Source::Exif);
  assert_eq!(p.source(FieldGroup::Camera), Source::Exif);
  assert!(!d.is_dirty().unwrap());
}

#[tokio::test]
async fn save_zeroed_coordinates_keeps_location_source() {
  let api = FakeApi::new(stored_photo());
  let mut d = draft();
  d.photo_mut().photo_lat = 0.0;
  d.photo_mut().photo_lng = 0.0;

  d.save(&api).await.unwrap();

  assert_eq!(
    api.requests()[0].1,
    json!({"PhotoLat": 0.0, "PhotoLng": 0.0})
  );
  assert_eq!(d.photo().location_src, Source::Exif);
  assert!(!d.photo().has_location());
}

#[tokio::test]
async fn save_description_member_sends_nested_change() {
  let api = FakeApi::new(stored_photo());
  let mut d = draft();
  d.photo_mut().description.photo_notes = "shot on film".into();

  d.save(&api).await.unwrap();

  assert_eq!(
    api.requests()[0].1,
    json!({
      "Description": {"PhotoNotes": "shot on film"},
      "DescriptionSrc": "manual"
    })
  );
  assert_eq!(d.photo().description.photo_artist, "Jane");
  assert_eq!(d.photo().description_src, Source::Manual);
}

#[tokio::test]
async fn save_failure_leaves_draft_untouched() {
  let api = FakeApi::new(stored_photo());
  api.fail();
  let mut d = draft();
  d.photo_mut().photo_title = "Sunset".into();
  let before = d.clone();

  let err = d.save(&api).await.unwrap_err();
  assert!(matches!(err, Error::Remote(_)));
  assert_eq!(d.photo(), before.photo());
  assert_eq!(d.saved(), before.saved());
  assert!(d.is_dirty().unwrap());
}

#[tokio::test]
async fn adopted_response_refreshes_display_attributes() {
  let mut stored = stored_photo();
  stored["Files"][0]["FilePrimary"] = json!(true);
  stored["Files"][1]["FilePrimary"] = json!(false);
  let api = FakeApi::new(stored);
  let mut d = draft();
  assert_eq!(d.photo().file_hash(), "jpg");

  d.reload(&api).await.unwrap();
  assert_eq!(d.photo().file_hash(), "raw");
  assert_eq!(d.photo().file_size(), Size::new(6000, 4000));
  assert_eq!(d.saved().file_hash(), "raw");
}

#[tokio::test]
async fn response_with_null_files_keeps_display_attributes() {
  let mut stored = stored_photo();
  stored["Files"] = Value::Null;
  stored["Labels"] = Value::Null;
  let api = FakeApi::new(stored);
  let mut d = draft();

  d.reload(&api).await.unwrap();
  assert!(d.photo().files.is_empty());
  assert_eq!(d.photo().file_hash(), "jpg");
  assert_eq!(d.photo().file_size(), Size::new(4000, 3000));
  assert_eq!(d.saved().file_hash(), "jpg");
  assert!(!d.is_dirty().unwrap());
}

#[tokio::test]
async fn ambiguous_primary_in_response_is_rejected() {
  let mut stored = stored_photo();
  stored["Files"][0]["FilePrimary"] = json!(true);
  let api = FakeApi::new(stored);
  let mut d = draft();

  let err = d.reload(&api).await.unwrap_err();
  assert!(matches!(err, Error::InvalidData(_)));
  assert_eq!(d.photo().file_hash(), "jpg");
}

#[test]
fn draft_rejects_ambiguous_primary() {
  let mut p = Photo::default();
  p.files = vec![
    crate::file::File { file_primary: true, ..Default::default() },
    crate::file::File { file_primary: true, ..Default::default() },
  ];
  assert!(matches!(Draft::new(p), Err(Error::InvalidData(_))));
}

#[test]
fn outgoing_excludes_derived_attributes() {
  let mut d = draft();
  d.photo_mut().files[0].file_primary = true;
  d.photo_mut().files[1].file_primary = false;
  d.photo_mut().refresh_file_attr();

  let out = d.outgoing().unwrap();
  assert!(out.get("FileHash").is_none());
  assert!(out.get("Files").is_some());
}

// ─── Likes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_like_round_trip() {
  let api = FakeApi::new(stored_photo());
  let mut d = draft();

  d.toggle_like(&api).await.unwrap();
  assert!(d.photo().photo_favorite);
  d.toggle_like(&api).await.unwrap();
  assert!(!d.photo().photo_favorite);

  let kinds: Vec<_> = api.requests().into_iter().map(|(r, _)| r).collect();
  assert_eq!(kinds, vec!["POST pq1/like", "DELETE pq1/like"]);
  assert!(!d.is_dirty().unwrap());
}

#[tokio::test]
async fn failed_like_is_reverted() {
  let api = FakeApi::new(stored_photo());
  api.fail();
  let mut d = draft();

  assert!(d.like(&api).await.is_err());
  assert!(!d.photo().photo_favorite);
  assert!(!d.saved().photo_favorite);
}

// ─── Labels ──────────────────────────────────────────────────────────────────

fn label_names(p: &Photo) -> Vec<(u64, i32, String)> {
  p.labels
    .iter()
    .map(|PhotoLabel { label_id, uncertainty, label, .. }| {
      let name = label.as_ref().map(|l: &Label| l.label_name.clone());
      (*label_id, *uncertainty, name.unwrap_or_default())
    })
    .collect()
}

#[tokio::test]
async fn label_operations_adopt_response() {
  let api = FakeApi::new(stored_photo());
  let mut d = draft();

  d.add_label(&api, "sunset").await.unwrap();
  assert_eq!(label_names(d.photo()), vec![
    (3, 40, "beach".to_string()),
    (7, 0, "sunset".to_string()),
  ]);

  d.activate_label(&api, 3).await.unwrap();
  d.rename_label(&api, 3, "shore").await.unwrap();
  assert_eq!(label_names(d.photo())[0], (3, 0, "shore".to_string()));

  d.remove_label(&api, 7).await.unwrap();
  assert_eq!(label_names(d.photo()).len(), 1);

  let requests = api.requests();
  assert_eq!(requests[0], (
    "POST pq1/label".to_string(),
    json!({"LabelName": "sunset", "LabelPriority": 10})
  ));
  assert_eq!(requests[1].1, json!({"Uncertainty": 0}));
  assert_eq!(requests[2].1, json!({"Label": {"LabelName": "shore"}}));
  assert_eq!(requests[3].0, "DELETE pq1/label/7");
}

#[tokio::test]
async fn label_failure_propagates() {
  let api = FakeApi::new(stored_photo());
  api.fail();
  let mut d = draft();

  let err = d.add_label(&api, "sunset").await.unwrap_err();
  assert!(matches!(err, Error::Remote(_)));
  assert_eq!(label_names(d.photo()).len(), 1);
}
