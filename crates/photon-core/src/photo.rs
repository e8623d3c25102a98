//! The photo entity and its display helpers.
//!
//! `Photo` mirrors the server's JSON representation field for field. The
//! display attributes `FileHash`, `FileWidth` and `FileHeight` are derived
//! from the primary file and are never sent back to the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  de::nullable,
  file::{self, File},
  fit::{Size, fit_size},
  responsive::ThumbnailLadder,
  source::{FieldGroup, Source},
  urls,
};

pub type PhotoUid = String;

// ─── Nested records ──────────────────────────────────────────────────────────

/// Free-text metadata owned by the photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Description {
  #[serde(deserialize_with = "nullable")]
  pub photo_description: String,
  #[serde(deserialize_with = "nullable")]
  pub photo_keywords:    String,
  #[serde(deserialize_with = "nullable")]
  pub photo_notes:       String,
  #[serde(deserialize_with = "nullable")]
  pub photo_subject:     String,
  #[serde(deserialize_with = "nullable")]
  pub photo_artist:      String,
  #[serde(deserialize_with = "nullable")]
  pub photo_copyright:   String,
  #[serde(deserialize_with = "nullable")]
  pub photo_license:     String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Camera {
  #[serde(deserialize_with = "nullable")]
  pub camera_make:  String,
  #[serde(deserialize_with = "nullable")]
  pub camera_model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Lens {
  #[serde(deserialize_with = "nullable")]
  pub lens_make:  String,
  #[serde(deserialize_with = "nullable")]
  pub lens_model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Label {
  #[serde(rename = "ID")]
  pub id:             u64,
  #[serde(rename = "LabelUID", deserialize_with = "nullable")]
  pub label_uid:      String,
  #[serde(deserialize_with = "nullable")]
  pub label_name:     String,
  pub label_priority: i32,
}

/// A label attached to a photo, with the classifier's uncertainty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PhotoLabel {
  #[serde(rename = "LabelID")]
  pub label_id:    u64,
  /// Percent; 0 means the label was confirmed by a user.
  pub uncertainty: i32,
  #[serde(deserialize_with = "nullable")]
  pub label_src:   String,
  pub label:       Option<Label>,
}

// ─── Photo ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Photo {
  /// Internal row id; the stable identity is [`Photo::uid`].
  #[serde(rename = "ID")]
  pub id:                 u64,
  #[serde(
    rename = "PhotoUUID",
    alias = "PhotoUID",
    deserialize_with = "nullable"
  )]
  pub uid:                PhotoUid,
  pub taken_at:           Option<DateTime<Utc>>,
  pub taken_at_local:     Option<DateTime<Utc>>,
  #[serde(deserialize_with = "nullable")]
  pub taken_src:          Source,
  #[serde(deserialize_with = "nullable")]
  pub time_zone:          String,
  #[serde(deserialize_with = "nullable")]
  pub photo_path:         String,
  #[serde(deserialize_with = "nullable")]
  pub photo_name:         String,
  #[serde(deserialize_with = "nullable")]
  pub photo_title:        String,
  #[serde(deserialize_with = "nullable")]
  pub title_src:          Source,
  pub photo_favorite:     bool,
  pub photo_private:      bool,
  #[serde(rename = "PhotoNSFW")]
  pub photo_nsfw:         bool,
  pub photo_story:        bool,
  pub photo_review:       bool,
  pub photo_lat:          f64,
  pub photo_lng:          f64,
  pub photo_altitude:     i32,
  pub photo_iso:          u32,
  pub photo_focal_length: u32,
  pub photo_f_number:     f64,
  #[serde(deserialize_with = "nullable")]
  pub photo_exposure:     String,
  pub photo_views:        u32,
  #[serde(deserialize_with = "nullable")]
  pub photo_color:        String,
  pub camera:             Option<Camera>,
  #[serde(rename = "CameraID")]
  pub camera_id:          u64,
  #[serde(deserialize_with = "nullable")]
  pub camera_src:         Source,
  /// Flat camera names as returned by search results.
  #[serde(deserialize_with = "nullable")]
  pub camera_make:        String,
  #[serde(deserialize_with = "nullable")]
  pub camera_model:       String,
  pub lens:               Option<Lens>,
  #[serde(rename = "LensID")]
  pub lens_id:            u64,
  pub location:           Option<serde_json::Value>,
  #[serde(rename = "LocationID", deserialize_with = "nullable")]
  pub location_id:        String,
  #[serde(deserialize_with = "nullable")]
  pub location_src:       Source,
  #[serde(deserialize_with = "nullable")]
  pub loc_label:          String,
  pub place:              Option<serde_json::Value>,
  #[serde(rename = "PlaceID", deserialize_with = "nullable")]
  pub place_id:           String,
  #[serde(deserialize_with = "nullable")]
  pub photo_country:      String,
  pub photo_year:         i32,
  pub photo_month:        i32,
  #[serde(deserialize_with = "nullable")]
  pub description:        Description,
  #[serde(deserialize_with = "nullable")]
  pub description_src:    Source,
  #[serde(deserialize_with = "nullable")]
  pub files:              Vec<File>,
  #[serde(deserialize_with = "nullable")]
  pub labels:             Vec<PhotoLabel>,
  #[serde(deserialize_with = "nullable")]
  pub keywords:           Vec<serde_json::Value>,
  #[serde(deserialize_with = "nullable")]
  pub albums:             Vec<serde_json::Value>,
  #[serde(deserialize_with = "nullable")]
  pub links:              Vec<serde_json::Value>,
  pub created_at:         Option<DateTime<Utc>>,
  pub updated_at:         Option<DateTime<Utc>>,
  pub deleted_at:         Option<DateTime<Utc>>,

  // Derived from the primary file by `refresh_file_attr`.
  #[serde(skip_serializing, deserialize_with = "nullable")]
  file_hash:   String,
  #[serde(skip_serializing)]
  file_width:  u32,
  #[serde(skip_serializing)]
  file_height: u32,
}

impl Photo {
  /// Build a photo from a server representation.
  ///
  /// Fails if more than one file is flagged primary. Display attributes are
  /// resolved from the primary file.
  pub fn from_json(value: serde_json::Value) -> Result<Self> {
    let mut photo: Photo = serde_json::from_value(value)?;
    file::validate_primary(&photo.files)?;
    photo.refresh_file_attr();
    Ok(photo)
  }

  // ── File set resolution ─────────────────────────────────────────────────

  /// The first file flagged primary, in collection order.
  pub fn primary_file(&self) -> Result<&File> {
    file::primary(&self.files).ok_or_else(|| {
      crate::Error::NotFound(format!("primary file of photo {}", self.uid))
    })
  }

  /// Copy hash and dimensions of the primary file onto the photo.
  ///
  /// Without a primary file the previous values stay in place, so a known
  /// thumbnail is never blanked out.
  pub fn refresh_file_attr(&mut self) {
    let (hash, width, height) = match self.primary_file() {
      Ok(f) => (f.file_hash.clone(), f.file_width, f.file_height),
      Err(e) => {
        tracing::debug!("keeping display attributes: {e}");
        return;
      }
    };
    self.file_hash = hash;
    self.file_width = width;
    self.file_height = height;
  }

  /// Refresh from the primary file, or take the display attributes of
  /// `previous` when this representation resolves none of its own.
  pub fn refresh_file_attr_from(&mut self, previous: &Photo) {
    if file::primary(&self.files).is_none() && self.file_hash.is_empty() {
      self.file_hash.clone_from(&previous.file_hash);
      self.file_width = previous.file_width;
      self.file_height = previous.file_height;
      return;
    }
    self.refresh_file_attr();
  }

  pub fn file_hash(&self) -> &str { &self.file_hash }

  pub fn file_size(&self) -> Size { Size::new(self.file_width, self.file_height) }

  // ── Provenance ──────────────────────────────────────────────────────────

  pub fn source(&self, group: FieldGroup) -> Source {
    match group {
      FieldGroup::Title => self.title_src,
      FieldGroup::Description => self.description_src,
      FieldGroup::Location => self.location_src,
      FieldGroup::Taken => self.taken_src,
      FieldGroup::Camera => self.camera_src,
    }
  }

  // ── Presentation ────────────────────────────────────────────────────────

  pub fn entity_name(&self) -> &str { &self.photo_title }

  pub fn title(&self) -> &str { &self.photo_title }

  /// UI colour class for the photo's dominant colour.
  pub fn color_class(&self) -> String {
    match self.photo_color.as_str() {
      "brown" | "black" | "white" | "grey" => "grey lighten-2".to_string(),
      other => format!("{other} lighten-4"),
    }
  }

  pub fn google_maps_link(&self) -> String {
    format!(
      "https://www.google.com/maps/place/{},{}",
      self.photo_lat, self.photo_lng
    )
  }

  pub fn has_location(&self) -> bool {
    self.photo_lat != 0.0 || self.photo_lng != 0.0
  }

  pub fn location_label(&self) -> &str {
    if self.loc_label.is_empty() {
      "Unknown"
    } else {
      &self.loc_label
    }
  }

  pub fn camera_label(&self) -> String {
    if let Some(camera) = &self.camera {
      format!("{} {}", camera.camera_make, camera.camera_model)
    } else if !self.camera_model.is_empty() {
      format!("{} {}", self.camera_make, self.camera_model)
    } else {
      "Unknown".to_string()
    }
  }

  /// Thumbnail path for a size token such as `fit_720` or `tile_224`.
  pub fn thumbnail_url(&self, size_token: &str) -> String {
    urls::thumbnail_url(&self.file_hash, size_token)
  }

  pub fn download_url(&self) -> Result<String> {
    if self.file_hash.is_empty() {
      return Err(crate::Error::NotFound(format!(
        "file hash of photo {}",
        self.uid
      )));
    }
    Ok(urls::download_url(&self.file_hash))
  }

  pub fn srcset(&self, ladder: &ThumbnailLadder) -> String {
    ladder.srcset(&self.file_hash)
  }

  pub fn sizes(&self, ladder: &ThumbnailLadder) -> String { ladder.sizes() }

  /// Display size of the primary file inside a `width` x `height` box.
  pub fn calculate_size(&self, width: u32, height: u32) -> Result<Size> {
    fit_size(self.file_size(), Size::new(width, height))
  }
}
