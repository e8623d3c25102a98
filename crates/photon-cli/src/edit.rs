//! Field edits accepted on the command line.

use chrono::{DateTime, Utc};
use clap::Args;
use photon_core::photo::Photo;

/// Fields `photon edit` can change. Unset flags leave the field alone.
#[derive(Args, Debug, Default, Clone)]
pub struct EditArgs {
  #[arg(long)]
  pub title:        Option<String>,
  #[arg(long)]
  pub description:  Option<String>,
  #[arg(long)]
  pub keywords:     Option<String>,
  #[arg(long)]
  pub notes:        Option<String>,
  #[arg(long)]
  pub subject:      Option<String>,
  #[arg(long)]
  pub artist:       Option<String>,
  #[arg(long)]
  pub copyright:    Option<String>,
  #[arg(long)]
  pub license:      Option<String>,
  #[arg(long, allow_hyphen_values = true)]
  pub lat:          Option<f64>,
  #[arg(long, allow_hyphen_values = true)]
  pub lng:          Option<f64>,
  /// RFC 3339 timestamp, e.g. `2021-06-01T18:30:00Z`.
  #[arg(long)]
  pub taken_at:     Option<DateTime<Utc>>,
  #[arg(long)]
  pub time_zone:    Option<String>,
  #[arg(long)]
  pub camera_id:    Option<u64>,
  #[arg(long)]
  pub lens_id:      Option<u64>,
  #[arg(long)]
  pub iso:          Option<u32>,
  #[arg(long)]
  pub focal_length: Option<u32>,
  #[arg(long)]
  pub f_number:     Option<f64>,
  #[arg(long)]
  pub exposure:     Option<String>,
}

fn set<T>(target: &mut T, value: &Option<T>)
where
  T: Clone,
{
  if let Some(v) = value {
    *target = v.clone();
  }
}

impl EditArgs {
  /// Write every given flag onto `photo`.
  pub fn apply(&self, photo: &mut Photo) {
    set(&mut photo.photo_title, &self.title);

    let d = &mut photo.description;
    set(&mut d.photo_description, &self.description);
    set(&mut d.photo_keywords, &self.keywords);
    set(&mut d.photo_notes, &self.notes);
    set(&mut d.photo_subject, &self.subject);
    set(&mut d.photo_artist, &self.artist);
    set(&mut d.photo_copyright, &self.copyright);
    set(&mut d.photo_license, &self.license);

    set(&mut photo.photo_lat, &self.lat);
    set(&mut photo.photo_lng, &self.lng);
    if let Some(taken_at) = self.taken_at {
      photo.taken_at = Some(taken_at);
    }
    set(&mut photo.time_zone, &self.time_zone);

    set(&mut photo.camera_id, &self.camera_id);
    set(&mut photo.lens_id, &self.lens_id);
    set(&mut photo.photo_iso, &self.iso);
    set(&mut photo.photo_focal_length, &self.focal_length);
    set(&mut photo.photo_f_number, &self.f_number);
    set(&mut photo.photo_exposure, &self.exposure);
  }
}

#[cfg(test)]
mod tests {
  use photon_core::{changes::Changes, provenance::assign_provenance};
  use serde_json::json;

  use super::*;

  #[test]
  fn only_given_flags_change() {
    let before = Photo::default();
    let mut after = before.clone();
    EditArgs {
      title: Some("Sunset".into()),
      artist: Some("Jane".into()),
      iso: Some(400),
      ..Default::default()
    }
    .apply(&mut after);

    let out = assign_provenance(Changes::between(&before, &after).unwrap());
    assert_eq!(out.get("PhotoTitle"), Some(&json!("Sunset")));
    assert_eq!(out.get("Description"), Some(&json!({"PhotoArtist": "Jane"})));
    assert_eq!(out.get("PhotoIso"), Some(&json!(400)));
    assert_eq!(out.get("TitleSrc"), Some(&json!("manual")));
    assert_eq!(out.get("DescriptionSrc"), Some(&json!("manual")));
    assert_eq!(out.get("CameraSrc"), Some(&json!("manual")));
    assert!(out.get("LocationSrc").is_none());
    assert!(out.get("TakenSrc").is_none());
  }

  #[test]
  fn taken_at_sets_time_group() {
    let before = Photo::default();
    let mut after = before.clone();
    EditArgs {
      taken_at: Some("2021-06-01T18:30:00Z".parse().unwrap()),
      ..Default::default()
    }
    .apply(&mut after);

    let out = assign_provenance(Changes::between(&before, &after).unwrap());
    assert_eq!(out.get("TakenSrc"), Some(&json!("manual")));
  }
}
