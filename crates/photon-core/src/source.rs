//! Provenance tags — where the current value of a field group came from.

use serde::{Deserialize, Serialize};

/// How a field group's current value was determined.
///
/// The wire form is the lowercase name, except [`Source::Auto`] which is the
/// empty string.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Source {
  #[default]
  #[serde(rename = "")]
  Auto,
  /// Entered by the user.
  Manual,
  /// Derived from a geolocation lookup.
  Location,
  /// Derived from image analysis.
  Image,
  Exif,
  Xmp,
  Yml,
  Json,
}

impl Source {
  /// The string sent to and received from the server.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Auto => "",
      Self::Manual => "manual",
      Self::Location => "location",
      Self::Image => "image",
      Self::Exif => "exif",
      Self::Xmp => "xmp",
      Self::Yml => "yml",
      Self::Json => "json",
    }
  }
}

/// A logical group of photo fields that shares one provenance tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
  Title,
  Description,
  Location,
  Taken,
  Camera,
}

impl FieldGroup {
  pub const ALL: [FieldGroup; 5] = [
    Self::Title,
    Self::Description,
    Self::Location,
    Self::Taken,
    Self::Camera,
  ];

  /// Name of the JSON field holding this group's tag.
  pub fn source_field(&self) -> &'static str {
    match self {
      Self::Title => "TitleSrc",
      Self::Description => "DescriptionSrc",
      Self::Location => "LocationSrc",
      Self::Taken => "TakenSrc",
      Self::Camera => "CameraSrc",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn auto_is_empty_string_on_the_wire() {
    assert_eq!(serde_json::to_string(&Source::Auto).unwrap(), "\"\"");
    assert_eq!(
      serde_json::from_str::<Source>("\"\"").unwrap(),
      Source::Auto
    );
  }

  #[test]
  fn wire_names_match_as_str() {
    for src in [
      Source::Auto,
      Source::Manual,
      Source::Location,
      Source::Image,
      Source::Exif,
      Source::Xmp,
      Source::Yml,
      Source::Json,
    ] {
      let json = serde_json::to_value(src).unwrap();
      assert_eq!(json, serde_json::Value::String(src.as_str().into()));
    }
  }
}
