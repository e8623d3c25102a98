//! Stored file variants of a photo and primary-file selection.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, de::nullable};

/// One stored variant of a photo (original, sidecar JPEG, video, ...).
///
/// Files are created by upstream ingestion; this crate only reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct File {
  #[serde(rename = "FileUID", deserialize_with = "nullable")]
  pub file_uid:     String,
  #[serde(deserialize_with = "nullable")]
  pub file_name:    String,
  #[serde(deserialize_with = "nullable")]
  pub file_mime:    String,
  pub file_primary: bool,
  #[serde(deserialize_with = "nullable")]
  pub file_hash:    String,
  pub file_width:   u32,
  pub file_height:  u32,
}

/// The first file flagged primary, in collection order.
pub fn primary(files: &[File]) -> Option<&File> {
  files.iter().find(|f| f.file_primary)
}

/// Reject collections that flag more than one file as primary.
pub fn validate_primary(files: &[File]) -> Result<()> {
  let count = files.iter().filter(|f| f.file_primary).count();
  if count > 1 {
    return Err(Error::InvalidData(format!(
      "{count} files are flagged primary, expected at most one"
    )));
  }
  Ok(())
}
