//! Resource paths of the `/api/v1` surface.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const API_PREFIX: &str = "/api/v1";

/// Characters left as is inside a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Served when no file hash is known.
pub const PLACEHOLDER_PATH: &str = "/api/v1/svg/photo";

/// Size token for a fit-within-square thumbnail, e.g. `fit_1280`.
pub fn fit_token(width: u32) -> String { format!("fit_{width}") }

/// `/api/v1/thumbnails/<hash>/<token>`, or the placeholder for an empty hash.
pub fn thumbnail_url(file_hash: &str, size_token: &str) -> String {
  if file_hash.is_empty() {
    return PLACEHOLDER_PATH.to_string();
  }
  format!("{API_PREFIX}/thumbnails/{file_hash}/{size_token}")
}

/// `/api/v1/download/<hash>`
pub fn download_url(file_hash: &str) -> String {
  format!("{API_PREFIX}/download/{file_hash}")
}

/// `/photos/<uid>`, the entity resource, relative to [`API_PREFIX`].
///
/// The uid is percent-encoded so it always stays a single path segment.
pub fn photo_resource(uid: &str) -> String {
  format!("/photos/{}", utf8_percent_encode(uid, SEGMENT))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn thumbnail_paths() {
    assert_eq!(
      thumbnail_url("abc123", &fit_token(720)),
      "/api/v1/thumbnails/abc123/fit_720"
    );
    assert_eq!(thumbnail_url("", "fit_720"), "/api/v1/svg/photo");
  }

  #[test]
  fn photo_resource_is_one_segment() {
    assert_eq!(photo_resource("pqbcf5j446s0futy"), "/photos/pqbcf5j446s0futy");
    assert_eq!(photo_resource("a/b?c#d"), "/photos/a%2Fb%3Fc%23d");
    assert_eq!(photo_resource(".."), "/photos/%2E%2E");
    assert_eq!(photo_resource("pq 1"), "/photos/pq%201");
  }

  #[test]
  fn download_path() {
    assert_eq!(download_url("abc123"), "/api/v1/download/abc123");
  }
}
