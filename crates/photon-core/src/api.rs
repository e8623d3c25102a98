//! The `PhotoApi` trait — the remote collaborator behind save, label and like
//! operations.
//!
//! Implemented by `photon-client` over HTTP. Every call that returns a
//! [`Photo`] returns the server's canonical representation, which callers
//! adopt wholesale (see [`crate::draft::Draft::adopt`]).

use std::future::Future;

use crate::{changes::Changes, photo::Photo};

/// Priority given to labels added by hand.
pub const MANUAL_LABEL_PRIORITY: i32 = 10;

/// Abstraction over the photo REST resource `/api/v1/photos/<uid>`.
///
/// Implementations own transport concerns (auth, timeouts, retries); errors
/// are surfaced unchanged to the caller.
pub trait PhotoApi: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// `GET /photos/<uid>`
  fn get_photo<'a>(
    &'a self,
    uid: &'a str,
  ) -> impl Future<Output = Result<Photo, Self::Error>> + Send + 'a;

  /// `PUT /photos/<uid>` with the provenance-stamped change set.
  fn update_photo<'a>(
    &'a self,
    uid: &'a str,
    changes: &'a Changes,
  ) -> impl Future<Output = Result<Photo, Self::Error>> + Send + 'a;

  // ── Likes ─────────────────────────────────────────────────────────────

  /// `POST /photos/<uid>/like`
  fn like<'a>(
    &'a self,
    uid: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// `DELETE /photos/<uid>/like`
  fn unlike<'a>(
    &'a self,
    uid: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Labels ────────────────────────────────────────────────────────────

  /// `POST /photos/<uid>/label`
  fn add_label<'a>(
    &'a self,
    uid: &'a str,
    name: &'a str,
    priority: i32,
  ) -> impl Future<Output = Result<Photo, Self::Error>> + Send + 'a;

  /// `PUT /photos/<uid>/label/<id>` with zero uncertainty.
  fn activate_label<'a>(
    &'a self,
    uid: &'a str,
    label_id: u64,
  ) -> impl Future<Output = Result<Photo, Self::Error>> + Send + 'a;

  /// `PUT /photos/<uid>/label/<id>` with a new label name.
  fn rename_label<'a>(
    &'a self,
    uid: &'a str,
    label_id: u64,
    name: &'a str,
  ) -> impl Future<Output = Result<Photo, Self::Error>> + Send + 'a;

  /// `DELETE /photos/<uid>/label/<id>`
  fn remove_label<'a>(
    &'a self,
    uid: &'a str,
    label_id: u64,
  ) -> impl Future<Output = Result<Photo, Self::Error>> + Send + 'a;
}
