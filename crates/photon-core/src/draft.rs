//! Drafts — an adopted server snapshot plus the user's working copy.
//!
//! The difference between the two is the change set that a save submits.
//! Every remote call that returns a photo replaces both copies with the
//! server's representation; a failed call leaves the draft untouched.

use crate::{
  Error, Result,
  api::{MANUAL_LABEL_PRIORITY, PhotoApi},
  changes::Changes,
  file,
  photo::Photo,
  provenance::assign_provenance,
};

#[derive(Debug, Clone)]
pub struct Draft {
  saved:   Photo,
  working: Photo,
}

impl Draft {
  /// Start editing `photo`. Fails if more than one file is flagged primary.
  pub fn new(mut photo: Photo) -> Result<Self> {
    file::validate_primary(&photo.files)?;
    photo.refresh_file_attr();
    Ok(Self {
      saved:   photo.clone(),
      working: photo,
    })
  }

  /// The last representation adopted from the server.
  pub fn saved(&self) -> &Photo { &self.saved }

  pub fn photo(&self) -> &Photo { &self.working }

  pub fn photo_mut(&mut self) -> &mut Photo { &mut self.working }

  pub fn uid(&self) -> &str { &self.saved.uid }

  /// Fields changed since the last adoption, without provenance tags.
  pub fn changes(&self) -> Result<Changes> {
    Changes::between(&self.saved, &self.working)
  }

  pub fn is_dirty(&self) -> Result<bool> { Ok(!self.changes()?.is_empty()) }

  /// The payload a save would send.
  pub fn outgoing(&self) -> Result<Changes> {
    Ok(assign_provenance(self.changes()?))
  }

  /// Replace both copies with a server representation.
  ///
  /// The representation is validated first; on error nothing changes.
  pub fn adopt(&mut self, mut photo: Photo) -> Result<()> {
    if let Err(e) = file::validate_primary(&photo.files) {
      tracing::warn!(uid = %photo.uid, "rejecting server representation: {e}");
      return Err(e);
    }
    photo.refresh_file_attr_from(&self.working);
    self.saved = photo.clone();
    self.working = photo;
    Ok(())
  }

  // ── Save ──────────────────────────────────────────────────────────────

  /// Submit the working copy's changes and adopt the server's answer.
  pub async fn save<A: PhotoApi>(&mut self, api: &A) -> Result<()> {
    let outgoing = self.outgoing()?;
    let fields: Vec<&str> = outgoing.fields().collect();
    tracing::debug!(uid = %self.uid(), ?fields, "saving photo");
    let updated = api
      .update_photo(self.uid(), &outgoing)
      .await
      .map_err(remote)?;
    self.adopt(updated)
  }

  /// Re-fetch the photo, discarding local edits.
  pub async fn reload<A: PhotoApi>(&mut self, api: &A) -> Result<()> {
    let fresh = api.get_photo(self.uid()).await.map_err(remote)?;
    self.adopt(fresh)
  }

  // ── Likes ─────────────────────────────────────────────────────────────

  pub async fn toggle_like<A: PhotoApi>(&mut self, api: &A) -> Result<()> {
    let favorite = !self.working.photo_favorite;
    self.set_favorite(api, favorite).await
  }

  pub async fn like<A: PhotoApi>(&mut self, api: &A) -> Result<()> {
    self.set_favorite(api, true).await
  }

  pub async fn unlike<A: PhotoApi>(&mut self, api: &A) -> Result<()> {
    self.set_favorite(api, false).await
  }

  async fn set_favorite<A: PhotoApi>(
    &mut self,
    api: &A,
    favorite: bool,
  ) -> Result<()> {
    let previous = (self.saved.photo_favorite, self.working.photo_favorite);
    self.saved.photo_favorite = favorite;
    self.working.photo_favorite = favorite;

    let uid = self.saved.uid.clone();
    let result = if favorite {
      api.like(&uid).await
    } else {
      api.unlike(&uid).await
    };

    if let Err(e) = result {
      (self.saved.photo_favorite, self.working.photo_favorite) = previous;
      return Err(remote(e));
    }
    Ok(())
  }

  // ── Labels ────────────────────────────────────────────────────────────

  pub async fn add_label<A: PhotoApi>(
    &mut self,
    api: &A,
    name: &str,
  ) -> Result<()> {
    let updated = api
      .add_label(self.uid(), name, MANUAL_LABEL_PRIORITY)
      .await
      .map_err(remote)?;
    self.adopt(updated)
  }

  pub async fn activate_label<A: PhotoApi>(
    &mut self,
    api: &A,
    label_id: u64,
  ) -> Result<()> {
    let updated = api
      .activate_label(self.uid(), label_id)
      .await
      .map_err(remote)?;
    self.adopt(updated)
  }

  pub async fn rename_label<A: PhotoApi>(
    &mut self,
    api: &A,
    label_id: u64,
    name: &str,
  ) -> Result<()> {
    let updated = api
      .rename_label(self.uid(), label_id, name)
      .await
      .map_err(remote)?;
    self.adopt(updated)
  }

  pub async fn remove_label<A: PhotoApi>(
    &mut self,
    api: &A,
    label_id: u64,
  ) -> Result<()> {
    let updated = api
      .remove_label(self.uid(), label_id)
      .await
      .map_err(remote)?;
    self.adopt(updated)
  }
}

fn remote<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::Remote(Box::new(e))
}
