//! Client-side model of a photo: display attributes derived from the primary
//! file, responsive thumbnail descriptors, bounding-box fitting, and
//! provenance tagging of user edits.
//!
//! This crate is free of HTTP dependencies. Remote calls go through the
//! [`api::PhotoApi`] trait, implemented by `photon-client`.

pub mod api;
pub mod changes;
mod de;
pub mod draft;
pub mod error;
pub mod file;
pub mod fit;
pub mod photo;
pub mod provenance;
pub mod responsive;
pub mod source;
pub mod urls;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
