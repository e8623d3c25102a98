//! Responsive image descriptors built from a breakpoint ladder.
//!
//! The ladder is a single immutable value: an ordered list of
//! `(min_viewport, width)` steps plus a fallback width. It yields both the
//! candidate list (`srcset`) and the viewport selection rule (`sizes`).

use serde::{Deserialize, Serialize};

use crate::{Error, Result, urls};

// ─── Ladder ──────────────────────────────────────────────────────────────────

/// One rung: viewports at least `min_viewport` pixels wide get a `width`
/// pixel thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
  pub min_viewport: u32,
  pub width:        u32,
}

/// Unvalidated ladder shape, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderSpec {
  pub steps:    Vec<Step>,
  pub fallback: u32,
}

/// A validated breakpoint ladder.
///
/// Steps are strictly descending by `min_viewport` and every width is
/// positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LadderSpec", into = "LadderSpec")]
pub struct ThumbnailLadder {
  steps:    Vec<Step>,
  fallback: u32,
}

impl ThumbnailLadder {
  pub fn new(steps: Vec<Step>, fallback: u32) -> Result<Self> {
    if steps.is_empty() {
      return Err(Error::InvalidArgument("ladder has no steps".into()));
    }
    if fallback == 0 || steps.iter().any(|s| s.width == 0) {
      return Err(Error::InvalidArgument(
        "ladder widths must be positive".into(),
      ));
    }
    if steps.windows(2).any(|w| w[0].min_viewport <= w[1].min_viewport) {
      return Err(Error::InvalidArgument(
        "ladder steps must be strictly descending by min_viewport".into(),
      ));
    }
    Ok(Self { steps, fallback })
  }

  pub fn steps(&self) -> &[Step] { &self.steps }

  pub fn fallback(&self) -> u32 { self.fallback }

  /// Every distinct thumbnail width the ladder can select, ascending.
  pub fn widths(&self) -> Vec<u32> {
    let mut widths: Vec<u32> = self
      .steps
      .iter()
      .map(|s| s.width)
      .chain(std::iter::once(self.fallback))
      .collect();
    widths.sort_unstable();
    widths.dedup();
    widths
  }

  // ── Candidates ──────────────────────────────────────────────────────────

  /// Candidate URLs for `file_hash`, one per ladder width in ascending order.
  ///
  /// An empty hash yields the single placeholder candidate without a width.
  pub fn candidates(&self, file_hash: &str) -> Vec<Candidate> {
    if file_hash.is_empty() {
      return vec![Candidate {
        url:   urls::PLACEHOLDER_PATH.to_string(),
        width: None,
      }];
    }
    self
      .widths()
      .into_iter()
      .map(|w| Candidate {
        url:   urls::thumbnail_url(file_hash, &urls::fit_token(w)),
        width: Some(w),
      })
      .collect()
  }

  /// `srcset` attribute value, e.g. `"/api/v1/thumbnails/h/fit_720 720w, ..."`.
  pub fn srcset(&self, file_hash: &str) -> String {
    self
      .candidates(file_hash)
      .iter()
      .map(Candidate::to_string)
      .collect::<Vec<_>>()
      .join(", ")
  }

  // ── Viewport rule ───────────────────────────────────────────────────────

  /// Media conditions in evaluation order; the last entry is the
  /// unconditional fallback.
  pub fn viewport_rules(&self) -> Vec<ViewportRule> {
    self
      .steps
      .iter()
      .map(|s| ViewportRule {
        min_viewport: Some(s.min_viewport),
        width:        s.width,
      })
      .chain(std::iter::once(ViewportRule {
        min_viewport: None,
        width:        self.fallback,
      }))
      .collect()
  }

  /// The thumbnail width chosen for a viewport; first matching rule wins.
  pub fn select(&self, viewport_width: u32) -> u32 {
    self
      .steps
      .iter()
      .find(|s| viewport_width >= s.min_viewport)
      .map_or(self.fallback, |s| s.width)
  }

  /// `sizes` attribute value, e.g. `"(min-width: 2560px) 3840px, ..., 720px"`.
  pub fn sizes(&self) -> String {
    self
      .viewport_rules()
      .iter()
      .map(ViewportRule::to_string)
      .collect::<Vec<_>>()
      .join(", ")
  }
}

impl Default for ThumbnailLadder {
  fn default() -> Self {
    Self {
      steps:    vec![
        Step { min_viewport: 2560, width: 3840 },
        Step { min_viewport: 1920, width: 2560 },
        Step { min_viewport: 1280, width: 1920 },
        Step { min_viewport: 720, width: 1280 },
      ],
      fallback: 720,
    }
  }
}

impl TryFrom<LadderSpec> for ThumbnailLadder {
  type Error = Error;

  fn try_from(spec: LadderSpec) -> Result<Self> {
    Self::new(spec.steps, spec.fallback)
  }
}

impl From<ThumbnailLadder> for LadderSpec {
  fn from(ladder: ThumbnailLadder) -> Self {
    Self {
      steps:    ladder.steps,
      fallback: ladder.fallback,
    }
  }
}

// ─── Descriptor types ────────────────────────────────────────────────────────

/// One `srcset` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
  pub url:   String,
  /// Width descriptor; absent for the placeholder.
  pub width: Option<u32>,
}

impl std::fmt::Display for Candidate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.width {
      Some(w) => write!(f, "{} {w}w", self.url),
      None => f.write_str(&self.url),
    }
  }
}

/// One `sizes` entry. `min_viewport == None` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportRule {
  pub min_viewport: Option<u32>,
  pub width:        u32,
}

impl std::fmt::Display for ViewportRule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.min_viewport {
      Some(min) => write!(f, "(min-width: {min}px) {}px", self.width),
      None => write!(f, "{}px", self.width),
    }
  }
}
