//! `photon` — inspect and edit photos from the command line.
//!
//! # Usage
//!
//! ```
//! photon show pqbcf5j446s0futy --fit 1280x1920
//! photon edit pqbcf5j446s0futy --title "Sunset" --lat 52.52 --lng 13.40
//! photon label pqbcf5j446s0futy add beach
//! photon srcset 3cad9168fa6acc5c5c2965ddf6ec465ca42fd818
//! ```

mod edit;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edit::EditArgs;
use photon_client::ApiClient;
use photon_core::{
  api::PhotoApi,
  draft::Draft,
  fit::Size,
  photo::Photo,
  responsive::ThumbnailLadder,
  source::FieldGroup,
};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "photon", version, about = "Inspect and edit photos")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "photon.toml")]
  config: PathBuf,

  /// Base URL of the photo server; overrides the config file.
  #[arg(long, env = "PHOTON_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print display attributes, descriptors and provenance of a photo.
  Show {
    uid: String,
    /// Bounding box to fit the primary file into, as `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size)]
    fit: Option<Size>,
  },
  /// Change fields of a photo and save them.
  Edit {
    uid:     String,
    #[command(flatten)]
    fields:  EditArgs,
    /// Print the outgoing change set instead of saving.
    #[arg(long)]
    dry_run: bool,
  },
  Like {
    uid: String,
  },
  Unlike {
    uid: String,
  },
  /// Manage the labels of a photo.
  Label {
    uid:    String,
    #[command(subcommand)]
    action: LabelAction,
  },
  /// Print the srcset and sizes for a file hash without contacting the
  /// server.
  Srcset {
    hash: String,
  },
}

#[derive(Subcommand, Debug)]
enum LabelAction {
  Add { name: String },
  Activate { id: u64 },
  Rename { id: u64, name: String },
  Remove { id: u64 },
}

fn parse_size(s: &str) -> Result<Size, String> {
  let (w, h) = s
    .split_once(['x', 'X'])
    .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
  let width = w.trim().parse().map_err(|e| format!("width: {e}"))?;
  let height = h.trim().parse().map_err(|e| format!("height: {e}"))?;
  Ok(Size::new(width, height))
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(url) = cli.url {
    settings.base_url = url;
  }
  let ladder = settings.ladder.clone();

  if let Command::Srcset { hash } = &cli.command {
    println!("srcset: {}", ladder.srcset(hash));
    println!("sizes:  {}", ladder.sizes());
    return Ok(());
  }

  let client = ApiClient::new(settings.api_config())?;
  tracing::debug!(base_url = %settings.base_url, "using photo server");

  match cli.command {
    Command::Show { uid, fit } => {
      let draft = load(&client, &uid).await?;
      print_photo(draft.photo(), &ladder, fit)?;
    }
    Command::Edit {
      uid,
      fields,
      dry_run,
    } => {
      let mut draft = load(&client, &uid).await?;
      fields.apply(draft.photo_mut());
      let outgoing = draft.outgoing()?;
      if outgoing.is_empty() {
        tracing::info!("nothing to change");
        return Ok(());
      }
      if dry_run {
        println!("{}", serde_json::to_string_pretty(&outgoing)?);
        return Ok(());
      }
      draft
        .save(&client)
        .await
        .with_context(|| format!("saving photo {uid}"))?;
      tracing::info!(%uid, fields = outgoing.len(), "photo saved");
      print_photo(draft.photo(), &ladder, None)?;
    }
    Command::Like { uid } => {
      let mut draft = load(&client, &uid).await?;
      draft.like(&client).await?;
      tracing::info!(%uid, "liked");
    }
    Command::Unlike { uid } => {
      let mut draft = load(&client, &uid).await?;
      draft.unlike(&client).await?;
      tracing::info!(%uid, "unliked");
    }
    Command::Label { uid, action } => {
      let mut draft = load(&client, &uid).await?;
      match action {
        LabelAction::Add { name } => draft.add_label(&client, &name).await?,
        LabelAction::Activate { id } => {
          draft.activate_label(&client, id).await?
        }
        LabelAction::Rename { id, name } => {
          draft.rename_label(&client, id, &name).await?
        }
        LabelAction::Remove { id } => draft.remove_label(&client, id).await?,
      }
      print_labels(draft.photo());
    }
    Command::Srcset { .. } => {}
  }

  Ok(())
}

async fn load(client: &ApiClient, uid: &str) -> Result<Draft> {
  let photo = client
    .get_photo(uid)
    .await
    .with_context(|| format!("fetching photo {uid}"))?;
  Ok(Draft::new(photo)?)
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn print_photo(
  photo: &Photo,
  ladder: &ThumbnailLadder,
  fit: Option<Size>,
) -> Result<()> {
  println!("{} ({})", photo.title(), photo.uid);
  println!("  camera:   {}", photo.camera_label());
  println!("  location: {}", photo.location_label());
  if photo.has_location() {
    println!("  map:      {}", photo.google_maps_link());
  }
  println!("  file:     {} {}", photo.file_hash(), photo.file_size());
  match photo.download_url() {
    Ok(url) => println!("  download: {url}"),
    Err(e) => tracing::warn!("no download link: {e}"),
  }
  println!("  srcset:   {}", photo.srcset(ladder));
  println!("  sizes:    {}", photo.sizes(ladder));
  if let Some(bounds) = fit {
    let size = photo
      .calculate_size(bounds.width, bounds.height)
      .with_context(|| format!("fitting into {bounds}"))?;
    println!("  fit {bounds}: {size}");
  }
  for group in FieldGroup::ALL {
    println!(
      "  {:<15} {:?}",
      group.source_field(),
      photo.source(group)
    );
  }
  print_labels(photo);
  Ok(())
}

fn print_labels(photo: &Photo) {
  for l in &photo.labels {
    let name = l.label.as_ref().map_or("?", |label| label.label_name.as_str());
    println!("  label {:>5} {name} ({}%)", l.label_id, l.uncertainty);
  }
}
