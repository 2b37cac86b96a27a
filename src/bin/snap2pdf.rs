//! CLI binary for snap2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to `AppConfig`,
//! wires the desktop platform seams, and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use snap2pdf::{app, AppConfig, AppState, PageSize, Platform, SelectionResult, SnapError};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Assemble two photos into ~/Documents/photos.pdf
  snap2pdf create scan1.jpg scan2.jpg

  # Assemble and immediately hand the PDF to the system share surface
  snap2pdf create *.jpg --share

  # Assemble and upload in one go
  snap2pdf create receipt.png --upload --endpoint https://api.example.com/upload --api-key $KEY

  # Capture a photo into the album (requires a capture tool)
  snap2pdf capture --capture-cmd imagesnap

  # Share or upload the PDF from an earlier create
  snap2pdf share
  snap2pdf upload

ENVIRONMENT VARIABLES:
  SNAP2PDF_DOCUMENT_DIR  Directory the rendered PDF is saved into
  SNAP2PDF_ALBUM_DIR     Gallery album directory for captured photos
  SNAP2PDF_CAPTURE_CMD   External still-capture program (e.g. imagesnap, fswebcam)
  SNAP2PDF_OPENER        Program the share surface hands the PDF to
  SNAP2PDF_ENDPOINT      Upload endpoint URL
  SNAP2PDF_API_KEY       Bearer credential sent with uploads

NOTES:
  The rendered document always lands at <document-dir>/photos.pdf and
  replaces any prior output. A selection is capped at 10 photos.
"#;

/// Assemble photos into a shareable PDF and deliver it.
#[derive(Parser, Debug)]
#[command(
    name = "snap2pdf",
    version,
    about = "Assemble photos into a shareable PDF and deliver it",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory the rendered PDF is saved into.
    #[arg(long, env = "SNAP2PDF_DOCUMENT_DIR", global = true)]
    document_dir: Option<PathBuf>,

    /// Gallery album directory for captured photos.
    #[arg(long, env = "SNAP2PDF_ALBUM_DIR", global = true)]
    album_dir: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SNAP2PDF_VERBOSE", global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "SNAP2PDF_QUIET", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture a photo and save it to the gallery album.
    Capture {
        /// External still-capture program, invoked with the destination path.
        #[arg(long = "capture-cmd", env = "SNAP2PDF_CAPTURE_CMD")]
        capture_cmd: Option<String>,

        /// Use the front (selfie) lens.
        #[arg(long)]
        front: bool,
    },

    /// Create photos.pdf from up to 10 photos, optionally delivering it.
    Create {
        /// Photos to include, in order. Capped at 10.
        #[arg(required = true)]
        photos: Vec<PathBuf>,

        /// Invoke the share surface after creating the PDF.
        #[arg(long)]
        share: bool,

        /// Upload the PDF after creating it.
        #[arg(long)]
        upload: bool,

        /// Page geometry: letter, a4, or WxH in points (e.g. 612x792).
        #[arg(long, default_value = "letter")]
        page: String,

        /// Print a machine-readable JSON summary to stdout.
        #[arg(long, env = "SNAP2PDF_JSON")]
        json: bool,

        /// Program the share surface hands the PDF to.
        #[arg(long, env = "SNAP2PDF_OPENER")]
        opener: Option<String>,

        /// Upload endpoint URL.
        #[arg(long, env = "SNAP2PDF_ENDPOINT")]
        endpoint: Option<String>,

        /// Bearer credential sent with the upload.
        #[arg(long, env = "SNAP2PDF_API_KEY")]
        api_key: Option<String>,
    },

    /// Share the PDF from an earlier create.
    Share {
        /// Program the share surface hands the PDF to.
        #[arg(long, env = "SNAP2PDF_OPENER")]
        opener: Option<String>,
    },

    /// Upload the PDF from an earlier create.
    Upload {
        /// Upload endpoint URL.
        #[arg(long, env = "SNAP2PDF_ENDPOINT")]
        endpoint: Option<String>,

        /// Bearer credential sent with the upload.
        #[arg(long, env = "SNAP2PDF_API_KEY")]
        api_key: Option<String>,

        /// Upload timeout in seconds.
        #[arg(long, env = "SNAP2PDF_UPLOAD_TIMEOUT", default_value_t = 60)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli)?;

    match &cli.command {
        Command::Capture { front, .. } => run_capture(&cli, &config, *front).await,
        Command::Create {
            photos,
            share,
            upload,
            json,
            ..
        } => run_create(&cli, &config, photos.clone(), *share, *upload, *json).await,
        Command::Share { .. } => run_share(&cli, &config).await,
        Command::Upload { .. } => run_upload(&cli, &config).await,
    }
}

/// Map CLI args to `AppConfig`.
fn build_config(cli: &Cli) -> Result<AppConfig> {
    let mut builder = AppConfig::builder();

    if let Some(ref dir) = cli.document_dir {
        builder = builder.document_dir(dir);
    }
    if let Some(ref dir) = cli.album_dir {
        builder = builder.album_dir(dir);
    }

    match &cli.command {
        Command::Capture { capture_cmd, .. } => {
            if let Some(cmd) = capture_cmd {
                builder = builder.capture_command(cmd);
            }
        }
        Command::Create {
            page,
            opener,
            endpoint,
            api_key,
            ..
        } => {
            builder = builder.page_size(parse_page_size(page)?);
            if let Some(opener) = opener {
                builder = builder.opener_command(opener);
            }
            if let Some(endpoint) = endpoint {
                builder = builder.endpoint(endpoint);
            }
            if let Some(key) = api_key {
                builder = builder.api_key(key);
            }
        }
        Command::Share { opener } => {
            if let Some(opener) = opener {
                builder = builder.opener_command(opener);
            }
        }
        Command::Upload {
            endpoint,
            api_key,
            timeout,
        } => {
            builder = builder.upload_timeout_secs(*timeout);
            if let Some(endpoint) = endpoint {
                builder = builder.endpoint(endpoint);
            }
            if let Some(key) = api_key {
                builder = builder.api_key(key);
            }
        }
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--page` into `PageSize`.
fn parse_page_size(s: &str) -> Result<PageSize> {
    match s.to_lowercase().as_str() {
        "letter" => Ok(PageSize::Letter),
        "a4" => Ok(PageSize::A4),
        custom => {
            let (w, h) = custom
                .split_once('x')
                .context("Page size must be letter, a4, or WxH in points")?;
            let w: f64 = w.trim().parse().context("Invalid page width")?;
            let h: f64 = h.trim().parse().context("Invalid page height")?;
            Ok(PageSize::Custom(w, h))
        }
    }
}

/// Live spinner for the long-running steps, hidden in quiet mode.
fn spinner(quiet: bool, msg: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(msg.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Seed a session for the standalone share/upload subcommands: the rendered
/// document is "set" when the well-known output file already exists.
fn seeded_state(config: &AppConfig) -> AppState {
    let mut state = AppState::new();
    let output = config.output_path();
    if output.exists() {
        state.rendered_pdf = Some(output);
    }
    state
}

async fn run_capture(cli: &Cli, config: &AppConfig, front: bool) -> Result<()> {
    let platform = Platform::desktop(config, vec![]);
    let mut state = AppState::new();
    if front {
        state.toggle_facing();
    }

    let bar = spinner(cli.quiet, "Capturing…");
    let result = app::take_picture(&state, &platform).await;
    bar.finish_and_clear();

    let asset = result.context("Capture failed")?;
    if !cli.quiet {
        eprintln!("{} Photo saved to {}", green("✔"), bold(&asset.display().to_string()));
    }
    Ok(())
}

async fn run_create(
    cli: &Cli,
    config: &AppConfig,
    photos: Vec<PathBuf>,
    share: bool,
    upload: bool,
    json: bool,
) -> Result<()> {
    let platform = Platform::desktop(config, photos);
    let mut state = AppState::new();

    match app::select_photos(&mut state, &platform, config).await? {
        SelectionResult::Selected(picked) => {
            if !cli.quiet && !json {
                eprintln!("{} You selected {} photo(s)", green("✔"), picked.len());
            }
        }
        SelectionResult::Cancelled => {
            // Nothing usable among the given paths; fall through so the
            // assembly reports the canonical "No Photos" notice.
        }
    }

    let bar = spinner(cli.quiet || json, "Creating PDF…");
    let result = app::create_pdf(&mut state, &platform, config).await;
    bar.finish_and_clear();

    let pdf = match result {
        Ok(pdf) => pdf,
        Err(e @ SnapError::EmptySelection) => {
            eprintln!("{} {e}", red("✘"));
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to create PDF"),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "pdf": pdf.display().to_string(),
                "photos": state.selected.len(),
            })
        );
    } else if !cli.quiet {
        eprintln!(
            "{} PDF saved to: {}  {}",
            green("✔"),
            bold(&pdf.display().to_string()),
            dim(&format!("({} photos)", state.selected.len())),
        );
    }

    if upload {
        let bar = spinner(cli.quiet || json, "Uploading PDF…");
        let result = app::upload_pdf(&state, config).await;
        bar.finish_and_clear();
        result.context("Upload failed")?;
        if !cli.quiet {
            eprintln!("{} PDF uploaded successfully", green("✔"));
        }
    }

    if share {
        app::share_pdf(&state, &platform).await.context("Share failed")?;
        if !cli.quiet {
            eprintln!("{} PDF handed to the share surface", green("✔"));
        }
    }

    Ok(())
}

async fn run_share(cli: &Cli, config: &AppConfig) -> Result<()> {
    let platform = Platform::desktop(config, vec![]);
    let state = seeded_state(config);

    match app::share_pdf(&state, &platform).await {
        Ok(()) => {
            if !cli.quiet {
                eprintln!("{} PDF handed to the share surface", green("✔"));
            }
            Ok(())
        }
        Err(e) if e.is_precondition() => {
            eprintln!("{} {e}", red("✘"));
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Share failed"),
    }
}

async fn run_upload(cli: &Cli, config: &AppConfig) -> Result<()> {
    let state = seeded_state(config);

    let bar = spinner(cli.quiet, "Uploading PDF…");
    let result = app::upload_pdf(&state, config).await;
    bar.finish_and_clear();

    match result {
        Ok(()) => {
            if !cli.quiet {
                eprintln!("{} PDF uploaded successfully", green("✔"));
            }
            Ok(())
        }
        Err(e) if e.is_precondition() => {
            eprintln!("{} {e}", red("✘"));
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Upload failed"),
    }
}
