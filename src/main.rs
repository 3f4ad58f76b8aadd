use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use memos_api::{MemosClient, Visibility};
use tracing_subscriber::EnvFilter;

use memopress::config::settings::{
    api_url_from_domain, default_settings_path, normalize_token, Settings, SettingsUpdate,
};
use memopress::config::CompressConfig;
use memopress::codec::{self, OutputFormat};
use memopress::{naming, report};

/// Compress images and post them to a self-hosted Memos instance:
/// - compress: decode → optional resize → WebP/JPEG/PNG encode
/// - upload: create a memo, then attach the file to it as a resource
#[derive(Parser, Debug)]
#[command(name = "memopress")]
#[command(about = "🖼️  Compress images and post them to a self-hosted Memos instance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress an image; uploads afterwards with --upload or when
    /// auto-upload is enabled in settings
    Compress {
        /// Input image (any format the decoder understands)
        input: PathBuf,

        /// Output file path; defaults to the input with the new extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output encoding
        #[arg(short, long, value_enum, default_value = "webp")]
        format: OutputFormat,

        /// Encoder quality, 0-100 (ignored for PNG and lossless WebP)
        #[arg(short, long, default_value_t = 75.0)]
        quality: f32,

        /// Lossless WebP instead of lossy
        #[arg(long)]
        lossless: bool,

        /// Clamp the longest side to this many pixels (never upscales)
        #[arg(long, value_name = "PIXELS")]
        max_side: Option<u32>,

        /// Upload the result even if auto-upload is off
        #[arg(short, long)]
        upload: bool,

        /// Skip the upload even if auto-upload is on
        #[arg(long, conflicts_with = "upload")]
        no_upload: bool,

        /// Upload filename without extension (CJK, letters, digits, _ and -)
        #[arg(long)]
        name: Option<String>,

        /// Memo text; defaults to the upload filename
        #[arg(long)]
        content: Option<String>,

        /// Pin the created memo
        #[arg(long)]
        pinned: bool,

        /// Memo visibility
        #[arg(long, value_enum, default_value = "public")]
        visibility: Visibility,
    },

    /// Upload an already-compressed file to Memos
    Upload {
        /// File to upload
        file: PathBuf,

        /// Upload filename without extension (CJK, letters, digits, _ and -)
        #[arg(long)]
        name: Option<String>,

        /// Memo text; defaults to the upload filename
        #[arg(long)]
        content: Option<String>,

        /// Pin the created memo
        #[arg(long)]
        pinned: bool,

        /// Memo visibility
        #[arg(long, value_enum, default_value = "public")]
        visibility: Visibility,
    },

    /// Show or change the stored Memos settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Update one or more settings and write them back
    Set {
        /// Full memo endpoint, e.g. https://host/api/v1/memos
        #[arg(long, conflicts_with = "domain")]
        url: Option<String>,

        /// Bare domain; expands to https://{domain}/api/v1/memos
        #[arg(long)]
        domain: Option<String>,

        /// API token; a missing `Bearer ` prefix is added automatically
        #[arg(long)]
        token: Option<String>,

        /// Upload automatically after each successful compression
        #[arg(long)]
        auto_upload: Option<bool>,
    },
    /// Print the current settings (token redacted)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compress {
            input,
            output,
            format,
            quality,
            lossless,
            max_side,
            upload,
            no_upload,
            name,
            content,
            pinned,
            visibility,
        } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            let config = CompressConfig::new(format, quality, lossless, max_side);
            config.validate().map_err(anyhow::Error::msg)?;
            let outcome = memopress::compress_image(&data, &config.to_options())?;

            let output_path =
                output.unwrap_or_else(|| input.with_extension(format.extension()));
            if output_path == input {
                bail!("Output would overwrite the input; pass --output to pick another path");
            }
            std::fs::write(&output_path, &outcome.bytes)
                .with_context(|| format!("writing {}", output_path.display()))?;

            println!(
                "Output: {} ({}x{})",
                output_path.display(),
                outcome.width,
                outcome.height
            );
            println!(
                "{}",
                report::format_report(data.len() as u64, outcome.bytes.len() as u64)
            );

            let settings = Settings::load(&default_settings_path());
            let wants_upload = if upload {
                true
            } else if no_upload {
                false
            } else {
                settings.auto_upload && settings.is_configured()
            };
            if wants_upload {
                upload_bytes(
                    &settings,
                    &outcome.bytes,
                    &input,
                    format.extension(),
                    format.mime(),
                    name,
                    content,
                    pinned,
                    visibility,
                )
                .await?;
            }
            Ok(())
        }

        Command::Upload {
            file,
            name,
            content,
            pinned,
            visibility,
        } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let extension = naming::extension_of(&file);
            let mime = codec::mime_for_extension(&extension);
            let settings = Settings::load(&default_settings_path());
            upload_bytes(
                &settings, &data, &file, &extension, mime, name, content, pinned, visibility,
            )
            .await
        }

        Command::Config { action } => run_config(action),
    }
}

/// The shared upload leg: resolve the final filename, then run the two-step
/// memo + resource sequence.
#[allow(clippy::too_many_arguments)]
async fn upload_bytes(
    settings: &Settings,
    bytes: &[u8],
    source: &Path,
    extension: &str,
    mime: &str,
    name: Option<String>,
    content: Option<String>,
    pinned: bool,
    visibility: Visibility,
) -> Result<()> {
    if !settings.is_configured() {
        bail!(
            "Memos API is not configured. Run: memopress config set --domain <host> --token <token>"
        );
    }

    let stem = match name {
        Some(raw) => naming::sanitize(&raw),
        None => naming::default_stem(source),
    };
    naming::validate(&stem)?;
    let filename = format!("{}.{}", stem, extension);
    let content = content.unwrap_or_else(|| stem.clone());

    println!(
        "Uploading {} ({}) …",
        filename,
        report::pretty_bytes(bytes.len() as u64)
    );
    let client = MemosClient::new(&settings.memos_api_url, &settings.memos_token);
    let resource = client
        .upload_image(bytes, &filename, mime, &content, pinned, visibility)
        .await?;
    println!("Uploaded: {} → {}", filename, resource.name);
    Ok(())
}

fn run_config(action: ConfigAction) -> Result<()> {
    let path = default_settings_path();
    match action {
        ConfigAction::Set {
            url,
            domain,
            token,
            auto_upload,
        } => {
            let mut settings = Settings::load(&path);
            let update = SettingsUpdate {
                memos_api_url: url.or_else(|| domain.map(|d| api_url_from_domain(&d))),
                memos_token: token.map(|t| normalize_token(&t)),
                auto_upload,
            };
            settings.apply(&update);
            settings.save(&path)?;
            println!("Settings saved to {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let settings = Settings::load(&path);
            println!("Settings file: {}", path.display());
            println!("API URL:     {}", settings.memos_api_url);
            println!("Token:       {}", settings.redacted_token());
            println!("Auto upload: {}", settings.auto_upload);
            Ok(())
        }
    }
}
