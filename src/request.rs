use crate::args::Args;
use crate::config::Config;
use crate::encode::{Encoder, QrStyle};
use crate::error::QrgenError;
use crate::save::save_image;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_OUTPUT: &str = "qr_output.png";

/// One invocation's worth of work: what to encode and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub url: String,
    pub output_path: PathBuf,
    pub style: QrStyle,
}

impl QrRequest {
    /// Merges command line arguments over config values.
    pub fn resolve(args: &Args, config: &Config) -> Result<Self, QrgenError> {
        let url = payload(args)?.to_string();

        if (args.strict_url || config.strict_url.unwrap_or(false)) && !is_web_url(&url) {
            return Err(QrgenError::InvalidUrl(url));
        }

        let output_path = args
            .out
            .clone()
            .or_else(|| config.out.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let style = QrStyle {
            ecc: args.style.ecc.or(config.style.ecc),
            box_size: args.style.box_size.or(config.style.box_size),
            border: args.style.border.or(config.style.border),
            fill: args.style.fill.or(config.style.fill),
            back: args.style.back.or(config.style.back),
        };

        Ok(Self {
            url,
            output_path,
            style,
        })
    }
}

/// The `--url` value, provided it is present and not blank.
pub fn payload(args: &Args) -> Result<&str, QrgenError> {
    match args.url.as_deref() {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(QrgenError::MissingArgument),
    }
}

/// Accepts absolute http or https URLs that name a host.
pub fn is_web_url(raw: &str) -> bool {
    Url::parse(raw.trim()).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Encodes the request's payload and writes the image to its output path.
pub fn generate<E: Encoder + ?Sized>(
    request: &QrRequest,
    encoder: &E,
) -> Result<PathBuf, QrgenError> {
    debug!(?request, "generating QR code");
    let image = encoder.encode(&request.url)?;
    save_image(&image, &request.output_path)?;

    let saved = display_path(&request.output_path);
    info!(path = %saved.display(), width = image.width(), "wrote QR code");
    Ok(saved)
}

fn display_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
