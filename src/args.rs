use crate::encode::StyleArgs;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "qrgen",
    author,
    version,
    about = "Generate a QR code image from a URL"
)]
pub struct Args {
    #[arg(long, help = "URL or text to encode (e.g., https://example.com)")]
    pub url: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Output image file; format follows the extension [default: qr_output.png]"
    )]
    pub out: Option<PathBuf>,

    #[arg(long, help = "Only accept http(s) URLs with a host")]
    pub strict_url: bool,

    #[arg(short, long, help = "Suppress the success message")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable debug logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        value_name = "PATH",
        conflicts_with = "no_config",
        help = "Read defaults from this config file"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Ignore qrgen.toml files")]
    pub no_config: bool,

    #[command(flatten)]
    pub style: StyleArgs,
}
