use super::{EccLevel, HexColor};
use clap::Args;
use std::num::NonZeroU32;

#[derive(Debug, Default, Args)]
pub struct StyleArgs {
    #[arg(
        long,
        value_enum,
        value_name = "LEVEL",
        help = "Error correction level [default: chosen by the encoder]"
    )]
    pub ecc: Option<EccLevel>,

    #[arg(long, value_name = "PIXELS", help = "Pixel size of each QR module")]
    pub box_size: Option<NonZeroU32>,

    #[arg(long, value_name = "MODULES", help = "Border width in modules")]
    pub border: Option<u32>,

    #[arg(long, value_name = "HEX", help = "Foreground color, e.g. #000000")]
    pub fill: Option<HexColor>,

    #[arg(long, value_name = "HEX", help = "Background color, e.g. #FFFFFF")]
    pub back: Option<HexColor>,
}
