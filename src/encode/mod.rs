pub mod args;
mod color;
mod error;

pub use args::StyleArgs;
pub use color::{ColorError, HexColor};
pub use error::EncodeError;

use clap::ValueEnum;
use image::{DynamicImage, Rgb, RgbImage, imageops};
use qrcode::{EcLevel, QrCode};
use serde::Deserialize;
use std::num::NonZeroU32;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EccLevel {
    #[value(alias = "l")]
    #[serde(alias = "l")]
    Low,
    #[value(alias = "m")]
    #[serde(alias = "m")]
    Medium,
    #[value(alias = "q")]
    #[serde(alias = "q")]
    Quartile,
    #[value(alias = "h")]
    #[serde(alias = "h")]
    High,
}

impl From<EccLevel> for EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::Low => EcLevel::L,
            EccLevel::Medium => EcLevel::M,
            EccLevel::Quartile => EcLevel::Q,
            EccLevel::High => EcLevel::H,
        }
    }
}

/// Quiet zone the `qrcode` renderer draws around normal symbols, in modules.
const DEFAULT_QUIET_ZONE: u32 = 4;

/// Largest image side, in pixels, the encoder will render.
pub const MAX_SIDE_PX: u32 = 16_384;

/// Rendering overrides. `None` leaves the choice to the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QrStyle {
    pub ecc: Option<EccLevel>,
    pub box_size: Option<NonZeroU32>,
    pub border: Option<u32>,
    pub fill: Option<HexColor>,
    pub back: Option<HexColor>,
}

/// Turns a text payload into a scannable raster image.
pub trait Encoder {
    fn encode(&self, text: &str) -> Result<DynamicImage, EncodeError>;
}

#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    style: QrStyle,
}

impl QrEncoder {
    pub fn new(style: QrStyle) -> Self {
        Self { style }
    }

    fn light(&self) -> Rgb<u8> {
        self.style.back.map(|c| c.0).unwrap_or_else(|| {
            <Rgb<u8> as qrcode::render::Pixel>::default_color(qrcode::Color::Light)
        })
    }
}

impl Encoder for QrEncoder {
    fn encode(&self, text: &str) -> Result<DynamicImage, EncodeError> {
        let code = match self.style.ecc {
            Some(level) => QrCode::with_error_correction_level(text.as_bytes(), level.into())?,
            None => QrCode::new(text.as_bytes())?,
        };
        debug!(
            version = ?code.version(),
            ecc = ?code.error_correction_level(),
            modules = code.width(),
            "encoded payload"
        );

        let modules = code.width() as u32;
        let module_px = match self.style.box_size {
            Some(px) => px.get(),
            None => <Rgb<u8> as qrcode::render::Pixel>::default_unit_size().0,
        };
        let border = self.style.border.unwrap_or(DEFAULT_QUIET_ZONE);
        let side = border
            .checked_mul(2)
            .and_then(|b| b.checked_add(modules))
            .and_then(|m| m.checked_mul(module_px))
            .filter(|&side| side <= MAX_SIDE_PX)
            .ok_or(EncodeError::TooLarge {
                modules,
                border,
                module_px,
            })?;
        debug!(side, module_px, border, "rendering symbol");

        let mut renderer = code.render::<Rgb<u8>>();
        renderer.light_color(self.light());
        if let Some(fill) = self.style.fill {
            renderer.dark_color(fill.into());
        }
        if let Some(px) = self.style.box_size {
            renderer.module_dimensions(px.get(), px.get());
        }

        if self.style.border.is_none() {
            return Ok(DynamicImage::ImageRgb8(renderer.build()));
        }

        renderer.quiet_zone(false);
        let symbol = renderer.build();
        let pad = border * module_px;

        let mut canvas = RgbImage::from_pixel(side, side, self.light());
        imageops::overlay(&mut canvas, &symbol, i64::from(pad), i64::from(pad));
        Ok(DynamicImage::ImageRgb8(canvas))
    }
}
