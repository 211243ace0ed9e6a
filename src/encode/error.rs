use qrcode::types::QrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode payload: {0}")]
    Qr(#[from] QrError),

    #[error(
        "image too large: {modules} modules with a {border}-module border at {module_px}px per module exceeds {max}px per side",
        max = crate::encode::MAX_SIDE_PX
    )]
    TooLarge {
        modules: u32,
        border: u32,
        module_px: u32,
    },
}
