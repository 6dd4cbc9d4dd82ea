use crate::error::ExportError;
use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};

const MODULE_PX: u32 = 8;
const QUIET_ZONE: u32 = 4;

/// Renders `payload` as a QR code into an in-memory greyscale bitmap.
pub fn qr_image(payload: &str) -> Result<GrayImage, ExportError> {
    let code = QrCode::new(payload.as_bytes())?;
    let modules = code.width() as u32;
    let side = (modules + 2 * QUIET_ZONE) * MODULE_PX;

    Ok(GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / MODULE_PX).checked_sub(QUIET_ZONE);
        let my = (y / MODULE_PX).checked_sub(QUIET_ZONE);
        match (mx, my) {
            (Some(mx), Some(my)) if mx < modules && my < modules => {
                if code[(mx as usize, my as usize)] == Color::Dark {
                    Luma([0u8])
                } else {
                    Luma([255u8])
                }
            }
            _ => Luma([255u8]),
        }
    }))
}
