// src/qr.rs
//! QR rendering of generated secrets as PNG data URIs.

use base64::Engine;
use image::imageops::{self, FilterType};
use image::{GrayImage, ImageEncoder, Luma};
use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

/// Side of the rendered PNG in pixels.
pub const QR_WIDTH: u32 = 200;
/// Quiet-zone border in modules.
const MARGIN: u32 = 1;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("PNG encode error: {0}")]
    Png(String),
}

/// PNG bytes of a high error-correction QR code encoding `text`, scaled to
/// `width` x `width` pixels.
pub fn render_qr_png(text: &str, width: u32) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = modules + MARGIN * 2;

    // One pixel per module, then scaled up
    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));
    for y in 0..modules {
        for x in 0..modules {
            if colors[(y * modules + x) as usize] == Color::Dark {
                img.put_pixel(x + MARGIN, y + MARGIN, Luma([0u8]));
            }
        }
    }

    let width = width.max(side);
    let scaled = imageops::resize(&img, width, width, FilterType::Nearest);

    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(scaled.as_raw(), width, width, image::ExtendedColorType::L8)
        .map_err(|e| RenderError::Png(e.to_string()))?;

    Ok(buf)
}

pub fn try_render_qr(text: &str) -> Result<String, RenderError> {
    let png = render_qr_png(text, QR_WIDTH)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}

/// Data URI of the QR code for `text`, or an empty string if rendering
/// fails.
pub fn render_qr(text: &str) -> String {
    try_render_qr(text).unwrap_or_else(|e| {
        log::error!("Error generating QR code: {}", e);
        String::new()
    })
}
