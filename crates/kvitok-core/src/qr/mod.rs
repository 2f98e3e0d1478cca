//! QR payload reading from receipt images.

pub mod fns;

pub use fns::{parse_fiscal_payload, FnsFragment};

use tracing::debug;

/// Decode a QR code from raw image bytes.
///
/// Best-effort enrichment: returns `None` when the bytes are not a decodable
/// image, no code is found, or decoding fails. Never an error — a missing QR
/// must not abort the pipeline.
pub fn read_qr(image_bytes: &[u8]) -> Option<String> {
    let gray = image::load_from_memory(image_bytes).ok()?.to_luma8();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        gray.width() as usize,
        gray.height() as usize,
        |x, y| gray.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    debug!("QR detection found {} candidate grid(s)", grids.len());

    for grid in grids {
        if let Ok((_meta, content)) = grid.decode() {
            if !content.is_empty() {
                return Some(content);
            }
        }
    }

    None
}

/// Decode a QR code and parse it as a fiscal payload in one step.
pub fn read_fiscal_qr(image_bytes: &[u8]) -> Option<(String, Option<FnsFragment>)> {
    let payload = read_qr(image_bytes)?;
    let fragment = parse_fiscal_payload(&payload);
    Some((payload, fragment))
}
