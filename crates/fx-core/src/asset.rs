use image::imageops::flip_vertical_in_place;
pub use image::RgbaImage;

use crate::error::FxError;

/// Decode an encoded image into RGBA8 rows ordered bottom-up, so texture
/// coordinate `(0, 0)` addresses the lower-left pixel like the pointer sample.
pub fn decode_image(url: &str, bytes: &[u8]) -> Result<RgbaImage, FxError> {
    let decoded = image::load_from_memory(bytes).map_err(|source| FxError::AssetDecode {
        url: url.to_string(),
        source,
    })?;
    let mut rgba = decoded.to_rgba8();
    flip_vertical_in_place(&mut rgba);
    log::info!(
        "[asset] decoded {} ({}x{})",
        url,
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}
