pub mod address;
pub mod chatrooms;
pub mod drafts;
pub mod health;
pub mod media;
pub mod messages;
pub mod posts;

use base64::Engine;
use dongne_core::store::ImageUpload;
use serde::Deserialize;
use ts_rs::TS;

use crate::error::AppError;

/// An image sent inline as base64
#[derive(Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ImagePayload {
    file_name: String,
    mime_type: String,
    data: String, // base64
}

/// Raster image types; SVG is excluded since it can carry script
fn is_accepted_image_type(mime_type: &str) -> bool {
    let mime_type = mime_type.to_ascii_lowercase();
    mime_type.starts_with("image/")
        && mime_type.len() > "image/".len()
        && !mime_type.starts_with("image/svg")
        && mime_type
            .bytes()
            .all(|b| b.is_ascii_graphic() && b != b';' && b != b',')
}

impl ImagePayload {
    pub fn decode(self) -> Result<ImageUpload, AppError> {
        if !is_accepted_image_type(&self.mime_type) {
            return Err(AppError::BadRequest(format!(
                "Unsupported image type: {}",
                self.mime_type.escape_debug()
            )));
        }
        let data = base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| AppError::BadRequest(format!("Invalid base64 image data: {e}")))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("Empty image".into()));
        }
        Ok(ImageUpload {
            file_name: self.file_name,
            content_type: self.mime_type,
            data,
        })
    }
}
