use crate::domain::{
    common::entities::app_errors::CoreError, label_analysis::entities::LabelImage,
};

/// Smallest width and height, in pixels, a label photo must have.
pub const MIN_LABEL_DIMENSION: u32 = 300;

/// Largest upload accepted before decoding.
pub const MAX_LABEL_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub const UNCLEAR_IMAGE_WARNING: &str =
    "Please upload a clearer image with visible nutritional values and ingredients.";

pub fn is_image_clear(width: u32, height: u32) -> bool {
    width >= MIN_LABEL_DIMENSION && height >= MIN_LABEL_DIMENSION
}

pub fn ensure_image_clear(image: &LabelImage) -> Result<(), CoreError> {
    if is_image_clear(image.width, image.height) {
        Ok(())
    } else {
        Err(CoreError::ImageNotClear {
            width: image.width,
            height: image.height,
        })
    }
}

pub fn ensure_upload_size(len: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::InvalidImage("image cannot be empty".to_string()));
    }
    if len > MAX_LABEL_IMAGE_BYTES {
        return Err(CoreError::InvalidImage(format!(
            "image too large, max size is {} bytes",
            MAX_LABEL_IMAGE_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clarity_boundary() {
        assert!(is_image_clear(300, 300));
        assert!(is_image_clear(1024, 768));
        assert!(!is_image_clear(299, 300));
        assert!(!is_image_clear(300, 299));
        assert!(!is_image_clear(120, 80));
    }

    #[test]
    fn test_ensure_image_clear_reports_dimensions() {
        let image = LabelImage {
            width: 640,
            height: 200,
            jpeg: Vec::new(),
        };

        assert_eq!(
            ensure_image_clear(&image),
            Err(CoreError::ImageNotClear {
                width: 640,
                height: 200
            })
        );
    }

    #[test]
    fn test_upload_size_limits() {
        assert!(ensure_upload_size(1).is_ok());
        assert!(ensure_upload_size(MAX_LABEL_IMAGE_BYTES).is_ok());
        assert!(ensure_upload_size(0).is_err());
        assert!(ensure_upload_size(MAX_LABEL_IMAGE_BYTES + 1).is_err());
    }
}
