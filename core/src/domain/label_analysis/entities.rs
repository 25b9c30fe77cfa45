use std::io::Cursor;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use image::{DynamicImage, GenericImageView, ImageFormat};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, generate_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    ZeroToSixMonths,
    #[default]
    SixToTwelveMonths,
    OneToTwoYears,
    TwoPlusYears,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::ZeroToSixMonths,
        AgeGroup::SixToTwelveMonths,
        AgeGroup::OneToTwoYears,
        AgeGroup::TwoPlusYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::ZeroToSixMonths => "zero_to_six_months",
            AgeGroup::SixToTwelveMonths => "six_to_twelve_months",
            AgeGroup::OneToTwoYears => "one_to_two_years",
            AgeGroup::TwoPlusYears => "two_plus_years",
        }
    }

    /// Human readable label, as shown to parents and embedded in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::ZeroToSixMonths => "0–6 months",
            AgeGroup::SixToTwelveMonths => "6–12 months",
            AgeGroup::OneToTwoYears => "1–2 years",
            AgeGroup::TwoPlusYears => "2+ years",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AgeGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s || group.label() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown age group: {s}")))
    }
}

/// A decoded label photo, re-encoded as JPEG for the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelImage {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

impl LabelImage {
    pub const ACCEPTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::InvalidImage("image cannot be empty".to_string()));
        }

        let format = image::guess_format(bytes)
            .map_err(|e| CoreError::InvalidImage(format!("unrecognised image format: {}", e)))?;

        if !Self::ACCEPTED_FORMATS.contains(&format) {
            return Err(CoreError::InvalidImage(format!(
                "unsupported image format {:?}, upload a JPEG or PNG",
                format
            )));
        }

        let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| {
            tracing::warn!("Failed to decode uploaded label: {}", e);
            CoreError::InvalidImage(format!("failed to decode image: {}", e))
        })?;

        let (width, height) = decoded.dimensions();

        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
        let mut jpeg = Cursor::new(Vec::new());
        rgb.write_to(&mut jpeg, ImageFormat::Jpeg).map_err(|e| {
            tracing::error!("Failed to encode label as JPEG: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Self {
            width,
            height,
            jpeg: jpeg.into_inner(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LabelAnalysis {
    pub id: Uuid,
    pub age_group: AgeGroup,
    pub image_width: u32,
    pub image_height: u32,
    /// Markdown report produced by the model.
    pub report: String,
    pub created_at: DateTime<Utc>,
}

impl LabelAnalysis {
    pub fn new(age_group: AgeGroup, image: &LabelImage, report: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            age_group,
            image_width: image.width,
            image_height: image.height,
            report,
            created_at: now,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_images {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    pub fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([240, 200, 120, 255]));
        let mut out = Cursor::new(Vec::new());
        image
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode test png");
        out.into_inner()
    }
}
