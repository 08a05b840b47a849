//! Fonts, logo and brand settings shared read-only by every render.
//!
//! Loading never fails: a missing or corrupt asset is logged and replaced by the
//! built-in Helvetica pair or the text logo.

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use tracing::{info, warn};

use crate::canvas::Color;
use crate::config::BrandConfig;
use crate::error::ResourceError;
use crate::metrics::{FontFace, FontMetrics, TextMetrics};

#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub site_name: String,
    pub primary_color: Color,
    pub website: Option<String>,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            site_name: "Safari Atlas".to_string(),
            primary_color: Color::rgb(0x1F, 0x6F, 0x5C),
            website: None,
        }
    }
}

impl Brand {
    /// Up to two initials taken from the site name's words.
    pub fn initials(&self) -> String {
        let initials: String = self
            .site_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "IT".to_string()
        } else {
            initials
        }
    }
}

#[derive(Debug, Clone)]
pub enum FontProgram {
    /// Standard Helvetica / Helvetica-Bold, not embedded.
    Builtin,
    Embedded { regular: Arc<[u8]>, bold: Arc<[u8]> },
}

#[derive(Debug, Clone)]
pub struct FontSet {
    regular: FontMetrics,
    bold: FontMetrics,
    program: FontProgram,
}

impl FontSet {
    pub fn builtin() -> Self {
        Self {
            regular: FontMetrics::helvetica(),
            bold: FontMetrics::helvetica_bold(),
            program: FontProgram::Builtin,
        }
    }

    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self, ResourceError> {
        let regular_metrics = FontMetrics::from_font_bytes(&regular)?;
        let regular: Arc<[u8]> = regular.into();
        let (bold_metrics, bold) = match bold {
            Some(bytes) => (FontMetrics::from_font_bytes(&bytes)?, Arc::<[u8]>::from(bytes)),
            None => (regular_metrics.clone(), regular.clone()),
        };
        Ok(Self {
            regular: regular_metrics,
            bold: bold_metrics,
            program: FontProgram::Embedded { regular, bold },
        })
    }

    /// Loads custom fonts, falling back to the built-in pair on any failure.
    pub fn load_or_builtin(regular: Option<&Path>, bold: Option<&Path>) -> Self {
        let Some(regular) = regular else {
            return Self::builtin();
        };
        let attempt = || -> Result<Self, ResourceError> {
            let regular = read_file(regular)?;
            let bold = bold.map(read_file).transpose()?;
            Self::from_bytes(regular, bold)
        };
        match attempt() {
            Ok(fonts) => {
                info!("🔤 Loaded custom font from {}", regular.display());
                fonts
            }
            Err(e) => {
                warn!("⚠️ Falling back to built-in Helvetica: {}", e);
                Self::builtin()
            }
        }
    }

    pub fn program(&self) -> &FontProgram {
        &self.program
    }

    pub fn metrics(&self, face: FontFace) -> &FontMetrics {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

impl TextMetrics for FontSet {
    fn width(&self, face: FontFace, size: f32, text: &str) -> f32 {
        self.metrics(face).text_width(size, text)
    }
}

/// Decoded logo pixels, alpha already composited onto white.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

impl LogoImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ResourceError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| ResourceError::Logo(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(ResourceError::Logo("logo has no pixels".into()));
        }
        let mut rgb = Vec::with_capacity((width_px * height_px * 3) as usize);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = a as f32 / 255.0;
            for channel in [r, g, b] {
                rgb.push((channel as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8);
            }
        }
        Ok(Self {
            width_px,
            height_px,
            rgb,
        })
    }

    /// Accepts raw base64 or a `data:image/...;base64,` URL.
    pub fn from_base64(data: &str) -> Result<Self, ResourceError> {
        let payload = match data.split_once(";base64,") {
            Some((_, rest)) => rest,
            None => data,
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| ResourceError::Logo(format!("invalid base64: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width_px as f32 / self.height_px as f32
    }
}

#[derive(Debug, Clone)]
pub struct RenderResources {
    pub brand: Brand,
    pub fonts: FontSet,
    pub logo: Option<LogoImage>,
}

impl RenderResources {
    pub fn builtin(brand: Brand) -> Self {
        Self {
            brand,
            fonts: FontSet::builtin(),
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: LogoImage) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn load(config: &BrandConfig) -> Self {
        let fonts = FontSet::load_or_builtin(config.font_regular.as_deref(), config.font_bold.as_deref());
        let logo = load_logo(config);
        Self {
            brand: config.brand.clone(),
            fonts,
            logo,
        }
    }
}

fn load_logo(config: &BrandConfig) -> Option<LogoImage> {
    let result = if let Some(path) = &config.logo_path {
        read_file(path).and_then(|bytes| LogoImage::from_bytes(&bytes))
    } else if let Some(data) = &config.logo_base64 {
        LogoImage::from_base64(data)
    } else {
        return None;
    };
    match result {
        Ok(logo) => {
            info!("🖼️ Loaded brand logo ({}x{})", logo.width_px, logo.height_px);
            Some(logo)
        }
        Err(e) => {
            warn!("⚠️ Using text logo: {}", e);
            None
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ResourceError> {
    std::fs::read(path).map_err(|source| ResourceError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, pixel);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn initials_from_site_name() {
        let brand = Brand {
            site_name: "serengeti trails co".into(),
            ..Brand::default()
        };
        assert_eq!(brand.initials(), "ST");
        let empty = Brand {
            site_name: "  ".into(),
            ..Brand::default()
        };
        assert_eq!(empty.initials(), "IT");
    }

    #[test]
    fn transparent_logo_pixels_become_white() {
        let logo = LogoImage::from_bytes(&png_bytes(4, 2, Rgba([0, 0, 0, 0]))).unwrap();
        assert_eq!((logo.width_px, logo.height_px), (4, 2));
        assert_eq!(logo.rgb.len(), 4 * 2 * 3);
        assert!(logo.rgb.iter().all(|c| *c == 255));
        assert_eq!(logo.aspect_ratio(), 2.0);
    }

    #[test]
    fn logo_from_data_url() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes(3, 3, Rgba([10, 20, 30, 255])));
        let logo = LogoImage::from_base64(&format!("data:image/png;base64,{encoded}")).unwrap();
        assert_eq!(&logo.rgb[..3], &[10, 20, 30]);
    }

    #[test]
    fn broken_assets_fall_back() {
        assert!(LogoImage::from_bytes(b"definitely not a png").is_err());
        let config = BrandConfig {
            font_regular: Some("/nonexistent/font.ttf".into()),
            logo_path: Some("/nonexistent/logo.png".into()),
            ..BrandConfig::default()
        };
        let resources = RenderResources::load(&config);
        assert!(matches!(resources.fonts.program(), FontProgram::Builtin));
        assert!(resources.logo.is_none());
    }
}
