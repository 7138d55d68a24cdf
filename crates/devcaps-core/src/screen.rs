//! Screen resolution categories and display size derivation

use serde::{Deserialize, Serialize};

/// Coarse screen resolution category, derived from physical pixel
/// dimensions in portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenCategory {
    /// Wide VGA, 480x800
    Wvga,
    /// Quarter HD, 540x960
    Qhd,
    /// HD, 720x1280
    Hd720,
    /// Wide Extended Graphics Array, 768x1280
    Wxga,
    /// Full HD, 1080x1920
    Hd1080,
    Unknown,
}

impl Default for ScreenCategory {
    fn default() -> Self {
        Self::Unknown
    }
}

impl ScreenCategory {
    /// Classify a portrait-oriented physical resolution.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return ScreenCategory::Unknown;
        }
        if height < 960 {
            ScreenCategory::Wvga
        } else if height < 1280 {
            ScreenCategory::Qhd
        } else if height < 1920 {
            if width < 768 {
                ScreenCategory::Hd720
            } else {
                ScreenCategory::Wxga
            }
        } else {
            ScreenCategory::Hd1080
        }
    }
}

impl std::fmt::Display for ScreenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScreenCategory::Wvga => "WVGA",
            ScreenCategory::Qhd => "qHD",
            ScreenCategory::Hd720 => "HD720",
            ScreenCategory::Wxga => "WXGA",
            ScreenCategory::Hd1080 => "HD1080",
            ScreenCategory::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Display diagonal in inches from pixel dimensions and raw DPI, rounded
/// to one decimal. Returns None unless both DPI values are positive.
pub fn display_diagonal_inches(width: u32, height: u32, dpi_x: f64, dpi_y: f64) -> Option<f64> {
    if dpi_x <= 0.0 || dpi_y <= 0.0 {
        return None;
    }
    let w = f64::from(width) / dpi_x;
    let h = f64::from(height) / dpi_y;
    let diagonal = (w * w + h * h).sqrt();
    Some((diagonal * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_thresholds() {
        assert_eq!(ScreenCategory::from_pixels(480, 800), ScreenCategory::Wvga);
        assert_eq!(ScreenCategory::from_pixels(540, 960), ScreenCategory::Qhd);
        assert_eq!(ScreenCategory::from_pixels(720, 1280), ScreenCategory::Hd720);
        assert_eq!(ScreenCategory::from_pixels(768, 1280), ScreenCategory::Wxga);
        assert_eq!(
            ScreenCategory::from_pixels(1080, 1920),
            ScreenCategory::Hd1080
        );
        assert_eq!(ScreenCategory::from_pixels(0, 0), ScreenCategory::Unknown);
    }

    #[test]
    fn test_diagonal_lumia_1020() {
        // 768x1280 at ~332 DPI is the 4.5 inch AMOLED panel
        let diagonal = display_diagonal_inches(768, 1280, 331.3, 331.3).unwrap();
        assert!((diagonal - 4.5).abs() < 0.05, "got {diagonal}");
    }

    #[test]
    fn test_diagonal_requires_positive_dpi() {
        assert_eq!(display_diagonal_inches(768, 1280, 0.0, 331.3), None);
        assert_eq!(display_diagonal_inches(768, 1280, 331.3, -1.0), None);
    }

    #[test]
    fn test_diagonal_rounded_to_one_decimal() {
        let diagonal = display_diagonal_inches(1080, 1920, 441.0, 441.0).unwrap();
        assert_eq!(diagonal, 5.0);
    }
}
