//! # 配置模块
//!
//! ## 设计思路
//!
//! 头像会以 Base64 形式直接嵌进签名，体积过大会让邮件“发胖”。
//! 所有可调参数集中在 `ThumbnailConfig`：目标边长、JPEG 质量、
//! 以及读取和解码阶段的资源上限。
//!
//! ## 实现思路
//!
//! - `Default` 对应表单上传头像时的参数：最长边 300px，质量 0.82。
//! - `ThumbnailProfile`（quality / balanced / speed）只决定缩放滤镜，
//!   作为面向用户的高层语义，映射到底层参数。

use image::imageops::FilterType;

use super::ImageError;

/// 浏览器 `toDataURL("image/jpeg", q)` 在质量越界时使用的默认值。
const DEFAULT_JPEG_QUALITY: f32 = 0.92;

/// 缩略图处理配置。
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// 输出图片宽/高的最大值（像素），只缩小不放大。
    pub max_dimension: u32,
    /// JPEG 质量，取值 `(0, 1]`。
    pub quality: f32,
    /// 允许读取的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 缩放滤镜。
    pub resize_filter: FilterType,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_dimension: 300,
            quality: 0.82,
            max_file_size: 20 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            resize_filter: FilterType::Triangle,
        }
    }
}

impl ThumbnailConfig {
    /// 换算为编码器使用的 1~100 质量值。
    ///
    /// 越界（≤0、>1 或 NaN）时与浏览器一致，回退到 0.92。
    pub(crate) fn jpeg_quality(&self) -> u8 {
        let quality = if self.quality > 0.0 && self.quality <= 1.0 {
            self.quality
        } else {
            DEFAULT_JPEG_QUALITY
        };
        ((quality * 100.0).round() as u8).clamp(1, 100)
    }

    /// 最长边为 0 时无法生成头像，直接拒绝，而不是退化成 1×1 图片。
    pub(crate) fn validate(&self) -> Result<(), ImageError> {
        if self.max_dimension == 0 {
            return Err(ImageError::InvalidConfig(
                "max_dimension 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn apply_profile(&mut self, profile: ThumbnailProfile) {
        self.resize_filter = match profile {
            ThumbnailProfile::Quality => FilterType::CatmullRom,
            ThumbnailProfile::Balanced => FilterType::Triangle,
            ThumbnailProfile::Speed => FilterType::Nearest,
        };
    }

    pub(crate) fn infer_profile(&self) -> ThumbnailProfile {
        match self.resize_filter {
            FilterType::Nearest => ThumbnailProfile::Speed,
            FilterType::Triangle => ThumbnailProfile::Balanced,
            _ => ThumbnailProfile::Quality,
        }
    }
}

/// 缩略图性能档位。
///
/// - `Quality`：CatmullRom，边缘更锐利
/// - `Balanced`：Triangle（默认）
/// - `Speed`：Nearest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailProfile {
    Quality,
    Balanced,
    Speed,
}

impl ThumbnailProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use signature_studio::thumbnail::ThumbnailProfile;
    ///
    /// let p = ThumbnailProfile::from_str("Balanced")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), signature_studio::thumbnail::ImageError>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(profile: &str) -> Result<Self, ImageError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ImageError::InvalidFormat(format!(
                "未知性能档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_dimension_is_rejected() {
        let config = ThumbnailConfig {
            max_dimension: 0,
            ..ThumbnailConfig::default()
        };
        assert!(matches!(config.validate(), Err(ImageError::InvalidConfig(_))));
        assert!(ThumbnailConfig::default().validate().is_ok());
    }

    #[test]
    fn default_quality_maps_to_82() {
        assert_eq!(ThumbnailConfig::default().jpeg_quality(), 82);
    }

    #[test]
    fn out_of_range_quality_falls_back_to_browser_default() {
        for quality in [0.0, -1.0, 1.5, f32::NAN] {
            let config = ThumbnailConfig {
                quality,
                ..ThumbnailConfig::default()
            };
            assert_eq!(config.jpeg_quality(), 92, "quality {quality} should fall back");
        }

        let full = ThumbnailConfig {
            quality: 1.0,
            ..ThumbnailConfig::default()
        };
        assert_eq!(full.jpeg_quality(), 100);
    }

    #[test]
    fn profile_round_trips_through_config() {
        let mut config = ThumbnailConfig::default();
        assert_eq!(config.infer_profile(), ThumbnailProfile::Balanced);

        for profile in [ThumbnailProfile::Quality, ThumbnailProfile::Speed, ThumbnailProfile::Balanced] {
            config.apply_profile(profile);
            assert_eq!(config.infer_profile(), profile);
        }
    }

    #[test]
    fn unknown_profile_is_rejected() {
        assert!(matches!(
            ThumbnailProfile::from_str("ultra"),
            Err(ImageError::InvalidFormat(_))
        ));
        assert_eq!(ThumbnailProfile::from_str(" SPEED ").ok(), Some(ThumbnailProfile::Speed));
    }
}
