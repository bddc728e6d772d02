//! # 解码与缩放流水线
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 缩略图 → JPEG Data URL”集中管理，
//! 先读 header 尺寸做资源检查，再进行完整解码，避免超大图片吃满内存。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸，按像素与内存上限快速拒绝
//! 2. 完整解码，并按 EXIF Orientation 旋转/翻转（与浏览器绘制到 canvas 的结果一致）
//! 3. 按 `min(max/w, max/h, 1)` 等比缩小（从不放大），四舍五入取整
//! 4. 丢弃透明通道，按配置质量编码为 JPEG
//! 5. Base64 编码为 `data:image/jpeg;base64,...`

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use fast_image_resize as fr;
use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageDecoder, Rgba};

use super::source::{RawImageData, Thumbnail};
use super::{ImageError, ThumbnailConfig, ThumbnailHandler};

/// 计算等比缩放后的尺寸：只缩小不放大，每边至少 1 像素。
pub(crate) fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }

    let max = max_dimension as f64;
    let scale = (max / width as f64).min(max / height as f64).min(1.0);

    let target_width = ((width as f64 * scale).round() as u32).max(1);
    let target_height = ((height as f64 * scale).round() as u32).max(1);
    (target_width, target_height)
}

impl ThumbnailHandler {
    /// 将原始字节解码、缩放并编码为可嵌入签名的缩略图。
    pub(crate) fn decode_and_encode(
        raw: RawImageData,
        config: &ThumbnailConfig,
    ) -> Result<Thumbnail, ImageError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;
        Self::validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded = Self::decode_oriented(&raw.bytes)?;

        let (raw_width, raw_height) = decoded.dimensions();
        Self::validate_pixel_limits(config, raw_width, raw_height)?;

        let (width, height) = fit_within(raw_width, raw_height, config.max_dimension);
        let resized = if (width, height) == (raw_width, raw_height) {
            decoded
        } else {
            Self::resize(decoded, width, height, config)
        };

        let data_url = Self::encode_jpeg_data_url(resized, config.jpeg_quality())?;

        log::info!(
            "✅ 缩略图生成成功 - 来源: {} 原始尺寸: {}x{} 输出尺寸: {}x{} 体积: {}KB",
            raw.source_hint,
            raw_width,
            raw_height,
            width,
            height,
            data_url.len() / 1024
        );

        Ok(Thumbnail {
            width,
            height,
            data_url,
        })
    }

    /// 完整解码并应用 EXIF 方向，之后的宽高即为显示方向上的宽高。
    fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
        let mut decoder = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageError::InvalidFormat(format!("无法识别图片格式：{}", e)))?
            .into_decoder()
            .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;

        let orientation = decoder.orientation().unwrap_or_else(|e| {
            log::debug!("⚠️ 读取 EXIF 方向失败，按原方向处理：{}", e);
            Orientation::NoTransforms
        });

        let mut image = DynamicImage::from_decoder(decoder)
            .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;

        if orientation != Orientation::NoTransforms {
            log::debug!("🔄 按 EXIF 方向校正：{:?}", orientation);
            image.apply_orientation(orientation);
        }
        Ok(image)
    }

    /// 仅通过内存中的图片头信息读取宽高。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| ImageError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(
        config: &ThumbnailConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &ThumbnailConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ImageError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(ImageError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    fn resize(image: DynamicImage, width: u32, height: u32, config: &ThumbnailConfig) -> DynamicImage {
        match Self::resize_with_fast_image_resize(&image, width, height, config.resize_filter) {
            Ok(resized) => resized,
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                    err
                );
                image.resize_exact(width, height, config.resize_filter)
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        target_width: u32,
        target_height: u32,
        filter: image::imageops::FilterType,
    ) -> Result<DynamicImage, ImageError> {
        let src = image.to_rgba8();
        let (src_width, src_height) = src.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            src.into_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(
            Self::to_fast_filter(filter),
        ));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
            target_width,
            target_height,
            dst_image.into_vec(),
        )
        .ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
        match filter {
            image::imageops::FilterType::Nearest => fr::FilterType::Box,
            image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
            image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
            image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
            image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }

    /// JPEG 不支持透明通道，编码前统一转为 RGB。
    fn encode_jpeg_data_url(image: DynamicImage, quality: u8) -> Result<String, ImageError> {
        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| ImageError::Encode(format!("JPEG 编码失败：{}", e)))?;

        Ok(format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(&buffer)
        ))
    }
}
