//! # 解码与重采样流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGBA → 各尺寸条目”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低异常输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 读取 header 尺寸，按像素与内存上限快速拒绝
//! 2. 完整解码
//! 3. 统一转换为 RGBA（无 alpha 的源图补齐为完全不透明）
//! 4. 对每个目标尺寸：等比缩放到正方形内，居中放到透明画布上
//! 5. 缩放优先走 `fast_image_resize`，失败时回退 `image::resize_exact`

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba, RgbaImage};
use std::io::Cursor;

use super::source::{DecodedSource, PreparedIconImage, RawImageData};
use super::{IconConfig, IconConverter, IconError, IconSize};

impl IconConverter {
    /// 将原始字节解码为 RGBA 源图。
    pub(crate) fn decode_source(
        &self,
        raw: &RawImageData,
        config: &IconConfig,
    ) -> Result<DecodedSource, IconError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;
        Self::validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| IconError::decode(format!("图片解码失败（{}）", raw.mime_hint), e))?;

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(IconError::InvalidFormat(format!(
                "图片尺寸无效：{}x{}",
                width, height
            )));
        }

        let original_color = decoded.color();
        if !original_color.has_alpha() {
            log::info!("🎨 源图缺少 alpha 通道（{:?}），补齐为不透明 RGBA", original_color);
        }
        let rgba = decoded.into_rgba8();
        let opaque = rgba.pixels().all(|pixel| pixel.0[3] == u8::MAX);

        log::info!(
            "✅ 源图解码成功 - 类型: {} 尺寸: {}x{} 色彩: {:?}",
            raw.mime_hint,
            width,
            height,
            original_color
        );

        Ok(DecodedSource {
            rgba,
            original_color,
            opaque,
        })
    }

    /// 按目标尺寸生成单个 ICO 条目。
    ///
    /// 输出永远是 `size.width x size.height` 的 RGBA；非正方形源图保持宽高比，
    /// 空白区域为完全透明。
    pub(crate) fn resample_for_size(
        &self,
        decoded: &DecodedSource,
        size: IconSize,
        config: &IconConfig,
    ) -> Result<PreparedIconImage, IconError> {
        let source = &decoded.rgba;
        let (src_width, src_height) = source.dimensions();
        let (fit_width, fit_height) =
            fit_within(src_width, src_height, size.width, size.height);

        let mut resized = if (fit_width, fit_height) == (src_width, src_height) {
            source.clone()
        } else {
            match Self::resize_with_fast_image_resize(source, fit_width, fit_height, config.resize_filter) {
                Ok(resized) => resized,
                Err(err) => {
                    log::warn!(
                        "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                        err
                    );
                    DynamicImage::ImageRgba8(source.clone())
                        .resize_exact(fit_width, fit_height, config.resize_filter)
                        .into_rgba8()
                }
            }
        };

        // 卷积取整可能让不透明像素的 alpha 落到 254
        if decoded.opaque {
            resized.pixels_mut().for_each(|pixel| pixel.0[3] = u8::MAX);
        }

        let canvas = if (fit_width, fit_height) == (size.width, size.height) {
            resized
        } else {
            let (offset_x, offset_y) = centered_offset(fit_width, fit_height, size.width, size.height);
            let mut canvas = RgbaImage::from_pixel(size.width, size.height, Rgba([0, 0, 0, 0]));
            image::imageops::overlay(&mut canvas, &resized, offset_x as i64, offset_y as i64);
            canvas
        };

        let bytes = canvas.into_raw();
        let expected_len = (size.width as usize)
            .checked_mul(size.height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| IconError::ResourceLimit("图标尺寸导致内存溢出风险".to_string()))?;

        if bytes.len() != expected_len {
            return Err(IconError::Resize(format!(
                "{} 条目像素数据长度异常：{}（期望 {}）",
                size,
                bytes.len(),
                expected_len
            )));
        }

        log::debug!(
            "🧩 生成条目 {}（内容 {}x{}，filter={:?}）",
            size,
            fit_width,
            fit_height,
            config.resize_filter
        );

        Ok(PreparedIconImage { size, bytes })
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), IconError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| IconError::file_system("无法识别图片格式", e))?;

        if reader.format().is_none() {
            return Err(IconError::InvalidFormat("不支持的图片格式".to_string()));
        }

        reader
            .into_dimensions()
            .map_err(|e| IconError::decode("无法读取图片尺寸", e))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(config: &IconConfig, width: u32, height: u32) -> Result<(), IconError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| IconError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(IconError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &IconConfig,
        width: u32,
        height: u32,
    ) -> Result<(), IconError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| IconError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(IconError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    fn resize_with_fast_image_resize(
        source: &RgbaImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RgbaImage, IconError> {
        let (src_width, src_height) = source.dimensions();

        let src_image = fr::images::ImageRef::new(
            src_width,
            src_height,
            source.as_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| IconError::Resize(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(
            Self::to_fast_filter(filter),
        ));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| IconError::Resize(format!("fast_image_resize 执行失败：{}", e)))?;

        ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
            .ok_or_else(|| IconError::Resize("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}

/// 在 `box_width x box_height` 内等比放置 `width x height`，返回放置后的尺寸。
///
/// 结果每边至少 1 像素，且不超过目标框。
pub(crate) fn fit_within(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    let scale = (box_width as f64 / width as f64).min(box_height as f64 / height as f64);
    let fit_width = ((width as f64 * scale).round() as u32).clamp(1, box_width);
    let fit_height = ((height as f64 * scale).round() as u32).clamp(1, box_height);
    (fit_width, fit_height)
}

fn centered_offset(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    ((box_width - width) / 2, (box_height - height) / 2)
}
