//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconConverter` 只负责流程编排，不直接与命令行输出绑定。
//! 处理链路固定为：
//! 1. 读取源文件（存在性 → 体积 → 签名）
//! 2. 解码并统一为 RGBA
//! 3. 按 `TARGET_SIZES` 逐个重采样
//! 4. 内存中编码 ICO，一次性写入目标路径
//!
//! ## 实现思路
//!
//! - 进度通过回调 `ConversionStage` 通知调用方，由调用方决定如何展示。
//! - 记录 `load/decode/resize/encode/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::ColorType;

use super::{IconConfig, IconError, IconSize, TARGET_SIZES};

/// 图标生成器。
pub struct IconConverter {
    pub(super) config: IconConfig,
}

/// 转换过程中的阶段事件。
#[derive(Debug, Clone, Copy)]
pub enum ConversionStage<'a> {
    /// 源图已解码。
    SourceLoaded {
        path: &'a Path,
        width: u32,
        height: u32,
        color: ColorType,
    },
    /// 即将生成各尺寸条目。
    GeneratingSizes(&'a [IconSize]),
    /// 目标文件已写入。
    Written { path: &'a Path, file_size: u64 },
}

/// 一次成功转换的结果。
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub source_color: ColorType,
    /// 源图没有 alpha 通道，生成时补齐为不透明。
    pub alpha_added: bool,
    pub sizes: Vec<IconSize>,
    /// 落盘后从文件系统查询到的字节数。
    pub file_size: u64,
}

impl IconConverter {
    /// 根据配置创建生成器。
    ///
    /// # 示例
    /// ```
    /// use icon_generator::icon::{IconConfig, IconConverter};
    ///
    /// let converter = IconConverter::new(IconConfig::default());
    /// assert_eq!(converter.config().max_decoded_pixels, 40_000_000);
    /// ```
    pub fn new(config: IconConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// 处理主入口：不关心进度。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use std::path::Path;
    /// use icon_generator::icon::{IconConfig, IconConverter};
    ///
    /// let converter = IconConverter::new(IconConfig::default());
    /// let report = converter.convert(Path::new("icons/app.png"), Path::new("icons/icon.ico"))?;
    /// println!("{} bytes", report.file_size);
    /// # Ok::<(), icon_generator::icon::IconError>(())
    /// ```
    pub fn convert(&self, source: &Path, destination: &Path) -> Result<ConversionReport, IconError> {
        self.convert_with_progress(source, destination, |_| {})
    }

    pub fn convert_with_progress<P>(
        &self,
        source: &Path,
        destination: &Path,
        mut on_progress: P,
    ) -> Result<ConversionReport, IconError>
    where
        P: FnMut(ConversionStage<'_>),
    {
        let config = &self.config;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load_from_file(source, config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let decoded = self.decode_source(&raw, config)?;
        let decode_elapsed = decode_start.elapsed();
        drop(raw);

        let (source_width, source_height) = decoded.rgba.dimensions();
        on_progress(ConversionStage::SourceLoaded {
            path: source,
            width: source_width,
            height: source_height,
            color: decoded.original_color,
        });

        let upscaled = upscaled_targets(source_width, source_height);
        if let Some(largest) = upscaled.last() {
            log::warn!(
                "⚠️ 源图 {}x{} 小于 {} 个目标尺寸（最大 {}），将放大生成",
                source_width,
                source_height,
                upscaled.len(),
                largest
            );
        }

        on_progress(ConversionStage::GeneratingSizes(&TARGET_SIZES));
        let resize_start = Instant::now();
        let prepared = TARGET_SIZES
            .iter()
            .map(|&size| self.resample_for_size(&decoded, size, config))
            .collect::<Result<Vec<_>, _>>()?;
        let resize_elapsed = resize_start.elapsed();

        let encode_start = Instant::now();
        let bytes = self.encode_icon(&prepared)?;
        let file_size = self.write_icon_file(destination, &bytes)?;
        let encode_elapsed = encode_start.elapsed();

        on_progress(ConversionStage::Written {
            path: destination,
            file_size,
        });

        log::info!(
            "✅ 图标生成完成 - load={}ms decode={}ms resize={}ms encode={}ms total={}ms",
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            resize_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(ConversionReport {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source_width,
            source_height,
            source_color: decoded.original_color,
            alpha_added: decoded.alpha_added(),
            sizes: prepared.iter().map(|p| p.size).collect(),
            file_size,
        })
    }
}

/// 需要放大才能生成的目标尺寸。
fn upscaled_targets(width: u32, height: u32) -> Vec<IconSize> {
    TARGET_SIZES
        .iter()
        .copied()
        .filter(|size| width < size.width || height < size.height)
        .collect()
}
