//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `IconConfig`，保证运行时行为可观测、可调整、可测试。
//! 其中重采样档位（quality / balanced / speed）作为高层语义，映射到底层滤镜。
//! 目标尺寸列表不属于配置，固定为 [`TARGET_SIZES`](super::TARGET_SIZES)。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置（Lanczos3）。
//! - `ResampleQuality` 负责档位字符串解析与反向输出。
//! - `apply_resample_quality` 将档位转换为具体滤镜。
//! - `infer_resample_quality` 用于从当前配置反推档位（日志与报告展示）。

use std::str::FromStr;

use image::imageops::FilterType;

use super::IconError;

/// 图标生成配置。
///
/// 字段覆盖了读取、解码与重采样三个阶段。
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// 读取源文件时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 重采样滤镜。
    pub resize_filter: FilterType,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            resize_filter: FilterType::Lanczos3,
        }
    }
}

/// 重采样档位（面向用户语义）。
///
/// - `Quality`：Lanczos3，小尺寸图标最清晰
/// - `Balanced`：CatmullRom
/// - `Speed`：Triangle（双线性）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleQuality {
    Quality,
    Balanced,
    Speed,
}

impl ResampleQuality {
    /// 将档位输出为稳定字符串。
    ///
    /// # 示例
    /// ```
    /// use icon_generator::icon::ResampleQuality;
    ///
    /// assert_eq!(ResampleQuality::Speed.as_str(), "speed");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl FromStr for ResampleQuality {
    type Err = IconError;

    /// 从外部字符串解析档位（忽略大小写与首尾空白）。
    ///
    /// # 示例
    /// ```
    /// use icon_generator::icon::ResampleQuality;
    ///
    /// let p: ResampleQuality = " Balanced ".parse()?;
    /// assert_eq!(p, ResampleQuality::Balanced);
    /// # Ok::<(), icon_generator::icon::IconError>(())
    /// ```
    fn from_str(profile: &str) -> Result<Self, Self::Err> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(IconError::InvalidFormat(format!(
                "未知重采样档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }
}

impl IconConfig {
    /// 基于当前滤镜反推重采样档位。
    ///
    /// 不在档位映射内的滤镜（Nearest / Gaussian）按最接近的档位归类。
    pub fn infer_resample_quality(&self) -> ResampleQuality {
        match self.resize_filter {
            FilterType::Lanczos3 => ResampleQuality::Quality,
            FilterType::CatmullRom | FilterType::Gaussian => ResampleQuality::Balanced,
            FilterType::Triangle | FilterType::Nearest => ResampleQuality::Speed,
        }
    }

    /// 应用指定重采样档位到实际滤镜。
    pub fn apply_resample_quality(&mut self, quality: ResampleQuality) {
        self.resize_filter = match quality {
            ResampleQuality::Quality => FilterType::Lanczos3,
            ResampleQuality::Balanced => FilterType::CatmullRom,
            ResampleQuality::Speed => FilterType::Triangle,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_lanczos() {
        let config = IconConfig::default();
        assert_eq!(config.resize_filter, FilterType::Lanczos3);
        assert_eq!(config.infer_resample_quality(), ResampleQuality::Quality);
    }

    #[test]
    fn quality_profiles_round_trip_through_config() {
        for quality in [
            ResampleQuality::Quality,
            ResampleQuality::Balanced,
            ResampleQuality::Speed,
        ] {
            let mut config = IconConfig::default();
            config.apply_resample_quality(quality);
            assert_eq!(config.infer_resample_quality(), quality);
            assert_eq!(quality.as_str().parse::<ResampleQuality>().ok(), Some(quality));
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!("  SPEED ".parse::<ResampleQuality>().ok(), Some(ResampleQuality::Speed));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        assert!(matches!(
            "ultra".parse::<ResampleQuality>(),
            Err(IconError::InvalidFormat(_))
        ));
    }
}
