//! # 尺寸列表与中间模型
//!
//! ## 设计思路
//!
//! 将“固定目标尺寸”和“流水线中间结果”解耦：
//! - `IconSize` / `TARGET_SIZES` 表示 ICO 内的条目尺寸
//! - `RawImageData` 表示已读取但未解码的字节
//! - `DecodedSource` 表示已解码并统一为 RGBA 的源图
//! - `PreparedIconImage` 表示可直接写入 ICO 条目的 RGBA 数据

use std::fmt;

use image::{ColorType, RgbaImage};

/// ICO 条目尺寸（宽 x 高，像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl IconSize {
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Windows 图标需要的固定尺寸，按从小到大排列。
pub const TARGET_SIZES: [IconSize; 6] = [
    IconSize::square(16),
    IconSize::square(32),
    IconSize::square(48),
    IconSize::square(64),
    IconSize::square(128),
    IconSize::square(256),
];

/// 读取阶段输出：原始字节与 MIME 类型提示。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// `infer` 识别出的 MIME（用于日志与诊断）。
    pub(crate) mime_hint: &'static str,
}

/// 解码阶段输出。
pub(crate) struct DecodedSource {
    /// 统一为 8 位 RGBA 的源图。
    pub(crate) rgba: RgbaImage,
    /// 源文件原始像素格式。
    pub(crate) original_color: ColorType,
    /// 所有像素 alpha 均为 255。
    pub(crate) opaque: bool,
}

impl DecodedSource {
    /// 源图是否是补齐 alpha 通道后得到的。
    pub(crate) fn alpha_added(&self) -> bool {
        !self.original_color.has_alpha()
    }
}

/// 重采样阶段输出：单个 ICO 条目的 RGBA 像素。
pub(crate) struct PreparedIconImage {
    pub(crate) size: IconSize,
    /// RGBA 字节数组（`width * height * 4`）。
    pub(crate) bytes: Vec<u8>,
}
