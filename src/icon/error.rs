//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图标生成链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时保留底层 `#[source]`，
//! 让命令行可以逐级打印原因链作为诊断信息。

use std::path::PathBuf;

/// 图标生成统一错误类型。
///
/// 该类型会在入口处被上转为 `AppError`，并决定进程退出码。
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("源文件不存在：{}", .0.display())]
    MissingSource(PathBuf),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{context}")]
    Decode {
        context: String,
        #[source]
        source: image::ImageError,
    },

    #[error("缩放错误：{0}")]
    Resize(String),

    #[error("编码错误：{context}")]
    Encode {
        context: String,
        #[source]
        source: image::ImageError,
    },

    #[error("文件错误：{context}")]
    FileSystem {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl IconError {
    pub(crate) fn decode(context: impl Into<String>, source: image::ImageError) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn encode(context: impl Into<String>, source: image::ImageError) -> Self {
        Self::Encode {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn file_system(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileSystem {
            context: context.into(),
            source,
        }
    }
}
