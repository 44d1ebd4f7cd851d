//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 命令行层只区分两类失败：源文件缺失、转换失败。
//! 细粒度的 `IconError` 透明地保留在 `Conversion` 内部，原因链用于诊断输出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 手写 `From<IconError>`：`IconError::MissingSource` 上浮为独立分类，其余归入转换失败。
//! - `exit_code` 决定进程退出码。

use std::path::PathBuf;

use crate::icon::IconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 源文件在开始处理前就不存在
    #[error("源文件不存在：{}", .0.display())]
    MissingSource(PathBuf),

    /// 解码 / 重采样 / 编码 / 写入中的任意失败
    #[error(transparent)]
    Conversion(IconError),
}

impl AppError {
    /// 对应的进程退出码。
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingSource(_) => 1,
            Self::Conversion(_) => 2,
        }
    }
}

impl From<IconError> for AppError {
    fn from(error: IconError) -> Self {
        match error {
            IconError::MissingSource(path) => Self::MissingSource(path),
            other => Self::Conversion(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn missing_source_is_lifted_to_its_own_kind() {
        let err = AppError::from(IconError::MissingSource(PathBuf::from("a.png")));
        assert!(matches!(err, AppError::MissingSource(ref p) if p == &PathBuf::from("a.png")));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn other_failures_are_conversion_errors() {
        let err = AppError::from(IconError::Resize("boom".to_string()));
        assert!(matches!(err, AppError::Conversion(IconError::Resize(_))));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn conversion_error_keeps_underlying_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(IconError::file_system("无法写入目标文件", io));

        let cause = err.source().expect("io error should be kept as source");
        assert_eq!(cause.to_string(), "denied");
        assert!(err.to_string().starts_with("文件错误"));
    }
}
