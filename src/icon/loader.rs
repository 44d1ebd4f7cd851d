//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在“尽可能早”的阶段执行输入校验：先确认文件存在，再看体积，最后读字节并嗅探签名。
//! 目标是尽快失败，不让明显无效的输入进入解码阶段。

use std::path::Path;

use super::source::RawImageData;
use super::{IconConfig, IconConverter, IconError};

impl IconConverter {
    /// 从本地文件加载源图原始字节。
    pub(super) fn load_from_file(
        &self,
        path: &Path,
        config: &IconConfig,
    ) -> Result<RawImageData, IconError> {
        log::info!("📁 开始读取源图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(IconError::MissingSource(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| IconError::file_system("无法读取文件信息", e))?;

        if !metadata.is_file() {
            return Err(IconError::InvalidFormat(format!(
                "源路径不是文件：{}",
                path.display()
            )));
        }

        if metadata.len() > config.max_file_size {
            return Err(IconError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path).map_err(|e| IconError::file_system("无法读取图片文件", e))?;
        let mime_hint = Self::validate_image_signature(&bytes)?;

        log::debug!("源文件签名: {} ({} 字节)", mime_hint, bytes.len());

        Ok(RawImageData { bytes, mime_hint })
    }

    /// 通过文件头魔数确认内容是图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<&'static str, IconError> {
        if bytes.is_empty() {
            return Err(IconError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| IconError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(IconError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(kind.mime_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_reported_before_any_read() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let converter = IconConverter::new(IconConfig::default());
        let path = dir.path().join("nope.png");

        let result = converter.load_from_file(&path, &IconConfig::default());

        assert!(matches!(result, Err(IconError::MissingSource(p)) if p == path));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("empty.png");
        fs::write(&path, b"").expect("write empty file failed");

        let converter = IconConverter::new(IconConfig::default());
        let result = converter.load_from_file(&path, &IconConfig::default());

        assert!(matches!(result, Err(IconError::InvalidFormat(_))));
    }

    #[test]
    fn non_image_signature_is_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("archive.png");
        // ZIP 魔数
        fs::write(&path, b"PK\x03\x04\x14\x00\x00\x00\x08\x00").expect("write zip stub failed");

        let converter = IconConverter::new(IconConfig::default());
        let result = converter.load_from_file(&path, &IconConfig::default());

        assert!(matches!(result, Err(IconError::InvalidFormat(_))));
    }

    #[test]
    fn oversized_file_hits_resource_limit() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("big.png");
        fs::write(&path, vec![0u8; 2048]).expect("write file failed");

        let config = IconConfig {
            max_file_size: 1024,
            ..IconConfig::default()
        };
        let converter = IconConverter::new(config.clone());
        let result = converter.load_from_file(&path, &config);

        assert!(matches!(result, Err(IconError::ResourceLimit(_))));
    }

    #[test]
    fn directory_is_not_a_source() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let converter = IconConverter::new(IconConfig::default());

        let result = converter.load_from_file(dir.path(), &IconConfig::default());

        assert!(matches!(result, Err(IconError::InvalidFormat(_))));
    }
}
