//! # ICO 编码与落盘模块
//!
//! ## 设计思路
//!
//! 先在内存中完成整个 ICO 容器的编码，再一次性写入目标路径。
//! 解码或编码阶段失败时目标文件不会被打开，已有的旧文件保持原样。
//!
//! 每个条目都以 RGBA8 PNG 载荷写入，目录项中的位深固定为 32。

use std::path::Path;

use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};

use super::source::PreparedIconImage;
use super::{IconConverter, IconError};

impl IconConverter {
    /// 将全部条目编码为 ICO 容器字节。
    pub(crate) fn encode_icon(&self, images: &[PreparedIconImage]) -> Result<Vec<u8>, IconError> {
        if images.is_empty() {
            return Err(IconError::InvalidFormat("没有可写入的图标条目".to_string()));
        }

        let frames = images
            .iter()
            .map(|prepared| {
                IcoFrame::as_png(
                    &prepared.bytes,
                    prepared.size.width,
                    prepared.size.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| IconError::encode(format!("{} 条目编码失败", prepared.size), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut buffer = Vec::new();
        IcoEncoder::new(&mut buffer)
            .encode_images(&frames)
            .map_err(|e| IconError::encode("ICO 容器写出失败", e))?;

        log::debug!("📦 ICO 编码完成 - 条目: {} 字节: {}", frames.len(), buffer.len());

        Ok(buffer)
    }

    /// 写入目标文件（存在则覆盖），返回落盘后的实际字节数。
    pub(crate) fn write_icon_file(&self, destination: &Path, bytes: &[u8]) -> Result<u64, IconError> {
        std::fs::write(destination, bytes).map_err(|e| {
            IconError::file_system(format!("无法写入目标文件 {}", destination.display()), e)
        })?;

        let file_size = std::fs::metadata(destination)
            .map_err(|e| IconError::file_system("无法读取目标文件信息", e))?
            .len();

        Ok(file_size)
    }
}
