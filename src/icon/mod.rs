//! # 图标生成模块（icon）
//!
//! ## 设计思路
//!
//! 该模块将“读取校验 → 解码 → 补齐 alpha → 多尺寸重采样 → ICO 编码落盘”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线，负责阶段耗时日志与进度回调
//! - `loader`：负责文件存在性、体积与签名校验
//! - `pipeline`：负责解码、像素限制、alpha 补齐、重采样
//! - `encoder`：负责 ICO 容器编码与写入目标文件
//! - `config/error/source`：配置、错误、尺寸列表与中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! main.rs（参数解析 + 控制台输出）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志 + ConversionStage 回调）
//!    ├─ loader.rs（存在性 + 体积 + 签名）
//!    ├─ pipeline.rs（解码 + 像素限制 + RGBA + 重采样）
//!    └─ encoder.rs（ICO 编码 + 写文件 + 查询大小）
//!    ↓
//! 返回 ConversionReport / IconError
//! ```

mod config;
mod encoder;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{IconConfig, ResampleQuality};
pub use error::IconError;
pub use handler::{ConversionReport, ConversionStage, IconConverter};
pub use source::{IconSize, TARGET_SIZES};
