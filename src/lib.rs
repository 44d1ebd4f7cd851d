//! # 图标生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   clap 参数 ── env_logger ── 退出码              │
//! │     │                                                    │
//! │     ├─ console ── 进度行 / 千位分隔 / 错误原因链          │
//! │     │                                                    │
//! │     ↓  Result<ConversionReport, AppError>                │
//! │  ┌─ error ───── AppError（源文件缺失 / 转换失败）         │
//! │  │                                                       │
//! │  └─ icon ────── IconConverter                            │
//! │      ├─ loader    存在性 + 体积 + 签名                    │
//! │      ├─ pipeline  解码 + RGBA + 多尺寸重采样              │
//! │      └─ encoder   ICO 编码 + 写文件                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，决定进程退出码 |
//! | [`icon`] | PNG → 多尺寸 ICO 的完整流水线 |
//! | [`console`] | 面向用户的进度与错误输出 |

pub mod console;
pub mod error;
pub mod icon;
