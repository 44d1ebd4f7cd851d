//! # 图标生成工具 — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use icon_generator::console;
use icon_generator::error::AppError;
use icon_generator::icon::{ConversionReport, IconConfig, IconConverter, ResampleQuality};

/// 将 PNG 转换为包含 16~256 像素六种尺寸的 Windows ICO 图标
#[derive(Parser, Debug)]
#[command(name = "generate-ico")]
#[command(version, about)]
struct Args {
    /// 源图片路径
    #[arg(default_value = "src-tauri/icons/XhinkingTodo.png")]
    source: PathBuf,

    /// 输出 ICO 路径（已存在则覆盖）
    #[arg(default_value = "src-tauri/icons/icon.ico")]
    destination: PathBuf,

    /// 重采样档位：quality / balanced / speed
    #[arg(long, default_value = "quality")]
    quality: ResampleQuality,

    /// 提高日志级别（-v info，-vv debug）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// 不输出进度行（错误仍会输出）
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(&args) {
        Ok(report) => {
            if !args.quiet {
                let mut stdout = std::io::stdout().lock();
                if let Err(err) = console::write_summary(&mut stdout, &report) {
                    log::warn!("输出总结失败: {err}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("图标生成失败: {err:?}");
            let mut stderr = std::io::stderr().lock();
            if let Err(write_err) = console::write_error(&mut stderr, &err).and_then(|()| stderr.flush()) {
                log::warn!("输出错误信息失败: {write_err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<ConversionReport, AppError> {
    if !args.source.exists() {
        return Err(AppError::MissingSource(args.source.clone()));
    }

    let mut config = IconConfig::default();
    config.apply_resample_quality(args.quality);
    log::info!(
        "⚙️ 重采样档位：{}（filter={:?}）",
        config.infer_resample_quality().as_str(),
        config.resize_filter
    );

    let converter = IconConverter::new(config);
    let quiet = args.quiet;
    let report = converter.convert_with_progress(&args.source, &args.destination, |stage| {
        if quiet {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = console::write_stage(&mut stdout, &stage) {
            log::warn!("输出进度失败: {err}");
        }
    })?;

    Ok(report)
}
