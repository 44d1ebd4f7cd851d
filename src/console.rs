//! 控制台输出模块
//!
//! 负责把 `ConversionStage` 事件与最终结果渲染成人类可读的进度行。
//! 所有函数写入任意 `Write`，`main` 传入 stdout / stderr，测试传入内存缓冲。

use std::error::Error;
use std::io::{self, Write};

use crate::error::AppError;
use crate::icon::{ConversionReport, ConversionStage, IconSize};

/// 按千位分组格式化整数：`1234567` → `1,234,567`。
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_sizes(sizes: &[IconSize]) -> String {
    sizes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 输出单个阶段的进度行。
pub fn write_stage<W: Write>(out: &mut W, stage: &ConversionStage<'_>) -> io::Result<()> {
    match stage {
        ConversionStage::SourceLoaded {
            path,
            width,
            height,
            color,
        } => {
            writeln!(out, "加载源图片：{}", path.display())?;
            writeln!(out, "源图片尺寸：{}x{}，色彩模式：{:?}", width, height, color)
        }
        ConversionStage::GeneratingSizes(sizes) => {
            writeln!(out, "生成 ICO，尺寸：[{}]", format_sizes(sizes))
        }
        ConversionStage::Written { path, file_size } => {
            writeln!(out, "✅ 已生成：{}", path.display())?;
            writeln!(out, "   文件大小：{} 字节", format_thousands(*file_size))
        }
    }
}

/// 输出成功总结与用途提示。
pub fn write_summary<W: Write>(out: &mut W, report: &ConversionReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "✅ ICO 文件生成成功！")?;
    if report.alpha_added {
        writeln!(out, "   源图无透明通道，已补齐为不透明 RGBA")?;
    }
    writeln!(out, "   该文件将用于：")?;
    writeln!(out, "   - exe 程序图标")?;
    writeln!(out, "   - 桌面快捷方式图标")?;
    writeln!(out, "   - 任务栏图标")
}

/// 输出错误描述及完整原因链。
pub fn write_error<W: Write>(out: &mut W, error: &AppError) -> io::Result<()> {
    match error {
        AppError::MissingSource(_) => writeln!(out, "❌ {}", error),
        AppError::Conversion(_) => {
            writeln!(out, "❌ 错误：{}", error)?;
            let mut cause = error.source();
            while let Some(inner) = cause {
                writeln!(out, "   原因：{}", inner)?;
                cause = inner.source();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{IconError, TARGET_SIZES};
    use image::ColorType;
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("write to memory buffer failed");
        String::from_utf8(buf).expect("console output should be utf-8")
    }

    #[test]
    fn thousands_examples() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(67_342), "67,342");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn stage_lines_mention_paths_sizes_and_bytes() {
        let source = Path::new("icons/app.png");
        let text = render(|out| {
            write_stage(
                out,
                &ConversionStage::SourceLoaded {
                    path: source,
                    width: 512,
                    height: 512,
                    color: ColorType::Rgb8,
                },
            )?;
            write_stage(out, &ConversionStage::GeneratingSizes(&TARGET_SIZES))?;
            write_stage(
                out,
                &ConversionStage::Written {
                    path: Path::new("icons/icon.ico"),
                    file_size: 12_345,
                },
            )
        });

        assert!(text.contains("icons/app.png"));
        assert!(text.contains("512x512"));
        assert!(text.contains("[16x16, 32x32, 48x48, 64x64, 128x128, 256x256]"));
        assert!(text.contains("icons/icon.ico"));
        assert!(text.contains("12,345 字节"));
    }

    #[test]
    fn summary_lists_usage_hints() {
        let report = ConversionReport {
            source: PathBuf::from("a.png"),
            destination: PathBuf::from("a.ico"),
            source_width: 10,
            source_height: 10,
            source_color: ColorType::Rgb8,
            alpha_added: true,
            sizes: TARGET_SIZES.to_vec(),
            file_size: 1,
        };
        let text = render(|out| write_summary(out, &report));

        assert!(text.contains("exe"));
        assert!(text.contains("桌面快捷方式"));
        assert!(text.contains("任务栏"));
        assert!(text.contains("不透明"));
    }

    #[test]
    fn conversion_error_prints_cause_chain() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error = AppError::from(IconError::file_system("无法写入目标文件 a.ico", io));

        let text = render(|out| write_error(out, &error));

        assert!(text.starts_with("❌ 错误：文件错误：无法写入目标文件 a.ico"));
        assert!(text.contains("原因：access denied"));
    }

    #[test]
    fn missing_source_prints_single_line() {
        let error = AppError::MissingSource(PathBuf::from("nope.png"));
        let text = render(|out| write_error(out, &error));
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("nope.png"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn error_output_failure_is_returned_to_caller() {
        let error = AppError::MissingSource(PathBuf::from("nope.png"));
        let result = write_error(&mut ClosedPipe, &error);
        assert!(matches!(result, Err(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    proptest! {
        #[test]
        fn thousands_strip_back_to_the_number(value in any::<u64>()) {
            let formatted = format_thousands(value);
            prop_assert_eq!(formatted.replace(',', "").parse::<u64>().ok(), Some(value));
            for group in formatted.split(',').skip(1) {
                prop_assert_eq!(group.len(), 3);
            }
            prop_assert!(formatted.split(',').next().map_or(false, |g| (1..=3).contains(&g.len())));
        }
    }
}
