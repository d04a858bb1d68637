/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use anyhow::Result;
use std::fs;
use tracing::info;

use crate::config::Config;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nScience Bowl 练习日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加一行带时间戳的记录
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        line
    )?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Science Bowl 练习模式");
    info!("📚 题库: {}", config.questions_source);
    info!(
        "⏱️ 逐字间隔: {}ms, 抢答倒计时: {}s",
        config.reveal_interval_ms, config.countdown_seconds
    );
    info!("{}", "=".repeat(60));
}

/// 记录题目来源加载结果
///
/// # 参数
/// - `source`: 来源描述（题库 / PDF 文件名）
/// - `count`: 题目数量
pub fn log_source_loaded(source: &str, count: usize) {
    info!("✓ 从 {} 加载了 {} 道题目", source, count);
}

/// 打印练习统计
pub fn print_session_stats(answered: usize, correct: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 练习结束");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 答对: {}/{}", correct, answered);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("abc", 3), "abc");
        assert_eq!(truncate_text("物理题目", 2), "物理...");
    }
}
