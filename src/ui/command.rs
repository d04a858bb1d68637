//! 终端命令解析
//!
//! 抢答后（等待作答时）输入的普通文本都当作答案；
//! 这时如需执行命令，在命令前加 `:`，例如 `:n`。

use std::path::PathBuf;

/// 用户命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Buzz,
    Next,
    Previous,
    Random,
    Filter(String),
    Answer(String),
    Speak,
    Rate(f32),
    LoadPdf(PathBuf),
    LoadDatabase,
    ListCategories,
    /// 显示 / 隐藏 PDF 提取报告
    ToggleDebug,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// 解析一行输入
    ///
    /// # 参数
    /// - `line`: 原始输入
    /// - `answering`: 是否处于等待作答状态
    pub fn parse(line: &str, answering: bool) -> Command {
        let trimmed = line.trim();
        let (explicit, body) = match trimmed.strip_prefix(':') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };

        if answering && !explicit && !body.is_empty() {
            return Command::Answer(body.to_string());
        }

        let (word, arg) = match body.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (body, ""),
        };

        match word.to_lowercase().as_str() {
            "" | "b" | "buzz" => Command::Buzz,
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "r" | "random" => Command::Random,
            "c" | "category" if !arg.is_empty() => Command::Filter(arg.to_string()),
            "a" | "answer" if !arg.is_empty() => Command::Answer(arg.to_string()),
            "s" | "speak" => Command::Speak,
            "rate" => match arg.parse::<f32>() {
                Ok(rate) => Command::Rate(rate),
                Err(_) => Command::Unknown(body.to_string()),
            },
            "pdf" if !arg.is_empty() => Command::LoadPdf(PathBuf::from(arg)),
            "db" | "database" => Command::LoadDatabase,
            "list" | "categories" => Command::ListCategories,
            "d" | "debug" => Command::ToggleDebug,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(body.to_string()),
        }
    }
}

pub const HELP_TEXT: &str = "\
命令:
  <回车> / b      抢答
  n / p / r       下一题 / 上一题 / 随机
  c <分类>        按分类筛选（all 为全部）
  a <答案>        作答（抢答后也可以直接输入答案）
  s               朗读当前题目
  rate <0.5-2.0>  设置朗读语速
  pdf <路径>      从 PDF 提取题目
  db              重新加载题库
  list            列出分类
  d / debug       显示 / 隐藏 PDF 提取报告
  q               退出
抢答后执行命令需加 `:` 前缀，例如 `:n`";
