//! 提取流程用到的全部正则，构造时一次性编译

use regex::Regex;

use crate::error::{AppResult, ExtractionError};

/// 题头中可识别的科目写法
const CATEGORY_LABELS: [&str; 6] = [
    "BIOLOGY",
    "CHEMISTRY",
    r"EARTH\s+(?:AND|&)\s+SPACE",
    "ENERGY",
    r"MATH(?:EMATICS)?",
    "PHYSICS",
];

/// 提取配置
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// 每页页眉重复出现的比赛标题
    pub document_title: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            document_title: "MIT Science Bowl 2024".to_string(),
        }
    }
}

impl From<&crate::config::Config> for ExtractorConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            document_title: config.document_title.clone(),
        }
    }
}

/// 已编译的正则集合
#[derive(Debug, Clone)]
pub struct ExtractorPatterns {
    pub whitespace: Regex,
    /// 题目类别标记：TOSS UP / BONUS
    pub marker: Regex,
    /// 题头：`12) PHYSICS Short Answer`
    pub header: Regex,
    /// 答案截断点：下一题标记、比赛标题、页码
    pub answer_terminator: Regex,
    /// 页眉页脚噪声：比赛标题、页码
    pub noise: Regex,
    /// 选择题行内选项：` W)`
    pub inline_option: Regex,
    pub bracketed: Regex,
    pub factor_word: Regex,
    pub times_number: Regex,
    pub standalone_integer: Regex,
}

impl ExtractorPatterns {
    pub fn new(config: &ExtractorConfig) -> AppResult<Self> {
        Ok(Self::compile(config)?)
    }

    fn compile(config: &ExtractorConfig) -> Result<Self, ExtractionError> {
        let marker = r"\b(?:TOSS\s+UP|BONUS)\b";
        let page_number = r"\bPage\s+\d+(?:\s+of\s+\d+)?\b";
        let title = title_pattern(&config.document_title);

        let mut terminators = vec![marker.to_string(), page_number.to_string()];
        let mut noise = vec![page_number.to_string()];
        if let Some(title) = title {
            terminators.push(title.clone());
            noise.push(title);
        }

        Ok(Self {
            whitespace: Regex::new(r"\s+")?,
            marker: Regex::new(&format!("(?i){}", marker))?,
            header: Regex::new(&format!(
                r"(?i)(\d+)\)\s*({})\s+(MULTIPLE\s+CHOICE|SHORT\s+ANSWER)",
                CATEGORY_LABELS.join("|")
            ))?,
            answer_terminator: Regex::new(&format!("(?i){}", terminators.join("|")))?,
            noise: Regex::new(&format!("(?i){}", noise.join("|")))?,
            inline_option: Regex::new(r" +([WXYZ]\))")?,
            bracketed: Regex::new(r"[\[(]([^\[\]()]+)[\])]")?,
            factor_word: Regex::new(r"(?i)\bfactors?\b")?,
            times_number: Regex::new(r"(?i)(\d+(?:\.\d+)?(?:/\d+)?)\s*(?:times\b|×)")?,
            standalone_integer: Regex::new(r"(?:^|\s)(-?\d+)(?:$|[\s,;:?!)]|\.(?:\s|$))")?,
        })
    }

    /// 合并连续空白
    pub fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }

    /// 去掉页眉页脚噪声并整理空白
    pub fn strip_noise(&self, text: &str) -> String {
        self.collapse_whitespace(&self.noise.replace_all(text, " "))
    }
}

/// 比赛标题转成正则：转义后把空白放宽为 `\s+`
fn title_pattern(title: &str) -> Option<String> {
    let words: Vec<String> = title.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(r"\s+"))
    }
}
