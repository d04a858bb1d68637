//! PDF 文本 → 题目列表
//!
//! 输入为按页拼接后的整段文本，输出按原文顺序排列的 [`Question`]。
//! 单个题块解析失败只会被丢弃并记录 debug 日志，不会中断整个提取。

use tracing::{debug, info};

use crate::error::AppResult;
use crate::extractor::patterns::{ExtractorConfig, ExtractorPatterns};
use crate::extractor::recovery::{self, RecoveryInput};
use crate::models::{Category, Question, QuestionStyle, QuestionType};
use crate::utils::logging::truncate_text;

const ANSWER_MARKER: &str = "ANSWER:";

/// 题块被丢弃的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// 没有可识别的题头
    MissingHeader,
    /// 题头后没有 `ANSWER:`
    MissingAnswerMarker,
    /// 处理后题干为空
    EmptyQuestion,
    /// 处理后答案为空
    EmptyAnswer,
}

impl DiscardReason {
    pub fn description(self) -> &'static str {
        match self {
            DiscardReason::MissingHeader => "缺少题头",
            DiscardReason::MissingAnswerMarker => "缺少 ANSWER:",
            DiscardReason::EmptyQuestion => "题干为空",
            DiscardReason::EmptyAnswer => "答案为空",
        }
    }
}

/// 被丢弃的题块（仅用于诊断）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardedBlock {
    /// 题块序号（从 1 开始）
    pub block_index: usize,
    pub marker: String,
    pub reason: DiscardReason,
    pub preview: String,
}

/// 一次提取的完整结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub questions: Vec<Question>,
    pub discarded: Vec<DiscardedBlock>,
}

impl Extraction {
    /// 参与解析的题块总数（成功 + 丢弃）
    pub fn block_count(&self) -> usize {
        self.questions.len() + self.discarded.len()
    }
}

/// 题目提取器
#[derive(Debug, Clone)]
pub struct QuestionExtractor {
    patterns: ExtractorPatterns,
}

impl QuestionExtractor {
    pub fn new(config: &ExtractorConfig) -> AppResult<Self> {
        Ok(Self {
            patterns: ExtractorPatterns::new(config)?,
        })
    }

    /// 提取题目；结果为空是正常结果，由调用方决定如何提示
    pub fn extract(&self, raw_text: &str) -> Vec<Question> {
        self.extract_with_report(raw_text).questions
    }

    /// 提取题目，同时返回被丢弃的题块
    pub fn extract_with_report(&self, raw_text: &str) -> Extraction {
        let text = self.patterns.collapse_whitespace(raw_text);
        let mut extraction = Extraction::default();

        for (idx, (marker, block)) in split_blocks(&self.patterns, &text).into_iter().enumerate() {
            let block_index = idx + 1;
            match self.parse_block(marker, block) {
                Ok(question) => extraction.questions.push(question),
                Err(reason) => {
                    debug!(
                        "丢弃题块 #{} ({}): {:?} | {}",
                        block_index,
                        marker,
                        reason,
                        truncate_text(block.trim(), 60)
                    );
                    extraction.discarded.push(DiscardedBlock {
                        block_index,
                        marker: marker.to_string(),
                        reason,
                        preview: truncate_text(block.trim(), 60),
                    });
                }
            }
        }

        info!(
            "✓ 提取完成: {} 道题目, 丢弃 {} 个题块",
            extraction.questions.len(),
            extraction.discarded.len()
        );
        extraction
    }

    fn parse_block(&self, marker: &str, block: &str) -> Result<Question, DiscardReason> {
        let question_type = QuestionType::parse(marker).ok_or(DiscardReason::MissingHeader)?;

        // 1. 题头
        let caps = self
            .patterns
            .header
            .captures(block)
            .ok_or(DiscardReason::MissingHeader)?;
        let number = caps[1].to_string();
        let category = Category::parse(&caps[2]);
        let style = QuestionStyle::parse(&caps[3]).ok_or(DiscardReason::MissingHeader)?;
        let header_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
        let rest = &block[header_end..];

        // 2. 题干 / 答案
        let answer_pos = rest
            .find(ANSWER_MARKER)
            .ok_or(DiscardReason::MissingAnswerMarker)?;
        let body = self.patterns.strip_noise(&rest[..answer_pos]);
        let mut answer = self.truncate_answer(&rest[answer_pos + ANSWER_MARKER.len()..]);

        // 3. 答案残片兜底
        if recovery::is_degenerate(&answer) {
            let input = RecoveryInput {
                body: &body,
                category: &category,
                patterns: &self.patterns,
            };
            match recovery::recover_answer(&input) {
                Some((strategy, recovered)) => {
                    debug!("题目 {} 答案 {:?} 由 {} 找回: {}", number, answer, strategy, recovered);
                    answer = recovered;
                }
                None => debug!("题目 {} 答案 {:?} 无法找回，保留原样", number, answer),
            }
        }
        let answer = self.patterns.strip_noise(&answer);

        if body.is_empty() {
            return Err(DiscardReason::EmptyQuestion);
        }
        if answer.is_empty() {
            return Err(DiscardReason::EmptyAnswer);
        }

        // 4. 选择题选项分行
        let question = match style {
            QuestionStyle::MultipleChoice => self
                .patterns
                .inline_option
                .replace_all(&body, "\n$1")
                .into_owned(),
            QuestionStyle::ShortAnswer => body,
        };

        Ok(Question {
            number,
            category,
            style,
            question_type,
            question,
            answer,
        })
    }

    /// 截断到下一个题目标记 / 比赛标题 / 页码之前
    fn truncate_answer(&self, raw: &str) -> String {
        let raw = raw.trim();
        let end = self
            .patterns
            .answer_terminator
            .find(raw)
            .map(|m| m.start())
            .unwrap_or(raw.len());
        raw[..end].trim().to_string()
    }
}

/// 按 TOSS UP / BONUS 切分，保留标记本身：返回 (标记, 题块)，丢弃第一个标记之前的内容
fn split_blocks<'a>(patterns: &ExtractorPatterns, text: &'a str) -> Vec<(&'a str, &'a str)> {
    let markers: Vec<_> = patterns.marker.find_iter(text).collect();
    markers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let block_end = markers.get(i + 1).map(|next| next.start()).unwrap_or(text.len());
            (m.as_str(), &text[m.end()..block_end])
        })
        .collect()
}
