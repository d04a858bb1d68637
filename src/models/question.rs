use serde::{Deserialize, Serialize};

use crate::models::category::Category;

/// 选项前缀，选择题答案以其中之一开头
pub const OPTION_LETTERS: [char; 4] = ['W', 'X', 'Y', 'Z'];

/// 题型（选择 / 简答）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionStyle {
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "Short Answer")]
    ShortAnswer,
}

impl QuestionStyle {
    pub fn name(self) -> &'static str {
        match self {
            QuestionStyle::MultipleChoice => "Multiple Choice",
            QuestionStyle::ShortAnswer => "Short Answer",
        }
    }

    /// 忽略大小写与多余空白
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        match normalized.as_str() {
            "MULTIPLE CHOICE" => Some(QuestionStyle::MultipleChoice),
            "SHORT ANSWER" => Some(QuestionStyle::ShortAnswer),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 题目类别（抢答题 / 附加题）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "TOSS UP")]
    TossUp,
    #[serde(rename = "BONUS")]
    Bonus,
}

impl QuestionType {
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::TossUp => "TOSS UP",
            QuestionType::Bonus => "BONUS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        match normalized.as_str() {
            "TOSS UP" => Some(QuestionType::TossUp),
            "BONUS" => Some(QuestionType::Bonus),
            _ => None,
        }
    }

    /// 只有抢答题在题目读完后启动倒计时
    pub fn has_countdown(self) -> bool {
        matches!(self, QuestionType::TossUp)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 题目
///
/// 创建后不再修改；`question` 中的 `\n` 为换行标记（选择题选项各占一行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 题号，保留原文写法
    pub number: String,
    pub category: Category,
    pub style: QuestionStyle,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// 题干
    pub question: String,
    /// 标准答案
    pub answer: String,
}

impl Question {
    /// 显示用标题，例如 "Question 12"
    pub fn label(&self) -> String {
        format!("Question {}", self.number)
    }

    /// 朗读用纯文本（换行标记替换为空格）
    pub fn plain_text(&self) -> String {
        self.question.replace('\n', " ")
    }

    /// 选择题答案开头的选项字母
    pub fn option_letter(&self) -> Option<char> {
        if self.style != QuestionStyle::MultipleChoice {
            return None;
        }
        self.answer
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| OPTION_LETTERS.contains(c))
    }
}
