use serde::Serialize;

use crate::models::{Question, QuestionStyle};

/// 判分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeResult {
    pub correct: bool,
    /// 用于展示的标准答案
    pub canonical_answer: String,
    /// 规范化后的作答
    pub submitted: String,
}

/// 去掉首尾空白并转为大写
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_uppercase()
}

/// 判分
///
/// - 简答题：规范化后完全一致
/// - 选择题：与完整答案一致，或只回答了答案开头的选项字母（W/X/Y/Z）
pub fn grade_answer(question: &Question, user_answer: &str) -> GradeResult {
    let submitted = normalize_answer(user_answer);
    let expected = normalize_answer(&question.answer);

    let correct = match question.style {
        QuestionStyle::ShortAnswer => submitted == expected,
        QuestionStyle::MultipleChoice => {
            submitted == expected
                || question
                    .option_letter()
                    .is_some_and(|letter| submitted == letter.to_string())
        }
    };

    GradeResult {
        correct,
        canonical_answer: question.answer.clone(),
        submitted,
    }
}
