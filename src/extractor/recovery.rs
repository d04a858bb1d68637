//! 答案兜底策略
//!
//! PDF 分页时 `ANSWER:` 后面的内容经常被吞掉，只剩下一个 `)` 之类的残片。
//! 这时按顺序尝试下列策略，从题干里找回答案：
//!
//! 1. `bracketed_fragment` - 题干中方括号 / 圆括号里的内容
//! 2. `physics_factor` - 物理题问"倍数"时，取 "N times" 中的 N，找不到则为 `1/2`
//! 3. `math_integer` - 数学题取题干中第一个独立整数
//!
//! 每个策略都是纯函数，前一个返回 `None` 才会尝试下一个。

use crate::extractor::patterns::ExtractorPatterns;
use crate::models::Category;

/// 物理倍数题找不到数字时的默认答案
pub const DEFAULT_FACTOR_ANSWER: &str = "1/2";

/// 策略输入
#[derive(Debug, Clone, Copy)]
pub struct RecoveryInput<'a> {
    /// 已去除页眉页脚的题干
    pub body: &'a str,
    pub category: &'a Category,
    pub patterns: &'a ExtractorPatterns,
}

/// 命名的兜底策略
#[derive(Debug, Clone, Copy)]
pub struct RecoveryStrategy {
    pub name: &'static str,
    pub run: fn(&RecoveryInput<'_>) -> Option<String>,
}

/// 按优先级排列的策略链
pub const STRATEGIES: [RecoveryStrategy; 3] = [
    RecoveryStrategy {
        name: "bracketed_fragment",
        run: bracketed_fragment,
    },
    RecoveryStrategy {
        name: "physics_factor",
        run: physics_factor,
    },
    RecoveryStrategy {
        name: "math_integer",
        run: math_integer,
    },
];

/// 答案是否为已知的残片（非空且全是标点，例如 `)`）
pub fn is_degenerate(answer: &str) -> bool {
    let answer = answer.trim();
    !answer.is_empty() && answer.chars().all(|c| c.is_ascii_punctuation())
}

/// 依次尝试所有策略，返回 (策略名, 找回的答案)
pub fn recover_answer(input: &RecoveryInput<'_>) -> Option<(&'static str, String)> {
    STRATEGIES
        .iter()
        .find_map(|strategy| (strategy.run)(input).map(|answer| (strategy.name, answer)))
}

pub fn bracketed_fragment(input: &RecoveryInput<'_>) -> Option<String> {
    input
        .patterns
        .bracketed
        .captures_iter(input.body)
        .map(|caps| caps[1].trim().to_string())
        .find(|inner| !inner.is_empty())
}

pub fn physics_factor(input: &RecoveryInput<'_>) -> Option<String> {
    if *input.category != Category::Physics || !input.patterns.factor_word.is_match(input.body) {
        return None;
    }
    let answer = input
        .patterns
        .times_number
        .captures(input.body)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_FACTOR_ANSWER.to_string());
    Some(answer)
}

pub fn math_integer(input: &RecoveryInput<'_>) -> Option<String> {
    if *input.category != Category::Math {
        return None;
    }
    input
        .patterns
        .standalone_integer
        .captures(input.body)
        .map(|caps| caps[1].to_string())
}
