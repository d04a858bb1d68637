//! 题目提取层（纯计算，无 I/O）
//!
//! - `patterns` - 正则集合
//! - `recovery` - 答案残片兜底策略
//! - `question_extractor` - 切分题块、解析题头与答案

pub mod patterns;
pub mod question_extractor;
pub mod recovery;

pub use patterns::{ExtractorConfig, ExtractorPatterns};
pub use question_extractor::{DiscardReason, DiscardedBlock, Extraction, QuestionExtractor};
pub use recovery::{is_degenerate, recover_answer, RecoveryInput, RecoveryStrategy, STRATEGIES};
