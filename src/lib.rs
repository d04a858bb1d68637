//! # Science Bowl Reader
//!
//! Science Bowl 竞赛题目练习工具：逐字显示题目、抢答倒计时、朗读、判分。
//! 题目来自预先整理的 JSON 题库，或从比赛 PDF 中即时提取。
//!
//! ## 架构设计
//!
//! ### ① 提取层（Extractor）
//! - `extractor/` - 纯计算，无 I/O：整段文本 → 有序的 `Question` 列表
//! - `QuestionExtractor` - 切分题块、解析题头与答案、答案兜底
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `QuestionBankService` - 加载题库 / 分类
//! - `DocumentService` - 读取 PDF 并提取题目
//! - `Speaker` - 朗读接口
//!
//! ### ③ 会话层（Session）
//! - `session/` - 单道题的状态机：逐字显示 → 抢答 → 判分
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 事件循环、来源切换、统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod extractor;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod ui;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use extractor::QuestionExtractor;
pub use models::{Category, Question, QuestionStyle, QuestionType};
pub use orchestrator::App;
pub use session::SessionController;
