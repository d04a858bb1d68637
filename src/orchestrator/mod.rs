//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用主流程
//! - 初始化（题库、分类、会话）
//! - 单线程事件循环：用户输入 + 两个定时器
//! - 题目来源切换与错误提示
//!
//! ### `ticker` - 定时器适配
//! - 把会话中的定时任务句柄映射为 tokio interval
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (事件循环)
//!     ↓
//! session::SessionController (单道题的状态机)
//!     ↓
//! services (能力层：题库 / PDF / 朗读)
//!     ↓
//! extractor (纯计算：文本 → 题目)
//! ```

pub mod app;
pub mod ticker;

pub use app::{AnswerStats, App, Flow, SourceMode};
pub use ticker::ArmedTicker;
