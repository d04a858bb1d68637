//! 会话层
//!
//! - `controller` - 题目展示 / 抢答 / 判分状态机
//! - `grading` - 判分规则
//! - `timer` - 定时任务句柄（协作式取消）

pub mod controller;
pub mod grading;
pub mod timer;

pub use controller::{
    CountdownTick, Direction, Phase, QuestionView, RevealTick, SessionController,
    SessionSettings, SessionView, SpeechRequest,
};
pub use grading::{grade_answer, normalize_answer, GradeResult};
pub use timer::{TimerKind, TimerToken, Timers};
