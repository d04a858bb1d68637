//! 练习会话状态机
//!
//! 每道题的阶段：
//!
//! ```text
//! Revealing ──(逐字显示完)──> Countdown (抢答题) ──(倒计时到 0)──┐
//!     │                  └──> Revealed  (附加题)                 │
//!     └──────────────(buzz)────────────────────────────────> Buzzed ──(grade)──> Graded
//! ```
//!
//! 切换题目（上一题 / 下一题 / 随机 / 筛选 / 重新加载）时总是先作废两个定时器，
//! 再让新题目重新进入 `Revealing`。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SessionError;
use crate::models::{derive_categories, Category, Question, QuestionStyle, QuestionType};
use crate::session::grading::{grade_answer, GradeResult};
use crate::session::timer::{TimerKind, TimerToken, Timers};

/// 朗读语速范围
pub const MIN_SPEECH_RATE: f32 = 0.5;
pub const MAX_SPEECH_RATE: f32 = 2.0;

/// 默认倒计时秒数
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 5;

/// 当前题目所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// 没有题目
    Empty,
    /// 正在逐字显示
    Revealing,
    /// 已显示完（附加题），等待抢答
    Revealed,
    /// 已显示完（抢答题），倒计时中
    Countdown,
    /// 已抢答，等待作答
    Buzzed,
    /// 已判分
    Graded,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Empty => "Empty",
            Phase::Revealing => "Revealing",
            Phase::Revealed => "Revealed",
            Phase::Countdown => "Countdown",
            Phase::Buzzed => "Buzzed",
            Phase::Graded => "Graded",
        }
    }
}

/// 切题方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
    Random,
}

/// 逐字显示 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTick {
    /// 过期句柄，忽略
    Ignored,
    /// 又显示了一个字符
    Progress { shown: usize, total: usize },
    /// 显示完毕；抢答题会同时启动倒计时
    Completed { countdown_started: bool },
}

/// 倒计时 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Ignored,
    Remaining(u32),
    /// 时间到，已自动抢答
    Expired,
}

/// 朗读请求（交给外部语音模块）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub rate: f32,
}

/// 当前题目的展示信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub label: String,
    pub category: Category,
    pub style: QuestionStyle,
    pub question_type: QuestionType,
    /// 已显示的题干
    pub visible_text: String,
    pub fully_revealed: bool,
}

/// 供渲染层读取的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub question: Option<QuestionView>,
    pub phase: Phase,
    pub is_buzzed: bool,
    pub time_left: Option<u32>,
    pub grade: Option<GradeResult>,
    pub position: Option<(usize, usize)>,
    pub stats: String,
}

/// 会话参数
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub countdown_seconds: u32,
    pub speech_rate: f32,
    pub rng_seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            speech_rate: 1.0,
            rng_seed: None,
        }
    }
}

impl From<&crate::config::Config> for SessionSettings {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            countdown_seconds: config.countdown_seconds,
            speech_rate: config.speech_rate,
            rng_seed: config.rng_seed,
        }
    }
}

/// 会话控制器，所有会话状态只能通过这里的方法修改
pub struct SessionController {
    questions: Vec<Question>,
    /// 当前筛选结果（`questions` 的下标），整体替换，不原地修改
    filtered: Vec<usize>,
    current_index: usize,
    phase: Phase,
    revealed_chars: usize,
    time_left: u32,
    last_grade: Option<GradeResult>,
    timers: Timers,
    categories: Vec<String>,
    countdown_seconds: u32,
    speech_rate: f32,
    rng: StdRng,
}

impl SessionController {
    pub fn new(settings: SessionSettings) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            questions: Vec::new(),
            filtered: Vec::new(),
            current_index: 0,
            phase: Phase::Empty,
            revealed_chars: 0,
            time_left: 0,
            last_grade: None,
            timers: Timers::default(),
            categories: Vec::new(),
            countdown_seconds: settings.countdown_seconds.max(1),
            speech_rate: settings.speech_rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE),
            rng,
        }
    }

    /// 固定随机种子，便于测试
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SessionSettings {
            rng_seed: Some(seed),
            ..SessionSettings::default()
        })
    }

    // ========== 题目来源 ==========

    /// 整体替换题目列表，分类列表随之从新题目中提取
    pub fn load_questions(&mut self, questions: Vec<Question>) {
        self.categories = derive_categories(&questions);
        self.filtered = (0..questions.len()).collect();
        self.questions = questions;
        info!("会话载入 {} 道题目", self.questions.len());
        self.enter_question(0);
    }

    /// 使用外部提供的分类列表（例如 categories.json）
    pub fn set_categories(&mut self, categories: Vec<String>) {
        if !categories.is_empty() {
            self.categories = categories;
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// 按分类筛选，`all` 恢复全部；返回筛选后的题目数
    ///
    /// 分类名忽略大小写、别名视为同一科目，但必须完全一致
    pub fn filter_by_category(&mut self, name: &str) -> usize {
        let name = name.trim();
        self.filtered = if name.eq_ignore_ascii_case("all") {
            (0..self.questions.len()).collect()
        } else {
            self.questions
                .iter()
                .enumerate()
                .filter(|(_, q)| q.category.matches(name))
                .map(|(idx, _)| idx)
                .collect()
        };
        debug!("分类筛选 {:?}: {} 道题目", name, self.filtered.len());
        self.enter_question(0);
        self.filtered.len()
    }

    // ========== 切题 ==========

    /// 上一题 / 下一题（循环）/ 随机；没有题目时不做任何事
    pub fn advance(&mut self, direction: Direction) {
        let n = self.filtered.len();
        if n == 0 {
            return;
        }
        let next = match direction {
            Direction::Next => (self.current_index + 1) % n,
            Direction::Previous => (self.current_index + n - 1) % n,
            Direction::Random => self.rng.random_range(0..n),
        };
        self.enter_question(next);
    }

    /// 让指定题目成为当前题目并重新开始逐字显示
    fn enter_question(&mut self, index: usize) {
        self.timers.cancel_all();
        self.revealed_chars = 0;
        self.time_left = 0;
        self.last_grade = None;

        if self.filtered.is_empty() {
            self.current_index = 0;
            self.phase = Phase::Empty;
            return;
        }

        self.current_index = index.min(self.filtered.len() - 1);
        self.phase = Phase::Revealing;
        self.timers.arm(TimerKind::Reveal);
    }

    // ========== 逐字显示 / 倒计时 ==========

    /// 逐字显示的一个 tick；换行标记算一个单位
    pub fn on_reveal_tick(&mut self, token: TimerToken) -> RevealTick {
        if !self.timers.is_current(token) || self.phase != Phase::Revealing {
            return RevealTick::Ignored;
        }
        let total = self.total_chars();
        self.revealed_chars = (self.revealed_chars + 1).min(total);
        if self.revealed_chars < total {
            return RevealTick::Progress {
                shown: self.revealed_chars,
                total,
            };
        }

        self.timers.cancel(TimerKind::Reveal);
        let countdown_started = self
            .current_question()
            .is_some_and(|q| q.question_type.has_countdown());
        if countdown_started {
            self.arm_countdown(self.countdown_seconds);
        } else {
            self.phase = Phase::Revealed;
        }
        RevealTick::Completed { countdown_started }
    }

    /// 启动倒计时，时间到自动抢答
    pub fn start_countdown(&mut self, seconds: u32) -> Result<TimerToken, SessionError> {
        match self.phase {
            Phase::Revealing | Phase::Revealed | Phase::Countdown => {
                self.timers.cancel(TimerKind::Reveal);
                self.revealed_chars = self.total_chars();
                Ok(self.arm_countdown(seconds.max(1)))
            }
            Phase::Empty => Err(SessionError::NoActiveQuestion),
            phase => Err(SessionError::InvalidPhase {
                phase: phase.name(),
                operation: "start_countdown",
            }),
        }
    }

    fn arm_countdown(&mut self, seconds: u32) -> TimerToken {
        self.phase = Phase::Countdown;
        self.time_left = seconds;
        self.timers.arm(TimerKind::Countdown)
    }

    /// 倒计时的一个 tick（每秒一次）
    pub fn on_countdown_tick(&mut self, token: TimerToken) -> CountdownTick {
        if !self.timers.is_current(token) || self.phase != Phase::Countdown {
            return CountdownTick::Ignored;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return CountdownTick::Remaining(self.time_left);
        }
        info!("⏰ 时间到，自动抢答");
        self.buzz();
        CountdownTick::Expired
    }

    pub fn reveal_token(&self) -> Option<TimerToken> {
        self.timers.active(TimerKind::Reveal)
    }

    pub fn countdown_token(&self) -> Option<TimerToken> {
        self.timers.active(TimerKind::Countdown)
    }

    // ========== 抢答 / 判分 ==========

    /// 抢答：停止显示和倒计时，显示完整题干；已抢答时不做任何事
    ///
    /// 返回是否发生了状态变化
    pub fn buzz(&mut self) -> bool {
        match self.phase {
            Phase::Revealing | Phase::Revealed | Phase::Countdown => {
                self.timers.cancel_all();
                self.revealed_chars = self.total_chars();
                self.phase = Phase::Buzzed;
                true
            }
            Phase::Empty | Phase::Buzzed | Phase::Graded => false,
        }
    }

    /// 判分，只能在抢答之后进行
    pub fn grade(&mut self, user_answer: &str) -> Result<GradeResult, SessionError> {
        if self.phase != Phase::Buzzed {
            return Err(SessionError::InvalidPhase {
                phase: self.phase.name(),
                operation: "grade",
            });
        }
        let question = self.current_question().ok_or(SessionError::NoActiveQuestion)?;
        let result = grade_answer(question, user_answer);
        info!(
            "{} 作答 {:?}: {}",
            question.label(),
            result.submitted,
            if result.correct { "正确" } else { "错误" }
        );
        self.last_grade = Some(result.clone());
        self.phase = Phase::Graded;
        Ok(result)
    }

    /// 会话结束时停止所有定时器
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
    }

    // ========== 朗读 ==========

    pub fn set_speech_rate(&mut self, rate: f32) -> f32 {
        if rate.is_finite() {
            self.speech_rate = rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE);
        }
        self.speech_rate
    }

    pub fn speech_request(&self) -> Option<SpeechRequest> {
        self.current_question().map(|q| SpeechRequest {
            text: q.plain_text(),
            rate: self.speech_rate,
        })
    }

    // ========== 只读状态 ==========

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_buzzed(&self) -> bool {
        matches!(self.phase, Phase::Buzzed | Phase::Graded)
    }

    /// 倒计时剩余秒数（仅倒计时阶段有意义）
    pub fn time_left(&self) -> Option<u32> {
        (self.phase == Phase::Countdown).then_some(self.time_left)
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.filtered.is_empty()).then_some(self.current_index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.filtered
            .get(self.current_index)
            .and_then(|&idx| self.questions.get(idx))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 当前筛选结果
    pub fn filtered_questions(&self) -> Vec<&Question> {
        self.filtered.iter().filter_map(|&idx| self.questions.get(idx)).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn stats_line(&self) -> String {
        format!(
            "Showing {} of {} questions",
            self.filtered.len(),
            self.questions.len()
        )
    }

    /// 已显示的题干
    pub fn visible_text(&self) -> String {
        self.current_question()
            .map(|q| q.question.chars().take(self.revealed_chars).collect())
            .unwrap_or_default()
    }

    pub fn view(&self) -> SessionView {
        let question = self.current_question().map(|q| QuestionView {
            label: q.label(),
            category: q.category.clone(),
            style: q.style,
            question_type: q.question_type,
            visible_text: self.visible_text(),
            fully_revealed: self.revealed_chars >= self.total_chars(),
        });
        SessionView {
            question,
            phase: self.phase,
            is_buzzed: self.is_buzzed(),
            time_left: self.time_left(),
            grade: self.last_grade.clone(),
            position: self
                .current_index()
                .map(|idx| (idx + 1, self.filtered.len())),
            stats: self.stats_line(),
        }
    }

    fn total_chars(&self) -> usize {
        self.current_question()
            .map(|q| q.question.chars().count())
            .unwrap_or(0)
    }
}
