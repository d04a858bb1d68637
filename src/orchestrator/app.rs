//! 应用主流程 - 编排层
//!
//! ## 职责
//!
//! 1. **初始化**：加载分类和题库，创建会话
//! 2. **事件循环**：单线程 `select!` 同时等待用户输入、逐字显示 tick、倒计时 tick
//! 3. **来源切换**：题库 / PDF，加载失败时提示一次并保留原状态
//! 4. **统计**：记录作答结果并写入日志文件

use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::extractor::{Extraction, ExtractorConfig};
use crate::orchestrator::ticker::ArmedTicker;
use crate::services::{DocumentService, LogSpeaker, QuestionBankService, Speaker};
use crate::session::{
    CountdownTick, Direction, Phase, RevealTick, SessionController, SessionSettings,
};
use crate::ui::{Command, TerminalRenderer, HELP_TEXT};
use crate::utils::logging::{
    append_log_line, init_log_file, log_source_loaded, log_startup, print_session_stats,
};

/// 当前题目来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    Database,
    Pdf(String),
}

/// 命令处理后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 作答统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnswerStats {
    pub answered: usize,
    pub correct: usize,
}

/// 应用主结构
pub struct App<W: Write = std::io::Stdout> {
    config: Config,
    session: SessionController,
    bank_service: QuestionBankService,
    document_service: DocumentService,
    speaker: Box<dyn Speaker + Send>,
    renderer: TerminalRenderer<W>,
    mode: SourceMode,
    stats: AnswerStats,
    /// 最近一次 PDF 提取（来源路径 + 报告）
    last_extraction: Option<(String, Extraction)>,
    show_debug: bool,
}

impl App<std::io::Stdout> {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        if let Err(e) = init_log_file(&config.output_log_file) {
            warn!("无法初始化日志文件 {}: {}", config.output_log_file, e);
        }
        log_startup(&config);

        let mut app = Self::with_writer(config, std::io::stdout())?;
        app.load_database().await?;
        Ok(app)
    }
}

impl<W: Write> App<W> {
    /// 使用指定输出创建应用（不加载题库）
    pub fn with_writer(config: Config, out: W) -> AppResult<Self> {
        let document_service = DocumentService::new(&ExtractorConfig::from(&config))?;
        Ok(Self {
            session: SessionController::new(SessionSettings::from(&config)),
            bank_service: QuestionBankService::new(&config),
            document_service,
            speaker: Box::new(LogSpeaker::new()),
            renderer: TerminalRenderer::new(out),
            mode: SourceMode::Database,
            stats: AnswerStats::default(),
            last_extraction: None,
            show_debug: false,
            config,
        })
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn mode(&self) -> &SourceMode {
        &self.mode
    }

    pub fn stats(&self) -> AnswerStats {
        self.stats
    }

    /// 最近一次 PDF 提取报告
    pub fn last_extraction(&self) -> Option<&Extraction> {
        self.last_extraction.as_ref().map(|(_, extraction)| extraction)
    }

    pub fn into_output(self) -> W {
        self.renderer.into_inner()
    }

    /// 运行事件循环，直到用户退出或输入结束
    pub async fn run(mut self) -> anyhow::Result<AnswerStats> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut reveal = ArmedTicker::new(Duration::from_millis(self.config.reveal_interval_ms));
        let mut countdown = ArmedTicker::new(Duration::from_secs(1));

        self.renderer.notice(HELP_TEXT)?;
        self.renderer.render_header(&self.session.view())?;

        loop {
            reveal.sync(self.session.reveal_token());
            countdown.sync(self.session.countdown_token());

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let answering = self.session.phase() == Phase::Buzzed;
                    if self.handle_command(Command::parse(&line, answering)).await? == Flow::Quit {
                        break;
                    }
                }
                token = reveal.tick() => {
                    let tick = self.session.on_reveal_tick(token);
                    self.render_reveal_tick(tick)?;
                }
                token = countdown.tick() => {
                    if self.session.on_countdown_tick(token) != CountdownTick::Ignored {
                        self.renderer.render_status(&self.session.view())?;
                    }
                }
            }
        }

        self.session.shutdown();
        self.speaker.cancel();
        print_session_stats(
            self.stats.answered,
            self.stats.correct,
            &self.config.output_log_file,
        );
        Ok(self.stats)
    }

    /// 处理一条用户命令
    pub async fn handle_command(&mut self, command: Command) -> std::io::Result<Flow> {
        match command {
            Command::Buzz => {
                if self.session.buzz() {
                    self.renderer.render_status(&self.session.view())?;
                }
            }
            Command::Next => self.advance(Direction::Next)?,
            Command::Previous => self.advance(Direction::Previous)?,
            Command::Random => self.advance(Direction::Random)?,
            Command::Filter(name) => {
                let count = self.session.filter_by_category(&name);
                info!("分类 {:?}: {} 道题目", name, count);
                self.on_question_changed()?;
            }
            Command::Answer(answer) => self.submit_answer(&answer)?,
            Command::Speak => match self.session.speech_request() {
                Some(request) => self.speaker.speak(&request),
                None => self.renderer.notice("当前没有题目")?,
            },
            Command::Rate(rate) => {
                let applied = self.session.set_speech_rate(rate);
                self.renderer.notice(&format!("朗读语速: {:.1}", applied))?;
            }
            Command::LoadPdf(path) => self.load_pdf(&path).await?,
            Command::LoadDatabase => {
                self.load_database().await?;
                self.on_question_changed()?;
            }
            Command::ListCategories => {
                let list = self.session.categories().join(", ");
                self.renderer.notice(&format!("分类: all, {}", list))?;
            }
            Command::ToggleDebug => self.toggle_debug()?,
            Command::Help => self.renderer.notice(HELP_TEXT)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(input) => {
                self.renderer
                    .notice(&format!("无法识别的命令: {}（输入 help 查看帮助）", input))?;
            }
        }
        Ok(Flow::Continue)
    }

    /// 加载题库；失败时保留当前题目
    async fn load_database(&mut self) -> std::io::Result<()> {
        match self.bank_service.load().await {
            Ok(bank) => {
                log_source_loaded(self.bank_service.questions_source(), bank.questions.len());
                self.session.load_questions(bank.questions);
                self.session.set_categories(bank.categories);
                self.mode = SourceMode::Database;
                Ok(())
            }
            Err(e) => {
                error!("加载题库失败: {}", e);
                self.renderer.notice(&format!("⚠️ 加载题库失败: {}", e))
            }
        }
    }

    /// 从 PDF 提取题目；读不出文件和没有题目分别提示，均不改变当前状态
    async fn load_pdf(&mut self, path: &Path) -> std::io::Result<()> {
        match self.document_service.load_questions(path).await {
            Ok(extraction) => {
                let source = path.display().to_string();
                log_source_loaded(&source, extraction.questions.len());
                self.session.load_questions(extraction.questions.clone());
                self.mode = SourceMode::Pdf(source.clone());
                self.last_extraction = Some((source, extraction));
                if self.show_debug {
                    self.render_debug_report()?;
                }
                self.on_question_changed()
            }
            Err(e) if e.is_empty_extraction() => self
                .renderer
                .notice("⚠️ PDF 中没有找到可识别的题目，请检查文件格式"),
            Err(e) => {
                error!("读取 PDF 失败: {}", e);
                self.renderer.notice(&format!("⚠️ 读取 PDF 失败: {}", e))
            }
        }
    }

    /// 切换提取报告的显示；打开时立即输出最近一次的报告
    fn toggle_debug(&mut self) -> std::io::Result<()> {
        self.show_debug = !self.show_debug;
        if self.show_debug {
            self.render_debug_report()
        } else {
            self.renderer.notice("已隐藏提取报告")
        }
    }

    fn render_debug_report(&mut self) -> std::io::Result<()> {
        match &self.last_extraction {
            Some((source, extraction)) => {
                self.renderer.render_extraction_report(source, extraction)
            }
            None => self.renderer.notice("🐞 还没有从 PDF 提取过题目"),
        }
    }

    fn advance(&mut self, direction: Direction) -> std::io::Result<()> {
        self.session.advance(direction);
        self.on_question_changed()
    }

    fn on_question_changed(&mut self) -> std::io::Result<()> {
        self.speaker.cancel();
        self.renderer.render_header(&self.session.view())
    }

    fn submit_answer(&mut self, answer: &str) -> std::io::Result<()> {
        match self.session.grade(answer) {
            Ok(result) => {
                self.stats.answered += 1;
                if result.correct {
                    self.stats.correct += 1;
                }
                let label = self
                    .session
                    .current_question()
                    .map(|q| q.label())
                    .unwrap_or_default();
                let line = format!(
                    "{} | 作答: {} | 标准答案: {} | {}",
                    label,
                    result.submitted,
                    result.canonical_answer,
                    if result.correct { "正确" } else { "错误" }
                );
                if let Err(e) = append_log_line(&self.config.output_log_file, &line) {
                    warn!("写入日志文件失败: {}", e);
                }
                self.renderer.render_status(&self.session.view())
            }
            Err(e) => self.renderer.notice(&format!("⚠️ {}（请先抢答）", e)),
        }
    }

    fn render_reveal_tick(&mut self, tick: RevealTick) -> std::io::Result<()> {
        match tick {
            RevealTick::Ignored => Ok(()),
            RevealTick::Progress { .. } => self.renderer.render_progress(&self.session.view()),
            RevealTick::Completed { .. } => self.renderer.render_status(&self.session.view()),
        }
    }
}
