//! 终端渲染：只读取 [`SessionView`]，不修改会话状态

use std::io::Write;

use crate::extractor::Extraction;
use crate::session::{Phase, SessionView};

/// 终端渲染器
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// 已输出的题干字符数，用于逐字追加
    printed_chars: usize,
    printed_label: Option<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed_chars: 0,
            printed_label: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// 切换题目后重新输出题头
    pub fn reset(&mut self) {
        self.printed_chars = 0;
        self.printed_label = None;
    }

    /// 输出题头（标题、分类、题型）和统计
    pub fn render_header(&mut self, view: &SessionView) -> std::io::Result<()> {
        self.reset();
        writeln!(self.out, "\n{}", "─".repeat(60))?;
        writeln!(self.out, "{}", view.stats)?;
        match &view.question {
            Some(q) => {
                let position = view
                    .position
                    .map(|(current, total)| format!(" ({}/{})", current, total))
                    .unwrap_or_default();
                writeln!(
                    self.out,
                    "{}{} | {} | {} | {}",
                    q.label, position, q.question_type, q.category, q.style
                )?;
                self.printed_label = Some(q.label.clone());
            }
            None => writeln!(self.out, "没有符合条件的题目")?,
        }
        self.out.flush()
    }

    /// 追加新显示的题干字符
    pub fn render_progress(&mut self, view: &SessionView) -> std::io::Result<()> {
        let Some(q) = &view.question else {
            return Ok(());
        };
        if self.printed_label.as_deref() != Some(q.label.as_str()) {
            self.render_header(view)?;
        }
        let new_text: String = q.visible_text.chars().skip(self.printed_chars).collect();
        if !new_text.is_empty() {
            self.printed_chars += new_text.chars().count();
            write!(self.out, "{}", new_text)?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// 输出阶段变化（倒计时、抢答、判分）
    pub fn render_status(&mut self, view: &SessionView) -> std::io::Result<()> {
        self.render_progress(view)?;
        match view.phase {
            Phase::Countdown => {
                if let Some(seconds) = view.time_left {
                    writeln!(self.out, "\n⏱️ {}", seconds)?;
                }
            }
            Phase::Revealed => writeln!(self.out, "\n（按回车抢答）")?,
            Phase::Buzzed => writeln!(self.out, "\n🔔 已抢答，请输入答案：")?,
            Phase::Graded => {
                if let Some(grade) = &view.grade {
                    if grade.correct {
                        writeln!(self.out, "✅ 正确！")?;
                    } else {
                        writeln!(self.out, "❌ 错误")?;
                    }
                    writeln!(self.out, "标准答案: {}", grade.canonical_answer)?;
                }
            }
            Phase::Empty | Phase::Revealing => {}
        }
        self.out.flush()
    }

    /// 输出最近一次 PDF 提取的诊断信息
    pub fn render_extraction_report(
        &mut self,
        source: &str,
        extraction: &Extraction,
    ) -> std::io::Result<()> {
        writeln!(self.out, "\n🐞 提取报告: {}", source)?;
        writeln!(
            self.out,
            "题块 {} 个 | 提取 {} 道 | 丢弃 {} 个",
            extraction.block_count(),
            extraction.questions.len(),
            extraction.discarded.len()
        )?;
        for block in &extraction.discarded {
            writeln!(
                self.out,
                "  #{} {} [{}] {}",
                block.block_index,
                block.marker,
                block.reason.description(),
                block.preview
            )?;
        }
        self.out.flush()
    }

    pub fn notice(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.out, "\n{}", message)?;
        self.out.flush()
    }
}
