//! 逐字显示 / 倒计时两个定时任务的句柄
//!
//! 定时器本身由驱动层（tokio interval）负责触发，这里只记录"哪一个句柄仍然有效"。
//! 每次离开当前题目都会作废所有句柄，过期句柄触发的 tick 会被直接忽略。

/// 定时任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Reveal,
    Countdown,
}

/// 定时任务句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct Timers {
    reveal: Option<TimerToken>,
    countdown: Option<TimerToken>,
    next_generation: u64,
}

impl Timers {
    /// 启动一个新任务（同类旧任务随之作废）
    pub fn arm(&mut self, kind: TimerKind) -> TimerToken {
        self.next_generation += 1;
        let token = TimerToken {
            kind,
            generation: self.next_generation,
        };
        *self.slot(kind) = Some(token);
        token
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        *self.slot(kind) = None;
    }

    pub fn cancel_all(&mut self) {
        self.reveal = None;
        self.countdown = None;
    }

    pub fn active(&self, kind: TimerKind) -> Option<TimerToken> {
        match kind {
            TimerKind::Reveal => self.reveal,
            TimerKind::Countdown => self.countdown,
        }
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        self.active(token.kind) == Some(token)
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<TimerToken> {
        match kind {
            TimerKind::Reveal => &mut self.reveal,
            TimerKind::Countdown => &mut self.countdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_invalidates_previous() {
        let mut timers = Timers::default();
        let first = timers.arm(TimerKind::Reveal);
        let second = timers.arm(TimerKind::Reveal);

        assert!(!timers.is_current(first));
        assert!(timers.is_current(second));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut timers = Timers::default();
        let reveal = timers.arm(TimerKind::Reveal);
        let countdown = timers.arm(TimerKind::Countdown);

        timers.cancel(TimerKind::Reveal);
        assert!(!timers.is_current(reveal));
        assert!(timers.is_current(countdown));

        timers.cancel_all();
        assert!(!timers.is_current(countdown));
    }
}
