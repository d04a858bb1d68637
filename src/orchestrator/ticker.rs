//! 把会话里的定时任务句柄映射成 tokio interval
//!
//! 句柄变化（新题目、重新启动、取消）时丢弃旧 interval，
//! 所以旧题目的 tick 不可能落到新题目上。

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::session::TimerToken;

pub struct ArmedTicker {
    period: Duration,
    armed: Option<(TimerToken, Interval)>,
}

impl ArmedTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
        }
    }

    /// 与会话当前的句柄对齐
    pub fn sync(&mut self, token: Option<TimerToken>) {
        match token {
            None => self.armed = None,
            Some(token) => {
                if self.armed_token() != Some(token) {
                    let mut interval = interval_at(Instant::now() + self.period, self.period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    self.armed = Some((token, interval));
                }
            }
        }
    }

    pub fn armed_token(&self) -> Option<TimerToken> {
        self.armed.as_ref().map(|(token, _)| *token)
    }

    /// 等待下一次触发；未启动时永远挂起
    pub async fn tick(&mut self) -> TimerToken {
        match &mut self.armed {
            Some((token, interval)) => {
                interval.tick().await;
                *token
            }
            None => std::future::pending().await,
        }
    }
}
