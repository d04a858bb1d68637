//! 朗读服务 - 业务能力层
//!
//! 本程序不负责播放音频，只把朗读请求交给实现了 [`Speaker`] 的外部模块

use tracing::info;

use crate::session::SpeechRequest;
use crate::utils::logging::truncate_text;

/// 语音朗读接口
pub trait Speaker {
    fn speak(&mut self, request: &SpeechRequest);
    /// 停止正在进行的朗读（切题时调用）
    fn cancel(&mut self);
}

/// 只记录日志的朗读实现
#[derive(Debug, Default)]
pub struct LogSpeaker {
    last: Option<SpeechRequest>,
}

impl LogSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次朗读请求
    pub fn last_request(&self) -> Option<&SpeechRequest> {
        self.last.as_ref()
    }
}

impl Speaker for LogSpeaker {
    fn speak(&mut self, request: &SpeechRequest) {
        info!(
            "🔊 朗读 (语速 {:.1}): {}",
            request.rate,
            truncate_text(&request.text, 80)
        );
        self.last = Some(request.clone());
    }

    fn cancel(&mut self) {
        info!("🔇 停止朗读");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_speaker_keeps_only_last_request() {
        let mut speaker = LogSpeaker::new();
        assert!(speaker.last_request().is_none());

        speaker.speak(&SpeechRequest {
            text: "What is g?".to_string(),
            rate: 1.2,
        });
        speaker.speak(&SpeechRequest {
            text: "What is 2 cubed?".to_string(),
            rate: 1.0,
        });
        speaker.cancel();

        let last = speaker.last_request().unwrap();
        assert_eq!(last.text, "What is 2 cubed?");
        assert_eq!(last.rate, 1.0);
    }
}
