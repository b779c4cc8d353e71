use std::path::PathBuf;
use std::time::Duration;
use chrono::{DateTime, Local};

#[derive(Clone, Debug)]
pub struct ConversionInput {
    pub input_path: String,
    pub output_path: String,
    pub no_progress: bool,
}

/// 轉換結果：成功、失敗，或在呼叫 ffmpeg 前就被拒絕
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    Failure,
    Rejected(String),
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub status: ConversionStatus,
    /// ffmpeg 結束碼，被拒絕時為 None
    pub exit_code: Option<i32>,
    /// 執行結果的說明文字
    pub detail: Option<String>,
    /// 存在的診斷日誌
    pub log_path: Option<PathBuf>,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
}

impl ConversionOutput {
    pub fn rejected(message: &str, started_at: DateTime<Local>) -> Self {
        ConversionOutput {
            status: ConversionStatus::Rejected(message.to_string()),
            exit_code: None,
            detail: None,
            log_path: None,
            started_at,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }

    /// 顯示給使用者的訊息
    pub fn message(&self) -> &str {
        match &self.status {
            ConversionStatus::Success => "Success!",
            ConversionStatus::Failure => "Error!",
            ConversionStatus::Rejected(message) => message,
        }
    }

    /// 程式結束碼：成功 0、失敗 1、拒絕 2
    pub fn exit_status(&self) -> u8 {
        match self.status {
            ConversionStatus::Success => 0,
            ConversionStatus::Failure => 1,
            ConversionStatus::Rejected(_) => 2,
        }
    }
}
