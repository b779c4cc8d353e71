use std::io;
use thiserror::Error;

/// 子程序執行期間的錯誤
#[derive(Debug, Error)]
pub enum RunnerError {
    /// 無法啟動執行檔（找不到檔案、權限不足等）
    #[error("無法啟動程序: {0}")]
    LaunchFailed(#[source] io::Error),

    /// 等待程序結束時發生錯誤
    #[error("等待程序結束失敗: {0}")]
    WaitFailed(#[source] io::Error),

    /// 超過設定的等待時間，程序已被終止
    #[error("程序執行逾時（{seconds} 秒）")]
    TimedOut { seconds: u64 },
}

impl RunnerError {
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, RunnerError::LaunchFailed(_))
    }
}
