//! 子程序啟動設定

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::process::invocation::Invocation;

/// 預設執行檔名稱
#[cfg(windows)]
pub const DEFAULT_PROGRAM: &str = "ffmpeg.exe";
#[cfg(not(windows))]
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// 診斷日誌檔名，位於基準目錄下
pub const DEFAULT_LOG_FILE_NAME: &str = "error.log";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// 子程序的啟動範本，每次執行只有輸入與輸出路徑不同
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// 執行檔名稱，優先在基準目錄下尋找
    pub program: String,
    /// 基準目錄：工作目錄、執行檔與日誌所在位置
    pub base_dir: PathBuf,
    /// 日誌檔名
    pub log_file_name: String,
    /// 不顯示主控台視窗（僅 Windows 有作用）
    pub hide_window: bool,
    /// 擷取 stderr 並寫入日誌
    pub capture_stderr: bool,
    /// 等待上限（None = 無限等待）
    pub timeout: Option<Duration>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        ProcessConfig::new(DEFAULT_PROGRAM)
    }
}

impl ProcessConfig {
    pub fn new(program: impl Into<String>) -> Self {
        ProcessConfig {
            program: program.into(),
            base_dir: app_base_dir(),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            hide_window: true,
            capture_stderr: true,
            timeout: None,
        }
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn log_file_name(mut self, name: impl Into<String>) -> Self {
        self.log_file_name = name.into();
        self
    }

    pub fn capture_stderr(mut self, capture: bool) -> Self {
        self.capture_stderr = capture;
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// 診斷日誌的完整路徑
    pub fn log_path(&self) -> PathBuf {
        self.base_dir.join(&self.log_file_name)
    }

    /// 基準目錄下存在同名檔案時使用該檔案，否則交給系統 PATH 搜尋
    pub fn resolve_program(&self) -> PathBuf {
        let local = self.base_dir.join(&self.program);
        if local.is_file() {
            local
        } else {
            PathBuf::from(&self.program)
        }
    }

    /// 依照範本建立單次執行的指令。
    ///
    /// 直接執行程式、不經過 shell，路徑原樣作為參數傳入。
    pub(crate) fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(self.resolve_program());
        command
            .args(invocation.args())
            .current_dir(&self.base_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(if self.capture_stderr {
                Stdio::piped()
            } else {
                Stdio::inherit()
            })
            .kill_on_drop(true);

        #[cfg(windows)]
        {
            if self.hide_window {
                command.creation_flags(CREATE_NO_WINDOW);
            }
        }

        command
    }
}

/// 應用程式所在目錄；取不到時退回目前工作目錄
pub fn app_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
