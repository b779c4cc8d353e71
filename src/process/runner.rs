//! 單次子程序執行：啟動、並行排空 stderr、等待結束、回報結果

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use log::{debug, error, info, warn};
use tokio::process::Child;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::process::config::ProcessConfig;
use crate::process::drainer::{DrainReport, StreamDrainer};
use crate::process::error::RunnerError;
use crate::process::invocation::Invocation;

/// 程序未產生真正結束碼時回報的值
pub const SENTINEL_EXIT_CODE: i32 = -1;

/// 執行結果
#[derive(Debug)]
pub enum RunOutcome {
    /// 程序正常結束並回傳結束碼
    Exited(i32),
    /// 程序被訊號終止，沒有結束碼
    Terminated,
    /// 啟動失敗、等待失敗或逾時
    Failed(RunnerError),
}

impl RunOutcome {
    /// 結束碼；沒有真正結束碼時為 SENTINEL_EXIT_CODE
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Exited(code) => *code,
            _ => SENTINEL_EXIT_CODE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Exited(0))
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Exited(code) => write!(f, "結束碼 {}", code),
            RunOutcome::Terminated => write!(f, "程序被訊號終止"),
            RunOutcome::Failed(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub struct RunResult {
    pub outcome: RunOutcome,
    /// 日誌檔路徑，檔案不一定存在
    pub log_path: PathBuf,
    /// stderr 排空結果；未擷取或排空失敗時為 None
    pub drain: Option<DrainReport>,
}

impl RunResult {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// 本次執行寫入並保留的日誌檔路徑；排空失敗時路徑上的檔案可能是舊的，不回傳
    pub fn log_file(&self) -> Option<&Path> {
        let kept = self.drain.map_or(false, |report| report.kept);
        if kept && self.log_path.is_file() {
            Some(&self.log_path)
        } else {
            None
        }
    }
}

/// 執行子程序並擷取其 stderr。
///
/// 同一個實例的多次 `run` 會依序執行，因為它們共用同一個日誌檔。
pub struct ProcessRunner {
    config: ProcessConfig,
    lock: Mutex<()>,
}

impl ProcessRunner {
    pub fn new(config: ProcessConfig) -> Self {
        ProcessRunner {
            config,
            lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    pub fn log_path(&self) -> PathBuf {
        self.config.log_path()
    }

    /// 將 input_path 轉換為 output_path，等待程序結束後回傳結果
    pub async fn run(&self, input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> RunResult {
        let invocation = Invocation::new(input_path.as_ref(), output_path.as_ref());
        self.run_invocation(&invocation).await
    }

    /// 執行一次呼叫。
    ///
    /// 不會回傳錯誤或 panic：所有失敗都放在 `RunOutcome::Failed`。
    /// 返回前一定會等待 stderr 排空工作結束，呼叫端可以立即讀取日誌檔。
    pub async fn run_invocation(&self, invocation: &Invocation) -> RunResult {
        let _guard = self.lock.lock().await;
        let log_path = self.config.log_path();

        info!(
            "啟動 {}，參數：{}",
            self.config.resolve_program().display(),
            invocation.argument_string()
        );

        let mut child = match self.config.command(invocation).spawn() {
            Ok(child) => child,
            Err(e) => {
                error!("無法啟動 {}：{}", self.config.program, e);
                return RunResult {
                    outcome: RunOutcome::Failed(RunnerError::LaunchFailed(e)),
                    log_path,
                    drain: None,
                };
            }
        };
        debug!("子程序 PID：{:?}", child.id());

        let drain_task = child.stderr.take().map(|stderr| {
            let drainer = StreamDrainer::new(&log_path);
            tokio::spawn(async move { drainer.drain(stderr).await })
        });

        let outcome = self.wait(&mut child).await;

        let drain = match drain_task {
            Some(task) => join_drain(task).await,
            None => None,
        };

        info!("{} 執行完成：{}", self.config.program, outcome);
        RunResult {
            outcome,
            log_path,
            drain,
        }
    }

    async fn wait(&self, child: &mut Child) -> RunOutcome {
        let status = match self.config.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    warn!("{} 超過 {:?} 未結束，終止程序", self.config.program, timeout);
                    if let Err(e) = child.kill().await {
                        warn!("終止程序失敗：{}", e);
                    }
                    return RunOutcome::Failed(RunnerError::TimedOut {
                        seconds: timeout.as_secs(),
                    });
                }
            },
            None => child.wait().await,
        };

        match status {
            Ok(status) => match status.code() {
                Some(code) => RunOutcome::Exited(code),
                None => RunOutcome::Terminated,
            },
            Err(e) => {
                // 無法確認狀態時終止程序，讓 stderr 關閉以結束排空工作
                warn!("等待程序結束失敗：{}", e);
                if let Err(kill_err) = child.kill().await {
                    warn!("終止程序失敗：{}", kill_err);
                }
                RunOutcome::Failed(RunnerError::WaitFailed(e))
            }
        }
    }
}

async fn join_drain(task: JoinHandle<io::Result<DrainReport>>) -> Option<DrainReport> {
    match task.await {
        Ok(Ok(report)) => Some(report),
        Ok(Err(e)) => {
            warn!("stderr 日誌寫入失敗：{}", e);
            None
        }
        Err(e) => {
            warn!("stderr 排空工作異常結束：{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_exit_is_success() {
        assert!(RunOutcome::Exited(0).is_success());
        assert!(!RunOutcome::Exited(1).is_success());
        assert!(!RunOutcome::Terminated.is_success());
        let failed = RunOutcome::Failed(RunnerError::TimedOut { seconds: 1 });
        assert!(!failed.is_success());
    }

    #[test]
    fn sentinel_used_without_real_exit_code() {
        assert_eq!(RunOutcome::Exited(3).exit_code(), 3);
        assert_eq!(RunOutcome::Terminated.exit_code(), SENTINEL_EXIT_CODE);
        let launch = RunOutcome::Failed(RunnerError::LaunchFailed(io::Error::from(io::ErrorKind::NotFound)));
        assert_eq!(launch.exit_code(), -1);
    }

    #[test]
    fn log_from_a_failed_drain_is_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");
        std::fs::write(&log, "diagnostics from the previous run\n").unwrap();

        let failed = RunResult {
            outcome: RunOutcome::Exited(1),
            log_path: log.clone(),
            drain: None,
        };
        assert!(failed.log_file().is_none());

        let written = RunResult {
            outcome: RunOutcome::Exited(1),
            log_path: log.clone(),
            drain: Some(DrainReport { lines: 1, bytes: 34, kept: true }),
        };
        assert_eq!(written.log_file(), Some(log.as_path()));
    }

    #[tokio::test]
    async fn missing_executable_reports_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProcessConfig::new("definitely-not-a-real-ffmpeg-binary").base_dir(dir.path());
        let runner = ProcessRunner::new(config);

        let result = runner.run("in.mp4", "out.mp4").await;

        match &result.outcome {
            RunOutcome::Failed(e) => assert!(e.is_launch_failure()),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(result.exit_code(), SENTINEL_EXIT_CODE);
        assert!(result.drain.is_none());
        assert!(result.log_file().is_none());
    }
}
