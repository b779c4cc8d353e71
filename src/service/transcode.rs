use std::io;
use std::time::Instant;
use log::info;
use tokio::runtime::{Builder, Runtime};
use crate::models::transcode::{TranscodeInput, TranscodeOutput};
use crate::process::config::ProcessConfig;
use crate::process::runner::ProcessRunner;
use crate::service::traits::i_service::TranscodeServiceTrait;

/// Transcode 服務，以同步介面驅動非同步的 ProcessRunner
pub struct TranscodeService {
    runner: ProcessRunner,
    runtime: Runtime,
}

impl TranscodeService {
    /// 以指定的啟動設定創建服務
    pub fn new(config: ProcessConfig) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(TranscodeService {
            runner: ProcessRunner::new(config),
            runtime,
        })
    }

    pub fn runner(&self) -> &ProcessRunner {
        &self.runner
    }
}

impl TranscodeServiceTrait for TranscodeService {
    fn transcode(&self, input: TranscodeInput) -> io::Result<TranscodeOutput> {
        let start = Instant::now();
        let result = self
            .runtime
            .block_on(self.runner.run(&input.input_path, &input.output_path));
        let elapsed = start.elapsed();
        info!("轉換結束：{}，耗時 {:.2} 秒", result.outcome, elapsed.as_secs_f64());
        Ok(TranscodeOutput { result, elapsed })
    }
}
