use std::io;
use std::path::{Path, PathBuf};
use chrono::Local;
use log::{info, warn};
use crate::config::config::preflight_check;
use crate::config::ports::AppConfig;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionInput, ConversionOutput, ConversionStatus};
use crate::models::transcode::TranscodeInput;
use crate::process::config::ProcessConfig;
use crate::process::runner::RunOutcome;
use crate::service::transcode::TranscodeService;
use crate::service::traits::i_service::TranscodeServiceTrait;
use crate::utils::utils::{create_spinner, format_file_size};

pub struct ConversionFacade {
    transcode_service: Box<dyn TranscodeServiceTrait>,
}

impl ConversionFacade {
    pub fn new(transcode_service: Box<dyn TranscodeServiceTrait>) -> Self {
        ConversionFacade { transcode_service }
    }

    /// 依照應用配置建立 facade
    pub fn from_config(config: &AppConfig) -> io::Result<Self> {
        let mut process_config = ProcessConfig::default();
        if let Some(secs) = config.timeout {
            process_config = process_config.timeout_secs(secs);
        }
        info!(
            "ffmpeg 位置：{}，日誌：{}",
            process_config.resolve_program().display(),
            process_config.log_path().display()
        );
        Ok(ConversionFacade::new(Box::new(TranscodeService::new(process_config)?)))
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, input: ConversionInput) -> io::Result<ConversionOutput> {
        let started_at = Local::now();

        if let Some(message) = preflight_check(&input.input_path, &input.output_path) {
            warn!("拒絕轉換：{}", message);
            return Ok(ConversionOutput::rejected(message, started_at));
        }

        // ffmpeg 的工作目錄是程式目錄，相對路徑先以目前目錄展開
        let transcode_input = TranscodeInput {
            input_path: absolutize(&input.input_path)?,
            output_path: absolutize(&input.output_path)?,
        };
        info!(
            "開始轉換，輸入：{}，輸出：{}",
            transcode_input.input_path.display(),
            transcode_input.output_path.display()
        );

        let pm = create_spinner(input.no_progress);
        pm.start(format!("正在轉換 {}", input.input_path));
        let output = self.transcode_service.transcode(transcode_input)?;
        let result = output.result;

        let status = if result.is_success() {
            ConversionStatus::Success
        } else {
            ConversionStatus::Failure
        };
        pm.finish(if result.is_success() { "轉換完成" } else { "轉換失敗" });

        if let RunOutcome::Failed(ref e) = result.outcome {
            warn!("ffmpeg 執行失敗：{}", e);
        }
        let log_path = result.log_file().map(Path::to_path_buf);
        if let (Some(path), Some(report)) = (&log_path, result.drain) {
            info!(
                "診斷日誌：{}，{} 行，{}",
                path.display(),
                report.lines,
                format_file_size(report.bytes)
            );
        }

        Ok(ConversionOutput {
            status,
            exit_code: Some(result.exit_code()),
            detail: Some(result.outcome.to_string()),
            log_path,
            started_at,
            elapsed: output.elapsed,
        })
    }
}

fn absolutize(path: &str) -> io::Result<PathBuf> {
    let path = Path::new(path);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
