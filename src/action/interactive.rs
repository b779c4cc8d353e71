use dialoguer::{Confirm, Input, Select};
use std::io;

use crate::action::cli::{print_result, run_conversion};
use crate::config::config::{validate_input_path, validate_output_path, INPUT_INVALID_MESSAGE, OUTPUT_INVALID_MESSAGE};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::models::conversion::ConversionOutput;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<ConversionOutput> {
    println!("=== 歡迎使用互動模式 ===");
    let use_default_config = get_default_config_option()?;

    loop {
        let input = get_input_path()?;
        let output = get_output_path()?;

        let config_port: Box<dyn ConfigPort> = if use_default_config {
            Box::new(DefaultConfigAdapter::new(input, output))
        } else {
            Box::new(InteractiveConfigAdapter::new(input, output))
        };
        let config = ConfigService::new(config_port).get_config()?;
        setup_logging(&config.log_level)?;

        let result = run_conversion(&config)?;
        print_result(&result);

        if !get_continue_option()? {
            return Ok(result);
        }
    }
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（顯示執行中提示、無限等待 ffmpeg，僅需指定輸入和輸出路徑）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

pub fn get_input_path() -> io::Result<String> {
    Input::new()
        .with_prompt("請輸入要轉換的媒體檔案（例如：./input.mp4）")
        .validate_with(|input: &String| -> Result<(), &'static str> {
            validate_input_path(input).map(|_| ()).map_err(|_| INPUT_INVALID_MESSAGE)
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_output_path() -> io::Result<String> {
    Input::new()
        .with_prompt("請輸入輸出檔案（副檔名決定格式，例如：./output.webm）")
        .validate_with(|output: &String| -> Result<(), &'static str> {
            validate_output_path(output).map(|_| ()).map_err(|_| OUTPUT_INVALID_MESSAGE)
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_log_level_option() -> io::Result<String> {
    let levels = ["info", "warn", "error"];
    let level = Select::new()
        .with_prompt("選擇日誌等級（使用方向鍵選擇，按 Enter 確認）")
        .items(&levels)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌等級選擇失敗: {}", e)))?;
    Ok(levels[level].to_string())
}

pub fn get_no_progress_option() -> io::Result<bool> {
    let show = Confirm::new()
        .with_prompt("是否在等待 ffmpeg 時顯示執行中提示？")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("提示選項輸入失敗: {}", e)))?;
    Ok(!show)
}

pub fn get_timeout_option() -> io::Result<Option<u64>> {
    let secs: u64 = Input::new()
        .with_prompt("等待 ffmpeg 的秒數上限（0 表示無限等待）")
        .default(0)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("等待上限輸入失敗: {}", e)))?;
    Ok(if secs == 0 { None } else { Some(secs) })
}

pub fn get_continue_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否繼續轉換其他檔案？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("繼續選項輸入失敗: {}", e)))
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    input: String,
    output: String,
}

impl InteractiveConfigAdapter {
    pub fn new(input: String, output: String) -> Self {
        InteractiveConfigAdapter { input, output }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let log_level = get_log_level_option()?;
        let no_progress = get_no_progress_option()?;
        let timeout = get_timeout_option()?;

        Ok(AppConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            log_level,
            no_progress,
            timeout,
        })
    }
}
