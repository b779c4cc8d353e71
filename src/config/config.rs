use clap::Parser;
use std::io;
use std::path::Path;

pub const INPUT_INVALID_MESSAGE: &str = "Input file is not a valid file or directory.";
pub const OUTPUT_INVALID_MESSAGE: &str = "Output file is not a valid file or directory.";

#[derive(Parser, Clone, Debug)]
#[command(
    name = "ffmpeg_runner",
    about = "呼叫 ffmpeg 將媒體檔案轉換為另一種格式",
    long_about = "以 ffmpeg 將輸入檔案轉換為輸出檔案（輸出格式由副檔名決定），ffmpeg 的診斷訊息寫入程式目錄下的 error.log。\n不帶任何參數執行時進入互動模式。\n使用 `--help` 查看詳細用法。"
)]
pub struct Cli {
    /// 輸入媒體檔案
    pub input: String,
    /// 輸出媒體檔案，已存在時會被覆寫
    pub output: String,
    #[arg(long, value_parser = ["info", "warn", "error"])]
    pub log_level: Option<String>,
    /// 不顯示執行中提示
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub no_progress: Option<bool>,
    /// 等待 ffmpeg 的秒數上限，未指定時無限等待
    #[arg(long)]
    pub timeout: Option<u64>,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

/// 輸入必須是已存在的一般檔案
pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.is_file() {
        log::error!("輸入檔案不存在：{}", input);
        return Err(io::Error::new(io::ErrorKind::NotFound, INPUT_INVALID_MESSAGE));
    }
    Ok(path)
}

/// 輸出檔案的上層目錄必須存在；沒有上層目錄的相對路徑視為目前目錄
pub fn validate_output_path(output: &str) -> io::Result<&Path> {
    let path = Path::new(output);
    let parent_exists = match path.parent() {
        _ if output.trim().is_empty() => false,
        Some(parent) if parent.as_os_str().is_empty() => true,
        Some(parent) => parent.is_dir(),
        None => false,
    };
    if !parent_exists || path.is_dir() {
        log::error!("輸出目錄不存在：{}", output);
        return Err(io::Error::new(io::ErrorKind::NotFound, OUTPUT_INVALID_MESSAGE));
    }
    Ok(path)
}

/// 轉換前檢查，輸出目錄優先；通過時回傳 None
pub fn preflight_check(input: &str, output: &str) -> Option<&'static str> {
    if validate_output_path(output).is_err() {
        return Some(OUTPUT_INVALID_MESSAGE);
    }
    if validate_input_path(input).is_err() {
        return Some(INPUT_INVALID_MESSAGE);
    }
    None
}
