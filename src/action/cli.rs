use std::io;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::Cli;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionInput, ConversionOutput};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> io::Result<ConversionOutput> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<ConversionOutput> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref().unwrap_or("info"))?;

    // 只提供 input 和 output 時使用預設配置
    let is_default_config = cli.log_level.is_none() && cli.no_progress.is_none() && cli.timeout.is_none();

    let config_port: Box<dyn ConfigPort> = if is_default_config {
        log::info!("未提供選項參數，使用預設配置");
        Box::new(DefaultConfigAdapter::new(cli.input.clone(), cli.output.clone()))
    } else {
        Box::new(CliConfigAdapter::new(cli.clone()))
    };

    let config_service = ConfigService::new(config_port);
    let config = config_service.get_config()?;

    let output = run_conversion(&config)?;
    print_result(&output);

    // 若啟用 --show-config，在轉換後顯示配置
    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    Ok(output)
}

/// 依配置建立 facade 並執行一次轉換
pub fn run_conversion(config: &AppConfig) -> io::Result<ConversionOutput> {
    let facade: Box<dyn ConversionFacadeTrait> = Box::new(ConversionFacade::from_config(config)?);
    facade.execute_conversion(ConversionInput {
        input_path: config.input.clone(),
        output_path: config.output.clone(),
        no_progress: config.no_progress,
    })
}

/// 顯示轉換結果與日誌位置
pub fn print_result(output: &ConversionOutput) {
    println!("{}", output.message());
    if let (false, Some(detail)) = (output.is_success(), &output.detail) {
        println!("{}", detail);
    }
    if let Some(ref log_path) = output.log_path {
        println!("診斷日誌：{}", log_path.display());
    }
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        if self.cli.timeout == Some(0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--timeout 必須大於 0，不指定則無限等待",
            ));
        }

        log::info!(
            "使用自訂配置：log_level={:?}, no_progress={:?}, timeout={:?}",
            self.cli.log_level, self.cli.no_progress, self.cli.timeout
        );

        Ok(AppConfig {
            input: self.cli.input.clone(),
            output: self.cli.output.clone(),
            log_level: self.cli.log_level.clone().unwrap_or("info".to_string()),
            no_progress: self.cli.no_progress.unwrap_or(false),
            timeout: self.cli.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn adapter_fills_defaults() {
        let cli = parse(&["ffmpeg_runner", "in.mp4", "out.mkv", "--timeout", "30"]);
        let config = CliConfigAdapter::new(cli).get_config().unwrap();
        assert_eq!(config.input, "in.mp4");
        assert_eq!(config.output, "out.mkv");
        assert_eq!(config.log_level, "info");
        assert!(!config.no_progress);
        assert_eq!(config.timeout, Some(30));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = parse(&["ffmpeg_runner", "in.mp4", "out.mkv", "--timeout", "0"]);
        assert!(CliConfigAdapter::new(cli).get_config().is_err());
    }

    #[test]
    fn unknown_log_level_fails_to_parse() {
        assert!(Cli::try_parse_from(["ffmpeg_runner", "a", "b", "--log-level", "trace"]).is_err());
    }

    #[test]
    fn bare_no_progress_flag_means_true() {
        let cli = parse(&["ffmpeg_runner", "in.mp4", "out.mkv", "--no-progress"]);
        assert_eq!(cli.no_progress, Some(true));
    }

    #[test]
    fn output_is_required() {
        assert!(Cli::try_parse_from(["ffmpeg_runner", "a"]).is_err());
    }
}
