use std::io;
use crate::config::ports::{AppConfig, ConfigPort};

// 配置服務，負責從選定的配置適配器取得配置
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器
pub struct DefaultConfigAdapter {
    input: String,
    output: String,
}

impl DefaultConfigAdapter {
    pub fn new(input: String, output: String) -> Self {
        DefaultConfigAdapter { input, output }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            log_level: "info".to_string(),
            no_progress: false,
            timeout: None, // 無限等待
        })
    }
}
