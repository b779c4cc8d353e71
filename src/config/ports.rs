use std::io;

// 應用配置結構體，封裝一次轉換所需的所有參數
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input: String,
    pub output: String,
    pub log_level: String,
    pub no_progress: bool,
    pub timeout: Option<u64>,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}
