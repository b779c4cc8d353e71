use std::io;
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use log;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    // logger 只建立一次且不自行過濾，實際等級一律由 max_level 控制，
    // 互動模式每次轉換都可以重新選擇等級
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .try_init();
    log::set_max_level(log_level_filter);
    Ok(())
}

/// 等待 ffmpeg 時顯示的轉圈提示，只表示「執行中」
pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg} [{elapsed_precise}]")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    pub fn start(&self, msg: String) {
        if self.no_progress {
            return;
        }
        self.pb.set_message(msg);
        self.pb.enable_steady_tick(Duration::from_millis(120));
    }

    pub fn finish(&self, msg: &str) {
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        self.pb.finish_with_message(format!("{}，耗時 {:.1} 秒", msg, elapsed));
    }
}

pub fn create_spinner(no_progress: bool) -> ProgressManager {
    ProgressManager::new(no_progress)
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(512), "0.50 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn hidden_spinner_is_silent() {
        let pm = create_spinner(true);
        pm.start("running".to_string());
        pm.finish("done");
        assert!(pm.pb.is_hidden());
    }

    #[test]
    fn later_setup_can_raise_verbosity() {
        assert!(setup_logging("error").is_ok());
        assert_eq!(log::max_level(), log::LevelFilter::Error);
        assert!(!log::log_enabled!(log::Level::Info));

        assert!(setup_logging("info").is_ok());
        assert_eq!(log::max_level(), log::LevelFilter::Info);
        assert!(log::log_enabled!(log::Level::Info));
        assert!(!log::log_enabled!(log::Level::Debug));
    }
}
