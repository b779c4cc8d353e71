#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ffmpeg_runner::ProcessConfig;

/// 在 dir 內建立名為 ffmpeg 的假執行檔，內容為 sh 腳本
#[cfg(unix)]
pub fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ffmpeg");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn config_for(dir: &Path) -> ProcessConfig {
    ProcessConfig::new("ffmpeg").base_dir(dir)
}

/// 建立一個存在的輸入檔，回傳輸入與輸出路徑
pub fn media_paths(dir: &Path) -> (PathBuf, PathBuf) {
    let input = dir.join("a.mp4");
    fs::write(&input, b"not really a video").unwrap();
    (input, dir.join("a.webm"))
}
