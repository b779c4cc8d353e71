use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 單次轉換請求：一個輸入檔案轉換為一個輸出檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl Invocation {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Invocation {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 傳給 ffmpeg 的參數：詳細日誌、指定輸入、一律覆寫輸出
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from("-loglevel"),
            OsString::from("verbose"),
            OsString::from("-i"),
            self.input_path.clone().into_os_string(),
            OsString::from("-y"),
            self.output_path.clone().into_os_string(),
        ]
    }

    /// 參數的單行字串形式，路徑以雙引號包住，含空白的路徑仍是單一參數
    pub fn argument_string(&self) -> String {
        format!(
            "-loglevel verbose -i \"{}\" -y \"{}\"",
            self.input_path.display(),
            self.output_path.display()
        )
    }
}
