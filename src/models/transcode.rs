use std::path::PathBuf;
use std::time::Duration;
use crate::process::runner::RunResult;

#[derive(Clone, Debug)]
pub struct TranscodeInput {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug)]
pub struct TranscodeOutput {
    pub result: RunResult,
    pub elapsed: Duration,
}
