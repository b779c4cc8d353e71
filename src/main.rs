use std::io;
use std::process::ExitCode;

use ffmpeg_runner::action::cli::process_args;

fn main() -> io::Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let output = process_args(args)?;
    log::info!(
        "程式執行完成，狀態：{:?}，開始於 {}",
        output.status,
        output.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(ExitCode::from(output.exit_status()))
}
