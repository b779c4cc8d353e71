//! 將子程序的 stderr 逐行寫入日誌檔

use std::io;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};

/// 日誌小於此大小（位元組）視為無內容並刪除
pub const MIN_LOG_SIZE: u64 = 4;

/// 排空結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// 寫入的行數
    pub lines: usize,
    /// 寫入的位元組數（含換行）
    pub bytes: u64,
    /// 日誌檔是否保留
    pub kept: bool,
}

/// 讀取資料流直到結束，逐行寫入目的檔案
#[derive(Debug, Clone)]
pub struct StreamDrainer {
    destination: PathBuf,
}

impl StreamDrainer {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        StreamDrainer {
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// 排空資料流。
    ///
    /// 只有資料流結束（子程序關閉 stderr）才會返回。目的檔案無法建立或寫入時，
    /// 仍會讀完剩餘資料再回傳錯誤，避免子程序因管道寫滿而卡住。
    pub async fn drain<R>(&self, source: R) -> io::Result<DrainReport>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(source);

        let file = match File::create(&self.destination).await {
            Ok(file) => file,
            Err(e) => {
                warn!("無法建立日誌檔 {}：{}", self.destination.display(), e);
                // 上一次的日誌不能被當成這次的結果
                if let Err(remove_err) = fs::remove_file(&self.destination).await {
                    if remove_err.kind() != io::ErrorKind::NotFound {
                        warn!("無法刪除舊的日誌檔 {}：{}", self.destination.display(), remove_err);
                    }
                }
                discard(&mut reader).await;
                return Err(e);
            }
        };

        let mut report = DrainReport::default();
        let copied = copy_lines(&mut reader, file, &mut report).await;
        if let Err(ref e) = copied {
            warn!("寫入日誌檔 {} 失敗：{}", self.destination.display(), e);
            discard(&mut reader).await;
        }

        report.kept = remove_if_trivial(&self.destination).await?;
        copied?;

        debug!(
            "stderr 排空完成：{} 行，{} 位元組，保留日誌：{}",
            report.lines, report.bytes, report.kept
        );
        Ok(report)
    }
}

// 檔案在函式返回時關閉。
// `\r\n`、`\n` 與單獨的 `\r` 都是行尾，ffmpeg 用 `\r` 覆寫狀態列；
// 每行一結束就寫入並 flush，不等待後續的 `\n`。
async fn copy_lines<R>(reader: &mut BufReader<R>, mut file: File, report: &mut DrainReport) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut line = Vec::new();
    let mut pending_cr = false;
    loop {
        let chunk = reader.fill_buf().await?.to_vec();
        if chunk.is_empty() {
            break;
        }
        reader.consume(chunk.len());

        for byte in chunk {
            if pending_cr {
                pending_cr = false;
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\r' => {
                    write_line(&mut file, &mut line, report).await?;
                    pending_cr = true;
                }
                b'\n' => write_line(&mut file, &mut line, report).await?,
                _ => line.push(byte),
            }
        }
    }
    // 最後一行沒有行尾
    if !line.is_empty() {
        write_line(&mut file, &mut line, report).await?;
    }
    file.sync_all().await
}

async fn write_line(file: &mut File, line: &mut Vec<u8>, report: &mut DrainReport) -> io::Result<()> {
    line.push(b'\n');
    file.write_all(line).await?;
    file.flush().await?;
    report.lines += 1;
    report.bytes += line.len() as u64;
    line.clear();
    Ok(())
}

async fn discard<R>(reader: &mut BufReader<R>)
where
    R: AsyncRead + Unpin,
{
    if let Err(e) = tokio::io::copy(reader, &mut tokio::io::sink()).await {
        warn!("丟棄剩餘 stderr 資料時發生錯誤：{}", e);
    }
}

/// 檔案小於 MIN_LOG_SIZE 時刪除，回傳檔案是否保留
async fn remove_if_trivial(path: &Path) -> io::Result<bool> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if metadata.len() < MIN_LOG_SIZE {
        fs::remove_file(path).await?;
        debug!("日誌檔僅 {} 位元組，已刪除：{}", metadata.len(), path.display());
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    async fn drain_bytes(source: &[u8]) -> (DrainReport, String) {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");
        let report = StreamDrainer::new(&log).drain(source).await.unwrap();
        let content = std::fs::read_to_string(&log).unwrap_or_default();
        (report, content)
    }

    #[tokio::test]
    async fn every_terminator_ends_a_line() {
        assert_eq!(drain_bytes(b"abcd\r\n").await.1, "abcd\n");
        assert_eq!(drain_bytes(b"frame=1\rframe=2\rdone\n").await.1, "frame=1\nframe=2\ndone\n");
        assert_eq!(drain_bytes(b"first\nsecond").await.1, "first\nsecond\n");
        assert_eq!(drain_bytes(b"line\r\r\n").await.1, "line\n\n");
        assert_eq!(drain_bytes(b"\n\n\nx\n").await.1, "\n\n\nx\n");
    }

    #[tokio::test]
    async fn carriage_return_lines_are_flushed_while_stream_is_open() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");
        let (mut tx, rx) = tokio::io::duplex(64);
        let drainer = StreamDrainer::new(&log);
        let task = tokio::spawn(async move { drainer.drain(rx).await });

        tx.write_all(b"frame=1\rframe=2\r").await.unwrap();
        let expected = "frame=1\nframe=2\n";
        let seen = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if std::fs::read_to_string(&log).unwrap_or_default() == expected {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await;
        assert!(seen.is_ok(), "log did not contain both lines while the stream was open");

        // 跨讀取邊界的 \r\n 仍是同一個行尾
        tx.write_all(b"\nsummary\n").await.unwrap();
        drop(tx);
        let report = task.await.unwrap().unwrap();
        assert_eq!(report.lines, 3);
        assert_eq!(std::fs::read_to_string(&log).unwrap(), "frame=1\nframe=2\nsummary\n");
    }

    #[tokio::test]
    async fn keeps_log_with_every_line_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");
        let source: &[u8] = b"first line\r\nsecond line\nthird";

        let report = StreamDrainer::new(&log).drain(source).await.unwrap();

        assert_eq!(report.lines, 3);
        assert!(report.kept);
        let content = std::fs::read_to_string(&log).unwrap();
        assert_eq!(content, "first line\nsecond line\nthird\n");
        assert_eq!(report.bytes, content.len() as u64);
    }

    #[tokio::test]
    async fn deletes_log_below_minimum_size() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");
        let source: &[u8] = b"ok\n";

        let report = StreamDrainer::new(&log).drain(source).await.unwrap();

        assert_eq!(report.lines, 1);
        assert_eq!(report.bytes, 3);
        assert!(!report.kept);
        assert!(!log.exists());
    }

    #[tokio::test]
    async fn empty_stream_leaves_no_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");

        let report = StreamDrainer::new(&log).drain(tokio::io::empty()).await.unwrap();

        assert_eq!(report, DrainReport::default());
        assert!(!log.exists());
    }

    #[tokio::test]
    async fn truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("error.log");
        std::fs::write(&log, "stale content from an earlier run\n").unwrap();
        let source: &[u8] = b"fresh\n";

        StreamDrainer::new(&log).drain(source).await.unwrap();

        assert_eq!(std::fs::read_to_string(&log).unwrap(), "fresh\n");
    }

    #[tokio::test]
    async fn unwritable_destination_still_consumes_source() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("missing").join("error.log");
        let mut source: &[u8] = b"line one\nline two\n";

        let result = StreamDrainer::new(&log).drain(&mut source).await;

        assert!(result.is_err());
        assert!(source.is_empty());
        assert!(!log.exists());
    }
}
