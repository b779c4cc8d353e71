use std::io;
use crate::models::transcode::{TranscodeInput, TranscodeOutput};

// Transcode 服務接口，負責執行 ffmpeg
pub trait TranscodeServiceTrait: Send + Sync {
    /// 執行一次轉換並等待 ffmpeg 結束
    /// # 參數
    /// - input: 已驗證的輸入與輸出路徑
    /// # 回傳
    /// - 執行結果（包含失敗的執行）；只有服務本身無法運作時才返回 IO 錯誤
    fn transcode(&self, input: TranscodeInput) -> io::Result<TranscodeOutput>;
}
