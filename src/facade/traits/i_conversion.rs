use std::io;
use crate::models::conversion::{ConversionInput, ConversionOutput};

// Facade 接口，負責協調檔案轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 檢查路徑後執行轉換
    /// # 參數
    /// - input: 使用者提供的輸入與輸出路徑
    /// # 回傳
    /// - 成功、失敗或被拒絕的轉換結果；只有服務本身無法運作時返回 IO 錯誤
    fn execute_conversion(&self, input: ConversionInput) -> io::Result<ConversionOutput>;
}
