// ==========================================
// Shine 制造数据分析 - ETL 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播策略: 任一阶段出错即中止本次运行，不自动重试
// ==========================================

use thiserror::Error;

/// ETL 管道错误类型
///
/// 质量检查发现的问题（空值、未命中外键）不属于错误，
/// 以 `QualityCheck` 数据形式随报告返回。
#[derive(Error, Debug)]
pub enum EtlError {
    // ===== 数据源读取错误 =====
    #[error("数据源文件不存在: {0}")]
    SourceFileNotFound(String),

    #[error("CSV 解析失败 ({file}): {message}")]
    SourceCsvError { file: String, message: String },

    #[error("日期格式错误 ({file} 行 {row}, 字段 {field}): 期望 YYYY-MM-DD，实际 {value}")]
    SourceDateError {
        file: String,
        row: usize,
        field: String,
        value: String,
    },

    #[error("字段值错误 ({file} 行 {row}, 字段 {field}): {value}")]
    SourceFieldError {
        file: String,
        row: usize,
        field: String,
        value: String,
    },

    // ===== 转换错误 =====
    // 当前转换是全函数（左连接 + 清洗归零，从不失败）；
    // 该变体为未来的严格模式预留（如: 未命中外键按错误处理）。
    #[error("数据转换失败: {0}")]
    TransformError(String),

    // ===== 持久化错误 =====
    #[error("数据仓库写入失败: {0}")]
    PersistenceError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EtlError {
    /// 出错阶段标识，用于驱动层日志
    pub fn stage(&self) -> &'static str {
        match self {
            EtlError::SourceFileNotFound(_)
            | EtlError::SourceCsvError { .. }
            | EtlError::SourceDateError { .. }
            | EtlError::SourceFieldError { .. } => "extract",
            EtlError::TransformError(_) => "transform",
            EtlError::PersistenceError(_) => "load",
            EtlError::Other(_) => "pipeline",
        }
    }

    /// 进程退出码: 2 = 提取失败，3 = 装载失败，1 = 其他
    pub fn exit_code(&self) -> i32 {
        match self.stage() {
            "extract" => 2,
            "load" => 3,
            _ => 1,
        }
    }
}

// 装载阶段的数据库错误
impl From<rusqlite::Error> for EtlError {
    fn from(err: rusqlite::Error) -> Self {
        EtlError::PersistenceError(err.to_string())
    }
}

/// Result 类型别名
pub type EtlResult<T> = Result<T, EtlError>;
