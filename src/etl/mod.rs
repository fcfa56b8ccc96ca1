// ==========================================
// Shine 制造数据分析 - ETL 层
// ==========================================
// 职责: extract → transform → 质量检查 → load
// ==========================================

pub mod error;
pub mod extractor;
pub mod loader;
pub mod pipeline;
pub mod quality;
pub mod transformer;

// 重导出核心接口
pub use error::{EtlError, EtlResult};
pub use extractor::extract;
pub use loader::{load, load_with_connection};
pub use pipeline::{run_pipeline, PipelineReport};
pub use quality::run_quality_checks;
pub use transformer::transform;
