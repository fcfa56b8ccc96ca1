// ==========================================
// Shine 制造数据分析 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 批处理 ETL + 星型模型数据仓库
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 源记录与仓库实体
pub mod domain;

// ETL 层 - 提取/转换/装载/质量检查
pub mod etl;

// 查询层 - 数据仓库只读查询
pub mod query;

// 配置层 - 管道配置与产品目录
pub mod config;

// 演示数据生成器
pub mod generator;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DimDate, DimPlant, DimProduct, FactProduction, InventoryRecord, KeyLookup, OrderRecord,
    ProductionRecord, QualityCheck, Shift, SourceTables, WarehouseTables,
};

// 配置
pub use config::{PipelineConfig, ProductCatalog};

// ETL
pub use etl::{run_pipeline, EtlError, EtlResult, PipelineReport};

// 查询
pub use query::{QueryError, QueryResult, WarehouseReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Shine 制造数据分析";

// 默认数据仓库路径
pub const DEFAULT_DB_PATH: &str = "data/odw_dw.db";
