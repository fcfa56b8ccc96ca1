// ==========================================
// Shine 制造数据分析 - 领域模型层
// ==========================================
// 职责: 定义源记录、仓库实体与质量检查类型
// 红线: 不含数据访问逻辑，不含 ETL 逻辑
// ==========================================

pub mod source;
pub mod warehouse;

// 重导出核心类型
pub use source::{
    InventoryRecord, OrderRecord, ProductionRecord, RawInventoryRow, RawOrderRow,
    RawProductionRow, Shift, SourceTables,
};
pub use warehouse::{
    DimDate, DimPlant, DimProduct, FactProduction, KeyLookup, QualityCheck, WarehouseTables,
};
