// ==========================================
// Shine 制造数据分析 - 数据仓库领域模型
// ==========================================
// 星型模型: 三张维度表 + 一张事实表
// 对齐: dim_product / dim_plant / dim_date / fact_production 表结构
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// KeyLookup - 维度外键查找结果
// ==========================================
/// 左连接的显式结果标签
///
/// 未命中的维度查找不会丢行，而是记为 `Unmatched`，持久化为 SQL NULL，
/// 并由质量检查 `unmatched_*_key` 计数上报。调用方若需要严格引用完整性，
/// 应在装载前根据质量检查结果自行拦截。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyLookup {
    Matched(i64),
    Unmatched,
}

impl KeyLookup {
    /// 转换为 Option（Unmatched → None），用于 SQL 绑定
    pub fn as_option(self) -> Option<i64> {
        match self {
            KeyLookup::Matched(key) => Some(key),
            KeyLookup::Unmatched => None,
        }
    }

    pub fn is_matched(self) -> bool {
        matches!(self, KeyLookup::Matched(_))
    }
}

// ==========================================
// 维度表行
// ==========================================

/// 产品维度行
///
/// 代理键按 product_id 首次出现顺序从 1 递增
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimProduct {
    pub product_key: i64,
    pub product_id: String,   // 自然键，唯一
    pub product_name: String, // 产品目录查得；未登记 id → Unknown(<id>)
}

/// 工厂维度行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimPlant {
    pub plant_key: i64,
    pub plant: String, // 自然键，唯一
}

/// 日期维度行
///
/// 代理键按日历日期升序从 1 递增（与其他维度的首现顺序不同，是有意的不对称）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimDate {
    pub date_key: i64,
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

// ==========================================
// 事实表行
// ==========================================

/// 生产事实行
///
/// 转换是保行的: 每条生产记录恰好产出一行事实，从不过滤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactProduction {
    pub fact_id: i64, // 顺序代理键，从 1 起
    pub date: NaiveDate,
    pub product_id: String,
    pub product_key: KeyLookup, // 外键 → dim_product
    pub plant: String,
    pub plant_key: KeyLookup, // 外键 → dim_plant
    pub produced_qty: i64,    // 清洗后非负
    pub defective_qty: i64,   // 清洗后非负
    pub defect_rate: f64,     // ∈ [0,1]；produced_qty = 0 时恒为 0
}

// ==========================================
// WarehouseTables - 转换层完整输出
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct WarehouseTables {
    pub dim_product: Vec<DimProduct>,
    pub dim_plant: Vec<DimPlant>,
    pub dim_date: Vec<DimDate>,
    pub fact_production: Vec<FactProduction>,
}

// ==========================================
// QualityCheck - 数据质量检查项
// ==========================================
/// 单条质量检查结果 (table, check, value)
///
/// 纯数据，仅作观测信号，从不阻断装载
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub table: String,
    pub check: String,
    pub value: i64,
}

impl QualityCheck {
    pub fn new(table: &str, check: &str, value: i64) -> Self {
        Self {
            table: table.to_string(),
            check: check.to_string(),
            value,
        }
    }
}
