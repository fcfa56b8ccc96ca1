// ==========================================
// Shine 制造数据分析 - 源记录领域模型
// ==========================================
// 对齐: data/production.csv / inventory.csv / orders.csv 列集
// 用途: 提取层写入，转换层只读
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Shift - 生产班次
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    A,
    B,
    C,
}

impl Shift {
    /// 解析班次代码（A/B/C）
    pub fn parse(value: &str) -> Option<Shift> {
        match value {
            "A" => Some(Shift::A),
            "B" => Some(Shift::B),
            "C" => Some(Shift::C),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::A => "A",
            Shift::B => "B",
            Shift::C => "C",
        }
    }
}

// ==========================================
// 原始 CSV 行（serde 反序列化目标，日期仍为字符串）
// ==========================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawProductionRow {
    pub date: String,
    pub plant: String,
    pub product_id: String,
    pub produced_qty: Option<i64>,  // 空字段 → None，清洗阶段归零
    pub defective_qty: Option<i64>, // 空字段 → None，清洗阶段归零
    pub shift: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInventoryRow {
    pub date: String,
    pub plant: String,
    pub product_id: String,
    pub on_hand: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderRow {
    pub order_date: String,
    pub customer: String,
    pub product_id: String,
    pub order_qty: Option<i64>,
}

// ==========================================
// 类型化源记录（日期已解析）
// ==========================================

/// 生产记录 - 事实表的唯一数据来源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: NaiveDate,
    pub plant: String,
    pub product_id: String,
    pub produced_qty: Option<i64>,  // None = 源缺失，清洗阶段归零
    pub defective_qty: Option<i64>, // None = 源缺失，清洗阶段归零
    pub shift: Shift,
}

/// 库存快照记录
///
/// 当前仅提取校验，不进入维度模型（保留的“死输入”，见 dead-input 契约）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub date: NaiveDate,
    pub plant: String,
    pub product_id: String,
    pub on_hand: i64,
}

/// 客户订单记录
///
/// 当前仅提取校验，不进入维度模型（保留的“死输入”）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub customer: String,
    pub product_id: String,
    pub order_qty: i64,
}

// ==========================================
// SourceTables - 提取结果
// ==========================================
/// 三张类型化的内存源表，提取层的完整输出
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub production: Vec<ProductionRecord>,
    pub inventory: Vec<InventoryRecord>,
    pub orders: Vec<OrderRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_code_round_trip() {
        // 生成器写出的班次码必须能被提取层解析回同一变体
        for shift in [Shift::A, Shift::B, Shift::C] {
            assert_eq!(Shift::parse(shift.as_str()), Some(shift));
        }
        assert_eq!(Shift::parse("X"), None);
    }
}
