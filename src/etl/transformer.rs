// ==========================================
// Shine 制造数据分析 - 转换层（维度建模核心）
// ==========================================
// 职责: 清洗 → 指标派生 → 维度构建 → 事实构建
// 红线: 纯计算，无 I/O；保行（每条生产记录恰好一行事实）
// ==========================================

use crate::config::ProductCatalog;
use crate::domain::{
    DimDate, DimPlant, DimProduct, FactProduction, KeyLookup, ProductionRecord, SourceTables,
    WarehouseTables,
};
use chrono::Datelike;
use std::collections::{BTreeSet, HashMap};

/// 执行完整转换: 源表 → 星型模型
///
/// 库存与订单表在此被有意忽略（死输入，见提取层契约）。
/// 维度从生产记录自身构建，因此本函数产出的事实外键恒为 Matched；
/// `Unmatched` 路径由 `build_fact_rows` 针对外部维度索引时出现。
pub fn transform(sources: &SourceTables, catalog: &ProductCatalog) -> WarehouseTables {
    let production = &sources.production;

    let (dim_product, product_index) = build_dim_product(production, catalog);
    let (dim_plant, plant_index) = build_dim_plant(production);
    let dim_date = build_dim_date(production);
    let fact_production = build_fact_rows(production, &product_index, &plant_index);

    WarehouseTables {
        dim_product,
        dim_plant,
        dim_date,
        fact_production,
    }
}

// ==========================================
// 清洗与指标派生
// ==========================================

/// 数量清洗: 缺失 → 0，负值 → 0
pub fn clean_quantity(value: Option<i64>) -> i64 {
    value.unwrap_or(0).max(0)
}

/// 缺陷率: defective / produced，produced = 0 时恒为 0（零除保护）
///
/// 上限封顶 1.0，保证畸形输入（defective > produced）下不变量 [0,1] 仍成立
pub fn defect_rate(produced_qty: i64, defective_qty: i64) -> f64 {
    if produced_qty > 0 {
        (defective_qty as f64 / produced_qty as f64).min(1.0)
    } else {
        0.0
    }
}

// ==========================================
// 维度构建
// ==========================================

/// 产品维度: 按首次出现顺序去重，代理键 1..N，名称查产品目录
pub fn build_dim_product(
    production: &[ProductionRecord],
    catalog: &ProductCatalog,
) -> (Vec<DimProduct>, HashMap<String, i64>) {
    let mut index: HashMap<String, i64> = HashMap::new();
    let mut rows = Vec::new();

    for record in production {
        if !index.contains_key(&record.product_id) {
            let product_key = rows.len() as i64 + 1;
            index.insert(record.product_id.clone(), product_key);
            rows.push(DimProduct {
                product_key,
                product_id: record.product_id.clone(),
                product_name: catalog.display_name(&record.product_id),
            });
        }
    }
    (rows, index)
}

/// 工厂维度: 按首次出现顺序去重，代理键 1..N
pub fn build_dim_plant(production: &[ProductionRecord]) -> (Vec<DimPlant>, HashMap<String, i64>) {
    let mut index: HashMap<String, i64> = HashMap::new();
    let mut rows = Vec::new();

    for record in production {
        if !index.contains_key(&record.plant) {
            let plant_key = rows.len() as i64 + 1;
            index.insert(record.plant.clone(), plant_key);
            rows.push(DimPlant {
                plant_key,
                plant: record.plant.clone(),
            });
        }
    }
    (rows, index)
}

/// 日期维度: 不重复日期按日历升序，代理键 1..N 随日期单调递增
///
/// 与 product/plant 的首现顺序不同，这里按日期排序是有意的不对称
pub fn build_dim_date(production: &[ProductionRecord]) -> Vec<DimDate> {
    let dates: BTreeSet<_> = production.iter().map(|r| r.date).collect();

    dates
        .into_iter()
        .enumerate()
        .map(|(idx, date)| DimDate {
            date_key: idx as i64 + 1,
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
        .collect()
}

// ==========================================
// 事实构建
// ==========================================

/// 事实表: 每条生产记录左连接维度索引，fact_id 按输入顺序 1..N
///
/// 未命中索引的记录不丢行，外键记为 `KeyLookup::Unmatched`
pub fn build_fact_rows(
    production: &[ProductionRecord],
    product_index: &HashMap<String, i64>,
    plant_index: &HashMap<String, i64>,
) -> Vec<FactProduction> {
    production
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let produced_qty = clean_quantity(record.produced_qty);
            let defective_qty = clean_quantity(record.defective_qty);

            FactProduction {
                fact_id: idx as i64 + 1,
                date: record.date,
                product_id: record.product_id.clone(),
                product_key: lookup_key(product_index, &record.product_id),
                plant: record.plant.clone(),
                plant_key: lookup_key(plant_index, &record.plant),
                produced_qty,
                defective_qty,
                defect_rate: defect_rate(produced_qty, defective_qty),
            }
        })
        .collect()
}

fn lookup_key(index: &HashMap<String, i64>, natural_key: &str) -> KeyLookup {
    index
        .get(natural_key)
        .copied()
        .map(KeyLookup::Matched)
        .unwrap_or(KeyLookup::Unmatched)
}
