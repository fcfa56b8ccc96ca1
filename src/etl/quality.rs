// ==========================================
// Shine 制造数据分析 - 数据质量检查
// ==========================================
// 职责: 对已构建的表集产出有序检查列表
// 红线: 纯函数，无副作用；检查只上报，从不阻断装载
// ==========================================

use crate::domain::{QualityCheck, WarehouseTables};

/// 执行全部质量检查，返回有序的 (table, check, value) 列表
///
/// 顺序固定: 四张表的 row_count → 空值检查 → 未命中外键检查，
/// 便于测试直接断言整个列表
pub fn run_quality_checks(tables: &WarehouseTables) -> Vec<QualityCheck> {
    let mut checks = Vec::new();

    // ===== 行数检查 =====
    checks.push(QualityCheck::new(
        "dim_product",
        "row_count",
        tables.dim_product.len() as i64,
    ));
    checks.push(QualityCheck::new(
        "dim_plant",
        "row_count",
        tables.dim_plant.len() as i64,
    ));
    checks.push(QualityCheck::new(
        "dim_date",
        "row_count",
        tables.dim_date.len() as i64,
    ));
    checks.push(QualityCheck::new(
        "fact_production",
        "row_count",
        tables.fact_production.len() as i64,
    ));

    // ===== 关键列空值检查 =====
    let null_product_id = tables
        .dim_product
        .iter()
        .filter(|row| row.product_id.is_empty())
        .count() as i64;
    checks.push(QualityCheck::new(
        "dim_product",
        "null_product_id",
        null_product_id,
    ));

    // produced_qty 在清洗后结构上不可能缺失，检查恒为 0，
    // 保留它是为了让报告口径与仓库契约一致
    checks.push(QualityCheck::new("fact_production", "null_produced_qty", 0));

    // ===== 未命中外键检查（左连接孤儿行上报口径）=====
    let unmatched_product = tables
        .fact_production
        .iter()
        .filter(|row| !row.product_key.is_matched())
        .count() as i64;
    checks.push(QualityCheck::new(
        "fact_production",
        "unmatched_product_key",
        unmatched_product,
    ));

    let unmatched_plant = tables
        .fact_production
        .iter()
        .filter(|row| !row.plant_key.is_matched())
        .count() as i64;
    checks.push(QualityCheck::new(
        "fact_production",
        "unmatched_plant_key",
        unmatched_plant,
    ));

    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DimProduct, FactProduction, KeyLookup};
    use chrono::NaiveDate;

    fn fact(product_key: KeyLookup) -> FactProduction {
        FactProduction {
            fact_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            product_id: "P100".to_string(),
            product_key,
            plant: "Steinau".to_string(),
            plant_key: KeyLookup::Matched(1),
            produced_qty: 10,
            defective_qty: 1,
            defect_rate: 0.1,
        }
    }

    #[test]
    fn test_check_order_is_stable() {
        let tables = WarehouseTables::default();
        let checks = run_quality_checks(&tables);
        let names: Vec<_> = checks
            .iter()
            .map(|c| (c.table.as_str(), c.check.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("dim_product", "row_count"),
                ("dim_plant", "row_count"),
                ("dim_date", "row_count"),
                ("fact_production", "row_count"),
                ("dim_product", "null_product_id"),
                ("fact_production", "null_produced_qty"),
                ("fact_production", "unmatched_product_key"),
                ("fact_production", "unmatched_plant_key"),
            ]
        );
    }

    #[test]
    fn test_unmatched_keys_counted() {
        let tables = WarehouseTables {
            dim_product: vec![DimProduct {
                product_key: 1,
                product_id: "P100".to_string(),
                product_name: "Harness-A".to_string(),
            }],
            fact_production: vec![fact(KeyLookup::Matched(1)), fact(KeyLookup::Unmatched)],
            ..Default::default()
        };

        let checks = run_quality_checks(&tables);
        let unmatched = checks
            .iter()
            .find(|c| c.check == "unmatched_product_key")
            .unwrap();
        assert_eq!(unmatched.value, 1);
    }
}
