// ==========================================
// Shine 制造数据分析 - 提取层
// ==========================================
// 职责: 三个 CSV 源 → 类型化内存表，日期列解析为 NaiveDate
// 契约: 任一必需源缺失/不可读/日期不可解析 → 整次运行中止，无部分装载
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{
    InventoryRecord, OrderRecord, ProductionRecord, RawInventoryRow, RawOrderRow,
    RawProductionRow, Shift, SourceTables,
};
use crate::etl::error::{EtlError, EtlResult};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::path::Path;

/// 日期列的期望格式（ISO 日历日期）
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 提取三张源表
///
/// 顺序: production → inventory → orders，首个失败的源即中止
pub fn extract(config: &PipelineConfig) -> EtlResult<SourceTables> {
    let production = read_production(&config.production_csv)?;
    let inventory = read_inventory(&config.inventory_csv)?;
    let orders = read_orders(&config.orders_csv)?;

    Ok(SourceTables {
        production,
        inventory,
        orders,
    })
}

/// 读取生产记录源
pub fn read_production(path: &Path) -> EtlResult<Vec<ProductionRecord>> {
    let rows: Vec<RawProductionRow> = read_csv_rows(path)?;
    let file = path.display().to_string();

    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        // 表头占第 1 行，数据从第 2 行起
        let line = idx + 2;
        let date = parse_date(&row.date, &file, line, "date")?;
        let shift = Shift::parse(&row.shift).ok_or_else(|| EtlError::SourceFieldError {
            file: file.clone(),
            row: line,
            field: "shift".to_string(),
            value: row.shift.clone(),
        })?;

        records.push(ProductionRecord {
            date,
            plant: row.plant,
            product_id: row.product_id,
            produced_qty: row.produced_qty,
            defective_qty: row.defective_qty,
            shift,
        });
    }
    Ok(records)
}

/// 读取库存快照源（死输入: 仅提取校验，不进入维度模型）
pub fn read_inventory(path: &Path) -> EtlResult<Vec<InventoryRecord>> {
    let rows: Vec<RawInventoryRow> = read_csv_rows(path)?;
    let file = path.display().to_string();

    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let line = idx + 2;
        let date = parse_date(&row.date, &file, line, "date")?;
        records.push(InventoryRecord {
            date,
            plant: row.plant,
            product_id: row.product_id,
            on_hand: row.on_hand.unwrap_or(0).max(0),
        });
    }
    Ok(records)
}

/// 读取客户订单源（死输入: 仅提取校验，不进入维度模型）
pub fn read_orders(path: &Path) -> EtlResult<Vec<OrderRecord>> {
    let rows: Vec<RawOrderRow> = read_csv_rows(path)?;
    let file = path.display().to_string();

    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let line = idx + 2;
        let order_date = parse_date(&row.order_date, &file, line, "order_date")?;
        records.push(OrderRecord {
            order_date,
            customer: row.customer,
            product_id: row.product_id,
            order_qty: row.order_qty.unwrap_or(0).max(0),
        });
    }
    Ok(records)
}

// ==========================================
// 内部辅助
// ==========================================

/// 打开 CSV 并反序列化全部数据行（要求表头行）
fn read_csv_rows<T: DeserializeOwned>(path: &Path) -> EtlResult<Vec<T>> {
    if !path.exists() {
        return Err(EtlError::SourceFileNotFound(path.display().to_string()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| EtlError::SourceCsvError {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        let row = result.map_err(|e| EtlError::SourceCsvError {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// 解析 ISO 日期列，失败时带文件/行号/字段定位
fn parse_date(value: &str, file: &str, row: usize, field: &str) -> EtlResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| EtlError::SourceDateError {
        file: file.to_string(),
        row,
        field: field.to_string(),
        value: value.to_string(),
    })
}
