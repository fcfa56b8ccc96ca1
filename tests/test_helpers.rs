// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的源 CSV 夹具、管道配置、表转储等功能
// ==========================================

#![allow(dead_code)]

use rusqlite::Connection;
use shine_analytics::PipelineConfig;
use std::fs;
use std::path::Path;

/// 写出最小示例场景的三个源 CSV
///
/// 生产: 日期 [D1, D2]，产品 [P100, P200]，工厂 "A"，
/// produced = [10, 20, 0]，defective = [1, 0, 0]
pub fn write_small_fixture(dir: &Path) {
    fs::write(
        dir.join("production.csv"),
        "date,plant,product_id,produced_qty,defective_qty,shift\n\
         2025-01-01,A,P100,10,1,A\n\
         2025-01-01,A,P200,20,0,B\n\
         2025-01-02,A,P100,0,0,C\n",
    )
    .expect("write production.csv");

    fs::write(
        dir.join("inventory.csv"),
        "date,plant,product_id,on_hand\n\
         2025-01-01,A,P100,120\n",
    )
    .expect("write inventory.csv");

    fs::write(
        dir.join("orders.csv"),
        "order_date,customer,product_id,order_qty\n\
         2025-01-01,OEM-A,P100,30\n",
    )
    .expect("write orders.csv");
}

/// 以 dir 为数据目录的管道配置（源与仓库互相隔离）
pub fn fixture_config(dir: &Path) -> PipelineConfig {
    PipelineConfig::with_data_dir(dir)
}

/// 转储单表全部行为字符串列表，便于逐字节比较
pub fn dump_table(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {table}"))
        .expect("prepare dump");
    let column_count = stmt.column_count();
    stmt.query_map([], |row| {
        let mut parts = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            parts.push(format!("{:?}", row.get_ref(idx)?));
        }
        Ok(parts.join("|"))
    })
    .expect("query dump")
    .collect::<Result<Vec<_>, _>>()
    .expect("collect dump")
}

/// 转储四张仓库表
pub fn dump_warehouse(conn: &Connection) -> Vec<String> {
    let mut all = Vec::new();
    for table in ["dim_product", "dim_plant", "dim_date", "fact_production"] {
        all.extend(dump_table(conn, table));
    }
    all
}
