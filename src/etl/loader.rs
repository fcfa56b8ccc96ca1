// ==========================================
// Shine 制造数据分析 - 装载层
// ==========================================
// 职责: 维度/事实表持久化到 SQLite，整表替换
// 原子性: 四张表的替换在同一事务内提交，并发读方
//         要么看到完整旧表集，要么看到完整新表集
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::WarehouseTables;
use crate::etl::error::{EtlError, EtlResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// 打开（必要时创建）仓库文件并装载全部表
pub fn load(db_path: &Path, tables: &WarehouseTables) -> EtlResult<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EtlError::PersistenceError(e.to_string()))?;
        }
    }

    let conn = open_sqlite_connection(db_path)?;
    load_with_connection(&conn, tables)
}

/// 在已有连接上装载全部表（单事务，整体替换）
///
/// 删除顺序: 先事实后维度；创建顺序: 先维度后事实。
/// 外键约束开启时该顺序是事务内 DROP 的前提。
pub fn load_with_connection(conn: &Connection, tables: &WarehouseTables) -> EtlResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        r#"
        DROP TABLE IF EXISTS fact_production;
        DROP TABLE IF EXISTS dim_product;
        DROP TABLE IF EXISTS dim_plant;
        DROP TABLE IF EXISTS dim_date;

        CREATE TABLE dim_product (
            product_key  INTEGER PRIMARY KEY,
            product_id   TEXT NOT NULL UNIQUE,
            product_name TEXT NOT NULL
        );

        CREATE TABLE dim_plant (
            plant_key INTEGER PRIMARY KEY,
            plant     TEXT NOT NULL UNIQUE
        );

        CREATE TABLE dim_date (
            date_key INTEGER PRIMARY KEY,
            date     TEXT NOT NULL UNIQUE,
            year     INTEGER NOT NULL,
            month    INTEGER NOT NULL,
            day      INTEGER NOT NULL
        );

        CREATE TABLE fact_production (
            fact_id       INTEGER PRIMARY KEY,
            date          TEXT NOT NULL,
            product_id    TEXT NOT NULL,
            product_key   INTEGER REFERENCES dim_product(product_key),
            plant         TEXT NOT NULL,
            plant_key     INTEGER REFERENCES dim_plant(plant_key),
            produced_qty  INTEGER NOT NULL,
            defective_qty INTEGER NOT NULL,
            defect_rate   REAL NOT NULL
        );
        "#,
    )?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO dim_product (product_key, product_id, product_name) VALUES (?1, ?2, ?3)",
        )?;
        for row in &tables.dim_product {
            stmt.execute(params![row.product_key, row.product_id, row.product_name])?;
        }
    }

    {
        let mut stmt = tx.prepare("INSERT INTO dim_plant (plant_key, plant) VALUES (?1, ?2)")?;
        for row in &tables.dim_plant {
            stmt.execute(params![row.plant_key, row.plant])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO dim_date (date_key, date, year, month, day) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for row in &tables.dim_date {
            stmt.execute(params![row.date_key, row.date, row.year, row.month, row.day])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO fact_production (
                fact_id, date, product_id, product_key,
                plant, plant_key, produced_qty, defective_qty, defect_rate
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )?;
        for row in &tables.fact_production {
            stmt.execute(params![
                row.fact_id,
                row.date,
                row.product_id,
                row.product_key.as_option(),
                row.plant,
                row.plant_key.as_option(),
                row.produced_qty,
                row.defective_qty,
                row.defect_rate,
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}
