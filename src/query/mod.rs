// ==========================================
// Shine 制造数据分析 - 数据仓库查询层
// ==========================================
// 职责: 管理驾驶舱/管理工具的只读查询
// 红线: 只读，不含 ETL 逻辑，不修改仓库
// ==========================================

use crate::db::open_sqlite_connection;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

// ==========================================
// 错误类型
// ==========================================

/// 查询层错误类型
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("数据仓库不存在: {0}。请先运行 shine-etl 构建数据仓库")]
    WarehouseNotFound(String),

    #[error("表不存在: {0}")]
    TableNotFound(String),

    #[error("数据仓库查询失败: {0}")]
    QueryFailed(String),
}

impl From<rusqlite::Error> for QueryError {
    fn from(err: rusqlite::Error) -> Self {
        QueryError::QueryFailed(err.to_string())
    }
}

/// Result 类型别名
pub type QueryResult<T> = Result<T, QueryError>;

// ==========================================
// 查询结果行
// ==========================================

/// 产品汇总行（GROUP BY product_id）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTotals {
    pub product_id: String,
    pub total_produced: i64,
    pub total_defective: i64,
}

/// 单日生产汇总行（GROUP BY date）
#[derive(Debug, Clone, PartialEq)]
pub struct DailyProduction {
    pub date: NaiveDate,
    pub produced_qty: i64,
}

// ==========================================
// WarehouseReader - 只读仓库访问
// ==========================================
/// 数据仓库只读访问器
///
/// 仓库文件不存在时返回可操作的提示（先运行管道），
/// 而不是让 SQLite 静默创建一个空库
#[derive(Debug)]
pub struct WarehouseReader {
    conn: Connection,
}

impl WarehouseReader {
    /// 打开已存在的数据仓库
    pub fn open(db_path: &Path) -> QueryResult<Self> {
        if !db_path.exists() {
            return Err(QueryError::WarehouseNotFound(db_path.display().to_string()));
        }
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self { conn })
    }

    /// 列出仓库中的全部表（按名称排序）
    pub fn list_tables(&self) -> QueryResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    /// 单表行数
    ///
    /// 表名无法参数绑定，先对照 sqlite_master 白名单校验再拼接
    pub fn table_row_count(&self, table: &str) -> QueryResult<i64> {
        if !self.list_tables()?.iter().any(|t| t == table) {
            return Err(QueryError::TableNotFound(table.to_string()));
        }
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    /// 按总产量排序的前 K 个产品
    pub fn top_products(&self, k: u32) -> QueryResult<Vec<ProductTotals>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT product_id,
                   SUM(produced_qty)  AS total_produced,
                   SUM(defective_qty) AS total_defective
            FROM fact_production
            GROUP BY product_id
            ORDER BY total_produced DESC
            LIMIT ?1
            "#,
        )?;
        let rows = stmt
            .query_map([k], |row| {
                Ok(ProductTotals {
                    product_id: row.get(0)?,
                    total_produced: row.get(1)?,
                    total_defective: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// 逐日生产汇总（按日期升序）
    pub fn production_by_date(&self) -> QueryResult<Vec<DailyProduction>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT date, SUM(produced_qty) AS produced_qty
            FROM fact_production
            GROUP BY date
            ORDER BY date
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DailyProduction {
                    date: row.get(0)?,
                    produced_qty: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
