// ==========================================
// Shine 制造数据分析 - 配置层
// ==========================================
// 职责: 管道路径配置 + 产品目录
// 红线: 各阶段通过显式参数接收配置，禁止进程级全局状态
// ==========================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ==========================================
// ProductCatalog - 产品目录
// ==========================================
/// product_id → 显示名称的固定映射
///
/// 未登记的 id 解析为 `Unknown(<id>)`，从不产生静默空值
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    entries: HashMap<String, String>,
}

impl ProductCatalog {
    /// 空目录（所有 id 均为 Unknown）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从 (product_id, name) 对构建目录
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        }
    }

    /// 演示数据集的默认产品目录
    pub fn demo_catalog() -> Self {
        Self::from_entries([
            ("P100", "Harness-A"),
            ("P200", "Harness-B"),
            ("P300", "Mechatronic-Module"),
        ])
    }

    /// 登记一个产品名称
    pub fn insert(&mut self, product_id: impl Into<String>, name: impl Into<String>) {
        self.entries.insert(product_id.into(), name.into());
    }

    /// 查询显示名称，未登记时返回 `Unknown(<id>)`
    pub fn display_name(&self, product_id: &str) -> String {
        match self.entries.get(product_id) {
            Some(name) => name.clone(),
            None => format!("Unknown({product_id})"),
        }
    }
}

// ==========================================
// PipelineConfig - ETL 管道配置
// ==========================================
/// 一次管道运行的全部外部依赖: 三个源文件 + 仓库路径 + 产品目录
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub production_csv: PathBuf,
    pub inventory_csv: PathBuf,
    pub orders_csv: PathBuf,
    pub db_path: PathBuf,
    pub catalog: ProductCatalog,
}

impl PipelineConfig {
    /// 以 data_dir 为根的常规布局（production.csv / inventory.csv / orders.csv / odw_dw.db）
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self {
            production_csv: data_dir.join("production.csv"),
            inventory_csv: data_dir.join("inventory.csv"),
            orders_csv: data_dir.join("orders.csv"),
            db_path: data_dir.join("odw_dw.db"),
            catalog: ProductCatalog::demo_catalog(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_data_dir(Path::new("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_known_and_unknown() {
        let catalog = ProductCatalog::demo_catalog();
        assert_eq!(catalog.display_name("P100"), "Harness-A");
        assert_eq!(catalog.display_name("P999"), "Unknown(P999)");
    }

    #[test]
    fn test_default_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.db_path, PathBuf::from("data/odw_dw.db"));
        assert_eq!(config.production_csv, PathBuf::from("data/production.csv"));
    }
}
