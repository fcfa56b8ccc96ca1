// ==========================================
// Shine 制造数据分析 - ETL 管道驱动
// ==========================================
// 控制流: extract → transform → 质量检查 → load
// 单线程单次批处理；任一阶段出错即中止，剩余阶段不执行
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::QualityCheck;
use crate::etl::error::EtlResult;
use crate::etl::{extractor, loader, quality, transformer};

/// 一次管道运行的汇总报告
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub production_rows: usize,
    pub inventory_rows: usize,
    pub order_rows: usize,
    pub fact_rows: usize,
    pub quality_checks: Vec<QualityCheck>,
}

/// 执行完整管道
///
/// 配置全部来自显式参数，多次运行/测试可使用互不干扰的仓库。
/// 质量检查仅记录日志并随报告返回，从不阻断装载。
pub fn run_pipeline(config: &PipelineConfig) -> EtlResult<PipelineReport> {
    tracing::info!("开始提取数据源...");
    let sources = extractor::extract(config)?;
    tracing::info!(
        production = sources.production.len(),
        inventory = sources.inventory.len(),
        orders = sources.orders.len(),
        "提取完成"
    );

    tracing::info!("开始构建星型模型...");
    let tables = transformer::transform(&sources, &config.catalog);

    let checks = quality::run_quality_checks(&tables);
    tracing::info!("数据质量检查:");
    for check in &checks {
        tracing::info!(
            table = %check.table,
            check = %check.check,
            value = check.value,
            "质量检查项"
        );
    }

    tracing::info!("开始装载数据仓库: {}", config.db_path.display());
    loader::load(&config.db_path, &tables)?;
    tracing::info!("装载完成");

    Ok(PipelineReport {
        production_rows: sources.production.len(),
        inventory_rows: sources.inventory.len(),
        order_rows: sources.orders.len(),
        fact_rows: tables.fact_production.len(),
        quality_checks: checks,
    })
}
