// ==========================================
// Shine 制造数据分析 - ETL 管道入口
// ==========================================
// 用法:
//   shine-etl [production.csv inventory.csv orders.csv [db_path]]
//
// 退出码: 0 成功 / 2 提取失败 / 3 装载失败 / 1 其他
// ==========================================

use shine_analytics::{etl, logging, PipelineConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - ETL 管道", shine_analytics::APP_NAME);
    tracing::info!("系统版本: {}", shine_analytics::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match build_config(&args) {
        Some(config) => config,
        None => {
            eprintln!("用法: shine-etl [production.csv inventory.csv orders.csv [db_path]]");
            return ExitCode::from(1);
        }
    };

    match etl::run_pipeline(&config) {
        Ok(report) => {
            tracing::info!(
                production = report.production_rows,
                inventory = report.inventory_rows,
                orders = report.order_rows,
                fact = report.fact_rows,
                "管道执行成功"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(stage = err.stage(), "管道执行失败: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// 无参数 → 默认 data/ 布局；3 或 4 个位置参数 → 路径覆盖
fn build_config(args: &[String]) -> Option<PipelineConfig> {
    let mut config = PipelineConfig::default();
    match args.len() {
        0 => Some(config),
        3 | 4 => {
            config.production_csv = args[0].clone().into();
            config.inventory_csv = args[1].clone().into();
            config.orders_csv = args[2].clone().into();
            if let Some(db_path) = args.get(3) {
                config.db_path = db_path.clone().into();
            }
            Some(config)
        }
        _ => None,
    }
}
