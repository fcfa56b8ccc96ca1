// ==========================================
// Shine 制造数据分析 - 演示数据生成器
// ==========================================
// 职责: 生成 ERP 风格的三个源 CSV（production / inventory / orders）
// 可复现: ChaCha8 固定种子，同种子 → 逐字节相同输出
// ==========================================

use crate::domain::Shift;
use anyhow::Context;
use chrono::{Duration, NaiveDate};
use csv::Writer;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

/// 默认随机种子
pub const DEFAULT_SEED: u64 = 42;

const PLANTS: &[&str] = &["Steinau", "Gelnhausen", "München"];
const PRODUCTS: &[&str] = &["P100", "P200", "P300"];
const CUSTOMERS: &[&str] = &["OEM-A", "OEM-B", "Supplier-X"];
const SHIFTS: &[Shift] = &[Shift::A, Shift::B, Shift::C];

// ==========================================
// 生成配置
// ==========================================
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub out_dir: PathBuf,
    pub seed: u64,
    pub start: NaiveDate,
    pub days: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data"),
            seed: DEFAULT_SEED,
            start: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid literal date"),
            days: 180,
        }
    }
}

/// 各文件生成的行数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedCounts {
    pub production: usize,
    pub inventory: usize,
    pub orders: usize,
}

/// 生成三个演示源文件
///
/// production: 日 × 工厂 × 产品，Poisson(50) 产量 + Binomial(n, 0.02) 缺陷
/// inventory:  日 × 工厂 × 产品，Normal(100, 20) 截断到 ≥ 0
/// orders:     日 × 客户 × 产品，Poisson(30) 订单量
pub fn generate_demo_data(config: &GeneratorConfig) -> anyhow::Result<GeneratedCounts> {
    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("创建输出目录失败: {}", config.out_dir.display()))?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let production = write_production(config, &mut rng)?;
    let inventory = write_inventory(config, &mut rng)?;
    let orders = write_orders(config, &mut rng)?;

    Ok(GeneratedCounts {
        production,
        inventory,
        orders,
    })
}

fn write_production(config: &GeneratorConfig, rng: &mut ChaCha8Rng) -> anyhow::Result<usize> {
    let path = config.out_dir.join("production.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record(["date", "plant", "product_id", "produced_qty", "defective_qty", "shift"])?;

    let mut rows = 0;
    for day in 0..config.days {
        let date = config.start + Duration::days(day as i64);
        for plant in PLANTS {
            for product_id in PRODUCTS {
                let produced = sample_poisson(rng, 50.0);
                let defective = sample_binomial(rng, produced, 0.02);
                let shift = SHIFTS[rng.gen_range(0..SHIFTS.len())];
                writer.write_record([
                    date.to_string(),
                    (*plant).to_string(),
                    (*product_id).to_string(),
                    produced.to_string(),
                    defective.to_string(),
                    shift.as_str().to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn write_inventory(config: &GeneratorConfig, rng: &mut ChaCha8Rng) -> anyhow::Result<usize> {
    let path = config.out_dir.join("inventory.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record(["date", "plant", "product_id", "on_hand"])?;

    let mut rows = 0;
    for day in 0..config.days {
        let date = config.start + Duration::days(day as i64);
        for plant in PLANTS {
            for product_id in PRODUCTS {
                let on_hand = (100.0 + sample_standard_normal(rng) * 20.0).round().max(0.0) as i64;
                writer.write_record([
                    date.to_string(),
                    (*plant).to_string(),
                    (*product_id).to_string(),
                    on_hand.to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn write_orders(config: &GeneratorConfig, rng: &mut ChaCha8Rng) -> anyhow::Result<usize> {
    let path = config.out_dir.join("orders.csv");
    let mut writer = open_writer(&path)?;
    writer.write_record(["order_date", "customer", "product_id", "order_qty"])?;

    let mut rows = 0;
    for day in 0..config.days {
        let date = config.start + Duration::days(day as i64);
        for customer in CUSTOMERS {
            for product_id in PRODUCTS {
                let qty = sample_poisson(rng, 30.0);
                writer.write_record([
                    date.to_string(),
                    (*customer).to_string(),
                    (*product_id).to_string(),
                    qty.to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn open_writer(path: &Path) -> anyhow::Result<Writer<std::fs::File>> {
    Writer::from_path(path).with_context(|| format!("创建 CSV 文件失败: {}", path.display()))
}

// ==========================================
// 采样辅助（逆变换/伯努利循环，基于均匀源）
// ==========================================

/// Poisson(λ) 采样，Knuth 乘积法
fn sample_poisson(rng: &mut ChaCha8Rng, lambda: f64) -> i64 {
    let limit = (-lambda).exp();
    let mut k: i64 = 0;
    let mut p = 1.0;
    loop {
        p *= rng.gen::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}

/// Binomial(n, p) 采样，n 次伯努利试验
fn sample_binomial(rng: &mut ChaCha8Rng, n: i64, p: f64) -> i64 {
    (0..n).filter(|_| rng.gen::<f64>() < p).count() as i64
}

/// 标准正态采样，Box-Muller 变换
fn sample_standard_normal(rng: &mut ChaCha8Rng) -> f64 {
    // 1 - u 保证对数参数落在 (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisson_mean_roughly_lambda() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 2000;
        let total: i64 = (0..n).map(|_| sample_poisson(&mut rng, 50.0)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 50.0).abs() < 2.0, "mean={mean}");
    }

    #[test]
    fn test_binomial_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let v = sample_binomial(&mut rng, 50, 0.02);
            assert!((0..=50).contains(&v));
        }
    }
}
