// Small dev utility: generate the three demo source CSVs.
//
// Usage:
//   cargo run --bin generate_demo_data -- [out_dir] [seed]
//
// 同一种子生成逐字节相同的文件，便于可复现演示。

use shine_analytics::generator::{generate_demo_data, GeneratorConfig};
use shine_analytics::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let mut config = GeneratorConfig::default();
    if let Some(out_dir) = args.next() {
        config.out_dir = out_dir.into();
    }
    if let Some(seed) = args.next() {
        config.seed = seed
            .parse()
            .map_err(|_| anyhow::anyhow!("种子必须是无符号整数: {seed}"))?;
    }

    let counts = generate_demo_data(&config)?;
    println!(
        "Generated: {}/production.csv (rows={}), {}/inventory.csv (rows={}), {}/orders.csv (rows={})",
        config.out_dir.display(),
        counts.production,
        config.out_dir.display(),
        counts.inventory,
        config.out_dir.display(),
        counts.orders,
    );
    Ok(())
}
