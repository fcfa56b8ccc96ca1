// ==========================================
// ETL 管道集成测试
// ==========================================
// 测试目标: 生成 → 提取 → 转换 → 装载的完整闭环，
//           以及幂等性、失败分类与装载原子性
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use shine_analytics::db::open_sqlite_connection;
use shine_analytics::etl::{run_pipeline, EtlError};
use shine_analytics::generator::{generate_demo_data, GeneratorConfig};
use shine_analytics::logging;

/// 小规模生成配置: 5 天 × 3 工厂 × 3 产品 = 45 条生产记录
fn small_generator_config(out_dir: &std::path::Path, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        out_dir: out_dir.to_path_buf(),
        seed,
        start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        days: 5,
    }
}

#[test]
fn test_full_pipeline_end_to_end() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();

    let counts = generate_demo_data(&small_generator_config(dir.path(), 42)).unwrap();
    assert_eq!(counts.production, 45);
    assert_eq!(counts.inventory, 45);
    assert_eq!(counts.orders, 45);

    let config = test_helpers::fixture_config(dir.path());
    let report = run_pipeline(&config).unwrap();

    // 保行: 事实行数 == 生产记录数
    assert_eq!(report.production_rows, 45);
    assert_eq!(report.fact_rows, 45);
    assert_eq!(report.inventory_rows, 45);
    assert_eq!(report.order_rows, 45);

    let conn = open_sqlite_connection(&config.db_path).unwrap();

    // 仓库行数与报告一致
    let fact_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM fact_production", [], |r| r.get(0))
        .unwrap();
    assert_eq!(fact_count, 45);
    let product_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM dim_product", [], |r| r.get(0))
        .unwrap();
    assert_eq!(product_count, 3);
    let plant_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM dim_plant", [], |r| r.get(0))
        .unwrap();
    assert_eq!(plant_count, 3);
    let date_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM dim_date", [], |r| r.get(0))
        .unwrap();
    assert_eq!(date_count, 5);

    // 缺陷率不变量: [0, 1]，produced = 0 时恒为 0
    let out_of_bounds: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM fact_production WHERE defect_rate < 0 OR defect_rate > 1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(out_of_bounds, 0);
    let zero_guard_violations: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM fact_production WHERE produced_qty = 0 AND defect_rate != 0",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(zero_guard_violations, 0);

    // 代理键稠密: 1..N 无空洞
    for (table, key) in [
        ("dim_product", "product_key"),
        ("dim_plant", "plant_key"),
        ("dim_date", "date_key"),
        ("fact_production", "fact_id"),
    ] {
        let (min, max, total, distinct): (i64, i64, i64, i64) = conn
            .query_row(
                &format!(
                    "SELECT MIN({key}), MAX({key}), COUNT(*), COUNT(DISTINCT {key}) FROM {table}"
                ),
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .unwrap();
        assert_eq!(min, 1, "{table}.{key} 应从 1 起");
        assert_eq!(max, total, "{table}.{key} 应无空洞");
        assert_eq!(distinct, total, "{table}.{key} 应唯一");
    }

    // 日期代理键随日期单调
    let inversions: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM dim_date d1, dim_date d2 \
             WHERE d1.date < d2.date AND d1.date_key >= d2.date_key",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(inversions, 0);

    // 引用完整性: 事实外键全部指向存在的维度行
    let orphan_products: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM fact_production f \
             LEFT JOIN dim_product p ON f.product_key = p.product_key \
             WHERE p.product_key IS NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(orphan_products, 0);
    let orphan_plants: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM fact_production f \
             LEFT JOIN dim_plant p ON f.plant_key = p.plant_key \
             WHERE p.plant_key IS NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(orphan_plants, 0);

    // 质量检查报告口径
    let checks = &report.quality_checks;
    assert_eq!(checks[0].table, "dim_product");
    assert_eq!(checks[0].value, 3);
    assert!(checks
        .iter()
        .all(|c| c.check != "unmatched_product_key" || c.value == 0));
}

/// 幂等性: 同一输入跑两遍，仓库逐字节一致
#[test]
fn test_pipeline_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    generate_demo_data(&small_generator_config(dir.path(), 42)).unwrap();
    let config = test_helpers::fixture_config(dir.path());

    run_pipeline(&config).unwrap();
    let first = {
        let conn = open_sqlite_connection(&config.db_path).unwrap();
        test_helpers::dump_warehouse(&conn)
    };

    run_pipeline(&config).unwrap();
    let second = {
        let conn = open_sqlite_connection(&config.db_path).unwrap();
        test_helpers::dump_warehouse(&conn)
    };

    assert_eq!(first, second);
}

/// 生成器可复现: 同种子 → 逐字节相同文件；不同种子 → 不同内容
#[test]
fn test_generator_is_seed_deterministic() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let dir_c = tempfile::tempdir().unwrap();

    generate_demo_data(&small_generator_config(dir_a.path(), 42)).unwrap();
    generate_demo_data(&small_generator_config(dir_b.path(), 42)).unwrap();
    generate_demo_data(&small_generator_config(dir_c.path(), 7)).unwrap();

    for name in ["production.csv", "inventory.csv", "orders.csv"] {
        let a = std::fs::read(dir_a.path().join(name)).unwrap();
        let b = std::fs::read(dir_b.path().join(name)).unwrap();
        assert_eq!(a, b, "{name} 同种子应逐字节一致");
    }
    let a = std::fs::read(dir_a.path().join("production.csv")).unwrap();
    let c = std::fs::read(dir_c.path().join("production.csv")).unwrap();
    assert_ne!(a, c);
}

/// 源缺失 → 提取失败分类，仓库不产生部分装载
#[test]
fn test_missing_source_aborts_with_extract_error() {
    let dir = tempfile::tempdir().unwrap();
    // 只写 inventory/orders，production 缺失
    test_helpers::write_small_fixture(dir.path());
    std::fs::remove_file(dir.path().join("production.csv")).unwrap();

    let config = test_helpers::fixture_config(dir.path());
    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, EtlError::SourceFileNotFound(_)));
    assert_eq!(err.stage(), "extract");
    assert_eq!(err.exit_code(), 2);
    assert!(!config.db_path.exists(), "提取失败不应创建仓库");
}

/// 日期列畸形 → 提取失败，带行号定位
#[test]
fn test_unparsable_date_aborts_extraction() {
    let dir = tempfile::tempdir().unwrap();
    test_helpers::write_small_fixture(dir.path());
    std::fs::write(
        dir.path().join("orders.csv"),
        "order_date,customer,product_id,order_qty\n\
         not-a-date,OEM-A,P100,30\n",
    )
    .unwrap();

    let config = test_helpers::fixture_config(dir.path());
    let err = run_pipeline(&config).unwrap_err();
    match err {
        EtlError::SourceDateError { row, field, .. } => {
            assert_eq!(row, 2);
            assert_eq!(field, "order_date");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// 装载失败 → 持久化分类，先前的仓库状态保持可读
#[test]
fn test_load_failure_leaves_previous_warehouse_intact() {
    let dir = tempfile::tempdir().unwrap();
    test_helpers::write_small_fixture(dir.path());
    let config = test_helpers::fixture_config(dir.path());
    run_pipeline(&config).unwrap();

    // 第二次运行指向一个目录作为 db_path，SQLite 打开必然失败
    let mut broken = config.clone();
    broken.db_path = dir.path().to_path_buf();
    let err = run_pipeline(&broken).unwrap_err();
    assert!(matches!(err, EtlError::PersistenceError(_)));
    assert_eq!(err.stage(), "load");
    assert_eq!(err.exit_code(), 3);

    // 原仓库不受影响
    let conn = open_sqlite_connection(&config.db_path).unwrap();
    let fact_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM fact_production", [], |r| r.get(0))
        .unwrap();
    assert_eq!(fact_count, 3);
}

/// 整表替换: 第二次运行用更小的输入，旧行不得残留
#[test]
fn test_reload_fully_replaces_tables() {
    let dir = tempfile::tempdir().unwrap();
    generate_demo_data(&small_generator_config(dir.path(), 42)).unwrap();
    let config = test_helpers::fixture_config(dir.path());
    run_pipeline(&config).unwrap();

    // 换成 3 行的小夹具，重跑
    test_helpers::write_small_fixture(dir.path());
    let report = run_pipeline(&config).unwrap();
    assert_eq!(report.fact_rows, 3);

    let conn = open_sqlite_connection(&config.db_path).unwrap();
    let fact_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM fact_production", [], |r| r.get(0))
        .unwrap();
    assert_eq!(fact_count, 3);
    let product_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM dim_product", [], |r| r.get(0))
        .unwrap();
    assert_eq!(product_count, 2);
}
