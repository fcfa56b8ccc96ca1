// Small admin CLI: inspect the warehouse and run quick read-only queries.
//
// Usage:
//   cargo run --bin dw_admin -- show_tables [db_path]
//   cargo run --bin dw_admin -- table_size <table> [db_path]
//   cargo run --bin dw_admin -- top_products [k] [db_path]

use shine_analytics::query::WarehouseReader;
use shine_analytics::DEFAULT_DB_PATH;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        usage();
        return ExitCode::from(1);
    };

    let result = match command.as_str() {
        "show_tables" => show_tables(args.get(1)),
        "table_size" if args.len() >= 2 => table_size(&args[1], args.get(2)),
        "top_products" => {
            let k = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
            top_products(k, args.get(2))
        }
        _ => {
            usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

fn open_reader(db_path: Option<&String>) -> Result<WarehouseReader, shine_analytics::QueryError> {
    let path = db_path.map(String::as_str).unwrap_or(DEFAULT_DB_PATH);
    WarehouseReader::open(Path::new(path))
}

fn show_tables(db_path: Option<&String>) -> Result<(), shine_analytics::QueryError> {
    let reader = open_reader(db_path)?;
    println!("Tables in DW:");
    for table in reader.list_tables()? {
        println!("- {table}");
    }
    Ok(())
}

fn table_size(table: &str, db_path: Option<&String>) -> Result<(), shine_analytics::QueryError> {
    let reader = open_reader(db_path)?;
    println!("{}", reader.table_row_count(table)?);
    Ok(())
}

fn top_products(k: u32, db_path: Option<&String>) -> Result<(), shine_analytics::QueryError> {
    let reader = open_reader(db_path)?;
    println!("{:<12} {:>16} {:>16}", "product_id", "total_produced", "total_defective");
    for row in reader.top_products(k)? {
        println!(
            "{:<12} {:>16} {:>16}",
            row.product_id, row.total_produced, row.total_defective
        );
    }
    Ok(())
}

fn usage() {
    eprintln!("Usage: dw_admin [show_tables|table_size <table>|top_products <k>] [db_path]");
}
