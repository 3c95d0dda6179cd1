use std::env;
use std::path::{Path, PathBuf};

use csv_import::import_sales_from_file;
use sales_store::JsonFileSaleRepository;

#[tokio::main]
async fn main() {
    // Usage:
    //   import-sales <sales.csv> [store.json]
    //
    // Defaults:
    //   store.json: data/sales.json
    let args: Vec<String> = env::args().collect();

    let Some(csv_path) = args.get(1) else {
        eprintln!("Usage: import-sales <sales.csv> [store.json]");
        std::process::exit(2);
    };
    let store_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sales.json"));

    println!("📂 Importing {} into {}", csv_path, store_path.display());

    let repo = JsonFileSaleRepository::new(&store_path);
    let report = import_sales_from_file(&repo, Path::new(csv_path)).await;

    println!("✅ Imported: {}", report.success);
    println!("❌ Failed:   {}", report.failed);
    for err in &report.errors {
        println!("   {}", err);
    }

    if report.success == 0 && (report.failed > 0 || !report.errors.is_empty()) {
        std::process::exit(1);
    }
}
