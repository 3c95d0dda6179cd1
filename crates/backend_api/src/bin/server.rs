use std::sync::Arc;
use std::{env, path::PathBuf};

use backend_api::run_server;
use sales_store::JsonFileSaleRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment overrides with sane defaults
    let store_path = env::var("STORE_PATH").unwrap_or_else(|_| "data/sales.json".to_string());
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    let store_path = PathBuf::from(store_path);

    println!("Cake Shop Sales API");
    println!("===================");
    println!("Store path: {}", store_path.display());
    println!("Listening on: {}:{}", host, port);
    if !store_path.exists() {
        println!("Store file does not exist yet; it will be created on first write.");
    }
    println!();

    // Create the repository
    let repo = Arc::new(JsonFileSaleRepository::new(&store_path));

    // Start the server
    run_server(repo, &host, port).await?;

    Ok(())
}
