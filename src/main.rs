#[tokio::main]
async fn main() {
    if let Err(e) = shiori_lib::run().await {
        eprintln!("shiori failed: {:#}", e);
        std::process::exit(1);
    }
}
