#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = attendance_backend::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
