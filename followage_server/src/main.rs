#[tokio::main]
async fn main() {
    if let Err(e) = followage_server::run_with_config().await {
        tracing::error!(error = %e, "followage server stopped");
        std::process::exit(1);
    }
}
