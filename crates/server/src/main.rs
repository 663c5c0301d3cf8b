#[tokio::main]
async fn main() -> anyhow::Result<()> {
    truthbuy_server::start().await
}
