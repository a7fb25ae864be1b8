#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lingo_backend::run().await
}
