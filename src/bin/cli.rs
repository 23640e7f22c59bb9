use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    agenda::cli::run().await
}
