use clap::Parser;
use dotenv::dotenv;
use log::error;
use rag_chat::cli::Args;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = rag_chat::run(args).await {
        error!("Fatal: {}", e);
        return Err(e);
    }

    Ok(())
}
