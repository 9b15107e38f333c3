use std::net::SocketAddr;

use clap::Parser;

use capsulate::{
    server, tracing::init_tracing_subscriber, GeminiClient, SummaryPipelineBuilder,
    TranscriptClient,
};

#[derive(Parser)]
#[command(name = "capsulate", about = "YouTube transcript summarizer UI")]
struct Cli {
    /// Address to bind the UI server on
    #[arg(long, env = "CAPSULATE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the UI server on
    #[arg(long, env = "CAPSULATE_PORT", default_value = "8080")]
    port: u16,

    /// Google Gemini API key; summaries are disabled when absent
    #[arg(long, env = "GOOGLE_API_KEY")]
    google_api_key: Option<String>,

    /// Gemini model used for summaries
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    if cli.google_api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; summaries will be disabled");
    }
    let summarizer = cli
        .google_api_key
        .map(|key| GeminiClient::new(key).with_model(cli.model));

    let pipeline = SummaryPipelineBuilder::new()
        .transcript_source(TranscriptClient::default())
        .summarizer(summarizer)
        .build();

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    server::serve(pipeline, addr).await
}
