use clap::{Parser, Subcommand};
use serde_json::Value;

use query_gateway::QueryRequest;

#[derive(Parser)]
#[command(name = "query-cli")]
#[command(about = "Send queries to a running query gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question through the gateway
    Ask {
        /// Query text
        query: String,
        /// Number of results requested
        #[arg(short = 'k', long, default_value_t = 5)]
        top_k: i64,
    },
    /// Check gateway liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Ask { query, top_k } => {
            let res = client
                .post(format!("{}/api/query", base))
                .json(&QueryRequest::new(query, top_k))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    if let Some(answer) = json.get("anthropic_response").and_then(Value::as_str) {
        println!("{}\n", answer);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
