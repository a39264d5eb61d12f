use clap::{Parser, Subcommand};
use json_mock_api::admin::ADMIN_BASE;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "mock-cli")]
#[command(about = "Client for a running JSON Mock API server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server status
    Status,
    /// List the generated route catalogue
    Routes,
    /// Show the current working copy of the data
    Data,
    /// Show the stored documentation
    Docs,
    /// Delete the stored documentation
    ClearDocs,
    /// Discard all writes and restore the source document
    Reset,
    /// Send a simulated request, e.g. `request POST /api/users '{"name":"Cy"}'`
    Request {
        method: String,
        path: String,
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let admin = |path: &str| format!("{}{}{}", cli.url, ADMIN_BASE, path);

    let res = match cli.command {
        Commands::Status => client.get(admin("/status")).send().await?,
        Commands::Routes => client.get(admin("/routes")).send().await?,
        Commands::Data => client.get(admin("/data")).send().await?,
        Commands::Docs => client.get(admin("/docs")).send().await?,
        Commands::ClearDocs => client.delete(admin("/docs")).send().await?,
        Commands::Reset => client.post(admin("/reset")).send().await?,
        Commands::Request { ref method, ref path, ref body } => {
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let mut req = client.request(method, format!("{}{}", cli.url, path));
            if let Some(body) = body {
                // Fail early on malformed input rather than letting the server reject it.
                serde_json::from_str::<Value>(body)?;
                req = req
                    .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                    .body(body.clone());
            }
            req.send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: server returned status {}", status);
        eprintln!("Response: {}", rendered);
    }
    Ok(())
}
