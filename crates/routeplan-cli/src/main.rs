pub mod commands;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use commands::ApiCall;
use commands::Commands;
use commands::Method;
use reqwest::blocking::Client;

#[derive(Parser)]
#[command(name = "routeplan", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let client = Client::builder()
        .timeout(None)
        .build()
        .context("the http client could not be created")?;

    let api_call = commands::handle_command(cli.command)?;
    let response = send_http(&client, api_call)?;

    println!("{response}");
    Ok(())
}

fn send_http(client: &Client, api_call: ApiCall) -> Result<String> {
    let address = dotenvy::var("ROUTEPLAN_API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let url = format!("http://{address}/api/v1{}", api_call.path);

    let request = match api_call.method {
        Method::Get => client.get(&url),
        Method::Post => client.post(&url),
        Method::Delete => client.delete(&url),
    };

    let request = match api_call.body {
        Some(body) => request.body(body).header("Content-Type", "text/csv"),
        None => request,
    };

    let response = request
        .send()
        .with_context(|| format!("the api server at {address} did not answer"))?;

    let status = response.status();
    let text = response
        .text()
        .context("the response body could not be read")?;

    if !status.is_success() {
        bail!("{status}: {text}");
    }

    // Responses are JSON or empty; pretty-print the former as-is.
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) => Ok(serde_json::to_string_pretty(&value)?),
        Err(_) => Ok(text),
    }
}
