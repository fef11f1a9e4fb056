//! Drives a running relay through create → read → update → read → delete.
//!
//! The relay URL comes from `RELAY_URL` (default `http://localhost:5000`).
//! A failing step is logged and the run moves on; the process exits with an
//! error if any step failed.

use anyhow::{Result, bail};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use prompt_relay::client::{DEFAULT_BASE_URL, PromptClient};

const FIRST_PROMPT: &str = "What is Python?";
const UPDATED_PROMPT: &str = "What are the benefits of Python?";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let base_url = std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = PromptClient::new(&base_url);
    client.check_connection().await;

    info!("Testing create_prompt...");
    let index = match client.create_prompt(FIRST_PROMPT).await {
        Ok(created) => {
            info!("Created prompt with index: {}", created.index);
            created.index as i64
        }
        Err(e) => bail!("Test failed: {}", e),
    };

    let mut failures = 0;

    info!("Testing get_response...");
    match client.get_response(index).await {
        Ok(completion) => print_response("Response", &completion.response),
        Err(e) => {
            error!("Error getting response: {}", e);
            failures += 1;
        }
    }

    info!("Testing update_prompt...");
    match client.update_prompt(index, UPDATED_PROMPT).await {
        Ok(updated) => {
            info!("Updated prompt: {:?}", updated);
            match client.get_response(index).await {
                Ok(completion) => print_response("New response", &completion.response),
                Err(e) => {
                    error!("Error updating prompt: {}", e);
                    failures += 1;
                }
            }
        }
        Err(e) => {
            error!("Error updating prompt: {}", e);
            failures += 1;
        }
    }

    info!("Testing delete_prompt...");
    match client.delete_prompt(index).await {
        Ok(deleted) => info!("Delete result: {:?}", deleted),
        Err(e) => {
            error!("Error deleting prompt: {}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} lifecycle step(s) failed", failures);
    }

    Ok(())
}

fn print_response(title: &str, text: &str) {
    let rule = "-".repeat(80);
    println!("{}:\n{}\n{}\n{}\n", title, rule, text, rule);
}
