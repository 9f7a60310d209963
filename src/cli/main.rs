use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Response};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spill-im-cli")]
#[command(about = "Oil spill incident log CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "SPILL_IM_ENDPOINT", default_value = "http://localhost:5000")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a new incident
    Submit(SubmitArgs),

    /// List incidents
    List {
        #[arg(long)]
        severity: Option<String>,

        #[arg(long)]
        state: Option<String>,

        /// Show the most recently reported incidents first
        #[arg(short, long)]
        newest_first: bool,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Get incident details
    Get {
        #[arg(value_name = "INCIDENT_ID")]
        id: u64,
    },

    /// Show counts by severity, state and month
    Stats,

    /// Download every incident as a JSON array
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check server health
    Health,
}

/// Incident fields; anything left unset is omitted from the request so the
/// server can report missing required fields
#[derive(Args, Serialize)]
struct SubmitArgs {
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    date_reported: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    time_reported: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    lga: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    incident_type: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    oil_type: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_volume: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    weather_conditions: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    water_body_affected: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    land_area_affected: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    population_affected: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    environmental_impact: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    response_actions: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    response_team: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    cleanup_status: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    reported_by: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_info: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    company_responsible: Option<String>,
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_notes: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let endpoint = cli.endpoint.trim_end_matches('/');

    match cli.command {
        Commands::Submit(args) => {
            let response = client
                .post(format!("{}/v1/incidents", endpoint))
                .json(&args)
                .send()
                .await
                .context("failed to submit incident")?;

            print_json(response).await?;
        }

        Commands::List {
            severity,
            state,
            newest_first,
            limit,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(severity) = severity {
                query.push(("severity", severity));
            }
            if let Some(state) = state {
                query.push(("state", state));
            }
            if newest_first {
                query.push(("newest_first", "true".to_string()));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }

            let response = client
                .get(format!("{}/v1/incidents", endpoint))
                .query(&query)
                .send()
                .await
                .context("failed to list incidents")?;

            print_json(response).await?;
        }

        Commands::Get { id } => {
            let response = client
                .get(format!("{}/v1/incidents/{}", endpoint, id))
                .send()
                .await
                .with_context(|| format!("failed to fetch incident {}", id))?;

            print_json(response).await?;
        }

        Commands::Stats => {
            let response = client
                .get(format!("{}/v1/stats", endpoint))
                .send()
                .await
                .context("failed to fetch statistics")?;

            print_json(response).await?;
        }

        Commands::Export { output } => {
            let response = client
                .get(format!("{}/api/incidents", endpoint))
                .send()
                .await
                .context("failed to export incidents")?;

            match output {
                Some(path) => {
                    let body = checked_body(response).await?;
                    let pretty = serde_json::to_string_pretty(&body)?;
                    tokio::fs::write(&path, pretty)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    let count = body.as_array().map(Vec::len).unwrap_or(0);
                    println!("Exported {} incidents to {}", count, path.display());
                }
                None => print_json(response).await?,
            }
        }

        Commands::Health => {
            let response = client
                .get(format!("{}/health", endpoint))
                .send()
                .await
                .context("failed to reach server")?;

            print_json(response).await?;
        }
    }

    Ok(())
}

/// Decode the body, failing with the server's error payload on non-2xx
async fn checked_body(response: Response) -> Result<serde_json::Value> {
    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("server returned a non-JSON body")?;

    if !status.is_success() {
        let message = body["error"]["message"].as_str().unwrap_or("request failed");
        bail!("{} ({})", message, status);
    }
    Ok(body)
}

async fn print_json(response: Response) -> Result<()> {
    let body = checked_body(response).await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
