use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    progress::StageController,
    render::print_dashboard,
};
use ip2data_core::model::Dashboard;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "ip2data", version, about = "IP2Data dashboard in your terminal")]
pub struct Cli {
    /// Base URL of the ip2data server.
    #[arg(long, default_value = "http://localhost:3000")]
    pub server: String,

    /// Milliseconds between cosmetic stage advances.
    #[arg(long, default_value_t = 600)]
    pub interval_ms: u64,
}

/// Error body of a failed `GET /api/all`.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
    details: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut controller = StageController::new();
        eprintln!("{}", controller.label());

        let client = Client::new();
        let url = format!("{}/api/all", self.server);

        let fetch = fetch_dashboard(&client, &url);
        tokio::pin!(fetch);

        let mut ticker = tokio::time::interval(Duration::from_millis(self.interval_ms));
        // An interval fires immediately; swallow that so the first label
        // stays on screen for a full period.
        ticker.tick().await;

        let dashboard = loop {
            tokio::select! {
                res = &mut fetch => {
                    // The request settled: the timer arm below never runs again.
                    match res {
                        Ok(dashboard) => {
                            controller.finish();
                            eprintln!("{}", controller.label());
                            break dashboard;
                        }
                        Err(err) => {
                            controller.fail(format!("{err:#}"));
                            return Err(err);
                        }
                    }
                }
                _ = ticker.tick() => {
                    let before = controller.label();
                    controller.tick();
                    if controller.label() != before {
                        eprintln!("{}", controller.label());
                    }
                }
            }
        };

        print_dashboard(&dashboard, Local::now().date_naive());

        Ok(())
    }
}

async fn fetch_dashboard(client: &Client, url: &str) -> Result<Dashboard> {
    let res = client
        .get(url)
        .send()
        .await
        .context("Failed to reach the dashboard server")?;

    let status = res.status();
    let body = res.text().await.context("Failed to read the dashboard response body")?;

    if !status.is_success() {
        if let Ok(err) = serde_json::from_str::<ApiError>(&body) {
            match err.details {
                Some(details) => bail!("{}: {details}", err.error),
                None => bail!("{}", err.error),
            }
        }
        bail!("Dashboard request failed with status {status}");
    }

    serde_json::from_str(&body).context("Failed to parse the dashboard JSON")
}
