use std::time::Duration;

use anyhow::{bail, Result};
use serde_json::Value;
use tracing::warn;

/// Routes probed by `check`, in order.
const ROUTES: &[(&str, &str)] = &[
    ("Get All Data", "/api/all"),
    ("Get Undergraduate Fees", "/api/fees/undergraduate"),
    ("Get Postgraduate Fees", "/api/fees/postgraduate"),
    ("Get Hostel Fees", "/api/hostel"),
    ("Get Acceptance Fees", "/api/fees/acceptance"),
    ("Get Announcements", "/api/announcements"),
    ("Get Requirements", "/api/requirements"),
];

const SAMPLE_CHARS: usize = 200;

pub struct CheckReport {
    pub passed: usize,
    pub failed: usize,
}

impl CheckReport {
    pub fn print(&self) {
        println!("\n--- Results ---");
        println!("Passed: {}", self.passed);
        println!("Failed: {}", self.failed);
        println!("Total:  {}", self.passed + self.failed);
    }
}

/// Probe `/health`, then every data route of a running instance.
pub async fn run(base_url: &str, pause: Duration) -> Result<CheckReport> {
    let base = base_url.trim_end_matches('/');
    let client = reqwest::Client::new();

    if let Err(e) = client.get(format!("{base}/health")).send().await.and_then(|r| r.error_for_status()) {
        bail!("server is not running at {base} ({e}); start it with `uniben_scraper serve`");
    }
    println!("Server is running at {base}");

    let mut report = CheckReport { passed: 0, failed: 0 };
    for (i, (name, path)) in ROUTES.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(pause).await;
        }
        println!("\nTesting: {name}");
        match probe(&client, &format!("{base}{path}")).await {
            Ok(sample) => {
                println!("  ok   {sample}");
                report.passed += 1;
            }
            Err(e) => {
                warn!(route = path, error = %e, "check failed");
                println!("  FAIL {e}");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Returns a short sample of `data` when the envelope reports success.
async fn probe(client: &reqwest::Client, url: &str) -> Result<String> {
    let body: Value = client.get(url).send().await?.json().await?;
    if body["success"] != true {
        let error = body["error"].as_str().unwrap_or("no error message");
        bail!("{error}");
    }
    let data = serde_json::to_string(&body["data"])?;
    let sample: String = data.chars().take(SAMPLE_CHARS).collect();
    Ok(format!("{sample}..."))
}
