use std::time::Duration;

use tokio::time::sleep;

pub mod config;
use config::app_config::load_config;
pub mod ping_probe;
use ping_probe::{prelude::*, report};

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// Writes one JSON line for the result to stdout.
fn emit(result: &ProbeResult) {
    match serde_json::to_string(&result.to_view()) {
        Ok(line) => println!("{line}"),
        Err(e) => log::error!("Failed to serialize result for {}: {e}", result.hostname),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(e) => {
            log::error!("{}", report(&e));
            return Err(e.into());
        }
    };
    let max_cluster_width = app_config.max_cluster_width;

    for (name, cluster_config) in app_config.config {
        let cluster = Cluster::new(name);
        let interval = cluster_config.polling_interval_seconds;
        let targets = cluster_config.targets;

        tokio::spawn(async move {
            let label = to_fixed_width(cluster.as_str(), max_cluster_width);

            loop {
                let mut handles = vec![];

                for target in &targets {
                    let target = target.clone();
                    let cluster = cluster.clone();
                    let label = label.clone();

                    let handle = tokio::spawn(async move {
                        let result = collect_target(&target, &cluster).await;
                        if result.is_success() {
                            log::info!(
                                "[{label}] ✅ Host: {}, Confirmed: {}/{}, Loss: {:.1}%",
                                result.hostname,
                                result.confirmed,
                                result.submitted,
                                result.loss
                            );
                        } else {
                            log::info!(
                                "[{label}] ❌ Host: {}, Error: {}",
                                result.hostname,
                                result.error
                            );
                        }
                        emit(&result);
                    });

                    handles.push(handle);
                }

                for handle in handles {
                    let _ = handle.await;
                }

                sleep(Duration::from_secs(interval)).await;
            }
        });
    }

    // Keep main thread alive
    loop {
        sleep(Duration::from_secs(60)).await;
    }
}
