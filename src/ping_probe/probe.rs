use super::prelude::*;
use crate::config::probe_config::TargetConfig;

/// Reads the probe output captured for `target` and parses it.
///
/// The probe itself is run elsewhere; this only consumes the text it left
/// behind. A file that cannot be read yields a failed record carrying the
/// I/O error message.
pub async fn collect_target(target: &TargetConfig, cluster: &Cluster) -> ProbeResult {
    let mut result = ProbeResult::new(target.hostname.clone(), cluster.clone());

    match tokio::fs::read_to_string(&target.output_file).await {
        Ok(output) => {
            // The outcome is recorded on the result itself.
            let _ = result.parse(&output);
        }
        Err(e) => {
            log::warn!(
                "Cannot read probe output for {} at {}: {e}",
                target.hostname,
                target.output_file.display()
            );
            result.fail(format!(
                "cannot read probe output {}: {e}",
                target.output_file.display()
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn target(output_file: PathBuf) -> TargetConfig {
        TargetConfig {
            hostname: "node-1.example.com".to_string(),
            output_file,
        }
    }

    #[tokio::test]
    async fn test_collect_parses_captured_output() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            "10 transactions submitted, 10 transactions confirmed, 0.0% transaction loss\n\
             min/mean/max/stddev = 0.8/1.0/1.3/0.1 ms"
        )
        .expect("write capture");

        let target = target(file.path().to_path_buf());
        let result = collect_target(&target, &Cluster::new("eu-west")).await;

        assert!(result.is_success(), "unexpected error: {}", result.error);
        assert_eq!(result.hostname, "node-1.example.com");
        assert_eq!(result.cluster.as_str(), "eu-west");
        assert_eq!(result.submitted, 10);
        assert_eq!(result.confirmed, 10);
    }

    #[tokio::test]
    async fn test_collect_records_unparsable_output() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "ping: unknown host node-1.example.com").expect("write capture");

        let target = target(file.path().to_path_buf());
        let result = collect_target(&target, &Cluster::new("eu-west")).await;

        assert_eq!(result.error, "pattern for 'submitted' not found in probe output");
        assert!(result.timestamp > 0);
    }

    #[tokio::test]
    async fn test_collect_records_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("missing.log");

        let result = collect_target(&target(path), &Cluster::new("eu-west")).await;

        assert!(result.error.starts_with("cannot read probe output"));
        assert!(result.timestamp > 0);
        assert_eq!(result.submitted, 0);
    }
}
