use std::path::PathBuf;

use serde::Deserialize;

use super::ConfigError;

/// A cluster of hosts whose probe output is collected together.
/// The cluster name is the key of the entry in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    /// How often the captured outputs of this cluster are collected.
    /// Defaults to 60 seconds if not specified.
    #[serde(default = "default_polling_interval")]
    pub polling_interval_seconds: u64,

    /// The hosts probed within this cluster.
    pub targets: Vec<TargetConfig>,
}

/// A probed host and the file the probe writes its output to.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Reported as `hostname` in the results.
    pub hostname: String,

    /// Location of the captured probe output for this host.
    pub output_file: PathBuf,
}

fn default_polling_interval() -> u64 {
    60
}

pub type Config = std::collections::HashMap<String, ClusterConfig>;

/// Rejects configurations that would never produce a result.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.is_empty() {
        return Err(ConfigError::Invalid("no clusters configured".to_string()));
    }

    for (name, cluster) in config {
        if cluster.targets.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "cluster '{name}' has no targets"
            )));
        }
        if cluster.polling_interval_seconds == 0 {
            return Err(ConfigError::Invalid(format!(
                "cluster '{name}' has a polling interval of 0 seconds"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_default_polling_interval() {
        assert_eq!(default_polling_interval(), 60);
    }

    #[test]
    fn test_cluster_config_deserialization() {
        let yaml = r#"
                    eu-west:
                        polling_interval_seconds: 10
                        targets:
                            - hostname: node-1.example.com
                              output_file: /var/lib/probe/node-1.log
                            - hostname: node-2.example.com
                              output_file: /var/lib/probe/node-2.log

                    us-east:
                        targets:
                            - hostname: node-3.example.com
                              output_file: /var/lib/probe/node-3.log
                                    "#;

        let config: Config = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert!(config.contains_key("eu-west"));
        assert!(config.contains_key("us-east"));
        let eu_config = config.get("eu-west").expect("eu-west config not found");
        assert_eq!(eu_config.polling_interval_seconds, 10);
        assert_eq!(eu_config.targets.len(), 2);
        assert_eq!(eu_config.targets[0].hostname, "node-1.example.com");
        assert_eq!(
            eu_config.targets[1].output_file,
            PathBuf::from("/var/lib/probe/node-2.log")
        );
        let us_config = config.get("us-east").expect("us-east config not found");
        // check default polling interval
        assert_eq!(us_config.polling_interval_seconds, 60);
        assert_eq!(us_config.targets.len(), 1);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_config() {
        let config = Config::new();
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_cluster_without_targets() {
        let yaml = r#"
            eu-west:
                targets: []
        "#;
        let config: Config = serde_yaml::from_str(yaml).expect("Invalid YAML");
        let err = validate(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: cluster 'eu-west' has no targets"
        );
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let yaml = r#"
            eu-west:
                polling_interval_seconds: 0
                targets:
                    - hostname: node-1
                      output_file: node-1.log
        "#;
        let config: Config = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));
    }
}
