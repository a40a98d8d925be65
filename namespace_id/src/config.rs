use std::{fs::File, io::Read, path::PathBuf};

use anyhow::bail;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct ConfigContainer {
    registry: RegistryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    /// Restrict paths to `[0-9a-z_-]+`, rejecting `/` and `.`
    #[serde(default)]
    #[serde(rename = "strict paths")]
    pub strict_paths: bool,
    /// Ids interned when the registry is built
    #[serde(default)]
    pub preload: Vec<String>,
}

pub fn parse_config(source: &str) -> anyhow::Result<RegistryConfig> {
    hocon::de::from_str::<ConfigContainer>(source)
        .map(|it| it.registry)
        .map_err(anyhow::Error::from)
}

pub fn load_config(path: PathBuf) -> anyhow::Result<RegistryConfig> {
    if !path.exists() {
        bail!("Config file does not exist!");
    }
    let mut cfg_file = File::open(path)?;
    let mut buf = String::with_capacity(cfg_file.metadata()?.len() as usize);
    cfg_file.read_to_string(&mut buf)?;
    parse_config(&buf)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use crate::{load_config, parse_config, IdRegistry, RegistryConfig};

    const SAMPLE: &str = r#"
registry {
    "strict paths" = false
    preload = ["minecraft:stone", "dirt", "my_mod:blocks/ore"]
}
"#;

    #[test]
    fn test_parse_config() -> anyhow::Result<()> {
        let config = parse_config(SAMPLE)?;
        assert_eq!(
            config,
            RegistryConfig {
                strict_paths: false,
                preload: vec![
                    "minecraft:stone".to_owned(),
                    "dirt".to_owned(),
                    "my_mod:blocks/ore".to_owned()
                ],
            }
        );

        let registry = IdRegistry::with_config(&config)?;
        assert_eq!(registry.len(), 3);
        assert!(registry.get("minecraft", "dirt").is_some());
        Ok(())
    }

    #[test]
    fn test_strict_config_rejects_preloaded_path() -> anyhow::Result<()> {
        let config = parse_config(
            r#"
registry {
    "strict paths" = true
    preload = ["my_mod:blocks/ore"]
}
"#,
        )?;
        assert!(config.strict_paths);
        assert!(IdRegistry::with_config(&config).is_err());
        Ok(())
    }

    #[test]
    fn test_load_config_from_file() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("namespace_id_{}.conf", std::process::id()));
        fs::write(&path, SAMPLE)?;
        let loaded = load_config(path.clone());
        fs::remove_file(&path)?;
        assert_eq!(loaded?.preload.len(), 3);
        Ok(())
    }

    #[test]
    fn test_load_missing_config() {
        assert!(load_config(PathBuf::from("does/not/exist.conf")).is_err());
    }
}
