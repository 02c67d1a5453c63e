use std::path::PathBuf;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// World configuration file to merge over the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    let ConfigArg { config, output } = arg;
    let config = util::load_world_config(config.as_deref())?;
    Output::save_json(&config, output.clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use flappy_engine::WorldConfig;

    use super::*;

    #[test]
    fn test_prints_merged_config() {
        let dir = util::scratch_dir("config");
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("world.json");
        std::fs::write(&input, r#"{"scroll_speed": 4.0, "pass_bonus": 5.0}"#).unwrap();
        let output = dir.join("effective.json");

        run(&ConfigArg {
            config: Some(input),
            output: Some(output.clone()),
        })
        .unwrap();

        let effective: WorldConfig = util::read_json_file("world config", &output).unwrap();
        assert_eq!(
            effective,
            WorldConfig {
                scroll_speed: 4.0,
                pass_bonus: 5.0,
                ..WorldConfig::DEFAULT
            }
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_invalid_config() {
        let dir = util::scratch_dir("config-invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("world.json");
        std::fs::write(&input, r#"{"ground_height": 600}"#).unwrap();

        let result = run(&ConfigArg {
            config: Some(input),
            output: Some(dir.join("effective.json")),
        });
        assert!(result.is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
