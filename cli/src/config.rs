use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_engine::tictactoe::{BotType, Player};

const CONFIG_FILE_NAME: &str = "tictactoe_cli_config.yaml";

pub fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(path: &Path) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub bot: BotType,
    pub human_player: Player,
    pub log_prefix: Option<String>,
    #[serde(default)]
    pub show_search_stats: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if let Some(prefix) = &self.log_prefix
            && prefix.trim().is_empty()
        {
            return Err("log_prefix must not be empty when set".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotType::Minimax,
            human_player: Player::X,
            log_prefix: None,
            show_search_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_tictactoe_cli_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_with_manager() {
        let config = Config {
            bot: BotType::Random,
            human_player: Player::O,
            log_prefix: Some("TicTacToe".to_string()),
            show_search_stats: true,
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(&file_path);

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh_manager = get_config_manager(&file_path);
        assert_eq!(fresh_manager.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Path::new("this_file_does_not_exist.yaml"));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_missing_show_search_stats_defaults_to_false() {
        let content = "bot: Random\nhuman_player: O\nlog_prefix: null\n";
        let config: Config = YamlConfigSerializer::new().deserialize(content).unwrap();
        assert_eq!(config.bot, BotType::Random);
        assert_eq!(config.human_player, Player::O);
        assert!(!config.show_search_stats);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content("bot: Minimax\nhuman_player: X\nlog_prefix: \"  \"\n")
            .unwrap();

        let manager = get_config_manager(&file_path);
        let err = manager.get_config().unwrap_err();
        assert!(err.contains("log_prefix"));

        content_provider
            .set_config_content("bot: Genius\nhuman_player: X\n")
            .unwrap();
        assert!(get_config_manager(&file_path).get_config().is_err());

        let _ = std::fs::remove_file(file_path);
    }
}
