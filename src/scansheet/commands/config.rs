use crate::commands::{CmdMessage, CmdResult};
use crate::config::{SheetConfig, CONFIG_FILENAME};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    /// Write the default configuration unless a file already exists
    Init,
}

pub fn run(config_dir: &Path, current: &SheetConfig, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::Show => Ok(CmdResult::default().with_config(current.clone())),
        ConfigAction::Init => {
            let path = config_dir.join(CONFIG_FILENAME);
            let mut result = CmdResult::default();
            if path.exists() {
                result.add_message(CmdMessage::info(format!(
                    "Config already exists at {}",
                    path.display()
                )));
                return Ok(result.with_config(SheetConfig::load(config_dir)?));
            }

            let defaults = SheetConfig::default();
            defaults.save(config_dir)?;
            result.add_message(CmdMessage::success(format!(
                "Wrote default config to {}",
                path.display()
            )));
            Ok(result.with_config(defaults))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn show_returns_current() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SheetConfig::default();
        config.max_codes = 3;

        let result = run(dir.path(), &config, ConfigAction::Show).unwrap();
        assert_eq!(result.config.unwrap().max_codes, 3);
    }

    #[test]
    fn init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let current = SheetConfig::default();

        let result = run(dir.path(), &current, ConfigAction::Init).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(dir.path().join(CONFIG_FILENAME).exists());

        let result = run(dir.path(), &current, ConfigAction::Init).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
