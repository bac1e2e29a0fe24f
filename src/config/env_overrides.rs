use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(locus) = std::env::var("VPP_LOCUS") {
            self.protocol.locus = (!locus.is_empty()).then_some(locus);
        }

        if let Ok(raw) = std::env::var("VPP_ASSUMPTIONS")
            && let Ok(count) = raw.trim().parse::<i64>()
        {
            self.protocol.assumptions = count;
        }

        if let Ok(level) = std::env::var("VPP_LOG_LEVEL")
            && !level.is_empty()
        {
            self.logging.level = level;
        }

        if let Ok(workspace) = std::env::var("VPP_WORKSPACE")
            && !workspace.is_empty()
        {
            self.workspace_dir = PathBuf::from(shellexpand::tilde(&workspace).into_owned());
        }
    }
}
