use std::path::PathBuf;
use crate::config::{BearerToken, Config};

pub const BEARER_TOKEN_VAR: &str = "BEARER_TOKEN";
pub const CONFIG_PATH_VAR: &str = "SIMPLEAPI_CONFIG";

pub fn load_env() {
    let _ = dotenvy::dotenv();

    if let Ok(mut exe_path) = std::env::current_exe() {
        exe_path.pop();
        let env_path: PathBuf = exe_path.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
    }
}

pub fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn config_path() -> Option<PathBuf> {
    var(CONFIG_PATH_VAR).map(PathBuf::from)
}

/// `BEARER_TOKEN` wins over the config file.
pub fn get_bearer_token(cfg: &Config) -> Option<BearerToken> {
    bearer_token_from(var(BEARER_TOKEN_VAR), cfg)
}

fn bearer_token_from(env_value: Option<String>, cfg: &Config) -> Option<BearerToken> {
    env_value
        .and_then(|v| BearerToken::new(v).ok())
        .or_else(|| cfg.api.bearer_token.clone())
}
