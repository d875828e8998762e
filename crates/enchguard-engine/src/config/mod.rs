//! Limit config loader (strict parsing).

pub mod schema;

use std::fs;

use enchguard_core::error::{EnchGuardError, Result};

pub use schema::{
    AuditSection, GrantSection, ItemOverridesSection, LimitConfig, LimitsSection,
    MessagesSection, SweepSection, TierRungConfig, TiersSection,
};

pub fn load_from_file(path: &str) -> Result<LimitConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| EnchGuardError::BadConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<LimitConfig> {
    let cfg: LimitConfig = serde_yaml::from_str(s)
        .map_err(|e| EnchGuardError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
