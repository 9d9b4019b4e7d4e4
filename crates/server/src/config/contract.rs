use serde::Deserialize;

/// The published Move package holding the `video` module.
#[derive(Debug, Default, Deserialize)]
pub struct ContractConfig {
    /// Package id. Falls back to `DROPIT_PACKAGE_ID`, then `0x0`.
    pub package_id: Option<String>,
}
