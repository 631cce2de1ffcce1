//! Host platform utility functions

use std::path::PathBuf;

/// The environment variable pointing at the root of the software checkout.
pub const SW_ROOT_ENV_VAR: &str = "AUTO_SW_ROOT";

/// Get the root directory of the software from the environment.
///
/// The root is used to resolve the `params` and `sessions` directories, so
/// that the software can be run from any working directory.
pub fn get_auto_sw_root() -> Result<PathBuf, std::env::VarError> {
    let root = std::env::var(SW_ROOT_ENV_VAR)?;
    Ok(PathBuf::from(root))
}
