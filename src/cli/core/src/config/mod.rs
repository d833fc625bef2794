/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{CONFIG_FILE, find_vuessr_config, load_vuessr_config};
pub use types::{AppEntry, LegacySection, ServerSection, SiteSection, VuessrConfig};
