//! Cache clear command
//!
//! Removes cached download links so the next pass resolves them again.

use crate::commands::{SessionOptions, load_settings};
use crate::error::Result;
use crate::site::cache::FileCache;
use crate::ui as output;

pub fn clear(options: &SessionOptions) -> Result<()> {
    let settings = load_settings(options)?;
    let removed = FileCache::new(settings.cache_dir.clone()).clear()?;

    if removed == 0 {
        output::info("Cache is already empty");
    } else {
        output::success(&format!("Removed {} cached download link(s)", removed));
    }

    Ok(())
}
