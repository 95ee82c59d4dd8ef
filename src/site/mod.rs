//! Filesystem-backed site
//!
//! Concrete collaborators for a plain `wp-content/plugins` directory: the
//! inventory reads the directory, activation and dismissals are recorded in
//! JSON files under the state directory, downloads go through `reqwest`.

pub mod activator;
pub mod cache;
pub mod dismissal;
pub mod installer;
pub mod inventory;
pub mod lookup;
pub mod permissions;
pub mod state;
