//! CLI command implementations.
//!
//! - **extract**: crosswalk a reflected module against a host dump and save a snapshot
//! - **inspect**: print statistics for a saved or bundled snapshot
//! - **init**: write a default `.crosswalk.toml`

pub mod extract;
pub mod init;
pub mod inspect;

pub use extract::{run_extract, ExtractOptions};
pub use init::init_config;
pub use inspect::{run_inspect, InspectTarget};
