//! Administrative import for agreement bundles.
//!
//! Agreements and their effective-dated rate histories arrive as YAML
//! bundles maintained by administrators. This module loads a bundle from
//! disk and installs it into the [`AgreementStore`](crate::store::AgreementStore),
//! which is the only creation path for agreements.
//!
//! # Example
//!
//! ```no_run
//! use agreement_engine::config::AgreementLoader;
//!
//! let loader = AgreementLoader::load("./config/ma000018").unwrap();
//! println!("Loaded agreement: {}", loader.bundle().agreement().name);
//! ```

mod loader;
mod types;

pub use loader::AgreementLoader;
pub use types::{AgreementBundle, AgreementFile, RateFile};
