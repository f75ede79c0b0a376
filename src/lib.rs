//! # io-footprint
//!
//! Carbon footprint engine built on environmentally extended input-output
//! analysis. A dataset version (transaction table `Z`, gross output `x` and
//! raw environmental pressures `D1`) is turned into Leontief and Ghosh
//! inverses, direct and total emission intensities and linkage indices, then
//! queried for product, basket and scenario footprints.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] adapters and the pipeline types they wrap.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once it is useful outside that model, as the matrix helpers
//! and the version registry did.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber.

pub mod models;
pub mod support;
