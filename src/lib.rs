//! Authentication scheme resolution for pluggable web authentication pipelines.
//!
//! Registered schemes are routed per operation (authenticate, challenge, forbid, sign-in,
//! sign-out) with forwarding indirection and cycle detection, and OpenID Connect options are
//! validated lazily on first use before any identity-provider traffic happens.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod obs;
pub mod oidc;
pub mod registry;
pub mod resolver;
pub mod scheme;
pub mod service;

mod _prelude {
	pub use std::{
		collections::{HashMap, HashSet},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::{Arc, OnceLock},
	};

	pub use parking_lot::Mutex;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use {color_eyre as _, tokio as _};
