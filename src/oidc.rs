//! OpenID Connect scheme options and their first-use validation.
//!
//! `options` holds the settings an operator configures; `validate` enforces the invariants
//! between them (sign-in scheme, client identifier, metadata source, HTTPS, `max_age`) and
//! derives the discovery address from the authority; `lazy` runs that validation once per
//! scheme on first use. `metadata` models the provider document and the
//! [`ConfigurationManager`] collaborator that supplies it.

pub mod lazy;
pub mod metadata;
pub mod options;
pub mod secret;
pub mod validate;

pub use lazy::*;
pub use metadata::*;
pub use options::*;
pub use secret::*;
pub use validate::*;
