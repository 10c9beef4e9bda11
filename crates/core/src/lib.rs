//! Catalli character customization domain.
//!
//! Pure logic shared by the API service: the option catalog and its loader,
//! the customization validator, the two-layer mask compositor, and the
//! predefined fallback customizations. Nothing here touches the database
//! or the network.

pub mod catalog;
pub mod customization;
pub mod error;
pub mod masks;
pub mod predefined;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod types;
pub mod validation;
