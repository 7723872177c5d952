//! # Component Catalog
//!
//! Static reference data for the products a switchboard is built from.
//! All tables are read-only; selection logic lives in
//! [`calculations`](crate::calculations).
//!
//! - [`breakers`] - Circuit breaker product line (In, Icu, price)
//! - [`transformers`] - Standard transformer ratings and nameplate data
//! - [`enclosures`] - Enclosure frames and prices
//!
//! ## Example
//!
//! ```rust
//! use calc_core::catalog::{BreakerCatalog, STANDARD_TRANSFORMER_SIZES_KVA};
//!
//! let cheapest = BreakerCatalog::standard()
//!     .iter()
//!     .map(|b| b.price_eur)
//!     .fold(f64::INFINITY, f64::min);
//! assert_eq!(cheapest, 450.0);
//! assert_eq!(STANDARD_TRANSFORMER_SIZES_KVA[0], 160.0);
//! ```

pub mod breakers;
pub mod enclosures;
pub mod transformers;

pub use breakers::{BreakerCatalog, BreakerModel};
pub use enclosures::EnclosureType;
pub use transformers::{TransformerSpec, STANDARD_TRANSFORMER_SIZES_KVA};
