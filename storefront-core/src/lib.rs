#![warn(missing_docs)]
//! # storefront-core
//!
//! Core types and traits for the storefront shipping and caching toolkit.
//!
//! This crate provides the shared vocabulary used by the calculator and the
//! glue crates:
//!
//! - **Describe** a shipping calculation ([`CalculationRequest`], [`CartItem`])
//! - **Represent** its outcome ([`ShippingQuote`], [`ShippingError`])
//! - **Call** the downstream endpoint ([`ShippingEndpoint`])
//! - **Supersede** in-flight requests ([`RequestToken`])
//!
//! The types here are transport-agnostic; the HTTP implementation of
//! [`ShippingEndpoint`] lives in `storefront-shipping`.

pub mod endpoint;
pub mod error;
pub mod quote;
pub mod request;
pub mod token;

pub use endpoint::ShippingEndpoint;
pub use error::ShippingError;
pub use quote::ShippingQuote;
pub use request::{CalculationRequest, CartItem};
pub use token::RequestToken;
