//! HTTP client module.
//!
//! [`Client`] is the single place network calls are made. Tables borrow it;
//! it holds no per-request state and can be shared freely.

mod executor;

pub use executor::{Client, ClientBuilder};
