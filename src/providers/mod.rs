//! Price provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::ProviderTrait`]
//! that queries one external price source and maps its payload to
//! canonical [`crate::types::Offer`] values.

pub mod amazon;
pub mod http_store;
pub mod mercado_livre;
pub mod serper;

pub use amazon::AmazonProvider;
pub use http_store::HttpStoreProvider;
pub use mercado_livre::MercadoLivreProvider;
pub use serper::SerperShoppingProvider;
