//! Chat assistant seam.
//!
//! The storefront's chat widget is a one-shot request/response: a free-text
//! message plus a catalog-context string in, a free-text reply out. The seam
//! never fails; whatever goes wrong behind it comes back as the fixed
//! fallback reply, so the widget cannot tell a degraded provider from an
//! empty answer.

pub mod client;

use async_trait::async_trait;

pub use client::CompletionClient;

/// Canned apology shown whenever the provider cannot produce a reply.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

#[async_trait]
pub trait ChatAssistant: Send + Sync {
    /// Answer a shopper's message, grounded in the given catalog summary.
    /// Infallible by contract: implementations map every failure to
    /// [`FALLBACK_REPLY`].
    async fn reply(&self, message: &str, catalog_context: &str) -> String;
}
