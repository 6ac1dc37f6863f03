//! Translation gateway
//!
//! One call translates one text into one target language. Implementations
//! hold no per-request state, so a single gateway serves every concurrent
//! request of a page.

mod error;
mod google;
mod mock;

pub use error::{GatewayError, GatewayResult};
pub use google::GoogleTranslateGateway;
pub use mock::MockTranslator;

use async_trait::async_trait;

/// A machine translation provider
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` (HTML allowed) into `target_code`
    async fn translate(&self, text: &str, target_code: &str) -> GatewayResult<String>;

    /// Name used in log lines
    fn provider_name(&self) -> &str;
}
