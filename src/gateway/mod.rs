use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{AcquisitionInput, ConsumptionRecord, IdentifiedFood};

pub mod gemini;

pub use gemini::GeminiGateway;

/// The AI extraction boundary: free text or image bytes in, structured food
/// records out. The core only talks to this trait, so tests run against a
/// deterministic in-process implementation and never touch the network.
#[async_trait]
pub trait ExtractionGateway: Send + Sync {
    /// Extract acquisition records from text or an image. An empty vec is a
    /// confirmed "no items" answer, distinct from a failed call.
    async fn extract_acquisitions(
        &self,
        input: &AcquisitionInput,
    ) -> Result<Vec<IdentifiedFood>, AppError>;

    /// Interpret a consumption statement into (name, quantity) pairs.
    async fn extract_consumption(&self, text: &str)
        -> Result<Vec<ConsumptionRecord>, AppError>;
}
