use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::food::StorageType;

/// Raw material handed to the acquisition extractor.
#[derive(Debug, Clone)]
pub enum AcquisitionSource {
    Text(String),
    Image { data: Vec<u8>, mime_type: String },
}

/// One acquisition request. When `storage_override` is set it wins over
/// whatever the gateway infers, for every resulting item.
#[derive(Debug, Clone)]
pub struct AcquisitionInput {
    pub source: AcquisitionSource,
    pub storage_override: Option<StorageType>,
}

impl AcquisitionInput {
    pub fn text(text: impl Into<String>, storage_override: Option<StorageType>) -> Self {
        Self {
            source: AcquisitionSource::Text(text.into()),
            storage_override,
        }
    }

    pub fn image(data: Vec<u8>, mime_type: impl Into<String>, storage_override: Option<StorageType>) -> Self {
        Self {
            source: AcquisitionSource::Image {
                data,
                mime_type: mime_type.into(),
            },
            storage_override,
        }
    }
}

/// One structured acquisition record as returned by the extraction gateway.
/// All six fields are required; a response missing any of them fails schema
/// validation and the whole call is treated as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedFood {
    pub name: String,
    pub quantity: BigDecimal,
    pub unit: String,
    pub storage_type: StorageType,
    pub expiry_days: f64,
    pub estimated_price: BigDecimal,
}

/// One (name, quantity) pair from a consumption statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub name: String,
    pub quantity: BigDecimal,
}
