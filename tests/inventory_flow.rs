//! End-to-end service flows against a scripted extraction gateway.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::{BigDecimal, Zero};
use tokio::sync::RwLock;

use lixozero_rust::error::AppError;
use lixozero_rust::gateway::ExtractionGateway;
use lixozero_rust::models::{
    AcquisitionInput, ConsumptionRecord, FoodStatus, IdentifiedFood, ReplenishReason,
    ShoppingPriority, StorageType,
};
use lixozero_rust::store::AppStore;
use lixozero_rust::{InventoryService, ShoppingListService};

/// Deterministic gateway: hands out pre-scripted responses in order and
/// counts how often it was called.
#[derive(Default)]
struct ScriptedGateway {
    acquisitions: std::sync::Mutex<Vec<Result<Vec<IdentifiedFood>, AppError>>>,
    consumptions: std::sync::Mutex<Vec<Result<Vec<ConsumptionRecord>, AppError>>>,
    acquisition_calls: AtomicUsize,
    consumption_calls: AtomicUsize,
}

impl ScriptedGateway {
    fn with_acquisitions(responses: Vec<Result<Vec<IdentifiedFood>, AppError>>) -> Self {
        Self {
            acquisitions: std::sync::Mutex::new(responses),
            ..Self::default()
        }
    }

    fn with_consumptions(
        acquisitions: Vec<Result<Vec<IdentifiedFood>, AppError>>,
        consumptions: Vec<Result<Vec<ConsumptionRecord>, AppError>>,
    ) -> Self {
        Self {
            acquisitions: std::sync::Mutex::new(acquisitions),
            consumptions: std::sync::Mutex::new(consumptions),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ExtractionGateway for ScriptedGateway {
    async fn extract_acquisitions(
        &self,
        _input: &AcquisitionInput,
    ) -> Result<Vec<IdentifiedFood>, AppError> {
        self.acquisition_calls.fetch_add(1, Ordering::SeqCst);
        let mut scripted = self.acquisitions.lock().unwrap();
        if scripted.is_empty() {
            return Ok(Vec::new());
        }
        scripted.remove(0)
    }

    async fn extract_consumption(
        &self,
        _text: &str,
    ) -> Result<Vec<ConsumptionRecord>, AppError> {
        self.consumption_calls.fetch_add(1, Ordering::SeqCst);
        let mut scripted = self.consumptions.lock().unwrap();
        if scripted.is_empty() {
            return Ok(Vec::new());
        }
        scripted.remove(0)
    }
}

fn identified(name: &str, quantity: &str, expiry_days: f64) -> IdentifiedFood {
    IdentifiedFood {
        name: name.to_string(),
        quantity: quantity.parse().unwrap(),
        unit: "litro".to_string(),
        storage_type: StorageType::Fridge,
        expiry_days,
        estimated_price: "4.5".parse().unwrap(),
    }
}

fn consumption(name: &str, quantity: &str) -> ConsumptionRecord {
    ConsumptionRecord {
        name: name.to_string(),
        quantity: quantity.parse().unwrap(),
    }
}

fn services(
    gateway: Arc<dyn ExtractionGateway>,
) -> (Arc<InventoryService>, Arc<ShoppingListService>) {
    let store = Arc::new(RwLock::new(AppStore::default()));
    (
        Arc::new(InventoryService::new(gateway, Arc::clone(&store))),
        Arc::new(ShoppingListService::new(store)),
    )
}

#[tokio::test]
async fn register_then_consume_drains_earliest_expiry_first() {
    let gateway = Arc::new(ScriptedGateway::with_consumptions(
        vec![Ok(vec![
            identified("Leite", "1", 7.0),
            identified("Leite", "0.5", 2.0),
        ])],
        vec![Ok(vec![consumption("leite", "1")])],
    ));
    let (inventory, shopping) = services(gateway);

    let registered = inventory
        .register_acquisition(AcquisitionInput::text("comprei leite", None))
        .await
        .unwrap();
    assert_eq!(registered.len(), 2);

    let outcomes = inventory.consume("tomei 1 litro de leite").await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].consumed, BigDecimal::from(1));
    assert_eq!(outcomes[0].drained_batches, 1);
    assert!(outcomes[0].unmatched.is_zero());

    // The short-dated half-liter batch went first and became consumed.
    let entries = inventory.list_inventory(true).await;
    let drained = entries
        .iter()
        .find(|e| e.item.initial_quantity == "0.5".parse::<BigDecimal>().unwrap())
        .unwrap();
    assert_eq!(drained.item.status, FoodStatus::Consumed);
    let partial = entries
        .iter()
        .find(|e| e.item.initial_quantity == BigDecimal::from(1))
        .unwrap();
    assert_eq!(partial.item.status, FoodStatus::Active);
    assert_eq!(
        partial.item.current_quantity,
        "0.5".parse::<BigDecimal>().unwrap()
    );

    // Draining a batch queued one "finished" suggestion.
    let list = shopping.list().await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].reason, ReplenishReason::Finished);
    assert_eq!(list[0].priority, ShoppingPriority::Normal);
}

#[tokio::test]
async fn blank_inputs_never_reach_the_gateway() {
    let gateway = Arc::new(ScriptedGateway::default());
    let counts = Arc::clone(&gateway);
    let (inventory, _) = services(gateway);

    let registered = inventory
        .register_acquisition(AcquisitionInput::text("   ", None))
        .await
        .unwrap();
    assert!(registered.is_empty());

    let outcomes = inventory.consume("  \n ").await.unwrap();
    assert!(outcomes.is_empty());

    assert_eq!(counts.acquisition_calls.load(Ordering::SeqCst), 0);
    assert_eq!(counts.consumption_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn gateway_failure_leaves_the_store_untouched() {
    let gateway = Arc::new(ScriptedGateway::with_acquisitions(vec![Err(
        AppError::GatewayUnavailable("connection refused".to_string()),
    )]));
    let (inventory, shopping) = services(gateway);

    let result = inventory
        .register_acquisition(AcquisitionInput::text("comprei leite", None))
        .await;
    assert!(matches!(result, Err(AppError::GatewayUnavailable(_))));

    assert!(inventory.list_inventory(true).await.is_empty());
    assert!(shopping.list().await.is_empty());
}

#[tokio::test]
async fn storage_override_wins_over_gateway_inference() {
    let gateway = Arc::new(ScriptedGateway::with_acquisitions(vec![Ok(vec![
        identified("Frango", "2", 90.0),
        identified("Leite", "1", 7.0),
    ])]));
    let (inventory, _) = services(gateway);

    let registered = inventory
        .register_acquisition(AcquisitionInput::text(
            "comprei frango e leite",
            Some(StorageType::Freezer),
        ))
        .await
        .unwrap();

    assert_eq!(registered.len(), 2);
    for item in registered {
        assert_eq!(item.storage_type, StorageType::Freezer);
    }
}

#[tokio::test]
async fn expired_on_arrival_is_swept_in_the_same_batch() {
    let gateway = Arc::new(ScriptedGateway::with_acquisitions(vec![Ok(vec![
        identified("Iogurte", "1", -1.0),
    ])]));
    let (inventory, shopping) = services(gateway);

    inventory
        .register_acquisition(AcquisitionInput::text("iogurte vencido", None))
        .await
        .unwrap();

    let entries = inventory.list_inventory(true).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].item.status, FoodStatus::Expired);
    assert!(entries[0].item.current_quantity.is_zero());

    let list = shopping.list().await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].reason, ReplenishReason::Expired);
    assert_eq!(list[0].priority, ShoppingPriority::Urgente);
}

#[tokio::test]
async fn repeated_spoilage_upgrades_one_entry() {
    let gateway = Arc::new(ScriptedGateway::with_acquisitions(vec![Ok(vec![
        identified("Leite", "1", 7.0),
        identified("leite", "1", 5.0),
    ])]));
    let (inventory, shopping) = services(gateway);

    let registered = inventory
        .register_acquisition(AcquisitionInput::text("dois leites", None))
        .await
        .unwrap();

    for item in &registered {
        assert!(inventory.mark_spoiled(item.id).await);
    }

    // Same case-insensitive name: exactly one urgent entry.
    let list = shopping.list().await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].reason, ReplenishReason::Spoiled);
    assert_eq!(list[0].priority, ShoppingPriority::Urgente);

    // Both batches went terminal with zeroed quantity.
    for entry in inventory.list_inventory(true).await {
        assert_eq!(entry.item.status, FoodStatus::Spoiled);
        assert!(entry.item.current_quantity.is_zero());
    }
}

#[tokio::test]
async fn spoiling_an_unknown_id_is_a_silent_noop() {
    let gateway = Arc::new(ScriptedGateway::default());
    let (inventory, shopping) = services(gateway);

    assert!(!inventory.mark_spoiled(uuid::Uuid::new_v4()).await);
    assert!(shopping.list().await.is_empty());
}

#[tokio::test]
async fn waste_report_totals_spoiled_and_expired_batches() {
    let gateway = Arc::new(ScriptedGateway::with_consumptions(
        vec![Ok(vec![
            identified("Leite", "1", 7.0),
            identified("Iogurte", "1", -1.0), // expires on arrival
            identified("Arroz", "1", 30.0),
        ])],
        vec![Ok(vec![consumption("arroz", "1")])],
    ));
    let (inventory, _) = services(gateway);

    let registered = inventory
        .register_acquisition(AcquisitionInput::text("compras", None))
        .await
        .unwrap();
    let leite_id = registered.iter().find(|i| i.name == "Leite").unwrap().id;

    inventory.mark_spoiled(leite_id).await;
    inventory.consume("acabei o arroz").await.unwrap();

    let report = inventory.waste_report().await;
    // Leite (spoiled) + Iogurte (expired), 4.5 each; Arroz was saved.
    assert_eq!(report.total_waste_value, BigDecimal::from(9));
    assert_eq!(report.by_name.len(), 2);
    assert_eq!(report.items_saved, 1);
}

#[tokio::test]
async fn over_consumption_is_dropped_without_error() {
    let gateway = Arc::new(ScriptedGateway::with_consumptions(
        vec![Ok(vec![identified("Leite", "1.5", 7.0)])],
        vec![Ok(vec![consumption("leite", "5")])],
    ));
    let (inventory, _) = services(gateway);

    inventory
        .register_acquisition(AcquisitionInput::text("leite", None))
        .await
        .unwrap();
    let outcomes = inventory.consume("muito leite").await.unwrap();

    assert_eq!(outcomes[0].consumed, "1.5".parse::<BigDecimal>().unwrap());
    assert_eq!(outcomes[0].unmatched, "3.5".parse::<BigDecimal>().unwrap());
    for entry in inventory.list_inventory(true).await {
        assert!(entry.item.current_quantity >= BigDecimal::zero());
    }
}

#[tokio::test]
async fn visible_listing_hides_consumed_history() {
    let gateway = Arc::new(ScriptedGateway::with_consumptions(
        vec![Ok(vec![identified("Leite", "1", 7.0)])],
        vec![Ok(vec![consumption("leite", "1")])],
    ));
    let (inventory, _) = services(gateway);

    inventory
        .register_acquisition(AcquisitionInput::text("leite", None))
        .await
        .unwrap();
    inventory.consume("tomei o leite").await.unwrap();

    assert!(inventory.list_inventory(false).await.is_empty());
    assert_eq!(inventory.list_inventory(true).await.len(), 1);
}

#[tokio::test]
async fn manual_and_derived_entries_coexist_with_csv_export() {
    let gateway = Arc::new(ScriptedGateway::default());
    let (_, shopping) = services(gateway);

    let first = shopping.manual_add("Maçã").await.unwrap();
    shopping.manual_add("Maçã").await.unwrap(); // manual path may duplicate
    assert!(shopping.manual_add("   ").await.is_none());
    assert_eq!(shopping.list().await.len(), 2);

    let adjusted = shopping.adjust_quantity(first.id, 1).await.unwrap();
    assert_eq!(adjusted.suggested_quantity, 2);
    let reprioritized = shopping
        .set_priority(first.id, ShoppingPriority::Baixa)
        .await
        .unwrap();
    assert_eq!(reprioritized.priority, ShoppingPriority::Baixa);

    let missing = shopping.adjust_quantity(uuid::Uuid::new_v4(), 1).await;
    assert!(matches!(missing, Err(AppError::NotFound { .. })));

    let csv = String::from_utf8(shopping.export_csv().await.unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Maçã,2,unidade,manual,Baixa"));

    assert_eq!(shopping.clear().await, 2);
    assert!(shopping.list().await.is_empty());
}
