//! Canonical record types for the production tracking domain.
//!
//! Wire names follow the historical JSON document (`camelCase`), so every type
//! here serializes byte-compatibly with the data file and the existing clients.
//! Heterogeneous legacy shapes are confined to [`ProductionLogEntry`] and the
//! [`normalize`] boundary; everything downstream of that boundary works on the
//! canonical types only.

pub mod normalize;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default low-stock threshold applied when master data carries none.
pub const DEFAULT_MIN_STOCK_LEVEL: i64 = 50;

/// Raw material consumed when a production batch is started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialEntry {
    pub id: String,
    /// ISO date string.
    pub date: String,
    pub operator_name: String,
    pub material_name: String,
    /// In kg or units; non-negative.
    pub quantity_used: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub timestamp: String,
}

/// Finished goods recorded when a batch is marked complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinishedProductEntry {
    pub id: String,
    pub date: String,
    pub operator_name: String,
    pub product_name: String,
    pub quantity_produced: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub timestamp: String,
}

/// Yield classification for a correlated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Optimal,
    Warning,
    Critical,
}

/// Material side of a correlated production record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialUsage {
    pub name: String,
    pub quantity: f64,
}

/// Output side of a correlated production record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductOutput {
    pub name: String,
    pub quantity: i64,
}

/// One reconciled production batch: consumption joined to output by batch id.
///
/// Derived on every report request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub raw_material: MaterialUsage,
    pub finished_product: ProductOutput,
    /// Yield ratio as a percentage.
    pub efficiency: f64,
    pub status: BatchStatus,
}

/// Where dispatched stock went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Destination {
    Plating,
    Customer,
}

/// Outbound movement of finished stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    pub id: String,
    pub date: String,
    pub product_name: String,
    pub quantity: i64,
    pub destination: Destination,
    /// Customer name or plating vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: String,
}

/// Product classification in master data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Finished,
    SemiFinished,
    Raw,
}

/// Master-data product definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock_level: Option<i64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
}

impl Product {
    /// Low-stock threshold for this product, defaulting when unset.
    pub fn min_stock_level_or_default(&self) -> i64 {
        self.min_stock_level.unwrap_or(DEFAULT_MIN_STOCK_LEVEL)
    }

    /// Product type, defaulting to `FINISHED` for legacy rows.
    pub fn product_type_or_default(&self) -> ProductType {
        self.product_type.unwrap_or(ProductType::Finished)
    }
}

/// Master-data raw material definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<f64>,
}

/// Master-data operator entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Operator {
    pub id: String,
    pub name: String,
}

/// Stock position for one product, folded from the full history.
///
/// `current_stock` is always `total_produced - total_dispatched`; it is never
/// persisted and may go negative when dispatch entries outrun production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub name: String,
    pub total_produced: i64,
    pub total_dispatched: i64,
    pub current_stock: i64,
    pub min_stock_level: i64,
    #[serde(rename = "type")]
    pub product_type: ProductType,
}

/// Daily production report: correlated batches, aggregate metrics and alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: String,
    pub total_material_used: f64,
    pub total_produced: i64,
    pub average_efficiency: f64,
    pub records: Vec<ProductionRecord>,
    pub alerts: Vec<String>,
    pub inventory: Vec<ProductStock>,
}

/// Stored production log row.
///
/// The data file accumulated two field generations: the flat legacy names
/// (`rmUsed`, `rmQuantity`, `componentProduced`, `quantityProduced`) and the
/// newer ones (`materialName`, `quantity`, `productName`, `unitsProduced`).
/// All of them are kept optional here and resolved once, in [`normalize`],
/// before any reporting code runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLogEntry {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rm_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rm_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_produced: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_produced: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units_produced: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
