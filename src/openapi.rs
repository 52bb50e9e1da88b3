//! OpenAPI document assembly and Swagger UI mount.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::handlers::{health, inventory, master_data, production, reports};
use crate::models::{
    BatchStatus, DailyReport, Destination, DispatchRecord, Material, MaterialUsage, Operator,
    Product, ProductOutput, ProductStock, ProductType, ProductionLogEntry, ProductionRecord,
};
use crate::services::inventory::NewDispatch;
use crate::services::master_data::{
    MaterialUpdate, NewMaterial, NewOperator, NewProduct, OperatorUpdate, ProductUpdate,
};
use crate::services::production::NewProductionLog;
use crate::services::stock::FullStockReport;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        production::list_production_logs,
        production::create_production_log,
        production::delete_production_log,
        production::next_batch_id,
        inventory::get_stock_report,
        inventory::create_dispatch,
        inventory::delete_dispatch,
        reports::get_daily_report,
        reports::get_production_records,
        master_data::list_materials,
        master_data::create_material,
        master_data::update_material,
        master_data::delete_material,
        master_data::list_products,
        master_data::create_product,
        master_data::update_product,
        master_data::delete_product,
        master_data::list_operators,
        master_data::create_operator,
        master_data::update_operator,
        master_data::delete_operator,
    ),
    components(schemas(
        ErrorResponse,
        health::HealthStatus,
        production::NextBatchId,
        NewProductionLog,
        ProductionLogEntry,
        ProductionRecord,
        BatchStatus,
        MaterialUsage,
        ProductOutput,
        NewDispatch,
        DispatchRecord,
        Destination,
        ProductStock,
        FullStockReport,
        DailyReport,
        NewMaterial,
        MaterialUpdate,
        Material,
        NewProduct,
        ProductUpdate,
        Product,
        ProductType,
        NewOperator,
        OperatorUpdate,
        Operator,
    )),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "production", description = "Production log history and batch ids"),
        (name = "inventory", description = "Derived stock and dispatches"),
        (name = "reports", description = "Daily reconciliation and analysis"),
        (name = "master-data", description = "Materials, products and operators")
    ),
    info(
        title = "ProdTrack API",
        description = "Manufacturing production tracking: log correlation, stock derivation and daily efficiency analysis."
    )
)]
pub struct ApiDoc;

/// Swagger UI router serving the generated document at `/docs`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
