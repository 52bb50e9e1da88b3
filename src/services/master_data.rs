//! Master data service: the admin-managed materials, products and operators
//! lists that logs are validated and joined against.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{Material, Operator, Product, ProductType};
use crate::store::JsonStore;

/// Payload for registering a material.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterial {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub unit: String,
    #[serde(default)]
    pub min_stock: Option<f64>,
}

/// Partial update for a material; only provided fields change.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub min_stock: Option<f64>,
}

/// Payload for registering a product.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub min_stock_level: Option<i64>,
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
}

/// Partial update for a product; only provided fields change.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub min_stock_level: Option<i64>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
}

/// Payload for registering an operator.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewOperator {
    #[validate(length(min = 1))]
    pub name: String,
}

/// Partial update for an operator.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OperatorUpdate {
    pub name: Option<String>,
}

/// Service for the master-data reference lists.
#[derive(Clone)]
pub struct MasterDataService {
    store: Arc<JsonStore>,
}

impl MasterDataService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    pub async fn list_materials(&self) -> Vec<Material> {
        self.store.snapshot().await.materials
    }

    #[instrument(skip(self, new_material), fields(name = %new_material.name))]
    pub async fn create_material(
        &self,
        new_material: NewMaterial,
    ) -> Result<Material, ServiceError> {
        let material = Material {
            id: format!("RM-{}", Utc::now().timestamp_millis()),
            name: new_material.name,
            unit: new_material.unit,
            min_stock: new_material.min_stock,
        };
        let stored = self
            .store
            .mutate(|db| {
                db.materials.push(material.clone());
                material
            })
            .await?;
        info!(id = %stored.id, "material created");
        Ok(stored)
    }

    #[instrument(skip(self, update))]
    pub async fn update_material(
        &self,
        id: &str,
        update: MaterialUpdate,
    ) -> Result<Material, ServiceError> {
        let updated = self
            .store
            .mutate(|db| {
                let material = db.materials.iter_mut().find(|m| m.id == id)?;
                if let Some(name) = update.name {
                    material.name = name;
                }
                if let Some(unit) = update.unit {
                    material.unit = unit;
                }
                if let Some(min_stock) = update.min_stock {
                    material.min_stock = Some(min_stock);
                }
                Some(material.clone())
            })
            .await?;
        updated.ok_or_else(|| ServiceError::NotFound(format!("Material {id} not found")))
    }

    #[instrument(skip(self))]
    pub async fn delete_material(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_by_id(id, "Material", |db, id| {
            let before = db.materials.len();
            db.materials.retain(|m| m.id != id);
            db.materials.len() < before
        })
        .await
    }

    pub async fn list_products(&self) -> Vec<Product> {
        self.store.snapshot().await.products
    }

    #[instrument(skip(self, new_product), fields(name = %new_product.name))]
    pub async fn create_product(&self, new_product: NewProduct) -> Result<Product, ServiceError> {
        let product = Product {
            id: format!("PROD-{}", Utc::now().timestamp_millis()),
            name: new_product.name,
            category: new_product.category,
            sku: new_product.sku,
            min_stock_level: new_product.min_stock_level,
            product_type: new_product.product_type,
        };
        let stored = self
            .store
            .mutate(|db| {
                db.products.push(product.clone());
                product
            })
            .await?;
        info!(id = %stored.id, "product created");
        Ok(stored)
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, ServiceError> {
        let updated = self
            .store
            .mutate(|db| {
                let product = db.products.iter_mut().find(|p| p.id == id)?;
                if let Some(name) = update.name {
                    product.name = name;
                }
                if let Some(category) = update.category {
                    product.category = Some(category);
                }
                if let Some(sku) = update.sku {
                    product.sku = Some(sku);
                }
                if let Some(level) = update.min_stock_level {
                    product.min_stock_level = Some(level);
                }
                if let Some(product_type) = update.product_type {
                    product.product_type = Some(product_type);
                }
                Some(product.clone())
            })
            .await?;
        updated.ok_or_else(|| ServiceError::NotFound(format!("Product {id} not found")))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_by_id(id, "Product", |db, id| {
            let before = db.products.len();
            db.products.retain(|p| p.id != id);
            db.products.len() < before
        })
        .await
    }

    pub async fn list_operators(&self) -> Vec<Operator> {
        self.store.snapshot().await.operators
    }

    #[instrument(skip(self, new_operator), fields(name = %new_operator.name))]
    pub async fn create_operator(
        &self,
        new_operator: NewOperator,
    ) -> Result<Operator, ServiceError> {
        let operator = Operator {
            id: format!("OP-{}", Utc::now().timestamp_millis()),
            name: new_operator.name,
        };
        let stored = self
            .store
            .mutate(|db| {
                db.operators.push(operator.clone());
                operator
            })
            .await?;
        info!(id = %stored.id, "operator created");
        Ok(stored)
    }

    #[instrument(skip(self, update))]
    pub async fn update_operator(
        &self,
        id: &str,
        update: OperatorUpdate,
    ) -> Result<Operator, ServiceError> {
        let updated = self
            .store
            .mutate(|db| {
                let operator = db.operators.iter_mut().find(|o| o.id == id)?;
                if let Some(name) = update.name {
                    operator.name = name;
                }
                Some(operator.clone())
            })
            .await?;
        updated.ok_or_else(|| ServiceError::NotFound(format!("Operator {id} not found")))
    }

    #[instrument(skip(self))]
    pub async fn delete_operator(&self, id: &str) -> Result<(), ServiceError> {
        self.delete_by_id(id, "Operator", |db, id| {
            let before = db.operators.len();
            db.operators.retain(|o| o.id != id);
            db.operators.len() < before
        })
        .await
    }

    async fn delete_by_id(
        &self,
        id: &str,
        kind: &str,
        remove: impl FnOnce(&mut crate::store::Database, &str) -> bool,
    ) -> Result<(), ServiceError> {
        let removed = self.store.mutate(|db| remove(db, id)).await?;
        if removed {
            info!(%id, "{kind} deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("{kind} {id} not found")))
        }
    }
}
