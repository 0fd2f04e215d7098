use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// The API encodes empty collections as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stores: Vec<Store>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Spending {
    pub id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub remark: String,
    pub spending_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub store: Option<Store>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Receipt {
    pub id: Uuid,
    pub store_name: String,
    pub date: DateTime<Utc>,
    pub total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ReceiptItem>,
}

/// Line item as recognised by the OCR endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptItemOcr {
    pub name: String,
    pub price: f64,
}

/// Unsaved receipt parsed from an uploaded image.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptOcr {
    pub store_name: String,
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ReceiptItemOcr>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateStoreRequest {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateStoreRequest {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub stores: Vec<CreateStoreRequest>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub id: Uuid,
    pub name: String,
    pub added_stores: Vec<CreateStoreRequest>,
    pub edited_stores: Vec<UpdateStoreRequest>,
    pub deleted_stores: Vec<Uuid>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpendingRequest {
    pub amount: f64,
    pub remark: String,
    pub spending_date: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateReceiptItemRequest {
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptRequest {
    pub store_name: String,
    pub date: DateTime<Utc>,
    pub items: Vec<CreateReceiptItemRequest>,
    pub total_amount: f64,
}
