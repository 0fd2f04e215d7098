//! Editable form state for categories and spending entries.

use std::rc::Rc;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;
use yew::Reducible;

use crate::error::ValidationError;
use crate::models::{
    Category, CreateCategoryRequest, CreateSpendingRequest, CreateStoreRequest, Store,
    UpdateCategoryRequest, UpdateStoreRequest,
};

/// A store row inside the category form. `id` is `None` until the store
/// has been saved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub deleted: bool,
}

impl From<&Store> for StoreDraft {
    fn from(store: &Store) -> Self {
        Self {
            id: Some(store.id),
            name: store.name.clone(),
            deleted: false,
        }
    }
}

/// Partial-update instructions for a category's stores.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreChanges {
    pub added: Vec<CreateStoreRequest>,
    pub edited: Vec<UpdateStoreRequest>,
    pub deleted: Vec<Uuid>,
}

/// Splits the working store list into added, edited and deleted sets.
///
/// Unsaved drafts that were marked deleted are dropped. Persisted stores
/// missing from `working` count as deleted.
pub fn reconcile_stores(original: &[Store], working: &[StoreDraft]) -> StoreChanges {
    let mut changes = StoreChanges::default();

    for draft in working {
        match (draft.id, draft.deleted) {
            (None, false) => changes.added.push(CreateStoreRequest {
                name: draft.name.trim().to_string(),
            }),
            (None, true) => {}
            (Some(id), false) => changes.edited.push(UpdateStoreRequest {
                id,
                name: draft.name.trim().to_string(),
            }),
            (Some(id), true) => changes.deleted.push(id),
        }
    }

    for store in original {
        if !working.iter().any(|d| d.id == Some(store.id)) {
            changes.deleted.push(store.id);
        }
    }

    changes
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryForm {
    pub id: Option<Uuid>,
    pub name: String,
    pub stores: Vec<StoreDraft>,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: Some(category.id),
            name: category.name.clone(),
            stores: category.stores.iter().map(StoreDraft::from).collect(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn add_store(&mut self) {
        self.stores.push(StoreDraft::default());
    }

    pub fn rename_store(&mut self, index: usize, name: String) {
        if let Some(draft) = self.stores.get_mut(index) {
            draft.name = name;
        }
    }

    pub fn toggle_store_deleted(&mut self, index: usize) {
        if let Some(draft) = self.stores.get_mut(index) {
            draft.deleted = !draft.deleted;
        }
    }

    pub fn validated_name(&self) -> Result<&str, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankCategoryName);
        }
        Ok(name)
    }

    pub fn to_create_request(&self) -> Result<CreateCategoryRequest, ValidationError> {
        let name = self.validated_name()?.to_string();
        let stores = self
            .stores
            .iter()
            .filter(|d| !d.deleted)
            .map(|d| CreateStoreRequest {
                name: d.name.trim().to_string(),
            })
            .collect();
        Ok(CreateCategoryRequest { name, stores })
    }

    /// Returns `None` for a form that has never been saved.
    pub fn to_update_request(
        &self,
        original: &[Store],
    ) -> Result<Option<UpdateCategoryRequest>, ValidationError> {
        let name = self.validated_name()?.to_string();
        let Some(id) = self.id else {
            return Ok(None);
        };
        let changes = reconcile_stores(original, &self.stores);
        Ok(Some(UpdateCategoryRequest {
            id,
            name,
            added_stores: changes.added,
            edited_stores: changes.edited,
            deleted_stores: changes.deleted,
        }))
    }
}

/// Edits dispatched to a [`CategoryForm`] held in `use_reducer`.
pub enum CategoryEdit {
    Name(String),
    AddStore,
    RenameStore(usize, String),
    ToggleStoreDeleted(usize),
}

impl Reducible for CategoryForm {
    type Action = CategoryEdit;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CategoryEdit::Name(name) => next.name = name,
            CategoryEdit::AddStore => next.add_store(),
            CategoryEdit::RenameStore(index, name) => next.rename_store(index, name),
            CategoryEdit::ToggleStoreDeleted(index) => next.toggle_store_deleted(index),
        }
        Rc::new(next)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpendingForm {
    pub amount: String,
    pub spending_date: String,
    pub category_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub remark: String,
}

impl SpendingForm {
    pub fn select_category(&mut self, category_id: Option<Uuid>) {
        self.category_id = category_id;
        self.store_id = None;
    }

    pub fn to_request(&self) -> Result<CreateSpendingRequest, ValidationError> {
        let raw_amount = self.amount.trim();
        let amount = raw_amount
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| ValidationError::InvalidAmount(raw_amount.to_string()))?;

        let raw_date = self.spending_date.trim();
        let spending_date = if raw_date.is_empty() {
            None
        } else {
            let midnight = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .ok_or_else(|| ValidationError::InvalidDate(raw_date.to_string()))?;
            Some(Utc.from_utc_datetime(&midnight))
        };

        Ok(CreateSpendingRequest {
            amount,
            remark: self.remark.clone(),
            spending_date,
            category_id: self.category_id,
            store_id: self.category_id.and(self.store_id),
        })
    }
}

pub enum SpendingEdit {
    Amount(String),
    Date(String),
    Remark(String),
    Category(Option<Uuid>),
    Store(Option<Uuid>),
}

impl Reducible for SpendingForm {
    type Action = SpendingEdit;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SpendingEdit::Amount(amount) => next.amount = amount,
            SpendingEdit::Date(date) => next.spending_date = date,
            SpendingEdit::Remark(remark) => next.remark = remark,
            SpendingEdit::Category(id) => next.select_category(id),
            SpendingEdit::Store(id) => next.store_id = id,
        }
        Rc::new(next)
    }
}
