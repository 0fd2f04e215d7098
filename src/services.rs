//! Page-level operations: one mutation, then a full re-fetch.

use std::future::Future;

use uuid::Uuid;

use crate::api::SpendingApi;
use crate::error::{AppError, ValidationError};
use crate::forms::{CategoryForm, SpendingForm};
use crate::indicators::Feedback;
use crate::models::{Category, Receipt, ReceiptOcr, Spending, Store};
use crate::receipt::validate_image_type;

/// Where a confirmed receipt is saved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptTarget {
    Spending,
    Receipt,
}

/// Shows the loading indicator while `work` runs.
pub async fn with_loading<F, T>(feedback: &impl Feedback, work: F) -> T
where
    F: Future<Output = T>,
{
    feedback.show_loading();
    let result = work.await;
    feedback.hide_loading();
    result
}

pub fn report_failure(feedback: &impl Feedback, err: &AppError) {
    match err {
        AppError::Invalid(invalid) => tracing::debug!(error = %invalid, "input rejected"),
        AppError::Api(api) => tracing::error!(error = %api, "request failed"),
    }
    feedback.show_message(err.to_string());
}

pub async fn load_categories<A: SpendingApi>(api: &A) -> Result<Vec<Category>, AppError> {
    let categories = api.list_categories().await?;
    tracing::debug!(count = categories.len(), "categories loaded");
    Ok(categories)
}

/// Creates or updates the category behind `form`. `original_stores` is the
/// persisted store list when editing.
pub async fn save_category<A: SpendingApi>(
    api: &A,
    form: &CategoryForm,
    original_stores: &[Store],
) -> Result<Vec<Category>, AppError> {
    match form.to_update_request(original_stores)? {
        Some(request) => {
            tracing::info!(
                id = %request.id,
                added = request.added_stores.len(),
                edited = request.edited_stores.len(),
                deleted = request.deleted_stores.len(),
                "updating category"
            );
            api.update_category(request.id, &request).await?;
        }
        None => {
            let request = form.to_create_request()?;
            tracing::info!(name = %request.name, stores = request.stores.len(), "creating category");
            api.create_category(&request).await?;
        }
    }
    load_categories(api).await
}

pub async fn delete_category<A: SpendingApi>(api: &A, id: Uuid) -> Result<Vec<Category>, AppError> {
    tracing::info!(%id, "deleting category");
    api.delete_category(id).await?;
    load_categories(api).await
}

pub async fn load_spending<A: SpendingApi>(api: &A) -> Result<Vec<Spending>, AppError> {
    let spending = api.list_spending().await?;
    tracing::debug!(count = spending.len(), "spending loaded");
    Ok(spending)
}

pub async fn create_spending<A: SpendingApi>(
    api: &A,
    form: &SpendingForm,
) -> Result<Vec<Spending>, AppError> {
    let request = form.to_request()?;
    tracing::info!(amount = request.amount, "creating spending");
    api.create_spending(&request).await?;
    load_spending(api).await
}

pub async fn delete_spending<A: SpendingApi>(api: &A, id: Uuid) -> Result<Vec<Spending>, AppError> {
    tracing::info!(%id, "deleting spending");
    api.delete_spending(id).await?;
    load_spending(api).await
}

pub async fn load_receipts<A: SpendingApi>(api: &A) -> Result<Vec<Receipt>, AppError> {
    let receipts = api.list_receipts().await?;
    tracing::debug!(count = receipts.len(), "receipts loaded");
    Ok(receipts)
}

/// Sends an image to OCR. Anything but JPEG/PNG is refused with an alert.
pub async fn scan_receipt<A: SpendingApi>(
    api: &A,
    feedback: &impl Feedback,
    image: &A::Image,
    mime: &str,
) -> Result<ReceiptOcr, AppError> {
    if let Err(invalid) = validate_image_type(mime) {
        tracing::debug!(mime, "rejected receipt image");
        feedback.alert(&invalid.to_string());
        return Err(invalid.into());
    }
    let receipt = with_loading(feedback, api.upload_receipt(image)).await?;
    tracing::info!(store = %receipt.store_name, items = receipt.items.len(), "receipt parsed");
    Ok(receipt)
}

pub async fn confirm_receipt<A: SpendingApi>(
    api: &A,
    receipt: &ReceiptOcr,
    target: ReceiptTarget,
) -> Result<(), AppError> {
    match target {
        ReceiptTarget::Spending => {
            let request = receipt.to_spending_request();
            tracing::info!(amount = request.amount, "saving receipt as spending");
            api.create_spending(&request).await?;
        }
        ReceiptTarget::Receipt => {
            let request = receipt.to_receipt_request();
            tracing::info!(total = request.total_amount, "saving receipt");
            api.create_receipt(&request).await?;
        }
    }
    Ok(())
}

/// Rejection used by forms that refuse to submit without a request.
pub fn is_validation(err: &AppError) -> Option<&ValidationError> {
    match err {
        AppError::Invalid(invalid) => Some(invalid),
        AppError::Api(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{TimeZone, Utc};
    use futures::executor::block_on;

    use super::*;
    use crate::error::ApiError;
    use crate::forms::StoreDraft;
    use crate::models::{
        CreateCategoryRequest, CreateReceiptRequest, CreateSpendingRequest, ReceiptItemOcr,
        UpdateCategoryRequest,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ListCategories,
        CreateCategory(CreateCategoryRequest),
        UpdateCategory(Uuid, UpdateCategoryRequest),
        DeleteCategory(Uuid),
        ListSpending,
        CreateSpending(CreateSpendingRequest),
        DeleteSpending(Uuid),
        ListReceipts,
        CreateReceipt(CreateReceiptRequest),
        Upload(String),
    }

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Call>>,
        fail_mutations: bool,
        categories: Vec<Category>,
    }

    impl FakeApi {
        fn failing() -> Self {
            Self {
                fail_mutations: true,
                ..Default::default()
            }
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }

        fn mutation(&self, call: Call, operation: &'static str) -> Result<(), ApiError> {
            self.record(call);
            if self.fail_mutations {
                Err(ApiError::Status {
                    operation,
                    status: 500,
                })
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    fn spending_stub() -> Spending {
        Spending {
            id: Uuid::from_u128(99),
            amount: 1.0,
            remark: String::new(),
            spending_date: None,
            category: None,
            store: None,
        }
    }

    impl SpendingApi for FakeApi {
        type Image = String;

        async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
            self.record(Call::ListCategories);
            Ok(self.categories.clone())
        }

        async fn create_category(&self, request: &CreateCategoryRequest) -> Result<(), ApiError> {
            self.mutation(Call::CreateCategory(request.clone()), "create category")
        }

        async fn update_category(
            &self,
            id: Uuid,
            request: &UpdateCategoryRequest,
        ) -> Result<(), ApiError> {
            self.mutation(Call::UpdateCategory(id, request.clone()), "update category")
        }

        async fn delete_category(&self, id: Uuid) -> Result<(), ApiError> {
            self.mutation(Call::DeleteCategory(id), "delete category")
        }

        async fn list_spending(&self) -> Result<Vec<Spending>, ApiError> {
            self.record(Call::ListSpending);
            Ok(vec![spending_stub()])
        }

        async fn create_spending(
            &self,
            request: &CreateSpendingRequest,
        ) -> Result<Spending, ApiError> {
            self.mutation(Call::CreateSpending(request.clone()), "create spending")?;
            Ok(spending_stub())
        }

        async fn delete_spending(&self, id: Uuid) -> Result<(), ApiError> {
            self.mutation(Call::DeleteSpending(id), "delete spending")
        }

        async fn list_receipts(&self) -> Result<Vec<Receipt>, ApiError> {
            self.record(Call::ListReceipts);
            Ok(vec![])
        }

        async fn create_receipt(&self, request: &CreateReceiptRequest) -> Result<Receipt, ApiError> {
            self.mutation(Call::CreateReceipt(request.clone()), "create receipt")?;
            Ok(Receipt {
                id: Uuid::from_u128(5),
                store_name: request.store_name.clone(),
                date: request.date,
                total: request.total_amount,
                items: vec![],
            })
        }

        async fn upload_receipt(&self, image: &String) -> Result<ReceiptOcr, ApiError> {
            self.mutation(Call::Upload(image.clone()), "upload receipt")?;
            Ok(ocr())
        }
    }

    #[derive(Debug, PartialEq)]
    enum Signal {
        LoadingOn,
        LoadingOff,
        Message(String),
        MessageOff,
        Alert(String),
    }

    #[derive(Default)]
    struct FakeFeedback {
        signals: RefCell<Vec<Signal>>,
    }

    impl Feedback for FakeFeedback {
        fn show_loading(&self) {
            self.signals.borrow_mut().push(Signal::LoadingOn);
        }
        fn hide_loading(&self) {
            self.signals.borrow_mut().push(Signal::LoadingOff);
        }
        fn show_message(&self, message: String) {
            self.signals.borrow_mut().push(Signal::Message(message));
        }
        fn hide_message(&self) {
            self.signals.borrow_mut().push(Signal::MessageOff);
        }
        fn alert(&self, message: &str) {
            self.signals.borrow_mut().push(Signal::Alert(message.to_string()));
        }
    }

    fn ocr() -> ReceiptOcr {
        ReceiptOcr {
            store_name: "Corner Shop".into(),
            date: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            items: vec![
                ReceiptItemOcr {
                    name: "tea".into(),
                    price: 3.005,
                },
                ReceiptItemOcr {
                    name: "bun".into(),
                    price: 1.0,
                },
            ],
        }
    }

    fn persisted_store(n: u128, name: &str) -> Store {
        Store {
            id: Uuid::from_u128(n),
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn blank_category_name_sends_nothing() {
        let api = FakeApi::default();
        let form = CategoryForm {
            name: "  ".into(),
            ..Default::default()
        };

        let result = block_on(save_category(&api, &form, &[]));

        assert_eq!(
            result,
            Err(AppError::Invalid(ValidationError::BlankCategoryName))
        );
        assert!(api.calls().is_empty());
    }

    #[test]
    fn new_category_is_created_then_refetched() {
        let api = FakeApi::default();
        let mut form = CategoryForm {
            name: "Food".into(),
            ..Default::default()
        };
        form.add_store();
        form.rename_store(0, "Deli".into());

        block_on(save_category(&api, &form, &[])).unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::CreateCategory(r) if r.name == "Food" && r.stores.len() == 1));
        assert_eq!(calls[1], Call::ListCategories);
    }

    #[test]
    fn edited_category_sends_reconciled_stores() {
        let api = FakeApi::default();
        let original = vec![persisted_store(1, "A"), persisted_store(2, "B")];
        let form = CategoryForm {
            id: Some(Uuid::from_u128(10)),
            name: "Food".into(),
            stores: vec![
                StoreDraft {
                    id: Some(Uuid::from_u128(1)),
                    name: "A2".into(),
                    deleted: false,
                },
                StoreDraft {
                    id: Some(Uuid::from_u128(2)),
                    name: "B".into(),
                    deleted: true,
                },
                StoreDraft {
                    id: None,
                    name: "C".into(),
                    deleted: false,
                },
            ],
        };

        block_on(save_category(&api, &form, &original)).unwrap();

        let calls = api.calls();
        let Call::UpdateCategory(id, request) = &calls[0] else {
            panic!("expected an update, got {calls:?}");
        };
        assert_eq!(*id, Uuid::from_u128(10));
        assert_eq!(request.added_stores.len(), 1);
        assert_eq!(request.edited_stores[0].name, "A2");
        assert_eq!(request.deleted_stores, vec![Uuid::from_u128(2)]);
        assert_eq!(calls[1], Call::ListCategories);
    }

    #[test]
    fn delete_category_refetches_once_on_success() {
        let api = FakeApi::default();
        let id = Uuid::from_u128(3);

        block_on(delete_category(&api, id)).unwrap();

        assert_eq!(api.calls(), vec![Call::DeleteCategory(id), Call::ListCategories]);
    }

    #[test]
    fn failed_delete_does_not_refetch() {
        let api = FakeApi::failing();
        let id = Uuid::from_u128(3);

        let result = block_on(delete_category(&api, id));

        assert!(matches!(result, Err(AppError::Api(ApiError::Status { status: 500, .. }))));
        assert_eq!(api.calls(), vec![Call::DeleteCategory(id)]);
    }

    #[test]
    fn spending_delete_and_create_refresh_the_list() {
        let api = FakeApi::default();
        let id = Uuid::from_u128(4);
        block_on(delete_spending(&api, id)).unwrap();

        let form = SpendingForm {
            amount: "7.25".into(),
            remark: "taxi".into(),
            ..Default::default()
        };
        let list = block_on(create_spending(&api, &form)).unwrap();

        assert_eq!(list.len(), 1);
        let calls = api.calls();
        assert_eq!(calls[0], Call::DeleteSpending(id));
        assert_eq!(calls[1], Call::ListSpending);
        assert!(matches!(&calls[2], Call::CreateSpending(r) if r.amount == 7.25));
        assert_eq!(calls[3], Call::ListSpending);
    }

    #[test]
    fn invalid_spending_amount_sends_nothing() {
        let api = FakeApi::default();
        let form = SpendingForm {
            amount: "twelve".into(),
            ..Default::default()
        };
        assert!(block_on(create_spending(&api, &form)).is_err());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn non_image_never_reaches_upload() {
        let api = FakeApi::default();
        let feedback = FakeFeedback::default();

        let result = block_on(scan_receipt(&api, &feedback, &"notes.txt".to_string(), "text/plain"));

        assert!(matches!(
            result,
            Err(AppError::Invalid(ValidationError::UnsupportedImage(_)))
        ));
        assert!(api.calls().is_empty());
        assert_eq!(
            *feedback.signals.borrow(),
            vec![Signal::Alert(
                "Please select a valid image file (JPG or PNG)".into()
            )]
        );
    }

    #[test]
    fn upload_is_wrapped_in_loading() {
        let api = FakeApi::default();
        let feedback = FakeFeedback::default();

        let receipt = block_on(scan_receipt(&api, &feedback, &"r.jpg".to_string(), "image/jpeg")).unwrap();

        assert_eq!(receipt.store_name, "Corner Shop");
        assert_eq!(api.calls(), vec![Call::Upload("r.jpg".into())]);
        assert_eq!(
            *feedback.signals.borrow(),
            vec![Signal::LoadingOn, Signal::LoadingOff]
        );
    }

    #[test]
    fn failed_upload_still_hides_loading() {
        let api = FakeApi::failing();
        let feedback = FakeFeedback::default();

        let result = block_on(scan_receipt(&api, &feedback, &"r.png".to_string(), "image/png"));

        assert!(result.is_err());
        assert_eq!(
            *feedback.signals.borrow(),
            vec![Signal::LoadingOn, Signal::LoadingOff]
        );
    }

    #[test]
    fn confirmed_receipt_becomes_spending() {
        let api = FakeApi::default();

        block_on(confirm_receipt(&api, &ocr(), ReceiptTarget::Spending)).unwrap();

        let calls = api.calls();
        let [Call::CreateSpending(request)] = calls.as_slice() else {
            panic!("expected one spending request, got {calls:?}");
        };
        assert_eq!(request.amount, 4.01);
        assert_eq!(request.remark, "Corner Shop");
        assert_eq!(request.category_id, None);
        assert_eq!(request.store_id, None);
    }

    #[test]
    fn confirmed_receipt_can_be_stored_as_receipt() {
        let api = FakeApi::default();

        block_on(confirm_receipt(&api, &ocr(), ReceiptTarget::Receipt)).unwrap();

        let calls = api.calls();
        let [Call::CreateReceipt(request)] = calls.as_slice() else {
            panic!("expected one receipt request, got {calls:?}");
        };
        assert_eq!(request.total_amount, 4.01);
        assert_eq!(request.items.len(), 2);
    }

    #[test]
    fn failures_surface_as_messages() {
        let feedback = FakeFeedback::default();
        let err = AppError::Api(ApiError::Status {
            operation: "fetch spending",
            status: 502,
        });

        report_failure(&feedback, &err);

        assert_eq!(
            *feedback.signals.borrow(),
            vec![Signal::Message("Failed to fetch spending (HTTP 502)".into())]
        );
    }

    #[test]
    fn list_loads_issue_one_request_each() {
        let api = FakeApi::default();
        block_on(load_categories(&api)).unwrap();
        block_on(load_spending(&api)).unwrap();
        block_on(load_receipts(&api)).unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::ListCategories, Call::ListSpending, Call::ListReceipts]
        );
        assert!(is_validation(&AppError::Invalid(ValidationError::BlankCategoryName)).is_some());
    }
}
