//! REST client for the spending API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use web_sys::{File, FormData};

use crate::error::ApiError;
use crate::models::{
    Category, CreateCategoryRequest, CreateReceiptRequest, CreateSpendingRequest, Receipt,
    ReceiptOcr, Spending, UpdateCategoryRequest,
};

/// One method per endpoint. `Image` is whatever the implementation uploads.
#[allow(async_fn_in_trait)]
pub trait SpendingApi {
    type Image;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn create_category(&self, request: &CreateCategoryRequest) -> Result<(), ApiError>;
    async fn update_category(
        &self,
        id: Uuid,
        request: &UpdateCategoryRequest,
    ) -> Result<(), ApiError>;
    async fn delete_category(&self, id: Uuid) -> Result<(), ApiError>;

    async fn list_spending(&self) -> Result<Vec<Spending>, ApiError>;
    async fn create_spending(&self, request: &CreateSpendingRequest) -> Result<Spending, ApiError>;
    async fn delete_spending(&self, id: Uuid) -> Result<(), ApiError>;

    async fn list_receipts(&self) -> Result<Vec<Receipt>, ApiError>;
    async fn create_receipt(&self, request: &CreateReceiptRequest) -> Result<Receipt, ApiError>;
    async fn upload_receipt(&self, image: &Self::Image) -> Result<ReceiptOcr, ApiError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn execute(
    request: Result<Request, gloo_net::Error>,
    operation: &'static str,
) -> Result<Response, ApiError> {
    let request = request.map_err(|e| ApiError::transport(operation, e))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::transport(operation, e))?;
    if !response.ok() {
        tracing::warn!(operation, status = response.status(), "request rejected");
        return Err(ApiError::Status {
            operation,
            status: response.status(),
        });
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    operation: &'static str,
) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::decode(operation, e))
}

impl SpendingApi for HttpApi {
    type Image = File;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        const OP: &str = "fetch categories";
        let response = execute(Request::get(&self.url("/categories")).build(), OP).await?;
        read_json(response, OP).await
    }

    async fn create_category(&self, request: &CreateCategoryRequest) -> Result<(), ApiError> {
        let builder = Request::post(&self.url("/categories")).json(request);
        execute(builder, "create category").await?;
        Ok(())
    }

    async fn update_category(
        &self,
        id: Uuid,
        request: &UpdateCategoryRequest,
    ) -> Result<(), ApiError> {
        let builder = Request::put(&self.url(&format!("/categories/{id}"))).json(request);
        execute(builder, "update category").await?;
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ApiError> {
        let builder = Request::delete(&self.url(&format!("/categories/{id}"))).build();
        execute(builder, "delete category").await?;
        Ok(())
    }

    async fn list_spending(&self) -> Result<Vec<Spending>, ApiError> {
        const OP: &str = "fetch spending";
        let response = execute(Request::get(&self.url("/spending")).build(), OP).await?;
        read_json(response, OP).await
    }

    async fn create_spending(&self, request: &CreateSpendingRequest) -> Result<Spending, ApiError> {
        const OP: &str = "create spending";
        let response = execute(Request::post(&self.url("/spending")).json(request), OP).await?;
        read_json(response, OP).await
    }

    async fn delete_spending(&self, id: Uuid) -> Result<(), ApiError> {
        let builder = Request::delete(&self.url(&format!("/spending/{id}"))).build();
        execute(builder, "delete spending").await?;
        Ok(())
    }

    async fn list_receipts(&self) -> Result<Vec<Receipt>, ApiError> {
        const OP: &str = "fetch receipts";
        let response = execute(Request::get(&self.url("/api/receipts")).build(), OP).await?;
        read_json(response, OP).await
    }

    async fn create_receipt(&self, request: &CreateReceiptRequest) -> Result<Receipt, ApiError> {
        const OP: &str = "create receipt";
        let response = execute(Request::post(&self.url("/api/receipts")).json(request), OP).await?;
        read_json(response, OP).await
    }

    async fn upload_receipt(&self, image: &File) -> Result<ReceiptOcr, ApiError> {
        const OP: &str = "upload receipt";
        let form = FormData::new().map_err(|e| ApiError::transport(OP, format!("{e:?}")))?;
        form.append_with_blob_and_filename("file", image, &image.name())
            .map_err(|e| ApiError::transport(OP, format!("{e:?}")))?;

        let builder = Request::post(&self.url("/api/receipts/upload")).body(form);
        let response = execute(builder, OP).await?;
        read_json(response, OP).await
    }
}
