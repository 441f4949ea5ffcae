//! Outbound product creation (`POST /products`).

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use storefront_auth::Session;
use storefront_products::{FileHandle, FileSource, ProductPayload};

use crate::config::ClientConfig;
use crate::error::SubmissionError;
use crate::http::{build_client, rejection_message};

/// Backend seam for product creation. One call is one request; no retries.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn create_product(
        &self,
        payload: &ProductPayload,
        session: &Session,
    ) -> Result<(), SubmissionError>;
}

/// `ProductApi` over HTTP: a single multipart request with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    url: String,
}

impl HttpProductApi {
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            url: config.endpoint("/products"),
        })
    }

    /// Build the multipart body: `name`, `price`, `quantity`, `userId`, then
    /// one `pictures` part per file in selection order.
    pub async fn multipart_body(
        payload: &ProductPayload,
        session: &Session,
    ) -> Result<Form, SubmissionError> {
        let mut form = Form::new()
            .text("name", payload.name.clone())
            .text("price", payload.price_field())
            .text("quantity", payload.quantity_field())
            .text("userId", session.user_id().to_string());

        for picture in &payload.pictures {
            form = form.part("pictures", picture_part(picture).await?);
        }

        Ok(form)
    }
}

async fn picture_part(picture: &FileHandle) -> Result<Part, SubmissionError> {
    let bytes = match picture.source() {
        FileSource::Memory(bytes) => bytes.to_vec(),
        FileSource::Disk(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| SubmissionError::ReadPicture {
                    path: path.clone(),
                    source,
                })?
        }
    };

    Part::bytes(bytes)
        .file_name(picture.name().to_string())
        .mime_str(picture.content_type())
        .map_err(|e| SubmissionError::Network(e.to_string()))
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn create_product(
        &self,
        payload: &ProductPayload,
        session: &Session,
    ) -> Result<(), SubmissionError> {
        let form = Self::multipart_body(payload, session).await?;

        tracing::info!(
            url = %self.url,
            name = %payload.name,
            pictures = payload.pictures.len(),
            "submitting product"
        );

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(session.token().as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(SubmissionError::ServerRejected {
            status: status.as_u16(),
            message: rejection_message(status, &body),
        })
    }
}
