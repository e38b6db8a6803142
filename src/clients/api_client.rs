use async_trait::async_trait;
use headers::{Authorization, HeaderMap, HeaderMapExt};
use log::{error, info};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::auth::Credentials;
use crate::models::errors::HttpError;
use crate::models::work::{CategoryId, Work, WorkId};
use crate::preview::ImageFile;

/// Status plus the parsed body, returned even for non-success statuses.
#[derive(Debug, Clone)]
pub struct JsonReply {
    pub data: serde_json::Value,
    pub status: StatusCode,
}

#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub status: StatusCode,
    pub body: Option<T>,
}

impl<T> Reply<T> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[derive(Debug, Clone)]
pub struct NewWork {
    pub image: ImageFile,
    pub title: String,
    pub category: CategoryId,
}

/// Remote operations the gallery needs.
///
/// `fetch_works` and `login` swallow transport failures into `None`; the
/// mutating calls report them so the caller can tell them apart from a
/// rejected request.
#[async_trait]
pub trait WorksApi: Send + Sync {
    async fn fetch_works(&self) -> Option<Vec<Work>>;

    async fn login(&self, credentials: &Credentials) -> Option<JsonReply>;

    async fn create_work(&self, work: &NewWork, token: &str) -> Result<Reply<Work>, HttpError>;

    async fn delete_work(&self, id: WorkId, token: &str) -> Result<Reply<()>, HttpError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let result = match self.client.get(self.url(path)).send().await {
            Ok(result) => result,
            Err(err) => {
                error!("GET {} failed: {}", self.url(path), err);
                return None;
            }
        };

        info!("GET {} {}", result.url(), result.status());
        if !result.status().is_success() {
            return None;
        }

        result.json::<T>().await
            .map_err(|err| error!("GET {}: invalid body: {}", self.url(path), err))
            .ok()
    }

    pub async fn post_json<B: Serialize + ?Sized + Sync>(&self, path: &str, body: &B) -> Option<JsonReply> {
        let result = match self.client.post(self.url(path)).json(body).send().await {
            Ok(result) => result,
            Err(err) => {
                error!("POST {} failed: {}", self.url(path), err);
                return None;
            }
        };

        let status = result.status();
        info!("POST {} {}", result.url(), status);

        result.json::<serde_json::Value>().await
            .map(|data| JsonReply { data, status })
            .map_err(|err| error!("POST {}: invalid body: {}", self.url(path), err))
            .ok()
    }

    /// Content type is left to the multipart encoder so the boundary is set.
    pub async fn post_multipart(&self, path: &str, form: Form, token: &str) -> Result<reqwest::Response, HttpError> {
        let result = self.client.post(self.url(path))
            .headers(self.auth_header(token)?)
            .multipart(form)
            .send().await?;

        info!("POST {} {}", result.url(), result.status());
        Ok(result)
    }

    pub async fn delete_resource(&self, path: &str, token: &str) -> Result<reqwest::Response, HttpError> {
        let result = self.client.delete(self.url(path))
            .headers(self.auth_header(token)?)
            .send().await?;

        info!("DELETE {} {}", result.url(), result.status());
        Ok(result)
    }

    fn auth_header(&self, token: &str) -> Result<HeaderMap, HttpError> {
        let auth = Authorization::bearer(token)
            .map_err(|err| HttpError { message: format!("invalid bearer token: {}", err) })?;

        let mut headers = HeaderMap::new();
        headers.typed_insert(auth);
        Ok(headers)
    }
}

#[async_trait]
impl WorksApi for ApiClient {
    async fn fetch_works(&self) -> Option<Vec<Work>> {
        self.fetch_json("works").await
    }

    async fn login(&self, credentials: &Credentials) -> Option<JsonReply> {
        self.post_json("users/login", credentials).await
    }

    async fn create_work(&self, work: &NewWork, token: &str) -> Result<Reply<Work>, HttpError> {
        let image = Part::bytes(work.image.bytes.to_vec())
            .file_name(work.image.file_name.clone())
            .mime_str(&work.image.mime)?;
        let form = Form::new()
            .part("image", image)
            .text("title", work.title.clone())
            .text("category", work.category.to_string());

        let result = self.post_multipart("works", form, token).await?;
        let status = result.status();
        if !status.is_success() {
            return Ok(Reply { status, body: None });
        }

        let created = result.json::<Work>().await?;
        Ok(Reply { status, body: Some(created) })
    }

    async fn delete_work(&self, id: WorkId, token: &str) -> Result<Reply<()>, HttpError> {
        let result = self.delete_resource(&format!("works/{}", id), token).await?;
        Ok(Reply { status: result.status(), body: None })
    }
}
