use async_trait::async_trait;
use reqwest::{Method, Request, Response, Url};

/// Transport for remote uploads.
///
/// Implementors only provide [`HttpClient::execute`]; [`HttpClient::get`]
/// builds the GET request and turns non-2xx statuses into errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;

    async fn get(&self, url: Url) -> reqwest::Result<Response> {
        self.execute(Request::new(Method::GET, url))
            .await?
            .error_for_status()
    }
}
