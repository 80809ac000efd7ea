//! HTTP implementation of the release backend client

use super::request::{require, require_release, require_rollback_revision};
use super::{ChartValuesQuery, ClientError, ClientResult, ReconfigureRequest, ReleaseApi};
use crate::constants::{API_ROOT, KUBE_CONTEXT_HEADER};
use crate::models::{
    ChartVersionOption, LatestVersionResult, Release, ReleaseInfoKind, ResourceRef, TestResult,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// Release backend client speaking the dashboard's REST API
///
/// No request timeout is configured: failures surface only as backend or
/// transport errors.
#[derive(Debug, Clone)]
pub struct HttpReleaseClient {
    client: reqwest::Client,
    base_url: Url,
    kube_context: Option<String>,
}

impl HttpReleaseClient {
    /// Create a client for the backend at `server`
    pub fn new(server: &str, kube_context: Option<String>) -> Result<Self> {
        let base_url =
            Url::parse(server).with_context(|| format!("Invalid server URL: {}", server))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Server URL cannot be used as a base: {}", server);
        }

        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        tracing::debug!("Created release client for: {}", base_url);

        Ok(Self {
            client,
            base_url,
            kube_context: kube_context.filter(|c| !c.is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn kube_context(&self) -> Option<&str> {
        self.kube_context.as_deref()
    }

    /// Build an API URL from percent-encoded path segments and query pairs
    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_ROOT).extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    fn release_url(&self, namespace: &str, release: &str, rest: &[&str]) -> Url {
        let mut segments = vec!["releases", namespace, release];
        segments.extend_from_slice(rest);
        self.url(&segments, &[])
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.kube_context {
            Some(ctx) => req.header(KUBE_CONTEXT_HEADER, ctx),
            None => req,
        }
    }

    /// Send a request and turn non-success statuses into `ClientError`s
    async fn send(&self, req: RequestBuilder, what: &str) -> ClientResult<Response> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!("{} failed to reach backend: {}", what, e);
            ClientError::BackendUnavailable(e.to_string())
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = ClientError::from_status(status.as_u16(), &body);
        tracing::warn!("{} failed (status: {}): {}", what, status, err);
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> ClientResult<T> {
        tracing::debug!("{}: GET {}", what, url);
        let resp = self.send(self.request(Method::GET, url), what).await?;
        Ok(resp.json().await?)
    }

    async fn get_text(&self, url: Url, what: &str) -> ClientResult<String> {
        tracing::debug!("{}: GET {}", what, url);
        let resp = self.send(self.request(Method::GET, url), what).await?;
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl ReleaseApi for HttpReleaseClient {
    async fn list_releases(&self) -> ClientResult<Vec<Release>> {
        let releases: Option<Vec<Release>> =
            self.get_json(self.url(&["releases"], &[]), "List releases").await?;
        Ok(releases.unwrap_or_default())
    }

    async fn get_release(&self, namespace: &str, release: &str) -> ClientResult<Release> {
        let history = self.get_history(namespace, release).await?;
        super::latest_revision(history).ok_or_else(|| {
            ClientError::NotFound(format!("release {}/{} has no revisions", namespace, release))
        })
    }

    async fn get_history(&self, namespace: &str, release: &str) -> ClientResult<Vec<Release>> {
        require_release(namespace, release)?;
        let history: Option<Vec<Release>> = self
            .get_json(
                self.release_url(namespace, release, &["history"]),
                "Get history",
            )
            .await?;
        Ok(history.unwrap_or_default())
    }

    async fn get_resources(
        &self,
        namespace: &str,
        release: &str,
    ) -> ClientResult<Vec<ResourceRef>> {
        require_release(namespace, release)?;
        let mut url = self.release_url(namespace, release, &["resources"]);
        url.query_pairs_mut().append_pair("health", "true");
        let resources: Option<Vec<ResourceRef>> = self.get_json(url, "Get resources").await?;
        Ok(resources.unwrap_or_default())
    }

    async fn get_release_info(
        &self,
        namespace: &str,
        release: &str,
        kind: ReleaseInfoKind,
        revision: u32,
        user_defined_only: bool,
    ) -> ClientResult<String> {
        require_release(namespace, release)?;
        let mut url = self.release_url(namespace, release, &[kind.as_str()]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("revision", &revision.to_string());
            if user_defined_only {
                pairs.append_pair("userDefined", "true");
            }
        }
        self.get_text(url, "Get release info").await
    }

    async fn get_latest_version(
        &self,
        chart_name: &str,
    ) -> ClientResult<Option<LatestVersionResult>> {
        require(chart_name, "chart name")?;
        let url = self.url(
            &["repositories", "latestver"],
            &[("name", chart_name.to_string())],
        );
        let matches: Option<Vec<LatestVersionResult>> =
            self.get_json(url, "Get latest version").await?;
        Ok(matches.and_then(|m| m.into_iter().next()))
    }

    async fn get_versions(&self, chart_name: &str) -> ClientResult<Vec<ChartVersionOption>> {
        require(chart_name, "chart name")?;
        let url = self.url(
            &["repositories", "versions"],
            &[("name", chart_name.to_string())],
        );
        let versions: Option<Vec<ChartVersionOption>> =
            self.get_json(url, "Get versions").await?;
        Ok(versions.unwrap_or_default())
    }

    async fn get_chart_values(&self, query: &ChartValuesQuery) -> ClientResult<String> {
        query.validate()?;
        let url = self.url(
            &["repositories", "values"],
            &[
                ("chart", query.chart_ref()),
                ("version", query.version.clone()),
                ("namespace", query.namespace.clone()),
            ],
        );
        self.get_text(url, "Get chart values").await
    }

    async fn run_tests(&self, namespace: &str, release: &str) -> ClientResult<TestResult> {
        require_release(namespace, release)?;
        let url = self.release_url(namespace, release, &["test"]);
        tracing::debug!("Run tests: POST {}", url);
        let resp = self
            .send(self.request(Method::POST, url), "Run tests")
            .await?;
        let output = resp.text().await?;
        tracing::info!("Tests finished for {}/{}", namespace, release);
        Ok(TestResult(output))
    }

    async fn rollback(&self, namespace: &str, release: &str, revision: u32) -> ClientResult<()> {
        require_release(namespace, release)?;
        require_rollback_revision(revision)?;
        let url = self.release_url(namespace, release, &["rollback"]);
        tracing::debug!("Rollback: POST {} (revision {})", url, revision);
        let req = self
            .request(Method::POST, url)
            .form(&[("revision", revision.to_string())]);
        self.send(req, "Rollback").await?;
        tracing::info!(
            "Rolled back {}/{} from revision {}",
            namespace,
            release,
            revision
        );
        Ok(())
    }

    async fn reconfigure(&self, request: &ReconfigureRequest) -> ClientResult<serde_json::Value> {
        request.validate()?;
        let url = self.release_url(&request.namespace, &request.release, &[]);
        tracing::debug!(
            "Reconfigure: POST {} (chart {}, version {})",
            url,
            request.chart_ref(),
            request.version
        );

        let form = reqwest::multipart::Form::new()
            .text("preview", "false")
            .text("chart", request.chart_ref())
            .text("version", request.version.clone())
            .text("values", request.user_values.clone());
        let resp = self
            .send(self.request(Method::POST, url).multipart(form), "Reconfigure")
            .await?;

        // Some backend versions answer with an empty body
        let body = resp.text().await?;
        let state = if body.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body)
                .map_err(|e| ClientError::Unknown(format!("Failed to decode response: {}", e)))?
        };

        tracing::info!(
            "Reconfigured {}/{} to {}@{}",
            request.namespace,
            request.release,
            request.chart_ref(),
            request.version
        );
        Ok(state)
    }

    async fn uninstall(&self, namespace: &str, release: &str) -> ClientResult<()> {
        require_release(namespace, release)?;
        let url = self.release_url(namespace, release, &[]);
        tracing::debug!("Uninstall: DELETE {}", url);
        self.send(self.request(Method::DELETE, url), "Uninstall")
            .await?;
        tracing::info!("Uninstalled {}/{}", namespace, release);
        Ok(())
    }
}
