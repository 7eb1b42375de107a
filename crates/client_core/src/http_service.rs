//! reqwest-backed [`VehicleService`] talking to the registry REST endpoints.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::VehicleCode,
    error::ApiError,
    protocol::{VehicleListQuery, VehiclePage, VehiclePatch},
};
use url::Url;

use crate::{error::ServiceError, VehicleService};

const VEHICLES_PATH: &str = "veiculos";

#[derive(Debug, Clone)]
pub struct HttpVehicleService {
    http: Client,
    base_url: Url,
}

impl HttpVehicleService {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ServiceError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_page(&self, query: &VehicleListQuery) -> Result<VehiclePage, ServiceError> {
        let res = self
            .http
            .get(self.endpoint(VEHICLES_PATH)?)
            .query(query)
            .send()
            .await?;
        let body = ensure_success(res).await?.json::<VehiclePage>().await?;
        Ok(body)
    }

    pub async fn patch_vehicle(
        &self,
        code: VehicleCode,
        patch: &VehiclePatch,
    ) -> Result<(), ServiceError> {
        let res = self
            .http
            .put(self.endpoint(&format!("{VEHICLES_PATH}/{code}"))?)
            .json(patch)
            .send()
            .await?;
        ensure_success(res).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|err| ServiceError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }
}

#[async_trait]
impl VehicleService for HttpVehicleService {
    async fn list_vehicles(&self, query: &VehicleListQuery) -> Result<VehiclePage> {
        Ok(self.fetch_page(query).await?)
    }

    async fn update_vehicle(&self, code: VehicleCode, patch: &VehiclePatch) -> Result<()> {
        Ok(self.patch_vehicle(code, patch).await?)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ServiceError> {
    let invalid = |reason: String| ServiceError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let trimmed = raw.trim();
    // Relative joins replace the last segment unless the base ends with '/'.
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&normalized).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

async fn ensure_success(res: Response) -> Result<Response, ServiceError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.bytes().await.unwrap_or_default();
    let message = ApiError::from_body(&body)
        .map(|err| err.message)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    Err(ServiceError::Status { status, message })
}

#[cfg(test)]
#[path = "tests/http_service_tests.rs"]
mod tests;
