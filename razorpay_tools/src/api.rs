use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::RazorpayConfig,
    data_objects::{NewOrderRequest, RazorpayOrder},
    RazorpayApiError,
};

#[derive(Clone)]
pub struct RazorpayApi {
    config: RazorpayConfig,
    client: Arc<Client>,
}

impl RazorpayApi {
    pub fn new(config: RazorpayConfig) -> Result<Self, RazorpayApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RazorpayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// The public key id for this account. Clients need it to open the checkout widget.
    pub fn key_id(&self) -> &str {
        &self.config.key_id
    }

    /// Creates a new order with the gateway and returns the provider-issued order record.
    ///
    /// Fails with [`RazorpayApiError::InvalidAmount`] if the amount is not positive, and
    /// [`RazorpayApiError::GatewayUnavailable`] if the provider cannot be reached.
    pub async fn create_order(&self, order: NewOrderRequest) -> Result<RazorpayOrder, RazorpayApiError> {
        if order.amount <= 0 {
            return Err(RazorpayApiError::InvalidAmount(format!("{} paise", order.amount)));
        }
        let result: RazorpayOrder = self.rest_query(Method::POST, "/v1/orders", Some(order)).await?;
        debug!("💳️ Gateway order {} created ({} {})", result.id, result.amount, result.currency);
        Ok(result)
    }

    async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, RazorpayApiError> {
        let url = format!("{}{path}", self.config.api_url);
        trace!("💳️ Sending REST query: {url}");
        let mut req = self
            .client
            .request(method, url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.reveal()));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| RazorpayApiError::GatewayUnavailable(e.to_string()))?;
        if response.status().is_success() {
            trace!("💳️ REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| RazorpayApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| RazorpayApiError::GatewayUnavailable(e.to_string()))?;
            Err(RazorpayApiError::QueryError { status, message })
        }
    }
}

#[cfg(test)]
mod test {
    use dpg_common::Paise;

    use super::*;
    use crate::data_objects::OrderNotes;

    #[tokio::test]
    async fn create_order_rejects_non_positive_amounts() {
        let api = RazorpayApi::new(RazorpayConfig::default()).expect("client should build");
        let order = NewOrderRequest::new(Paise::from(0), "receipt_1".into(), OrderNotes::default());
        let err = api.create_order(order).await.expect_err("zero amount must be rejected");
        assert!(matches!(err, RazorpayApiError::InvalidAmount(_)));
    }
}
