use api_types::{
    customer::{CreateCustomerRequest, CreateCustomerResponse, CustomerListResponse},
    filial::{FiliaisResponse, SecretResponse},
    order::{CreateOrderRequest, CreatePaymentLinkRequest, OrderStatus, PaymentResponse},
};
use engine::PaymentMethod;
use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    NotFound,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Filters for `GET /customers`.
#[derive(Debug, Default, Clone)]
pub struct CustomerQuery {
    pub page: u32,
    pub size: u32,
    pub name: Option<String>,
    pub document: Option<String>,
    pub email: Option<String>,
}

/// Thin reqwest wrapper around the gateway proxy. One method per
/// endpoint, no retries: a failed call surfaces once and the caller
/// clears its loading flag.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn decode<T: DeserializeOwned>(
        res: reqwest::Response,
    ) -> std::result::Result<T, ClientError> {
        if res.status().is_success() {
            return res.json::<T>().await.map_err(ClientError::Transport);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        tracing::warn!(%status, body, "gateway request failed");

        let err = match status.as_u16() {
            401 | 403 => ClientError::Unauthorized,
            404 => ClientError::NotFound,
            400 | 422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        };
        Err(err)
    }

    /// `GET /filiais` — the branch directory, without secrets.
    pub async fn filiais_list(&self) -> std::result::Result<FiliaisResponse, ClientError> {
        let endpoint = self.endpoint("filiais")?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    /// `GET /filiais/{id}/secret` — lazy secret fetch for one branch.
    pub async fn filial_secret(
        &self,
        filial_id: &str,
    ) -> std::result::Result<SecretResponse, ClientError> {
        let endpoint = self.endpoint(&format!("filiais/{filial_id}/secret"))?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    /// `GET /customers` — paginated customer listing for a branch.
    pub async fn customers_list(
        &self,
        filial_id: &str,
        query: &CustomerQuery,
    ) -> std::result::Result<CustomerListResponse, ClientError> {
        let endpoint = self.endpoint("customers")?;
        let mut params: Vec<(&str, String)> = vec![
            ("filialId", filial_id.to_string()),
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(name) = &query.name {
            params.push(("name", name.clone()));
        }
        if let Some(document) = &query.document {
            params.push(("document", document.clone()));
        }
        if let Some(email) = &query.email {
            params.push(("email", email.clone()));
        }

        let res = self
            .http
            .get(endpoint)
            .query(&params)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    /// `POST /customers` — create a customer on the gateway.
    pub async fn customer_create(
        &self,
        payload: &CreateCustomerRequest,
    ) -> std::result::Result<CreateCustomerResponse, ClientError> {
        let endpoint = self.endpoint("customers")?;
        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    /// `POST /` — create a hosted payment link.
    pub async fn payment_link_create(
        &self,
        payload: &CreatePaymentLinkRequest,
    ) -> std::result::Result<PaymentResponse, ClientError> {
        let endpoint = self.endpoint("")?;
        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    /// `POST /orders/{pix|boleto|credit-card}` — create an order. The
    /// path is chosen by exhaustive match on the payment method;
    /// payment links never reach this call.
    pub async fn order_create(
        &self,
        method: &PaymentMethod,
        payload: &CreateOrderRequest,
    ) -> std::result::Result<PaymentResponse, ClientError> {
        let path = match method {
            PaymentMethod::Pix { .. } => "orders/pix",
            PaymentMethod::Boleto { .. } => "orders/boleto",
            PaymentMethod::CreditCard(_) => "orders/credit-card",
            PaymentMethod::PaymentLink { .. } => {
                return Err(ClientError::Validation(
                    "payment links go through payment_link_create".to_string(),
                ));
            }
        };

        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    /// `GET /orders/{id}` — order status, authorized with the branch
    /// secret exactly as the gateway expects it.
    pub async fn order_status(
        &self,
        order_id: &str,
        secret_key: &str,
    ) -> std::result::Result<OrderStatus, ClientError> {
        let endpoint = self.endpoint(&format!("orders/{order_id}"))?;
        let res = self
            .http
            .get(endpoint)
            .header("Authorization", format!("Basic {secret_key}"))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }
}

/// User-facing message for a failed gateway call. Transport problems
/// collapse into one generic line; the session stays usable.
pub fn message_for_error(err: ClientError) -> String {
    match err {
        ClientError::Unauthorized => "Credenciais inválidas para esta filial.".to_string(),
        ClientError::NotFound => "Recurso não encontrado.".to_string(),
        ClientError::Validation(message) => format!("Erro de validação: {message}"),
        ClientError::Server(message) => format!("Erro do servidor: {message}"),
        ClientError::Transport(err) => {
            tracing::warn!(error = %err, "transport failure");
            "Erro de conexão. Verifique a rede e tente novamente.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_unparsable_base_url() {
        let err = Client::new("not a url").unwrap_err();
        assert!(matches!(err, AppError::BaseUrl(_)), "err: {err}");
    }

    #[test]
    fn joins_endpoints_onto_the_base_url() {
        let client = Client::new("http://127.0.0.1:8080/").unwrap();
        let url = client.endpoint("filiais/brauna/secret").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/filiais/brauna/secret");
    }
}
