//! Wire types for the payment-gateway proxy API.
//!
//! Field names follow the gateway contract verbatim: request bodies
//! use camelCase (`filialId`, `secretKey`, `recipientId`), gateway
//! responses use snake_case (`checkout_url`, `pix_qr_code`). Amounts
//! are always integer minor units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod filial {
    use std::collections::HashMap;

    use super::*;

    /// A payee of a branch, as served by `GET /filiais`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Recebedor {
        pub id: String,
        pub nome: String,
        pub liable: bool,
    }

    /// Branch record without its secret key.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Filial {
        pub nome: String,
        #[serde(rename = "publicKey")]
        pub public_key: String,
        #[serde(default)]
        pub recebedores: Vec<Recebedor>,
    }

    /// `GET /filiais` response: branches keyed by id.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct FiliaisResponse {
        pub success: bool,
        #[serde(default)]
        pub filiais: HashMap<String, Filial>,
        pub error: Option<String>,
    }

    /// `GET /filiais/{id}/secret` response.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SecretResponse {
        pub success: bool,
        #[serde(rename = "secretKey")]
        pub secret_key: Option<String>,
        pub error: Option<String>,
    }
}

pub mod customer {
    use std::collections::HashMap;

    use super::*;

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct Phone {
        pub country_code: String,
        pub area_code: String,
        pub number: String,
    }

    /// Phone book in the gateway's shape (`mobile_phone`/`home_phone`).
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct Phones {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub home_phone: Option<Phone>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub mobile_phone: Option<Phone>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Address {
        pub country: String,
        pub state: String,
        pub city: String,
        pub zip_code: String,
        pub line1: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub line2: Option<String>,
    }

    /// Customer fields shared by inline order customers and the
    /// create endpoint.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Customer {
        pub name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub document: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub document_type: Option<String>,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        pub customer_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub code: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gender: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub birthdate: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub address: Option<Address>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub phones: Option<Phones>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub metadata: Option<HashMap<String, String>>,
    }

    /// `POST /customers` body: inline fields plus the branch id.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CreateCustomerRequest {
        #[serde(rename = "filialId")]
        pub filial_id: String,
        #[serde(flatten)]
        pub customer: Customer,
    }

    /// Customer as echoed back by the gateway.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct CustomerData {
        pub id: String,
        pub name: String,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub document: Option<String>,
        #[serde(default)]
        pub document_type: Option<String>,
        #[serde(rename = "type", default)]
        pub customer_type: Option<String>,
        #[serde(default)]
        pub code: Option<String>,
        #[serde(default)]
        pub created_at: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct Paging {
        pub total: u64,
        #[serde(default)]
        pub previous: Option<String>,
        #[serde(default)]
        pub next: Option<String>,
    }

    /// Inner page of `GET /customers`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct CustomerPage {
        #[serde(default)]
        pub data: Vec<CustomerData>,
        #[serde(default)]
        pub paging: Option<Paging>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CustomerListResponse {
        pub success: bool,
        #[serde(default)]
        pub data: Option<CustomerPage>,
        pub error: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CreateCustomerResponse {
        pub success: bool,
        #[serde(default)]
        pub customer: Option<CustomerData>,
        pub error: Option<String>,
    }
}

pub mod order {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CartItem {
        pub name: String,
        pub description: String,
        /// Minor units.
        pub amount: i64,
        pub default_quantity: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub code: Option<String>,
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum SplitType {
        #[default]
        Percentage,
        Flat,
    }

    /// One split share: percentage points or minor units, per `type`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SplitRule {
        pub recipient_id: String,
        pub amount: i64,
        #[serde(rename = "type")]
        pub split_type: SplitType,
        pub liable: bool,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreditCard {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub card_token: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub card_id: Option<String>,
        pub installments: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub operation_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub statement_descriptor: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Pix {
        /// Seconds until the QR code expires.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub expires_in: Option<u32>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Boleto {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub instructions: Option<String>,
        /// `YYYY-MM-DD`.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub due_at: Option<NaiveDate>,
    }

    /// `POST /` body for hosted payment links.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreatePaymentLinkRequest {
        /// Minor units.
        pub amount: i64,
        pub installments: u32,
        pub items: Vec<CartItem>,
        pub split: Vec<SplitRule>,
        pub secret_key: String,
    }

    /// `POST /orders/{pix|boleto|credit-card}` body.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateOrderRequest {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub code: Option<String>,
        pub items: Vec<CartItem>,
        pub payment_method: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub customer_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub customer: Option<customer::Customer>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        pub split: Vec<SplitRule>,
        pub secret_key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub credit_card: Option<CreditCard>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub pix: Option<Pix>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub boleto: Option<Boleto>,
    }

    /// Flattened gateway response for links and orders alike; only
    /// the fields for the submitted method are populated.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct PaymentResponse {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub checkout_url: Option<String>,
        #[serde(default)]
        pub pix_qr_code: Option<String>,
        #[serde(default)]
        pub pix_qr_code_url: Option<String>,
        #[serde(default)]
        pub boleto_url: Option<String>,
        #[serde(default)]
        pub boleto_barcode: Option<String>,
        #[serde(default)]
        pub boleto_pdf: Option<String>,
        #[serde(default)]
        pub transaction_id: Option<String>,
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub error: Option<String>,
    }

    /// `GET /orders/{id}` status view.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct OrderStatus {
        #[serde(default)]
        pub id: Option<String>,
        #[serde(default)]
        pub code: Option<String>,
        #[serde(default)]
        pub status: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_rules_serialize_with_gateway_field_names() {
        let rule = order::SplitRule {
            recipient_id: "re_x".to_string(),
            amount: 60,
            split_type: order::SplitType::Percentage,
            liable: true,
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["recipientId"], "re_x");
        assert_eq!(json["type"], "percentage");
    }

    #[test]
    fn create_customer_request_flattens_inline_fields() {
        let req = customer::CreateCustomerRequest {
            filial_id: "brauna".to_string(),
            customer: customer::Customer {
                name: "Maria".to_string(),
                document_type: Some("CPF".to_string()),
                ..customer::Customer::default()
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["filialId"], "brauna");
        assert_eq!(json["name"], "Maria");
        assert_eq!(json["documentType"], "CPF");
    }

    #[test]
    fn customer_metadata_only_serializes_when_present() {
        use std::collections::HashMap;

        let bare = customer::Customer {
            name: "Maria".to_string(),
            ..customer::Customer::default()
        };
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("metadata").is_none());

        let tagged = customer::Customer {
            name: "Maria".to_string(),
            metadata: Some(HashMap::from([(
                "origem".to_string(),
                "checkout".to_string(),
            )])),
            ..customer::Customer::default()
        };
        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(json["metadata"]["origem"], "checkout");
    }

    #[test]
    fn filiais_response_parses_branch_map() {
        let body = r#"{
            "success": true,
            "filiais": {
                "brauna": {
                    "nome": "Braúna",
                    "publicKey": "pk_1",
                    "recebedores": [{"id": "re_1", "nome": "Matriz", "liable": true}]
                }
            }
        }"#;
        let parsed: filial::FiliaisResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.filiais["brauna"].recebedores[0].id, "re_1");
        assert!(parsed.error.is_none());
    }
}
