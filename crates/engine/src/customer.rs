use serde::{Deserialize, Serialize};

/// Accepted identity documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    #[default]
    Cpf,
    Cnpj,
    Passport,
}

impl DocumentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Passport => "PASSPORT",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    #[default]
    Individual,
    Company,
}

impl CustomerType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Company => "company",
        }
    }
}

/// Inline customer record entered on the checkout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub document: String,
    pub document_type: DocumentType,
    pub customer_type: CustomerType,
}

impl CustomerInfo {
    /// A record is usable once it at least names the customer.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Which customer a submission references. Existing id and inline
/// record are mutually exclusive per submission.
#[derive(Clone, Debug, Default)]
pub enum CustomerChoice {
    #[default]
    None,
    Existing(String),
    Inline(CustomerInfo),
}

impl CustomerChoice {
    /// Whether the choice satisfies a method that needs customer data.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::None => false,
            Self::Existing(id) => !id.trim().is_empty(),
            Self::Inline(info) => info.is_filled(),
        }
    }
}
