//! Errors the checkout core can raise before submission.
//!
//! Parse errors never appear here: malformed amount text is
//! normalized to zero by design. Everything below is a validation
//! failure that blocks the current submission with a user-facing
//! message and leaves the session usable.
use thiserror::Error;

use crate::split::SplitError;

/// Reasons a submission is refused before any HTTP call is issued.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Selecione uma filial!")]
    MissingBranch,
    #[error("Chave secreta ainda não carregada. Aguarde e tente novamente.")]
    SecretNotLoaded,
    #[error("Informe os dados do cliente!")]
    MissingCustomer,
    #[error(transparent)]
    Split(#[from] SplitError),
}
