use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    CartItem, CheckoutError, CustomerChoice, Money, SplitSet,
    split::Recipient,
};

/// A merchant sub-account with its own recipients and credentials.
///
/// The secret key is deliberately absent: it is fetched lazily per
/// selection and lives on the session, never on the cached directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Branch {
    pub nome: String,
    pub public_key: String,
    pub recebedores: Vec<Recipient>,
}

/// All mutable state of one in-progress checkout, owned explicitly by
/// the UI controller and passed by reference — never ambient globals.
///
/// Branch/recipient data is read-only reference data from the
/// directory; cart, split and customer are discarded on [`reset`].
///
/// [`reset`]: CheckoutSession::reset
#[derive(Debug, Default)]
pub struct CheckoutSession {
    branches: HashMap<String, Branch>,
    selected_branch: Option<String>,
    secret_key: Option<String>,
    secret_generation: u64,
    pub item: CartItem,
    pub split: SplitSet,
    pub customer: CustomerChoice,
}

impl CheckoutSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            item: CartItem::purchase(Money::ZERO),
            ..Self::default()
        }
    }

    /// Installs the branch directory, fetched once per session.
    pub fn set_branches(&mut self, branches: HashMap<String, Branch>) {
        self.branches = branches;
    }

    #[must_use]
    pub fn branches(&self) -> &HashMap<String, Branch> {
        &self.branches
    }

    #[must_use]
    pub fn selected_branch_id(&self) -> Option<&str> {
        self.selected_branch.as_deref()
    }

    #[must_use]
    pub fn branch(&self) -> Option<&Branch> {
        self.selected_branch
            .as_ref()
            .and_then(|id| self.branches.get(id))
    }

    /// Recipient list of the selected branch, empty until one is
    /// chosen.
    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        self.branch().map(|b| b.recebedores.as_slice()).unwrap_or(&[])
    }

    /// Selects a branch, clearing any previously fetched secret and
    /// bumping the generation counter. Returns the generation the
    /// caller must pass back with the lazily fetched secret, so a
    /// response for a superseded selection is discarded.
    pub fn select_branch(&mut self, branch_id: &str) -> u64 {
        self.selected_branch = Some(branch_id.to_string());
        self.secret_key = None;
        self.secret_generation += 1;
        self.secret_generation
    }

    /// Installs a lazily fetched secret. A stale generation means the
    /// branch changed while the fetch was in flight; the response is
    /// dropped and the current selection keeps waiting for its own.
    pub fn apply_secret(&mut self, generation: u64, secret_key: String) -> bool {
        if generation != self.secret_generation {
            return false;
        }
        self.secret_key = Some(secret_key);
        true
    }

    #[must_use]
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    #[must_use]
    pub fn secret_generation(&self) -> u64 {
        self.secret_generation
    }

    /// Normalizes raw amount text onto the synthetic cart item.
    pub fn set_amount_text(&mut self, raw: &str) {
        self.item.amount = Money::parse_brl(raw);
    }

    /// The cart's normalized total.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.item.amount
    }

    /// The gate evaluated before submission. Only a fully consistent
    /// state reaches the wire: branch selected, secret loaded, split
    /// reconciled against the total and — when the method asks for it
    /// — customer data present. Any failure aborts with a message and
    /// no HTTP call is issued.
    pub fn ready_to_submit(&self, needs_customer: bool) -> Result<(), CheckoutError> {
        if self.branch().is_none() {
            return Err(CheckoutError::MissingBranch);
        }
        if self.secret_key.is_none() {
            return Err(CheckoutError::SecretNotLoaded);
        }
        self.split.validate(self.amount())?;
        if needs_customer && !self.customer.is_present() {
            return Err(CheckoutError::MissingCustomer);
        }
        Ok(())
    }

    /// Discards the checkout-owned state after a submission or when
    /// navigating away. The branch directory and the current secret
    /// survive; they are reference data for the next checkout.
    pub fn reset(&mut self) {
        self.item = CartItem::purchase(Money::ZERO);
        self.split = SplitSet::new();
        self.customer = CustomerChoice::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch() -> Branch {
        Branch {
            nome: "Braúna".to_string(),
            public_key: "pk_test".to_string(),
            recebedores: vec![Recipient {
                id: "re_matriz".to_string(),
                nome: "Matriz".to_string(),
                liable: true,
            }],
        }
    }

    #[test]
    fn selecting_a_branch_clears_the_secret() {
        let mut session = CheckoutSession::new();
        session.set_branches(HashMap::from([("brauna".to_string(), branch())]));

        let generation = session.select_branch("brauna");
        assert!(session.apply_secret(generation, "sk_test".to_string()));
        assert_eq!(session.secret_key(), Some("sk_test"));

        session.select_branch("brauna");
        assert_eq!(session.secret_key(), None);
    }

    #[test]
    fn stale_secret_responses_are_discarded() {
        let mut session = CheckoutSession::new();
        session.set_branches(HashMap::from([("brauna".to_string(), branch())]));

        let first = session.select_branch("brauna");
        let second = session.select_branch("brauna");

        assert!(!session.apply_secret(first, "sk_stale".to_string()));
        assert_eq!(session.secret_key(), None);

        assert!(session.apply_secret(second, "sk_fresh".to_string()));
        assert_eq!(session.secret_key(), Some("sk_fresh"));
    }

    #[test]
    fn amount_text_is_normalized_onto_the_cart() {
        let mut session = CheckoutSession::new();
        session.set_amount_text("1.234,56");
        assert_eq!(session.amount().minor(), 123_456);
        assert_eq!(session.item.amount.minor(), 123_456);
    }
}
