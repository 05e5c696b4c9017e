use std::collections::HashMap;

use engine::{
    Branch, CheckoutError, CheckoutSession, CustomerChoice, CustomerInfo, Money, Recipient,
    SplitError, SplitMode,
};

fn directory() -> HashMap<String, Branch> {
    HashMap::from([
        (
            "brauna".to_string(),
            Branch {
                nome: "Braúna".to_string(),
                public_key: "pk_brauna".to_string(),
                recebedores: vec![
                    Recipient {
                        id: "re_matriz".to_string(),
                        nome: "Matriz".to_string(),
                        liable: true,
                    },
                    Recipient {
                        id: "re_parceiro".to_string(),
                        nome: "Parceiro".to_string(),
                        liable: false,
                    },
                ],
            },
        ),
        (
            "minasGerais".to_string(),
            Branch {
                nome: "Minas Gerais".to_string(),
                public_key: "pk_mg".to_string(),
                recebedores: vec![Recipient {
                    id: "re_mg".to_string(),
                    nome: "MG".to_string(),
                    liable: true,
                }],
            },
        ),
    ])
}

fn session_with_directory() -> CheckoutSession {
    let mut session = CheckoutSession::new();
    session.set_branches(directory());
    session
}

#[test]
fn submission_blocked_without_a_branch() {
    let session = session_with_directory();
    assert_eq!(
        session.ready_to_submit(false),
        Err(CheckoutError::MissingBranch)
    );
}

#[test]
fn submission_blocked_until_the_secret_arrives() {
    let mut session = session_with_directory();
    session.select_branch("brauna");
    assert_eq!(
        session.ready_to_submit(false),
        Err(CheckoutError::SecretNotLoaded)
    );
}

#[test]
fn submission_blocked_when_the_split_does_not_reconcile() {
    let mut session = session_with_directory();
    let generation = session.select_branch("brauna");
    session.apply_secret(generation, "sk_brauna".to_string());
    session.set_amount_text("100,00");

    session.split.set_mode(SplitMode::Flat);
    session.split.add_entry().amount = 7_000;
    session.split.add_entry().amount = 2_000;

    assert_eq!(
        session.ready_to_submit(false),
        Err(CheckoutError::Split(SplitError::FlatMismatch {
            expected: Money::new(10_000),
            actual: Money::new(9_000),
        }))
    );

    session.split.set_entry_amount(1, "3000");
    assert!(session.ready_to_submit(false).is_ok());
}

#[test]
fn orders_additionally_require_a_customer() {
    let mut session = session_with_directory();
    let generation = session.select_branch("brauna");
    session.apply_secret(generation, "sk_brauna".to_string());
    session.set_amount_text("50,00");

    session.split.add_entry().amount = 60;
    session.split.add_entry().amount = 40;

    // Fine for a payment link, refused for an order.
    assert!(session.ready_to_submit(false).is_ok());
    assert_eq!(
        session.ready_to_submit(true),
        Err(CheckoutError::MissingCustomer)
    );

    session.customer = CustomerChoice::Existing("cus_123".to_string());
    assert!(session.ready_to_submit(true).is_ok());

    session.customer = CustomerChoice::Inline(CustomerInfo::default());
    assert_eq!(
        session.ready_to_submit(true),
        Err(CheckoutError::MissingCustomer)
    );

    session.customer = CustomerChoice::Inline(CustomerInfo {
        name: "Maria Silva".to_string(),
        ..CustomerInfo::default()
    });
    assert!(session.ready_to_submit(true).is_ok());
}

#[test]
fn switching_branches_invalidates_the_previous_secret() {
    let mut session = session_with_directory();

    let first = session.select_branch("brauna");
    session.apply_secret(first, "sk_brauna".to_string());

    // Branch change while a submission flow is mid-air: the old
    // secret must not leak into the new selection.
    session.select_branch("minasGerais");
    assert_eq!(session.secret_key(), None);
    assert_eq!(
        session.ready_to_submit(false),
        Err(CheckoutError::SecretNotLoaded)
    );
    assert!(!session.apply_secret(first, "sk_brauna".to_string()));
}

#[test]
fn recipients_follow_the_selected_branch() {
    let mut session = session_with_directory();
    assert!(session.recipients().is_empty());

    session.select_branch("brauna");
    assert_eq!(session.recipients().len(), 2);

    session.split.add_entry();
    let recipients = session.recipients().to_vec();
    session.split.bind_recipient(0, "re_matriz", &recipients);
    assert!(session.split.entries[0].liable);
}

#[test]
fn reset_discards_checkout_state_but_keeps_the_directory() {
    let mut session = session_with_directory();
    let generation = session.select_branch("brauna");
    session.apply_secret(generation, "sk_brauna".to_string());
    session.set_amount_text("10,00");
    session.split.add_entry().amount = 100;
    session.customer = CustomerChoice::Existing("cus_123".to_string());

    session.reset();
    assert_eq!(session.amount(), Money::ZERO);
    assert!(session.split.entries.is_empty());
    assert!(!session.customer.is_present());
    assert_eq!(session.branches().len(), 2);
    assert_eq!(session.secret_key(), Some("sk_brauna"));
}
