//! Pure checkout core: amount normalization, split reconciliation and
//! the session state that gates a submission.
//!
//! Everything here is deterministic and free of I/O. Transport, UI and
//! credential retrieval live in the client crates; this crate only
//! decides *what* may be submitted.

pub use cart::CartItem;
pub use customer::{CustomerChoice, CustomerInfo, CustomerType, DocumentType};
pub use error::CheckoutError;
pub use money::Money;
pub use order::{CreditCard, OperationType, PaymentMethod, order_code};
pub use session::{Branch, CheckoutSession};
pub use split::{Recipient, SplitEntry, SplitError, SplitMode, SplitSet};

mod cart;
mod customer;
mod error;
mod money;
mod order;
mod session;
mod split;
