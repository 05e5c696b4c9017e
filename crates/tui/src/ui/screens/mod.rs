pub mod checkout;
pub mod customers;
