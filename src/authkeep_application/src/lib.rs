pub mod account_service;
pub mod emails;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_service::AccountService;
pub use use_cases::*;
