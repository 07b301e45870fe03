pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::AccountError;
pub use models::Account;
pub use models::AccountId;
pub use service::AccountService;
