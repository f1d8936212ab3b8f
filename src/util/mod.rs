pub mod jwt;
pub mod password;
pub mod logger;
pub mod error;
pub mod csv_export;
