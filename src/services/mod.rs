pub mod auth;
pub mod identity;
pub mod init_data;
