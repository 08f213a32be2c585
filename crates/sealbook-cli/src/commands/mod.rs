pub mod generate;
pub mod init;
pub mod misc;
pub mod records;
pub mod transfer;
pub mod vault;
