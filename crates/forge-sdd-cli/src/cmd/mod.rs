pub mod audit;
pub mod init;
pub mod prompt;
pub mod template;
pub mod update;
pub mod validate;
