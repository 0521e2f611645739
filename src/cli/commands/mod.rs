mod init;
mod location;
mod records;

pub use init::cmd_init_config;
pub use location::cmd_location;
pub use records::cmd_records;
