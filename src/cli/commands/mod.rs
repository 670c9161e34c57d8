mod init;
mod search;
mod shell;

pub use init::cmd_init;
pub use search::{SearchArgs, cmd_search_flights};
pub use shell::cmd_shell;
