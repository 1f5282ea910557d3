//! Telegram host integration
//!
//! Init data parsing and the injected shell capability.

pub mod init_data;
pub mod shell;

pub use init_data::{HostSession, HostUser};
pub use shell::{DetachedShell, HostShell};
