//! Everything that talks to the portal through the browser.

pub mod login;
pub mod scanner;
pub mod selectors;
pub mod session;

pub use login::{ensure_authenticated, LoginStrategy, LOGIN_CHAIN};
pub use scanner::{run_scan_pass, ScanSummary};
pub use session::PortalSession;
