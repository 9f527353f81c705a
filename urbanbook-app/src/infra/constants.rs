//! Application constants

pub mod server {
    pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
}

pub mod identity {
    pub const DEFAULT_APP_ID: &str = "URBANBOOK-DEV";
}

pub mod welcome {
    /// The welcome screen advances slower than the carousel default.
    pub const AUTO_SCROLL_INTERVAL_MS: u64 = 4000;
    pub const DEMO_SECS: u64 = 20;
    /// Simulated viewport: time an animated scroll takes to come to rest.
    pub const SIMULATED_SNAP_MS: u64 = 300;
}

pub mod env {
    pub const SERVER_URL: &str = "URBANBOOK_SERVER_URL";
    pub const IDENTITY_APP_ID: &str = "URBANBOOK_IDENTITY_APP_ID";
    pub const DEMO_SECS: &str = "URBANBOOK_DEMO_SECS";
}

pub mod role_selection {
    pub const AUTO_SCROLL_INTERVAL_MS: u64 = 5000;
}
