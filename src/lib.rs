//*** START FILE: src/lib.rs ***//

// Declare all modules that are part of this library
pub mod config;
pub mod types {
    pub mod analysis;
    pub mod chat;
    pub mod media;
    pub mod profile;
    pub mod weather;
}
pub mod api;
pub mod session;
pub mod ui {
    pub mod app;
    pub mod chat;
    pub mod dashboard;
    pub mod home;
    pub mod overview;
    pub mod results;
    pub mod scan;
    pub mod tools;
    pub mod widgets;
}

pub use config::Config;
pub use ui::app::AgroScanApp;

//*** END FILE: src/lib.rs ***//
