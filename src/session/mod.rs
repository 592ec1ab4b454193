//*** START FILE: src/session/mod.rs ***//
// UI-independent session state. Controllers mutate plain structs and hand
// back `Request` values; the runner executes them and the resulting
// `Completion`s are applied on the UI thread.

pub mod chat;
pub mod dashboard;
pub mod lifecycle;
pub mod navigation;
pub mod request;
pub mod root;
pub mod runner;
pub mod toast;
pub mod tools;

pub use dashboard::{Dashboard, DashboardSettings};
pub use navigation::Tab;
pub use request::{Completion, Request, ToolKind};
pub use root::{RootController, Screen};
pub use runner::RequestRunner;
pub use toast::Toast;

//*** END FILE: src/session/mod.rs ***//
