use shared::models::{ServerConfig, SessionResponse};
use yewdux::Store;

/// Global client state shared through yewdux.
#[derive(Default, Clone, PartialEq, Store)]
pub struct AppState {
    /// Server configuration, present once fetched at startup.
    pub configuration: Option<ServerConfig>,
    /// The active session, present after sign-in.
    pub session: Option<SessionResponse>,
}
