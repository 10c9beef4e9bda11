use std::sync::Arc;

use catalli_core::catalog::OptionCatalog;
use catalli_core::masks::MaskSettings;
use catalli_db::store::UserStore;

use crate::config::ServerConfig;
use crate::identity::IdentityProvider;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is `Copy`.
#[derive(Clone)]
pub struct AppState {
    /// User persistence.
    pub store: Arc<dyn UserStore>,
    /// Option catalog, loaded once at startup and read-only afterwards.
    pub catalog: Arc<OptionCatalog>,
    /// External identity provider used by login.
    pub identity: Arc<dyn IdentityProvider>,
    /// Server configuration (tokens, CORS, timeouts).
    pub config: Arc<ServerConfig>,
    /// Canvas size and layer split for rendered masks.
    pub mask_settings: MaskSettings,
}
