use authkeep_adapters::SessionCookieConfig;
use authkeep_application::AccountService;
use axum::extract::FromRef;

/// Shared state handed to every account route.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub cookies: SessionCookieConfig,
}

impl AppState {
    pub fn new(accounts: AccountService, cookies: SessionCookieConfig) -> Self {
        Self { accounts, cookies }
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for SessionCookieConfig {
    fn from_ref(state: &AppState) -> Self {
        state.cookies.clone()
    }
}
