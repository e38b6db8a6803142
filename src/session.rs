//! Session gate: the only place persisted credentials are read or written.
//!
//! State is re-derived from storage on every page load; nothing is kept in
//! memory between loads.

use log::{debug, error, info};
use reqwest::StatusCode;

use crate::clients::api_client::WorksApi;
use crate::models::auth::{Credentials, LoginResponse};
use crate::models::errors::StorageError;
use crate::storage::Storage;
use crate::view::page::{Page, LOGIN_ERROR_TEXT};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

pub const LOGIN_LABEL: &str = "login";
pub const LOGOUT_LABEL: &str = "logout";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected,
}

/// What a click on the login link should do, as bound by [`SessionGate::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    GoToLogin,
    Logout,
}

pub struct SessionGate<S: Storage> {
    storage: S,
}

impl<S: Storage> SessionGate<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn state(&self) -> SessionState {
        match self.token() {
            Some(_) => SessionState::LoggedIn,
            None => SessionState::LoggedOut,
        }
    }

    pub fn evaluate(&self, page: &mut Page) -> SessionState {
        let state = self.state();
        debug!("session evaluated: {:?}", state);
        match state {
            SessionState::LoggedIn => {
                page.login_link.set_text(LOGOUT_LABEL);
                page.login_link.set_attribute("data-action", "logout");
                page.admin_bar.set_hidden(false);
                for button in page.open_modal_buttons.iter_mut() {
                    button.set_hidden(false);
                }
                page.filters.set_hidden(true);
            }
            SessionState::LoggedOut => {
                page.login_link.set_text(LOGIN_LABEL);
                page.login_link.set_attribute("data-action", "login");
                page.admin_bar.set_hidden(true);
                for button in page.open_modal_buttons.iter_mut() {
                    button.set_hidden(true);
                }
                page.filters.set_hidden(false);
            }
        }
        state
    }

    pub fn link_action(page: &Page) -> LinkAction {
        match page.login_link.data("action") {
            Some("logout") => LinkAction::Logout,
            _ => LinkAction::GoToLogin,
        }
    }

    /// Persists `user` and `token` only on a 200; anything else shows the login error.
    pub async fn submit_login(
        &mut self,
        api: &dyn WorksApi,
        credentials: &Credentials,
        page: &mut Page,
    ) -> LoginOutcome {
        let response = api.login(credentials).await;

        let login = response
            .filter(|reply| reply.status == StatusCode::OK)
            .and_then(|reply| serde_json::from_value::<LoginResponse>(reply.data)
                .map_err(|err| error!("unexpected login payload: {}", err))
                .ok());

        let persisted = match login {
            Some(login) => self.persist(&login)
                .map_err(|err| error!("can't persist session: {}", err))
                .is_ok(),
            None => false,
        };

        if persisted {
            info!("user login succeeded");
            page.login_form.error_message.set_text("");
            LoginOutcome::Accepted
        } else {
            page.login_form.error_message.set_text(LOGIN_ERROR_TEXT);
            LoginOutcome::Rejected
        }
    }

    pub fn logout(&mut self, page: &mut Page) -> Result<(), StorageError> {
        self.storage.remove_all(&[USER_KEY, TOKEN_KEY])?;
        page.login_form.email.set_attribute("value", "");
        page.login_form.password.set_attribute("value", "");
        info!("user logged out");
        Ok(())
    }

    fn persist(&mut self, login: &LoginResponse) -> Result<(), StorageError> {
        let user = serde_json::to_string(&login.user_id)?;
        self.storage.set_all(&[(USER_KEY, user), (TOKEN_KEY, login.token.clone())])
    }
}
