//! services/client/src/shell.rs
//!
//! The root of the client: gates every view behind a logged-in identity and
//! keeps the navigation history.
//!
//! The HTTP adapter is only ever built by `Shell::authenticate`, so a view
//! cannot exist without an initialized API to talk to.

use std::sync::Arc;

use tracing::info;
use tracker_core::ports::{TokenError, TokenProvider, TrackerApi};
use tracker_core::route::Route;

use crate::adapters::HttpApiAdapter;
use crate::config::Config;
use crate::error::ClientError;
use crate::views::{View, ViewHandle};

//=========================================================================================
// Navigator
//=========================================================================================

/// Route history plus the handle of the view currently on screen.
#[derive(Debug, Default)]
pub struct Navigator {
    history: Vec<Route>,
    active: Option<ViewHandle>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Route {
        self.history.last().cloned().unwrap_or(Route::Dashboard)
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Leaves the current view and records `route`.
    pub fn push(&mut self, route: Route) {
        self.leave();
        self.history.push(route);
    }

    /// Leaves the current view and returns to the previous route.
    pub fn back(&mut self) -> Route {
        self.leave();
        self.history.pop();
        self.current()
    }

    /// Registers the view now on screen.
    pub fn attach(&mut self, handle: ViewHandle) {
        self.active = Some(handle);
    }

    fn leave(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.deactivate();
        }
    }
}

//=========================================================================================
// Shell
//=========================================================================================

/// The logged-out state.
pub struct Shell {
    config: Config,
    tokens: Arc<dyn TokenProvider>,
}

impl Shell {
    pub fn new(config: Config, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { config, tokens }
    }

    /// Builds the shared API client once the identity provider reports a login.
    pub fn authenticate(self) -> Result<AuthenticatedShell, ClientError> {
        if !self.tokens.is_authenticated() {
            return Err(ClientError::Token(TokenError::Missing));
        }
        let api = Arc::new(HttpApiAdapter::new(&self.config, self.tokens.clone())?);
        info!("Authenticated; API client ready for {}", api.base_url());
        Ok(AuthenticatedShell::new(self.config, self.tokens, api))
    }

    /// Ends the identity provider session. Works whether or not a user is
    /// logged in.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.tokens.logout().await?;
        Ok(())
    }
}

/// The logged-in state: the only place views are created.
pub struct AuthenticatedShell {
    config: Config,
    tokens: Arc<dyn TokenProvider>,
    api: Arc<dyn TrackerApi>,
    navigator: Navigator,
}

impl AuthenticatedShell {
    pub fn new(config: Config, tokens: Arc<dyn TokenProvider>, api: Arc<dyn TrackerApi>) -> Self {
        Self {
            config,
            tokens,
            api,
            navigator: Navigator::new(),
        }
    }

    pub fn api(&self) -> Arc<dyn TrackerApi> {
        self.api.clone()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Navigates to `route` and builds its view.
    pub fn navigate(&mut self, route: Route) -> View {
        self.navigator.push(route.clone());
        self.build(&route)
    }

    /// Returns to the previous route and builds its view afresh.
    pub fn back(&mut self) -> View {
        let route = self.navigator.back();
        self.build(&route)
    }

    fn build(&mut self, route: &Route) -> View {
        let view = View::build(self.api.clone(), route);
        self.navigator.attach(view.handle());
        view
    }

    /// Ends the identity provider session and drops the API client.
    pub async fn logout(mut self) -> Result<Shell, ClientError> {
        self.navigator.leave();
        let shell = Shell::new(self.config, self.tokens);
        shell.logout().await?;
        Ok(shell)
    }
}
