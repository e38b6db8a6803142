use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::clients::api_client::WorksApi;
use crate::config::app_config::AppConfig;
use crate::filters::{apply_filter, setup_buttons, FilterSelection};
use crate::modal::{self, AddOutcome, AddWorkForm, ModalClick, UPLOAD_ERROR_TEXT};
use crate::models::auth::Credentials;
use crate::models::work::{CategoryId, WorkId};
use crate::preview::ImageFile;
use crate::session::{LinkAction, LoginOutcome, SessionGate, SessionState};
use crate::storage::Storage;
use crate::view::page::Page;
use crate::view::render::display_works;

/// Named UI events the page reacts to.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Index of the clicked button inside the filter bar.
    FilterClick(usize),
    LoginLinkClick,
    SubmitLogin(Credentials),
    OpenModal,
    CloseModal(ModalClick),
    DeleteClick(WorkId),
    SelectImage(PathBuf),
    SubmitAdd { title: String, category: Option<CategoryId> },
}

/// Browser-level consequences a handler asks the driver to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(String),
    Reload,
    Alert(String),
    CloseModalAfter(Duration),
}

pub struct App<A: WorksApi, S: Storage> {
    config: AppConfig,
    api: A,
    session: SessionGate<S>,
    catalog: Catalog,
    page: Page,
    filters: Vec<FilterSelection>,
    selected_image: Option<ImageFile>,
}

impl<A: WorksApi, S: Storage> App<A, S> {
    pub fn new(config: AppConfig, api: A, storage: S) -> Self {
        Self {
            config,
            api,
            session: SessionGate::new(storage),
            catalog: Catalog::new(),
            page: Page::new(),
            filters: Vec::new(),
            selected_image: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &SessionGate<S> {
        &self.session
    }

    pub fn filters(&self) -> &[FilterSelection] {
        &self.filters
    }

    /// Page load: fetch and paint the catalog, wire filters, then gate the admin UI.
    pub async fn load(&mut self) -> SessionState {
        info!("page loading");
        match self.api.fetch_works().await {
            Some(works) => {
                self.catalog.load(works);
                display_works(self.catalog.all(), &mut self.page.gallery);
                self.filters = setup_buttons(&self.catalog, &mut self.page.filters);
                info!("loaded {} works", self.catalog.len());
            }
            None => warn!("no works loaded, gallery left empty"),
        }
        self.session.evaluate(&mut self.page)
    }

    /// Fresh page state re-derived from storage and the server.
    pub async fn reload(&mut self) -> SessionState {
        self.page = Page::new();
        self.catalog = Catalog::new();
        self.filters.clear();
        self.selected_image = None;
        self.load().await
    }

    pub async fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        debug!("event: {:?}", event);
        match event {
            UiEvent::FilterClick(index) => {
                let selection = self.page.filters.children.get(index)
                    .and_then(FilterSelection::from_button)
                    .filter(|selection| self.filters.contains(selection));
                match selection {
                    Some(selection) => apply_filter(&selection, &self.catalog, &mut self.page.gallery),
                    None => warn!("no filter button at index {}", index),
                }
                vec![]
            }
            UiEvent::LoginLinkClick => match SessionGate::<S>::link_action(&self.page) {
                LinkAction::GoToLogin => vec![Effect::Navigate(self.config.login_page.clone())],
                LinkAction::Logout => match self.session.logout(&mut self.page) {
                    Ok(()) => vec![Effect::Reload],
                    Err(err) => {
                        error!("logout failed: {}", err);
                        vec![]
                    }
                },
            },
            UiEvent::SubmitLogin(credentials) => {
                match self.session.submit_login(&self.api, &credentials, &mut self.page).await {
                    LoginOutcome::Accepted => vec![Effect::Navigate(self.config.home_page.clone())],
                    LoginOutcome::Rejected => vec![],
                }
            }
            UiEvent::OpenModal => {
                modal::open_modal(&mut self.page, &self.catalog);
                vec![]
            }
            UiEvent::CloseModal(click) => {
                modal::close_modal(&mut self.page, click);
                vec![]
            }
            UiEvent::DeleteClick(id) => {
                let Some(token) = self.session.token() else {
                    warn!("delete of work {} without a session", id);
                    return vec![Effect::Navigate(self.config.login_page.clone())];
                };
                modal::delete_work(&self.api, &token, id, &mut self.page, &mut self.catalog).await;
                vec![]
            }
            UiEvent::SelectImage(path) => {
                match ImageFile::open(&path).await {
                    Ok(image) => {
                        modal::show_preview(&mut self.page, &image, path.to_string_lossy().into_owned());
                        self.selected_image = Some(image);
                    }
                    Err(err) => {
                        warn!("can't use {} as image: {}", path.display(), err);
                        self.selected_image = None;
                        self.page.modal.preview.set_hidden(true);
                    }
                }
                vec![]
            }
            UiEvent::SubmitAdd { title, category } => self.submit_add(title, category).await,
        }
    }

    async fn submit_add(&mut self, title: String, category: Option<CategoryId>) -> Vec<Effect> {
        let form = AddWorkForm { image: self.selected_image.clone(), title, category };

        if let Err(message) = modal::validate(&form, self.config.max_upload_bytes) {
            modal::show_form_error(&mut self.page, message);
            return vec![];
        }

        let Some(token) = self.session.token() else {
            warn!("upload without a session");
            return vec![Effect::Navigate(self.config.login_page.clone())];
        };

        let outcome = modal::submit_add(
            &self.api,
            &token,
            &form,
            self.config.max_upload_bytes,
            &mut self.page,
            &mut self.catalog,
        ).await;

        match outcome {
            AddOutcome::Added(_) => {
                self.selected_image = None;
                vec![Effect::CloseModalAfter(self.config.modal_close_delay())]
            }
            AddOutcome::Invalid => vec![],
            AddOutcome::Rejected(_) | AddOutcome::Failed => vec![Effect::Alert(UPLOAD_ERROR_TEXT.to_string())],
        }
    }

    /// Carries out an effect the way the browser would.
    pub async fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Navigate(target) if target == self.config.home_page => {
                info!("navigating to {}", target);
                self.reload().await;
            }
            Effect::Navigate(target) => info!("navigating to {}", target),
            Effect::Reload => {
                self.reload().await;
            }
            Effect::Alert(message) => warn!("alert: {}", message),
            Effect::CloseModalAfter(delay) => {
                tokio::time::sleep(delay).await;
                modal::close_modal(&mut self.page, ModalClick::CloseButton);
            }
        }
    }
}
