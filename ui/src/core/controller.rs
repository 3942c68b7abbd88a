//! Session/view state machine and data-refresh orchestration.
//!
//! The [`Controller`] owns the whole [`AppState`] and is the only thing that
//! mutates it. The UI sends [`Action`]s; each action runs its network sequence
//! strictly in order and publishes a fresh snapshot to the observer after every
//! step, so components re-render declaratively from that snapshot.

use tracing::{debug, info, warn};

use crate::core::api::{fetch_image_handle, Backend, ChartImage};
use crate::core::cache::DataCache;
use crate::core::charts::{ChartImages, ChartSnapshot};
use crate::core::error::ApiError;
use crate::core::model::{IngestSummary, Record, RecordPatch};
use crate::core::platform;
use crate::core::session::Session;
use crate::core::storage::TokenStore;
use crate::core::table::{table_rows, TableRow};
use crate::core::view::{RoleLayout, View};

pub const LOGIN_FAILED: &str = "Login failed";
pub const SERVER_UNREACHABLE: &str = "Server unreachable";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const UPDATE_FAILED: &str = "Update failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Stored token (if any) not yet checked.
    #[default]
    Booting,
    Login,
    Dashboard,
}

/// Values shown in the edit modal; `student_id` is the key being patched.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub student_id: String,
    pub student_name: String,
    pub marks: f64,
    pub time_study: f64,
}

impl From<&Record> for EditDraft {
    fn from(record: &Record) -> Self {
        Self {
            student_id: record.student_id.clone(),
            student_name: record.student_name.clone(),
            marks: record.marks,
            time_study: record.time_study,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub session: Session,
    pub view: View,
    pub layout: RoleLayout,
    pub cache: DataCache,
    /// Rows as last rendered into the table.
    pub table_rows: Vec<TableRow>,
    /// Client-side charts as last rendered; may lag `cache` until the next render.
    pub charts: Option<ChartSnapshot>,
    pub images: ChartImages,
    pub login_error: Option<String>,
    /// Blocking message the user must dismiss.
    pub alert: Option<String>,
    pub edit: Option<EditDraft>,
    pub busy: bool,
    pub ingest: Option<IngestSummary>,
}

impl AppState {
    fn login_screen() -> Self {
        Self {
            screen: Screen::Login,
            ..Self::default()
        }
    }

    pub fn title(&self) -> String {
        self.view.title()
    }
}

pub enum Action {
    /// Page load: verify the stored token or show the login form.
    Boot,
    Login { username: String, password: String },
    Logout,
    SwitchView(View),
    /// Ask the server to re-ingest its own source file.
    ManualReload,
    UploadCsv { file_name: String, bytes: Vec<u8> },
    OpenEdit(Record),
    CloseEdit,
    SubmitEdit(RecordPatch),
    DismissAlert,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Boot => "boot",
            Action::Login { .. } => "login",
            Action::Logout => "logout",
            Action::SwitchView(_) => "switch-view",
            Action::ManualReload => "manual-reload",
            Action::UploadCsv { .. } => "upload-csv",
            Action::OpenEdit(_) => "open-edit",
            Action::CloseEdit => "close-edit",
            Action::SubmitEdit(_) => "submit-edit",
            Action::DismissAlert => "dismiss-alert",
        }
    }
}

/// What the host must do after an action, beyond re-rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Render,
    /// Logout: throw away every piece of in-memory state.
    ReloadPage,
}

type Observer = Box<dyn FnMut(&AppState)>;

pub struct Controller<B, S> {
    backend: B,
    store: S,
    state: AppState,
    chart_revision: u64,
    observer: Option<Observer>,
}

impl<B: Backend, S: TokenStore> Controller<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            state: AppState::default(),
            chart_revision: 0,
            observer: None,
        }
    }

    /// Called with a snapshot after every state change.
    pub fn with_observer(mut self, observer: impl FnMut(&AppState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn dispatch(&mut self, action: Action) -> Outcome {
        debug!(action = action.name(), screen = ?self.state.screen, "dispatch");
        match action {
            Action::Boot => self.boot().await,
            Action::Login { username, password } => self.login(&username, &password).await,
            Action::Logout => return self.logout(),
            Action::SwitchView(view) => self.switch_view(view).await,
            Action::ManualReload => self.manual_reload().await,
            Action::UploadCsv { file_name, bytes } => self.upload_csv(&file_name, bytes).await,
            Action::OpenEdit(record) => self.open_edit(&record),
            Action::CloseEdit => {
                self.state.edit = None;
                self.publish();
            }
            Action::SubmitEdit(patch) => self.submit_edit(patch).await,
            Action::DismissAlert => {
                self.state.alert = None;
                self.publish();
            }
        }
        Outcome::Render
    }

    fn publish(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }

    fn token(&self) -> Option<String> {
        self.state.session.token().map(str::to_string)
    }

    fn require_admin(&self, action: &str) -> bool {
        let allowed =
            self.state.screen == Screen::Dashboard && self.state.session.is_admin();
        if !allowed {
            debug!(action, "ignored: admin only");
        }
        allowed
    }

    async fn boot(&mut self) {
        let stored = self.store.load();
        self.state.session = Session::restored(stored);
        if self.state.session.token().is_some() {
            self.verify().await;
        } else {
            self.state.screen = Screen::Login;
            self.publish();
        }
    }

    /// Expired and corrupt tokens are handled the same way: back to the login form.
    async fn verify(&mut self) {
        let Some(token) = self.token() else {
            self.reset_to_login();
            return;
        };
        match self.backend.me(&token).await {
            Ok(user) => {
                info!(username = %user.username, role = user.role.as_str(), "session verified");
                self.state.session.verified(user);
                self.init_dashboard().await;
            }
            Err(err) => {
                warn!(error = %err, "session verification failed");
                self.reset_to_login();
            }
        }
    }

    fn reset_to_login(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not clear stored token");
        }
        self.release_images();
        self.state = AppState::login_screen();
        self.publish();
    }

    async fn login(&mut self, username: &str, password: &str) {
        if self.state.screen == Screen::Dashboard {
            debug!("login ignored: already signed in");
            return;
        }
        self.state.login_error = None;
        self.state.busy = true;
        self.publish();

        match self.backend.login(username, password).await {
            Ok(token) => {
                if let Err(err) = self.store.save(&token) {
                    warn!(error = %err, "token not persisted");
                }
                self.state.session.set_token(token);
                self.verify().await;
            }
            Err(err) => {
                warn!(error = %err, "login rejected");
                self.state.login_error = Some(login_message(&err));
                self.state.busy = false;
                self.publish();
            }
        }
    }

    fn logout(&mut self) -> Outcome {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not clear stored token");
        }
        self.release_images();
        self.state = AppState::login_screen();
        self.publish();
        Outcome::ReloadPage
    }

    async fn init_dashboard(&mut self) {
        if !self.state.session.is_verified() {
            debug!("dashboard init skipped: session not verified");
            return;
        }
        let Some(role) = self.state.session.role() else {
            return;
        };
        self.state.screen = Screen::Dashboard;
        self.state.layout = RoleLayout::for_role(role);
        self.state.view = View::Overview;
        self.state.busy = false;
        self.state.login_error = None;
        self.publish();

        self.load_analytics().await;
    }

    async fn switch_view(&mut self, view: View) {
        if self.state.screen != Screen::Dashboard {
            return;
        }
        if !self.state.layout.allows(view) {
            debug!(view = view.slug(), "view not available for this role");
            return;
        }
        self.state.view = view;
        self.publish();

        match view {
            View::DataTable => self.fetch_table_data().await,
            View::Reports => self.render_charts().await,
            View::Overview => {}
        }
    }

    /// Stats, then records, then charts (and the table for admins).
    async fn load_analytics(&mut self) {
        self.fetch_stats().await;

        let Some(token) = self.token() else {
            return;
        };
        match self.backend.list_records(&token).await {
            Ok(records) => {
                self.state.cache.replace_records(records);
                self.rebuild_charts();
                if self.state.session.is_admin() {
                    self.render_table();
                }
                self.publish();
                self.refresh_images().await;
            }
            Err(err) => warn!(error = %err, "record fetch failed"),
        }
    }

    /// Stats, then the table, then charts.
    async fn load_full_admin_data(&mut self) {
        self.fetch_stats().await;
        self.fetch_table_data().await;
        self.render_charts().await;
    }

    async fn fetch_stats(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        match self.backend.summary_stats(&token).await {
            Ok(stats) => {
                self.state.cache.replace_stats(stats);
                self.publish();
            }
            Err(err) => warn!(error = %err, "summary stats fetch failed"),
        }
    }

    async fn fetch_table_data(&mut self) {
        if !self.state.session.is_admin() {
            return;
        }
        let Some(token) = self.token() else {
            return;
        };
        match self.backend.list_records(&token).await {
            Ok(records) => {
                self.state.cache.replace_records(records);
                self.render_table();
                self.publish();
            }
            Err(err) => warn!(error = %err, "table fetch failed"),
        }
    }

    fn render_table(&mut self) {
        let admin = self.state.session.is_admin();
        self.state.table_rows = self
            .state
            .cache
            .records()
            .map(|records| table_rows(records, admin))
            .unwrap_or_default();
    }

    /// Recreates both client charts from the cache and re-requests the server images.
    async fn render_charts(&mut self) {
        if self.state.cache.records().is_none() {
            return;
        }
        self.rebuild_charts();
        self.publish();
        self.refresh_images().await;
    }

    fn rebuild_charts(&mut self) {
        let Some(records) = self.state.cache.records() else {
            return;
        };
        self.chart_revision += 1;
        self.state.charts = Some(ChartSnapshot::build(self.chart_revision, records));
    }

    async fn refresh_images(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        let stamp = platform::now_millis();
        for chart in [ChartImage::Histogram, ChartImage::BarChart] {
            match fetch_image_handle(&self.backend, &token, chart, stamp).await {
                Ok(handle) => {
                    let slot = match chart {
                        ChartImage::Histogram => &mut self.state.images.histogram,
                        ChartImage::BarChart => &mut self.state.images.bar_chart,
                    };
                    if let Some(previous) = slot.replace(handle) {
                        platform::release_image_handle(&previous);
                    }
                    self.publish();
                }
                Err(err) => warn!(error = %err, chart = chart.path(), "chart image fetch failed"),
            }
        }
    }

    fn release_images(&mut self) {
        let images = std::mem::take(&mut self.state.images);
        for handle in [images.histogram, images.bar_chart].into_iter().flatten() {
            platform::release_image_handle(&handle);
        }
    }

    /// Failure is only logged; there is no user-facing error for this action.
    async fn manual_reload(&mut self) {
        if !self.require_admin("manual-reload") {
            return;
        }
        let Some(token) = self.token() else {
            return;
        };
        match self.backend.reload_from_source(&token).await {
            Ok(summary) => {
                self.state.ingest = Some(summary);
                self.load_analytics().await;
            }
            Err(err) => warn!(error = %err, "reload from source failed"),
        }
    }

    async fn upload_csv(&mut self, file_name: &str, bytes: Vec<u8>) {
        if !self.require_admin("upload-csv") {
            return;
        }
        let Some(token) = self.token() else {
            return;
        };
        self.state.busy = true;
        self.publish();

        match self.backend.upload_csv(&token, file_name, bytes).await {
            Ok(summary) => {
                info!(file_name, message = %summary.message, "upload accepted");
                self.state.ingest = Some(summary);
                self.load_full_admin_data().await;
            }
            Err(err) => {
                warn!(error = %err, file_name, "upload rejected");
                self.state.alert = Some(UPLOAD_FAILED.to_string());
            }
        }
        self.state.busy = false;
        self.publish();
    }

    fn open_edit(&mut self, record: &Record) {
        if !self.require_admin("open-edit") {
            return;
        }
        self.state.edit = Some(EditDraft::from(record));
        self.publish();
    }

    async fn submit_edit(&mut self, patch: RecordPatch) {
        if !self.require_admin("submit-edit") {
            return;
        }
        let Some(student_id) = self.state.edit.as_ref().map(|d| d.student_id.clone()) else {
            debug!("submit-edit ignored: modal closed");
            return;
        };
        let Some(token) = self.token() else {
            return;
        };

        match self.backend.patch_record(&token, &student_id, &patch).await {
            Ok(_) => {
                self.state.edit = None;
                self.publish();
                self.load_full_admin_data().await;
            }
            Err(err) => {
                warn!(error = %err, student_id = %student_id, "record update rejected");
                self.state.alert = Some(UPDATE_FAILED.to_string());
                self.publish();
            }
        }
    }
}

fn login_message(err: &ApiError) -> String {
    if err.is_network() {
        return SERVER_UNREACHABLE.to_string();
    }
    err.server_detail()
        .map(str::to_string)
        .unwrap_or_else(|| LOGIN_FAILED.to_string())
}
