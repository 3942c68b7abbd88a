//! End-to-end controller flows against an in-memory backend.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::block_on;

use ui::core::api::{Backend, ChartImage};
use ui::core::controller::{
    Action, AppState, Controller, Outcome, Screen, SERVER_UNREACHABLE, UPDATE_FAILED,
    UPLOAD_FAILED,
};
use ui::core::error::ApiError;
use ui::core::model::{
    IngestSummary, Record, RecordPatch, Role, StudentCredential, SummaryStats, User,
};
use ui::core::storage::{MemoryTokenStore, TokenStore};
use ui::core::view::View;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

fn record(id: &str, name: &str, marks: f64, time_study: f64) -> Record {
    Record {
        student_id: id.into(),
        student_name: name.into(),
        marks,
        time_study,
    }
}

#[derive(Default)]
struct FakeBackend {
    calls: RefCell<Vec<String>>,
    /// token -> user
    users: RefCell<Vec<(String, User)>>,
    /// (username, password, token)
    accounts: Vec<(String, String, String)>,
    records: RefCell<Vec<Record>>,
    uploaded: RefCell<Option<Vec<Record>>>,
    login_error: Option<fn() -> ApiError>,
    me_error: Option<fn() -> ApiError>,
    fail_upload: bool,
    fail_patch: bool,
    fail_reload: bool,
    image_fetches: Cell<u32>,
}

impl FakeBackend {
    fn with_user(mut self, token: &str, user: User) -> Self {
        self.users.get_mut().push((token.into(), user));
        self
    }

    fn with_account(mut self, username: &str, password: &str, token: &str) -> Self {
        self.accounts
            .push((username.into(), password.into(), token.into()));
        self
    }

    fn with_records(self, records: Vec<Record>) -> Self {
        *self.records.borrow_mut() = records;
        self
    }

    fn log(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    fn stats(&self) -> SummaryStats {
        let records = self.records.borrow();
        if records.is_empty() {
            return SummaryStats::default();
        }
        let n = records.len() as f64;
        SummaryStats {
            average_marks: records.iter().map(|r| r.marks).sum::<f64>() / n,
            average_study_time: records.iter().map(|r| r.time_study).sum::<f64>() / n,
            highest_marks: records.iter().map(|r| r.marks).fold(f64::MIN, f64::max),
            lowest_marks: records.iter().map(|r| r.marks).fold(f64::MAX, f64::min),
        }
    }

    fn authorize(&self, token: &str) -> Result<User, ApiError> {
        self.users
            .borrow()
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, user)| user.clone())
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".into()))
    }
}

impl Backend for FakeBackend {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.log("login");
        if let Some(make_error) = self.login_error {
            return Err(make_error());
        }
        self.accounts
            .iter()
            .find(|(u, p, _)| u == username && p == password)
            .map(|(_, _, token)| token.clone())
            .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".into()))
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        self.log("me");
        if let Some(make_error) = self.me_error {
            return Err(make_error());
        }
        self.authorize(token)
    }

    async fn list_records(&self, token: &str) -> Result<Vec<Record>, ApiError> {
        self.log("records");
        self.authorize(token)?;
        Ok(self.records.borrow().clone())
    }

    async fn summary_stats(&self, token: &str) -> Result<SummaryStats, ApiError> {
        self.log("stats");
        self.authorize(token)?;
        Ok(self.stats())
    }

    async fn chart_image(
        &self,
        token: &str,
        chart: ChartImage,
        cache_bust: i64,
    ) -> Result<Vec<u8>, ApiError> {
        self.log(chart.path());
        assert!(cache_bust > 0);
        self.authorize(token)?;
        self.image_fetches.set(self.image_fetches.get() + 1);
        Ok(PNG_MAGIC.to_vec())
    }

    async fn reload_from_source(&self, token: &str) -> Result<IngestSummary, ApiError> {
        self.log("load-csv");
        self.authorize(token)?;
        if self.fail_reload {
            return Err(ApiError::from_status(500, r#"{"detail":"source missing"}"#));
        }
        Ok(IngestSummary {
            message: "Data reloaded".into(),
            ..IngestSummary::default()
        })
    }

    async fn upload_csv(
        &self,
        token: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<IngestSummary, ApiError> {
        self.log(format!("upload:{file_name}"));
        self.authorize(token)?;
        assert!(!bytes.is_empty());
        if self.fail_upload {
            return Err(ApiError::from_status(400, r#"{"detail":"Missing columns"}"#));
        }
        if let Some(replacement) = self.uploaded.borrow_mut().take() {
            *self.records.borrow_mut() = replacement;
        }
        Ok(IngestSummary {
            message: "Data uploaded successfully".into(),
            student_credentials: vec![StudentCredential {
                username: "Zed".into(),
                password: Some("Z9".into()),
            }],
            note: None,
        })
    }

    async fn patch_record(
        &self,
        token: &str,
        student_id: &str,
        patch: &RecordPatch,
    ) -> Result<Record, ApiError> {
        self.log(format!("patch:{student_id}"));
        self.authorize(token)?;
        if self.fail_patch {
            return Err(ApiError::from_status(422, r#"{"detail":"bad marks"}"#));
        }
        let mut records = self.records.borrow_mut();
        let row = records
            .iter_mut()
            .find(|r| r.student_id == student_id)
            .ok_or_else(|| ApiError::from_status(404, r#"{"detail":"Student not found"}"#))?;
        row.student_name = patch.student_name.clone();
        row.marks = patch.marks;
        row.time_study = patch.time_study;
        Ok(row.clone())
    }
}

fn alice() -> User {
    User {
        username: "alice".into(),
        role: Role::Student,
        own_record: Some(record("S1", "Alice", 72.0, 3.5)),
    }
}

fn admin() -> User {
    User {
        username: "admin".into(),
        role: Role::Admin,
        own_record: None,
    }
}

fn class_records() -> Vec<Record> {
    vec![
        record("S1", "Alice", 72.0, 3.5),
        record("S2", "Ben", 39.9, 1.0),
        record("S3", "Cleo", 100.0, 6.0),
    ]
}

fn admin_backend() -> FakeBackend {
    FakeBackend::default()
        .with_user("T-admin", admin())
        .with_account("admin", "admin123", "T-admin")
        .with_records(class_records())
}

fn booted(backend: FakeBackend, store: MemoryTokenStore) -> Controller<FakeBackend, MemoryTokenStore> {
    let mut controller = Controller::new(backend, store);
    block_on(controller.dispatch(Action::Boot));
    controller
}

#[test]
fn no_stored_token_shows_login() {
    let controller = booted(FakeBackend::default(), MemoryTokenStore::default());
    assert_eq!(controller.state().screen, Screen::Login);
    assert!(controller.backend().calls().is_empty());
}

#[test]
fn student_token_shows_own_record_and_no_admin_affordances() {
    let backend = FakeBackend::default()
        .with_user("T1", alice())
        .with_records(class_records());
    let controller = booted(backend, MemoryTokenStore::with_token("T1"));
    let state = controller.state();

    assert_eq!(state.screen, Screen::Dashboard);
    assert_eq!(state.view, View::Overview);
    assert_eq!(state.title(), "Overview");
    assert!(state.layout.show_student_info);
    assert!(!state.layout.show_data_table);
    assert!(!state.layout.show_edit_column);
    assert!(!state.layout.show_admin_actions);

    let own = state.session.user().and_then(|u| u.own_record.clone()).unwrap();
    assert_eq!(own.student_name, "Alice");
    assert_eq!(own.student_id, "S1");

    // Students never get table rows, let alone edit buttons.
    assert!(state.table_rows.is_empty());
    assert!(state.charts.is_some());
}

#[test]
fn student_login_shows_marks_and_study_time() {
    let backend = FakeBackend::default()
        .with_user("T1", alice())
        .with_account("alice", "pw1", "T1")
        .with_records(class_records());
    let store = MemoryTokenStore::default();
    let mut controller = booted(backend, store.clone());

    block_on(controller.dispatch(Action::Login {
        username: "alice".into(),
        password: "pw1".into(),
    }));

    assert_eq!(store.load().as_deref(), Some("T1"));
    let state = controller.state();
    assert_eq!(state.screen, Screen::Dashboard);
    assert!(state.session.is_verified());
    assert_eq!(state.session.role(), Some(Role::Student));
    let own = state.session.user().and_then(|u| u.own_record.clone()).unwrap();
    assert_eq!(own, record("S1", "Alice", 72.0, 3.5));
    assert!(state.layout.show_student_info);
    assert!(!state.layout.show_edit_column);
    assert!(state.table_rows.is_empty());
    assert_eq!(
        controller.backend().calls(),
        vec!["login", "me", "stats", "records", "/marks/histogram", "/marks/bar-chart"]
    );
}

#[test]
fn unreachable_server_during_verify_clears_session() {
    let backend = FakeBackend {
        me_error: Some(|| ApiError::Network("connection reset".into())),
        ..FakeBackend::default().with_user("T1", alice())
    };
    let store = MemoryTokenStore::with_token("T1");
    let controller = booted(backend, store.clone());

    let state = controller.state();
    assert_eq!(state.screen, Screen::Login);
    assert!(state.session.token().is_none());
    assert!(!state.session.is_verified());
    assert!(store.load().is_none());
    assert_eq!(controller.backend().calls(), vec!["me"]);
}

#[test]
fn invalid_stored_token_returns_to_login_and_clears_store() {
    let store = MemoryTokenStore::with_token("stale");
    let controller = booted(FakeBackend::default(), store.clone());

    assert_eq!(controller.state().screen, Screen::Login);
    assert!(store.load().is_none());
    assert_eq!(controller.backend().calls(), vec!["me"]);
}

#[test]
fn admin_boot_loads_stats_before_records_then_images() {
    let controller = booted(admin_backend(), MemoryTokenStore::with_token("T-admin"));
    let state = controller.state();

    assert!(state.layout.show_data_table);
    assert!(state.layout.show_edit_column);
    assert!(state.layout.show_admin_actions);
    assert!(!state.layout.show_student_info);
    assert_eq!(state.table_rows.len(), 3);
    assert!(state.table_rows.iter().all(|row| row.editable));

    assert_eq!(
        controller.backend().calls(),
        vec!["me", "stats", "records", "/marks/histogram", "/marks/bar-chart"]
    );
    let stats = state.cache.stats().copied().unwrap();
    assert_eq!(stats.highest_marks, 100.0);
    assert!(state.images.histogram.as_deref().unwrap().starts_with("data:image/png"));
    assert!(state.images.bar_chart.is_some());
}

#[test]
fn login_success_persists_token() {
    let store = MemoryTokenStore::default();
    let mut controller = booted(admin_backend(), store.clone());

    block_on(controller.dispatch(Action::Login {
        username: "admin".into(),
        password: "admin123".into(),
    }));

    assert_eq!(store.load().as_deref(), Some("T-admin"));
    assert_eq!(controller.state().screen, Screen::Dashboard);
    assert!(controller.state().login_error.is_none());
    assert!(!controller.state().busy);
}

#[test]
fn login_failure_shows_server_detail() {
    let mut controller = booted(admin_backend(), MemoryTokenStore::default());

    block_on(controller.dispatch(Action::Login {
        username: "admin".into(),
        password: "wrong".into(),
    }));

    let state = controller.state();
    assert_eq!(state.screen, Screen::Login);
    assert_eq!(state.login_error.as_deref(), Some("Invalid username or password"));
    assert!(!state.busy);
}

#[test]
fn login_network_failure_reads_server_unreachable() {
    let backend = FakeBackend {
        login_error: Some(|| ApiError::Network("connection refused".into())),
        ..FakeBackend::default()
    };
    let store = MemoryTokenStore::default();
    let mut controller = booted(backend, store.clone());

    block_on(controller.dispatch(Action::Login {
        username: "a".into(),
        password: "b".into(),
    }));

    assert_eq!(controller.state().login_error.as_deref(), Some(SERVER_UNREACHABLE));
    assert!(store.load().is_none());
}

#[test]
fn upload_replaces_table_rows_and_shows_credentials() {
    let backend = admin_backend();
    *backend.uploaded.borrow_mut() = Some(vec![
        record("S7", "Gus", 55.0, 2.0),
        record("S8", "Hana", 91.0, 4.0),
    ]);
    let mut controller = booted(backend, MemoryTokenStore::with_token("T-admin"));
    controller.backend().calls.borrow_mut().clear();

    block_on(controller.dispatch(Action::UploadCsv {
        file_name: "marks.csv".into(),
        bytes: b"student_id,student_name,marks,time_study\n".to_vec(),
    }));

    let state = controller.state();
    let ids: Vec<&str> = state.table_rows.iter().map(|r| r.student_id.as_str()).collect();
    assert_eq!(ids, vec!["S7", "S8"]);
    assert!(state.alert.is_none());
    assert!(!state.busy);
    let ingest = state.ingest.as_ref().unwrap();
    assert_eq!(ingest.student_credentials[0].username, "Zed");

    assert_eq!(
        controller.backend().calls(),
        vec![
            "upload:marks.csv",
            "stats",
            "records",
            "/marks/histogram",
            "/marks/bar-chart"
        ]
    );
}

#[test]
fn upload_failure_raises_alert_and_keeps_rows() {
    let backend = FakeBackend {
        fail_upload: true,
        ..admin_backend()
    };
    let mut controller = booted(backend, MemoryTokenStore::with_token("T-admin"));

    block_on(controller.dispatch(Action::UploadCsv {
        file_name: "bad.csv".into(),
        bytes: vec![1, 2, 3],
    }));

    assert_eq!(controller.state().alert.as_deref(), Some(UPLOAD_FAILED));
    assert_eq!(controller.state().table_rows.len(), 3);

    block_on(controller.dispatch(Action::DismissAlert));
    assert!(controller.state().alert.is_none());
}

#[test]
fn edit_success_closes_modal_and_refreshes() {
    let mut controller = booted(admin_backend(), MemoryTokenStore::with_token("T-admin"));

    block_on(controller.dispatch(Action::OpenEdit(record("S2", "Ben", 39.9, 1.0))));
    assert_eq!(controller.state().edit.as_ref().unwrap().student_id, "S2");

    block_on(controller.dispatch(Action::SubmitEdit(RecordPatch {
        student_name: "Ben".into(),
        marks: 64.0,
        time_study: 2.5,
    })));

    let state = controller.state();
    assert!(state.edit.is_none());
    let ben = state.table_rows.iter().find(|r| r.student_id == "S2").unwrap();
    assert_eq!(ben.marks, "64");
    assert_eq!(ben.study_time, "2.5 hrs");
    assert_eq!(controller.backend().count("patch:S2"), 1);
}

#[test]
fn edit_failure_keeps_modal_open() {
    let backend = FakeBackend {
        fail_patch: true,
        ..admin_backend()
    };
    let mut controller = booted(backend, MemoryTokenStore::with_token("T-admin"));

    block_on(controller.dispatch(Action::OpenEdit(record("S1", "Alice", 72.0, 3.5))));
    block_on(controller.dispatch(Action::SubmitEdit(RecordPatch {
        student_name: "Alice".into(),
        marks: -4.0,
        time_study: 3.5,
    })));

    let state = controller.state();
    assert_eq!(state.alert.as_deref(), Some(UPDATE_FAILED));
    assert!(state.edit.is_some());
}

#[test]
fn failed_reload_is_silent() {
    let backend = FakeBackend {
        fail_reload: true,
        ..admin_backend()
    };
    let mut controller = booted(backend, MemoryTokenStore::with_token("T-admin"));
    let before = controller.state().clone();

    block_on(controller.dispatch(Action::ManualReload));

    assert_eq!(controller.state(), &before);
    assert_eq!(controller.backend().count("load-csv"), 1);
}

#[test]
fn successful_reload_refetches_analytics() {
    let mut controller = booted(admin_backend(), MemoryTokenStore::with_token("T-admin"));
    block_on(controller.dispatch(Action::ManualReload));

    assert_eq!(controller.backend().count("stats"), 2);
    assert_eq!(controller.backend().count("records"), 2);
    assert_eq!(
        controller.state().ingest.as_ref().map(|i| i.message.as_str()),
        Some("Data reloaded")
    );
}

#[test]
fn student_cannot_reach_admin_actions() {
    let backend = FakeBackend::default()
        .with_user("T1", alice())
        .with_records(class_records());
    let mut controller = booted(backend, MemoryTokenStore::with_token("T1"));
    let calls_before = controller.backend().calls().len();

    block_on(controller.dispatch(Action::SwitchView(View::DataTable)));
    block_on(controller.dispatch(Action::ManualReload));
    block_on(controller.dispatch(Action::UploadCsv {
        file_name: "x.csv".into(),
        bytes: vec![1],
    }));
    block_on(controller.dispatch(Action::OpenEdit(record("S2", "Ben", 39.9, 1.0))));

    let state = controller.state();
    assert_eq!(state.view, View::Overview);
    assert!(state.edit.is_none());
    assert!(state.table_rows.is_empty());
    assert_eq!(controller.backend().calls().len(), calls_before);
}

#[test]
fn data_table_view_refetches_records() {
    let mut controller = booted(admin_backend(), MemoryTokenStore::with_token("T-admin"));
    block_on(controller.dispatch(Action::SwitchView(View::DataTable)));

    assert_eq!(controller.state().view, View::DataTable);
    assert_eq!(controller.state().title(), "Data table");
    assert_eq!(controller.backend().count("records"), 2);
}

#[test]
fn reports_view_renders_from_cache() {
    let mut controller = booted(admin_backend(), MemoryTokenStore::with_token("T-admin"));
    let first_revision = controller.state().charts.as_ref().unwrap().revision;

    block_on(controller.dispatch(Action::SwitchView(View::Reports)));

    let state = controller.state();
    assert_eq!(state.title(), "Reports");
    assert_eq!(controller.backend().count("records"), 1);
    let charts = state.charts.as_ref().unwrap();
    assert!(charts.revision > first_revision);
    assert_eq!(charts.histogram.counts, [0, 1, 0, 1, 1]);
    assert_eq!(controller.backend().image_fetches.get(), 4);
}

#[test]
fn logout_clears_token_and_requests_reload() {
    let store = MemoryTokenStore::with_token("T-admin");
    let mut controller = booted(admin_backend(), store.clone());

    let outcome = block_on(controller.dispatch(Action::Logout));

    assert_eq!(outcome, Outcome::ReloadPage);
    assert!(store.load().is_none());
    assert_eq!(controller.state(), &AppState {
        screen: Screen::Login,
        ..AppState::default()
    });
}

#[test]
fn observer_sees_every_step() {
    let seen: Rc<RefCell<Vec<Screen>>> = Rc::default();
    let sink = seen.clone();
    let mut controller = Controller::new(admin_backend(), MemoryTokenStore::with_token("T-admin"))
        .with_observer(move |state: &AppState| sink.borrow_mut().push(state.screen));

    block_on(controller.dispatch(Action::Boot));

    let seen = seen.borrow();
    assert!(seen.len() >= 3);
    assert_eq!(seen.first(), Some(&Screen::Dashboard));
    assert!(seen.iter().all(|s| *s == Screen::Dashboard));
}
