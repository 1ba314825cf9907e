use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::{Alert, Confirm, Generation, Load, Mount, Mutation, Phase, Submit, authorize};
use crate::api::{ApiClient, Resource};
use crate::auth::Session;
use crate::error::{ApiError, ApiResult};
use crate::model::{Application, ApplicationDraft, ApplicationType, Employee};
use crate::render::{FieldDisplay, Render, name_or_placeholder};
use crate::utils::filter::{Searchable, filter};
use crate::validate::{Validate, ValidationErrors};

/// Whose applications the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The signed-in employee's own requests.
    Mine,
    /// Every request, for reviewers.
    All,
}

#[derive(Debug, Clone)]
pub struct ApplicationsState {
    pub phase: Phase,
    pub applications: Vec<Application>,
    pub types: Vec<ApplicationType>,
    /// Only fetched for [`Scope::All`], to resolve applicant names.
    pub employees: Vec<Employee>,
    pub search: String,
    pub errors: ValidationErrors,
    pub alert: Option<Alert>,
}

impl Default for ApplicationsState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            applications: Vec::new(),
            types: Vec::new(),
            employees: Vec::new(),
            search: String::new(),
            errors: ValidationErrors::new(),
            alert: None,
        }
    }
}

/// An application joined with the names it references.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRow {
    pub application: Application,
    pub employee_name: Option<String>,
    pub type_name: Option<String>,
}

impl Searchable for ApplicationRow {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = self.application.search_fields();
        fields.extend(self.employee_name.as_deref());
        fields.extend(self.type_name.as_deref());
        fields
    }
}

impl Render for ApplicationRow {
    fn title(&self) -> String {
        name_or_placeholder(self.type_name.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        let mut fields = vec![
            FieldDisplay::new("Empleado", name_or_placeholder(self.employee_name.as_deref())),
            FieldDisplay::new("Motivo", self.application.title()),
        ];
        fields.extend(self.application.fields());
        fields
    }
}

pub struct ApplicationsScreen {
    api: ApiClient,
    scope: Scope,
    state: Mutex<ApplicationsState>,
    generation: Generation,
}

impl ApplicationsScreen {
    pub async fn mount(session: &Session, api: &ApiClient, scope: Scope) -> Mount<Self> {
        let Some(api) = authorize(session, api) else {
            info!("No session, redirecting to login");
            return Mount::RedirectToLogin;
        };

        let screen = Self {
            api,
            scope,
            state: Mutex::new(ApplicationsState::default()),
            generation: Generation::default(),
        };
        screen.load().await;
        Mount::Ready(screen)
    }

    fn lock(&self) -> MutexGuard<'_, ApplicationsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ApplicationsState {
        self.lock().clone()
    }

    pub fn set_search(&self, text: impl Into<String>) {
        self.lock().search = text.into();
    }

    pub fn dismiss_alert(&self) -> Option<Alert> {
        self.lock().alert.take()
    }

    /// Applications joined with employee and type names, filtered by the search text.
    pub fn rows(&self) -> Vec<ApplicationRow> {
        let state = self.lock();
        let rows: Vec<_> = state
            .applications
            .iter()
            .map(|application| ApplicationRow {
                employee_name: application
                    .employee_id
                    .and_then(|id| state.employees.iter().find(|e| e.id == id))
                    .map(Employee::full_name),
                type_name: application
                    .application_type_id
                    .and_then(|id| state.types.iter().find(|t| t.id == id))
                    .and_then(|t| t.name.clone()),
                application: application.clone(),
            })
            .collect();
        filter(&rows, &state.search)
    }

    async fn fetch_applications(&self) -> ApiResult<Vec<Application>> {
        match self.scope {
            Scope::Mine => self.api.my_applications().await,
            Scope::All => self.api.all_applications().await,
        }
    }

    async fn fetch_employees(&self) -> ApiResult<Vec<Employee>> {
        match self.scope {
            Scope::Mine => Ok(Vec::new()),
            Scope::All => self.api.list::<Employee>().await,
        }
    }

    /// Issues every read of the screen concurrently and waits for all of them.
    ///
    /// Each successful read is applied even when a sibling fails; any failure
    /// raises one alert for the whole batch.
    pub async fn load(&self) -> Load {
        let ticket = self.generation.begin();
        self.lock().phase = Phase::Loading;

        let (applications, types, employees) = futures::join!(
            self.fetch_applications(),
            self.api.list::<ApplicationType>(),
            self.fetch_employees(),
        );

        let mut state = self.lock();
        if !self.generation.is_current(ticket) {
            debug!(ticket, "Discarding superseded applications response");
            return Load::Superseded;
        }
        state.phase = Phase::Ready;

        let mut failure: Option<ApiError> = None;
        match applications {
            Ok(items) => state.applications = items,
            Err(e) => failure = failure.or(Some(e)),
        }
        match types {
            Ok(items) => state.types = items,
            Err(e) => failure = failure.or(Some(e)),
        }
        match employees {
            Ok(items) => state.employees = items,
            Err(e) => failure = failure.or(Some(e)),
        }

        match failure {
            None => Load::Loaded,
            Some(err) => {
                warn!(scope = ?self.scope, error = %err, "Applications load failed");
                state.alert = Some(Alert::from_error("Error al cargar", &err));
                Load::Failed(err)
            }
        }
    }

    /// Files a new application (multipart), then reloads.
    pub async fn submit(&self, draft: &ApplicationDraft, today: NaiveDate) -> Submit {
        if let Err(errors) = draft.validate(today) {
            debug!(%errors, "Application form rejected");
            self.lock().errors = errors.clone();
            return Submit::Invalid(errors);
        }
        self.lock().errors = ValidationErrors::new();

        if let Err(err) = self.api.create::<Application>(draft).await {
            warn!(error = %err, "Application submit failed");
            self.lock().alert = Some(Alert::from_error("Error al enviar la solicitud", &err));
            return Submit::Failed(err);
        }

        self.load().await;
        Submit::Saved
    }

    /// Approves or rejects after confirmation, then reloads.
    pub async fn decide(&self, id: u64, approved: bool, confirm: &dyn Confirm) -> Mutation {
        let prompt = if approved {
            "¿Aprobar esta solicitud?"
        } else {
            "¿Rechazar esta solicitud?"
        };
        if !confirm.confirm(prompt) {
            return Mutation::Cancelled;
        }

        if let Err(err) = self.api.decide_application(id, approved).await {
            warn!(id, approved, error = %err, "Application decision failed");
            self.lock().alert = Some(Alert::from_error("Error al actualizar la solicitud", &err));
            return Mutation::Failed(err);
        }

        self.load().await;
        Mutation::Done
    }

    pub async fn delete(&self, id: u64, confirm: &dyn Confirm) -> Mutation {
        if !confirm.confirm(&format!("¿Eliminar {}?", Application::LABEL)) {
            return Mutation::Cancelled;
        }

        if let Err(err) = self.api.delete::<Application>(id).await {
            warn!(id, error = %err, "Application delete failed");
            self.lock().alert = Some(Alert::from_error("Error al eliminar", &err));
            return Mutation::Failed(err);
        }

        self.load().await;
        Mutation::Done
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::api::testing::RecordingTransport;
    use crate::api::{Method, RequestBody};
    use crate::auth::MemoryStore;
    use crate::model::ApplicationStatus;
    use crate::validate::END_NOT_AFTER_START;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn session() -> Session {
        Session::new(Arc::new(MemoryStore::with_entry("token", "abc123")), "token")
    }

    fn backend() -> Arc<RecordingTransport> {
        RecordingTransport::replying(|req| match req.path.as_str() {
            "/applications/all" | "/applications/me" => Ok(json!([
                {"id": 1, "employeeId": 10, "applicationTypeId": 2, "reason": "Cita médica",
                 "dateStart": "2026-10-20", "dateEnd": "2026-10-21", "status": "pending"},
                {"id": 2, "employeeId": 11, "applicationTypeId": 3, "reason": "Viaje",
                 "dateStart": "2026-11-01", "dateEnd": "2026-11-05", "status": "approved"}
            ])),
            "/application-type/all" => Ok(json!([
                {"id": 2, "name": "Permiso"},
                {"id": 3, "name": "Vacaciones"}
            ])),
            "/employees/all" => Ok(json!([
                {"id": 10, "firstName": "Ana", "lastName": "Pérez"}
            ])),
            _ => Ok(serde_json::Value::Null),
        })
    }

    async fn mounted(transport: &Arc<RecordingTransport>, scope: Scope) -> ApplicationsScreen {
        ApplicationsScreen::mount(&session(), &ApiClient::new(transport.clone()), scope)
            .await
            .ready()
            .unwrap()
    }

    #[tokio::test]
    async fn reviewer_load_fetches_all_three_collections() {
        let transport = backend();
        let screen = mounted(&transport, Scope::All).await;

        let mut log = transport.log();
        log.sort();
        assert_eq!(
            log,
            ["GET /application-type/all", "GET /applications/all", "GET /employees/all"]
        );

        let rows = screen.rows();
        assert_eq!(rows[0].employee_name.as_deref(), Some("Ana Pérez"));
        assert_eq!(rows[0].type_name.as_deref(), Some("Permiso"));
        assert_eq!(rows[1].employee_name, None);
        assert_eq!(rows[1].title(), "Vacaciones");
        assert_eq!(rows[1].fields()[0].value, crate::render::NO_NAME);
    }

    #[tokio::test]
    async fn missing_token_redirects_without_fetching() {
        let transport = backend();
        let signed_out = Session::new(Arc::new(MemoryStore::new()), "token");

        let mount =
            ApplicationsScreen::mount(&signed_out, &ApiClient::new(transport.clone()), Scope::All)
                .await;

        assert!(matches!(mount, Mount::RedirectToLogin));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn stale_batch_is_discarded() {
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = reads.clone();
        let transport = RecordingTransport::replying(move |req| match req.path.as_str() {
            "/applications/me" => {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(json!([{"id": n as u64 + 1, "reason": format!("load-{n}"),
                           "dateStart": "2026-10-20", "dateEnd": "2026-10-21"}]))
            }
            _ => Ok(json!([])),
        });
        let screen = mounted(&transport, Scope::Mine).await;
        assert_eq!(transport.calls().len(), 2);

        // The applications read of the next load stalls until released.
        let gate = Arc::new(Notify::new());
        transport.hold(2, gate.clone());

        let slow = screen.load();
        let fast = async {
            let outcome = screen.load().await;
            gate.notify_one();
            outcome
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow, Load::Superseded);
        assert_eq!(fast, Load::Loaded);
        let state = screen.state();
        assert_eq!(state.applications[0].reason.as_deref(), Some("load-1"));
        assert_eq!(state.phase, Phase::Ready);
    }

    #[tokio::test]
    async fn zoneless_timestamp_keeps_the_whole_list() {
        let transport = RecordingTransport::replying(|req| match req.path.as_str() {
            "/applications/me" => Ok(json!([
                {"id": 1, "dateStart": "2026-10-20", "dateEnd": "2026-10-21",
                 "status": "pending", "createdAt": "2026-10-18T09:30:00Z"},
                {"id": 2, "dateStart": "2026-10-22", "dateEnd": "2026-10-23",
                 "status": null, "createdAt": "2026-10-18T10:00:00"}
            ])),
            _ => Ok(json!([])),
        });
        let screen = mounted(&transport, Scope::Mine).await;

        let state = screen.state();
        assert_eq!(state.applications.len(), 2);
        assert!(state.alert.is_none());
        assert_eq!(state.applications[1].status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn own_scope_skips_employee_lookup() {
        let transport = backend();
        let screen = mounted(&transport, Scope::Mine).await;

        assert!(!transport.log().contains(&"GET /employees/all".to_string()));
        assert!(transport.log().contains(&"GET /applications/me".to_string()));
        assert_eq!(screen.state().applications.len(), 2);
    }

    #[tokio::test]
    async fn partial_batch_failure_keeps_fulfilled_reads() {
        let transport = RecordingTransport::replying(|req| match req.path.as_str() {
            "/applications/all" => Ok(json!([
                {"id": 1, "dateStart": "2026-10-20", "dateEnd": "2026-10-21"}
            ])),
            "/employees/all" => Ok(json!([])),
            _ => Err(ApiError::from_response(500, r#"{"error":"boom"}"#)),
        });
        let screen = mounted(&transport, Scope::All).await;

        let state = screen.state();
        assert_eq!(state.applications.len(), 1);
        assert!(state.types.is_empty());
        assert_eq!(state.alert.map(|a| a.message), Some("boom (HTTP 500)".to_string()));
    }

    #[tokio::test]
    async fn search_matches_joined_names_and_status() {
        let transport = backend();
        let screen = mounted(&transport, Scope::All).await;

        screen.set_search("vacac");
        assert_eq!(screen.rows().len(), 1);
        screen.set_search("pérez");
        assert_eq!(screen.rows()[0].application.id, 1);
        screen.set_search("APROBADA");
        assert_eq!(screen.rows()[0].application.status, ApplicationStatus::Approved);
    }

    #[tokio::test]
    async fn invalid_dates_block_submission() {
        let transport = backend();
        let screen = mounted(&transport, Scope::Mine).await;
        let calls_before = transport.calls().len();

        let draft = ApplicationDraft {
            application_type_id: Some(2),
            reason: "Trámite".into(),
            date_start: NaiveDate::from_ymd_opt(2026, 10, 20),
            date_end: NaiveDate::from_ymd_opt(2026, 10, 19),
        };
        let outcome = screen.submit(&draft, today()).await;

        let Submit::Invalid(errors) = outcome else {
            panic!("expected invalid, got {outcome:?}");
        };
        assert_eq!(errors.get("dateEnd"), Some(END_NOT_AFTER_START));
        assert_eq!(transport.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn submit_posts_multipart_then_reloads() {
        let transport = backend();
        let screen = mounted(&transport, Scope::Mine).await;
        let calls_before = transport.calls().len();

        let draft = ApplicationDraft {
            application_type_id: Some(2),
            reason: "Trámite".into(),
            date_start: Some(today()),
            date_end: NaiveDate::from_ymd_opt(2026, 10, 19),
        };
        assert_eq!(screen.submit(&draft, today()).await, Submit::Saved);

        let calls = transport.calls();
        let post = &calls[calls_before];
        assert_eq!((post.method, post.path.as_str()), (Method::Post, "/applications/"));
        assert!(matches!(post.body, RequestBody::Form(ref f) if f.len() == 4));
        assert_eq!(calls.len(), calls_before + 3);
    }

    #[tokio::test]
    async fn decision_requires_confirmation() {
        let transport = backend();
        let screen = mounted(&transport, Scope::All).await;
        let calls_before = transport.calls().len();

        assert_eq!(screen.decide(1, true, &|_: &str| false).await, Mutation::Cancelled);
        assert_eq!(transport.calls().len(), calls_before);

        assert_eq!(screen.decide(1, true, &|_: &str| true).await, Mutation::Done);
        let calls = transport.calls();
        let put = &calls[calls_before];
        assert_eq!(put.path, "/applications/1/approve");
        assert_eq!(put.query, vec![("approved".to_string(), "true".to_string())]);
        assert_eq!(calls.len(), calls_before + 4);
    }
}
