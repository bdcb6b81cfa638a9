//! crates/schemes_connect_core/src/recommendation.rs
//!
//! The recommendation request flow: validate the profile, ask the backend for
//! schemes, and reflect the outcome as a state plus a one-shot notice.
//!
//! Only the most recent request may apply its result. Starting a request
//! cancels the token of the one in flight, and a completion whose token has
//! been cancelled is dropped without touching the state or the directory.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::directory::SchemeDirectory;
use crate::domain::{ProfileDraft, ProfileValidationError, Scheme, UserProfile};
use crate::ports::{PortError, PortResult, RecommendationService};

/// Where the flow is in its request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationState {
    Idle,
    Loading,
    Loaded { count: usize },
    /// The backend answered with an empty list; not an error.
    Empty,
    Failed { reason: String },
}

/// A user-visible, one-shot notification about a finished request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SchemesFound(usize),
    NoSchemesFound,
    RequestFailed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::SchemesFound(_) => "Schemes Found!",
            Notice::NoSchemesFound => "No Schemes Found",
            Notice::RequestFailed => "Error",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notice::SchemesFound(count) => {
                format!("We found {count} schemes matching your profile.")
            }
            Notice::NoSchemesFound => "Try adjusting your profile criteria.".to_string(),
            Notice::RequestFailed => {
                "Failed to fetch recommendations. Please try again.".to_string()
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::RequestFailed)
    }
}

/// One issued request. Fetch it, then hand it back to `complete`.
#[derive(Debug)]
pub struct RecommendationTicket {
    profile: UserProfile,
    token: CancellationToken,
}

impl RecommendationTicket {
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_superseded(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs the backend call. Returns early if a newer request supersedes this one.
    pub async fn fetch(&self, service: &dyn RecommendationService) -> PortResult<Vec<Scheme>> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                Err(PortError::Unexpected("superseded by a newer request".to_string()))
            }
            result = service.recommend(&self.profile) => result,
        }
    }
}

pub struct RecommendationFlow {
    service: Arc<dyn RecommendationService>,
    state: RecommendationState,
    directory: SchemeDirectory,
    last_profile: Option<UserProfile>,
    in_flight: Option<CancellationToken>,
}

impl RecommendationFlow {
    pub fn new(service: Arc<dyn RecommendationService>) -> Self {
        Self {
            service,
            state: RecommendationState::Idle,
            directory: SchemeDirectory::default(),
            last_profile: None,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &RecommendationState {
        &self.state
    }

    pub fn directory(&self) -> &SchemeDirectory {
        &self.directory
    }

    pub fn is_loading(&self) -> bool {
        self.state == RecommendationState::Loading
    }

    /// Validates the draft and issues a new request, superseding any in flight.
    /// An incomplete draft never reaches the backend.
    pub fn begin(
        &mut self,
        draft: &ProfileDraft,
    ) -> Result<RecommendationTicket, ProfileValidationError> {
        let profile = draft.validate()?;
        Ok(self.start(profile))
    }

    /// Re-issues the last request verbatim. `None` if nothing was requested yet.
    pub fn begin_refresh(&mut self) -> Option<RecommendationTicket> {
        let profile = self.last_profile.clone()?;
        Some(self.start(profile))
    }

    fn start(&mut self, profile: UserProfile) -> RecommendationTicket {
        if let Some(previous) = self.in_flight.take() {
            info!("Superseding in-flight recommendation request");
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.last_profile = Some(profile.clone());
        self.state = RecommendationState::Loading;
        RecommendationTicket { profile, token }
    }

    /// Applies a finished request. Returns the notice to show, or `None` when
    /// the ticket was superseded and its result discarded.
    pub fn complete(
        &mut self,
        ticket: RecommendationTicket,
        result: PortResult<Vec<Scheme>>,
    ) -> Option<Notice> {
        if ticket.is_superseded() {
            info!("Discarding result of a superseded recommendation request");
            return None;
        }
        self.in_flight = None;

        match result {
            Ok(schemes) => {
                info!(count = schemes.len(), "Recommendations received");
                self.directory.replace(schemes);
                let count = self.directory.len();
                if count == 0 {
                    self.state = RecommendationState::Empty;
                    Some(Notice::NoSchemesFound)
                } else {
                    self.state = RecommendationState::Loaded { count };
                    Some(Notice::SchemesFound(count))
                }
            }
            Err(e) => {
                error!("Failed to fetch recommendations: {}", e);
                self.state = RecommendationState::Failed {
                    reason: e.to_string(),
                };
                Some(Notice::RequestFailed)
            }
        }
    }

    /// Validates, requests and applies in one step.
    pub async fn request(
        &mut self,
        draft: &ProfileDraft,
    ) -> Result<Option<Notice>, ProfileValidationError> {
        let ticket = self.begin(draft)?;
        Ok(self.run(ticket).await)
    }

    pub async fn refresh(&mut self) -> Option<Notice> {
        let ticket = self.begin_refresh()?;
        self.run(ticket).await
    }

    async fn run(&mut self, ticket: RecommendationTicket) -> Option<Notice> {
        let service = Arc::clone(&self.service);
        let result = ticket.fetch(service.as_ref()).await;
        self.complete(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::domain::ProfileField;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock recommender that replays a fixed outcome and records requests.
    struct MockRecommender {
        outcome: Mutex<Option<PortResult<Vec<Scheme>>>>,
        calls: Mutex<Vec<UserProfile>>,
    }

    impl MockRecommender {
        fn returning(result: PortResult<Vec<Scheme>>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(result)),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<UserProfile> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecommendationService for MockRecommender {
        async fn recommend(&self, profile: &UserProfile) -> PortResult<Vec<Scheme>> {
            self.calls.lock().unwrap().push(profile.clone());
            match self.outcome.lock().unwrap().as_ref() {
                Some(Ok(schemes)) => Ok(schemes.clone()),
                Some(Err(_)) | None => Err(PortError::Status {
                    endpoint: "/api/recommend".to_string(),
                    status: 500,
                }),
            }
        }
    }

    fn farmer() -> ProfileDraft {
        ProfileDraft {
            full_name: None,
            age: "30".to_string(),
            gender: "Male".to_string(),
            income: "2.5L - 5L".to_string(),
            occupation: "Farmer".to_string(),
            location: "Maharashtra".to_string(),
            caste_category: "OBC".to_string(),
            disability: "No".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_backend_list_reaches_empty_state_not_failure() {
        let backend = MockRecommender::returning(Ok(Vec::new()));
        let mut flow = RecommendationFlow::new(backend.clone());

        let notice = flow.request(&farmer()).await.unwrap();

        assert_eq!(notice, Some(Notice::NoSchemesFound));
        assert_eq!(flow.state(), &RecommendationState::Empty);
        assert!(flow.directory().is_empty());
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn results_populate_directory() {
        let schemes: Vec<Scheme> = catalog::schemes().into_iter().take(4).collect();
        let backend = MockRecommender::returning(Ok(schemes.clone()));
        let mut flow = RecommendationFlow::new(backend);

        let notice = flow.request(&farmer()).await.unwrap().unwrap();

        assert_eq!(notice, Notice::SchemesFound(4));
        assert_eq!(
            notice.description(),
            "We found 4 schemes matching your profile."
        );
        assert_eq!(flow.state(), &RecommendationState::Loaded { count: 4 });
        assert_eq!(flow.directory().schemes(), schemes.as_slice());
    }

    #[tokio::test]
    async fn duplicate_ids_from_backend_are_collapsed() {
        let first = catalog::find(101).unwrap();
        let mut repeat = catalog::find(202).unwrap();
        repeat.id = 101;
        let backend = MockRecommender::returning(Ok(vec![first.clone(), repeat]));
        let mut flow = RecommendationFlow::new(backend);

        let notice = flow.request(&farmer()).await.unwrap();

        assert_eq!(notice, Some(Notice::SchemesFound(1)));
        assert_eq!(flow.state(), &RecommendationState::Loaded { count: 1 });
        assert_eq!(flow.directory().get(101), Some(&first));
    }

    #[tokio::test]
    async fn backend_failure_is_a_notice_without_retry() {
        let backend = MockRecommender::returning(Err(PortError::Transport("refused".into())));
        let mut flow = RecommendationFlow::new(backend.clone());

        let notice = flow.request(&farmer()).await.unwrap().unwrap();

        assert!(notice.is_error());
        assert!(matches!(flow.state(), RecommendationState::Failed { .. }));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn incomplete_profile_is_never_sent() {
        let backend = MockRecommender::returning(Ok(Vec::new()));
        let mut flow = RecommendationFlow::new(backend.clone());
        let draft = ProfileDraft {
            occupation: String::new(),
            ..farmer()
        };

        let err = flow.request(&draft).await.unwrap_err();

        assert_eq!(
            err,
            ProfileValidationError::Missing(vec![ProfileField::Occupation])
        );
        assert!(backend.calls().is_empty());
        assert_eq!(flow.state(), &RecommendationState::Idle);
    }

    #[tokio::test]
    async fn refresh_reissues_identical_request() {
        let backend = MockRecommender::returning(Ok(Vec::new()));
        let mut flow = RecommendationFlow::new(backend.clone());

        assert_eq!(flow.refresh().await, None);
        flow.request(&farmer()).await.unwrap();
        flow.refresh().await;

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let backend = MockRecommender::returning(Ok(Vec::new()));
        let mut flow = RecommendationFlow::new(backend);

        let stale = flow.begin(&farmer()).unwrap();
        let fresh = flow.begin(&farmer()).unwrap();
        assert!(stale.is_superseded());
        assert!(!fresh.is_superseded());

        let newest: Vec<Scheme> = catalog::schemes().into_iter().take(2).collect();
        assert_eq!(
            flow.complete(fresh, Ok(newest.clone())),
            Some(Notice::SchemesFound(2))
        );
        // The older request finishes last; it must not clobber the newer result.
        assert_eq!(flow.complete(stale, Ok(catalog::schemes())), None);
        assert_eq!(flow.directory().schemes(), newest.as_slice());
        assert_eq!(flow.state(), &RecommendationState::Loaded { count: 2 });
    }

    #[tokio::test]
    async fn superseded_ticket_stops_fetching() {
        let backend = MockRecommender::returning(Ok(Vec::new()));
        let mut flow = RecommendationFlow::new(backend.clone());

        let stale = flow.begin(&farmer()).unwrap();
        let _fresh = flow.begin(&farmer()).unwrap();

        assert!(stale.fetch(backend.as_ref()).await.is_err());
        assert!(flow.is_loading());
    }
}
