//! Event loop driving [`ReceptionState`] against a [`ReceptionRepository`].
//!
//! The controller is the single consumer of events. Commands returned by the
//! reducer are executed as tasks in a [`JoinSet`]; each task resolves to the
//! completion event and only the controller ever touches the state.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::domain::catalog::Category;
use crate::dto::view::ReceptionView;
use crate::models::config::ReceptionSettings;
use crate::repository::{HttpRepository, ReceptionRepository};
use crate::services::ServiceResult;
use crate::state::{Command, Event, ReceptionState, SearchSettings};

pub struct ReceptionController<R> {
    state: ReceptionState,
    repo: Arc<R>,
    tasks: JoinSet<Event>,
}

impl ReceptionController<HttpRepository> {
    /// Builds a controller talking to the backend described by `settings`.
    pub fn from_settings(
        settings: &ReceptionSettings,
        categories: Vec<Category>,
    ) -> ServiceResult<Self> {
        settings.validate()?;
        let repo = HttpRepository::new(settings)?;
        Ok(Self::new(
            Arc::new(repo),
            categories,
            settings.search_settings(),
        ))
    }
}

impl<R> ReceptionController<R>
where
    R: ReceptionRepository + 'static,
{
    pub fn new(repo: Arc<R>, categories: Vec<Category>, search: SearchSettings) -> Self {
        Self {
            state: ReceptionState::new(categories, search),
            repo,
            tasks: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &ReceptionState {
        &self.state
    }

    pub fn view(&self) -> ReceptionView {
        ReceptionView::from(&self.state)
    }

    /// Number of spawned tasks that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Applies an event and starts every task it requests.
    pub fn dispatch(&mut self, event: Event) {
        for command in self.state.update(event) {
            self.spawn(command);
        }
    }

    /// Waits for the next task to finish and applies its event.
    ///
    /// Returns `false` when nothing is outstanding.
    pub async fn process_next(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Ok(event)) => {
                self.dispatch(event);
                true
            }
            Some(Err(err)) => {
                log::error!("Reception task was lost: {err}");
                true
            }
            None => false,
        }
    }

    /// Drains completions until no task is outstanding.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    /// Runs the command on its own task; a task that panics or is cancelled
    /// still yields the failure event of its command.
    fn spawn(&mut self, command: Command) {
        let repo = Arc::clone(&self.repo);
        let fallback = failure_event(&command);

        self.tasks.spawn(async move {
            let work = tokio::spawn(async move { execute(repo.as_ref(), command).await });
            match work.await {
                Ok(event) => event,
                Err(err) => {
                    log::error!("Reception task failed: {err}");
                    fallback
                }
            }
        });
    }
}

const TASK_FAILED: &str = "task failed";

/// Event reported when the task running `command` never finished.
fn failure_event(command: &Command) -> Event {
    match command {
        Command::FetchBrands { entry, ticket, .. } => Event::BrandsLoaded {
            entry: *entry,
            ticket: *ticket,
            result: Err(TASK_FAILED.to_string()),
        },
        Command::FetchModels { entry, ticket, .. } => Event::ModelsLoaded {
            entry: *entry,
            ticket: *ticket,
            result: Err(TASK_FAILED.to_string()),
        },
        Command::StartSearchTimer { ticket, .. } => Event::SearchTimerElapsed { ticket: *ticket },
        Command::SearchClients { ticket, .. } => Event::ClientsFound {
            ticket: *ticket,
            result: Err(TASK_FAILED.to_string()),
        },
        Command::SubmitAct { .. } => Event::SubmitCompleted {
            result: Err(TASK_FAILED.to_string()),
        },
        Command::ExpireNotice { ticket, .. } => Event::NoticeExpired(*ticket),
    }
}

async fn execute<R>(repo: &R, command: Command) -> Event
where
    R: ReceptionRepository + ?Sized,
{
    match command {
        Command::FetchBrands {
            entry,
            category,
            ticket,
        } => Event::BrandsLoaded {
            entry,
            ticket,
            result: repo.list_brands(category).await.map_err(|err| {
                log::error!("Failed to load brands for category {category}: {err}");
                err.to_string()
            }),
        },
        Command::FetchModels {
            entry,
            brand,
            ticket,
        } => Event::ModelsLoaded {
            entry,
            ticket,
            result: repo.list_models(brand).await.map_err(|err| {
                log::error!("Failed to load models for brand {brand}: {err}");
                err.to_string()
            }),
        },
        Command::StartSearchTimer { ticket, delay } => {
            tokio::time::sleep(delay).await;
            Event::SearchTimerElapsed { ticket }
        }
        Command::SearchClients { query, ticket } => Event::ClientsFound {
            ticket,
            result: repo.search_clients(&query).await.map_err(|err| {
                log::error!("Failed to search clients: {err}");
                err.to_string()
            }),
        },
        Command::SubmitAct { payload } => Event::SubmitCompleted {
            result: repo.submit_act(&payload).await.map_err(|err| err.to_string()),
        },
        Command::ExpireNotice { ticket, delay } => {
            tokio::time::sleep(delay).await;
            Event::NoticeExpired(ticket)
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::catalog::{Brand, EquipmentModel};
    use crate::domain::client::ClientRecord;
    use crate::domain::types::{
        BrandId, BrandName, CategoryId, CategoryName, ClientId, ClientShortName, EntryIndex,
        ModelFullName, ModelId,
    };
    use crate::dto::api::SubmitResponse;
    use crate::forms::client::NewClientField;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::state::{AlertKind, SelectStatus, SubmissionPhase};

    fn categories() -> Vec<Category> {
        vec![Category {
            id: CategoryId::new(1).expect("id"),
            name: CategoryName::new("Генераторы").expect("name"),
        }]
    }

    fn controller(repo: MockRepository) -> ReceptionController<MockRepository> {
        ReceptionController::new(Arc::new(repo), categories(), SearchSettings::default())
    }

    #[tokio::test]
    async fn category_selection_loads_brands() {
        let mut repo = MockRepository::new();
        repo.expect_list_brands()
            .withf(|category| category.get() == 1)
            .times(1)
            .returning(|_| {
                Ok(vec![Brand {
                    id: BrandId::new(5).expect("id"),
                    name: BrandName::new("Huter").expect("name"),
                }])
            });
        let mut controller = controller(repo);

        controller.dispatch(Event::CategorySelected {
            entry: EntryIndex::new(0),
            category: CategoryId::new(1).ok(),
        });
        assert_eq!(controller.in_flight(), 1);
        controller.settle().await;

        let entry = controller.state().entry(EntryIndex::new(0)).expect("entry");
        assert_eq!(entry.brands.status(), SelectStatus::Ready);
        assert_eq!(entry.brands.options()[0].name.as_str(), "Huter");
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_model_lookup_becomes_notice() {
        let mut repo = MockRepository::new();
        repo.expect_list_brands().returning(|_| {
            Ok(vec![Brand {
                id: BrandId::new(5).expect("id"),
                name: BrandName::new("Huter").expect("name"),
            }])
        });
        repo.expect_list_models()
            .returning(|_| Err(RepositoryError::Status(500)));
        let mut controller = controller(repo);
        let entry = EntryIndex::new(0);

        controller.dispatch(Event::CategorySelected {
            entry,
            category: CategoryId::new(1).ok(),
        });
        controller.settle().await;
        controller.dispatch(Event::BrandSelected {
            entry,
            brand: BrandId::new(5).ok(),
        });
        assert!(controller.process_next().await);

        let state = controller.state();
        assert_eq!(
            state.entry(entry).expect("entry").models.status(),
            SelectStatus::Failed
        );
        assert_eq!(state.notices().len(), 1);
        assert!(state.alert().is_none());

        controller.settle().await;
        assert!(controller.state().notices().is_empty());
    }

    #[tokio::test]
    async fn panicking_lookup_still_settles() {
        let mut repo = MockRepository::new();
        repo.expect_list_brands()
            .returning(|_| panic!("connection pool poisoned"));
        let mut controller = controller(repo);
        let entry = EntryIndex::new(0);

        controller.dispatch(Event::CategorySelected {
            entry,
            category: CategoryId::new(1).ok(),
        });
        assert!(controller.process_next().await);

        assert_eq!(
            controller.state().entry(entry).expect("entry").brands.status(),
            SelectStatus::Failed
        );
        assert_eq!(controller.state().notices().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_submit_reopens_the_form() {
        let mut repo = MockRepository::new();
        repo.expect_list_brands().returning(|_| {
            Ok(vec![Brand {
                id: BrandId::new(5).expect("id"),
                name: BrandName::new("Huter").expect("name"),
            }])
        });
        repo.expect_list_models().returning(|_| {
            Ok(vec![EquipmentModel {
                id: ModelId::new(9).expect("id"),
                full_name: ModelFullName::new("Генераторы Huter DY3000L").expect("name"),
            }])
        });
        repo.expect_submit_act()
            .times(1)
            .returning(|_| panic!("serializer blew up"));
        let mut controller = controller(repo);
        let entry = EntryIndex::new(0);

        controller.dispatch(Event::CategorySelected {
            entry,
            category: CategoryId::new(1).ok(),
        });
        controller.settle().await;
        controller.dispatch(Event::BrandSelected {
            entry,
            brand: BrandId::new(5).ok(),
        });
        controller.settle().await;
        controller.dispatch(Event::ModelSelected {
            entry,
            model: ModelId::new(9).ok(),
        });
        controller.dispatch(Event::NewClientToggled(true));
        for field in [
            NewClientField::ShortName("Лютик".to_string()),
            NewClientField::FullName("ООО Лютик".to_string()),
            NewClientField::ContactPerson("Сидоров С.С.".to_string()),
            NewClientField::Phone("+79005554433".to_string()),
        ] {
            controller.dispatch(Event::NewClientEdited(field));
        }

        controller.dispatch(Event::SubmitRequested);
        assert_eq!(controller.state().phase(), &SubmissionPhase::Submitting);
        controller.settle().await;

        assert_eq!(controller.in_flight(), 0);
        assert_eq!(controller.state().phase(), &SubmissionPhase::Editing);
        assert_eq!(
            controller.state().alert().map(|alert| alert.kind),
            Some(AlertKind::Transport)
        );
        assert!(controller.view().submit_enabled);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_submit_act().times(0);
        let mut controller = controller(repo);

        controller.dispatch(Event::SubmitRequested);

        assert_eq!(controller.in_flight(), 0);
        assert!(controller.state().alert().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn successful_submit_opens_confirmation() {
        let mut repo = MockRepository::new();
        repo.expect_list_brands().returning(|_| {
            Ok(vec![Brand {
                id: BrandId::new(5).expect("id"),
                name: BrandName::new("Huter").expect("name"),
            }])
        });
        repo.expect_list_models().returning(|_| {
            Ok(vec![EquipmentModel {
                id: ModelId::new(9).expect("id"),
                full_name: ModelFullName::new("Генераторы Huter DY3000L").expect("name"),
            }])
        });
        repo.expect_search_clients().times(1).returning(|_| {
            Ok(vec![ClientRecord::new(
                ClientId::new(3).expect("id"),
                ClientShortName::new("Ромашка").expect("name"),
                "ООО Ромашка".to_string(),
                "Петров П.П.".to_string(),
                "+79001234567".to_string(),
                None,
                None,
            )])
        });
        repo.expect_submit_act()
            .withf(|payload| payload.equipment_list.len() == 1)
            .times(1)
            .returning(|_| {
                Ok(SubmitResponse {
                    success: true,
                    act_number: Some("A-17".to_string()),
                    error: None,
                })
            });
        let mut controller = controller(repo);
        let entry = EntryIndex::new(0);

        controller.dispatch(Event::CategorySelected {
            entry,
            category: CategoryId::new(1).ok(),
        });
        controller.settle().await;
        controller.dispatch(Event::BrandSelected {
            entry,
            brand: BrandId::new(5).ok(),
        });
        controller.settle().await;
        controller.dispatch(Event::ModelSelected {
            entry,
            model: ModelId::new(9).ok(),
        });
        controller.dispatch(Event::SearchInput("Ром".to_string()));
        controller.settle().await;
        controller.dispatch(Event::ClientChosen(ClientId::new(3).expect("id")));
        controller.dispatch(Event::SubmitRequested);
        assert!(!controller.view().submit_enabled);
        controller.settle().await;

        assert_eq!(
            controller.state().phase(),
            &SubmissionPhase::Succeeded {
                act_number: "A-17".to_string()
            }
        );
        assert_eq!(controller.view().confirmation.as_deref(), Some("A-17"));
    }
}
