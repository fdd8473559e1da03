//! Owned state of the reception form and the reducer that drives it.
//!
//! Every user action and every completed remote call is an [`Event`]. Applying
//! an event mutates [`ReceptionState`] and returns the [`Command`]s that must
//! be executed (lookups, timers, submission). The reducer never performs I/O,
//! so the whole form logic can be exercised synchronously.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::catalog::{Brand, Category, EquipmentModel};
use crate::domain::client::ClientRecord;
use crate::domain::equipment::GuaranteeType;
use crate::domain::types::{BrandId, CategoryId, ClientId, EntryIndex, ModelId};
use crate::dto::api::SubmitResponse;
use crate::forms::client::NewClientField;
use crate::forms::reception::ReceptionActPayload;

pub mod client;
pub mod equipment;
pub mod submission;

pub use client::{ClientResolver, ClientSelection};
pub use equipment::{CascadeSelect, EntryField, EntryState, SelectStatus};
pub use submission::{Alert, AlertKind, SubmissionPhase};

pub const DEFAULT_SEARCH_MIN_CHARS: usize = 2;
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// How long a non-blocking notice stays on screen.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(5);

/// Outcome of a remote lookup as seen by the reducer.
pub type LookupResult<T> = Result<T, String>;

/// Identifies one asynchronous request.
///
/// Tickets grow monotonically; a response is applied only when its ticket is
/// still the one the receiving widget waits for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Non-blocking message about a degraded lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub ticket: Ticket,
    pub message: String,
}

/// Tunables of the client search box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    /// Shortest query that is sent to the client directory.
    pub min_chars: usize,
    /// Quiet period after the last keystroke before a search is issued.
    pub debounce: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_SEARCH_MIN_CHARS,
            debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// Everything that can happen to the form.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    AddEntry,
    RemoveEntry(EntryIndex),
    CategorySelected {
        entry: EntryIndex,
        category: Option<CategoryId>,
    },
    BrandSelected {
        entry: EntryIndex,
        brand: Option<BrandId>,
    },
    ModelSelected {
        entry: EntryIndex,
        model: Option<ModelId>,
    },
    EntryEdited {
        entry: EntryIndex,
        field: EntryField,
    },
    BrandsLoaded {
        entry: EntryIndex,
        ticket: Ticket,
        result: LookupResult<Vec<Brand>>,
    },
    ModelsLoaded {
        entry: EntryIndex,
        ticket: Ticket,
        result: LookupResult<Vec<EquipmentModel>>,
    },
    SearchInput(String),
    SearchTimerElapsed {
        ticket: Ticket,
    },
    ClientsFound {
        ticket: Ticket,
        result: LookupResult<Vec<ClientRecord>>,
    },
    ClientChosen(ClientId),
    ContactPersonEdited(String),
    ContactPhoneEdited(String),
    NewClientToggled(bool),
    NewClientEdited(NewClientField),
    ActGuaranteeSelected(GuaranteeType),
    SubmitRequested,
    SubmitCompleted {
        result: LookupResult<SubmitResponse>,
    },
    ConfirmationClosed,
    AlertDismissed,
    NoticeDismissed(usize),
    NoticeExpired(Ticket),
}

/// Side effects requested by the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FetchBrands {
        entry: EntryIndex,
        category: CategoryId,
        ticket: Ticket,
    },
    FetchModels {
        entry: EntryIndex,
        brand: BrandId,
        ticket: Ticket,
    },
    StartSearchTimer {
        ticket: Ticket,
        delay: Duration,
    },
    SearchClients {
        query: String,
        ticket: Ticket,
    },
    SubmitAct {
        payload: ReceptionActPayload,
    },
    ExpireNotice {
        ticket: Ticket,
        delay: Duration,
    },
}

/// Complete state of one reception form.
#[derive(Clone, Debug)]
pub struct ReceptionState {
    categories: Vec<Category>,
    entries: BTreeMap<EntryIndex, EntryState>,
    next_index: EntryIndex,
    last_ticket: Ticket,
    client: ClientResolver,
    act_guarantee: GuaranteeType,
    phase: SubmissionPhase,
    alert: Option<Alert>,
    notices: Vec<Notice>,
    search: SearchSettings,
}

impl ReceptionState {
    /// Creates the form with the server supplied categories and one empty entry.
    pub fn new(categories: Vec<Category>, search: SearchSettings) -> Self {
        let mut state = Self {
            categories,
            entries: BTreeMap::new(),
            next_index: EntryIndex::default(),
            last_ticket: Ticket::default(),
            client: ClientResolver::default(),
            act_guarantee: GuaranteeType::default(),
            phase: SubmissionPhase::Editing,
            alert: None,
            notices: Vec::new(),
            search,
        };
        state.add_entry();
        state
    }

    /// Applies one event and returns the side effects it requires.
    pub fn update(&mut self, event: Event) -> Vec<Command> {
        let issued_before = self.last_ticket;
        let mut commands = self.apply(event);
        commands.extend(
            self.notices
                .iter()
                .filter(|notice| notice.ticket > issued_before)
                .map(|notice| Command::ExpireNotice {
                    ticket: notice.ticket,
                    delay: NOTICE_LIFETIME,
                }),
        );
        commands
    }

    fn apply(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::AddEntry => {
                self.add_entry();
                Vec::new()
            }
            Event::RemoveEntry(index) => {
                self.remove_entry(index);
                Vec::new()
            }
            Event::CategorySelected { entry, category } => self.select_category(entry, category),
            Event::BrandSelected { entry, brand } => self.select_brand(entry, brand),
            Event::ModelSelected { entry, model } => {
                self.select_model(entry, model);
                Vec::new()
            }
            Event::EntryEdited { entry, field } => {
                self.edit_entry(entry, field);
                Vec::new()
            }
            Event::BrandsLoaded {
                entry,
                ticket,
                result,
            } => {
                self.brands_loaded(entry, ticket, result);
                Vec::new()
            }
            Event::ModelsLoaded {
                entry,
                ticket,
                result,
            } => {
                self.models_loaded(entry, ticket, result);
                Vec::new()
            }
            Event::SearchInput(query) => self.search_input(query),
            Event::SearchTimerElapsed { ticket } => self.search_timer_elapsed(ticket),
            Event::ClientsFound { ticket, result } => {
                self.clients_found(ticket, result);
                Vec::new()
            }
            Event::ClientChosen(id) => {
                self.choose_client(id);
                Vec::new()
            }
            Event::ContactPersonEdited(value) => {
                self.client.edit_contact_person(value);
                Vec::new()
            }
            Event::ContactPhoneEdited(value) => {
                self.client.edit_contact_phone(value);
                Vec::new()
            }
            Event::NewClientToggled(enabled) => {
                self.client.toggle_new_client(enabled);
                Vec::new()
            }
            Event::NewClientEdited(field) => {
                self.client.edit_new_client(field);
                Vec::new()
            }
            Event::ActGuaranteeSelected(guarantee) => {
                self.act_guarantee = guarantee;
                Vec::new()
            }
            Event::SubmitRequested => self.request_submit(),
            Event::SubmitCompleted { result } => {
                self.submit_completed(result);
                Vec::new()
            }
            Event::ConfirmationClosed => {
                self.close_confirmation();
                Vec::new()
            }
            Event::AlertDismissed => {
                self.alert = None;
                Vec::new()
            }
            Event::NoticeDismissed(position) => {
                if position < self.notices.len() {
                    self.notices.remove(position);
                }
                Vec::new()
            }
            Event::NoticeExpired(ticket) => {
                self.notices.retain(|notice| notice.ticket != ticket);
                Vec::new()
            }
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Entries in index order, which is also the order they were added in.
    pub fn entries(&self) -> impl Iterator<Item = &EntryState> {
        self.entries.values()
    }

    pub fn entry(&self, index: EntryIndex) -> Option<&EntryState> {
        self.entries.get(&index)
    }

    pub fn entry_indices(&self) -> Vec<EntryIndex> {
        self.entries.keys().copied().collect()
    }

    pub fn client(&self) -> &ClientResolver {
        &self.client
    }

    pub fn act_guarantee(&self) -> GuaranteeType {
        self.act_guarantee
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// Blocking message the receptionist has to acknowledge.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Non-blocking messages about degraded lookups.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn search_settings(&self) -> SearchSettings {
        self.search
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.last_ticket = Ticket(self.last_ticket.0 + 1);
        self.last_ticket
    }

    fn push_notice(&mut self, message: String) {
        log::warn!("{message}");
        let ticket = self.issue_ticket();
        self.notices.push(Notice { ticket, message });
    }
}
