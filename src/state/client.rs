//! Client resolver: debounced directory search and the single client selection.

use crate::domain::client::ClientRecord;
use crate::domain::types::ClientId;
use crate::forms::client::{NewClientField, NewClientForm};
use crate::state::{Command, LookupResult, ReceptionState, Ticket};

/// Which client the act is being drafted for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ClientSelection {
    #[default]
    None,
    /// A client that does not exist yet; the server assigns its id.
    New(NewClientForm),
    /// A client picked from search results, with the act's contact details.
    Existing {
        record: ClientRecord,
        contact_person: String,
        phone: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientResolver {
    query: String,
    pending_timer: Option<Ticket>,
    pending_search: Option<Ticket>,
    candidates: Vec<ClientRecord>,
    candidates_visible: bool,
    selection: ClientSelection,
    /// Free-entry fields kept while the "new client" toggle is off.
    stashed_draft: NewClientForm,
}

impl ClientResolver {
    /// Text currently in the search box.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[ClientRecord] {
        &self.candidates
    }

    pub fn candidates_visible(&self) -> bool {
        self.candidates_visible && !self.candidates.is_empty()
    }

    pub fn selection(&self) -> &ClientSelection {
        &self.selection
    }

    pub fn is_new_client(&self) -> bool {
        matches!(self.selection, ClientSelection::New(_))
    }

    pub fn selected_record(&self) -> Option<&ClientRecord> {
        match &self.selection {
            ClientSelection::Existing { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Free-entry fields, whether or not the toggle is currently on.
    pub fn new_client_form(&self) -> &NewClientForm {
        match &self.selection {
            ClientSelection::New(form) => form,
            _ => &self.stashed_draft,
        }
    }

    pub(crate) fn toggle_new_client(&mut self, enabled: bool) {
        match (enabled, &mut self.selection) {
            (true, ClientSelection::New(_)) | (false, ClientSelection::None) => {}
            (true, _) => {
                let draft = std::mem::take(&mut self.stashed_draft);
                self.selection = ClientSelection::New(draft);
                self.candidates_visible = false;
            }
            (false, ClientSelection::New(form)) => {
                self.stashed_draft = std::mem::take(form);
                self.selection = ClientSelection::None;
            }
            (false, ClientSelection::Existing { .. }) => {}
        }
    }

    pub(crate) fn edit_new_client(&mut self, field: NewClientField) {
        match &mut self.selection {
            ClientSelection::New(form) => form.apply(field),
            _ => self.stashed_draft.apply(field),
        }
    }

    pub(crate) fn edit_contact_person(&mut self, value: String) {
        if let ClientSelection::Existing { contact_person, .. } = &mut self.selection {
            *contact_person = value;
        }
    }

    pub(crate) fn edit_contact_phone(&mut self, value: String) {
        if let ClientSelection::Existing { phone, .. } = &mut self.selection {
            *phone = value;
        }
    }
}

impl ReceptionState {
    pub(crate) fn search_input(&mut self, query: String) -> Vec<Command> {
        let long_enough = query.chars().count() >= self.search.min_chars;
        self.client.query = query;

        if !long_enough {
            self.client.pending_timer = None;
            self.client.pending_search = None;
            self.client.candidates.clear();
            self.client.candidates_visible = false;
            return Vec::new();
        }

        let ticket = self.issue_ticket();
        self.client.pending_timer = Some(ticket);
        vec![Command::StartSearchTimer {
            ticket,
            delay: self.search.debounce,
        }]
    }

    pub(crate) fn search_timer_elapsed(&mut self, ticket: Ticket) -> Vec<Command> {
        if self.client.pending_timer != Some(ticket) {
            return Vec::new();
        }
        self.client.pending_timer = None;

        let search = self.issue_ticket();
        self.client.pending_search = Some(search);
        log::debug!("Searching clients for {:?}", self.client.query);
        vec![Command::SearchClients {
            query: self.client.query.clone(),
            ticket: search,
        }]
    }

    pub(crate) fn clients_found(&mut self, ticket: Ticket, result: LookupResult<Vec<ClientRecord>>) {
        if self.client.pending_search != Some(ticket) {
            log::debug!("Dropping stale client search response");
            return;
        }
        self.client.pending_search = None;

        match result {
            Ok(clients) => {
                self.client.candidates_visible = !clients.is_empty();
                self.client.candidates = clients;
            }
            Err(err) => {
                self.client.candidates.clear();
                self.client.candidates_visible = false;
                self.push_notice(format!("Не удалось выполнить поиск клиентов: {err}"));
            }
        }
    }

    pub(crate) fn choose_client(&mut self, id: ClientId) {
        if self.client.is_new_client() {
            log::warn!("Ignoring client {id} chosen while creating a new client");
            return;
        }
        let Some(record) = self.client.candidates.iter().find(|c| c.id == id).cloned() else {
            log::warn!("Ignoring client {id} missing from search results");
            return;
        };

        self.client.query = record.short_name.as_str().to_string();
        self.client.pending_timer = None;
        self.client.pending_search = None;
        self.client.candidates_visible = false;
        self.client.selection = ClientSelection::Existing {
            contact_person: record.contact_person.clone(),
            phone: record.phone.clone(),
            record,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::types::ClientShortName;
    use crate::state::{Event, SearchSettings};

    fn client(id: i32, short_name: &str) -> ClientRecord {
        ClientRecord::new(
            ClientId::new(id).unwrap(),
            ClientShortName::new(short_name).unwrap(),
            format!("ООО {short_name}"),
            "Петров П.П.".to_string(),
            "+79001234567".to_string(),
            None,
            None,
        )
    }

    fn state() -> ReceptionState {
        ReceptionState::new(Vec::new(), SearchSettings::default())
    }

    fn timer_ticket(commands: &[Command]) -> Ticket {
        match commands {
            [Command::StartSearchTimer { ticket, delay }] => {
                assert_eq!(*delay, Duration::from_millis(300));
                *ticket
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    fn search_ticket(commands: &[Command]) -> Ticket {
        match commands {
            [Command::SearchClients { ticket, .. }] => *ticket,
            other => panic!("unexpected commands {other:?}"),
        }
    }

    /// Types a query, lets its timer fire and delivers the given results.
    fn found(state: &mut ReceptionState, query: &str, clients: Vec<ClientRecord>) {
        let timer = timer_ticket(&state.update(Event::SearchInput(query.to_string())));
        let search = search_ticket(&state.update(Event::SearchTimerElapsed { ticket: timer }));
        state.update(Event::ClientsFound {
            ticket: search,
            result: Ok(clients),
        });
    }

    #[test]
    fn short_queries_never_start_a_timer() {
        let mut state = state();

        assert!(state.update(Event::SearchInput(String::new())).is_empty());
        assert!(state.update(Event::SearchInput("Р".to_string())).is_empty());
        assert_eq!(state.client().query(), "Р");
    }

    #[test]
    fn only_the_last_keystroke_timer_searches() {
        let mut state = state();
        let first = timer_ticket(&state.update(Event::SearchInput("Ро".to_string())));
        let second = timer_ticket(&state.update(Event::SearchInput("Ром".to_string())));
        let last = timer_ticket(&state.update(Event::SearchInput("Рома".to_string())));

        assert!(state.update(Event::SearchTimerElapsed { ticket: first }).is_empty());
        assert!(state.update(Event::SearchTimerElapsed { ticket: second }).is_empty());
        let commands = state.update(Event::SearchTimerElapsed { ticket: last });

        assert!(matches!(
            commands.as_slice(),
            [Command::SearchClients { query, .. }] if query == "Рома"
        ));
    }

    #[test]
    fn shortening_the_query_cancels_pending_timer() {
        let mut state = state();
        let timer = timer_ticket(&state.update(Event::SearchInput("Ро".to_string())));
        state.update(Event::SearchInput("Р".to_string()));

        assert!(state.update(Event::SearchTimerElapsed { ticket: timer }).is_empty());
    }

    #[test]
    fn results_are_shown_only_when_non_empty() {
        let mut state = state();
        found(&mut state, "Ром", vec![client(1, "Ромашка")]);
        assert!(state.client().candidates_visible());

        found(&mut state, "Ромб", Vec::new());
        assert!(!state.client().candidates_visible());
    }

    #[test]
    fn stale_search_response_is_ignored() {
        let mut state = state();
        let timer = timer_ticket(&state.update(Event::SearchInput("Ро".to_string())));
        let stale = search_ticket(&state.update(Event::SearchTimerElapsed { ticket: timer }));
        let timer = timer_ticket(&state.update(Event::SearchInput("Лю".to_string())));
        let fresh = search_ticket(&state.update(Event::SearchTimerElapsed { ticket: timer }));

        state.update(Event::ClientsFound {
            ticket: stale,
            result: Ok(vec![client(1, "Ромашка")]),
        });
        assert!(state.client().candidates().is_empty());

        state.update(Event::ClientsFound {
            ticket: fresh,
            result: Ok(vec![client(2, "Лютик")]),
        });
        assert_eq!(state.client().candidates()[0].short_name.as_str(), "Лютик");
    }

    #[test]
    fn choosing_a_candidate_binds_it() {
        let mut state = state();
        found(&mut state, "Ром", vec![client(1, "Ромашка"), client(2, "Ромб")]);

        state.update(Event::ClientChosen(ClientId::new(2).unwrap()));

        assert_eq!(state.client().query(), "Ромб");
        assert!(!state.client().candidates_visible());
        match state.client().selection() {
            ClientSelection::Existing {
                record,
                contact_person,
                phone,
            } => {
                assert_eq!(record.id.get(), 2);
                assert_eq!(contact_person, "Петров П.П.");
                assert_eq!(phone, "+79001234567");
            }
            other => panic!("unexpected selection {other:?}"),
        }

        state.update(Event::ContactPersonEdited("Сидоров С.С.".to_string()));
        assert!(matches!(
            state.client().selection(),
            ClientSelection::Existing { contact_person, .. } if contact_person == "Сидоров С.С."
        ));
    }

    #[test]
    fn new_client_toggle_clears_selection_and_keeps_draft() {
        let mut state = state();
        found(&mut state, "Ром", vec![client(1, "Ромашка")]);
        state.update(Event::ClientChosen(ClientId::new(1).unwrap()));

        state.update(Event::NewClientToggled(true));
        assert!(state.client().is_new_client());
        assert!(state.client().selected_record().is_none());

        state.update(Event::NewClientEdited(NewClientField::ShortName(
            "Лютик".to_string(),
        )));
        state.update(Event::NewClientToggled(false));
        assert_eq!(state.client().selection(), &ClientSelection::None);

        state.update(Event::NewClientToggled(true));
        assert_eq!(state.client().new_client_form().short_name, "Лютик");
    }

    #[test]
    fn choosing_is_ignored_in_new_client_mode() {
        let mut state = state();
        found(&mut state, "Ром", vec![client(1, "Ромашка")]);
        state.update(Event::NewClientToggled(true));

        state.update(Event::ClientChosen(ClientId::new(1).unwrap()));

        assert!(state.client().is_new_client());
    }

    #[test]
    fn late_results_after_choosing_are_dropped() {
        let mut state = state();
        found(&mut state, "Ро", vec![client(7, "Ромашка")]);
        let timer = timer_ticket(&state.update(Event::SearchInput("Ром".to_string())));
        let search = search_ticket(&state.update(Event::SearchTimerElapsed { ticket: timer }));

        state.update(Event::ClientChosen(ClientId::new(7).unwrap()));
        state.update(Event::ClientsFound {
            ticket: search,
            result: Ok(vec![client(7, "Ромашка"), client(8, "Ромб")]),
        });

        assert!(!state.client().candidates_visible());
        assert_eq!(state.client().query(), "Ромашка");
        assert_eq!(state.client().selected_record().map(|r| r.id.get()), Some(7));
    }

    #[test]
    fn clearing_the_query_drops_pending_results() {
        let mut state = state();
        let timer = timer_ticket(&state.update(Event::SearchInput("Ро".to_string())));
        let search = search_ticket(&state.update(Event::SearchTimerElapsed { ticket: timer }));

        state.update(Event::SearchInput(String::new()));
        state.update(Event::ClientsFound {
            ticket: search,
            result: Ok(vec![client(1, "Ромашка")]),
        });

        assert!(!state.client().candidates_visible());
        assert!(state.client().candidates().is_empty());
    }

    #[test]
    fn failed_search_queues_notice() {
        let mut state = state();
        let timer = timer_ticket(&state.update(Event::SearchInput("Ро".to_string())));
        let search = search_ticket(&state.update(Event::SearchTimerElapsed { ticket: timer }));

        state.update(Event::ClientsFound {
            ticket: search,
            result: Err("timeout".to_string()),
        });

        assert!(!state.client().candidates_visible());
        assert_eq!(state.notices().len(), 1);
        assert!(state.alert().is_none());
    }
}
