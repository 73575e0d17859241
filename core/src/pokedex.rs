//! Incremental loader behind the Pokédex list screen.
//!
//! # Design
//! One trigger runs one *cycle*: a page request at the current offset, then
//! one detail request per page entry, then a single append. The loader never
//! performs I/O; it hands out `PendingRequest`s and is fed the responses.
//!
//! - `LoadState` is the single-flight guard: `load_next_page` only starts a
//!   cycle from `Idle`, so rapid scroll events cannot fetch a page twice.
//! - Detail responses may come back in any order. Each lands in the slot its
//!   ticket names, so the appended batch keeps page order.
//! - Any failure drops the whole batch and returns to `Idle` with the offset
//!   untouched; the next trigger re-fetches the same page.
//! - An empty page or a page without a `next` link ends the list.

use tracing::{debug, warn};

use crate::client::PokeApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpResponse, PendingRequest, Ticket};
use crate::types::{PokemonRef, PokemonSummary};

/// Externally visible loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    FetchingPage,
    ResolvingDetails,
    Exhausted,
}

/// What a fed-back response did to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The page arrived; execute these detail requests (in any order).
    Resolve(Vec<PendingRequest>),
    /// Still waiting for this many detail responses.
    Pending { remaining: usize },
    /// The batch was appended to the list.
    Appended { count: usize },
    /// The upstream returned an empty page.
    Exhausted,
    /// The cycle failed and was discarded.
    Failed,
    /// The response did not belong to the running cycle.
    Ignored,
}

struct Slot {
    url: String,
    summary: Option<PokemonSummary>,
}

enum Phase {
    Idle,
    FetchingPage,
    ResolvingDetails { slots: Vec<Slot>, last_page: bool },
    Exhausted,
}

pub struct PokedexLoader {
    client: PokeApiClient,
    page_size: u32,
    offset: u32,
    items: Vec<PokemonSummary>,
    phase: Phase,
    cycle: u64,
}

impl PokedexLoader {
    pub fn new(client: PokeApiClient, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
            offset: 0,
            items: Vec::new(),
            phase: Phase::Idle,
            cycle: 0,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(PokeApiClient::from_config(config), config.page_size)
    }

    pub fn items(&self) -> &[PokemonSummary] {
        &self.items
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn state(&self) -> LoadState {
        match self.phase {
            Phase::Idle => LoadState::Idle,
            Phase::FetchingPage => LoadState::FetchingPage,
            Phase::ResolvingDetails { .. } => LoadState::ResolvingDetails,
            Phase::Exhausted => LoadState::Exhausted,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::FetchingPage | Phase::ResolvingDetails { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.phase, Phase::Exhausted)
    }

    /// Start a cycle for the next page. `None` while a cycle is running or
    /// once the list has ended.
    pub fn load_next_page(&mut self) -> Option<PendingRequest> {
        if !matches!(self.phase, Phase::Idle) {
            debug!(state = ?self.state(), "load_next_page ignored");
            return None;
        }

        self.cycle += 1;
        self.phase = Phase::FetchingPage;
        debug!(cycle = self.cycle, offset = self.offset, "fetching page");

        Some(PendingRequest {
            ticket: Ticket {
                cycle: self.cycle,
                slot: 0,
            },
            request: self.client.build_list_pokemon(self.page_size, self.offset),
        })
    }

    /// Feed the response to the request returned by `load_next_page`.
    pub fn on_page_response(&mut self, ticket: Ticket, response: HttpResponse) -> PageEvent {
        if ticket.cycle != self.cycle || !matches!(self.phase, Phase::FetchingPage) {
            debug!(?ticket, "stale page response ignored");
            return PageEvent::Ignored;
        }

        let page = match self.client.parse_pokemon_page(response) {
            Ok(page) => page,
            Err(e) => return self.fail(&e),
        };

        if page.results.is_empty() {
            debug!(offset = self.offset, "empty page, list exhausted");
            self.phase = Phase::Exhausted;
            return PageEvent::Exhausted;
        }

        let requests = page
            .results
            .iter()
            .enumerate()
            .map(|(slot, entry)| PendingRequest {
                ticket: Ticket {
                    cycle: self.cycle,
                    slot,
                },
                request: self
                    .client
                    .build_get_pokemon(&PokemonRef::Name(entry.name.clone())),
            })
            .collect();
        let slots = page
            .results
            .into_iter()
            .map(|entry| Slot {
                url: entry.url,
                summary: None,
            })
            .collect();

        self.phase = Phase::ResolvingDetails {
            slots,
            last_page: page.next.is_none(),
        };
        PageEvent::Resolve(requests)
    }

    /// Feed the response to one of the detail requests from `Resolve`.
    pub fn on_detail_response(&mut self, ticket: Ticket, response: HttpResponse) -> PageEvent {
        if ticket.cycle != self.cycle {
            debug!(?ticket, "stale detail response ignored");
            return PageEvent::Ignored;
        }
        let Phase::ResolvingDetails { slots, .. } = &mut self.phase else {
            debug!(?ticket, "detail response outside of a cycle ignored");
            return PageEvent::Ignored;
        };
        let Some(slot) = slots.get_mut(ticket.slot) else {
            warn!(?ticket, "detail response for unknown slot ignored");
            return PageEvent::Ignored;
        };
        if slot.summary.is_some() {
            debug!(?ticket, "duplicate detail response ignored");
            return PageEvent::Ignored;
        }

        let resolved = self
            .client
            .parse_pokemon(response)
            .and_then(|pokemon| PokemonSummary::from_pokemon(pokemon, slot.url.clone()));
        match resolved {
            Ok(summary) => slot.summary = Some(summary),
            Err(e) => return self.fail(&e),
        }

        let remaining = slots.iter().filter(|s| s.summary.is_none()).count();
        if remaining > 0 {
            return PageEvent::Pending { remaining };
        }
        self.commit()
    }

    /// The host could not execute a request of the running cycle.
    pub fn abort(&mut self, ticket: Ticket, error: &ApiError) -> PageEvent {
        if ticket.cycle != self.cycle || !self.is_loading() {
            return PageEvent::Ignored;
        }
        self.fail(error)
    }

    fn commit(&mut self) -> PageEvent {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::ResolvingDetails { slots, last_page } = phase else {
            self.phase = phase;
            return PageEvent::Ignored;
        };

        let batch: Vec<PokemonSummary> = slots.into_iter().filter_map(|s| s.summary).collect();
        let count = batch.len();
        self.items.extend(batch);
        self.offset = self.offset.saturating_add(self.page_size);
        if last_page {
            self.phase = Phase::Exhausted;
        }

        debug!(
            cycle = self.cycle,
            appended = count,
            offset = self.offset,
            total = self.items.len(),
            "page appended"
        );
        PageEvent::Appended { count }
    }

    fn fail(&mut self, error: &ApiError) -> PageEvent {
        warn!(cycle = self.cycle, offset = self.offset, error = %error, "page load failed");
        self.phase = Phase::Idle;
        PageEvent::Failed
    }
}
