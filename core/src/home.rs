//! Loader behind the home screen: a random Pokémon on start and refresh,
//! or one looked up by name.
//!
//! The latest trigger wins: an unresolved earlier request is superseded and
//! its response ignored. A failed refresh keeps whatever was on screen; a
//! failed search is reported so the UI can raise its "not found" alert.

use rand::Rng;
use tracing::{debug, warn};

use crate::client::PokeApiClient;
use crate::config::{ClientConfig, DEFAULT_RANDOM_ID_MAX};
use crate::error::ApiError;
use crate::http::{HttpResponse, PendingRequest, Ticket};
use crate::types::{Pokemon, PokemonRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEvent {
    /// The response replaced the shown Pokémon.
    Showing,
    /// A search failed; the UI shows a blocking alert.
    NotFound,
    /// A random pick failed; nothing changed.
    Failed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Random,
    Search,
}

pub struct HomeLoader {
    client: PokeApiClient,
    random_id_max: u32,
    pokemon: Option<Pokemon>,
    cycle: u64,
    pending: Option<Trigger>,
}

impl HomeLoader {
    pub fn new(client: PokeApiClient) -> Self {
        Self {
            client,
            random_id_max: DEFAULT_RANDOM_ID_MAX,
            pokemon: None,
            cycle: 0,
            pending: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            random_id_max: config.random_id_max.max(1),
            ..Self::new(PokeApiClient::from_config(config))
        }
    }

    pub fn pokemon(&self) -> Option<&Pokemon> {
        self.pokemon.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The spinner covers both an in-flight request and an empty screen.
    pub fn shows_spinner(&self) -> bool {
        self.is_loading() || self.pokemon.is_none()
    }

    /// Pick a random id in `1..=random_id_max` and request it.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PendingRequest {
        let id = rng.random_range(1..=self.random_id_max);
        debug!(id, "random pokemon");
        self.start(Trigger::Random, PokemonRef::Id(id))
    }

    /// Look a Pokémon up by name. Blank input is ignored.
    pub fn search(&mut self, text: &str) -> Option<PendingRequest> {
        let name = text.trim();
        if name.is_empty() {
            return None;
        }
        debug!(name, "searching pokemon");
        Some(self.start(Trigger::Search, PokemonRef::Name(name.to_lowercase())))
    }

    pub fn on_response(&mut self, ticket: Ticket, response: HttpResponse) -> HomeEvent {
        let Some(trigger) = self.take_pending(ticket) else {
            return HomeEvent::Ignored;
        };
        match self.client.parse_pokemon(response) {
            Ok(pokemon) => {
                debug!(id = pokemon.id, name = %pokemon.name, "showing pokemon");
                self.pokemon = Some(pokemon);
                HomeEvent::Showing
            }
            Err(e) => Self::failed(trigger, &e),
        }
    }

    /// The host could not execute the pending request.
    pub fn abort(&mut self, ticket: Ticket, error: &ApiError) -> HomeEvent {
        match self.take_pending(ticket) {
            Some(trigger) => Self::failed(trigger, error),
            None => HomeEvent::Ignored,
        }
    }

    fn start(&mut self, trigger: Trigger, target: PokemonRef) -> PendingRequest {
        self.cycle += 1;
        self.pending = Some(trigger);
        PendingRequest {
            ticket: Ticket {
                cycle: self.cycle,
                slot: 0,
            },
            request: self.client.build_get_pokemon(&target),
        }
    }

    fn take_pending(&mut self, ticket: Ticket) -> Option<Trigger> {
        if ticket.cycle != self.cycle {
            debug!(?ticket, "superseded home response ignored");
            return None;
        }
        self.pending.take()
    }

    fn failed(trigger: Trigger, error: &ApiError) -> HomeEvent {
        warn!(?trigger, error = %error, "home load failed");
        match trigger {
            Trigger::Random => HomeEvent::Failed,
            Trigger::Search => HomeEvent::NotFound,
        }
    }
}
