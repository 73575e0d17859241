//! Loader behind the details screen.
//!
//! Navigation passes a single name. `open` issues the record request and the
//! species request together; the view is `Loaded` once both are in. Any
//! failure is terminal for the visit and renders like loading (the spinner
//! stays up). A species without a flavor text in the target language just
//! means no description.

use tracing::{debug, warn};

use crate::client::PokeApiClient;
use crate::config::ClientConfig;
use crate::display;
use crate::error::ApiError;
use crate::http::{HttpResponse, PendingRequest, Ticket};
use crate::types::{Pokemon, PokemonDetails, PokemonRef};

const POKEMON_SLOT: usize = 0;
const SPECIES_SLOT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsState {
    /// Nothing opened yet.
    Closed,
    Loading,
    Loaded,
    /// A request failed; shown exactly like `Loading`.
    NotLoaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsEvent {
    Pending,
    Loaded,
    NotLoaded,
    Ignored,
}

enum Phase {
    Closed,
    Loading {
        pokemon: Option<Pokemon>,
        description: Option<Option<String>>,
    },
    Loaded(PokemonDetails),
    NotLoaded,
}

pub struct DetailsLoader {
    client: PokeApiClient,
    language: String,
    name: Option<String>,
    cycle: u64,
    phase: Phase,
}

impl DetailsLoader {
    pub fn new(client: PokeApiClient, language: &str) -> Self {
        Self {
            client,
            language: language.to_string(),
            name: None,
            cycle: 0,
            phase: Phase::Closed,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(PokeApiClient::from_config(config), &config.language)
    }

    /// Navigate to `name`. Whatever the previous visit held is dropped and
    /// its outstanding responses will be ignored.
    pub fn open(&mut self, name: &str) -> [PendingRequest; 2] {
        self.cycle += 1;
        self.name = Some(name.to_string());
        self.phase = Phase::Loading {
            pokemon: None,
            description: None,
        };
        debug!(cycle = self.cycle, name, "opening details");

        let target = PokemonRef::Name(name.to_string());
        [
            PendingRequest {
                ticket: Ticket {
                    cycle: self.cycle,
                    slot: POKEMON_SLOT,
                },
                request: self.client.build_get_pokemon(&target),
            },
            PendingRequest {
                ticket: Ticket {
                    cycle: self.cycle,
                    slot: SPECIES_SLOT,
                },
                request: self.client.build_get_species(&target),
            },
        ]
    }

    pub fn on_response(&mut self, ticket: Ticket, response: HttpResponse) -> DetailsEvent {
        if ticket.cycle != self.cycle {
            debug!(?ticket, "stale details response ignored");
            return DetailsEvent::Ignored;
        }
        let Phase::Loading {
            pokemon,
            description,
        } = &mut self.phase
        else {
            return DetailsEvent::Ignored;
        };

        let outcome = match ticket.slot {
            POKEMON_SLOT if pokemon.is_none() => self
                .client
                .parse_pokemon(response)
                .map(|p| *pokemon = Some(p)),
            SPECIES_SLOT if description.is_none() => self
                .client
                .parse_species(response)
                .map(|s| *description = Some(s.flavor_text(&self.language))),
            _ => {
                debug!(?ticket, "unexpected details response ignored");
                return DetailsEvent::Ignored;
            }
        };
        if let Err(e) = outcome {
            return self.fail(&e);
        }

        if pokemon.is_none() || description.is_none() {
            return DetailsEvent::Pending;
        }
        let phase = std::mem::replace(&mut self.phase, Phase::NotLoaded);
        if let Phase::Loading {
            pokemon: Some(pokemon),
            description: Some(description),
        } = phase
        {
            self.phase = Phase::Loaded(PokemonDetails::new(pokemon, description));
        }
        debug!(cycle = self.cycle, "details loaded");
        DetailsEvent::Loaded
    }

    /// The host could not execute one of the requests from `open`.
    pub fn abort(&mut self, ticket: Ticket, error: &ApiError) -> DetailsEvent {
        if ticket.cycle != self.cycle || !matches!(self.phase, Phase::Loading { .. }) {
            return DetailsEvent::Ignored;
        }
        self.fail(error)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn state(&self) -> DetailsState {
        match self.phase {
            Phase::Closed => DetailsState::Closed,
            Phase::Loading { .. } => DetailsState::Loading,
            Phase::Loaded(_) => DetailsState::Loaded,
            Phase::NotLoaded => DetailsState::NotLoaded,
        }
    }

    pub fn details(&self) -> Option<&PokemonDetails> {
        match &self.phase {
            Phase::Loaded(details) => Some(details),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.details().is_some()
    }

    /// Backdrop colour for the artwork, from the first type.
    pub fn background_color(&self) -> &'static str {
        self.details()
            .map_or(display::FALLBACK_COLOR, |d| display::primary_color(&d.categories))
    }

    /// Width of the stat name badges; `LABEL_PADDING` until loaded.
    pub fn stat_label_width(&self) -> u32 {
        let stats = self.details().map_or(&[][..], |d| d.stats.as_slice());
        display::label_width(stats, |s| s.name.as_str())
    }

    fn fail(&mut self, error: &ApiError) -> DetailsEvent {
        warn!(cycle = self.cycle, name = ?self.name, error = %error, "details load failed");
        self.phase = Phase::NotLoaded;
        DetailsEvent::NotLoaded
    }
}
