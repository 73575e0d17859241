//! Application core of a Pokédex front-end backed by PokeAPI.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The UI shell executes the
//! actual HTTP round-trips and renders the per-screen loaders, which keeps
//! everything in this crate deterministic and testable.
//!
//! # Design
//! - `PokeApiClient` is stateless: it holds only `base_url`, and each
//!   endpoint is split into `build_*` and `parse_*`.
//! - One loader per screen (`HomeLoader`, `PokedexLoader`, `DetailsLoader`)
//!   owns that screen's state and exposes read accessors plus triggers.
//!   Triggers hand out `PendingRequest`s; the host feeds responses back with
//!   the request's `Ticket`.
//! - Failures are logged with `tracing` and swallowed by the loaders; only a
//!   failed home search is reported to the user.
//! - `display` holds the pure helpers the views need (type colours, label
//!   widths, stat ratios).

pub mod client;
pub mod config;
pub mod details;
pub mod display;
pub mod error;
pub mod home;
pub mod http;
pub mod pokedex;
pub mod types;

pub use client::PokeApiClient;
pub use config::ClientConfig;
pub use details::{DetailsEvent, DetailsLoader, DetailsState};
pub use error::{ApiError, ConfigError};
pub use home::{HomeEvent, HomeLoader};
pub use http::{HttpMethod, HttpRequest, HttpResponse, PendingRequest, Ticket};
pub use pokedex::{LoadState, PageEvent, PokedexLoader};
pub use types::{
    EvolutionChain, Pokemon, PokemonDetails, PokemonPage, PokemonRef, PokemonSpecies,
    PokemonSummary, Stat,
};
