pub mod dex;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

use dex::Entry;

/// Base used in resource links when the router is not bound to a socket.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const DEFAULT_LIMIT: u32 = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageResponse {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    pub order: u32,
    pub species: NamedResource,
    pub sprites: serde_json::Value,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatSlot>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u8,
    pub effort: u8,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeciesResponse {
    pub id: u32,
    pub name: String,
    pub flavor_text_entries: Vec<FlavorText>,
    pub evolution_chain: ApiResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
    pub version: NamedResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionChainResponse {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Absolute base every emitted link starts with.
pub type BaseUrl = Arc<str>;

pub fn app() -> Router {
    router(DEFAULT_BASE_URL)
}

/// Links are emitted with a trailing slash, as PokeAPI does, so every keyed
/// route is served with and without one.
pub fn router(base_url: &str) -> Router {
    let base: BaseUrl = Arc::from(base_url.trim_end_matches('/'));
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/", get(list_pokemon))
        .route("/pokemon/{key}", get(get_pokemon))
        .route("/pokemon/{key}/", get(get_pokemon))
        .route("/pokemon-species/{key}", get(get_species))
        .route("/pokemon-species/{key}/", get(get_species))
        .route("/evolution-chain/{id}", get(get_evolution_chain))
        .route("/evolution-chain/{id}/", get(get_evolution_chain))
        .with_state(base)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    axum::serve(listener, router(&format!("http://{addr}"))).await
}

fn link(base: &str, kind: &str, id: u32, name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: format!("{base}/{kind}/{id}/"),
    }
}

fn page_url(base: &str, limit: u32, offset: u32) -> String {
    format!("{base}/pokemon?offset={offset}&limit={limit}")
}

async fn list_pokemon(
    State(base): State<BaseUrl>,
    Query(params): Query<ListParams>,
) -> Json<PageResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let count = dex::len() as u32;
    debug!(limit, offset, "list pokemon");

    let results = dex::entries()
        .skip(offset as usize)
        .take(limit as usize)
        .map(|e| link(&base, "pokemon", e.id, e.name))
        .collect();
    let next = offset
        .checked_add(limit)
        .filter(|&end| end < count)
        .map(|end| page_url(&base, limit, end));
    let previous = (offset > 0).then(|| page_url(&base, limit, offset.saturating_sub(limit)));

    Json(PageResponse {
        count,
        next,
        previous,
        results,
    })
}

fn pokemon_response(base: &str, entry: Entry) -> PokemonResponse {
    let sprite = format!("{base}/sprites/pokemon/{}.png", entry.id);
    let artwork = format!("{base}/sprites/pokemon/other/official-artwork/{}.png", entry.id);
    PokemonResponse {
        id: entry.id,
        name: entry.name.to_string(),
        order: entry.id,
        species: link(base, "pokemon-species", entry.id, entry.name),
        sprites: serde_json::json!({
            "front_default": sprite,
            "back_default": null,
            "other": { "official-artwork": { "front_default": artwork } },
        }),
        types: entry
            .types
            .iter()
            .zip(1u8..)
            .map(|(name, slot)| TypeSlot {
                slot,
                kind: NamedResource {
                    name: name.to_string(),
                    url: format!("{base}/type/{name}/"),
                },
            })
            .collect(),
        stats: dex::STAT_NAMES
            .iter()
            .zip(entry.base_stats())
            .zip(1u32..)
            .map(|((name, base_stat), id)| StatSlot {
                base_stat,
                effort: 0,
                stat: link(base, "stat", id, name),
            })
            .collect(),
    }
}

async fn get_pokemon(
    State(base): State<BaseUrl>,
    Path(key): Path<String>,
) -> Result<Json<PokemonResponse>, StatusCode> {
    let entry = dex::find(&key).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(pokemon_response(&base, entry)))
}

async fn get_species(
    State(base): State<BaseUrl>,
    Path(key): Path<String>,
) -> Result<Json<SpeciesResponse>, StatusCode> {
    let entry = dex::find(&key).ok_or(StatusCode::NOT_FOUND)?;
    let version = |name: &str, id: u32| link(&base, "version", id, name);
    let language = |name: &str, id: u32| link(&base, "language", id, name);
    let display = capitalize(entry.name);

    Ok(Json(SpeciesResponse {
        id: entry.id,
        name: entry.name.to_string(),
        flavor_text_entries: vec![
            FlavorText {
                flavor_text: format!("{display} porte le numéro {}\u{000C}du Pokédex.", entry.id),
                language: language("fr", 5),
                version: version("red", 1),
            },
            FlavorText {
                flavor_text: format!("{display} is number {}\u{000C}in the Pokédex.", entry.id),
                language: language("en", 9),
                version: version("red", 1),
            },
            FlavorText {
                flavor_text: format!("A later entry for {display}."),
                language: language("en", 9),
                version: version("blue", 2),
            },
        ],
        evolution_chain: ApiResource {
            url: format!("{base}/evolution-chain/{}/", entry.chain_id()),
        },
    }))
}

async fn get_evolution_chain(
    State(base): State<BaseUrl>,
    Path(id): Path<u32>,
) -> Result<Json<EvolutionChainResponse>, StatusCode> {
    let (first, last) = dex::family(id).ok_or(StatusCode::NOT_FOUND)?;
    let mut members: Vec<Entry> = dex::entries()
        .filter(|e| (first..=last).contains(&e.id))
        .collect();

    let mut chain: Option<ChainLink> = None;
    while let Some(entry) = members.pop() {
        chain = Some(ChainLink {
            species: link(&base, "pokemon-species", entry.id, entry.name),
            evolves_to: chain.into_iter().collect(),
        });
    }
    let chain = chain.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(EvolutionChainResponse { id, chain }))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
