//! C-ABI wrapper around `pokedex-core`.
//!
//! # Overview
//! Exposes the PokeAPI client and the three screen loaders through
//! `extern "C"` functions, so a native UI shell can drive the Pokédex
//! without linking to serde or an async runtime. The host executes every
//! HTTP request itself and hands the response back.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Raw `pokedex_build_*` / `pokedex_parse_*` mirror `PokeApiClient` 1:1
//!   and answer with a single `FfiPokedexResult` envelope.
//! - Screen handles (`pokedex_list_*`, `pokedex_details_*`,
//!   `pokedex_home_*`) hand out requests stamped with an `FfiTicket`; the
//!   host passes the ticket back with the response or with a transport
//!   failure message (`*_abort`). Stale tickets are ignored.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `pokedex_free_*` / `*_free` function.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use pokedex_core::{
    ApiError, ClientConfig, DetailsLoader, HomeLoader, PokeApiClient, PokedexLoader, PokemonRef,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use types::*;

fn transport_error(message: *const c_char) -> ApiError {
    ApiError::Transport(read_c_str(message).unwrap_or("transport failure").to_string())
}

fn pokemon_ref(name_or_id: &str) -> PokemonRef {
    match name_or_id.parse() {
        Ok(target) => target,
        Err(never) => match never {},
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
/// (default `info`). Returns false if a subscriber was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_init_logging() -> bool {
    catch_unwind(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url` with every other setting at its
/// default.
///
/// Returns null if `base_url` is null or empty.
/// The caller must free the returned pointer with `pokedex_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_new(base_url: *const c_char) -> *mut FfiPokedexClient {
    catch_unwind(|| {
        let Some(url) = read_c_str(base_url).filter(|u| !u.trim().is_empty()) else {
            return std::ptr::null_mut();
        };
        let config = ClientConfig {
            base_url: url.to_string(),
            ..ClientConfig::default()
        };
        Box::into_raw(Box::new(FfiPokedexClient {
            inner: PokeApiClient::from_config(&config),
            config,
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a client from a TOML document (`base_url`, `page_size`,
/// `language`, `random_id_max`; all optional).
///
/// Returns null and logs the reason if the document is null, malformed or
/// invalid.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_from_config(toml: *const c_char) -> *mut FfiPokedexClient {
    catch_unwind(|| {
        let Some(raw) = read_c_str(toml) else {
            return std::ptr::null_mut();
        };
        match ClientConfig::from_toml_str(raw) {
            Ok(config) => Box::into_raw(Box::new(FfiPokedexClient {
                inner: PokeApiClient::from_config(&config),
                config,
            })),
            Err(e) => {
                warn!(error = %e, "rejected client config");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_free(client: *mut FfiPokedexClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Raw build functions
// ---------------------------------------------------------------------------

/// `GET /pokemon/{name_or_id}`. Digits address an id, anything else a name.
///
/// Returns null if an argument is null.
/// The caller must free the returned pointer with `pokedex_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_get_pokemon(
    client: *const FfiPokedexClient,
    name_or_id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        let Some(target) = read_c_str(name_or_id) else {
            return std::ptr::null_mut();
        };
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_pokemon(&pokemon_ref(target)))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// `GET /pokemon?limit=&offset=`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_list_pokemon(
    client: *const FfiPokedexClient,
    limit: u32,
    offset: u32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_pokemon(limit, offset))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// `GET /pokemon-species/{name_or_id}`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_get_species(
    client: *const FfiPokedexClient,
    name_or_id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        let Some(target) = read_c_str(name_or_id) else {
            return std::ptr::null_mut();
        };
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_species(&pokemon_ref(target)))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// `GET` an absolute link taken from a previous response, such as
/// `FfiSpecies::evolution_chain_url`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_get_resource(
    client: *const FfiPokedexClient,
    url: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        let Some(url) = read_c_str(url) else {
            return std::ptr::null_mut();
        };
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_resource(url))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Raw parse functions
// ---------------------------------------------------------------------------

/// Parse a `/pokemon/{name_or_id}` response (`data_tag = Pokemon`).
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_pokemon(
    client: *const FfiPokedexClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPokedexResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiPokedexResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPokedexResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_pokemon(resp.to_core()) {
            Ok(pokemon) => FfiPokedexResult::ok_pokemon(pokemon),
            Err(e) => FfiPokedexResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPokedexResult::panic("panic in pokedex_parse_pokemon"))
}

/// Parse a `/pokemon?limit=&offset=` response (`data_tag = Page`).
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_pokemon_page(
    client: *const FfiPokedexClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPokedexResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiPokedexResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPokedexResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_pokemon_page(resp.to_core()) {
            Ok(page) => FfiPokedexResult::ok_page(page),
            Err(e) => FfiPokedexResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPokedexResult::panic("panic in pokedex_parse_pokemon_page"))
}

/// Parse a `/pokemon-species` response (`data_tag = Species`). The
/// description is picked in the client's configured language.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_species(
    client: *const FfiPokedexClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPokedexResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiPokedexResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPokedexResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_species(resp.to_core()) {
            Ok(species) => FfiPokedexResult::ok_species(species, &client.config.language),
            Err(e) => FfiPokedexResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPokedexResult::panic("panic in pokedex_parse_species"))
}

/// Parse an `/evolution-chain/{id}` response (`data_tag = EvolutionChain`).
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_evolution_chain(
    client: *const FfiPokedexClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPokedexResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiPokedexResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPokedexResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_evolution_chain(resp.to_core()) {
            Ok(chain) => FfiPokedexResult::ok_evolution_chain(chain.species_names()),
            Err(e) => FfiPokedexResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPokedexResult::panic("panic in pokedex_parse_evolution_chain"))
}

// ---------------------------------------------------------------------------
// Pokédex list screen
// ---------------------------------------------------------------------------

/// Create the list screen loader. Free with `pokedex_list_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_new(client: *const FfiPokedexClient) -> *mut FfiPokedexList {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        Box::into_raw(Box::new(FfiPokedexList {
            inner: PokedexLoader::from_config(&client.config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_free(list: *mut FfiPokedexList) {
    if !list.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(list) });
        });
    }
}

/// Scroll trigger. Returns the page request, or null while a cycle is
/// running or the list is exhausted.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_load_next(list: *mut FfiPokedexList) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if list.is_null() {
            return std::ptr::null_mut();
        }
        let list = unsafe { &mut *list };
        list.inner
            .load_next_page()
            .map_or(std::ptr::null_mut(), FfiHttpRequest::from_pending)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Feed the page response. On `Pending`, `*out_batch` receives the detail
/// requests to execute (free with `pokedex_free_batch`); otherwise it is
/// set to null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_on_page(
    list: *mut FfiPokedexList,
    ticket: FfiTicket,
    response: *const FfiHttpResponse,
    out_batch: *mut *mut FfiRequestBatch,
) -> FfiEvent {
    catch_unwind(|| {
        if list.is_null() || response.is_null() || out_batch.is_null() {
            return FfiEvent::NullArg;
        }
        let list = unsafe { &mut *list };
        let resp = unsafe { &*response };
        let out_batch = unsafe { &mut *out_batch };
        *out_batch = std::ptr::null_mut();
        match list.inner.on_page_response(ticket.into(), resp.to_core()) {
            pokedex_core::PageEvent::Resolve(requests) => {
                *out_batch = FfiRequestBatch::from_pending(requests);
                FfiEvent::Pending
            }
            other => other.into(),
        }
    })
    .unwrap_or(FfiEvent::Panic)
}

/// Feed one detail response. Returns `Appended` when the batch landed.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_on_detail(
    list: *mut FfiPokedexList,
    ticket: FfiTicket,
    response: *const FfiHttpResponse,
) -> FfiEvent {
    catch_unwind(|| {
        if list.is_null() || response.is_null() {
            return FfiEvent::NullArg;
        }
        let list = unsafe { &mut *list };
        let resp = unsafe { &*response };
        list.inner
            .on_detail_response(ticket.into(), resp.to_core())
            .into()
    })
    .unwrap_or(FfiEvent::Panic)
}

/// Report that the request stamped with `ticket` could not be executed.
/// `message` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_abort(
    list: *mut FfiPokedexList,
    ticket: FfiTicket,
    message: *const c_char,
) -> FfiEvent {
    catch_unwind(|| {
        if list.is_null() {
            return FfiEvent::NullArg;
        }
        let list = unsafe { &mut *list };
        list.inner.abort(ticket.into(), &transport_error(message)).into()
    })
    .unwrap_or(FfiEvent::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_state(list: *const FfiPokedexList) -> FfiLoadState {
    catch_unwind(|| {
        if list.is_null() {
            return FfiLoadState::Idle;
        }
        unsafe { &*list }.inner.state().into()
    })
    .unwrap_or(FfiLoadState::Idle)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_is_loading(list: *const FfiPokedexList) -> bool {
    catch_unwind(|| !list.is_null() && unsafe { &*list }.inner.is_loading()).unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_is_exhausted(list: *const FfiPokedexList) -> bool {
    catch_unwind(|| !list.is_null() && unsafe { &*list }.inner.is_exhausted()).unwrap_or(false)
}

/// Number of entries appended so far.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_len(list: *const FfiPokedexList) -> u32 {
    catch_unwind(|| {
        if list.is_null() {
            return 0;
        }
        unsafe { &*list }.inner.items().len() as u32
    })
    .unwrap_or(0)
}

/// Offset of the next page to fetch.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_offset(list: *const FfiPokedexList) -> u32 {
    catch_unwind(|| {
        if list.is_null() {
            return 0;
        }
        unsafe { &*list }.inner.offset()
    })
    .unwrap_or(0)
}

/// Copy of the entry at `index`, or null when out of range.
/// Free with `pokedex_free_summary`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_list_get(
    list: *const FfiPokedexList,
    index: u32,
) -> *mut FfiPokemonSummary {
    catch_unwind(|| {
        if list.is_null() {
            return std::ptr::null_mut();
        }
        let list = unsafe { &*list };
        list.inner
            .items()
            .get(index as usize)
            .map_or(std::ptr::null_mut(), |s| {
                Box::into_raw(Box::new(FfiPokemonSummary::new(s)))
            })
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Details screen
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_new(
    client: *const FfiPokedexClient,
) -> *mut FfiPokedexDetails {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        Box::into_raw(Box::new(FfiPokedexDetails {
            inner: DetailsLoader::from_config(&client.config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_free(details: *mut FfiPokedexDetails) {
    if !details.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(details) });
        });
    }
}

/// Open the screen for `name`. Returns the pokemon and species requests;
/// responses to any earlier open are ignored from now on.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_open(
    details: *mut FfiPokedexDetails,
    name: *const c_char,
) -> *mut FfiRequestBatch {
    catch_unwind(|| {
        let Some(name) = read_c_str(name) else {
            return std::ptr::null_mut();
        };
        if details.is_null() {
            return std::ptr::null_mut();
        }
        let details = unsafe { &mut *details };
        FfiRequestBatch::from_pending(details.inner.open(name).into())
    })
    .unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_on_response(
    details: *mut FfiPokedexDetails,
    ticket: FfiTicket,
    response: *const FfiHttpResponse,
) -> FfiEvent {
    catch_unwind(|| {
        if details.is_null() || response.is_null() {
            return FfiEvent::NullArg;
        }
        let details = unsafe { &mut *details };
        let resp = unsafe { &*response };
        details.inner.on_response(ticket.into(), resp.to_core()).into()
    })
    .unwrap_or(FfiEvent::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_abort(
    details: *mut FfiPokedexDetails,
    ticket: FfiTicket,
    message: *const c_char,
) -> FfiEvent {
    catch_unwind(|| {
        if details.is_null() {
            return FfiEvent::NullArg;
        }
        let details = unsafe { &mut *details };
        details.inner.abort(ticket.into(), &transport_error(message)).into()
    })
    .unwrap_or(FfiEvent::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_state(details: *const FfiPokedexDetails) -> FfiDetailsState {
    catch_unwind(|| {
        if details.is_null() {
            return FfiDetailsState::Closed;
        }
        unsafe { &*details }.inner.state().into()
    })
    .unwrap_or(FfiDetailsState::Closed)
}

/// The loaded record, or null while loading or after a failure.
/// Free with `pokedex_free_details`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_get(
    details: *const FfiPokedexDetails,
) -> *mut FfiPokemonDetails {
    catch_unwind(|| {
        if details.is_null() {
            return std::ptr::null_mut();
        }
        let loader = &unsafe { &*details }.inner;
        loader.details().map_or(std::ptr::null_mut(), |d| {
            Box::into_raw(Box::new(FfiPokemonDetails::new(
                d,
                loader.background_color(),
                loader.stat_label_width(),
            )))
        })
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Backdrop colour, white until loaded. Free with `pokedex_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_background_color(
    details: *const FfiPokedexDetails,
) -> *mut c_char {
    catch_unwind(|| {
        if details.is_null() {
            return std::ptr::null_mut();
        }
        into_c_string(unsafe { &*details }.inner.background_color())
    })
    .unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_details_stat_label_width(details: *const FfiPokedexDetails) -> u32 {
    catch_unwind(|| {
        if details.is_null() {
            return 0;
        }
        unsafe { &*details }.inner.stat_label_width()
    })
    .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Home screen
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_new(client: *const FfiPokedexClient) -> *mut FfiPokedexHome {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        Box::into_raw(Box::new(FfiPokedexHome {
            inner: HomeLoader::from_config(&client.config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_free(home: *mut FfiPokedexHome) {
    if !home.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(home) });
        });
    }
}

/// Request a random Pokémon, superseding any pending request.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_refresh(home: *mut FfiPokedexHome) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if home.is_null() {
            return std::ptr::null_mut();
        }
        let home = unsafe { &mut *home };
        FfiHttpRequest::from_pending(home.inner.refresh(&mut rand::rng()))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Search by name. Returns null for blank input.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_search(
    home: *mut FfiPokedexHome,
    text: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        let Some(text) = read_c_str(text) else {
            return std::ptr::null_mut();
        };
        if home.is_null() {
            return std::ptr::null_mut();
        }
        let home = unsafe { &mut *home };
        home.inner
            .search(text)
            .map_or(std::ptr::null_mut(), FfiHttpRequest::from_pending)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Returns `NotFound` when a search failed and the alert should show.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_on_response(
    home: *mut FfiPokedexHome,
    ticket: FfiTicket,
    response: *const FfiHttpResponse,
) -> FfiEvent {
    catch_unwind(|| {
        if home.is_null() || response.is_null() {
            return FfiEvent::NullArg;
        }
        let home = unsafe { &mut *home };
        let resp = unsafe { &*response };
        home.inner.on_response(ticket.into(), resp.to_core()).into()
    })
    .unwrap_or(FfiEvent::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_abort(
    home: *mut FfiPokedexHome,
    ticket: FfiTicket,
    message: *const c_char,
) -> FfiEvent {
    catch_unwind(|| {
        if home.is_null() {
            return FfiEvent::NullArg;
        }
        let home = unsafe { &mut *home };
        home.inner.abort(ticket.into(), &transport_error(message)).into()
    })
    .unwrap_or(FfiEvent::Panic)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_is_loading(home: *const FfiPokedexHome) -> bool {
    catch_unwind(|| !home.is_null() && unsafe { &*home }.inner.is_loading()).unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_shows_spinner(home: *const FfiPokedexHome) -> bool {
    catch_unwind(|| home.is_null() || unsafe { &*home }.inner.shows_spinner()).unwrap_or(true)
}

/// The Pokémon on screen, or null before the first success.
/// Free with `pokedex_free_pokemon`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_home_get(home: *const FfiPokedexHome) -> *mut FfiPokemon {
    catch_unwind(|| {
        if home.is_null() {
            return std::ptr::null_mut();
        }
        unsafe { &*home }
            .inner
            .pokemon()
            .map_or(std::ptr::null_mut(), |p| {
                Box::into_raw(Box::new(FfiPokemon::new(p.clone())))
            })
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request from any `pokedex_build_*` or screen trigger.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        unsafe { Box::from_raw(req) }.release();
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_batch(batch: *mut FfiRequestBatch) {
    if batch.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        unsafe { Box::from_raw(batch) }.release();
    });
}

/// Free a result from any `pokedex_parse_*` function. Uses `data_tag` to
/// determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_result(result: *mut FfiPokedexResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        unsafe { Box::from_raw(result) }.release();
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_summary(summary: *mut FfiPokemonSummary) {
    if summary.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        unsafe { Box::from_raw(summary) }.release();
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_details(details: *mut FfiPokemonDetails) {
    if details.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        unsafe { Box::from_raw(details) }.release();
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_pokemon(pokemon: *mut FfiPokemon) {
    if pokemon.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        unsafe { Box::from_raw(pokemon) }.release();
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
