//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type in C-compatible form: `*mut c_char` for
//! strings (null for `None`), pointer + length pairs for sequences, and
//! enums with explicit discriminants. Sequences are handed out as boxed
//! slices so their capacity always equals their length when reclaimed.
//! Conversions and the matching release helpers live here; `lib.rs` only
//! holds the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use pokedex_core::display;
use pokedex_core::types::NamedResource;
use pokedex_core::{
    ApiError, ClientConfig, DetailsEvent, DetailsLoader, DetailsState, HomeEvent, HomeLoader,
    HttpMethod, HttpRequest, HttpResponse, LoadState, PageEvent, PendingRequest, PokeApiClient,
    PokedexLoader, Pokemon, PokemonDetails, PokemonPage, PokemonSpecies, PokemonSummary, Ticket,
};

// ---------------------------------------------------------------------------
// Opaque handles
// ---------------------------------------------------------------------------

/// Opaque handle to a `PokeApiClient` and the configuration it came from.
/// Screen handles created from it copy what they need, so it may be freed
/// before them.
pub struct FfiPokedexClient {
    pub(crate) inner: PokeApiClient,
    pub(crate) config: ClientConfig,
}

/// Opaque handle to the Pokédex list screen loader.
pub struct FfiPokedexList {
    pub(crate) inner: PokedexLoader,
}

/// Opaque handle to the details screen loader.
pub struct FfiPokedexDetails {
    pub(crate) inner: DetailsLoader,
}

/// Opaque handle to the home screen loader.
pub struct FfiPokedexHome {
    pub(crate) inner: HomeLoader,
}

// ---------------------------------------------------------------------------
// Strings and sequences
// ---------------------------------------------------------------------------

/// Interior NULs cannot cross the boundary; such strings become empty.
pub(crate) fn into_c_string(s: impl Into<String>) -> *mut c_char {
    CString::new(s.into()).unwrap_or_default().into_raw()
}

pub(crate) fn into_c_string_opt(s: Option<impl Into<String>>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), into_c_string)
}

/// Borrow a caller-owned C string. Null and non-UTF-8 input yield `None`.
pub(crate) fn read_c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

fn into_raw_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    (ptr, len)
}

fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

/// An owned array of C strings.
#[repr(C)]
pub struct FfiStringList {
    pub items: *mut *mut c_char,
    pub len: u32,
}

impl FfiStringList {
    pub(crate) fn new(strings: Vec<String>) -> Self {
        let items: Vec<*mut c_char> = strings.into_iter().map(into_c_string).collect();
        let (items, len) = into_raw_slice(items);
        Self { items, len }
    }

    /// Badge labels: each category with its first letter upper-cased.
    pub(crate) fn labels(categories: &[String]) -> Self {
        Self::new(categories.iter().map(|c| display::capitalize(c)).collect())
    }

    pub(crate) fn release(&self) {
        for s in from_raw_slice(self.items, self.len) {
            free_c_string(s);
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// Identity of a loader request. Pass it back unchanged with the response.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct FfiTicket {
    pub cycle: u64,
    pub slot: u32,
}

impl From<Ticket> for FfiTicket {
    fn from(t: Ticket) -> Self {
        Self {
            cycle: t.cycle,
            slot: t.slot as u32,
        }
    }
}

impl From<FfiTicket> for Ticket {
    fn from(t: FfiTicket) -> Self {
        Self {
            cycle: t.cycle,
            slot: t.slot as usize,
        }
    }
}

/// An HTTP request for the host to execute.
///
/// Requests from the raw `pokedex_build_*` functions carry a zero ticket;
/// requests handed out by a screen handle carry the ticket that handle
/// expects back.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub ticket: FfiTicket,
}

impl FfiHttpRequest {
    fn new(req: HttpRequest, ticket: FfiTicket) -> Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);
        Self {
            method: req.method.into(),
            url: into_c_string(req.url),
            headers,
            headers_len,
            ticket,
        }
    }

    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(Self::new(req, FfiTicket { cycle: 0, slot: 0 })))
    }

    pub(crate) fn from_pending(pending: PendingRequest) -> *mut Self {
        Box::into_raw(Box::new(Self::from_pending_value(pending)))
    }

    fn from_pending_value(pending: PendingRequest) -> Self {
        Self::new(pending.request, pending.ticket.into())
    }

    pub(crate) fn release(&self) {
        free_c_string(self.url);
        for h in from_raw_slice(self.headers, self.headers_len) {
            free_c_string(h.key);
            free_c_string(h.value);
        }
    }
}

/// Requests the host may execute concurrently and feed back in any order.
#[repr(C)]
pub struct FfiRequestBatch {
    pub items: *mut FfiHttpRequest,
    pub len: u32,
}

impl FfiRequestBatch {
    pub(crate) fn from_pending(requests: Vec<PendingRequest>) -> *mut Self {
        let requests: Vec<FfiHttpRequest> = requests
            .into_iter()
            .map(FfiHttpRequest::from_pending_value)
            .collect();
        let (items, len) = into_raw_slice(requests);
        Box::into_raw(Box::new(Self { items, len }))
    }

    pub(crate) fn release(&self) {
        for req in from_raw_slice(self.items, self.len) {
            req.release();
        }
    }
}

// ---------------------------------------------------------------------------
// Responses (caller-owned)
// ---------------------------------------------------------------------------

/// An HTTP response built by the host after executing a request. The FFI
/// layer reads but never frees these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> HttpResponse {
        HttpResponse::new(self.status, read_c_str(self.body).unwrap_or(""))
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct FfiStat {
    pub name: *mut c_char,
    pub value: u8,
    /// `value / 255`, the fill of the stat bar.
    pub ratio: f32,
}

impl FfiStat {
    fn new(name: String, value: u8) -> Self {
        Self {
            name: into_c_string(name),
            value,
            ratio: display::stat_ratio(value),
        }
    }
}

fn stats_into_raw(stats: Vec<FfiStat>) -> (*mut FfiStat, u32) {
    into_raw_slice(stats)
}

fn release_stats(ptr: *mut FfiStat, len: u32) {
    for stat in from_raw_slice(ptr, len) {
        free_c_string(stat.name);
    }
}

/// A `/pokemon` record, as parsed or as shown on the home screen.
#[repr(C)]
pub struct FfiPokemon {
    pub id: u32,
    pub name: *mut c_char,
    pub display_name: *mut c_char,
    pub sprite_url: *mut c_char,
    pub artwork_url: *mut c_char,
    pub categories: FfiStringList,
    pub category_labels: FfiStringList,
    pub stats: *mut FfiStat,
    pub stats_len: u32,
    pub color: *mut c_char,
}

impl FfiPokemon {
    pub(crate) fn new(pokemon: Pokemon) -> Self {
        let categories = pokemon.categories();
        let color = display::primary_color(&categories);
        let stats: Vec<FfiStat> = pokemon
            .stats
            .into_iter()
            .map(|s| FfiStat::new(s.stat.name, s.base_stat))
            .collect();
        let (stats, stats_len) = stats_into_raw(stats);
        Self {
            id: pokemon.id,
            display_name: into_c_string(display::display_name(&pokemon.name)),
            name: into_c_string(pokemon.name),
            sprite_url: into_c_string_opt(pokemon.sprites.front_default),
            artwork_url: into_c_string_opt(pokemon.sprites.other.official_artwork.front_default),
            category_labels: FfiStringList::labels(&categories),
            categories: FfiStringList::new(categories),
            stats,
            stats_len,
            color: into_c_string(color),
        }
    }

    pub(crate) fn release(&self) {
        free_c_string(self.name);
        free_c_string(self.display_name);
        free_c_string(self.sprite_url);
        free_c_string(self.artwork_url);
        self.categories.release();
        self.category_labels.release();
        release_stats(self.stats, self.stats_len);
        free_c_string(self.color);
    }
}

#[repr(C)]
pub struct FfiNamedResource {
    pub name: *mut c_char,
    pub url: *mut c_char,
}

/// One page of `/pokemon?limit=&offset=`.
#[repr(C)]
pub struct FfiPage {
    pub count: u32,
    pub has_next: bool,
    pub results: *mut FfiNamedResource,
    pub len: u32,
}

impl FfiPage {
    fn new(page: PokemonPage) -> Self {
        let results: Vec<FfiNamedResource> = page
            .results
            .into_iter()
            .map(|NamedResource { name, url }| FfiNamedResource {
                name: into_c_string(name),
                url: into_c_string(url),
            })
            .collect();
        let (results, len) = into_raw_slice(results);
        Self {
            count: page.count,
            has_next: page.next.is_some(),
            results,
            len,
        }
    }

    fn release(&self) {
        for r in from_raw_slice(self.results, self.len) {
            free_c_string(r.name);
            free_c_string(r.url);
        }
    }
}

/// A `/pokemon-species` record reduced to what a screen shows.
#[repr(C)]
pub struct FfiSpecies {
    pub id: u32,
    pub name: *mut c_char,
    /// Flavor text in the client's configured language, or null.
    pub description: *mut c_char,
    /// Link to feed into `pokedex_build_get_resource`, or null.
    pub evolution_chain_url: *mut c_char,
}

impl FfiSpecies {
    fn new(species: PokemonSpecies, language: &str) -> Self {
        Self {
            id: species.id,
            description: into_c_string_opt(species.flavor_text(language)),
            name: into_c_string(species.name),
            evolution_chain_url: into_c_string_opt(species.evolution_chain.map(|r| r.url)),
        }
    }

    fn release(&self) {
        free_c_string(self.name);
        free_c_string(self.description);
        free_c_string(self.evolution_chain_url);
    }
}

/// A Pokédex list entry with its display attributes resolved.
#[repr(C)]
pub struct FfiPokemonSummary {
    pub id: u32,
    pub name: *mut c_char,
    pub display_name: *mut c_char,
    pub url: *mut c_char,
    pub image_url: *mut c_char,
    pub primary_category: *mut c_char,
    pub color: *mut c_char,
}

impl FfiPokemonSummary {
    pub(crate) fn new(summary: &PokemonSummary) -> Self {
        Self {
            id: summary.id,
            name: into_c_string(summary.name.as_str()),
            display_name: into_c_string(display::display_name(&summary.name)),
            url: into_c_string(summary.url.as_str()),
            image_url: into_c_string_opt(summary.image_url.clone()),
            primary_category: into_c_string(summary.primary_category.as_str()),
            color: into_c_string(display::type_color(&summary.primary_category)),
        }
    }

    pub(crate) fn release(&self) {
        free_c_string(self.name);
        free_c_string(self.display_name);
        free_c_string(self.url);
        free_c_string(self.image_url);
        free_c_string(self.primary_category);
        free_c_string(self.color);
    }
}

/// Everything the details screen renders.
#[repr(C)]
pub struct FfiPokemonDetails {
    pub name: *mut c_char,
    pub display_name: *mut c_char,
    pub image_url: *mut c_char,
    pub categories: FfiStringList,
    pub category_labels: FfiStringList,
    pub stats: *mut FfiStat,
    pub stats_len: u32,
    pub description: *mut c_char,
    pub background_color: *mut c_char,
    pub stat_label_width: u32,
}

impl FfiPokemonDetails {
    pub(crate) fn new(details: &PokemonDetails, background_color: &str, label_width: u32) -> Self {
        let stats: Vec<FfiStat> = details
            .stats
            .iter()
            .map(|s| FfiStat::new(s.name.clone(), s.value))
            .collect();
        let (stats, stats_len) = stats_into_raw(stats);
        Self {
            name: into_c_string(details.name.as_str()),
            display_name: into_c_string(display::display_name(&details.name)),
            image_url: into_c_string_opt(details.image_url.clone()),
            categories: FfiStringList::new(details.categories.clone()),
            category_labels: FfiStringList::labels(&details.categories),
            stats,
            stats_len,
            description: into_c_string_opt(details.description.clone()),
            background_color: into_c_string(background_color),
            stat_label_width: label_width,
        }
    }

    pub(crate) fn release(&self) {
        free_c_string(self.name);
        free_c_string(self.display_name);
        free_c_string(self.image_url);
        self.categories.release();
        self.category_labels.release();
        release_stats(self.stats, self.stats_len);
        free_c_string(self.description);
        free_c_string(self.background_color);
    }
}

// ---------------------------------------------------------------------------
// Result envelope for the raw parse functions
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    RequestFailed = 1,
    Deserialization = 2,
    Transport = 3,
    Panic = 4,
    NullArg = 5,
}

/// Tells `pokedex_free_result` what `FfiPokedexResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Pokemon = 1,
    Page = 2,
    Species = 3,
    /// `FfiStringList` of species names, base form first.
    EvolutionChain = 4,
}

/// On success `error_code` is `Ok`, `error_message` is null and `data`
/// points to the payload named by `data_tag`. On failure `data` is null and
/// `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiPokedexResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiPokedexResult {
    fn ok<T>(data_tag: FfiDataTag, payload: T) -> *mut Self {
        Box::into_raw(Box::new(Self {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data: Box::into_raw(Box::new(payload)) as *mut c_void,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(Self {
            error_code,
            error_message: into_c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_pokemon(pokemon: Pokemon) -> *mut Self {
        Self::ok(FfiDataTag::Pokemon, FfiPokemon::new(pokemon))
    }

    pub(crate) fn ok_page(page: PokemonPage) -> *mut Self {
        Self::ok(FfiDataTag::Page, FfiPage::new(page))
    }

    pub(crate) fn ok_species(species: PokemonSpecies, language: &str) -> *mut Self {
        Self::ok(FfiDataTag::Species, FfiSpecies::new(species, language))
    }

    pub(crate) fn ok_evolution_chain(names: Vec<String>) -> *mut Self {
        Self::ok(FfiDataTag::EvolutionChain, FfiStringList::new(names))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::RequestFailed { .. } => FfiErrorCode::RequestFailed,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Transport(_) => FfiErrorCode::Transport,
        };
        Self::err(code, err.status().unwrap_or(0), err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// Free the payload and message, not the envelope itself.
    pub(crate) fn release(&self) {
        free_c_string(self.error_message);
        if self.data.is_null() {
            return;
        }
        match self.data_tag {
            FfiDataTag::Pokemon => {
                unsafe { Box::from_raw(self.data as *mut FfiPokemon) }.release();
            }
            FfiDataTag::Page => {
                unsafe { Box::from_raw(self.data as *mut FfiPage) }.release();
            }
            FfiDataTag::Species => {
                unsafe { Box::from_raw(self.data as *mut FfiSpecies) }.release();
            }
            FfiDataTag::EvolutionChain => {
                unsafe { Box::from_raw(self.data as *mut FfiStringList) }.release();
            }
            FfiDataTag::None => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Screen states and events
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiLoadState {
    Idle = 0,
    FetchingPage = 1,
    ResolvingDetails = 2,
    Exhausted = 3,
}

impl From<LoadState> for FfiLoadState {
    fn from(s: LoadState) -> Self {
        match s {
            LoadState::Idle => FfiLoadState::Idle,
            LoadState::FetchingPage => FfiLoadState::FetchingPage,
            LoadState::ResolvingDetails => FfiLoadState::ResolvingDetails,
            LoadState::Exhausted => FfiLoadState::Exhausted,
        }
    }
}

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDetailsState {
    Closed = 0,
    Loading = 1,
    Loaded = 2,
    NotLoaded = 3,
}

impl From<DetailsState> for FfiDetailsState {
    fn from(s: DetailsState) -> Self {
        match s {
            DetailsState::Closed => FfiDetailsState::Closed,
            DetailsState::Loading => FfiDetailsState::Loading,
            DetailsState::Loaded => FfiDetailsState::Loaded,
            DetailsState::NotLoaded => FfiDetailsState::NotLoaded,
        }
    }
}

/// Outcome of feeding a response (or a transport failure) to a screen
/// handle. One enum serves all three screens; each only returns the
/// variants that apply to it.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiEvent {
    /// Waiting for more responses of the running cycle.
    Pending = 0,
    /// List: the batch was appended.
    Appended = 1,
    /// List: the upstream has no more entries.
    Exhausted = 2,
    /// Details: both records arrived.
    Loaded = 3,
    /// Details: a request failed; the screen stays on its spinner.
    NotLoaded = 4,
    /// Home: the response replaced the shown Pokémon.
    Showing = 5,
    /// Home: a search failed; show the "Pokémon not found" alert.
    NotFound = 6,
    /// The cycle failed and was discarded.
    Failed = 7,
    /// The response did not belong to the running cycle.
    Ignored = 8,
    NullArg = 9,
    Panic = 10,
}

impl From<PageEvent> for FfiEvent {
    fn from(e: PageEvent) -> Self {
        match e {
            // Detail requests come out of `pokedex_list_on_page` instead.
            PageEvent::Resolve(_) | PageEvent::Pending { .. } => FfiEvent::Pending,
            PageEvent::Appended { .. } => FfiEvent::Appended,
            PageEvent::Exhausted => FfiEvent::Exhausted,
            PageEvent::Failed => FfiEvent::Failed,
            PageEvent::Ignored => FfiEvent::Ignored,
        }
    }
}

impl From<DetailsEvent> for FfiEvent {
    fn from(e: DetailsEvent) -> Self {
        match e {
            DetailsEvent::Pending => FfiEvent::Pending,
            DetailsEvent::Loaded => FfiEvent::Loaded,
            DetailsEvent::NotLoaded => FfiEvent::NotLoaded,
            DetailsEvent::Ignored => FfiEvent::Ignored,
        }
    }
}

impl From<HomeEvent> for FfiEvent {
    fn from(e: HomeEvent) -> Self {
        match e {
            HomeEvent::Showing => FfiEvent::Showing,
            HomeEvent::NotFound => FfiEvent::NotFound,
            HomeEvent::Failed => FfiEvent::Failed,
            HomeEvent::Ignored => FfiEvent::Ignored,
        }
    }
}
