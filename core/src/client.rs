//! Stateless HTTP request builder and response parser for PokeAPI.
//!
//! # Design
//! `PokeApiClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the HTTP round-trip in between, keeping
//! the core deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{EvolutionChain, Pokemon, PokemonPage, PokemonRef, PokemonSpecies};

/// Synchronous, stateless client for the PokeAPI read endpoints.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_pokemon(&self, pokemon: &PokemonRef) -> HttpRequest {
        HttpRequest::get(format!("{}/pokemon/{pokemon}", self.base_url))
    }

    pub fn build_list_pokemon(&self, limit: u32, offset: u32) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/pokemon?limit={limit}&offset={offset}",
            self.base_url
        ))
    }

    pub fn build_get_species(&self, pokemon: &PokemonRef) -> HttpRequest {
        HttpRequest::get(format!("{}/pokemon-species/{pokemon}", self.base_url))
    }

    /// Follow a fully-qualified link found in another resource, such as
    /// `PokemonSpecies::evolution_chain`.
    pub fn build_get_resource(&self, url: &str) -> HttpRequest {
        HttpRequest::get(url.to_string())
    }

    pub fn parse_pokemon(&self, response: HttpResponse) -> Result<Pokemon, ApiError> {
        parse_json(response)
    }

    pub fn parse_pokemon_page(&self, response: HttpResponse) -> Result<PokemonPage, ApiError> {
        parse_json(response)
    }

    pub fn parse_species(&self, response: HttpResponse) -> Result<PokemonSpecies, ApiError> {
        parse_json(response)
    }

    pub fn parse_evolution_chain(
        &self,
        response: HttpResponse,
    ) -> Result<EvolutionChain, ApiError> {
        parse_json(response)
    }

    /// Untyped body of any successful GET.
    pub fn parse_resource(&self, response: HttpResponse) -> Result<serde_json::Value, ApiError> {
        parse_json(response)
    }
}

/// Any non-2xx status is the same failure; the status and body ride along
/// for the log.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::RequestFailed {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn client() -> PokeApiClient {
        PokeApiClient::new("https://pokeapi.co/api/v2")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse::new(200, body)
    }

    #[test]
    fn build_get_pokemon_by_id() {
        let req = client().build_get_pokemon(&PokemonRef::Id(25));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://pokeapi.co/api/v2/pokemon/25");
    }

    #[test]
    fn build_get_pokemon_by_name_is_lowercased() {
        let req = client().build_get_pokemon(&"Pikachu".into());
        assert_eq!(req.url, "https://pokeapi.co/api/v2/pokemon/pikachu");
    }

    #[test]
    fn build_get_pokemon_keeps_search_text_inside_the_path() {
        let req = client().build_get_pokemon(&"mr mime".into());
        assert_eq!(req.url, "https://pokeapi.co/api/v2/pokemon/mr%20mime");

        let req = client().build_get_species(&"pikachu?x".into());
        assert_eq!(req.url, "https://pokeapi.co/api/v2/pokemon-species/pikachu%3Fx");
    }

    #[test]
    fn build_list_pokemon_carries_limit_and_offset() {
        let req = client().build_list_pokemon(20, 40);
        assert_eq!(req.url, "https://pokeapi.co/api/v2/pokemon?limit=20&offset=40");
    }

    #[test]
    fn build_get_species() {
        let req = client().build_get_species(&"bulbasaur".into());
        assert_eq!(req.url, "https://pokeapi.co/api/v2/pokemon-species/bulbasaur");
    }

    #[test]
    fn build_get_resource_uses_the_link_verbatim() {
        let req = client().build_get_resource("https://pokeapi.co/api/v2/evolution-chain/1/");
        assert_eq!(req.url, "https://pokeapi.co/api/v2/evolution-chain/1/");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PokeApiClient::new("http://localhost:3000/");
        let req = client.build_list_pokemon(1, 0);
        assert_eq!(req.url, "http://localhost:3000/pokemon?limit=1&offset=0");
    }

    #[test]
    fn from_config_uses_configured_base() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9000/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(PokeApiClient::from_config(&config).base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn parse_pokemon_page_success() {
        let page = client()
            .parse_pokemon_page(ok(
                r#"{"count":2,"next":null,"previous":null,"results":[
                    {"name":"bulbasaur","url":"https://pokeapi.co/api/v2/pokemon/1/"},
                    {"name":"ivysaur","url":"https://pokeapi.co/api/v2/pokemon/2/"}]}"#,
            ))
            .unwrap();
        assert_eq!(page.count, 2);
        assert!(page.next.is_none());
        assert_eq!(page.results[1].name, "ivysaur");
    }

    #[test]
    fn not_found_and_server_error_are_the_same_failure() {
        for status in [404, 500, 503] {
            let err = client()
                .parse_pokemon(HttpResponse::new(status, "boom"))
                .unwrap_err();
            assert!(
                matches!(err, ApiError::RequestFailed { status: s, .. } if s == status),
                "{err}"
            );
        }
    }

    #[test]
    fn parse_species_bad_json() {
        let err = client().parse_species(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_resource_returns_raw_json() {
        let value = client().parse_resource(ok(r#"{"id":1,"extra":[1,2]}"#)).unwrap();
        assert_eq!(value["extra"][1], 2);
    }
}
