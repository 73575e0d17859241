use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_pokeapi::{app, EvolutionChainResponse, PageResponse, PokemonResponse, SpeciesResponse};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_defaults_to_first_twenty() {
    let resp = app().oneshot(get("/pokemon")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: PageResponse = body_json(resp).await;
    assert_eq!(page.count, 45);
    assert_eq!(page.results.len(), 20);
    assert_eq!(page.results[0].name, "bulbasaur");
    assert_eq!(page.results[0].url, "http://localhost:3000/pokemon/1/");
    assert!(page.previous.is_none());
    assert_eq!(
        page.next.as_deref(),
        Some("http://localhost:3000/pokemon?offset=20&limit=20")
    );
}

#[tokio::test]
async fn list_last_page_has_no_next() {
    let resp = app()
        .oneshot(get("/pokemon?limit=20&offset=40"))
        .await
        .unwrap();

    let page: PageResponse = body_json(resp).await;
    assert_eq!(page.results.len(), 5);
    assert_eq!(page.results[4].name, "vileplume");
    assert!(page.next.is_none());
    assert!(page.previous.is_some());
}

#[tokio::test]
async fn list_past_the_end_is_empty() {
    let resp = app()
        .oneshot(get("/pokemon?limit=20&offset=60"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: PageResponse = body_json(resp).await;
    assert!(page.results.is_empty());
    assert!(page.next.is_none());
}

#[tokio::test]
async fn list_bad_limit_returns_400() {
    let resp = app().oneshot(get("/pokemon?limit=many")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- pokemon ---

#[tokio::test]
async fn get_pokemon_by_id_and_name_match() {
    let by_id: PokemonResponse = body_json(app().oneshot(get("/pokemon/25")).await.unwrap()).await;
    let by_name: PokemonResponse =
        body_json(app().oneshot(get("/pokemon/pikachu")).await.unwrap()).await;

    assert_eq!(by_id.name, "pikachu");
    assert_eq!(by_id.id, by_name.id);
    assert_eq!(
        serde_json::to_value(&by_id).unwrap(),
        serde_json::to_value(&by_name).unwrap()
    );
}

#[tokio::test]
async fn get_pokemon_with_trailing_slash() {
    let resp = app().oneshot(get("/pokemon/1/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_pokemon_not_found() {
    for uri in ["/pokemon/0", "/pokemon/-1", "/pokemon/agumon", "/pokemon/Pikachu"] {
        let resp = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

// --- species ---

#[tokio::test]
async fn species_has_flavor_texts_and_chain_link() {
    let resp = app().oneshot(get("/pokemon-species/charmander")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let species: SpeciesResponse = body_json(resp).await;
    assert_eq!(species.id, 4);
    assert_eq!(species.flavor_text_entries[0].language.name, "fr");
    assert_eq!(species.flavor_text_entries[1].language.name, "en");
    assert!(species.flavor_text_entries[1].flavor_text.contains('\u{000C}'));
    assert_eq!(
        species.evolution_chain.url,
        "http://localhost:3000/evolution-chain/2/"
    );
}

#[tokio::test]
async fn species_not_found() {
    let resp = app().oneshot(get("/pokemon-species/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- evolution chain ---

#[tokio::test]
async fn evolution_chain_links_the_family_in_order() {
    let resp = app().oneshot(get("/evolution-chain/2/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let chain: EvolutionChainResponse = body_json(resp).await;
    assert_eq!(chain.chain.species.name, "charmander");
    let second = &chain.chain.evolves_to[0];
    assert_eq!(second.species.name, "charmeleon");
    assert_eq!(second.evolves_to[0].species.name, "charizard");
    assert!(second.evolves_to[0].evolves_to.is_empty());
}

#[tokio::test]
async fn evolution_chain_not_found() {
    let resp = app().oneshot(get("/evolution-chain/0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
