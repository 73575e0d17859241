//! Screen flows against the live mock upstream.
//!
//! # Design
//! Starts the mock server on a random port, then drives every loader over
//! real HTTP using ureq, playing the part of the UI host. Validates that the
//! core's request building and response parsing work end-to-end with the
//! server's JSON.

use std::net::SocketAddr;

use pokedex_core::{
    ApiError, ClientConfig, DetailsLoader, DetailsState, HomeEvent, HomeLoader, HttpRequest,
    HttpResponse, LoadState, PageEvent, PokeApiClient, PokedexLoader, PokemonRef,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core handle
/// status interpretation.
fn execute(req: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut call = agent.get(&req.url);
    for (key, value) in &req.headers {
        call = call.header(key.as_str(), value.as_str());
    }
    let mut response = call
        .call()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_pokeapi::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::from_toml_str(&format!(
        r#"
        base_url = "http://{addr}"
        random_id_max = 45
        "#
    ))
    .unwrap()
}

/// Run one list cycle, executing the detail requests concurrently.
fn scroll(loader: &mut PokedexLoader) -> PageEvent {
    let Some(page) = loader.load_next_page() else {
        return PageEvent::Ignored;
    };
    let event = loader.on_page_response(page.ticket, execute(&page.request).unwrap());
    let PageEvent::Resolve(requests) = event else {
        return event;
    };

    let responses: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = requests
            .iter()
            .map(|pending| s.spawn(move || (pending.ticket, execute(&pending.request).unwrap())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Feed in reverse completion order to prove placement is by slot.
    let mut last = PageEvent::Ignored;
    for (ticket, response) in responses.into_iter().rev() {
        last = loader.on_detail_response(ticket, response);
    }
    last
}

#[test]
fn pokedex_scrolls_to_the_end() {
    let addr = start_server();
    let mut loader = PokedexLoader::from_config(&config(addr));

    assert_eq!(scroll(&mut loader), PageEvent::Appended { count: 20 });
    assert_eq!((loader.items().len(), loader.offset()), (20, 20));

    assert_eq!(scroll(&mut loader), PageEvent::Appended { count: 20 });
    assert_eq!((loader.items().len(), loader.offset()), (40, 40));

    // The last page is short and has no `next` link.
    assert_eq!(scroll(&mut loader), PageEvent::Appended { count: 5 });
    assert_eq!(loader.items().len(), 45);
    assert_eq!(loader.state(), LoadState::Exhausted);
    assert_eq!(scroll(&mut loader), PageEvent::Ignored);

    let ids: Vec<u32> = loader.items().iter().map(|s| s.id).collect();
    assert_eq!(ids, (1..=45).collect::<Vec<_>>());

    let charizard = &loader.items()[5];
    assert_eq!(charizard.name, "charizard");
    assert_eq!(charizard.primary_category, "fire");
    assert_eq!(charizard.url, format!("http://{addr}/pokemon/6/"));
    assert_eq!(
        charizard.image_url.as_deref(),
        Some(format!("http://{addr}/sprites/pokemon/6.png").as_str())
    );
}

#[test]
fn pokedex_retries_the_same_page_after_a_transport_failure() {
    let addr = start_server();
    let mut loader = PokedexLoader::from_config(&config(addr));

    let page = loader.load_next_page().unwrap();
    let err = ApiError::Transport("connection reset".to_string());
    assert_eq!(loader.abort(page.ticket, &err), PageEvent::Failed);
    assert_eq!(loader.offset(), 0);

    assert_eq!(scroll(&mut loader), PageEvent::Appended { count: 20 });
    assert_eq!(loader.items()[0].name, "bulbasaur");
}

#[test]
fn details_load_record_and_english_description() {
    let addr = start_server();
    let config = config(addr);
    let client = PokeApiClient::from_config(&config);
    let mut loader = DetailsLoader::from_config(&config);

    for pending in loader.open("charmander") {
        loader.on_response(pending.ticket, execute(&pending.request).unwrap());
    }

    assert_eq!(loader.state(), DetailsState::Loaded);
    let details = loader.details().unwrap();
    assert_eq!(details.name, "charmander");
    assert_eq!(details.categories, vec!["fire"]);
    assert_eq!(details.stats.len(), 6);
    assert_eq!(details.stats[0].name, "hp");
    assert_eq!(
        details.description.as_deref(),
        Some("Charmander is number 4 in the Pokédex.")
    );
    assert_eq!(loader.background_color(), "#EE8130");
    assert_eq!(loader.stat_label_width(), "special-attack".len() as u32 * 8 + 24);

    // Follow the species' chained link.
    let species = client
        .parse_species(execute(&client.build_get_species(&"charmander".into())).unwrap())
        .unwrap();
    let chain_url = species.evolution_chain.unwrap().url;
    let chain = client
        .parse_evolution_chain(execute(&client.build_get_resource(&chain_url)).unwrap())
        .unwrap();
    assert_eq!(chain.species_names(), vec!["charmander", "charmeleon", "charizard"]);
}

#[test]
fn details_for_an_unknown_name_stay_not_loaded() {
    let addr = start_server();
    let mut loader = DetailsLoader::from_config(&config(addr));

    for pending in loader.open("agumon") {
        loader.on_response(pending.ticket, execute(&pending.request).unwrap());
    }
    assert_eq!(loader.state(), DetailsState::NotLoaded);
    assert!(loader.details().is_none());
}

#[test]
fn home_refresh_and_search() {
    let addr = start_server();
    let mut home = HomeLoader::from_config(&config(addr));
    let mut rng = StdRng::seed_from_u64(2024);

    let req = home.refresh(&mut rng);
    assert_eq!(
        home.on_response(req.ticket, execute(&req.request).unwrap()),
        HomeEvent::Showing
    );
    let random_id = home.pokemon().unwrap().id;
    assert!((1..=45).contains(&random_id));

    let req = home.search("  PIKACHU ").unwrap();
    assert_eq!(
        home.on_response(req.ticket, execute(&req.request).unwrap()),
        HomeEvent::Showing
    );
    assert_eq!(home.pokemon().unwrap().id, 25);

    let req = home.search("agumon").unwrap();
    assert_eq!(
        home.on_response(req.ticket, execute(&req.request).unwrap()),
        HomeEvent::NotFound
    );
    assert_eq!(home.pokemon().unwrap().name, "pikachu");
}

#[test]
fn fetching_by_id_then_by_name_yields_the_same_record() {
    let addr = start_server();
    let client = PokeApiClient::new(&format!("http://{addr}"));

    for id in 1..=45u32 {
        let by_id = client
            .parse_pokemon(execute(&client.build_get_pokemon(&PokemonRef::Id(id))).unwrap())
            .unwrap();
        let by_name = client
            .parse_pokemon(
                execute(&client.build_get_pokemon(&PokemonRef::Name(by_id.name.clone()))).unwrap(),
            )
            .unwrap();
        assert_eq!(by_id, by_name, "id {id}");
    }
}

#[test]
fn unknown_id_is_a_request_failure() {
    let addr = start_server();
    let client = PokeApiClient::new(&format!("http://{addr}"));

    let err = client
        .parse_pokemon(execute(&client.build_get_pokemon(&PokemonRef::Id(9999))).unwrap())
        .unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed { status: 404, .. }));
}
