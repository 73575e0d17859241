//! Wire DTOs for the PokeAPI subset we read, plus the display records the
//! screens hold.
//!
//! # Design
//! The DTOs mirror the upstream JSON but keep only the fields a screen shows;
//! serde ignores everything else. They are defined independently from the
//! mock server's types so the integration tests catch schema drift between
//! the two crates.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Form feed. Game flavor texts use it as a soft line break.
const FLAVOR_TEXT_BREAK: char = '\u{000C}';

/// How a Pokémon is addressed on the `/pokemon` and `/pokemon-species`
/// endpoints.
///
/// `Display` renders the path segment: ids verbatim, names lowercased and
/// percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokemonRef {
    Id(u32),
    Name(String),
}

impl fmt::Display for PokemonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokemonRef::Id(id) => write!(f, "{id}"),
            PokemonRef::Name(name) => write!(f, "{}", urlencoding::encode(&name.to_lowercase())),
        }
    }
}

/// Digits address an id, anything else a name.
impl FromStr for PokemonRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u32>() {
            Ok(id) => PokemonRef::Id(id),
            Err(_) => PokemonRef::Name(s.to_string()),
        })
    }
}

impl From<u32> for PokemonRef {
    fn from(id: u32) -> Self {
        PokemonRef::Id(id)
    }
}

impl From<&str> for PokemonRef {
    fn from(name: &str) -> Self {
        PokemonRef::Name(name.to_string())
    }
}

impl From<String> for PokemonRef {
    fn from(name: String) -> Self {
        PokemonRef::Name(name)
    }
}

/// `{ name, url }` link to another resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// `{ url }` link to an unnamed resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResource {
    pub url: String,
}

/// One `/pokemon/{id|name}` record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatSlot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatSlot {
    pub base_stat: u8,
    #[serde(default)]
    pub effort: u8,
    pub stat: NamedResource,
}

impl Pokemon {
    /// Type names in slot order.
    pub fn categories(&self) -> Vec<String> {
        self.types.iter().map(|t| t.kind.name.clone()).collect()
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.types.first().map(|t| t.kind.name.as_str())
    }
}

/// One page of `/pokemon?limit=&offset=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// One `/pokemon-species/{id|name}` record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
    #[serde(default)]
    pub version: Option<NamedResource>,
}

impl PokemonSpecies {
    /// First flavor text written in `language`, with form feeds turned into
    /// spaces. `None` when no entry matches.
    pub fn flavor_text(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| entry.flavor_text.replace(FLAVOR_TEXT_BREAK, " "))
    }
}

/// One `/evolution-chain/{id}` record, reached through
/// `PokemonSpecies::evolution_chain`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl EvolutionChain {
    /// Species names, base form first, branches depth-first.
    pub fn species_names(&self) -> Vec<String> {
        fn walk(link: &ChainLink, out: &mut Vec<String>) {
            out.push(link.species.name.clone());
            for next in &link.evolves_to {
                walk(next, out);
            }
        }

        let mut names = Vec::new();
        walk(&self.chain, &mut names);
        names
    }
}

// ---------------------------------------------------------------------------
// Display records
// ---------------------------------------------------------------------------

/// A Pokédex list entry. Built once per resolved page slot and never changed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
    pub id: u32,
    pub image_url: Option<String>,
    pub primary_category: String,
}

impl PokemonSummary {
    /// Combine a page entry's `url` with its resolved record.
    ///
    /// A record without any type cannot be coloured and is rejected like any
    /// other malformed payload.
    pub fn from_pokemon(pokemon: Pokemon, url: String) -> Result<Self, ApiError> {
        let primary_category = pokemon
            .primary_category()
            .ok_or_else(|| {
                ApiError::Deserialization(format!("pokemon `{}` has no types", pokemon.name))
            })?
            .to_string();
        Ok(Self {
            name: pokemon.name,
            url,
            id: pokemon.id,
            image_url: pokemon.sprites.front_default,
            primary_category,
        })
    }
}

/// A base stat as shown on the details screen. Values are 0..=255.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub value: u8,
}

/// Everything the details screen renders for one Pokémon.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PokemonDetails {
    pub name: String,
    pub image_url: Option<String>,
    pub categories: Vec<String>,
    pub stats: Vec<Stat>,
    pub description: Option<String>,
}

impl PokemonDetails {
    pub fn new(pokemon: Pokemon, description: Option<String>) -> Self {
        let categories = pokemon.categories();
        let stats = pokemon
            .stats
            .into_iter()
            .map(|s| Stat {
                name: s.stat.name,
                value: s.base_stat,
            })
            .collect();
        Self {
            name: pokemon.name,
            image_url: pokemon.sprites.other.official_artwork.front_default,
            categories,
            stats,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "sprites": {
            "front_default": "https://img/1.png",
            "other": { "official-artwork": { "front_default": "https://art/1.png" } }
        },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "https://api/type/12/" } },
            { "slot": 2, "type": { "name": "poison", "url": "https://api/type/4/" } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "https://api/stat/1/" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "https://api/stat/2/" } }
        ]
    }"#;

    fn bulbasaur() -> Pokemon {
        serde_json::from_str(BULBASAUR).unwrap()
    }

    #[test]
    fn pokemon_ignores_unknown_fields() {
        let p = bulbasaur();
        assert_eq!(p.id, 1);
        assert_eq!(p.categories(), vec!["grass", "poison"]);
        assert_eq!(p.primary_category(), Some("grass"));
    }

    #[test]
    fn pokemon_missing_types_is_rejected() {
        let result: Result<Pokemon, _> =
            serde_json::from_str(r#"{"id":1,"name":"x","sprites":{},"stats":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn sprites_tolerate_null_and_missing_artwork() {
        let p: Pokemon = serde_json::from_str(
            r#"{"id":10,"name":"x","sprites":{"front_default":null},"types":[],"stats":[]}"#,
        )
        .unwrap();
        assert!(p.sprites.front_default.is_none());
        assert!(p.sprites.other.official_artwork.front_default.is_none());
    }

    #[test]
    fn pokemon_ref_lowercases_names() {
        assert_eq!(PokemonRef::from("Pikachu").to_string(), "pikachu");
        assert_eq!(PokemonRef::from(25).to_string(), "25");
    }

    #[test]
    fn pokemon_ref_encodes_names_as_one_path_segment() {
        assert_eq!(PokemonRef::from("Mr Mime").to_string(), "mr%20mime");
        assert_eq!(PokemonRef::from("pikachu?x").to_string(), "pikachu%3Fx");
        assert_eq!(PokemonRef::from("a/b#c").to_string(), "a%2Fb%23c");
        assert_eq!(PokemonRef::from("mr-mime").to_string(), "mr-mime");
    }

    #[test]
    fn pokemon_ref_parses_ids_and_names() {
        assert_eq!("151".parse::<PokemonRef>().unwrap(), PokemonRef::Id(151));
        assert_eq!(
            "mew".parse::<PokemonRef>().unwrap(),
            PokemonRef::Name("mew".to_string())
        );
        assert_eq!(
            "-1".parse::<PokemonRef>().unwrap(),
            PokemonRef::Name("-1".to_string())
        );
    }

    #[test]
    fn summary_takes_the_front_sprite_and_first_type() {
        let summary =
            PokemonSummary::from_pokemon(bulbasaur(), "https://api/pokemon/1/".to_string())
                .unwrap();
        assert_eq!(summary.name, "bulbasaur");
        assert_eq!(summary.id, 1);
        assert_eq!(summary.url, "https://api/pokemon/1/");
        assert_eq!(summary.image_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(summary.primary_category, "grass");
    }

    #[test]
    fn summary_without_types_is_a_failure() {
        let mut p = bulbasaur();
        p.types.clear();
        let err = PokemonSummary::from_pokemon(p, String::new()).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn details_use_official_artwork_and_keep_stat_order() {
        let details = PokemonDetails::new(bulbasaur(), Some("A seed.".to_string()));
        assert_eq!(details.image_url.as_deref(), Some("https://art/1.png"));
        assert_eq!(
            details.stats,
            vec![
                Stat {
                    name: "hp".to_string(),
                    value: 45,
                },
                Stat {
                    name: "attack".to_string(),
                    value: 49,
                },
            ]
        );
        assert_eq!(details.description.as_deref(), Some("A seed."));
    }

    #[test]
    fn flavor_text_picks_first_matching_language_and_strips_form_feeds() {
        let species: PokemonSpecies = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "bulbasaur",
                "flavor_text_entries": [
                    { "flavor_text": "Une graine.", "language": { "name": "fr", "url": "" } },
                    { "flavor_text": "A strange seed\fwas planted.", "language": { "name": "en", "url": "" } },
                    { "flavor_text": "Second english.", "language": { "name": "en", "url": "" } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            species.flavor_text("en").as_deref(),
            Some("A strange seed was planted.")
        );
        assert_eq!(species.flavor_text("de"), None);
        assert!(species.evolution_chain.is_none());
    }

    #[test]
    fn evolution_chain_walks_branches_depth_first() {
        let chain: EvolutionChain = serde_json::from_str(
            r#"{
                "id": 67,
                "chain": {
                    "species": { "name": "eevee", "url": "" },
                    "evolves_to": [
                        { "species": { "name": "vaporeon", "url": "" }, "evolves_to": [] },
                        { "species": { "name": "jolteon", "url": "" } }
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(chain.species_names(), vec!["eevee", "vaporeon", "jolteon"]);
    }
}
