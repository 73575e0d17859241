//! Built-in dataset served by the mock upstream.
//!
//! Names and types are the real first entries of the national dex; stats are
//! derived from the id so they are stable across runs.

const ENTRIES: [(&str, &[&str]); 45] = [
    ("bulbasaur", &["grass", "poison"]),
    ("ivysaur", &["grass", "poison"]),
    ("venusaur", &["grass", "poison"]),
    ("charmander", &["fire"]),
    ("charmeleon", &["fire"]),
    ("charizard", &["fire", "flying"]),
    ("squirtle", &["water"]),
    ("wartortle", &["water"]),
    ("blastoise", &["water"]),
    ("caterpie", &["bug"]),
    ("metapod", &["bug"]),
    ("butterfree", &["bug", "flying"]),
    ("weedle", &["bug", "poison"]),
    ("kakuna", &["bug", "poison"]),
    ("beedrill", &["bug", "poison"]),
    ("pidgey", &["normal", "flying"]),
    ("pidgeotto", &["normal", "flying"]),
    ("pidgeot", &["normal", "flying"]),
    ("rattata", &["normal"]),
    ("raticate", &["normal"]),
    ("spearow", &["normal", "flying"]),
    ("fearow", &["normal", "flying"]),
    ("ekans", &["poison"]),
    ("arbok", &["poison"]),
    ("pikachu", &["electric"]),
    ("raichu", &["electric"]),
    ("sandshrew", &["ground"]),
    ("sandslash", &["ground"]),
    ("nidoran-f", &["poison"]),
    ("nidorina", &["poison"]),
    ("nidoqueen", &["poison", "ground"]),
    ("nidoran-m", &["poison"]),
    ("nidorino", &["poison"]),
    ("nidoking", &["poison", "ground"]),
    ("clefairy", &["fairy"]),
    ("clefable", &["fairy"]),
    ("vulpix", &["fire"]),
    ("ninetales", &["fire"]),
    ("jigglypuff", &["normal", "fairy"]),
    ("wigglytuff", &["normal", "fairy"]),
    ("zubat", &["poison", "flying"]),
    ("golbat", &["poison", "flying"]),
    ("oddish", &["grass", "poison"]),
    ("gloom", &["grass", "poison"]),
    ("vileplume", &["grass", "poison"]),
];

/// Evolution families as ranges of ids, in chain-id order.
const FAMILIES: [(u32, u32); 18] = [
    (1, 3),
    (4, 6),
    (7, 9),
    (10, 12),
    (13, 15),
    (16, 18),
    (19, 20),
    (21, 22),
    (23, 24),
    (25, 26),
    (27, 28),
    (29, 31),
    (32, 34),
    (35, 36),
    (37, 38),
    (39, 40),
    (41, 42),
    (43, 45),
];

pub const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub id: u32,
    pub name: &'static str,
    pub types: &'static [&'static str],
}

impl Entry {
    /// Base stats in `STAT_NAMES` order, each within 20..=139.
    pub fn base_stats(&self) -> [u8; 6] {
        let mut stats = [0u8; 6];
        for (k, stat) in stats.iter_mut().enumerate() {
            let k = k as u32;
            *stat = ((self.id * (k + 3) * 7 + k * 11) % 120 + 20) as u8;
        }
        stats
    }

    /// Id of the evolution chain this entry belongs to.
    pub fn chain_id(&self) -> u32 {
        FAMILIES
            .iter()
            .position(|&(first, last)| (first..=last).contains(&self.id))
            .map_or(0, |i| i as u32 + 1)
    }
}

/// Number of entries in the dataset.
pub fn len() -> usize {
    ENTRIES.len()
}

pub fn entries() -> impl Iterator<Item = Entry> {
    ENTRIES.iter().enumerate().map(|(i, &(name, types))| Entry {
        id: i as u32 + 1,
        name,
        types,
    })
}

/// Look up by numeric id or exact (lower-case) name, as PokeAPI does.
pub fn find(key: &str) -> Option<Entry> {
    match key.parse::<u32>() {
        Ok(id) => entries().find(|e| e.id == id),
        Err(_) => entries().find(|e| e.name == key),
    }
}

/// Ids of the chain with `chain_id`, base form first.
pub fn family(chain_id: u32) -> Option<(u32, u32)> {
    let index = usize::try_from(chain_id.checked_sub(1)?).ok()?;
    FAMILIES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_based_and_contiguous() {
        let ids: Vec<u32> = entries().map(|e| e.id).collect();
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&(len() as u32)));
    }

    #[test]
    fn find_by_id_and_name_agree() {
        assert_eq!(find("25"), find("pikachu"));
        assert_eq!(find("25").unwrap().name, "pikachu");
        assert!(find("Pikachu").is_none());
        assert!(find("0").is_none());
        assert!(find("-1").is_none());
    }

    #[test]
    fn every_entry_belongs_to_a_family() {
        for entry in entries() {
            let chain = entry.chain_id();
            let (first, last) = family(chain).unwrap();
            assert!((first..=last).contains(&entry.id), "{}", entry.name);
        }
        assert!(family(0).is_none());
        assert!(family(99).is_none());
    }

    #[test]
    fn stats_are_in_a_plausible_range() {
        for entry in entries() {
            for stat in entry.base_stats() {
                assert!((20..140).contains(&stat));
            }
        }
    }
}
