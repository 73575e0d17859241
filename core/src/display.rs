//! Pure display computations shared by the screens.

/// Background used when a category has no entry in the table.
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Horizontal space one label character takes, in points.
pub const CHAR_WIDTH: u32 = 8;

/// Fixed padding added around every label, in points.
pub const LABEL_PADDING: u32 = 24;

/// Highest possible base stat.
pub const MAX_STAT: u8 = 255;

const TYPE_COLORS: [(&str, &str); 18] = [
    ("normal", "#A8A77A"),
    ("fire", "#EE8130"),
    ("water", "#6390F0"),
    ("electric", "#F7D02C"),
    ("grass", "#7AC74C"),
    ("ice", "#96D9D6"),
    ("fighting", "#C22E28"),
    ("poison", "#A33EA1"),
    ("ground", "#E2BF65"),
    ("flying", "#A98FF3"),
    ("psychic", "#F95587"),
    ("bug", "#A6B91A"),
    ("rock", "#B6A136"),
    ("ghost", "#735797"),
    ("dragon", "#6F35FC"),
    ("dark", "#705746"),
    ("steel", "#B7B7CE"),
    ("fairy", "#D685AD"),
];

/// Hex colour for a category, `FALLBACK_COLOR` when unknown.
pub fn type_color(category: &str) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|&&(name, _)| name == category)
        .map_or(FALLBACK_COLOR, |&(_, color)| color)
}

/// Colour of the first category in the list.
pub fn primary_color<S: AsRef<str>>(categories: &[S]) -> &'static str {
    categories
        .first()
        .map_or(FALLBACK_COLOR, |c| type_color(c.as_ref()))
}

/// Character count of the longest text among `items`, zero when empty.
pub fn longest_text_len<T, F>(items: &[T], text: F) -> usize
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .map(|item| text(item).chars().count())
        .max()
        .unwrap_or(0)
}

/// Width of a label column that fits the longest text among `items`.
pub fn label_width<T, F>(items: &[T], text: F) -> u32
where
    F: Fn(&T) -> &str,
{
    let longest = u32::try_from(longest_text_len(items, text)).unwrap_or(u32::MAX);
    longest.saturating_mul(CHAR_WIDTH).saturating_add(LABEL_PADDING)
}

/// Fill fraction of a stat bar, in `0.0..=1.0`.
pub fn stat_ratio(value: u8) -> f32 {
    f32::from(value) / f32::from(MAX_STAT)
}

/// Card and header form of a name.
pub fn display_name(name: &str) -> String {
    name.to_uppercase()
}

/// Badge form of a category: first letter upper-cased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
