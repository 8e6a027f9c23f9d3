use crate::models::plant::ParsedPlantRecord;
use regex::Regex;
use std::sync::LazyLock;

/// Leading integer of a score value: optional sign, then ASCII digits.
/// Anything after the digits ("85 out of 100") is ignored.
static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("valid score regex"));

/// Labeled fields the model is asked to emit, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    ScientificName,
    Description,
    Quality,
    Rarity,
    Watering,
    Light,
    Temperature,
    Soil,
}

const FIELD_PREFIXES: [(&str, Field); 9] = [
    ("name:", Field::Name),
    ("scientific name:", Field::ScientificName),
    ("description:", Field::Description),
    ("quality:", Field::Quality),
    ("rarity:", Field::Rarity),
    ("watering:", Field::Watering),
    ("light:", Field::Light),
    ("temperature:", Field::Temperature),
    ("soil:", Field::Soil),
];

/// Parse the model's free-text reply into a plant record.
///
/// Expected format, one field per line in any order:
/// "Name: ...", "Scientific name: ...", "Description: ...", "Quality: 85%",
/// "Rarity: 10%", "Watering: ...", "Light: ...", "Temperature: ...", "Soil: ..."
///
/// Never fails: missing or malformed fields keep their defaults.
/// A repeated field overwrites the earlier value. The first unlabeled
/// non-empty line becomes the description if none is set yet; later
/// unlabeled lines are dropped.
pub fn parse_plant_info(text: &str) -> ParsedPlantRecord {
    let text = strip_emphasis(text);
    let mut record = ParsedPlantRecord::default();

    for line in text.split('\n') {
        // Byte order marks count as whitespace here
        let line = line.trim_matches(is_space);

        match match_field(line) {
            Some((field, value)) => assign_field(&mut record, field, value),
            None if record.description.is_empty() && !line.is_empty() => {
                record.description.push_str(line);
            }
            None => {}
        }
    }

    record.name = capitalize_first(&record.name);
    record.scientific_name = capitalize_first(&record.scientific_name);
    record.description = capitalize_first(&record.description);

    record
}

/// Unicode whitespace plus U+FEFF, which models sometimes emit at the start of a reply
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Remove markdown emphasis (`*`, `**`) the model likes to add around labels
fn strip_emphasis(text: &str) -> String {
    text.replace('*', "")
}

/// Match a trimmed line against the known prefixes (ASCII case-insensitive).
/// Returns the field and the value with leading whitespace removed.
fn match_field(line: &str) -> Option<(Field, &str)> {
    FIELD_PREFIXES.iter().find_map(|(prefix, field)| {
        let head = line.get(..prefix.len())?;
        if head.eq_ignore_ascii_case(prefix) {
            Some((*field, line[prefix.len()..].trim_start_matches(is_space)))
        } else {
            None
        }
    })
}

fn assign_field(record: &mut ParsedPlantRecord, field: Field, value: &str) {
    match field {
        Field::Name => record.name = value.to_string(),
        Field::ScientificName => record.scientific_name = value.to_string(),
        Field::Description => record.description = value.to_string(),
        Field::Quality => record.quality_score = parse_score(value),
        Field::Rarity => record.rarity_score = parse_score(value),
        Field::Watering => record.care.watering = value.to_string(),
        Field::Light => record.care.light = value.to_string(),
        Field::Temperature => record.care.temperature = value.to_string(),
        Field::Soil => record.care.soil = value.to_string(),
    }
}

/// Parse a percentage value such as "85%" or "85 out of 100".
///
/// The first `%` is removed, then the leading integer is read.
/// No digits or an out-of-range number gives 0.
pub fn parse_score(value: &str) -> i32 {
    let cleaned = value.replacen('%', "", 1);
    LEADING_INT
        .find(cleaned.trim_start_matches(is_space))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .unwrap_or(0)
}

/// Upper-case only the first character
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
