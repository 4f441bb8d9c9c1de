//! Color categories for event type badges and borough markers.
//!
//! Front ends map a `Tone` to whatever their output supports.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Purple,
    Pink,
    Rose,
    Amber,
    Orange,
    Indigo,
    Emerald,
    Cyan,
    Yellow,
    Slate,
}

const EVENT_TYPE_TONES: &[(&str, Tone)] = &[
    ("Music", Tone::Purple),
    ("Art", Tone::Pink),
    ("Dance", Tone::Rose),
    ("Film", Tone::Amber),
    ("Theater", Tone::Indigo),
    ("Sports", Tone::Emerald),
    ("Community", Tone::Cyan),
    ("Kids", Tone::Yellow),
];

const BOROUGH_TONES: &[(&str, Tone)] = &[
    ("Manhattan", Tone::Purple),
    ("Brooklyn", Tone::Orange),
    ("Queens", Tone::Emerald),
    ("Bronx", Tone::Yellow),
    ("Staten Island", Tone::Cyan),
];

/// Badge tone for an event type: the first known category contained in it.
pub fn event_type_tone(event_type: &str) -> Tone {
    tone_for(event_type, EVENT_TYPE_TONES)
}

pub fn borough_tone(borough: &str) -> Tone {
    tone_for(borough, BOROUGH_TONES)
}

fn tone_for(value: &str, table: &[(&str, Tone)]) -> Tone {
    let value = value.to_lowercase();
    if value.is_empty() {
        return Tone::Slate;
    }

    table
        .iter()
        .find(|(key, _)| value.contains(&key.to_lowercase()))
        .map(|(_, tone)| *tone)
        .unwrap_or(Tone::Slate)
}
