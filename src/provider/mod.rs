use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub mod datetime;
pub mod error;

pub use error::{Error, ErrorKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub id: String,
    pub date: NaiveDate,
    pub icon: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl Event {
    pub fn new(id: &str, date: NaiveDate, icon: &str) -> Self {
        Event {
            id: id.to_owned(),
            date,
            icon: icon.to_owned(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_owned());
        self
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let color = self.color.as_deref()?;
        match parse_hex_color(color) {
            Ok(rgb) => Some(rgb),
            Err(e) => {
                log::debug!("Event '{}': {}", self.id, e);
                None
            }
        }
    }
}

pub fn parse_hex_color(s: &str) -> Result<(u8, u8, u8)> {
    let invalid = || Error::new(ErrorKind::ColorParse, &format!("'{}' is not a hex color", s));

    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok((
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let (r, g, b) = (
                channel(&hex[0..1])?,
                channel(&hex[1..2])?,
                channel(&hex[2..3])?,
            );
            Ok((r * 17, g * 17, b * 17))
        }
        _ => Err(invalid()),
    }
}

pub trait EventSource {
    fn events(&self) -> &[Event];
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventList {
    #[serde(default)]
    events: Vec<Event>,
}

impl EventList {
    pub fn new(events: Vec<Event>) -> Self {
        EventList { events }
    }

    pub fn showcase() -> Self {
        EventList::new(SHOWCASE.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for EventList {
    fn events(&self) -> &[Event] {
        &self.events
    }
}

impl From<Vec<Event>> for EventList {
    fn from(events: Vec<Event>) -> Self {
        EventList::new(events)
    }
}

pub fn parse_events(content: &str) -> Result<EventList> {
    toml::from_str::<EventList>(content)
        .map_err(|e| Error::new(ErrorKind::EventParse, &e.to_string()))
}

pub fn load_events_file(path: &Path) -> Result<EventList> {
    let content = fs::read_to_string(path)?;
    let list = parse_events(&content).map_err(|e| {
        let msg = format!("{}: {}", path.display(), e.message.as_deref().unwrap_or(""));
        e.with_msg(&msg)
    })?;

    log::debug!("Loaded {} events from {}", list.len(), path.display());
    Ok(list)
}

fn showcase_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, day).unwrap_or(NaiveDate::MIN)
}

static SHOWCASE: Lazy<Vec<Event>> = Lazy::new(|| {
    [
        (2, "linear", "https://upload.wikimedia.org/wikipedia/commons/9/97/Linear_logo.svg", "#5E6AD2"),
        (7, "airbnb", "https://upload.wikimedia.org/wikipedia/commons/6/69/Airbnb_Logo_B%C3%A9lo.svg", "#FF5A5F"),
        (7, "make", "https://assets-global.website-files.com/6410ebf8e483b5bb2c86eb27/6410ebf8e483b5758186fbd8_ABM%20College%20Web%20developer%20main.jpg", "#6d0ccc"),
        (11, "supabase", "https://upload.wikimedia.org/wikipedia/commons/4/45/Supabase_Logo.png", "#3ECF8E"),
        (12, "jetbrains", "https://upload.wikimedia.org/wikipedia/commons/1/1a/JetBrains_Logo_2016.svg", "#FE3366"),
        (12, "discord", "https://assets-global.website-files.com/6257adef93867e56f84d3092/636e0a6a49cf127bf92de1e2_icon_clyde_blurple_RGB.png", "#5865F2"),
        (15, "spotify", "https://upload.wikimedia.org/wikipedia/commons/1/19/Spotify_logo_without_text.svg", "#1DB954"),
        (15, "webflow", "https://upload.wikimedia.org/wikipedia/commons/e/e4/Webflow_logo.svg", "#4353FF"),
        (24, "linkedin", "https://upload.wikimedia.org/wikipedia/commons/c/ca/LinkedIn_logo_initials.png", "#0077B5"),
        (27, "netflix", "https://upload.wikimedia.org/wikipedia/commons/0/08/Netflix_2015_logo.svg", "#E50914"),
    ]
    .iter()
    .map(|&(day, id, icon, color)| Event::new(id, showcase_date(day), icon).with_color(color))
    .collect()
});
