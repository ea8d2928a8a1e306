use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::provider::datetime::same_month;
use crate::provider::{Event, EventSource};

pub struct Agenda<'a> {
    events: &'a [Event],
    by_day: BTreeMap<NaiveDate, Vec<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummary<'a> {
    pub first: &'a Event,
    pub more: usize,
}

impl<'a> Agenda<'a> {
    pub fn new<S: EventSource + ?Sized>(source: &'a S) -> Self {
        let events = source.events();
        let mut by_day: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();

        for (idx, event) in events.iter().enumerate() {
            by_day.entry(event.date).or_default().push(idx);
        }

        log::debug!(
            "Indexed {} events over {} days",
            events.len(),
            by_day.len()
        );

        Agenda { events, by_day }
    }

    pub fn events_of_day(&self, date: &NaiveDate) -> impl Iterator<Item = &'a Event> + '_ {
        let events = self.events;
        self.by_day
            .get(date)
            .into_iter()
            .flatten()
            .map(move |&idx| &events[idx])
    }

    pub fn events_of_month(&self, month: &NaiveDate) -> impl Iterator<Item = &'a Event> + '_ {
        let month = *month;
        self.events
            .iter()
            .filter(move |event| same_month(&event.date, &month))
    }

    pub fn day_summary(&self, date: &NaiveDate) -> Option<DaySummary<'a>> {
        let mut events = self.events_of_day(date);
        let first = events.next()?;

        Some(DaySummary {
            first,
            more: events.count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::EventList;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> EventList {
        EventList::new(vec![
            Event::new("linear", ymd(2026, 2, 2), "linear.svg"),
            Event::new("airbnb", ymd(2026, 2, 7), "airbnb.svg"),
            Event::new("newyear", ymd(2026, 1, 1), "party.svg"),
            Event::new("make", ymd(2026, 2, 7), "make.jpg"),
        ])
    }

    #[test]
    fn day_lookup_keeps_collection_order() {
        let list = fixture();
        let agenda = Agenda::new(&list);

        let ids: Vec<_> = agenda
            .events_of_day(&ymd(2026, 2, 7))
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["airbnb", "make"]);

        assert_eq!(agenda.events_of_day(&ymd(2026, 2, 3)).count(), 0);
    }

    #[test]
    fn day_lookup_matches_linear_filter() {
        let list = EventList::showcase();
        let agenda = Agenda::new(&list);

        for day in ymd(2026, 1, 20).iter_days().take(50) {
            let indexed: Vec<_> = agenda.events_of_day(&day).collect();
            let filtered: Vec<_> = list.events().iter().filter(|e| e.date == day).collect();
            assert_eq!(indexed, filtered);
        }
    }

    #[test]
    fn month_lookup() {
        let list = fixture();
        let agenda = Agenda::new(&list);

        assert_eq!(agenda.events_of_month(&ymd(2026, 2, 20)).count(), 3);
        assert_eq!(agenda.events_of_month(&ymd(2026, 1, 1)).count(), 1);
        assert_eq!(agenda.events_of_month(&ymd(2025, 2, 1)).count(), 0);
    }

    #[test]
    fn summaries() {
        let list = fixture();
        let agenda = Agenda::new(&list);

        let summary = agenda.day_summary(&ymd(2026, 2, 7)).unwrap();
        assert_eq!(summary.first.id, "airbnb");
        assert_eq!(summary.more, 1);

        let single = agenda.day_summary(&ymd(2026, 2, 2)).unwrap();
        assert_eq!(single.more, 0);

        assert!(agenda.day_summary(&ymd(2026, 2, 3)).is_none());
    }
}
