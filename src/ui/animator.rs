use chrono::NaiveDate;
use std::time::Instant;

use crate::transition::{AnimationDriver, CellState, GridTimeline, PulseTimeline};

// Cells fainter than this are not drawn at all
pub const VISIBLE_OPACITY: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAppearance {
    pub state: CellState,
    pub pulse_scale: Option<f32>,
}

impl CellAppearance {
    pub fn is_hidden(&self) -> bool {
        self.state.opacity < VISIBLE_OPACITY
    }

    pub fn is_settled(&self) -> bool {
        self.state.is_resting()
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse_scale.map_or(false, |scale| scale < 1.0)
    }
}

#[derive(Debug, Default)]
pub struct TerminalAnimator {
    grid: Option<(Instant, Vec<NaiveDate>, GridTimeline)>,
    pulse: Option<(Instant, PulseTimeline)>,
}

impl TerminalAnimator {
    pub fn appearance(&self, index: usize, date: &NaiveDate, now: Instant) -> CellAppearance {
        let state = match &self.grid {
            Some((start, cells, timeline)) if cells.get(index) == Some(date) => {
                timeline.state_at(index, now.saturating_duration_since(*start))
            }
            _ => CellState::RESTING,
        };

        let pulse_scale = match &self.pulse {
            Some((start, pulse)) if pulse.date() == *date => {
                Some(pulse.scale_at(now.saturating_duration_since(*start)))
            }
            _ => None,
        };

        CellAppearance { state, pulse_scale }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        let grid = self.grid.as_ref().map_or(false, |(start, _, timeline)| {
            !timeline.is_finished(now.saturating_duration_since(*start))
        });
        let pulse = self.pulse.as_ref().map_or(false, |(start, pulse)| {
            !pulse.is_finished(now.saturating_duration_since(*start))
        });
        grid || pulse
    }

    // Returns whether a timeline was dropped, i.e. cells just came to rest
    pub fn discard_finished(&mut self, now: Instant) -> bool {
        let mut discarded = false;
        if let Some((start, _, timeline)) = &self.grid {
            if timeline.is_finished(now.saturating_duration_since(*start)) {
                self.grid = None;
                discarded = true;
            }
        }
        if let Some((start, pulse)) = &self.pulse {
            if pulse.is_finished(now.saturating_duration_since(*start)) {
                self.pulse = None;
                discarded = true;
            }
        }
        discarded
    }
}

impl AnimationDriver for TerminalAnimator {
    fn kill_cells(&mut self) {
        self.grid = None;
        self.pulse = None;
    }

    fn animate_cells(&mut self, cells: &[NaiveDate], timeline: GridTimeline) {
        self.grid = Some((Instant::now(), cells.to_vec(), timeline));
    }

    fn pulse(&mut self, pulse: PulseTimeline) {
        self.pulse = Some((Instant::now(), pulse));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_grid;
    use crate::selection::Direction;
    use crate::transition::{AnimationSettings, Sequencer};
    use std::time::Duration;

    #[test]
    fn cells_appear_and_settle() {
        let cells = build_grid(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        let mut sequencer = Sequencer::new(AnimationSettings::default());
        let mut animator = TerminalAnimator::default();

        sequencer.play_month(&cells, Direction::Forward, &mut animator);
        let start = Instant::now();

        let last = animator.appearance(41, &cells[41], start);
        assert!(last.is_hidden());

        let later = start + Duration::from_secs(2);
        assert!(!animator.is_animating(later));
        assert!(cells
            .iter()
            .enumerate()
            .all(|(i, date)| animator.appearance(i, date, later).is_settled()));

        assert!(animator.discard_finished(later));
        assert!(!animator.discard_finished(later));
        assert!(animator.appearance(41, &cells[41], start).is_settled());
    }

    #[test]
    fn killing_cancels_pulse_and_grid() {
        let cells = build_grid(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        let mut sequencer = Sequencer::new(AnimationSettings::default());
        let mut animator = TerminalAnimator::default();

        sequencer.play_month(&cells, Direction::Forward, &mut animator);
        sequencer.play_pulse(cells[18], &mut animator);
        assert!(animator.appearance(18, &cells[18], Instant::now()).pulse_scale.is_some());

        animator.kill_cells();
        let now = Instant::now();
        assert!(!animator.is_animating(now));
        let appearance = animator.appearance(18, &cells[18], now);
        assert!(appearance.is_settled());
        assert_eq!(appearance.pulse_scale, None);
    }

    #[test]
    fn stale_cells_render_at_rest() {
        let february = build_grid(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        let march = build_grid(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        let mut sequencer = Sequencer::new(AnimationSettings::default());
        let mut animator = TerminalAnimator::default();

        sequencer.play_month(&february, Direction::Forward, &mut animator);
        let appearance = animator.appearance(41, &march[41], Instant::now());
        assert!(appearance.is_settled());
    }
}
