use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use crate::calendar::{GRID_COLUMNS, GRID_ROWS};
use crate::selection::Direction;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub stagger_ms: u64,
    pub duration_ms: u64,
    pub pulse_ms: u64,
    pub offset_y: f32,
    pub from_scale: f32,
    pub from_blur: f32,
    pub pulse_from_scale: f32,
    pub pulse_overshoot: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        AnimationSettings {
            stagger_ms: 20,
            duration_ms: 400,
            pulse_ms: 400,
            offset_y: 10.0,
            from_scale: 0.9,
            from_blur: 2.0,
            pulse_from_scale: 0.9,
            pulse_overshoot: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState {
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
    pub blur: f32,
}

impl CellState {
    pub const RESTING: CellState = CellState {
        y: 0.0,
        opacity: 1.0,
        scale: 1.0,
        blur: 0.0,
    };

    pub fn entering(direction: Direction, settings: &AnimationSettings) -> Self {
        CellState {
            y: direction.sign() as f32 * settings.offset_y,
            opacity: 0.0,
            scale: settings.from_scale,
            blur: settings.from_blur,
        }
    }

    pub fn lerp(&self, to: &CellState, t: f32) -> CellState {
        if t >= 1.0 {
            return *to;
        }
        let mix = |a: f32, b: f32| a + (b - a) * t;
        CellState {
            y: mix(self.y, to.y),
            opacity: mix(self.opacity, to.opacity),
            scale: mix(self.scale, to.scale),
            blur: mix(self.blur, to.blur),
        }
    }

    pub fn is_resting(&self) -> bool {
        *self == CellState::RESTING
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    Power2Out,
    BackOut(f32),
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.max(0.0).min(1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::BackOut(_) if t == 0.0 => 0.0,
            Ease::BackOut(s) => {
                let q = t - 1.0;
                q * q * ((s + 1.0) * q + s) + 1.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub fn new(duration: Duration, ease: Ease) -> Self {
        Tween { duration, ease }
    }

    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed >= self.duration {
            return 1.0;
        }
        let linear = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.ease.apply(linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    each: Duration,
    direction: Direction,
    cells: usize,
}

impl Stagger {
    pub fn new(each: Duration, direction: Direction, cells: usize) -> Self {
        Stagger {
            each,
            direction,
            cells,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rank(&self, index: usize) -> usize {
        let last = self.cells.saturating_sub(1);
        let index = index.min(last);
        // Backward starts from the bottom-right cell
        match self.direction {
            Direction::Forward => index,
            Direction::Backward => last - index,
        }
    }

    pub fn delay(&self, index: usize) -> Duration {
        self.each * self.rank(index) as u32
    }

    pub fn max_delay(&self) -> Duration {
        self.each * self.cells.saturating_sub(1) as u32
    }
}

pub fn sequence(
    rows: usize,
    columns: usize,
    direction: Direction,
    each: Duration,
) -> impl Fn(usize) -> Duration {
    let stagger = Stagger::new(each, direction, rows * columns);
    move |index| stagger.delay(index)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridTimeline {
    generation: u64,
    from: CellState,
    to: CellState,
    tween: Tween,
    stagger: Stagger,
}

impl GridTimeline {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stagger(&self) -> &Stagger {
        &self.stagger
    }

    pub fn from_state(&self) -> CellState {
        self.from
    }

    pub fn state_at(&self, index: usize, elapsed: Duration) -> CellState {
        let delay = self.stagger.delay(index);
        match elapsed.checked_sub(delay) {
            Some(local) => self.from.lerp(&self.to, self.tween.progress(local)),
            None => self.from,
        }
    }

    pub fn total(&self) -> Duration {
        self.stagger.max_delay() + self.tween.duration
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PulseTimeline {
    date: NaiveDate,
    from_scale: f32,
    tween: Tween,
}

impl PulseTimeline {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn scale_at(&self, elapsed: Duration) -> f32 {
        let t = self.tween.progress(elapsed);
        if t >= 1.0 {
            1.0
        } else {
            self.from_scale + (1.0 - self.from_scale) * t
        }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.tween.duration
    }
}

pub trait AnimationDriver {
    fn kill_cells(&mut self);

    fn animate_cells(&mut self, cells: &[NaiveDate], timeline: GridTimeline);

    fn pulse(&mut self, pulse: PulseTimeline);
}

pub struct Sequencer {
    settings: AnimationSettings,
    generation: u64,
}

impl Sequencer {
    pub fn new(settings: AnimationSettings) -> Self {
        Sequencer {
            settings,
            generation: 0,
        }
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stagger(&self, direction: Direction, cells: usize) -> Stagger {
        Stagger::new(
            Duration::from_millis(self.settings.stagger_ms),
            direction,
            cells,
        )
    }

    pub fn timeline(&self, direction: Direction, cells: usize) -> GridTimeline {
        GridTimeline {
            generation: self.generation,
            from: CellState::entering(direction, &self.settings),
            to: CellState::RESTING,
            tween: Tween::new(
                Duration::from_millis(self.settings.duration_ms),
                Ease::Power2Out,
            ),
            stagger: self.stagger(direction, cells),
        }
    }

    pub fn play_month<D: AnimationDriver + ?Sized>(
        &mut self,
        cells: &[NaiveDate],
        direction: Direction,
        driver: &mut D,
    ) -> u64 {
        self.generation += 1;

        if cells.len() != GRID_ROWS * GRID_COLUMNS {
            log::warn!("Animating a grid of {} cells", cells.len());
        }

        driver.kill_cells();
        driver.animate_cells(cells, self.timeline(direction, cells.len()));

        log::debug!("Transition #{} ({})", self.generation, direction);
        self.generation
    }

    pub fn play_pulse<D: AnimationDriver + ?Sized>(&mut self, date: NaiveDate, driver: &mut D) {
        driver.pulse(PulseTimeline {
            date,
            from_scale: self.settings.pulse_from_scale,
            tween: Tween::new(
                Duration::from_millis(self.settings.pulse_ms),
                Ease::BackOut(self.settings.pulse_overshoot),
            ),
        });
    }
}
