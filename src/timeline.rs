//! Provides the table-driven timeline that maps a clock value to a phase.
//!
//! The timeline holds no per-run state: [`Timeline::step_at`] is a pure
//! function of the clock and the static flow table. One cycle of the flow
//! lasts [`Timeline::total_time`] ticks, and the clock runs over twice that
//! so the two choreographies alternate.
//!
//! # Examples
//! ```
//! use wrapped_cube::config::PhaseDurations;
//! use wrapped_cube::timeline::{PhaseKind, Sequence, Timeline};
//!
//! let timeline = Timeline::standard(PhaseDurations::default()).unwrap();
//! assert_eq!(timeline.total_time(), 600);
//!
//! let step = timeline.step_at(126);
//! assert_eq!((step.kind, step.param, step.tick), (PhaseKind::Flip, 1, 1));
//! assert_eq!(timeline.step_at(600).kind, PhaseKind::Init);
//! assert_eq!(timeline.step_at(600).sequence, Sequence::Second);
//! ```

use serde::Serialize;

use crate::config::PhaseDurations;
use crate::error::ConfigError;

/// Number of folds in one choreography; fold params range over `±1..=±FOLD_COUNT`.
pub const FOLD_COUNT: usize = 5;

/// The named phases of the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PhaseKind {
    /// Global reset at the start of each cycle.
    Init,
    Begin,
    /// Moves the whole wrapper towards (+1) or away from (-1) the cube.
    Translate,
    /// Folds tiles about a hinge without moving the assembly.
    Rotate,
    /// Folds tiles about a hinge while the assembly turns to compensate.
    Flip,
    /// Free rotation of the whole assembly.
    Spin,
    End,
    Sleep,
}

impl PhaseKind {
    /// True for phases that leave every pose untouched.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::timeline::PhaseKind;
    ///
    /// assert!(PhaseKind::Sleep.is_idle());
    /// assert!(!PhaseKind::Spin.is_idle());
    /// ```
    pub fn is_idle(self) -> bool {
        matches!(self, PhaseKind::Begin | PhaseKind::End | PhaseKind::Sleep)
    }
}

/// One entry of the flow table.
///
/// `param` is the translate direction (±1) for `Translate`, and the signed
/// fold index for `Flip`/`Rotate` (positive folds, negative unfolds). Other
/// kinds ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlowEntry {
    pub kind: PhaseKind,
    pub param: i32,
}

impl FlowEntry {
    pub const fn new(kind: PhaseKind, param: i32) -> Self {
        Self { kind, param }
    }

    pub const fn plain(kind: PhaseKind) -> Self {
        Self { kind, param: 0 }
    }
}

/// The reference flow: fold up, spin, unfold.
pub const STANDARD_FLOW: [FlowEntry; 15] = [
    FlowEntry::plain(PhaseKind::Begin),
    FlowEntry::new(PhaseKind::Translate, 1),
    FlowEntry::new(PhaseKind::Flip, 1),
    FlowEntry::new(PhaseKind::Flip, 2),
    FlowEntry::new(PhaseKind::Flip, 3),
    FlowEntry::new(PhaseKind::Flip, 4),
    FlowEntry::new(PhaseKind::Flip, 5),
    FlowEntry::plain(PhaseKind::Spin),
    FlowEntry::new(PhaseKind::Flip, -5),
    FlowEntry::new(PhaseKind::Flip, -4),
    FlowEntry::new(PhaseKind::Flip, -3),
    FlowEntry::new(PhaseKind::Flip, -2),
    FlowEntry::new(PhaseKind::Flip, -1),
    FlowEntry::new(PhaseKind::Translate, -1),
    FlowEntry::plain(PhaseKind::End),
];

/// Which half of the doubled period a clock value falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Sequence {
    First,
    Second,
}

impl Sequence {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Sequence::First => 0,
            Sequence::Second => 1,
        }
    }
}

/// The phase active at one clock value, with its local progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub sequence: Sequence,
    pub kind: PhaseKind,
    pub param: i32,
    /// Local tick inside the entry, `1..=duration` (0 for `Init`).
    pub tick: u32,
    pub duration: u32,
    /// Index into the flow table; `None` for `Init`.
    pub entry: Option<usize>,
}

impl Step {
    fn init(sequence: Sequence) -> Self {
        Self {
            sequence,
            kind: PhaseKind::Init,
            param: 0,
            tick: 0,
            duration: 0,
            entry: None,
        }
    }

    /// Normalized progress `tick / duration` in `(0, 1]`; 1 for `Init`.
    pub fn rate(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            self.tick as f32 / self.duration as f32
        }
    }

    /// True on the tick where moves snap to the lattice.
    pub fn is_final(&self) -> bool {
        self.tick == self.duration
    }
}

/// A flow entry together with the clock span it occupies in the first half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
    pub entry: FlowEntry,
    pub first: u64,
    pub last: u64,
}

/// Static flow table plus the durations of each phase kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    durations: PhaseDurations,
    flow: Vec<FlowEntry>,
    total_time: u64,
}

impl Timeline {
    /// Builds a timeline from a flow table.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if the flow is empty, contains `Init`
    /// or a zero-length entry, has a translate param other than ±1 or a fold
    /// index outside `±1..=±FOLD_COUNT`, or does not end with an idle phase
    /// of at least two ticks. The last tick of the last entry coincides with
    /// the wrap back to `Init` and never runs, so that entry must not carry
    /// a move that needs to snap, and must keep at least one tick that does.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::config::PhaseDurations;
    /// use wrapped_cube::timeline::{FlowEntry, PhaseKind, Timeline};
    ///
    /// let flow = vec![FlowEntry::new(PhaseKind::Rotate, 1), FlowEntry::plain(PhaseKind::Sleep)];
    /// let timeline = Timeline::new(PhaseDurations::default(), flow).unwrap();
    /// assert_eq!(timeline.total_time(), 75);
    ///
    /// let bad = vec![FlowEntry::new(PhaseKind::Flip, 6), FlowEntry::plain(PhaseKind::End)];
    /// assert!(Timeline::new(PhaseDurations::default(), bad).is_err());
    /// ```
    pub fn new(durations: PhaseDurations, flow: Vec<FlowEntry>) -> Result<Self, ConfigError> {
        let last = flow
            .last()
            .ok_or_else(|| ConfigError::Invalid("flow is empty".into()))?;
        if !last.kind.is_idle() {
            return Err(ConfigError::Invalid(format!(
                "flow must end with an idle phase, got {:?}",
                last.kind
            )));
        }
        if durations.of(last.kind) < 2 {
            return Err(ConfigError::Invalid(format!(
                "final {:?} phase needs at least 2 ticks",
                last.kind
            )));
        }

        let mut total_time = 0u64;
        for (i, entry) in flow.iter().enumerate() {
            let valid_param = match entry.kind {
                PhaseKind::Init => {
                    return Err(ConfigError::Invalid(format!("entry {i}: Init is implicit")))
                }
                PhaseKind::Translate => entry.param.abs() == 1,
                PhaseKind::Flip | PhaseKind::Rotate => {
                    entry.param != 0 && entry.param.unsigned_abs() as usize <= FOLD_COUNT
                }
                _ => true,
            };
            if !valid_param {
                return Err(ConfigError::Invalid(format!(
                    "entry {i}: invalid param {} for {:?}",
                    entry.param, entry.kind
                )));
            }
            let duration = durations.of(entry.kind);
            if duration == 0 {
                return Err(ConfigError::Invalid(format!(
                    "entry {i}: {:?} has zero duration",
                    entry.kind
                )));
            }
            total_time += u64::from(duration);
        }

        Ok(Self {
            durations,
            flow,
            total_time,
        })
    }

    /// Builds the timeline of [`STANDARD_FLOW`].
    ///
    /// # Errors
    /// As [`Timeline::new`], which only fails here for zero durations.
    pub fn standard(durations: PhaseDurations) -> Result<Self, ConfigError> {
        Self::new(durations, STANDARD_FLOW.to_vec())
    }

    pub fn flow(&self) -> &[FlowEntry] {
        &self.flow
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// Ticks in one choreography cycle (sum of entry durations).
    pub fn total_time(&self) -> u64 {
        self.total_time
    }

    /// Length of the full clock loop: both choreographies.
    pub fn period(&self) -> u64 {
        2 * self.total_time
    }

    /// Returns the step active at `clock`.
    ///
    /// Total over every clock value: the clock is first reduced modulo
    /// [`Timeline::period`]. Local clock 0 of each half is `Init`; any other
    /// value falls in exactly one flow entry, with `tick` counted from 1.
    pub fn step_at(&self, clock: u64) -> Step {
        let clock = clock % self.period();
        let sequence = if clock < self.total_time {
            Sequence::First
        } else {
            Sequence::Second
        };

        let mut local = clock % self.total_time;
        if local == 0 {
            return Step::init(sequence);
        }

        for (i, entry) in self.flow.iter().enumerate() {
            let duration = self.durations.of(entry.kind);
            if local <= u64::from(duration) {
                return Step {
                    sequence,
                    kind: entry.kind,
                    param: entry.param,
                    tick: local as u32,
                    duration,
                    entry: Some(i),
                };
            }
            local -= u64::from(duration);
        }
        unreachable!("local clock is always below total_time")
    }

    /// Clock span of every flow entry within the first half.
    ///
    /// The last entry stops one tick short of its duration: its final tick
    /// is local clock `total_time`, which is the `Init` of the next half.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::config::PhaseDurations;
    /// use wrapped_cube::timeline::Timeline;
    ///
    /// let timeline = Timeline::standard(PhaseDurations::default()).unwrap();
    /// let spans = timeline.spans();
    /// assert_eq!((spans[0].first, spans[0].last), (1, 100));
    /// assert_eq!(spans.last().unwrap().last, 599);
    /// ```
    pub fn spans(&self) -> Vec<Span> {
        let mut first = 1;
        let mut spans: Vec<Span> = self
            .flow
            .iter()
            .map(|&entry| {
                let last = first + u64::from(self.durations.of(entry.kind)) - 1;
                let span = Span { entry, first, last };
                first = last + 1;
                span
            })
            .collect();
        if let Some(span) = spans.last_mut() {
            span.last = self.total_time - 1;
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Timeline {
        Timeline::standard(PhaseDurations::default()).unwrap()
    }

    #[test]
    fn test_clock_zero_is_init() {
        let step = standard().step_at(0);
        assert_eq!(step.kind, PhaseKind::Init);
        assert_eq!(step.sequence, Sequence::First);
        assert_eq!(step.entry, None);
        assert_eq!(step.rate(), 1.0);
    }

    #[test]
    fn test_entry_boundaries() {
        let timeline = standard();
        let begin_last = timeline.step_at(100);
        assert_eq!((begin_last.kind, begin_last.tick), (PhaseKind::Begin, 100));
        assert!(begin_last.is_final());

        let translate = timeline.step_at(101);
        assert_eq!((translate.kind, translate.param, translate.tick), (PhaseKind::Translate, 1, 1));

        let spin = timeline.step_at(251);
        assert_eq!((spin.kind, spin.tick, spin.entry), (PhaseKind::Spin, 1, Some(7)));

        let unfold = timeline.step_at(375);
        assert_eq!((unfold.kind, unfold.param, unfold.tick), (PhaseKind::Flip, -5, 25));
    }

    #[test]
    fn test_second_half_mirrors_first() {
        let timeline = standard();
        for clock in 1..timeline.total_time() {
            let a = timeline.step_at(clock);
            let b = timeline.step_at(clock + timeline.total_time());
            assert_eq!(a.sequence, Sequence::First);
            assert_eq!(b.sequence, Sequence::Second);
            assert_eq!((a.kind, a.param, a.tick), (b.kind, b.param, b.tick));
        }
    }

    #[test]
    fn test_wraps_at_period() {
        let timeline = standard();
        assert_eq!(timeline.step_at(timeline.period()), timeline.step_at(0));
        assert_eq!(timeline.step_at(timeline.period() + 127), timeline.step_at(127));
    }

    #[test]
    fn test_rejects_flow_ending_in_move() {
        let flow = vec![FlowEntry::plain(PhaseKind::Begin), FlowEntry::new(PhaseKind::Flip, 1)];
        assert!(Timeline::new(PhaseDurations::default(), flow).is_err());
    }

    #[test]
    fn test_rejects_single_tick_final_phase() {
        let durations = PhaseDurations {
            end: 1,
            ..PhaseDurations::default()
        };
        assert!(Timeline::standard(durations).is_err());

        let durations = PhaseDurations {
            end: 2,
            ..PhaseDurations::default()
        };
        let timeline = Timeline::standard(durations).unwrap();
        let end = timeline.step_at(timeline.total_time() - 1);
        assert_eq!((end.kind, end.tick), (PhaseKind::End, 1));
    }

    #[test]
    fn test_rejects_bad_params() {
        for entry in [
            FlowEntry::new(PhaseKind::Translate, 2),
            FlowEntry::new(PhaseKind::Rotate, 0),
            FlowEntry::new(PhaseKind::Flip, -6),
            FlowEntry::plain(PhaseKind::Init),
        ] {
            let flow = vec![entry, FlowEntry::plain(PhaseKind::End)];
            assert!(Timeline::new(PhaseDurations::default(), flow).is_err(), "{entry:?}");
        }
        assert!(Timeline::new(PhaseDurations::default(), Vec::new()).is_err());
    }
}
