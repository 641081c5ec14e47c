//! Document numbering: monthly counter or explicit start.

mod counter;
mod store;

pub use counter::CounterState;
pub use store::{CounterStore, JsonFileStore, MemoryStore};

use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

use crate::error::{CounterError, SequenceError};
use crate::models::record::{DocumentRecord, WorkOrderFields};

/// Format of `GENERATED_DATE`.
pub const GENERATED_DATE_FORMAT: &str = "%d.%m.%Y";

/// Source of the current date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Render a date as `DD.MM.YYYY`.
pub fn format_generated_date(date: NaiveDate) -> String {
    date.format(GENERATED_DATE_FORMAT).to_string()
}

/// How document identifiers are assigned for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingMode {
    /// `{month}{sequence:03}` from the persisted monthly counter.
    Monthly,
    /// `start + i`, or empty identifiers when no start is given.
    Explicit { start: Option<i64> },
}

impl NumberingMode {
    /// Explicit mode from a caller-supplied starting value.
    ///
    /// Blank input means "no start"; anything else must be an integer.
    pub fn explicit(start: Option<&str>) -> Result<Self, SequenceError> {
        let start = match start.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_start(raw)?),
        };
        Ok(Self::Explicit { start })
    }
}

/// Parse a starting document number.
pub fn parse_start(raw: &str) -> Result<i64, SequenceError> {
    raw.trim()
        .parse()
        .map_err(|_| SequenceError::InvalidStart(raw.to_string()))
}

/// Monthly identifier: month number followed by a zero-padded sequence.
pub fn monthly_id(month: u32, sequence: u32) -> String {
    format!("{}{:03}", month, sequence)
}

/// Hands out identifiers one record at a time.
#[derive(Debug, Clone)]
pub struct Sequencer {
    kind: SequencerKind,
}

#[derive(Debug, Clone)]
enum SequencerKind {
    Monthly {
        month: u32,
        next: u32,
        state: CounterState,
    },
    Explicit {
        next: Option<i64>,
    },
}

impl Sequencer {
    /// Sequencer continuing `state` for `month`.
    pub fn monthly(state: CounterState, month: u32) -> Self {
        let state = CounterState::load_or_default(Some(state), month);
        let next = state.next(month);
        debug!("Monthly numbering for month {} starts at {}", month, next);

        Self {
            kind: SequencerKind::Monthly { month, next, state },
        }
    }

    /// Sequencer counting up from `start`, or issuing empty identifiers.
    pub fn explicit(start: Option<i64>) -> Self {
        Self {
            kind: SequencerKind::Explicit { next: start },
        }
    }

    /// Build the sequencer for `mode`, reading the store only in monthly mode.
    pub fn for_mode(
        mode: NumberingMode,
        store: &dyn CounterStore,
        month: u32,
    ) -> Result<Self, CounterError> {
        match mode {
            NumberingMode::Monthly => {
                let state = CounterState::load_or_default(store.load()?, month);
                Ok(Self::monthly(state, month))
            }
            NumberingMode::Explicit { start } => Ok(Self::explicit(start)),
        }
    }

    /// Identifier for the next record.
    pub fn next_id(&mut self) -> String {
        match &mut self.kind {
            SequencerKind::Monthly { month, next, .. } => {
                let id = monthly_id(*month, *next);
                *next = next.saturating_add(1);
                id
            }
            SequencerKind::Explicit { next: Some(next) } => {
                let id = next.to_string();
                *next = next.saturating_add(1);
                id
            }
            SequencerKind::Explicit { next: None } => String::new(),
        }
    }

    /// Counter state to persist, advanced for this batch's month only.
    ///
    /// `None` in explicit mode, which never touches the store.
    pub fn finish(self) -> Option<CounterState> {
        match self.kind {
            SequencerKind::Monthly {
                month,
                next,
                mut state,
            } => {
                state.set(month, next);
                Some(state)
            }
            SequencerKind::Explicit { .. } => None,
        }
    }
}

/// Number a batch of extracted fields in input order.
///
/// Each record is stamped with the clock's date as it is numbered.
pub fn assign_ids(
    fields: Vec<WorkOrderFields>,
    mut sequencer: Sequencer,
    clock: &dyn Clock,
) -> (Vec<DocumentRecord>, Option<CounterState>) {
    let records = fields
        .into_iter()
        .map(|f| {
            let doc_id = sequencer.next_id();
            DocumentRecord::new(f, doc_id, format_generated_date(clock.today()))
        })
        .collect();

    (records, sequencer.finish())
}

/// Current calendar month (1-12) according to `clock`.
pub fn current_month(clock: &dyn Clock) -> u32 {
    clock.today().month()
}
