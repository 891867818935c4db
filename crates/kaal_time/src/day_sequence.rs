//! Lazy, restartable sequences of civil days.
//!
//! A [`DaySequence`] yields `(index, date, 0h UT)` triples without holding
//! any mutable loop date. It can be cloned and restarted, and it supports
//! random access so that a parallel consumer can fan out over `0..len()`.

use chrono::{Days, NaiveDate};

use crate::error::TimeError;
use crate::julian::JulianDay;

/// One step of a [`DaySequence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStep {
    /// 0-based position within the sequence.
    pub index: usize,
    /// Civil date.
    pub date: NaiveDate,
    /// 0h UT on `date`.
    pub midnight: JulianDay,
}

/// Inclusive range of civil days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySequence {
    first: NaiveDate,
    len: usize,
    pos: usize,
}

impl DaySequence {
    /// Every day from `first` to `last`, inclusive.
    pub fn between(first: NaiveDate, last: NaiveDate) -> Result<Self, TimeError> {
        if last < first {
            return Err(TimeError::EmptyRange);
        }
        let len = (last - first).num_days() as usize + 1;
        Ok(Self { first, len, pos: 0 })
    }

    /// January 1 through December 31 of `year`.
    pub fn for_year(year: i32) -> Result<Self, TimeError> {
        let first = ymd(year, 1, 1)?;
        let last = ymd(year, 12, 31)?;
        Self::between(first, last)
    }

    /// Every day of one Gregorian month.
    pub fn for_month(year: i32, month: u32) -> Result<Self, TimeError> {
        let first = ymd(year, month, 1)?;
        let next = if month == 12 {
            ymd(year + 1, 1, 1)?
        } else {
            ymd(year, month + 1, 1)?
        };
        let last = next.pred_opt().ok_or(TimeError::EmptyRange)?;
        Self::between(first, last)
    }

    /// Total number of days, independent of iteration progress.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence has no days.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First civil day.
    pub fn first_date(&self) -> NaiveDate {
        self.first
    }

    /// The `index`-th day, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<DayStep> {
        if index >= self.len {
            return None;
        }
        let date = self.first.checked_add_days(Days::new(index as u64))?;
        Some(DayStep {
            index,
            date,
            midnight: JulianDay::from_date(date),
        })
    }

    /// A fresh copy positioned at the first day.
    pub fn restart(&self) -> Self {
        Self {
            first: self.first,
            len: self.len,
            pos: 0,
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, TimeError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TimeError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

impl Iterator for DaySequence {
    type Item = DayStep;

    fn next(&mut self) -> Option<DayStep> {
        let step = self.get(self.pos)?;
        self.pos += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DaySequence {}
