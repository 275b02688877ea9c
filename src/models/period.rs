use chrono::Datelike;

use crate::error::ValidationError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// An accounting month. `month` is always in 1..=12; the year is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub(crate) fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub(crate) fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub(crate) fn month(&self) -> u32 {
        self.month
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub(crate) fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub(crate) fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// "MonthName Year", e.g. "September 2025".
    pub(crate) fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// Accepts `YYYY-MM`, `YYYY-M`, `MM/YYYY`, or a bare month number which
    /// resolves against `default_year`. The year may be negative, so
    /// `-005-03` reads back what `Display` writes.
    pub(crate) fn parse(s: &str, default_year: i32) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let invalid = || ValidationError::InvalidPeriod(trimmed.to_string());

        let (month, year) = if let Some((y, m)) = trimmed.rsplit_once('-') {
            (m.parse::<u32>(), y.parse::<i32>())
        } else if let Some((m, y)) = trimmed.split_once('/') {
            (m.parse::<u32>(), y.parse::<i32>())
        } else {
            (trimmed.parse::<u32>(), Ok(default_year))
        };

        match (month, year) {
            (Ok(m), Ok(y)) => Self::new(m, y).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// The month currently on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthCursor {
    period: Period,
}

impl MonthCursor {
    pub(crate) fn new(period: Period) -> Self {
        Self { period }
    }

    pub(crate) fn today() -> Self {
        Self::new(Period::current())
    }

    pub(crate) fn period(&self) -> Period {
        self.period
    }

    pub(crate) fn advance(&mut self) {
        self.period = self.period.next();
    }

    pub(crate) fn retreat(&mut self) {
        self.period = self.period.prev();
    }

    pub(crate) fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.advance(),
            Direction::Backward => self.retreat(),
        }
    }

    pub(crate) fn jump_to(&mut self, period: Period) {
        self.period = period;
    }

    pub(crate) fn display_label(&self) -> String {
        self.period.label()
    }
}
