//! Semestres académicos ("Spring 2027") y su secuencia.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AdvisingError;

/// Primer año de la lista de semestres de graduación ofrecida por defecto.
pub const DEFAULT_GRADUATION_START_YEAR: i32 = 2026;
pub const DEFAULT_GRADUATION_CHOICES: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl FromStr for Season {
    type Err = AdvisingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Spring" => Ok(Season::Spring),
            "Summer" => Ok(Season::Summer),
            "Fall" => Ok(Season::Fall),
            other => Err(AdvisingError::InvalidTerm(other.to_string())),
        }
    }
}

/// Un semestre concreto. El orden derivado (año, estación) es cronológico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub season: Season,
    pub year: i32,
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.season).cmp(&(other.year, other.season))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Term {
    pub fn new(season: Season, year: i32) -> Self {
        Term { season, year }
    }

    /// Siguiente semestre regular (sin verano): Spring -> Fall -> Spring del año siguiente.
    pub fn next_regular(self) -> Term {
        match self.season {
            Season::Spring => Term::new(Season::Fall, self.year),
            Season::Summer | Season::Fall => Term::new(Season::Spring, self.year + 1),
        }
    }

    /// Siguiente semestre incluyendo verano: Spring -> Summer -> Fall -> Spring.
    pub fn next_any(self) -> Term {
        match self.season {
            Season::Spring => Term::new(Season::Summer, self.year),
            Season::Summer => Term::new(Season::Fall, self.year),
            Season::Fall => Term::new(Season::Spring, self.year + 1),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season.as_str(), self.year)
    }
}

impl FromStr for Term {
    type Err = AdvisingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AdvisingError::InvalidTerm(s.to_string());
        let mut parts = s.split_whitespace();
        let season = parts.next().ok_or_else(invalid)?.parse::<Season>().map_err(|_| invalid())?;
        let year = parts.next().ok_or_else(invalid)?.parse::<i32>().map_err(|_| invalid())?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Term { season, year })
    }
}

/// Primer semestre regular después de `today`: desde septiembre se pasa al
/// Spring del año siguiente, antes de eso al Fall del mismo año.
pub fn next_term_after(today: NaiveDate) -> Term {
    if today.month0() >= 8 {
        Term::new(Season::Spring, today.year() + 1)
    } else {
        Term::new(Season::Fall, today.year())
    }
}

/// Opciones de semestre de graduación: `count` semestres desde Spring `start_year`.
pub fn graduation_terms(start_year: i32, count: usize) -> Vec<Term> {
    std::iter::successors(Some(Term::new(Season::Spring, start_year)), |t| Some(t.next_any()))
        .take(count)
        .collect()
}
