//! Per-trial counters
//!
//! Counts are kept as a 2×2 table (infection × vaccination) for both the
//! admitted and the rejected side, so every reported series is a sum of
//! cells and the no-restriction transform can move whole cells across.

use super::candidate::Candidate;
use serde::{Deserialize, Serialize};

/// Counts of candidates by infection and vaccination status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub infected_vaccinated: u32,
    pub infected_unvaccinated: u32,
    pub uninfected_vaccinated: u32,
    pub uninfected_unvaccinated: u32,
}

impl Tally {
    /// Count one candidate in its cell
    pub fn record(&mut self, candidate: Candidate) {
        let cell = match (candidate.infected, candidate.vaccinated) {
            (true, true) => &mut self.infected_vaccinated,
            (true, false) => &mut self.infected_unvaccinated,
            (false, true) => &mut self.uninfected_vaccinated,
            (false, false) => &mut self.uninfected_unvaccinated,
        };
        *cell = cell.saturating_add(1);
    }

    pub fn infected(&self) -> u32 {
        self.infected_vaccinated + self.infected_unvaccinated
    }

    pub fn uninfected(&self) -> u32 {
        self.uninfected_vaccinated + self.uninfected_unvaccinated
    }

    pub fn vaccinated(&self) -> u32 {
        self.infected_vaccinated + self.uninfected_vaccinated
    }

    pub fn unvaccinated(&self) -> u32 {
        self.infected_unvaccinated + self.uninfected_unvaccinated
    }

    pub fn total(&self) -> u32 {
        self.infected() + self.uninfected()
    }

    /// Cell-wise sum of two tallies
    pub fn merged(&self, other: &Tally) -> Tally {
        Tally {
            infected_vaccinated: self.infected_vaccinated.saturating_add(other.infected_vaccinated),
            infected_unvaccinated: self
                .infected_unvaccinated
                .saturating_add(other.infected_unvaccinated),
            uninfected_vaccinated: self
                .uninfected_vaccinated
                .saturating_add(other.uninfected_vaccinated),
            uninfected_unvaccinated: self
                .uninfected_unvaccinated
                .saturating_add(other.uninfected_unvaccinated),
        }
    }
}

/// Final counters of one trial (one venue filled to capacity)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// People let in
    pub admitted: Tally,

    /// People turned away after a positive test
    pub rejected: Tally,
}

impl TrialOutcome {
    pub fn admitted_infected(&self) -> u32 {
        self.admitted.infected()
    }

    pub fn admitted_uninfected(&self) -> u32 {
        self.admitted.uninfected()
    }

    /// True positives caught at the door
    pub fn rejected_infected(&self) -> u32 {
        self.rejected.infected()
    }

    /// False positives turned away
    pub fn rejected_uninfected(&self) -> u32 {
        self.rejected.uninfected()
    }

    /// Total number of candidates drawn during the trial
    pub fn candidates_drawn(&self) -> u32 {
        self.admitted.total() + self.rejected.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fills_matching_cell() {
        let mut tally = Tally::default();
        tally.record(Candidate {
            vaccinated: true,
            infected: true,
        });
        tally.record(Candidate {
            vaccinated: false,
            infected: false,
        });
        tally.record(Candidate {
            vaccinated: false,
            infected: false,
        });

        assert_eq!(tally.infected_vaccinated, 1);
        assert_eq!(tally.uninfected_unvaccinated, 2);
        assert_eq!(tally.infected(), 1);
        assert_eq!(tally.unvaccinated(), 2);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_merged_is_cellwise() {
        let a = Tally {
            infected_vaccinated: 1,
            infected_unvaccinated: 2,
            uninfected_vaccinated: 3,
            uninfected_unvaccinated: 4,
        };
        let merged = a.merged(&a);

        assert_eq!(merged.infected_unvaccinated, 4);
        assert_eq!(merged.total(), 2 * a.total());
    }

    #[test]
    fn test_full_cell_saturates() {
        let mut tally = Tally {
            infected_vaccinated: u32::MAX,
            ..Tally::default()
        };
        tally.record(Candidate {
            vaccinated: true,
            infected: true,
        });

        assert_eq!(tally.infected_vaccinated, u32::MAX);
        assert_eq!(tally.merged(&tally).infected_vaccinated, u32::MAX);
    }
}
