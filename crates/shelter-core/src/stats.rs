//! Healthy/infected aggregation over a roster.

use crate::person::Person;

/// Headcounts and floored percentages for one list of people.
///
/// Each percentage is `floor(100 * part / total)` on its own, so the two can
/// sum to 99 (e.g. one infected out of three gives 33 + 66). Both are 0 for
/// an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InfectionStats {
  pub total:            usize,
  pub infected:         usize,
  pub infected_percent: u8,
  pub healthy_percent:  u8,
}

impl InfectionStats {
  pub fn from_people(people: &[Person]) -> Self {
    let total = people.len();
    let infected = people.iter().filter(|p| p.is_infected).count();
    Self {
      total,
      infected,
      infected_percent: floor_percent(infected, total),
      healthy_percent: floor_percent(total - infected, total),
    }
  }

  pub fn healthy(&self) -> usize { self.total - self.infected }
}

fn floor_percent(part: usize, total: usize) -> u8 {
  if total == 0 {
    return 0;
  }
  // part <= total, so the quotient is at most 100.
  u8::try_from(part * 100 / total).unwrap_or(100)
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::person::NewPerson;

  fn roster(total: usize, infected: usize) -> Vec<Person> {
    (0..total)
      .map(|i| {
        let mut input = NewPerson::new(format!("p{i}"), 20, "digging");
        input.is_infected = i < infected;
        input.into_person(Uuid::new_v4(), Utc::now())
      })
      .collect()
  }

  #[test]
  fn empty_roster_is_all_zero() {
    let stats = InfectionStats::from_people(&[]);
    assert_eq!(stats, InfectionStats::default());
  }

  #[test]
  fn percentages_are_floored_independently() {
    let stats = InfectionStats::from_people(&roster(3, 1));
    assert_eq!(stats.infected_percent, 33);
    assert_eq!(stats.healthy_percent, 66);
    assert_eq!(stats.healthy(), 2);
  }

  #[test]
  fn percentages_match_floor_for_every_split() {
    for total in 1..=12 {
      for infected in 0..=total {
        let stats = InfectionStats::from_people(&roster(total, infected));
        let expect_inf = (100 * infected / total) as u8;
        let expect_ok = (100 * (total - infected) / total) as u8;
        assert_eq!(stats.infected_percent, expect_inf, "{infected}/{total}");
        assert_eq!(stats.healthy_percent, expect_ok, "{infected}/{total}");

        let sum = u16::from(stats.infected_percent) + u16::from(stats.healthy_percent);
        assert!(sum == 99 || sum == 100, "{infected}/{total} sums to {sum}");
        if (100 * infected) % total == 0 {
          assert_eq!(sum, 100);
        }
      }
    }
  }

  #[test]
  fn all_infected() {
    let stats = InfectionStats::from_people(&roster(4, 4));
    assert_eq!((stats.infected_percent, stats.healthy_percent), (100, 0));
  }
}
