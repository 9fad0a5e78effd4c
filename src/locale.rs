/*!
A locale is a single location where predators and prey interact. It owns its
predator collection and prey count and tracks their statistics over time; the
actual population changes are computed by the [`Generation`] engine and the
migration pass and written back here.

[`Generation`]: crate::generation::Generation
 */

use rand::seq::SliceRandom;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::{Generations, Predator};

/// One row of a locale's demographic history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub generation: Generations,
    pub prey: u32,
    pub predators: usize,
    pub max_kill_rate: f64,
    pub avg_kill_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Locale {
    predators: Vec<Predator>,
    prey: u32,
    generation: Generations,
    /// Append-only; one entry per completed generation, starting with the
    /// state at construction as generation 0.
    history: Vec<LogEntry>,
}

impl Locale {
    /// A new locale, with every starting predator sharing one kill rate.
    /// The initial state is logged as generation 0.
    pub fn new(pred_pop: u32, prey_pop: u32, kill_rate: f64) -> Locale {
        let mut locale = Locale {
            predators: (0..pred_pop).map(|_| Predator::new(kill_rate)).collect(),
            prey: prey_pop,
            generation: 0,
            history: vec![],
        };
        locale.record_snapshot();
        locale
    }

    pub fn predators(&self) -> &[Predator] {
        &self.predators
    }

    pub fn predators_mut(&mut self) -> &mut [Predator] {
        &mut self.predators
    }

    pub fn num_predators(&self) -> usize {
        self.predators.len()
    }

    pub fn add_predator(&mut self, predator: Predator) {
        self.predators.push(predator);
    }

    /// Removes and returns the predator at `index`. An index past the end is
    /// a caller bug and panics.
    pub fn remove_predator(&mut self, index: usize) -> Predator {
        self.predators.remove(index)
    }

    /// Drops every predator past `cutoff`. Used by the culling step, which
    /// shuffles first so that the removed subset is uniformly random.
    pub fn truncate_predators(&mut self, cutoff: usize) {
        self.predators.truncate(cutoff);
    }

    /// Uniform in-place permutation of the predator collection, so that
    /// breeding pairs and culling survivorship are unbiased by insertion
    /// order.
    pub fn shuffle_predators<R: Rng>(&mut self, rng: &mut R) {
        self.predators.shuffle(rng);
    }

    /// Gives each predator one emigration trial against `migration_rate` and
    /// removes the successful ones, in a scan whose upper bound shrinks with
    /// each removal. The index only advances when a predator stays, so every
    /// predator present at the start gets exactly one trial.
    pub fn draw_emigrants<R: Rng>(&mut self, migration_rate: f64, rng: &mut R) -> Vec<Predator> {
        let mut emigrants = vec![];
        let mut index = 0;
        let mut bound = self.predators.len();
        while index < bound {
            if rng.gen::<f64>() < migration_rate {
                emigrants.push(self.predators.remove(index));
                bound -= 1;
            } else {
                index += 1;
            }
        }
        emigrants
    }

    pub fn prey(&self) -> u32 {
        self.prey
    }

    pub fn set_prey(&mut self, prey_pop: u32) {
        self.prey = prey_pop;
    }

    /// Subtracts `deaths` from the prey count. A population driven below
    /// zero is clamped to zero and reported as an out-of-food anomaly via
    /// the return value; the caller decides how loudly to complain.
    pub fn reduce_prey(&mut self, deaths: u32) -> bool {
        if deaths > self.prey {
            self.prey = 0;
            true
        } else {
            self.prey -= deaths;
            false
        }
    }

    /// Arithmetic mean kill rate; 0 for an extinct predator population.
    pub fn avg_kill_rate(&self) -> f64 {
        if self.predators.is_empty() {
            return 0.;
        }
        self.predators.iter().map(|p| p.kill_rate).sum::<f64>() / self.predators.len() as f64
    }

    /// Highest kill rate present; 0 for an extinct predator population.
    pub fn max_kill_rate(&self) -> f64 {
        self.predators.iter().map(|p| p.kill_rate).fold(0., f64::max)
    }

    /// Appends the current populations to the history and advances the
    /// generation counter. Must be the final action of a generation cycle.
    pub fn record_snapshot(&mut self) {
        self.history.push(LogEntry {
            generation: self.generation,
            prey: self.prey,
            predators: self.predators.len(),
            max_kill_rate: self.max_kill_rate(),
            avg_kill_rate: self.avg_kill_rate(),
        });
        self.generation += 1;
    }

    pub fn history(&self) -> &[LogEntry] {
        &self.history
    }
}
