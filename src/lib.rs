/*!
Model Description
=================

This model simulates the coevolution of a predator population with its prey
across a grid of habitat patches ("locales"). Predators carry a single
heritable trait, their kill rate, which determines how large a share of the
local prey population they are likely to take in one generation. Prey are
modelled as a per-locale headcount with exponential, capped regrowth.

# 1. Purpose

Within one locale, each generation predators hunt, the prey population
regrows, predators breed in pairs with genetic crossover and mutation, and a
random fraction of the merged population dies. Across locales, a migration
pass after every generation lets predators and a share of the prey move to a
randomly chosen adjacent locale. The grid wraps around at the edges, so every
locale has exactly four neighbours. The interesting dynamics are emergent:
locales overshoot, starve out and are recolonized from neighbours, while the
kill-rate distribution drifts under the opposing pressures of reproduction
(kills pay off in children) and starvation (efficient hunters exhaust their
own patch).

# 2. Entities and scales

The model runs in discrete time; one time step is one generation,
simultaneously advanced on every locale of the grid. The entities are the
[`Predator`] (one hunting individual), the [`Locale`] (one patch with its
predator and prey populations and its demographic history), the
[`Generation`] engine (a reusable strategy that advances one locale by one
generation), and the [`Metapopulation`] (the toroidal grid of locales and
the migration process between them).

All randomness is drawn from one shared, explicitly seeded random number
source that is threaded through every stochastic call. Two runs with the
same seed and the same parameters produce identical histories.

 */

use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use std::fs::File;

pub mod argparse;
pub mod generation;
pub mod locale;
pub mod metapopulation;
pub mod observation;
pub mod parameters;

#[cfg(test)]
mod tests;

pub use generation::Generation;
pub use locale::{Locale, LogEntry};
pub use metapopulation::Metapopulation;
pub use parameters::Parameters;

/// Time, measured in completed generation cycles since the start of the run.
pub type Generations = u32;

/**
The atomic unit of the predator population. A predator is pure data: its
heritable kill rate, and the number of kills it actually made in the current
generation, which is the basis of its reproductive fitness.

The kill rate is nominally a probability, but mutation may push it outside
[0, 1]. The trait value itself is never clamped; only the hunting probability
derived from it saturates at the boundaries (see [`generation`]).
 */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Predator {
    pub kill_rate: f64,
    pub kills: u32,
}

impl Predator {
    pub fn new(kill_rate: f64) -> Predator {
        Predator {
            kill_rate,
            kills: 0,
        }
    }
}

/**
# 3. Process overview and scheduling

A tick advances every locale through one full generation cycle (in x-major
grid order; the cycles do not interact), then runs one migration pass over
the whole grid. Out-of-food anomalies reported by a cycle are printed with
their coordinates but do not interrupt the run.
 */
pub fn run<R: Rng>(
    meta: &mut Metapopulation,
    engine: &Generation,
    rng: &mut R,
    max_t: Generations,
    o: &observation::Settings,
) {
    for t in 1..=max_t {
        for x in 0..meta.width() {
            for y in 0..meta.height() {
                if engine.run_generation(meta.locale_at_mut(x, y), rng) {
                    println!("Out of food at ({:}, {:}) in generation {:}", x, y, t);
                }
            }
        }
        meta.migrate(rng);

        if (o.log_every > 0) && (t % o.log_every == 0) {
            println!("t: {:}", t);
            observation::print_totals(meta);
        }
    }
}

/// Dump the complete grid state as JSON, for later inspection.
pub fn store_state(meta: &Metapopulation, statefile: String) -> Result<(), String> {
    let file = match File::create(statefile) {
        Ok(f) => f,
        Err(_) => return Err("Could not create state file".to_string()),
    };
    match serde_json::to_writer_pretty(file, meta) {
        Ok(_) => Ok(()),
        Err(_) => Err("Failed to store state.".to_string()),
    }
}
