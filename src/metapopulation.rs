/*!
The metapopulation is the toroidal grid of locales and the migration process
between them. Migration gives every locale, once per tick, a chance to send
predators and a share of its prey to one randomly chosen cardinal neighbour.
This provides some genetic mixing, but more importantly lets decimated
locales be repopulated.

The per-cell draw order is fixed: one participation trial, one direction
choice, then one trial per predator in scan order. Prey transfer consumes no
draws.
 */

use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::parameters::Parameters;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metapopulation {
    /// Indexed `grid[x][y]`. Cells are never added or removed after
    /// construction.
    grid: Vec<Vec<Locale>>,
    width: usize,
    height: usize,

    migration_chance: f64,
    pred_migration_rate: f64,
    prey_migration_rate: f64,
}

impl Metapopulation {
    /// Builds the full grid up front. Every locale draws its own starting
    /// kill rate uniformly from the configured bounds and assigns it to its
    /// whole predator population, so the grid starts out spatially
    /// heterogeneous.
    pub fn new<R: Rng>(p: &Parameters, rng: &mut R) -> Result<Metapopulation, String> {
        p.validate()?;
        let kill_rate_range = p.population.upper_kill_rate - p.population.lower_kill_rate;
        let grid = (0..p.width)
            .map(|_| {
                (0..p.height)
                    .map(|_| {
                        let kill_rate =
                            p.population.lower_kill_rate + rng.gen::<f64>() * kill_rate_range;
                        Locale::new(
                            p.population.starting_pred_pop,
                            p.population.starting_prey_pop,
                            kill_rate,
                        )
                    })
                    .collect()
            })
            .collect();
        Ok(Metapopulation {
            grid,
            width: p.width,
            height: p.height,
            migration_chance: p.migration.migration_chance,
            pred_migration_rate: p.migration.pred_migration_rate,
            prey_migration_rate: p.migration.prey_migration_rate,
        })
    }

    /// One migration pass over every cell. A participating cell picks one of
    /// its four neighbours, gives each of its predators an independent
    /// emigration trial, and sends a fixed fraction of its prey along.
    /// Emigrants are removed from the source before being appended to the
    /// destination, so on degenerate one-wide grids (where a cell can be its
    /// own neighbour) the pass is a harmless reshuffle.
    pub fn migrate<R: Rng>(&mut self, rng: &mut R) {
        for x in 0..self.width {
            for y in 0..self.height {
                if rng.gen::<f64>() >= self.migration_chance {
                    continue;
                }
                let direction: u8 = rng.gen_range(0..4);
                let (x2, y2) = self.neighbour(x, y, direction);

                if self.pred_migration_rate > 0. {
                    let emigrants = self.grid[x][y].draw_emigrants(self.pred_migration_rate, rng);
                    for emigrant in emigrants {
                        self.grid[x2][y2].add_predator(emigrant);
                    }
                }

                if self.prey_migration_rate > 0. {
                    let transfer =
                        (self.grid[x][y].prey() as f64 * self.prey_migration_rate) as u32;
                    self.grid[x][y].reduce_prey(transfer);
                    let arrival = self.grid[x2][y2].prey() + transfer;
                    self.grid[x2][y2].set_prey(arrival);
                }
            }
        }
    }

    /// Wraparound cardinal adjacency: 0 is east, 1 north, 2 west, 3 south.
    pub fn neighbour(&self, x: usize, y: usize, direction: u8) -> (usize, usize) {
        match direction {
            0 => ((x + 1) % self.width, y),
            1 => (x, (y + 1) % self.height),
            2 => ((x + self.width - 1) % self.width, y),
            _ => (x, (y + self.height - 1) % self.height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn locale_at(&self, x: usize, y: usize) -> &Locale {
        &self.grid[x][y]
    }

    pub fn locale_at_mut(&mut self, x: usize, y: usize) -> &mut Locale {
        &mut self.grid[x][y]
    }

    pub fn prey_at(&self, x: usize, y: usize) -> u32 {
        self.grid[x][y].prey()
    }

    pub fn predators_at(&self, x: usize, y: usize) -> usize {
        self.grid[x][y].num_predators()
    }

    pub fn total_prey(&self) -> u64 {
        self.grid
            .iter()
            .flatten()
            .map(|locale| locale.prey() as u64)
            .sum()
    }

    pub fn total_predators(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .map(|locale| locale.num_predators())
            .sum()
    }

    pub fn max_kill_rate(&self) -> f64 {
        self.grid
            .iter()
            .flatten()
            .map(|locale| locale.max_kill_rate())
            .fold(0., f64::max)
    }
}
