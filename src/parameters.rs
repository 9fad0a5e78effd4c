use serde_derive::{Deserialize, Serialize};

/// Starting population of every locale in the grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PopulationStart {
    pub starting_pred_pop: u32,
    pub starting_prey_pop: u32,
    /// Each locale draws its own starting kill rate uniformly from
    /// [lower_kill_rate, upper_kill_rate].
    pub lower_kill_rate: f64,
    pub upper_kill_rate: f64,
}

/// Migration behaviour, shared across the whole grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MigrationPattern {
    /// Chance for a locale to participate in migration in a given tick.
    pub migration_chance: f64,
    /// Per-predator chance to emigrate, given a participating locale.
    pub pred_migration_rate: f64,
    /// Fraction of the prey population that moves along.
    pub prey_migration_rate: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Parameters {
    pub width: usize,
    pub height: usize,
    pub population: PopulationStart,
    pub migration: MigrationPattern,

    /// Exponential factor for prey regrowth per generation.
    pub prey_growth_rate: f64,
    /// Ceiling for the prey population of one locale.
    pub prey_cap: u32,
    /// Conversion factor between a breeding pair's kills and its children.
    pub pred_growth_rate: f64,
    /// Cap on children per predator (a pair produces at most twice this).
    pub max_children_per_predator: u32,
    /// Fraction of the predator population dying at the end of a generation.
    pub pred_mortality_rate: f64,
    /// Largest proportional kill-rate perturbation a newborn can receive.
    pub mutation_rate: f64,

    pub seed: u64,
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters {
            width: 3,
            height: 3,
            population: PopulationStart {
                starting_pred_pop: 10,
                starting_prey_pop: 2000,
                lower_kill_rate: 0.35,
                upper_kill_rate: 0.70,
            },
            migration: MigrationPattern {
                migration_chance: 0.1,
                pred_migration_rate: 0.005,
                prey_migration_rate: 0.01,
            },
            prey_growth_rate: 2.0,
            prey_cap: 2000,
            // With thousands of prey per locale, kills per pair run into the
            // thousands as well; the growth rate converts that into a
            // single-digit child count before the cap bites.
            pred_growth_rate: 0.008,
            max_children_per_predator: 10,
            pred_mortality_rate: 0.1,
            mutation_rate: 0.1,
            seed: 0,
        }
    }
}

impl Parameters {
    /// Rejects malformed configurations before any locale is built. The
    /// chance-type parameters must be probabilities, the remaining rates
    /// merely non-negative and finite.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Grid dimensions must be positive, got {:}x{:}",
                self.width, self.height
            ));
        }
        for (name, chance) in [
            ("migration_chance", self.migration.migration_chance),
            ("pred_migration_rate", self.migration.pred_migration_rate),
            ("prey_migration_rate", self.migration.prey_migration_rate),
            ("pred_mortality_rate", self.pred_mortality_rate),
        ]
        .iter()
        {
            if !(0. ..=1.).contains(chance) {
                return Err(format!("{:} must lie in [0, 1], got {:}", name, chance));
            }
        }
        for (name, rate) in [
            ("prey_growth_rate", self.prey_growth_rate),
            ("pred_growth_rate", self.pred_growth_rate),
            ("mutation_rate", self.mutation_rate),
            ("lower_kill_rate", self.population.lower_kill_rate),
            ("upper_kill_rate", self.population.upper_kill_rate),
        ]
        .iter()
        {
            if !rate.is_finite() || *rate < 0. {
                return Err(format!("{:} must be finite and non-negative, got {:}", name, rate));
            }
        }
        if self.population.lower_kill_rate > self.population.upper_kill_rate {
            return Err(format!(
                "Starting kill rate bounds are out of order: [{:}, {:}]",
                self.population.lower_kill_rate, self.population.upper_kill_rate
            ));
        }
        Ok(())
    }
}
