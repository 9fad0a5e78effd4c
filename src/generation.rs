/*!
The generation engine: a reusable strategy object that advances one locale
through one full predation and reproduction cycle. One engine is shared by
all locales over the whole run; it owns no per-locale state, all effects are
written back into the locale it is called on.

A cycle is a strictly ordered sequence — hunt, prey growth, breeding,
mutation, merge, cull, log — and each step consumes random draws in a fixed
order from the one shared source:

1. one binomial kill-count draw per predator, in collection order,
2. the pre-breeding shuffle,
3. one crossover weight per sexually produced child,
4. one mutation magnitude and one sign per child,
5. the pre-culling shuffle.

Reordering any of these breaks seed-for-seed reproducibility.
 */

use itertools::Itertools;
use rand::Rng;
use rand_distr::{Binomial, Distribution};
use serde_derive::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::parameters::Parameters;
use crate::Predator;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Generation {
    prey_growth_rate: f64,
    prey_cap: u32,
    pred_growth_rate: f64,
    max_children_per_predator: u32,
    pred_mortality_rate: f64,
    mutation_rate: f64,
}

impl Generation {
    pub fn new(p: &Parameters) -> Result<Generation, String> {
        p.validate()?;
        Ok(Generation {
            prey_growth_rate: p.prey_growth_rate,
            prey_cap: p.prey_cap,
            pred_growth_rate: p.pred_growth_rate,
            max_children_per_predator: p.max_children_per_predator,
            pred_mortality_rate: p.pred_mortality_rate,
            mutation_rate: p.mutation_rate,
        })
    }

    /// One full generation cycle on `locale`. Returns whether the hunt drove
    /// the prey population out of food (clamped at zero), which is
    /// recoverable: the cycle always runs to completion.
    pub fn run_generation<R: Rng>(&self, locale: &mut Locale, rng: &mut R) -> bool {
        let out_of_food = self.hunt(locale, rng);
        self.grow_prey(locale);

        locale.shuffle_predators(rng);
        let mut children = self.make_children(locale.predators(), rng);
        for child in children.iter_mut() {
            self.mutate(child, rng);
        }
        for child in children.drain(..) {
            locale.add_predator(child);
        }

        locale.shuffle_predators(rng);
        self.cull(locale);

        locale.record_snapshot();
        out_of_food
    }

    /// Every predator tries its kill rate against each of the prey present
    /// at the start of the step, as one binomial draw. Kills are recorded
    /// per predator; the summed kills come off the prey count as a single
    /// decrement afterwards, so no predator hunts a pool already thinned by
    /// its neighbours.
    pub(crate) fn hunt<R: Rng>(&self, locale: &mut Locale, rng: &mut R) -> bool {
        let prey_pool = locale.prey() as u64;
        let mut total_kills: u32 = 0;
        for predator in locale.predators_mut() {
            // The trait may wander outside [0, 1]; the trial probability
            // saturates there.
            let chance = predator.kill_rate.clamp(0., 1.);
            let kill_distribution =
                Binomial::new(prey_pool, chance).expect("saturated probability");
            let kills = kill_distribution.sample(rng) as u32;
            predator.kills = kills;
            total_kills = total_kills.saturating_add(kills);
        }
        locale.reduce_prey(total_kills)
    }

    /// Exponential prey regrowth up to the cap.
    pub(crate) fn grow_prey(&self, locale: &mut Locale) {
        let grown = (locale.prey() as f64 * self.prey_growth_rate).ceil() as u32;
        locale.set_prey(grown.min(self.prey_cap));
    }

    /// Walks the (pre-shuffled) population in consecutive pairs. Each pair
    /// produces children in proportion to its combined kills, capped at
    /// twice the per-predator maximum; each child's kill rate is a uniform
    /// random blend of the parents'. An odd predator left without a partner
    /// reproduces asexually, cloning its kill rate into at most
    /// `max_children_per_predator` children. Parents survive this step;
    /// children are returned separately, unmutated.
    pub(crate) fn make_children<R: Rng>(
        &self,
        predators: &[Predator],
        rng: &mut R,
    ) -> Vec<Predator> {
        let mut children = vec![];
        for (first, second) in predators.iter().tuples() {
            let pair_kills = first.kills as f64 + second.kills as f64;
            let pair_fitness = (pair_kills * self.pred_growth_rate)
                .min((2 * self.max_children_per_predator) as f64)
                .floor() as u32;
            for _ in 0..pair_fitness {
                let crossing_point = rng.gen::<f64>();
                children.push(Predator::new(
                    crossing_point * first.kill_rate + (1. - crossing_point) * second.kill_rate,
                ));
            }
        }
        if predators.len() % 2 == 1 {
            let odd_one = &predators[predators.len() - 1];
            let solo_fitness = odd_one.kills.min(self.max_children_per_predator);
            for _ in 0..solo_fitness {
                children.push(Predator::new(odd_one.kill_rate));
            }
        }
        children
    }

    /// Scales a child's kill rate by `1 ± u`, with the magnitude `u` drawn
    /// uniformly from [0, mutation_rate] and then a fair coin for the sign.
    pub(crate) fn mutate<R: Rng>(&self, child: &mut Predator, rng: &mut R) {
        let mut increase = rng.gen::<f64>() * self.mutation_rate;
        if rng.gen::<bool>() {
            increase = -increase;
        }
        child.kill_rate *= 1. + increase;
    }

    /// Drops a uniformly random mortality-rate fraction of the (pre-shuffled)
    /// population. An empty survivor set is valid; the locale is then
    /// predator-extinct until recolonized.
    pub(crate) fn cull(&self, locale: &mut Locale) {
        let size = locale.num_predators();
        let cutoff = size - (size as f64 * self.pred_mortality_rate).ceil() as usize;
        locale.truncate_predators(cutoff);
    }
}
