use crate::parameters::{MigrationPattern, PopulationStart};
use crate::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_parameters() -> Parameters {
    Parameters {
        width: 2,
        height: 2,
        population: PopulationStart {
            starting_pred_pop: 6,
            starting_prey_pop: 200,
            lower_kill_rate: 0.05,
            upper_kill_rate: 0.15,
        },
        migration: MigrationPattern {
            migration_chance: 0.5,
            pred_migration_rate: 0.2,
            prey_migration_rate: 0.1,
        },
        prey_growth_rate: 2.0,
        prey_cap: 200,
        pred_growth_rate: 0.05,
        max_children_per_predator: 4,
        pred_mortality_rate: 0.2,
        mutation_rate: 0.1,
        seed: 42,
    }
}

#[test]
fn test_construction_logs_generation_zero() {
    let locale = Locale::new(3, 7, 0.5);
    assert_eq!(locale.history().len(), 1);
    let entry = &locale.history()[0];
    assert_eq!(entry.generation, 0);
    assert_eq!(entry.prey, 7);
    assert_eq!(entry.predators, 3);
    assert_eq!(entry.max_kill_rate, 0.5);
    assert_eq!(entry.avg_kill_rate, 0.5);
}

#[test]
fn test_empty_locale_kill_rates_are_zero() {
    let locale = Locale::new(0, 10, 0.5);
    assert_eq!(locale.avg_kill_rate(), 0.);
    assert_eq!(locale.max_kill_rate(), 0.);
}

#[test]
fn test_reduce_prey_clamps_at_zero() {
    let mut locale = Locale::new(0, 5, 0.5);
    assert!(!locale.reduce_prey(2));
    assert_eq!(locale.prey(), 3);
    assert!(locale.reduce_prey(7));
    assert_eq!(locale.prey(), 0);
}

#[test]
#[should_panic]
fn test_remove_predator_out_of_range_panics() {
    let mut locale = Locale::new(2, 0, 0.5);
    locale.remove_predator(2);
}

#[test]
fn test_emigration_scan_visits_every_predator() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut locale = Locale::new(10, 0, 0.5);
    // Certain emigration must empty the source. A scan that advances its
    // index after a removal would skip every other element here.
    let emigrants = locale.draw_emigrants(1.0, &mut rng);
    assert_eq!(emigrants.len(), 10);
    assert_eq!(locale.num_predators(), 0);

    let mut locale = Locale::new(10, 0, 0.5);
    let emigrants = locale.draw_emigrants(0.0, &mut rng);
    assert!(emigrants.is_empty());
    assert_eq!(locale.num_predators(), 10);
}

#[test]
fn test_prey_growth_rounds_up_and_caps() {
    let mut p = small_parameters();
    p.prey_growth_rate = 1.5;
    p.prey_cap = 200;
    let engine = Generation::new(&p).unwrap();

    let mut locale = Locale::new(0, 3, 0.5);
    engine.grow_prey(&mut locale);
    assert_eq!(locale.prey(), 5); // ceil(4.5)

    let mut locale = Locale::new(0, 180, 0.5);
    engine.grow_prey(&mut locale);
    assert_eq!(locale.prey(), 200);
}

#[test]
fn test_prey_never_exceeds_cap_over_a_run() {
    let p = small_parameters();
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(p.seed);
    let mut meta = Metapopulation::new(&p, &mut rng).unwrap();
    let o = observation::Settings {
        log_every: 0,
        output_dir: "".to_string(),
        statefile: "".to_string(),
    };
    run(&mut meta, &engine, &mut rng, 30, &o);
    for x in 0..meta.width() {
        for y in 0..meta.height() {
            for entry in meta.locale_at(x, y).history() {
                assert!(entry.prey <= p.prey_cap);
            }
        }
    }
}

#[test]
fn test_pair_fitness_child_count() {
    let mut p = small_parameters();
    p.pred_growth_rate = 0.5;
    p.max_children_per_predator = 10;
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    let mut first = Predator::new(0.3);
    first.kills = 4;
    let mut second = Predator::new(0.6);
    second.kills = 6;
    // floor(min((4 + 6) * 0.5, 2 * 10)) = 5
    let children = engine.make_children(&[first, second], &mut rng);
    assert_eq!(children.len(), 5);
    for child in &children {
        // Crossover blends the parents, so every child lies between them
        // (up to floating-point rounding of the blend).
        assert!(child.kill_rate >= 0.3 - 1e-12 && child.kill_rate <= 0.6 + 1e-12);
        assert_eq!(child.kills, 0);
    }
}

#[test]
fn test_odd_predator_breeds_asexually() {
    let mut p = small_parameters();
    p.pred_growth_rate = 0.5;
    p.max_children_per_predator = 10;
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let mut predators = vec![Predator::new(0.3), Predator::new(0.6), Predator::new(0.9)];
    predators[0].kills = 4;
    predators[1].kills = 6;
    predators[2].kills = 5;
    let children = engine.make_children(&predators, &mut rng);
    // 5 from the pair, min(5, 10) = 5 clones from the unpaired one.
    assert_eq!(children.len(), 10);
    for clone in &children[5..] {
        assert_eq!(clone.kill_rate, 0.9);
    }
}

#[test]
fn test_cull_removes_exact_fraction() {
    let mut p = small_parameters();
    p.pred_mortality_rate = 0.3;
    let engine = Generation::new(&p).unwrap();
    let mut locale = Locale::new(10, 0, 0.5);
    // cutoff = 10 - ceil(10 * 0.3) = 7
    engine.cull(&mut locale);
    assert_eq!(locale.num_predators(), 7);
}

#[test]
fn test_cull_can_extinguish_and_extinction_is_stable() {
    let mut p = small_parameters();
    p.pred_mortality_rate = 1.0;
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    let mut locale = Locale::new(8, 100, 0.5);
    engine.run_generation(&mut locale, &mut rng);
    assert_eq!(locale.num_predators(), 0);

    // A predator-extinct locale keeps cycling without breeding.
    engine.run_generation(&mut locale, &mut rng);
    let entry = locale.history().last().unwrap();
    assert_eq!(entry.predators, 0);
    assert_eq!(entry.max_kill_rate, 0.);
    assert_eq!(entry.avg_kill_rate, 0.);
}

#[test]
fn test_certain_hunter_empties_the_locale() {
    let mut p = small_parameters();
    p.prey_growth_rate = 1.0;
    p.prey_cap = 200;
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let mut locale = Locale::new(1, 10, 1.0);
    engine.hunt(&mut locale, &mut rng);
    assert_eq!(locale.predators()[0].kills, 10);
    assert_eq!(locale.prey(), 0);

    engine.grow_prey(&mut locale);
    assert_eq!(locale.prey(), 0); // ceil(0 * 1.0) = 0
}

#[test]
fn test_hunt_kill_counts_are_binomial() {
    let p = small_parameters();
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(6);

    let mut locale = Locale::new(1, 10000, 0.5);
    engine.hunt(&mut locale, &mut rng);
    let kills = locale.predators()[0].kills as i64;
    // Mean 5000, standard deviation 50; six sigma on either side.
    assert!((kills - 5000).abs() < 300);
}

#[test]
fn test_no_kills_means_no_children() {
    let mut p = small_parameters();
    p.pred_mortality_rate = 0.5;
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    // No prey, so both predators finish the hunt with zero kills: breeding
    // yields nothing and culling takes ceil(2 * 0.5) = 1 of the 2 parents.
    let mut locale = Locale::new(2, 0, 0.5);
    engine.run_generation(&mut locale, &mut rng);
    assert_eq!(locale.num_predators(), 1);
}

#[test]
fn test_mutation_is_a_bounded_proportional_nudge() {
    let mut p = small_parameters();
    p.mutation_rate = 0.1;
    let engine = Generation::new(&p).unwrap();
    let mut rng = StdRng::seed_from_u64(8);

    for _ in 0..100 {
        let mut child = Predator::new(0.5);
        engine.mutate(&mut child, &mut rng);
        assert!(child.kill_rate >= 0.45 && child.kill_rate <= 0.55);
    }
}

#[test]
fn test_migration_with_zero_rates_changes_nothing() {
    let mut p = small_parameters();
    p.migration.migration_chance = 1.0;
    p.migration.pred_migration_rate = 0.0;
    p.migration.prey_migration_rate = 0.0;
    let mut rng = StdRng::seed_from_u64(9);
    let mut meta = Metapopulation::new(&p, &mut rng).unwrap();

    let before: Vec<(u32, usize)> = (0..p.width)
        .flat_map(|x| (0..p.height).map(move |y| (x, y)))
        .map(|(x, y)| (meta.prey_at(x, y), meta.predators_at(x, y)))
        .collect();
    meta.migrate(&mut rng);
    let after: Vec<(u32, usize)> = (0..p.width)
        .flat_map(|x| (0..p.height).map(move |y| (x, y)))
        .map(|(x, y)| (meta.prey_at(x, y), meta.predators_at(x, y)))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_single_locale_torus_is_its_own_neighbour() {
    let mut p = small_parameters();
    p.width = 1;
    p.height = 1;
    p.migration.migration_chance = 1.0;
    p.migration.pred_migration_rate = 1.0;
    p.migration.prey_migration_rate = 0.5;
    let mut rng = StdRng::seed_from_u64(10);
    let mut meta = Metapopulation::new(&p, &mut rng).unwrap();

    for direction in 0..4 {
        assert_eq!(meta.neighbour(0, 0, direction), (0, 0));
    }
    let (prey, predators) = (meta.prey_at(0, 0), meta.predators_at(0, 0));
    meta.migrate(&mut rng);
    assert_eq!(meta.prey_at(0, 0), prey);
    assert_eq!(meta.predators_at(0, 0), predators);
}

#[test]
fn test_toroidal_adjacency_wraps() {
    let mut p = small_parameters();
    p.width = 3;
    p.height = 3;
    let mut rng = StdRng::seed_from_u64(11);
    let meta = Metapopulation::new(&p, &mut rng).unwrap();

    assert_eq!(meta.neighbour(2, 1, 0), (0, 1)); // east off the edge
    assert_eq!(meta.neighbour(1, 2, 1), (1, 0)); // north off the edge
    assert_eq!(meta.neighbour(0, 1, 2), (2, 1)); // west off the edge
    assert_eq!(meta.neighbour(1, 0, 3), (1, 2)); // south off the edge
    assert_eq!(meta.neighbour(1, 1, 0), (2, 1)); // interior
}

#[test]
fn test_migration_conserves_grid_totals() {
    let mut p = small_parameters();
    p.migration.migration_chance = 1.0;
    p.migration.pred_migration_rate = 0.5;
    p.migration.prey_migration_rate = 0.25;
    let mut rng = StdRng::seed_from_u64(12);
    let mut meta = Metapopulation::new(&p, &mut rng).unwrap();

    let (prey, predators) = (meta.total_prey(), meta.total_predators());
    for _ in 0..10 {
        meta.migrate(&mut rng);
    }
    assert_eq!(meta.total_prey(), prey);
    assert_eq!(meta.total_predators(), predators);
}

#[test]
fn test_identical_seeds_give_identical_logs() {
    let p = small_parameters();
    let engine = Generation::new(&p).unwrap();
    let o = observation::Settings {
        log_every: 0,
        output_dir: "".to_string(),
        statefile: "".to_string(),
    };

    let mut logs = vec![];
    for _ in 0..2 {
        let mut rng = StdRng::seed_from_u64(p.seed);
        let mut meta = Metapopulation::new(&p, &mut rng).unwrap();
        run(&mut meta, &engine, &mut rng, 25, &o);
        let mut rendered = String::new();
        for x in 0..meta.width() {
            for y in 0..meta.height() {
                rendered.push_str(&observation::render_log(meta.locale_at(x, y)));
            }
        }
        logs.push(rendered);
    }
    assert_eq!(logs[0], logs[1]);
}

#[test]
fn test_log_rendering_format() {
    let locale = Locale::new(2, 5, 0.5);
    let log = observation::render_log(&locale);
    let mut lines = log.lines();
    assert_eq!(lines.next(), Some("Generation, Prey, Preds, Max KR, Avg KR"));
    assert_eq!(lines.next(), Some("0,5,2,0.5,0.5"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let mut p = small_parameters();
    p.width = 0;
    assert!(p.validate().is_err());

    let mut p = small_parameters();
    p.pred_mortality_rate = 1.5;
    assert!(Generation::new(&p).is_err());

    let mut p = small_parameters();
    p.mutation_rate = -0.1;
    assert!(Generation::new(&p).is_err());

    let mut p = small_parameters();
    p.population.lower_kill_rate = 0.9;
    p.population.upper_kill_rate = 0.1;
    let mut rng = StdRng::seed_from_u64(13);
    assert!(Metapopulation::new(&p, &mut rng).is_err());
}
