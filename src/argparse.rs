use crate::observation::Settings;
use crate::parameters::Parameters;
use crate::Generations;

pub fn parse_args(p: &mut Parameters, max_t: &mut Generations, o: &mut Settings) {
    let mut parser = argparse::ArgumentParser::new();
    parser.set_description("Run a predator-prey coevolution simulation");
    parser.refer(&mut p.width).add_option(
        &["--width"],
        argparse::Store,
        "width of the locale grid",
    );
    parser.refer(&mut p.height).add_option(
        &["--height"],
        argparse::Store,
        "height of the locale grid",
    );
    parser.refer(&mut p.population.starting_pred_pop).add_option(
        &["--start-predators"],
        argparse::Store,
        "starting predator population per locale",
    );
    parser.refer(&mut p.population.starting_prey_pop).add_option(
        &["--start-prey"],
        argparse::Store,
        "starting prey population per locale",
    );
    parser.refer(&mut p.population.lower_kill_rate).add_option(
        &["--kill-rate-lower"],
        argparse::Store,
        "lower bound for a locale's starting kill rate",
    );
    parser.refer(&mut p.population.upper_kill_rate).add_option(
        &["--kill-rate-upper"],
        argparse::Store,
        "upper bound for a locale's starting kill rate",
    );
    parser.refer(&mut p.prey_growth_rate).add_option(
        &["--prey-growth"],
        argparse::Store,
        "exponential factor for prey regrowth",
    );
    parser.refer(&mut p.prey_cap).add_option(
        &["--prey-cap"],
        argparse::Store,
        "maximum prey population per locale",
    );
    parser.refer(&mut p.pred_growth_rate).add_option(
        &["--pred-growth"],
        argparse::Store,
        "conversion factor between kills and children",
    );
    parser.refer(&mut p.max_children_per_predator).add_option(
        &["--max-children"],
        argparse::Store,
        "maximum number of children per predator",
    );
    parser.refer(&mut p.pred_mortality_rate).add_option(
        &["--pred-mortality"],
        argparse::Store,
        "fraction of predators dying at the end of each generation",
    );
    parser.refer(&mut p.mutation_rate).add_option(
        &["--mutation-rate"],
        argparse::Store,
        "largest proportional kill-rate perturbation of a newborn",
    );
    parser.refer(&mut p.migration.migration_chance).add_option(
        &["--migration-chance"],
        argparse::Store,
        "chance for a locale to take part in migration each tick",
    );
    parser.refer(&mut p.migration.pred_migration_rate).add_option(
        &["--pred-migration-rate"],
        argparse::Store,
        "per-predator emigration chance in a participating locale",
    );
    parser.refer(&mut p.migration.prey_migration_rate).add_option(
        &["--prey-migration-rate"],
        argparse::Store,
        "fraction of prey moving along during migration",
    );
    parser.refer(&mut p.seed).add_option(
        &["--seed"],
        argparse::Store,
        "seed for the shared random number source",
    );
    parser.refer(max_t).add_option(
        &["--steps"],
        argparse::Store,
        "number of generations to simulate",
    );
    parser.refer(&mut o.log_every).add_option(
        &["--log-every"],
        argparse::Store,
        "period of logging grid totals, in generations",
    );
    parser.refer(&mut o.output_dir).add_option(
        &["--output-dir"],
        argparse::Store,
        "directory for the per-locale result logs",
    );
    parser.refer(&mut o.statefile).add_option(
        &["--statefile"],
        argparse::Store,
        "file to store the final grid state to",
    );
    parser.parse_args_or_exit();
}
