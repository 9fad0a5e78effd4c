use rand::rngs::StdRng;
use rand::SeedableRng;

use model::argparse::parse_args;
use model::{observation, run, store_state, Generation, Generations, Metapopulation, Parameters};

fn main() -> Result<(), String> {
    let mut p = Parameters::default();
    let mut max_t: Generations = 500;
    let mut o = observation::Settings {
        log_every: 10,
        output_dir: "results".to_string(),
        statefile: "".to_string(),
    };

    parse_args(&mut p, &mut max_t, &mut o);

    let engine = Generation::new(&p)?;
    let mut rng = StdRng::seed_from_u64(p.seed);

    println!("# Initialization ...");
    let mut meta = Metapopulation::new(&p, &mut rng)?;
    println!("Initialized");

    run(&mut meta, &engine, &mut rng, max_t, &o);

    observation::write_locale_logs(&meta, &o.output_dir)?;
    observation::store_parameters(&p, &o.output_dir)?;
    if !o.statefile.is_empty() {
        store_state(&meta, o.statefile)?;
    }
    Ok(())
}
