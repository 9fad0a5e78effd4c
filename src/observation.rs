/*!
What data are collected from the run, and where they end up: per-locale
demographic histories as CSV files, a JSON dump of the parameters next to
them, and periodic grid totals on stdout.
 */

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::locale::Locale;
use crate::metapopulation::Metapopulation;
use crate::parameters::Parameters;
use crate::Generations;

pub struct Settings {
    /// Print grid totals every this many ticks; 0 disables.
    pub log_every: Generations,
    /// Directory for the per-locale CSV logs and the parameter dump.
    pub output_dir: String,
    /// If non-empty, the final grid state is stored here as JSON.
    pub statefile: String,
}

/// The canonical textual rendering of a locale's history: a header row,
/// then one comma-separated line per generation.
pub fn render_log(locale: &Locale) -> String {
    let mut log = String::from("Generation, Prey, Preds, Max KR, Avg KR\n");
    for entry in locale.history() {
        log.push_str(&format!(
            "{:},{:},{:},{:},{:}\n",
            entry.generation, entry.prey, entry.predators, entry.max_kill_rate, entry.avg_kill_rate
        ));
    }
    log
}

/// One `locale_<x>_<y>.csv` per grid cell.
pub fn write_locale_logs(meta: &Metapopulation, directory: &str) -> Result<(), String> {
    fs::create_dir_all(directory).map_err(|e| e.to_string())?;
    for x in 0..meta.width() {
        for y in 0..meta.height() {
            let path = Path::new(directory).join(format!("locale_{:}_{:}.csv", x, y));
            let mut file = File::create(&path).map_err(|e| e.to_string())?;
            file.write_all(render_log(meta.locale_at(x, y)).as_bytes())
                .map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

/// Stores the parameter settings alongside the results, so a run can be
/// reproduced from its output directory alone.
pub fn store_parameters(p: &Parameters, directory: &str) -> Result<(), String> {
    fs::create_dir_all(directory).map_err(|e| e.to_string())?;
    let file = File::create(Path::new(directory).join("parameters.json"))
        .map_err(|e| e.to_string())?;
    serde_json::to_writer_pretty(file, p).map_err(|e| e.to_string())
}

pub fn print_totals(meta: &Metapopulation) {
    println!(
        "prey: {:}, predators: {:}, max kill rate: {:}",
        meta.total_prey(),
        meta.total_predators(),
        meta.max_kill_rate()
    );
}
