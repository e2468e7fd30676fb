//! Seed-and-query entry point.
//!
//! # Responsibility
//! - Seed a synthetic dataset file and run one representative batched query.
//! - Keep output small enough for quick local sanity checks.

use std::error::Error;
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use whisker_core::{
    ClinicService, Criteria, DatasetProfile, EntityRepository, JsonStore, RecordStore,
};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: whisker_cli <dataset.json> [smoke|load]");
        return ExitCode::FAILURE;
    };

    let profile = match args.next().as_deref() {
        None | Some("smoke") => DatasetProfile::smoke(),
        Some("load") => DatasetProfile::load(),
        Some(other) => {
            eprintln!("unknown profile `{other}`; expected smoke|load");
            return ExitCode::FAILURE;
        }
    };

    if let Ok(log_dir) = std::env::var("WHISKER_LOG_DIR") {
        if let Err(err) = whisker_core::init_logging(whisker_core::default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&path, &profile) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, profile: &DatasetProfile) -> Result<(), Box<dyn Error>> {
    let base_epoch_ms = epoch_ms_now()?;
    let mut rng = rand::rng();

    let document = whisker_core::generate(profile, base_epoch_ms, &mut rng)?;
    document.save(path)?;
    println!(
        "seeded {path}: {} tables, {} records",
        document.table_count(),
        document.record_count()
    );

    let store = JsonStore::open(path)?;
    let repo = EntityRepository::new(&store);
    let service = ClinicService::new(repo);

    let clinics = store.select("clinics", &Criteria::new())?;
    let Some(clinic_name) = clinics
        .first()
        .and_then(|clinic| clinic.get("name"))
        .and_then(|name| name.as_str())
    else {
        println!("no clinics in dataset");
        return Ok(());
    };

    let started_at = Instant::now();
    let cats = service.cats_seen_at(clinic_name)?;
    println!(
        "cats seen at `{clinic_name}`: {} distinct ({} ms)",
        cats.len(),
        started_at.elapsed().as_millis()
    );
    println!("whisker_core version={}", whisker_core::core_version());

    Ok(())
}

fn epoch_ms_now() -> Result<i64, Box<dyn Error>> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(i64::try_from(elapsed.as_millis())?)
}
