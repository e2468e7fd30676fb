use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use whisker_core::dataset::{floor_to_hour, DAY_MS, HOUR_MS};
use whisker_core::{
    generate, Appointment, Cat, Clinic, ClinicService, DatasetProfile, Document,
    EntityRepository, JsonStore, Person, Veterinarian,
};

const BASE_EPOCH_MS: i64 = 1_700_000_123_456;

fn smoke_document() -> Document {
    let mut rng = StdRng::seed_from_u64(7);
    generate(&DatasetProfile::smoke(), BASE_EPOCH_MS, &mut rng).unwrap()
}

#[test]
fn smoke_profile_document_stays_within_bounds() {
    let document = smoke_document();
    let profile = DatasetProfile::smoke();
    let store = JsonStore::from_document(document);
    let repo = EntityRepository::new(&store);

    let persons: Vec<Person> = repo.get_all().unwrap();
    let cats: Vec<Cat> = repo.get_all().unwrap();
    let clinics: Vec<Clinic> = repo.get_all().unwrap();
    let veterinarians: Vec<Veterinarian> = repo.get_all().unwrap();
    let appointments: Vec<Appointment> = repo.get_all().unwrap();

    assert_eq!(persons.len(), profile.persons);
    assert_eq!(clinics.len(), profile.clinics);

    assert!(cats.len() >= profile.persons);
    assert!(cats.len() <= profile.persons * profile.max_cats_per_person as usize);

    assert!(veterinarians.len() >= profile.clinics);
    assert!(
        veterinarians.len()
            <= profile.clinics * profile.max_veterinarians_per_clinic as usize
    );

    assert!(appointments.len() >= profile.persons);
    assert!(
        appointments.len()
            <= profile.persons * profile.max_appointments_per_person as usize
    );
}

#[test]
fn generated_ids_are_unique_per_table() {
    let document = smoke_document();
    let store = JsonStore::from_document(document);
    let repo = EntityRepository::new(&store);

    let cats: Vec<Cat> = repo.get_all().unwrap();
    let cat_ids: BTreeSet<_> = cats.iter().map(|cat| cat.id.as_str()).collect();
    assert_eq!(cat_ids.len(), cats.len());

    let appointments: Vec<Appointment> = repo.get_all().unwrap();
    let appointment_ids: BTreeSet<_> = appointments.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(appointment_ids.len(), appointments.len());
}

#[test]
fn every_generated_foreign_key_resolves_within_the_document() {
    let document = smoke_document();
    let store = JsonStore::from_document(document);
    let repo = EntityRepository::new(&store);

    let person_ids: BTreeSet<String> = repo
        .get_all::<Person>()
        .unwrap()
        .into_iter()
        .map(|person| person.id)
        .collect();
    let cat_ids: BTreeSet<String> = repo
        .get_all::<Cat>()
        .unwrap()
        .into_iter()
        .map(|cat| cat.id)
        .collect();
    let clinic_ids: BTreeSet<String> = repo
        .get_all::<Clinic>()
        .unwrap()
        .into_iter()
        .map(|clinic| clinic.id)
        .collect();
    let veterinarians: Vec<Veterinarian> = repo.get_all().unwrap();
    let veterinarian_ids: BTreeSet<String> =
        veterinarians.iter().map(|vet| vet.id.clone()).collect();

    for cat in repo.get_all::<Cat>().unwrap() {
        assert!(person_ids.contains(&cat.owner_id));
    }
    for veterinarian in &veterinarians {
        assert!(clinic_ids.contains(&veterinarian.clinic_id));
    }
    for appointment in repo.get_all::<Appointment>().unwrap() {
        assert!(cat_ids.contains(&appointment.cat_id));
        assert!(clinic_ids.contains(&appointment.clinic_id));
        assert!(person_ids.contains(&appointment.owner_id));
        assert!(veterinarian_ids.contains(&appointment.veterinarian_id));
    }
}

#[test]
fn appointment_starts_are_hour_aligned_after_the_base() {
    let document = smoke_document();
    let store = JsonStore::from_document(document);
    let repo = EntityRepository::new(&store);

    let earliest = floor_to_hour(BASE_EPOCH_MS) + DAY_MS;
    for appointment in repo.get_all::<Appointment>().unwrap() {
        assert_eq!(appointment.start_epoch_ms % HOUR_MS, 0);
        assert!(appointment.start_epoch_ms >= earliest);
        assert!(appointment.duration_minutes > 0);
    }
}

#[test]
fn generated_document_round_trips_and_answers_clinic_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.json");

    let document = smoke_document();
    document.save(&path).unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded, document);

    let store = JsonStore::open(&path).unwrap();
    let repo = EntityRepository::new(&store);
    let clinics: Vec<Clinic> = repo.get_all().unwrap();

    let service = ClinicService::new(EntityRepository::new(&store));
    for clinic in &clinics {
        // Every generated clinic name is a usable natural key.
        let found = service.clinic_named(&clinic.name).unwrap();
        assert_eq!(found.id, clinic.id);
    }

    let seen: usize = clinics
        .iter()
        .map(|clinic| service.cats_seen_at(&clinic.name).unwrap().len())
        .sum();
    // Every person books appointments at one clinic for their own cats, so
    // at least one cat is seen somewhere.
    assert!(seen >= 1);
}
