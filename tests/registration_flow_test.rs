use funrun::auth::{AccessGate, StaticCredentials};
use funrun::export::export_tabular;
use funrun::registry::{format_bib, search, Category, NewRegistration, Registration, RegistrationStore};
use funrun::storage::{FileBackend, StorageBackend};
use funrun::FunRunError;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> RegistrationStore<FileBackend> {
    RegistrationStore::new(FileBackend::new(dir.path()).unwrap())
}

fn runner(name: &str, category: Category) -> NewRegistration {
    NewRegistration::new(name, "3507010101010001", category).unwrap()
}

#[test]
fn test_end_to_end_allocation_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = file_store(&temp_dir);

    assert_eq!(store.allocate(Category::Pelajar).unwrap(), "0001");
    store.register(runner("a", Category::Pelajar)).unwrap();
    assert_eq!(store.allocate(Category::Pelajar).unwrap(), "0002");
    store.register(runner("b", Category::Pelajar)).unwrap();
    assert_eq!(store.allocate(Category::Umum).unwrap(), "5001");
}

#[test]
fn test_registrations_persist_across_store_instances() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut store = file_store(&temp_dir);
        store.register(runner("budi santoso", Category::Pelajar)).unwrap();
        store.register(runner("siti", Category::Umum)).unwrap();
    }

    let mut store = file_store(&temp_dir);
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Budi Santoso");
    assert_eq!(listed[1].bib_number, "5001");

    let next = store.register(runner("ani", Category::Pelajar)).unwrap();
    assert_eq!(next.bib_number, "0002");
}

#[test]
fn test_persisted_layout_matches_source_format() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = file_store(&temp_dir);
    store
        .append(Registration {
            name: "Budi Santoso".to_string(),
            nik: "1234".to_string(),
            category: Category::Pelajar,
            bib_number: "0007".to_string(),
        })
        .unwrap();

    let raw = std::fs::read_to_string(temp_dir.path().join("funRunRegistrations.json")).unwrap();
    assert_eq!(
        raw,
        r#"[{"name":"Budi Santoso","nik":"1234","category":"pelajar","bibNumber":"0007"}]"#
    );
}

#[test]
fn test_full_band_rejects_and_keeps_collection() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = file_store(&temp_dir);
    let full: Vec<Registration> = (1..=5000)
        .map(|n| Registration {
            name: "Runner".to_string(),
            nik: n.to_string(),
            category: Category::Pelajar,
            bib_number: format_bib(n),
        })
        .collect();
    store
        .backend_mut()
        .set("funRunRegistrations", &serde_json::to_string(&full).unwrap())
        .unwrap();

    let err = store.register(runner("late", Category::Pelajar)).unwrap_err();
    assert!(matches!(
        err,
        FunRunError::CapacityExhausted {
            category: Category::Pelajar
        }
    ));
    assert_eq!(store.list().unwrap().len(), 5000);

    // General band still open
    assert_eq!(
        store.register(runner("umum", Category::Umum)).unwrap().bib_number,
        "5001"
    );
}

#[test]
fn test_mixed_registrations_stay_unique_and_banded() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = file_store(&temp_dir);

    for i in 0..30 {
        let category = if i % 2 == 0 { Category::Pelajar } else { Category::Umum };
        store.register(runner(&format!("r{}", i), category)).unwrap();
    }

    let listed = store.list().unwrap();
    let unique: HashSet<&str> = listed.iter().map(|r| r.bib_number.as_str()).collect();
    assert_eq!(unique.len(), listed.len());
    for registration in &listed {
        assert!(registration
            .category
            .band()
            .contains(registration.bib_value().unwrap()));
    }
}

#[test]
fn test_dashboard_flow_with_shared_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(temp_dir.path()).unwrap();
    let mut store = RegistrationStore::new(backend.clone());
    let mut gate = AccessGate::new(backend, StaticCredentials::default());

    store.register(runner("budi santoso", Category::Pelajar)).unwrap();

    assert!(gate.require_authenticated().is_err());
    gate.login("admin", "@sman1Turen").unwrap();
    assert!(gate.require_authenticated().is_ok());

    let all = store.list().unwrap();
    assert_eq!(search::filter(&all, "budi").len(), 1);
    assert!(search::filter(&all, "xyz").is_empty());

    let workbook = export_tabular(&all).unwrap();
    assert!(workbook.starts_with(b"PK"));

    store.clear().unwrap();
    assert!(store.list().unwrap().is_empty());

    // Clearing registrations leaves the login in place
    assert!(gate.is_authenticated().unwrap());
    gate.logout().unwrap();
    assert!(!gate.is_authenticated().unwrap());
}

#[test]
fn test_corrupted_file_is_treated_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("funRunRegistrations.json"), "garbage").unwrap();

    let mut store = file_store(&temp_dir);
    assert!(store.list().unwrap().is_empty());
    assert_eq!(
        store.register(runner("a", Category::Pelajar)).unwrap().bib_number,
        "0001"
    );
}
