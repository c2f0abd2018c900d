#![allow(missing_docs)]
use tempfile::tempdir;
use twofa_core::error::CoreError;
use twofa_core::seed::HexSeed;
use twofa_core::seed_store::SeedStore;

const SEED_A: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const SEED_B: &str = "ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100";

fn seed(hex: &str) -> HexSeed {
    HexSeed::parse(hex).expect("test seed is valid")
}

#[test]
fn test_read_absent_seed_is_none() {
    let dir = tempdir().expect("failed to create temp dir");
    let store = SeedStore::new(dir.path().join("seed.txt"));
    assert!(store.read().expect("read failed").is_none());
}

#[test]
fn test_write_then_read_round_trip() {
    let dir = tempdir().expect("failed to create temp dir");
    let store = SeedStore::new(dir.path().join("seed.txt"));

    store.write(&seed(SEED_A)).expect("write failed");
    let read = store.read().expect("read failed").expect("seed missing");
    assert_eq!(read.as_str(), SEED_A);
}

#[test]
fn test_write_replaces_previous_seed() {
    let dir = tempdir().expect("failed to create temp dir");
    let store = SeedStore::new(dir.path().join("seed.txt"));

    store.write(&seed(SEED_A)).expect("first write failed");
    store.write(&seed(SEED_B)).expect("second write failed");

    let read = store.read().expect("read failed").expect("seed missing");
    assert_eq!(read.as_str(), SEED_B);
}

#[test]
fn test_write_creates_parent_directories() {
    let dir = tempdir().expect("failed to create temp dir");
    let store = SeedStore::new(dir.path().join("data/nested/seed.txt"));

    store.write(&seed(SEED_A)).expect("write failed");
    let read = store.read().expect("read failed").expect("seed missing");
    assert_eq!(read.as_str(), SEED_A);
}

#[test]
fn test_read_trims_trailing_whitespace() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("seed.txt");
    std::fs::write(&path, format!("{SEED_A}\n")).expect("failed to write file");

    let store = SeedStore::new(path);
    let read = store.read().expect("read failed").expect("seed missing");
    assert_eq!(read.as_str(), SEED_A);
}

#[test]
fn test_read_rejects_corrupt_content() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("seed.txt");
    std::fs::write(&path, "not a seed").expect("failed to write file");

    let store = SeedStore::new(path);
    let err = store.read().unwrap_err();
    assert!(matches!(err, CoreError::InvalidSeedFormat));
}
