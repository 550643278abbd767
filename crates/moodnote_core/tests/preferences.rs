use moodnote_core::db::open_db_in_memory;
use moodnote_core::{PreferenceRepository, RepoError, SqlitePreferenceRepository};

#[test]
fn fresh_database_is_first_run_without_name() {
    let mut conn = open_db_in_memory().unwrap();
    let prefs = SqlitePreferenceRepository::try_new(&mut conn).unwrap();

    assert!(prefs.is_first_run().unwrap());
    assert_eq!(prefs.display_name().unwrap(), None);
}

#[test]
fn saving_name_clears_first_run_and_clearing_restores_it() {
    let mut conn = open_db_in_memory().unwrap();
    let mut prefs = SqlitePreferenceRepository::try_new(&mut conn).unwrap();

    prefs.save_display_name("  Ada ").unwrap();
    assert_eq!(prefs.display_name().unwrap().as_deref(), Some("Ada"));
    assert!(!prefs.is_first_run().unwrap());

    prefs.save_display_name("Grace").unwrap();
    assert_eq!(prefs.display_name().unwrap().as_deref(), Some("Grace"));

    prefs.clear_display_name().unwrap();
    assert_eq!(prefs.display_name().unwrap(), None);
    assert!(prefs.is_first_run().unwrap());
}

#[test]
fn blank_name_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let mut prefs = SqlitePreferenceRepository::try_new(&mut conn).unwrap();

    let err = prefs.save_display_name("   ").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(prefs.is_first_run().unwrap());
}
