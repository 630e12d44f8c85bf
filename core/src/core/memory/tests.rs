use super::*;

#[test]
fn test_save_and_get() {
    let storage = MemoryStorage::new();
    let timer = Timer::new("tea", 1_700_000_000);

    let id = storage.save_timer(&timer).unwrap();

    assert_eq!(storage.get_timer(&id).unwrap(), timer);
    assert_eq!(storage.len(), 1);
}

#[test]
fn test_get_unknown_id() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    assert!(matches!(
        storage.get_timer("abcd1234"),
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        storage.get_timer("not an id"),
        Err(StorageError::NotFound)
    ));
}

#[test]
fn test_close_through_trait_object() {
    let storage: Box<dyn TimerStorage> = Box::new(MemoryStorage::new());
    storage.save_timer(&Timer::new("x", 1)).unwrap();
    storage.close();
}
