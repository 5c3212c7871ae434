use super::*;

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert_eq!(store.get("theme").unwrap(), None);
}

#[test]
fn memory_store_overwrites_values() {
    let store = MemoryStore::new();
    store.set("theme", "dark").unwrap();
    store.set("theme", "light").unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn memory_store_keys_are_independent() {
    let store = MemoryStore::new();
    store.set("a", "1").unwrap();
    assert_eq!(store.get("b").unwrap(), None);
}
