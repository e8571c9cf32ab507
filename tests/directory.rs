use chrono::NaiveDate;
use lunchly::{
    Customer, CustomerDirectory, EmptyResults, Identity, NotFound, Reservation, ReservationBook,
    Store,
};

fn save(directory: &CustomerDirectory<'_>, first: &str, last: &str) -> Customer {
    let mut customer = Customer::new(first, last);
    directory.save(&mut customer).unwrap();
    customer
}

fn book(store: &Store, customer: &Customer, count: u32) {
    let book = ReservationBook::new(store);
    for hour in 0..count {
        let start = NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(10 + hour, 0, 0)
            .unwrap();
        let mut reservation = Reservation::new(customer.id().unwrap(), start, 2, None).unwrap();
        book.save(&mut reservation).unwrap();
    }
}

#[test]
fn insert_then_lookup_returns_the_same_fields() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);

    let mut customer = Customer::new("Ada", "Lovelace")
        .with_phone("555-0199")
        .with_notes("prefers booths");
    assert_eq!(customer.identity(), Identity::Unsaved);
    directory.save(&mut customer).unwrap();

    let id = customer.id().expect("save assigns an id");
    let other = save(&directory, "Alan", "Turing");
    assert_ne!(other.id(), Some(id));

    let fetched = directory.get_by_id(id).unwrap();
    assert_eq!(fetched.first_name, customer.first_name);
    assert_eq!(fetched.last_name, customer.last_name);
    assert_eq!(fetched.phone, customer.phone);
    assert_eq!(fetched.notes, customer.notes);
}

#[test]
fn update_is_a_full_overwrite() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    let mut customer = Customer::new("Ada", "Lovelace").with_notes("first visit");
    directory.save(&mut customer).unwrap();

    let mut edited = directory.get_by_id(customer.id().unwrap()).unwrap();
    edited.last_name = Some("King".into());
    edited.notes = None;
    directory.save(&mut edited).unwrap();

    let fetched = directory.get_by_id(customer.id().unwrap()).unwrap();
    assert_eq!(fetched, edited);
    assert_eq!(fetched.notes, None);
}

#[test]
fn list_is_sorted_regardless_of_insertion_order() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    for (first, last) in [("Yan", "Zhu"), ("Bob", "Allen"), ("Al", "Allen"), ("Cy", "Moss")] {
        save(&directory, first, last);
    }

    let names: Vec<_> = directory
        .list()
        .unwrap()
        .iter()
        .map(|c| c.full_name().unwrap())
        .collect();
    assert_eq!(names, vec!["Al Allen", "Bob Allen", "Cy Moss", "Yan Zhu"]);
}

#[test]
fn search_is_a_case_insensitive_substring_match() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    let smith = save(&directory, "John", "Smith");
    let smithson = save(&directory, "Smithson", "Lee");
    save(&directory, "John", "Doe");

    let mut ids: Vec<_> = directory
        .search("smith")
        .unwrap()
        .iter()
        .filter_map(Customer::id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![smith.id().unwrap(), smithson.id().unwrap()]);
}

#[test]
fn search_finds_customer_with_only_a_last_name() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    let mut customer = Customer::new("", "Lee");
    customer.first_name = None;
    directory.save(&mut customer).unwrap();

    let found = directory.search("lee").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), customer.id());
    assert_eq!(found[0].full_name(), None);
}

#[test]
fn search_without_match_is_not_found() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    save(&directory, "John", "Smith");

    match directory.search("zzz-nomatch") {
        Err(lunchly::DirectoryError::NotFound(NotFound::Search(query))) => {
            assert_eq!(query, "zzz-nomatch")
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn search_ignores_case_beyond_ascii() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    let emile = save(&directory, "Émile", "Zola");
    let sofia = save(&directory, "Σοφία", "Ωρ");

    assert_eq!(directory.search("Émile").unwrap(), vec![emile.clone()]);
    assert_eq!(directory.search("ÉMILE ZOLA").unwrap(), vec![emile]);
    assert_eq!(directory.search("σοφία").unwrap(), vec![sofia]);
}

#[test]
fn ranking_excludes_customers_without_reservations() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    let a = save(&directory, "Ann", "Able");
    let b = save(&directory, "Ben", "Best");
    let _c = save(&directory, "Cat", "Calm");
    book(&store, &a, 3);
    book(&store, &b, 1);

    let ranked = directory.top_ranked(10).unwrap();
    let ids: Vec<_> = ranked.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![a.id().unwrap(), b.id().unwrap()]);
}

#[test]
fn ranking_without_reservations_is_not_found() {
    let store = Store::open_in_memory().unwrap();
    let directory = CustomerDirectory::new(&store);
    assert!(matches!(
        directory.top_ten(),
        Err(lunchly::DirectoryError::NotFound(NotFound::Ranking))
    ));

    save(&directory, "Ann", "Able");
    save(&directory, "Ben", "Best");
    assert!(directory.top_ten().unwrap_err().is_not_found());

    let lenient = CustomerDirectory::new(&store).with_empty_results(EmptyResults::Allow);
    assert!(lenient.top_ten().unwrap().is_empty());
}

#[test]
fn separate_stores_are_isolated() {
    let first = Store::open_in_memory().unwrap();
    let second = Store::open_in_memory().unwrap();
    save(&CustomerDirectory::new(&first), "Ann", "Able");

    assert_eq!(CustomerDirectory::new(&first).list().unwrap().len(), 1);
    assert!(CustomerDirectory::new(&second).list().unwrap().is_empty());
}
