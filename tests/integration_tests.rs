use stipend_refs::{LocalStorage, RefError, ReferenceCollection, SaveOutcome, StudentReference, Validate};
use tempfile::TempDir;

const HEADER: &str = "№;дата;ФИО студента;размер стипендии;куда выдается справка";

fn write_data_file(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let mut content = format!("\u{feff}{}\n", HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.path().join("data.csv");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_three_rows_and_filter() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_data_file(
        &temp_dir,
        &[
            "1;01.09.2024;Иванов Иван;900;в военкомат",
            "2;02.09.2024;Петрова Анна;1500;по месту работы родителей",
            "3;03.09.2024;Смирнов Олег;2000;в банк",
        ],
    );

    let collection = ReferenceCollection::from_csv(&path).unwrap();
    assert_eq!(collection.len(), 3);

    let above: Vec<f64> = collection
        .filter_by_stipend(1000.0)
        .filter_map(|r| r.stipend())
        .collect();
    assert_eq!(above, vec![1500.0, 2000.0]);
    assert_eq!(collection.len(), 3);
}

#[test]
fn test_non_numeric_stipend_fails_whole_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_data_file(
        &temp_dir,
        &[
            "1;01.09.2024;Иванов Иван;900;в военкомат",
            "2;02.09.2024;Петрова Анна;полторы тысячи;по месту работы",
            "3;03.09.2024;Смирнов Олег;2000;в банк",
        ],
    );

    assert!(ReferenceCollection::from_csv(&path).is_none());

    let storage = LocalStorage::new(temp_dir.path());
    let err = ReferenceCollection::try_load(&storage, "data.csv").unwrap_err();
    assert!(matches!(err, RefError::ParseError { line: 3, .. }));
}

#[test]
fn test_missing_file_reports_no_collection() {
    let temp_dir = TempDir::new().unwrap();
    assert!(ReferenceCollection::from_csv(temp_dir.path().join("absent.csv")).is_none());

    let storage = LocalStorage::new(temp_dir.path());
    assert!(matches!(
        ReferenceCollection::try_load(&storage, "absent.csv"),
        Err(RefError::NotFoundError { .. })
    ));
}

#[test]
fn test_save_then_load_round_trip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let mut collection = ReferenceCollection::new();
    collection
        .add(
            StudentReference::builder()
                .id("10")
                .date("15.01.2025")
                .full_name("Ковалёва Дарья")
                .stipend(3150.75)
                .destination("в налоговую; по запросу")
                .build(),
        )
        .unwrap();
    collection
        .add(
            StudentReference::builder()
                .id("11")
                .date("16.01.2025")
                .full_name("Абрамов Пётр")
                .stipend(1800.0)
                .destination("в соцзащиту")
                .build(),
        )
        .unwrap();

    let path = temp_dir.path().join("out.csv");
    assert_eq!(collection.save_to_csv(&path), SaveOutcome::Written { rows: 2 });

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with("\u{feff}".as_bytes()));

    let reloaded = ReferenceCollection::from_csv(&path).unwrap();
    assert_eq!(reloaded, collection);
}

#[test]
fn test_saving_empty_collection_leaves_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.csv");

    assert_eq!(ReferenceCollection::new().save_to_csv(&path), SaveOutcome::NothingToSave);
    assert!(!path.exists());
}

#[test]
fn test_save_into_missing_directory_under_file_fails_softly() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let collection = ReferenceCollection::from_csv(write_data_file(
        &temp_dir,
        &["1;01.09.2024;Иванов Иван;900;в военкомат"],
    ))
    .unwrap();

    assert_eq!(collection.save_to_csv(blocker.join("out.csv")), SaveOutcome::Failed);
}

#[test]
fn test_sorting_after_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_data_file(
        &temp_dir,
        &[
            "1;01.09.2024;Смирнов Олег;2000;в банк",
            "2;02.09.2024;Иванов Иван;900;в военкомат",
            "3;03.09.2024;Петрова Анна;1500;по месту работы",
        ],
    );
    let mut collection = ReferenceCollection::from_csv(&path).unwrap();

    collection.sort_by("name");
    let names: Vec<&str> = collection.iter().filter_map(|r| r.full_name()).collect();
    assert_eq!(names, vec!["Иванов Иван", "Петрова Анна", "Смирнов Олег"]);

    collection.sort_by("stipend");
    let ids: Vec<String> = collection.iter().filter_map(|r| r.id().map(String::from)).collect();
    assert_eq!(ids, vec!["2", "3", "1"]);

    collection.sort_by("destination");
    let unchanged: Vec<&str> = collection.iter().filter_map(|r| r.id()).collect();
    assert_eq!(unchanged, ids);
}

#[test]
fn test_reference_missing_destination_fails_validation() {
    let reference = StudentReference::builder()
        .id("4")
        .date("04.09.2024")
        .full_name("Орлов Никита")
        .stipend(1200.0)
        .build();

    let err = reference.validate().unwrap_err();
    assert!(err.to_string().contains("destination"));

    let mut collection = ReferenceCollection::new();
    assert!(collection.add(reference).is_err());
    assert!(collection.is_empty());
}
