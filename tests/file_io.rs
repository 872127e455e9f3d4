use phui_miner::{Database, PhmConfig, PhmError, PhmMiner};
use std::fs;
use tempfile::tempdir;

const DATABASE: &str = "\
# a=1 b=2 c=3
1 2:10:5 5
1 3:6:3 3
2 3:8:4 4
@ metadata lines do not count as transactions
1 2 3:12:4 4 4
1 2:9:4 5
";

fn config() -> PhmConfig {
    PhmConfig::new(15)
        .with_periodicity(1, 5)
        .with_average_periodicity(1.0, 5.0)
        .with_length(1, 3)
}

#[test]
fn test_mine_file_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("db.txt");
    let output = dir.path().join("phuis.txt");
    fs::write(&input, DATABASE).unwrap();

    let stats = PhmMiner::new(config()).mine_file(&input, &output).unwrap();
    assert_eq!(stats.database_size, 5);
    assert_eq!(stats.phui_count, 4);

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.contains(&"1 2 #UTIL: 27 #SUP: 3 #MINPER: 1 #MAXPER: 3 #AVGPER: 1.25"));
    assert!(lines.contains(&"1 #UTIL: 16 #SUP: 4 #MINPER: 1 #MAXPER: 2 #AVGPER: 1"));
    // c has the lowest TWU, so it comes first
    assert!(lines.iter().any(|line| line.starts_with("3 2 #UTIL: 16")));
}

#[test]
fn test_file_and_memory_databases_agree() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("db.txt");
    fs::write(&input, DATABASE).unwrap();

    let from_file = Database::open(&input).unwrap();
    assert_eq!(from_file.len(), 5);
    assert_eq!(from_file.transactions()[3].transaction_utility(), 12);

    let miner = PhmMiner::new(config());
    let (phuis, _) = miner.mine_to_collection(&from_file).unwrap();
    assert_eq!(phuis.utility_of(&[1, 2]), Some(27));
    assert_eq!(phuis.utility_of(&[2, 3]), Some(16));
}

#[test]
fn test_parse_error_aborts_before_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.txt");
    let output = dir.path().join("phuis.txt");
    fs::write(&input, "1 2:10:5 5\n1 3:six:3 3\n").unwrap();

    let err = PhmMiner::new(config()).mine_file(&input, &output).unwrap_err();
    assert!(matches!(err, PhmError::Parse { line: 2, .. }));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = PhmMiner::new(config())
        .mine_file(dir.path().join("missing.txt"), dir.path().join("out.txt"))
        .unwrap_err();
    assert!(matches!(err, PhmError::Io(_)));
}
