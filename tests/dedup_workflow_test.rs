use fix_hooks::core::config::{ConfigManager, ConfigProvider, FixConfig};
use fix_hooks::{DedupEngine, DedupPattern, Document, dedup_lines};
use std::fs;
use tempfile::TempDir;

fn setup_root(file: &str, content: &str) -> (TempDir, ConfigManager) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(file), content).unwrap();
    let manager = ConfigManager::new_at(dir.path().to_path_buf());
    (dir, manager)
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_config_file_workflow() {
    let (td, manager) = setup_root("View.tsx", "a\nX\nb\nX\nc\n");

    // 1. Write a config pointing at the file
    let config = FixConfig::default()
        .with_target("View.tsx")
        .with_patterns(vec![DedupPattern::substring("X")]);
    manager.save_config(&config).unwrap();

    // 2. Run from the loaded config
    let loaded = manager.load_config().unwrap();
    let mut engine = DedupEngine::new(&manager, loaded).unwrap();
    let report = engine.process(false).unwrap();

    // 3. Only the first X survives
    assert_eq!(report.removed.len(), 1);
    let content = fs::read_to_string(td.path().join("View.tsx")).unwrap();
    assert_eq!(content, "a\nX\nb\nc\n");

    // 4. A second run finds nothing
    let mut engine = DedupEngine::new(&manager, manager.load_config().unwrap()).unwrap();
    let report = engine.process(false).unwrap();
    assert!(!report.has_duplicates());
    assert_eq!(fs::read_to_string(td.path().join("View.tsx")).unwrap(), content);
}

#[test]
fn test_crlf_and_unterminated_last_line_survive() {
    let original = "one\r\nhook\r\ntwo\r\nhook\r\nthree";
    let (td, manager) = setup_root("win.tsx", original);

    let config = FixConfig::default()
        .with_target("win.tsx")
        .with_patterns(vec![DedupPattern::substring("hook")]);
    let mut engine = DedupEngine::new(&manager, config).unwrap();
    engine.process(false).unwrap();

    let bytes = fs::read(td.path().join("win.tsx")).unwrap();
    assert_eq!(bytes, b"one\r\nhook\r\ntwo\r\nthree");
}

#[test]
fn test_direct_write_mode_matches_atomic() {
    let original = "h\nx\nh\n";
    let (td, manager) = setup_root("direct.tsx", original);
    fs::write(td.path().join("atomic.tsx"), original).unwrap();

    for (file, atomic) in [("direct.tsx", false), ("atomic.tsx", true)] {
        let mut config = FixConfig::default()
            .with_target(file)
            .with_patterns(vec![DedupPattern::substring("h")]);
        config.settings.atomic_write = atomic;
        DedupEngine::new(&manager, config)
            .unwrap()
            .process(false)
            .unwrap();
    }

    let direct = fs::read_to_string(td.path().join("direct.tsx")).unwrap();
    let atomic = fs::read_to_string(td.path().join("atomic.tsx")).unwrap();
    assert_eq!(direct, "h\nx\n");
    assert_eq!(direct, atomic);
}

#[test]
fn test_regex_pattern_from_cli_form() {
    let (td, manager) = setup_root(
        "View.tsx",
        "const [a, setA] = useState(0)\nuse(a)\nconst [a, setA] = useState( 0 )\n",
    );

    let config = FixConfig::default()
        .with_target("View.tsx")
        .with_patterns(vec![DedupPattern::parse(r"/const \[a, setA\] = useState\(\s*0\s*\)/")]);
    let report = DedupEngine::new(&manager, config)
        .unwrap()
        .process(false)
        .unwrap();

    assert_eq!(report.removed[0].line_number, 3);
    assert_eq!(
        fs::read_to_string(td.path().join("View.tsx")).unwrap(),
        "const [a, setA] = useState(0)\nuse(a)\n"
    );
}

#[test]
fn test_single_survivor_is_first_match() {
    let input = lines(&["p\n", "X-first\n", "q\n", "X-second\n", "X-third\n"]);
    let outcome = dedup_lines(&input, &DedupPattern::substring("X")).unwrap();

    let survivors: Vec<&String> = outcome.lines.iter().filter(|l| l.contains('X')).collect();
    assert_eq!(survivors, vec!["X-first\n"]);
    assert_eq!(outcome.lines.len(), 3);
}

#[test]
fn test_document_read_of_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Document::read(&dir.path().join("nope.tsx")).is_err());
}
