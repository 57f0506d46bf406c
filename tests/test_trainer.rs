use hmmtag::{estimate, quark::StringTable, Dataset, Error, HmmConfig, HmmModel, Trainer, TrainingPair};

fn simple() -> HmmModel {
    let ds = Dataset::from_files("tests/data/simple-train-tags.txt", "tests/data/simple-train-sentences.txt")
        .expect("failed to read training corpus");
    assert_eq!(ds.len(), 8, "read count mismatch");
    estimate(&ds.pairs, HmmConfig::default()).expect("failed to train")
}

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-12)
}

#[test]
fn alphabets() {
    let model = simple();
    assert_eq!(model.num_tags(), 9);
    assert_eq!(model.tags().to_str(model.start()), Some("#"));
    assert!(model.tokens().to_id("the").is_some());
    assert!(model.tokens().to_id("The").is_none());
}

#[test]
fn transitions() {
    let model = simple();
    assert!(close(model.transition("#", "DET"), (4.0f64 / 8.0).ln()));
    assert!(close(model.transition("#", "NP"), (2.0f64 / 8.0).ln()));
    assert!(close(model.transition("V", "DET"), (3.0f64 / 5.0).ln()));
    assert!(close(model.transition("V", "P"), (2.0f64 / 5.0).ln()));
    assert_eq!(model.transition("N", "V"), Some(0.0));
    assert_eq!(model.transition("N", "."), None);
    assert_eq!(model.transition("V", "."), None);
    assert_eq!(model.transition(".", "DET"), None);
}

#[test]
fn emissions() {
    let model = simple();
    assert_eq!(model.emission("DET", "the"), Some(0.0));
    assert!(close(model.emission("NP", "Jobs"), (2.0f64 / 3.0).ln()));
    assert!(close(model.emission("NP", "hanover"), (1.0f64 / 3.0).ln()));
    assert_eq!(model.emission(".", "."), Some(0.0));
    assert_eq!(model.emission("N", "the"), None);
}

#[test]
fn rows_sum_to_one() {
    let model = simple();
    for table in [model.transitions(), model.emissions()] {
        for (src, row) in table.rows() {
            if row.is_empty() {
                continue;
            }
            let mass = table.mass(src);
            assert!((mass - 1.0).abs() < 1e-9, "row {src} sums to {mass}");
        }
    }
}

#[test]
fn misaligned_pair() {
    let pairs = [
        TrainingPair::from_lines("N V", "dogs bark"),
        TrainingPair::from_lines("N V .", "cats sleep"),
    ];
    match estimate(&pairs, HmmConfig::default()) {
        Err(Error::MisalignedTrainingPair { index: 1, tags: 3, words: 2 }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn custom_markers() {
    let config = HmmConfig { start_tag: "<s>".into(), terminator: "</s>".into(), unseen_penalty: -50.0 };
    let mut trainer = Trainer::new(config.clone());
    trainer.append(&TrainingPair::from_lines("N V </s>", "dogs bark !")).unwrap();
    let model = trainer.train();
    assert_eq!(model.config(), &config);
    assert_eq!(model.transition("<s>", "N"), Some(0.0));
    assert_eq!(model.transition("V", "</s>"), None);
    assert_eq!(model.transition("#", "N"), None);
}

#[test]
fn retraining_builds_independent_models() {
    let first = estimate(&[TrainingPair::from_lines("A", "x")], HmmConfig::default()).unwrap();
    let second = estimate(&[TrainingPair::from_lines("B", "x")], HmmConfig::default()).unwrap();
    assert_eq!(first.transition("#", "A"), Some(0.0));
    assert_eq!(first.transition("#", "B"), None);
    assert_eq!(second.transition("#", "B"), Some(0.0));
    assert_eq!(second.transition("#", "A"), None);
}
