use hmmtag::{estimate, evaluate, Accuracy, Dataset, HmmConfig, HmmModel};

#[test]
fn simple_corpus() {
    let train = Dataset::from_files("tests/data/simple-train-tags.txt", "tests/data/simple-train-sentences.txt")
        .expect("failed to read training corpus");
    let test = Dataset::from_files("tests/data/simple-test-tags.txt", "tests/data/simple-test-sentences.txt")
        .expect("failed to read test corpus");
    let model = estimate(&train.pairs, HmmConfig::default()).expect("failed to train");
    let evaluation = evaluate(&model, &test.gold()).expect("failed to evaluate");
    let acc = evaluation.accuracy();
    assert_eq!((acc.matches, acc.mismatches), (8, 2));
    assert!((acc.percent - 80.0).abs() < 1e-9, "{}", acc.percent);
    assert_eq!(evaluation.truncated(), 0);
    assert_eq!(evaluation.num_sequences(), 2);
    // every miss is the sentence-final "."
    let stop = evaluation.label(".").expect("no measure for '.'");
    assert_eq!((stop.num_correct, stop.num_prediction, stop.num_observation), (0, 0, 2));
    println!("{}", evaluation);
}

#[test]
fn one_of_two() {
    let model = HmmModel::from_log_probs(
        HmmConfig::default(),
        &[("#", "Noun", 0.0), ("Noun", "Adjective", 0.0)],
        &[("Noun", "book", 0.0), ("Adjective", "good", 0.0)],
    );
    let gold = vec![(vec!["Noun".to_string(), "Verb".to_string()], "book good".to_string())];
    let evaluation = evaluate(&model, &gold).unwrap();
    assert_eq!(evaluation.accuracy(), Accuracy { matches: 1, mismatches: 1, percent: 50.0 });
}

#[test]
fn gold_longer_than_sentence() {
    let model = HmmModel::sample();
    let gold = vec![(
        vec!["Verb".to_string(), "Adjective".to_string(), "Noun".to_string()],
        "read interesting".to_string(),
    )];
    let evaluation = evaluate(&model, &gold).unwrap();
    assert_eq!(evaluation.matches(), 2);
    assert_eq!(evaluation.mismatches(), 0);
    assert_eq!(evaluation.truncated(), 1);
    assert_eq!(evaluation.accuracy().percent, 100.0);
}

#[test]
fn json_summary() {
    let acc = Accuracy { matches: 3, mismatches: 1, percent: 75.0 };
    let v = serde_json::to_value(acc).unwrap();
    assert_eq!(v, serde_json::json!({"matches": 3, "mismatches": 1, "percent": 75.0}));
}
