use std::{fs, path::PathBuf};

use categorical_bayes::{bayes::m_estimate, Delimiter, Error, Session, TrainConfig};
use tempfile::TempDir;

fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const TRAIN: &str = "\
Outlook Temp Humidity Wind Play
sunny   hot  high     weak   no
sunny   hot  high     strong no
overcast hot high     weak   yes
rain    mild high     weak   yes
rain    cool normal   weak   yes
rain    cool normal   strong no
overcast cool normal  strong yes
sunny   mild high     weak   no
sunny   cool normal   weak   yes
rain    mild normal   weak   yes
";

#[test]
fn conflicting_rows_are_dropped_before_priors() {
    let dir = TempDir::new().unwrap();
    let train = fixture(&dir, "train.txt", "weather,temp,play\nsunny,hot,yes\nsunny,hot,no\novercast,mild,yes\n");

    let mut session = Session::new();
    let model = session.train(&train, TrainConfig::new(Delimiter::Comma, 2)).unwrap();

    assert_eq!(model.classes().len(), 1);
    assert_eq!(model.prior("yes"), Some(1.0));
    assert_eq!(model.prior("no"), None);
}

#[test]
fn train_classify_evaluate() {
    let dir = TempDir::new().unwrap();
    let train = fixture(&dir, "train.txt", TRAIN);
    let test = fixture(
        &dir,
        "test.txt",
        "outlook temp humidity wind play\n\
         overcast mild high strong yes\n\
         sunny hot high weak no\n\
         rain cool normal weak yes\n",
    );
    let output = dir.path().join("report.csv");

    let mut session = Session::new();
    session.train(&train, TrainConfig::new(Delimiter::Space, 4)).unwrap();
    let labels: Vec<String> = session
        .classify(&test, Delimiter::Space)
        .unwrap()
        .predictions
        .iter()
        .map(|p| p.label.clone())
        .collect();
    assert_eq!(labels, ["yes", "no", "yes"]);

    let accuracy = session.evaluate(&output).unwrap();
    assert_eq!((accuracy.correct, accuracy.total), (3, 3));
    assert_eq!(accuracy.to_string(), "3/3 = 1");

    let report = fs::read_to_string(&output).unwrap();
    let mut lines = report.lines();
    assert_eq!(
        lines.next(),
        Some("outlook,temp,humidity,wind,play,predicted,score:no,score:yes")
    );
    let first: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(first[..6], ["overcast", "mild", "high", "strong", "yes", "yes"]);
    let scores = session.classification().unwrap().predictions[0].scores.clone();
    assert_eq!(first[6], scores[0].1.to_string());
    assert_eq!(first[7], scores[1].1.to_string());
    assert_eq!(lines.count(), 2);
}

#[test]
fn unseen_test_value_is_scored() {
    let dir = TempDir::new().unwrap();
    let train = fixture(&dir, "train.txt", TRAIN);
    let test = fixture(&dir, "test.txt", "outlook temp humidity wind play\nfoggy hot high weak no\n");

    let mut session = Session::new();
    session.train(&train, TrainConfig::new(Delimiter::Space, 4)).unwrap();
    let prediction = session.classify(&test, Delimiter::Space).unwrap().predictions[0].clone();

    let model = session.model().unwrap();
    let no = &model.classes()[0];
    assert_eq!(no.label(), "no");

    // outlook grows from {sunny, overcast, rain} to include "foggy".
    let expected = no.prior().ln()
        + m_estimate(no.count(), 4).ln()
        + model.conditional("no", 1, "hot").unwrap().ln()
        + model.conditional("no", 2, "high").unwrap().ln()
        + model.conditional("no", 3, "weak").unwrap().ln();
    assert!((prediction.scores[0].1 - expected).abs() < 1e-12);
    assert!(prediction.scores.iter().all(|(_, s)| s.is_finite()));
}

#[test]
fn repeated_runs_agree() {
    let dir = TempDir::new().unwrap();
    let train = fixture(&dir, "train.txt", TRAIN);
    let test = fixture(&dir, "test.txt", TRAIN);

    let run = || {
        let mut session = Session::new();
        session.train(&train, TrainConfig::new(Delimiter::Space, 4)).unwrap();
        let classification = session.classify(&test, Delimiter::Space).unwrap().clone();
        let accuracy = session.evaluate(dir.path().join("out.csv")).unwrap();
        (classification, accuracy)
    };

    assert_eq!(run(), run());
}

#[test]
fn bad_target_index_leaves_session_untouched() {
    let dir = TempDir::new().unwrap();
    let train = fixture(&dir, "train.txt", TRAIN);

    let mut session = Session::new();
    session.train(&train, TrainConfig::new(Delimiter::Space, 4)).unwrap();
    let before = session.model().cloned();

    let err = session.train(&train, TrainConfig::new(Delimiter::Space, 5)).unwrap_err();
    assert!(matches!(err, Error::TargetIndexOutOfRange { index: 5, attributes: 5 }));
    assert_eq!(session.model().cloned(), before);
}

#[test]
fn mismatched_test_header_is_rejected() {
    let dir = TempDir::new().unwrap();
    let train = fixture(&dir, "train.txt", TRAIN);
    let test = fixture(&dir, "test.txt", "outlook temp\nsunny hot\n");

    let mut session = Session::new();
    session.train(&train, TrainConfig::new(Delimiter::Space, 4)).unwrap();
    let err = session.classify(&test, Delimiter::Space).unwrap_err();

    assert!(matches!(err, Error::HeaderMismatch { expected: 5, found: 2 }));
    assert!(session.classification().is_none());
}

#[test]
fn retraining_discards_old_predictions() {
    let dir = TempDir::new().unwrap();
    let train = fixture(&dir, "train.txt", TRAIN);

    let mut session = Session::new();
    session.train(&train, TrainConfig::new(Delimiter::Space, 4)).unwrap();
    session.classify(&train, Delimiter::Space).unwrap();
    session.train(&train, TrainConfig::new(Delimiter::Space, 4)).unwrap();

    assert!(matches!(
        session.evaluate(dir.path().join("out.csv")),
        Err(Error::NotClassified)
    ));
}

#[test]
fn dropping_duplicates_changes_priors() {
    let dir = TempDir::new().unwrap();
    let train = fixture(
        &dir,
        "train.txt",
        "colour,size,label
red,big,yes
red,big,yes
red,big,yes
blue,small,no
",
    );

    let mut session = Session::new();
    let kept = session.train(&train, TrainConfig::new(Delimiter::Comma, 2)).unwrap();
    assert_eq!(kept.prior("yes"), Some(0.75));
    assert_eq!(kept.prior("no"), Some(0.25));

    let config = TrainConfig::new(Delimiter::Comma, 2).keep_duplicates(false);
    let collapsed = session.train(&train, config).unwrap();
    assert_eq!(collapsed.prior("yes"), Some(0.5));
    assert_eq!(collapsed.prior("no"), Some(0.5));
    assert_eq!(collapsed.classes()[0].count(), 1);
}
