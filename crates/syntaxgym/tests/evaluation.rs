#![allow(missing_docs)]

use std::fs;

use syntaxgym::{
    SyntaxGymError,
    alignment::{AlignmentDiagnostic, AlignmentOptions, DesyncPolicy},
    metrics::Metric,
    prediction::{accuracy, write_prediction_results},
    spec::ModelSpec,
    suite::{Suite, write_region_table},
    surprisals::{AggregateOptions, SurprisalRow, SurprisalTable, aggregate_surprisals},
};

const AGREEMENT_SUITE: &str = r#"{
    "meta": {"name": "number_agreement", "metric": "sum", "author": "test"},
    "region_meta": {"1": "subject", "2": "verb", "3": "end"},
    "predictions": [{"type": "formula", "formula": "(2;%mismatch%) > (2;%match%)"}],
    "items": [
        {"item_number": 1, "conditions": [
            {"condition_name": "match", "regions": [
                {"region_number": 1, "content": "The keys"},
                {"region_number": 2, "content": "are"},
                {"region_number": 3, "content": "here."}
            ]},
            {"condition_name": "mismatch", "regions": [
                {"region_number": 1, "content": "The keys"},
                {"region_number": 2, "content": "is"},
                {"region_number": 3, "content": "here."}
            ]}
        ]},
        {"item_number": 2, "conditions": [
            {"condition_name": "match", "regions": [
                {"region_number": 1, "content": "The dog"},
                {"region_number": 2, "content": "is"},
                {"region_number": 3, "content": "here."}
            ]},
            {"condition_name": "mismatch", "regions": [
                {"region_number": 1, "content": "The dog"},
                {"region_number": 2, "content": "are"},
                {"region_number": 3, "content": "here."}
            ]}
        ]}
    ]
}"#;

const WORD_SPEC: &str = r#"{
    "name": "lmzoo-basic-eos",
    "ref_url": "",
    "image": {"maintainer": "nobody", "gpu": {"required": false}},
    "vocabulary": {
        "unk_types": ["<unk>"],
        "prefix_types": [""],
        "suffix_types": ["<eos>"],
        "special_types": [],
        "items": []
    },
    "tokenizer": {"type": "word", "cased": true}
}"#;

fn agreement_surprisals() -> Vec<Vec<(&'static str, f64)>> {
    vec![
        vec![
            ("The", 0.5),
            ("keys", 7.0),
            ("are", 2.0),
            ("here", 3.0),
            (".", 1.0),
            ("<eos>", 0.25),
        ],
        vec![
            ("The", 0.5),
            ("keys", 7.0),
            ("is", 6.0),
            ("here", 3.5),
            (".", 1.0),
            ("<eos>", 0.25),
        ],
        vec![
            ("The", 0.5),
            ("dog", 6.0),
            ("is", 1.5),
            ("here", 3.0),
            (".", 1.0),
            ("<eos>", 0.25),
        ],
        vec![
            ("The", 0.5),
            ("dog", 6.0),
            ("are", 1.0),
            ("here", 3.0),
            (".", 1.0),
            ("<eos>", 0.25),
        ],
    ]
}

fn agreement_tsv() -> String {
    let mut tsv = String::from("sentence_id\ttoken_id\ttoken\tsurprisal\n");
    for (s_idx, sentence) in agreement_surprisals().iter().enumerate() {
        for (t_idx, (token, surprisal)) in sentence.iter().enumerate() {
            tsv.push_str(&format!("{}\t{t_idx}\t{token}\t{surprisal}\n", s_idx + 1));
        }
    }
    tsv
}

#[test]
fn end_to_end_from_files() {
    let dir = tempdir::TempDir::new("syntaxgym").unwrap();
    let suite_path = dir.path().join("suite.json");
    let spec_path = dir.path().join("spec.json");
    let surprisals_path = dir.path().join("surprisals.tsv");
    fs::write(&suite_path, AGREEMENT_SUITE).unwrap();
    fs::write(&spec_path, WORD_SPEC).unwrap();
    fs::write(&surprisals_path, agreement_tsv()).unwrap();

    let suite = Suite::from_path(&suite_path).unwrap();
    let spec = ModelSpec::from_path(&spec_path).unwrap();
    let table = SurprisalTable::from_path(&surprisals_path).unwrap();
    assert_eq!(table.sentence_count(), suite.sentence_count());

    let tokens = table.token_lists();
    let out = aggregate_surprisals(&suite, &table, &tokens, &spec, &AggregateOptions::default())
        .unwrap();
    assert!(out.diagnostics.is_empty());
    assert_eq!(out.suite.meta.model.as_deref(), Some("lmzoo-basic-eos"));

    let sums = |item: usize, condition: usize| -> Vec<Option<f64>> {
        out.suite.items[item].conditions[condition]
            .regions
            .iter()
            .map(|r| r.value(Metric::Sum))
            .collect()
    };
    assert_eq!(sums(0, 0), vec![Some(7.5), Some(2.0), Some(4.25)]);
    assert_eq!(sums(0, 1), vec![Some(7.5), Some(6.0), Some(4.75)]);
    assert_eq!(sums(1, 1), vec![Some(6.5), Some(1.0), Some(4.25)]);

    let results = out.suite.evaluate_predictions().unwrap();
    assert_eq!(
        results.iter().map(|r| (r.item_number, r.result)).collect::<Vec<_>>(),
        vec![(1, true), (2, false)]
    );
    assert_eq!(accuracy(&results), Some(0.5));

    let results_path = dir.path().join("results.tsv");
    write_prediction_results(&results, fs::File::create(&results_path).unwrap()).unwrap();
    assert_eq!(
        fs::read_to_string(&results_path).unwrap(),
        "suite\tprediction_id\titem_number\tresult\n\
         number_agreement\t0\t1\ttrue\n\
         number_agreement\t0\t2\tfalse\n"
    );

    // The aggregated suite keeps its values through a save and reload.
    let saved_path = dir.path().join("aggregated.json");
    out.suite.save(&saved_path).unwrap();
    let reloaded = Suite::from_path(&saved_path).unwrap();
    assert_eq!(reloaded, out.suite);
    assert_eq!(reloaded.meta.extra["author"], "test");
    assert_eq!(reloaded.evaluate_predictions().unwrap(), results);

    let mut region_tsv = Vec::new();
    write_region_table(&reloaded.region_rows(None), &mut region_tsv).unwrap();
    let region_tsv = String::from_utf8(region_tsv).unwrap();
    assert!(region_tsv.starts_with(
        "item_number\tcondition_name\tregion_number\tcontent\tmetric_value\toovs\n"
    ));
    assert!(region_tsv.contains("1\tmatch\t3\there.\t4.25\t\n"));
}

#[test]
fn aggregation_is_deterministic_and_pure() {
    let suite = Suite::from_json_str(AGREEMENT_SUITE).unwrap();
    let spec = ModelSpec::from_json_str(WORD_SPEC).unwrap();
    let table = SurprisalTable::from_sentences(&agreement_surprisals()).unwrap();
    let tokens = table.token_lists();

    let suite_before = suite.clone();
    let table_before = table.clone();

    let options = AggregateOptions::default();
    let first = aggregate_surprisals(&suite, &table, &tokens, &spec, &options).unwrap();
    let second = aggregate_surprisals(&suite, &table, &tokens, &spec, &options).unwrap();
    let sequential = aggregate_surprisals(
        &suite,
        &table,
        &tokens,
        &spec,
        &options.with_parallel(false),
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, sequential);
    assert_eq!(suite, suite_before);
    assert_eq!(table, table_before);
    assert!(suite.items[0].conditions[0].regions[0].metric_value.is_none());
}

#[test]
fn corrupted_table_token_is_a_mismatch() {
    let suite = Suite::from_json_str(AGREEMENT_SUITE).unwrap();
    let spec = ModelSpec::from_json_str(WORD_SPEC).unwrap();
    let clean = SurprisalTable::from_sentences(&agreement_surprisals()).unwrap();
    let tokens = clean.token_lists();

    let rows: Vec<SurprisalRow> = clean
        .rows()
        .iter()
        .cloned()
        .map(|mut row| {
            if row.sentence_id == 1 && row.token == "are" {
                row.token = "aer".to_string();
            }
            row
        })
        .collect();
    let corrupted = SurprisalTable::from_rows(rows).unwrap();

    match aggregate_surprisals(&suite, &corrupted, &tokens, &spec, &Default::default()) {
        Err(SyntaxGymError::TokenMismatch {
            expected,
            found,
            sentence,
            position,
        }) => {
            assert_eq!(expected, "are");
            assert_eq!(found, "aer");
            assert_eq!(sentence, 1);
            assert_eq!(position, 2);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

const SUBORDINATION_SUITE: &str = r#"{
    "meta": {"name": "subordination_orc-orc", "metric": "sum", "comment": ""},
    "region_meta": {
        "1": "Subordinate clause 1",
        "2": "subj_modifier",
        "3": "Subordinate clause 2",
        "4": "obj_modifier",
        "5": "Main clause"
    },
    "predictions": [],
    "items": [{"item_number": 1, "conditions": [
        {"condition_name": "sub_no-matrix", "regions": [
            {"region_number": 1, "content": "After the man"},
            {"region_number": 2, "content": "who a friend had helped"},
            {"region_number": 3, "content": "shot the bird"},
            {"region_number": 4, "content": "that he had been tracking secretly"},
            {"region_number": 5, "content": "."}
        ]}
    ]}]
}"#;

// Columns are separated by a mix of tabs and space runs.
const SUBORDINATION_TSV: &str = "sentence_id\ttoken_id\ttoken\tsurprisal
1\t1            After   0.000000
1\t1              the   1.313512
1\t2              man   8.334731
1\t3              who   2.795280
1\t4                a   7.305301
1\t5           friend   3.945270
1\t6              had   2.615330
1\t7           helped   6.455917
1\t8             shot  10.508051
1\t9              the   2.094278
1\t10            bird   7.991671
1\t11            that   5.653132
1\t12              he   2.296663
1\t13             had   2.178579
1\t14            been   2.163770
1\t15        tracking   9.606250
1\t16        secretly  10.261303
1\t17               .   1.194046
1\t18           <eos>   0.007771
";

const SUBORDINATION_TOKENS: &str =
    "After the man who a friend had helped shot the bird that he had been tracking secretly . <eos>";

fn close(
    a: f64,
    b: f64,
) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn eos_attaches_to_the_last_region() {
    let suite = Suite::from_json_str(SUBORDINATION_SUITE).unwrap();
    let spec = ModelSpec::from_json_str(WORD_SPEC).unwrap();
    let table = SurprisalTable::from_reader(SUBORDINATION_TSV.as_bytes()).unwrap();
    let tokens = vec![SUBORDINATION_TOKENS.split(' ').collect::<Vec<_>>()];

    let out = aggregate_surprisals(&suite, &table, &tokens, &spec, &Default::default()).unwrap();
    let regions = &out.suite.items[0].conditions[0].regions;

    let sum = |idx: usize| regions[idx].value(Metric::Sum).unwrap();
    assert!(close(sum(0), 0.0 + 1.313512 + 8.334731));
    assert!(close(sum(4), 1.194046 + 0.007771));

    let total: f64 = table.rows().iter().map(|r| r.surprisal).sum();
    let aggregated: f64 = (0..regions.len()).map(sum).sum();
    assert!(close(total, aggregated));
}

#[test]
fn tokenization_too_short_or_too_long() {
    let suite = Suite::from_json_str(SUBORDINATION_SUITE).unwrap();
    let spec = ModelSpec::from_json_str(WORD_SPEC).unwrap();
    let table = SurprisalTable::from_reader(SUBORDINATION_TSV.as_bytes()).unwrap();

    // Missing the final <eos>.
    let short = SUBORDINATION_TOKENS.trim_end_matches(" <eos>");
    let tokens = vec![short.split(' ').collect::<Vec<_>>()];
    assert!(matches!(
        aggregate_surprisals(&suite, &table, &tokens, &spec, &Default::default()),
        Err(SyntaxGymError::Shape(_))
    ));

    // The table is missing "helped".
    let rows: Vec<SurprisalRow> = table
        .rows()
        .iter()
        .filter(|r| r.token != "helped")
        .cloned()
        .collect();
    let shorter_table = SurprisalTable::from_rows(rows).unwrap();
    let tokens = vec![SUBORDINATION_TOKENS.split(' ').collect::<Vec<_>>()];
    assert!(matches!(
        aggregate_surprisals(&suite, &shorter_table, &tokens, &spec, &Default::default()),
        Err(SyntaxGymError::Shape(_))
    ));

    // One suite sentence, two token lists.
    let tokens = vec![tokens[0].clone(), tokens[0].clone()];
    assert!(matches!(
        aggregate_surprisals(&suite, &table, &tokens, &spec, &Default::default()),
        Err(SyntaxGymError::Shape(_))
    ));
}

#[test]
fn misspelled_tokenization_is_rejected() {
    let suite = Suite::from_json_str(SUBORDINATION_SUITE).unwrap();
    let spec = ModelSpec::from_json_str(WORD_SPEC).unwrap();
    let table = SurprisalTable::from_reader(SUBORDINATION_TSV.as_bytes()).unwrap();

    // Both the tokens and the table agree on a word the suite does not contain.
    let rows: Vec<SurprisalRow> = table
        .rows()
        .iter()
        .cloned()
        .map(|mut row| {
            if row.token == "helped" {
                row.token = "hAAAlped".to_string();
            }
            row
        })
        .collect();
    let table = SurprisalTable::from_rows(rows).unwrap();
    let tokens = table.token_lists();

    match aggregate_surprisals(&suite, &table, &tokens, &spec, &Default::default()) {
        Err(SyntaxGymError::Sentence {
            item_number,
            condition_name,
            source,
        }) => {
            assert_eq!(item_number, 1);
            assert_eq!(condition_name, "sub_no-matrix");
            match *source {
                SyntaxGymError::Desync {
                    token, position, ..
                } => {
                    assert_eq!(token, "hAAAlped");
                    assert_eq!(position, 7);
                }
                other => panic!("unexpected: {other:?}"),
            }
        }
        other => panic!("unexpected: {other:?}"),
    }

    let lenient = AggregateOptions::default()
        .with_alignment(AlignmentOptions::default().with_desync(DesyncPolicy::Resync));
    let out = aggregate_surprisals(&suite, &table, &tokens, &spec, &lenient).unwrap();
    assert_eq!(out.diagnostics.len(), 1);
    assert!(matches!(
        &out.diagnostics[0].diagnostic,
        AlignmentDiagnostic::Desync { token, .. } if token == "hAAAlped"
    ));
}

#[test]
fn uncased_model_with_dropped_punctuation() {
    let suite = Suite::from_json_str(
        r#"{
            "meta": {"name": "quotes", "metric": ["sum", "mean"]},
            "items": [{"item_number": 1, "conditions": [
                {"condition_name": "plain", "regions": [
                    {"region_number": 1, "content": "\"Hello,\""},
                    {"region_number": 2, "content": "she said"},
                    {"region_number": 3, "content": "."}
                ]}
            ]}]
        }"#,
    )
    .unwrap();
    let spec = ModelSpec::from_json_str(
        r#"{
            "vocabulary": {"unk_types": ["<unk>"]},
            "tokenizer": {"cased": false, "drop_token_pattern": "[^\\w\\s]+"}
        }"#,
    )
    .unwrap();
    let table =
        SurprisalTable::from_sentences(&[vec![("hello", 1.0), ("she", 2.0), ("said", 3.0)]])
            .unwrap();

    let out =
        aggregate_surprisals(&suite, &table, &table.token_lists(), &spec, &Default::default())
            .unwrap();
    let regions = &out.suite.items[0].conditions[0].regions;

    assert_eq!(regions[0].value(Metric::Sum), Some(1.0));
    assert_eq!(regions[1].value(Metric::Sum), Some(5.0));
    assert_eq!(regions[1].value(Metric::Mean), Some(2.5));
    assert_eq!(regions[2].value(Metric::Sum), Some(0.0));
    assert_eq!(regions[2].value(Metric::Mean), None);
    assert!(out.diagnostics.is_empty());
}

fn tolerance_suite(
    a: f64,
    b: f64,
) -> Suite {
    Suite::from_json_str(&format!(
        r#"{{
            "meta": {{"name": "tolerance"}},
            "predictions": [{{"type": "formula", "formula": "(1;%a%) = (1;%b%)"}}],
            "items": [{{"item_number": 1, "conditions": [
                {{"condition_name": "a", "regions": [
                    {{"region_number": 1, "content": "x", "metric_value": {{"sum": {a}}}}}
                ]}},
                {{"condition_name": "b", "regions": [
                    {{"region_number": 1, "content": "x", "metric_value": {{"sum": {b}}}}}
                ]}}
            ]}}]
        }}"#
    ))
    .unwrap()
}

#[test]
fn equality_is_tolerant() {
    let results = tolerance_suite(18.0, 18.0 + 1e-4)
        .evaluate_predictions()
        .unwrap();
    assert!(results[0].result);

    let results = tolerance_suite(18.0, 18.1).evaluate_predictions().unwrap();
    assert!(!results[0].result);
}

#[test]
fn predictions_need_aggregated_values() {
    let suite = Suite::from_json_str(AGREEMENT_SUITE).unwrap();
    assert!(matches!(
        suite.evaluate_predictions(),
        Err(SyntaxGymError::MissingRegionValue { region_number: 2, .. })
    ));
}
