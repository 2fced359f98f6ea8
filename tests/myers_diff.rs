use fake::Fake;
use fake::faker::lorem::en::Words;
use pretty_assertions::assert_eq;
use riff::{Delta, MyersDiff, Patch};
use rstest::{fixture, rstest};

fn edit_cost<T>(patch: &Patch<T>) -> usize {
    patch
        .deltas()
        .iter()
        .map(|delta| delta.original().size() + delta.revised().size())
        .sum()
}

#[fixture]
fn generated_document() -> Vec<String> {
    Words(30..40).fake()
}

#[rstest]
fn applying_the_patch_reconstructs_the_revised_document(generated_document: Vec<String>) {
    let original = generated_document;

    // Rework the document at the head, the middle and the end.
    let mut revised: Vec<String> = original[1..].to_vec();
    let middle = revised.len() / 2;
    revised[middle] = format!("{} reworked", revised[middle]);
    revised.push("appended line".to_string());
    revised.push("another appended line".to_string());

    let patch = MyersDiff::new().diff(&original, &revised).unwrap();

    assert_eq!(patch.apply_to(&original).unwrap(), revised);
    assert_eq!(patch.restore(&revised).unwrap(), original);
}

#[rstest]
fn equal_documents_yield_an_empty_patch(generated_document: Vec<String>) {
    let patch = MyersDiff::new()
        .diff(&generated_document, &generated_document)
        .unwrap();

    assert!(patch.is_empty());
}

#[rstest]
#[case(vec![], vec!["x"], 1)]
#[case(vec!["x"], vec![], 1)]
#[case(vec!["a", "b", "c", "d"], vec!["a", "x", "c", "d"], 2)]
#[case(vec!["a", "b", "c"], vec!["x", "y", "z"], 6)]
#[case(vec!["a"], vec!["a", "b"], 1)]
#[case(vec!["a", "b", "c", "a", "b", "b", "a"], vec!["c", "b", "a", "b", "a", "c"], 5)]
fn edit_cost_is_the_shortest_edit_distance(
    #[case] original: Vec<&str>,
    #[case] revised: Vec<&str>,
    #[case] expected_cost: usize,
) {
    let patch = MyersDiff::new().diff(&original, &revised).unwrap();

    assert_eq!(edit_cost(&patch), expected_cost);
    assert_eq!(patch.apply_to(&original).unwrap(), revised);
}

#[rstest]
#[case(vec![], vec!["x"], 1)]
#[case(vec!["a", "b", "c", "a", "b", "b", "a"], vec!["c", "b", "a", "b", "a", "c"], 5)]
#[case(vec!["a", "b", "c"], vec!["x", "y", "z"], 6)]
fn edit_cost_is_symmetric(
    #[case] original: Vec<&str>,
    #[case] revised: Vec<&str>,
    #[case] expected_cost: usize,
) {
    let engine = MyersDiff::new();

    let forward = engine.diff(&original, &revised).unwrap();
    let backward = engine.diff(&revised, &original).unwrap();

    assert_eq!(edit_cost(&forward), expected_cost);
    assert_eq!(edit_cost(&forward), edit_cost(&backward));
}

#[rstest]
fn deltas_are_ordered_and_non_overlapping(generated_document: Vec<String>) {
    let original = generated_document;
    let mut revised = original.clone();
    revised.remove(2);
    revised.insert(5, "inserted".to_string());
    revised[10] = "changed".to_string();
    revised.remove(revised.len() - 3);

    let patch = MyersDiff::new().diff(&original, &revised).unwrap();

    let mut consumed = 0usize;
    for delta in patch.deltas() {
        let chunk = delta.original();
        assert!(chunk.position() >= consumed);
        consumed = chunk.position() + chunk.size();
    }
}

#[rstest]
fn delta_variants_follow_their_chunk_sizes(generated_document: Vec<String>) {
    let original = generated_document;
    let mut revised = original.clone();
    revised.remove(0);
    revised.insert(4, "inserted".to_string());
    revised[8] = "changed".to_string();

    let patch = MyersDiff::new().diff(&original, &revised).unwrap();

    assert!(!patch.is_empty());
    for delta in patch.deltas() {
        match delta {
            Delta::Insert { .. } => {
                assert!(delta.original().is_empty());
                assert!(!delta.revised().is_empty());
            }
            Delta::Delete { .. } => {
                assert!(!delta.original().is_empty());
                assert!(delta.revised().is_empty());
            }
            Delta::Change { .. } => {
                assert!(!delta.original().is_empty());
                assert!(!delta.revised().is_empty());
            }
        }
    }
}

#[rstest]
fn same_inputs_always_yield_the_same_patch(generated_document: Vec<String>) {
    let original = generated_document;
    let mut revised = original.clone();
    revised[3] = "changed".to_string();
    revised.remove(7);

    let engine = MyersDiff::new();

    let first = engine.diff(&original, &revised).unwrap();
    let second = engine.diff(&original, &revised).unwrap();

    assert_eq!(first, second);
}

#[rstest]
fn custom_equalizer_overrides_structural_equality() {
    let original = vec!["Alpha".to_string(), "Beta".to_string()];
    let revised = vec!["alpha".to_string(), "beta".to_string()];

    let engine: MyersDiff<String> =
        MyersDiff::with_equalizer(Box::new(|a, b| a.eq_ignore_ascii_case(b)));

    let patch = engine.diff(&original, &revised).unwrap();

    assert!(patch.is_empty());
}

#[rstest]
fn engine_instance_is_reusable() {
    let engine = MyersDiff::new();

    let first = engine.diff(&["a"], &["b"]).unwrap();
    let second = engine.diff(&["x", "y"], &["x", "y", "z"]).unwrap();

    assert_eq!(edit_cost(&first), 2);
    assert_eq!(edit_cost(&second), 1);
}
