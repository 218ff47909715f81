//! Property-based tests for the codec.

use huffpack_core::{
    codec::{decode, encode, Analysis},
    container::parse_container,
    FrequencyTable,
};
use proptest::prelude::*;

/// Non-empty text without the two symbols the container cannot record.
fn representable_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[^:\n]{1,200}",
        "[ab ]{1,64}",
        proptest::collection::vec(any::<char>().prop_filter("delimiter", |c| *c != ':' && *c != '\n'), 1..100)
            .prop_map(|chars: Vec<char>| chars.into_iter().collect::<String>()),
    ]
}

proptest! {
    #[test]
    fn test_round_trip(text in representable_text()) {
        let container = encode(&text)?;
        prop_assert_eq!(decode(&container)?, text);
    }

    #[test]
    fn test_prefix_free(text in representable_text()) {
        let analysis = Analysis::of(&text)?;
        prop_assert!(analysis.codes.is_prefix_free());
        prop_assert!(analysis.codes.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn test_size_bound(text in representable_text()) {
        let container = parse_container(&encode(&text)?)?;
        prop_assert!(container.payload.len() * 8 <= 8 * text.len());
        prop_assert!(Analysis::of(&text)?.encoded_bits() <= 8 * text.len() as u64);
    }

    #[test]
    fn test_deterministic(text in representable_text()) {
        prop_assert_eq!(encode(&text)?, encode(&text)?);
    }

    #[test]
    fn test_frequency_fidelity(text in ".{0,200}") {
        let table = FrequencyTable::from_text(&text);
        prop_assert_eq!(table.total(), text.chars().count() as u64);
    }

    #[test]
    fn test_tree_shape(text in representable_text()) {
        let analysis = Analysis::of(&text)?;
        let distinct = analysis.frequencies.len();
        prop_assert_eq!(analysis.tree.leaf_count(), distinct);
        prop_assert_eq!(analysis.tree.internal_count(), distinct - 1);
        prop_assert_eq!(analysis.tree.weight(), analysis.frequencies.total());
    }
}
