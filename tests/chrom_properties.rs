//! Property-based tests for chromosome name normalization

use annotab::core::{
    chrom_id_from_int, chrom_to_id, id_to_chrom, normalize_chrom, ChromError, ChromNotation,
};
use proptest::prelude::*;

/// Generate a valid canonical chromosome id
fn arb_chrom_id() -> impl Strategy<Value = u8> {
    1u8..=25
}

/// Generate a valid chromosome spelling in any accepted style
fn arb_chrom_spelling() -> impl Strategy<Value = (String, u8)> {
    prop_oneof![
        (1u8..=22).prop_map(|n| (n.to_string(), n)),
        (1u8..=22).prop_map(|n| (format!("chr{}", n), n)),
        Just(("X".to_string(), 23)),
        Just(("chrX".to_string(), 23)),
        Just(("Y".to_string(), 24)),
        Just(("chrY".to_string(), 24)),
        Just(("MT".to_string(), 25)),
        Just(("chrM".to_string(), 25)),
        Just(("mito".to_string(), 25)),
    ]
}

proptest! {
    /// Round trip: rendering a canonical id in either notation and
    /// parsing it back yields the same id.
    #[test]
    fn prop_round_trip(id in arb_chrom_id()) {
        for notation in [ChromNotation::Ucsc, ChromNotation::GenomeReference] {
            let name = id_to_chrom(id, notation).unwrap();
            prop_assert_eq!(chrom_to_id(&name).unwrap(), id);
        }
    }

    /// Every accepted spelling resolves to its expected id.
    #[test]
    fn prop_spellings_resolve((name, expected) in arb_chrom_spelling()) {
        prop_assert_eq!(chrom_to_id(&name).unwrap(), expected);
    }

    /// Surrounding whitespace never changes the result.
    #[test]
    fn prop_whitespace_is_trimmed((name, expected) in arb_chrom_spelling()) {
        let padded = format!("  {}\t", name);
        prop_assert_eq!(chrom_to_id(&padded).unwrap(), expected);
    }

    /// An alternate-contig suffix is truncated at the first underscore.
    #[test]
    fn prop_underscore_truncation(
        (name, expected) in arb_chrom_spelling(),
        suffix in "[a-z0-9]{1,10}",
    ) {
        // Mitochondrial aliases and X/Y stop matching their literal
        // forms once suffixed, so only numeric spellings apply
        prop_assume!(expected <= 22);
        let contig = format!("{}_{}", name, suffix);
        prop_assert_eq!(chrom_to_id(&contig).unwrap(), expected);
    }

    /// Integers outside 1..=25 are always rejected.
    #[test]
    fn prop_out_of_range_ints_rejected(n in prop_oneof![-1000i64..=0, 26i64..=1000]) {
        prop_assert!(chrom_id_from_int(n).is_err());
        prop_assert!(chrom_to_id(&n.to_string()).is_err());
    }

    /// Rendering an out-of-range id always fails.
    #[test]
    fn prop_out_of_range_ids_rejected(id in 26u8..=255) {
        prop_assert!(id_to_chrom(id, ChromNotation::Ucsc).is_err());
        prop_assert!(id_to_chrom(id, ChromNotation::GenomeReference).is_err());
    }

    /// Normalization is idempotent within a notation.
    #[test]
    fn prop_normalize_idempotent(id in arb_chrom_id()) {
        for notation in [ChromNotation::Ucsc, ChromNotation::GenomeReference] {
            let once = id_to_chrom(id, notation).unwrap();
            let twice = normalize_chrom(&once, notation).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}

#[test]
fn test_known_spellings() {
    assert_eq!(chrom_to_id("chrX").unwrap(), 23);
    assert_eq!(chrom_to_id("Y").unwrap(), 24);
    assert_eq!(chrom_to_id("MT").unwrap(), 25);
    assert_eq!(chrom_to_id("chr1_random").unwrap(), 1);
    assert_eq!(chrom_to_id("HSCHR6_MHC_COX").unwrap(), 6);

    assert!(matches!(
        chrom_to_id("0"),
        Err(ChromError::InvalidChromosome(_))
    ));
    assert!(matches!(
        chrom_to_id("26"),
        Err(ChromError::InvalidChromosome(_))
    ));
}

#[test]
fn test_unsupported_convention() {
    let err = "grch38".parse::<ChromNotation>().unwrap_err();
    assert!(matches!(err, ChromError::UnsupportedConvention(s) if s == "grch38"));
}
