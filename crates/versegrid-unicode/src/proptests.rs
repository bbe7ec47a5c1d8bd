use super::*;
use proptest::prelude::*;

// Property: printable ASCII passes through shaping untouched
proptest! {
    #[test]
    fn prop_ascii_unchanged(s in "[ -~]{0,64}") {
        let shaped = ArabicShaper::new().shape_text(&s, &ShapingParams::default());
        prop_assert_eq!(shaped, s);
    }
}

// Property: reshaping never adds characters
proptest! {
    #[test]
    fn prop_reshape_never_grows(s in "[\u{0621}-\u{064A}\u{064B}-\u{0652} a-z]{0,64}") {
        let reshaped = ArabicReshaper::new().reshape(&s);
        prop_assert!(reshaped.chars().count() <= s.chars().count());
    }
}

// Property: without deletions or ligatures the mapping is one to one
proptest! {
    #[test]
    fn prop_reshape_one_to_one(s in "[\u{0621}-\u{064A}\u{064B}-\u{0652} ]{0,64}") {
        let reshaped = ArabicReshaper::new()
            .delete_harakat(false)
            .ligatures(false)
            .reshape(&s);
        prop_assert_eq!(reshaped.chars().count(), s.chars().count());
    }
}

// Property: every base letter is replaced by a presentation form
proptest! {
    #[test]
    fn prop_no_base_letters_survive(s in "[\u{0621}-\u{063A}\u{0641}-\u{064A} ]{0,64}") {
        let reshaped = ArabicReshaper::new().reshape(&s);
        let no_base = reshaped.chars().all(|ch| !(0x0621..=0x064A).contains(&u32::from(ch)));
        prop_assert!(no_base, "base letter left in {:?}", reshaped);
    }
}

// Property: reordering is a permutation of the input
proptest! {
    #[test]
    fn prop_reorder_is_permutation(s in "[\u{0621}-\u{064A}a-z0-9 ]{0,64}") {
        let visual = BidiReorderer::default().reorder(&s);
        let mut before: Vec<char> = s.chars().collect();
        let mut after: Vec<char> = visual.chars().collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }
}

// Property: pure right-to-left text comes out reversed
proptest! {
    #[test]
    fn prop_rtl_reorder_is_reversal(s in "[\u{0628}-\u{063A}]{1,32}") {
        let visual = BidiReorderer::default().reorder(&s);
        let reversed: String = s.chars().rev().collect();
        prop_assert_eq!(visual, reversed);
    }
}
