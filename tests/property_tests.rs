//! Property-based tests for hierarchical_logger using proptest

use hierarchical_logger::core::config::best_match;
use hierarchical_logger::prelude::*;
use hierarchical_logger::{interpolate, Writer};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

/// Identities over a tiny alphabet so prefixes collide often
fn identity() -> impl Strategy<Value = String> {
    "[ab\\\\]{0,6}"
}

fn rules() -> impl Strategy<Value = Vec<ConfigurationRule>> {
    prop::collection::vec(
        ("[ab\\\\]{1,4}", any_level())
            .prop_map(|(prefix, level)| ConfigurationRule::new(prefix, level)),
        0..8,
    )
}

/// Index of the expected rule: longest matching prefix, earliest on ties
fn brute_force(rules: &[ConfigurationRule], component: &str) -> Option<usize> {
    let longest = rules
        .iter()
        .filter(|r| component.starts_with(r.prefix.as_str()))
        .map(|r| r.prefix.len())
        .max()?;
    rules
        .iter()
        .position(|r| component.starts_with(r.prefix.as_str()) && r.prefix.len() == longest)
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Names and codes round-trip
    #[test]
    fn test_log_level_roundtrip(level in any_level()) {
        prop_assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        prop_assert_eq!(level.label().parse::<LogLevel>().unwrap(), level);
        prop_assert_eq!(LogLevel::from_code(level.code()).unwrap(), level);
    }

    /// Ordering agrees with the numeric codes
    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.code() <= b.code());
        prop_assert_eq!(a < b, a.code() < b.code());
    }

    /// Only the eight defined codes are valid
    #[test]
    fn test_level_code_validity(code in any::<u16>()) {
        let defined = code % 100 == 0 && (100..=800).contains(&code);
        prop_assert_eq!(LogLevel::is_valid(code), defined);
        prop_assert_eq!(LogLevel::from_code(code).is_ok(), defined);
    }
}

// ============================================================================
// Resolution Tests
// ============================================================================

proptest! {
    /// The resolver agrees with a brute-force longest-prefix search
    #[test]
    fn test_resolve_matches_brute_force(rules in rules(), component in identity()) {
        let expected = brute_force(&rules, &component);
        let resolver = ConfigResolver::with_rules(rules.clone()).unwrap();

        match (resolver.resolve(&component), expected) {
            (None, None) => {}
            (Some(resolved), Some(index)) => {
                prop_assert_eq!(&resolved.rule, &rules[index]);
                prop_assert_eq!(resolved.specificity, rules[index].prefix.len());
                prop_assert!(component.starts_with(resolved.rule.prefix.as_str()));
            }
            (got, want) => prop_assert!(false, "got {:?}, expected rule {:?}", got, want),
        }
    }

    /// Among equal-length prefixes the first rule wins, on every call
    #[test]
    fn test_tie_break_is_stable(
        prefix in "[ab]{1,3}",
        levels in prop::collection::vec(any_level(), 2..5),
    ) {
        let rules: Vec<ConfigurationRule> = levels
            .iter()
            .map(|level| ConfigurationRule::new(prefix.clone(), *level))
            .collect();
        let component = format!("{}\\Leaf", prefix);

        let first = best_match(&rules, &component).unwrap();
        prop_assert!(std::ptr::eq(first, &rules[0]));

        let resolver = ConfigResolver::with_rules(rules.clone()).unwrap();
        for _ in 0..3 {
            prop_assert_eq!(resolver.resolve(&component).unwrap().rule.threshold, levels[0]);
        }
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

proptest! {
    /// A writer sees an event exactly when its level reaches the threshold
    #[test]
    fn test_threshold_filtering(threshold in any_level(), level in any_level()) {
        let sink = MemoryWriter::new();
        let writers: Vec<Box<dyn Writer>> = vec![Box::new(sink.clone())];
        let logger = Logger::from_parts("App", Some(threshold), writers);

        logger.log(level, "message").unwrap();

        let expected = usize::from(level.code() >= threshold.code());
        prop_assert_eq!(sink.len(), expected);
        prop_assert_eq!(logger.metrics().events_suppressed() as usize, 1 - expected);
    }
}

// ============================================================================
// Interpolation Tests
// ============================================================================

proptest! {
    /// Text without braces is never altered
    #[test]
    fn test_interpolate_plain_text(text in "[^{}]{0,40}", value in "[a-z]{0,8}") {
        let context = LogContext::new().with_field("key", value);
        prop_assert_eq!(interpolate(&text, &context), text);
    }

    /// Unknown placeholders survive verbatim
    #[test]
    fn test_interpolate_unknown_keys(key in "[a-z]{1,8}") {
        let template = format!("before {{{}}} after", key);
        let context = LogContext::new().with_field("KNOWN", 1);
        prop_assert_eq!(interpolate(&template, &context), template);
    }

    /// Known placeholders are replaced and the replacement is not rescanned
    #[test]
    fn test_interpolate_known_keys(key in "[a-z]{1,8}", value in "[a-z{}]{0,12}") {
        let template = format!("<{{{}}}>", key);
        let context = LogContext::new()
            .with_field(key.clone(), value.clone())
            .with_field("UNRELATED", "never");
        prop_assert_eq!(interpolate(&template, &context), format!("<{}>", value));
    }
}
