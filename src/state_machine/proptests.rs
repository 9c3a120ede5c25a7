//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary inputs.

use super::transition::*;
use super::*;
use crate::config::DomainCatalog;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Init),
        Just(Step::ChooseDomain),
        Just(Step::OfferResources),
        Just(Step::ChooseContact),
    ]
}

fn arb_domain_key() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("programmation".to_string())),
        Just(Some("design".to_string())),
    ]
}

fn arb_data() -> impl Strategy<Value = SessionData> {
    (proptest::option::of("[A-Za-z]{1,12}"), arb_domain_key())
        .prop_map(|(name, domain)| SessionData { name, domain })
}

/// Menu answers mixed with free text so every branch gets exercised
fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("1".to_string()),
        Just("2".to_string()),
        Just("3".to_string()),
        Just("oui".to_string()),
        Just("Yes".to_string()),
        Just("message".to_string()),
        Just("appel".to_string()),
        Just("both".to_string()),
        Just("design".to_string()),
        Just("PYTHON".to_string()),
        "[a-zA-Z0-9 ]{0,20}",
    ]
}

fn all_keywords(catalog: &DomainCatalog) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|d| d.keywords.iter().cloned())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: stored domain is always a catalog key
    #[test]
    fn prop_domain_always_in_catalog(inputs in proptest::collection::vec(arb_input(), 0..30)) {
        let catalog = DomainCatalog::builtin();
        let ctx = ConvContext::new(&catalog, Language::Fr);
        let mut step = Step::Init;
        let mut data = SessionData::default();

        for input in inputs {
            let result = transition(step, &data, &ctx, &UserMessage::new(&input));
            step = result.new_step;
            data = result.new_data;
            if let Some(domain) = &data.domain {
                prop_assert!(catalog.get(domain).is_some(), "Unknown domain {domain}");
            }
        }
    }

    // Invariant 2: any non-empty message leaves Init with the name stored
    #[test]
    fn prop_init_accepts_any_name(name in "[a-zA-Z][a-zA-Z ]{0,29}", data in arb_data()) {
        let catalog = DomainCatalog::builtin();
        let ctx = ConvContext::new(&catalog, Language::Fr);

        let result = transition(Step::Init, &data, &ctx, &UserMessage::new(&name));
        prop_assert_eq!(result.new_step, Step::ChooseDomain);
        prop_assert_eq!(result.new_data.name.as_deref(), Some(name.trim()));
        prop_assert_eq!(result.reply, Reply::Welcome);
    }

    // Invariant 3: keywords select their own domain from ChooseDomain
    #[test]
    fn prop_keywords_select_domain(index in 0usize..64, upper in any::<bool>()) {
        let catalog = DomainCatalog::builtin();
        let ctx = ConvContext::new(&catalog, Language::Fr);
        let keywords = all_keywords(&catalog);
        let keyword = &keywords[index % keywords.len()];
        let input = if upper { keyword.to_uppercase() } else { keyword.clone() };

        let expected = catalog.match_keyword(keyword).map(|d| d.key.clone());
        let result = transition(
            Step::ChooseDomain,
            &SessionData::default(),
            &ctx,
            &UserMessage::new(&input),
        );

        prop_assert_eq!(result.new_step, Step::OfferResources);
        prop_assert_eq!(result.new_data.domain.clone(), expected.clone());
        prop_assert_eq!(result.reply, Reply::Resources { domain: expected.unwrap_or_default() });
    }

    // Invariant 4: anything but yes/oui in OfferResources goes back to Init
    #[test]
    fn prop_offer_resources_is_yes_or_reset(input in arb_input(), data in arb_data()) {
        let catalog = DomainCatalog::builtin();
        let ctx = ConvContext::new(&catalog, Language::Fr);

        let result = transition(Step::OfferResources, &data, &ctx, &UserMessage::new(&input));
        let normalized = input.trim().to_lowercase();
        if normalized == "oui" || normalized == "yes" {
            prop_assert_eq!(result.new_step, Step::ChooseContact);
        } else {
            prop_assert_eq!(result.new_step, Step::Init);
            prop_assert_eq!(result.reply, Reply::Welcome);
        }
        prop_assert!(result.effects.is_empty());
    }

    // Invariant 5: ChooseContact always ends the flow
    #[test]
    fn prop_choose_contact_always_resets(input in arb_input(), data in arb_data()) {
        let catalog = DomainCatalog::builtin();
        let ctx = ConvContext::new(&catalog, Language::Fr);

        let result = transition(Step::ChooseContact, &data, &ctx, &UserMessage::new(&input));
        prop_assert_eq!(result.new_step, Step::Init);
        prop_assert!(result.effects.len() <= 2);
        if result.effects.is_empty() {
            prop_assert_eq!(result.reply, Reply::Error);
        } else {
            prop_assert!(matches!(result.reply, Reply::ContactConfirmed(_)));
        }
    }

    // Invariant 6: effects only leave ChooseContact
    #[test]
    fn prop_effects_only_from_choose_contact(
        step in arb_step(),
        input in arb_input(),
        data in arb_data()
    ) {
        let catalog = DomainCatalog::builtin();
        let ctx = ConvContext::new(&catalog, Language::Fr);

        let result = transition(step, &data, &ctx, &UserMessage::new(&input));
        if step != Step::ChooseContact {
            prop_assert!(
                result.effects.is_empty(),
                "Unexpected effects from {step}: {:?}",
                result.effects
            );
        }
    }

    // Invariant 7: transitions are deterministic
    #[test]
    fn prop_transition_is_pure(step in arb_step(), input in arb_input(), data in arb_data()) {
        let catalog = DomainCatalog::builtin();
        let ctx = ConvContext::new(&catalog, Language::Fr);
        let message = UserMessage::new(&input);

        let first = transition(step, &data, &ctx, &message);
        let second = transition(step, &data, &ctx, &message);
        prop_assert_eq!(first, second);
    }
}
