/// Property-based tests using proptest
/// Tests invariants that should hold for all lookup inputs and client settings
use proptest::prelude::*;
use wealthengine::decode::{
    decode_batch_response, decode_batch_results_response, decode_batch_status, decode_profile,
    decode_score_response,
};
use wealthengine::{
    AddressLookup, AddressLookupScore, Batch, BatchLookup, DetailMode, EmailLookup,
    EmailLookupScore, Mode, PhoneLookup, PhoneLookupScore, WealthEngine,
};

fn text() -> impl Strategy<Value = String> {
    "\\PC{0,24}"
}

prop_compose! {
    fn address_lookup()(
        last_name in text(),
        first_name in text(),
        address_line1 in text(),
        address_line2 in text(),
        city in text(),
        state in "[A-Z]{2}",
        zip in "[0-9]{5}",
    ) -> AddressLookup {
        AddressLookup { last_name, first_name, address_line1, address_line2, city, state, zip }
    }
}

prop_compose! {
    fn email_lookup()(email in text(), last_name in text(), first_name in text()) -> EmailLookup {
        EmailLookup { email, last_name, first_name }
    }
}

prop_compose! {
    fn phone_lookup()(phone in "[0-9]{10}", last_name in text(), first_name in text()) -> PhoneLookup {
        PhoneLookup { phone, last_name, first_name }
    }
}

fn batch_lookup() -> impl Strategy<Value = BatchLookup> {
    prop_oneof![
        address_lookup().prop_map(BatchLookup::from),
        email_lookup().prop_map(BatchLookup::from),
        phone_lookup().prop_map(BatchLookup::from),
    ]
}

// Property: request bodies survive encoding unchanged
proptest! {
    #[test]
    fn address_lookup_round_trips(lookup in address_lookup()) {
        let json = serde_json::to_string(&lookup).unwrap();
        let back: AddressLookup = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, lookup);
    }

    #[test]
    fn score_lookups_round_trip(
        address in address_lookup(),
        email in email_lookup(),
        phone in phone_lookup(),
        model in "[a-z_]{1,16}",
    ) {
        let a = AddressLookupScore::new(address, model.clone());
        let back: AddressLookupScore = serde_json::from_str(&serde_json::to_string(&a).unwrap()).unwrap();
        prop_assert_eq!(back, a);

        let e = EmailLookupScore::new(email, model.clone());
        let back: EmailLookupScore = serde_json::from_str(&serde_json::to_string(&e).unwrap()).unwrap();
        prop_assert_eq!(back, e);

        let p = PhoneLookupScore::new(phone, model);
        let back: PhoneLookupScore = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        prop_assert_eq!(back, p);
    }

    #[test]
    fn batch_round_trips(lookups in prop::collection::vec(batch_lookup(), 0..8)) {
        let batch: Batch = lookups.into_iter().collect();
        let back: Batch = serde_json::from_str(&serde_json::to_string(&batch).unwrap()).unwrap();
        prop_assert_eq!(back, batch);
    }

    #[test]
    fn batch_lookup_keeps_address_fields(lookup in address_lookup()) {
        let batch_lookup = BatchLookup::from(lookup.clone());
        prop_assert_eq!(batch_lookup.address_line1, lookup.address_line1);
        prop_assert_eq!(batch_lookup.zip, lookup.zip);
        prop_assert!(batch_lookup.email.is_empty());
    }
}

// Property: construction validates key and mode once
proptest! {
    #[test]
    fn valid_settings_select_base_url(key in "[A-Za-z0-9]{1,40}", prod in proptest::bool::ANY) {
        let mode = if prod { "Prod" } else { "Dev" };
        let we = WealthEngine::new(key, mode).unwrap();
        let expected = if prod { Mode::Prod } else { Mode::Dev };
        prop_assert_eq!(we.mode(), expected);
        prop_assert_eq!(we.base_url(), expected.base_url());
    }

    #[test]
    fn blank_api_key_always_rejected(key in "[ \\t]{0,8}", prod in proptest::bool::ANY) {
        let mode = if prod { "Prod" } else { "Dev" };
        prop_assert!(WealthEngine::new(key, mode).is_err());
    }

    #[test]
    fn unknown_mode_always_rejected(mode in "\\PC{0,12}") {
        prop_assume!(mode != "Dev" && mode != "Prod");
        prop_assert!(WealthEngine::new("key", &mode).is_err());
    }

    #[test]
    fn mode_names_are_case_sensitive(prod in proptest::bool::ANY, pad in "[ \t]{0,3}") {
        let mode = if prod { "PROD" } else { "dev" };
        let padded = format!("{}{}", pad, mode);
        prop_assert!(WealthEngine::new("key", &padded).is_err());
        let exact = if prod { "Prod" } else { "Dev" };
        if !pad.is_empty() {
            let padded_exact = format!("{}{}", pad, exact);
            prop_assert!(WealthEngine::new("key", &padded_exact).is_err());
        }
    }

    #[test]
    fn detail_mode_is_full_unless_basic(param in "\\PC{0,12}") {
        let mode = DetailMode::from_param(&param);
        if param == "basic" {
            prop_assert_eq!(mode, DetailMode::Basic);
        } else {
            prop_assert_eq!(mode, DetailMode::Full);
        }
    }
}

// Property: decoders never panic, and reject bodies that are not JSON
proptest! {
    #[test]
    fn decoders_never_panic(body in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_profile(&body);
        let _ = decode_score_response(&body);
        let _ = decode_batch_response(&body);
        let _ = decode_batch_status(&body);
        let _ = decode_batch_results_response(&body);
    }

    #[test]
    fn non_json_bodies_rejected(body in "[a-zA-Z ]{1,64}") {
        prop_assert!(decode_profile(body.as_bytes()).is_err());
        prop_assert!(decode_score_response(body.as_bytes()).is_err());
        prop_assert!(decode_batch_response(body.as_bytes()).is_err());
        prop_assert!(decode_batch_status(body.as_bytes()).is_err());
        prop_assert!(decode_batch_results_response(body.as_bytes()).is_err());
    }
}
