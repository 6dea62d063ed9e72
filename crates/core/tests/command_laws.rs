//! Laws of argument building and tokenizing over generated inputs

use ansible_run_core::command::option::flag;
use ansible_run_core::{OptionValue, Options, PosixCommand, shell};
use proptest::prelude::*;

fn option_value() -> impl Strategy<Value = OptionValue> {
    prop_oneof![
        Just(OptionValue::Absent),
        any::<bool>().prop_map(OptionValue::Switch),
        "[a-z0-9 ]{0,6}".prop_map(OptionValue::Valued),
    ]
}

proptest! {
    #[test]
    fn split_never_panics(input in "\\PC*") {
        let tokens = shell::split(&input);
        prop_assert!(tokens.iter().all(|token| !token.is_empty()));
    }

    #[test]
    fn join_then_split_returns_tokens(
        tokens in prop::collection::vec("[a-c\" \t\u{a0}$|]{1,6}", 0..6)
    ) {
        let joined = shell::join(&tokens);
        prop_assert_eq!(shell::split(&joined), tokens, "joined: {}", joined);
    }

    #[test]
    fn surrounding_whitespace_survives(
        word in "[a-z\"]{1,4}",
        before in "[ \t]{0,2}",
        after in "[ \t]{0,2}"
    ) {
        let token = format!("{before}{word}{after}");
        let tokens = shell::split(&shell::quote(&token));
        prop_assert_eq!(tokens, vec![token]);
    }

    #[test]
    fn only_enabled_options_reach_argv(
        entries in prop::collection::vec(("[a-z][a-z-]{0,7}", option_value()), 0..8)
    ) {
        let options: Options = entries.into_iter().collect();
        let argv = PosixCommand::build("ansible-playbook", None::<String>, &options, ["site.yml"])
            .unwrap()
            .argv();

        let mut expected_len = 2;
        for (key, value) in options.iter() {
            let position = argv.iter().position(|arg| *arg == flag(key));
            match value {
                OptionValue::Absent | OptionValue::Switch(false) => {
                    prop_assert_eq!(position, None);
                }
                OptionValue::Switch(true) => {
                    prop_assert!(position.is_some());
                    expected_len += 1;
                }
                OptionValue::Valued(expected) => {
                    let at = position.unwrap();
                    prop_assert_eq!(&argv[at + 1], expected);
                    expected_len += 2;
                }
            }
        }
        prop_assert_eq!(argv.len(), expected_len);
        prop_assert_eq!(argv.first().map(String::as_str), Some("ansible-playbook"));
        prop_assert_eq!(argv.last().map(String::as_str), Some("site.yml"));
    }
}
