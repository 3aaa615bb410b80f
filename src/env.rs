//! Configuration read from environment variables.

/// Environment variable which sets the default for
/// [`InvOptions::check_pivots`](crate::linalg::InvOptions::check_pivots).
pub const CHECK_PIVOTS_VAR: &str = "NDMAT_CHECK_PIVOTS";

/// Interpret a string value such as "1" or "no" as a boolean.
///
/// Unrecognized values are treated as false.
pub fn str_as_bool(s: &str) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => true,
        "0" | "false" | "f" | "no" | "n" | "off" | "" => false,
        other => {
            log::warn!("Unrecognized boolean value \"{}\"", other);
            false
        }
    }
}

/// Return whether a flag controlled by the environment variable `name` is
/// enabled, or `default` if the variable is unset.
pub fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .as_ref()
        .map(|s| str_as_bool(s))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use ndmat_testing::TestCases;

    use super::{env_flag, str_as_bool};

    #[test]
    fn test_str_as_bool() {
        #[derive(Debug)]
        struct Case<'a> {
            value: &'a str,
            expected: bool,
        }

        let cases = [
            Case {
                value: "1",
                expected: true,
            },
            Case {
                value: "Yes",
                expected: true,
            },
            Case {
                value: " true ",
                expected: true,
            },
            Case {
                value: "0",
                expected: false,
            },
            Case {
                value: "off",
                expected: false,
            },
            Case {
                value: "maybe",
                expected: false,
            },
        ];

        cases.test_each(|case| {
            assert_eq!(str_as_bool(case.value), case.expected);
        })
    }

    #[test]
    fn test_env_flag_default() {
        assert!(env_flag("NDMAT_TEST_FLAG_THAT_IS_NEVER_SET", true));
        assert!(!env_flag("NDMAT_TEST_FLAG_THAT_IS_NEVER_SET", false));
    }
}
