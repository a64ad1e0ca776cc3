use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::phone::{NumberingPlan, Region};

// RFC-5322-lite: dot-atom local part, dotted domain with a TLD label.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^[A-Za-z0-9.!\#$%&'*+/=?^_`{|}~-]+
        @
        [A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?
        (?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("hard-coded email pattern")
});

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("hard-coded username pattern"));

// Loose shape gate applied on top of plan validation for mobile numbers.
static LOOSE_PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("hard-coded phone shape pattern"));

/// Whether `input` is acceptable as a handle on its own (3-30 chars of
/// `[A-Za-z0-9_]`). Used by the sign-up flow's username gate.
pub fn is_valid_username(input: &str) -> bool {
    USERNAME_PATTERN.is_match(input.trim())
}

/// Semantic kind of a user-entered account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Phone,
    Username,
    Invalid,
}

impl IdentifierKind {
    pub fn is_valid(self) -> bool {
        self != IdentifierKind::Invalid
    }

    /// The API's `type` discriminator for this kind.
    pub fn wire_value(self) -> Option<&'static str> {
        match self {
            IdentifierKind::Email => Some("email"),
            IdentifierKind::Phone => Some("phone_number"),
            IdentifierKind::Username => Some("username"),
            IdentifierKind::Invalid => None,
        }
    }
}

/// Classifies free-form input as an email, mobile number or username.
///
/// Rules apply in strict priority order, first match wins:
///
/// 1. email grammar
/// 2. phone number, parsed with [`NumberingPlan`] against the device's
///    default region; accepted only when the number is valid, strictly
///    mobile AND matches the loose `+?[0-9]{10,15}` shape
/// 3. username shape
///
/// An input that parses as a *valid* phone number but fails the mobile/shape
/// conditions (a landline, typically) short-circuits to `Invalid` - it is
/// never demoted to `Username`. Whether that is intended product behavior is
/// an open question with the product owner; the ordering is load-bearing and
/// must not be "fixed" here.
#[derive(Debug, Clone)]
pub struct IdentifierClassifier {
    plan: NumberingPlan,
    default_region: Region,
}

impl IdentifierClassifier {
    pub fn new(plan: NumberingPlan, default_region: Region) -> Self {
        Self {
            plan,
            default_region,
        }
    }

    pub fn default_region(&self) -> Region {
        self.default_region
    }

    /// Classify one identifier. Pure: no state is read or written beyond the
    /// plan data captured at construction.
    pub fn classify(&self, input: &str) -> IdentifierKind {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return IdentifierKind::Invalid;
        }

        if EMAIL_PATTERN.is_match(trimmed) {
            return IdentifierKind::Email;
        }

        if let Ok(number) = self.plan.parse(trimmed, self.default_region) {
            // Valid under the plan: decided here, the username rule below is
            // never consulted.
            if number.line_type().is_mobile() && LOOSE_PHONE_PATTERN.is_match(trimmed) {
                return IdentifierKind::Phone;
            }
            return IdentifierKind::Invalid;
        }

        if USERNAME_PATTERN.is_match(trimmed) {
            return IdentifierKind::Username;
        }

        IdentifierKind::Invalid
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is not an email address, mobile number or username")]
    Unclassifiable,
}

/// A classified, wire-ready identifier. Only constructible from input that
/// classified as one of the three valid kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    text: String,
    kind: IdentifierKind,
}

impl Identifier {
    pub fn classify(
        classifier: &IdentifierClassifier,
        input: &str,
    ) -> Result<Self, IdentifierError> {
        let trimmed = input.trim();
        match classifier.classify(trimmed) {
            IdentifierKind::Invalid => Err(IdentifierError::Unclassifiable),
            kind => Ok(Self {
                text: trimmed.to_string(),
                kind,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// The API's `type` discriminator; total because `Invalid` is ruled out
    /// at construction.
    pub fn wire_kind(&self) -> &'static str {
        match self.kind {
            IdentifierKind::Email => "email",
            IdentifierKind::Phone => "phone_number",
            IdentifierKind::Username => "username",
            IdentifierKind::Invalid => unreachable!("Identifier never holds Invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn classifier() -> IdentifierClassifier {
        IdentifierClassifier::new(NumberingPlan::bundled(), Region::GB)
    }

    #[test]
    fn classifies_emails_first() {
        let c = classifier();
        assert_eq!(c.classify("test@example.com"), IdentifierKind::Email);
        assert_eq!(c.classify("  test@example.com  "), IdentifierKind::Email);
        // Phone- and username-like content does not matter once the email
        // grammar matches.
        assert_eq!(c.classify("07911123456@example.com"), IdentifierKind::Email);
        assert_eq!(c.classify("some_user99@mail.example.org"), IdentifierKind::Email);
    }

    #[test]
    fn at_sign_without_valid_email_is_not_retried_as_username() {
        let c = classifier();
        assert_eq!(c.classify("not@valid"), IdentifierKind::Invalid);
        assert_eq!(c.classify("@handle"), IdentifierKind::Invalid);
    }

    #[test]
    fn classifies_mobile_numbers() {
        let c = classifier();
        assert_eq!(c.classify("07911123456"), IdentifierKind::Phone);
        assert_eq!(c.classify("+447911123456"), IdentifierKind::Phone);
    }

    #[test]
    fn valid_landline_is_invalid_not_username() {
        // Regression guard for the documented ordering quirk: a valid
        // non-mobile number short-circuits before the username rule, even
        // though "02079460958" is 11 alphanumeric characters.
        let c = classifier();
        assert_eq!(c.classify("02079460958"), IdentifierKind::Invalid);
    }

    #[test]
    fn valid_mobile_failing_loose_shape_is_invalid() {
        // Separators make the plan parse succeed while the loose shape gate
        // fails; the short-circuit still applies.
        let c = classifier();
        assert_eq!(c.classify("+44 7911 123456"), IdentifierKind::Invalid);
    }

    #[test]
    fn nanp_number_is_invalid_under_us_region() {
        let c = IdentifierClassifier::new(NumberingPlan::bundled(), Region::US);
        // Mobile and fixed-line are indistinguishable in the NANP, so the
        // strict mobile check rejects the number outright.
        assert_eq!(c.classify("2125552671"), IdentifierKind::Invalid);
    }

    #[test]
    fn classifies_usernames() {
        let c = classifier();
        assert_eq!(c.classify("some_user99"), IdentifierKind::Username);
        assert_eq!(c.classify("abc"), IdentifierKind::Username);
        assert_eq!(c.classify(&"a".repeat(30)), IdentifierKind::Username);
    }

    #[test]
    fn rejects_out_of_shape_usernames() {
        let c = classifier();
        assert_eq!(c.classify("ab"), IdentifierKind::Invalid);
        assert_eq!(c.classify(&"a".repeat(31)), IdentifierKind::Invalid);
        assert_eq!(c.classify("has space"), IdentifierKind::Invalid);
        assert_eq!(c.classify("dash-ed"), IdentifierKind::Invalid);
        assert_eq!(c.classify(""), IdentifierKind::Invalid);
        assert_eq!(c.classify("   "), IdentifierKind::Invalid);
    }

    #[test]
    fn digit_strings_that_parse_as_nothing_fall_through_to_username() {
        let c = classifier();
        // Neither shape below is a valid GB number, so both reach the
        // username rule.
        assert_eq!(c.classify("99999"), IdentifierKind::Username);
        assert_eq!(c.classify("4155552671"), IdentifierKind::Username);
    }

    #[test]
    fn identifier_construction_requires_valid_kind() {
        let c = classifier();
        let identifier = Identifier::classify(&c, " test@example.com ").unwrap();
        assert_eq!(identifier.as_str(), "test@example.com");
        assert_eq!(identifier.kind(), IdentifierKind::Email);
        assert_eq!(identifier.wire_kind(), "email");

        assert_eq!(
            Identifier::classify(&c, "not@valid"),
            Err(IdentifierError::Unclassifiable)
        );
    }

    #[test]
    fn wire_values_match_the_api_discriminators() {
        assert_eq!(IdentifierKind::Email.wire_value(), Some("email"));
        assert_eq!(IdentifierKind::Phone.wire_value(), Some("phone_number"));
        assert_eq!(IdentifierKind::Username.wire_value(), Some("username"));
        assert_eq!(IdentifierKind::Invalid.wire_value(), None);
    }

    #[quickcheck]
    fn classify_is_pure(input: String) -> bool {
        let c = classifier();
        c.classify(&input) == c.classify(&input)
    }

    #[quickcheck]
    fn classify_ignores_surrounding_whitespace(input: String) -> bool {
        let c = classifier();
        c.classify(&input) == c.classify(&format!("  {input}\t"))
    }
}
