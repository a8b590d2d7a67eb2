//! Password policy and password-derived value types.
//!
//! The policy is a fixed, ordered rule set. Evaluation stops at the first
//! failing rule so callers always see the most basic problem first.
//!
//! Lengths are measured in bytes because bcrypt consumes bytes and ignores
//! everything past the 72nd.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum accepted password length in bytes.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Maximum accepted password length in bytes.
pub const MAX_PASSWORD_LEN: usize = 71;
/// Characters that satisfy the special-character requirement.
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&";

/// Reason a password was rejected by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyViolation {
    /// Shorter than [`MIN_PASSWORD_LEN`].
    #[error("Password must be at least 8 characters")]
    TooShort,
    /// Longer than [`MAX_PASSWORD_LEN`].
    #[error("Password must be less than 72 characters")]
    TooLong,
    /// Begins or ends with a space character.
    #[error("Password must not start or end with a space")]
    SurroundingSpace,
    /// Missing a character class, or contains whitespace.
    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character"
    )]
    InsufficientComplexity,
}

/// Check a raw password against the policy.
///
/// # Errors
/// Returns the first [`PasswordPolicyViolation`] in rule order.
///
/// # Examples
/// ```
/// use thingful::domain::{PasswordPolicyViolation, validate_password};
///
/// assert_eq!(validate_password("1234567"), Err(PasswordPolicyViolation::TooShort));
/// assert!(validate_password("AAaa11!!").is_ok());
/// ```
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyViolation> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(PasswordPolicyViolation::TooShort);
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(PasswordPolicyViolation::TooLong);
    }
    if password.starts_with(' ') || password.ends_with(' ') {
        return Err(PasswordPolicyViolation::SurroundingSpace);
    }
    if !is_complex(password) {
        return Err(PasswordPolicyViolation::InsufficientComplexity);
    }
    Ok(())
}

fn is_complex(password: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut special = false;

    for ch in password.chars() {
        if ch.is_whitespace() {
            return false;
        }
        lower |= ch.is_ascii_lowercase();
        upper |= ch.is_ascii_uppercase();
        digit |= ch.is_ascii_digit();
        special |= PASSWORD_SPECIAL_CHARACTERS.contains(ch);
    }

    lower && upper && digit && special
}

/// A password that passed [`validate_password`].
///
/// The only way to obtain one is [`ValidatedPassword::parse`], so anything
/// that accepts this type can rely on the policy having run. The plaintext is
/// wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedPassword(Zeroizing<String>);

impl ValidatedPassword {
    /// Validate and wrap a raw password.
    ///
    /// # Errors
    /// Returns the first policy violation, as [`validate_password`] does.
    pub fn parse(raw: &str) -> Result<Self, PasswordPolicyViolation> {
        validate_password(raw)?;
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext password, for hashing adapters only.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ValidatedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatedPassword(***)")
    }
}

/// Opaque password hash produced by a `PasswordHasher` adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap hasher output or a hash read back from storage.
    pub(crate) fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Encoded hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Policy rule ordering and boundary coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("1234567")]
    #[case("Aa1!")]
    fn short_passwords_are_rejected(#[case] password: &str) {
        assert_eq!(
            validate_password(password),
            Err(PasswordPolicyViolation::TooShort)
        );
    }

    #[rstest]
    fn short_wins_over_complexity_and_spaces() {
        assert_eq!(
            validate_password(" ab "),
            Err(PasswordPolicyViolation::TooShort)
        );
    }

    #[rstest]
    fn seventy_two_bytes_is_too_long() {
        let password = format!("Aa1!{}", "a".repeat(68));
        assert_eq!(password.len(), 72);
        assert_eq!(
            validate_password(&password),
            Err(PasswordPolicyViolation::TooLong)
        );
    }

    #[rstest]
    fn seventy_one_bytes_is_accepted() {
        let password = format!("Aa1!{}", "a".repeat(67));
        assert_eq!(password.len(), 71);
        assert!(validate_password(&password).is_ok());
    }

    #[rstest]
    fn length_is_counted_in_bytes() {
        // Eight characters but nine bytes once 'é' is encoded.
        let password = "Aa1!aaaé";
        assert_eq!(password.chars().count(), 8);
        assert_eq!(password.len(), 9);
        assert!(validate_password(password).is_ok());

        let too_long = format!("Aa1!{}", "é".repeat(34));
        assert!(too_long.chars().count() < 72);
        assert_eq!(
            validate_password(&too_long),
            Err(PasswordPolicyViolation::TooLong)
        );
    }

    #[rstest]
    #[case(" 1Aa!2Bb@")]
    #[case("1Aa!2Bb@ ")]
    #[case(" 1Aa!2Bb@ ")]
    fn leading_or_trailing_space_is_rejected(#[case] password: &str) {
        assert_eq!(
            validate_password(password),
            Err(PasswordPolicyViolation::SurroundingSpace)
        );
    }

    #[rstest]
    fn space_rule_precedes_complexity() {
        assert_eq!(
            validate_password(" aaaaaaaaa"),
            Err(PasswordPolicyViolation::SurroundingSpace)
        );
    }

    #[rstest]
    #[case::no_uppercase("11AAAbb!!".to_lowercase())]
    #[case::no_lowercase("11AAAbb!!".to_uppercase())]
    #[case::no_digit("AAbbCCdd!!".to_owned())]
    #[case::no_special("AAbb11ccDD".to_owned())]
    #[case::unlisted_special("AAbb11cc*?".to_owned())]
    #[case::inner_space("AA bb11!!".to_owned())]
    #[case::inner_tab("AA\tbb11!!".to_owned())]
    fn incomplete_passwords_fail_complexity(#[case] password: String) {
        assert_eq!(
            validate_password(&password),
            Err(PasswordPolicyViolation::InsufficientComplexity)
        );
    }

    #[rstest]
    #[case("11AAbb!!")]
    #[case("aadsi8d!!%%s78dSd")]
    #[case("Zz9^&&&&")]
    fn compliant_passwords_are_accepted(#[case] password: &str) {
        assert!(validate_password(password).is_ok());
        assert!(ValidatedPassword::parse(password).is_ok());
    }

    #[rstest]
    fn violations_render_user_facing_messages() {
        assert_eq!(
            PasswordPolicyViolation::TooShort.to_string(),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            PasswordPolicyViolation::TooLong.to_string(),
            "Password must be less than 72 characters"
        );
        assert_eq!(
            PasswordPolicyViolation::SurroundingSpace.to_string(),
            "Password must not start or end with a space"
        );
        assert_eq!(
            PasswordPolicyViolation::InsufficientComplexity.to_string(),
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character"
        );
    }

    #[rstest]
    fn debug_output_hides_secrets() {
        let password = ValidatedPassword::parse("11AAbb!!").expect("valid password");
        assert!(!format!("{password:?}").contains("11AAbb!!"));
        let hash = PasswordHash::new("$2b$12$secret");
        assert!(!format!("{hash:?}").contains("secret"));
    }
}
