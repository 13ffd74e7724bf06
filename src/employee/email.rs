//! Email derivation from employee names.

/// Domain appended to every derived address.
pub const EMAIL_DOMAIN: &str = "company.com";

/// Derive the company email for `name`.
///
/// Drops every character that is not an ASCII letter or digit, lower-cases
/// the rest and appends [`EMAIL_DOMAIN`]. An absent name yields no email.
pub fn derive_email(name: Option<&str>) -> Option<String> {
    let name = name?;
    let local: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    Some(format!("{}@{}", local, EMAIL_DOMAIN))
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_derive_email_is_deterministic(name in ".*") {
            let first = derive_email(Some(&name));
            let second = derive_email(Some(&name));
            prop_assert_eq!(&first, &second);

            let email = first.unwrap();
            let suffix = format!("@{}", EMAIL_DOMAIN);
            prop_assert!(email.ends_with(&suffix));

            let local = &email[..email.len() - suffix.len()];
            prop_assert!(local
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
            // Deriving from an already-derived local part changes nothing
            prop_assert_eq!(derive_email(Some(local)), Some(email.clone()));
        }
    }
}
