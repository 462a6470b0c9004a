use std::fmt;

/// RapidAPI key sent with every realtor request.
///
/// The raw value is only reachable through [`Credential::expose`]; `Debug` and
/// `Display` print a redacted placeholder so the key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_are_redacted() {
        let c = Credential::new("super-secret-key");
        assert_eq!(format!("{c:?}"), "Credential(***)");
        assert_eq!(format!("{c}"), "***");
        assert_eq!(c.expose(), "super-secret-key");
    }

    #[test]
    fn blank_key_counts_as_empty() {
        assert!(Credential::new("   ").is_empty());
        assert!(!Credential::from("k").is_empty());
    }
}
