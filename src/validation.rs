use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+]?[\d\s-]{10,}$").unwrap());

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least ten digits, spaces or dashes with an optional leading `+`.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Kind named by a field's `data-validate` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Phone,
}

impl FieldKind {
    pub fn parse(attr: &str) -> Option<Self> {
        match attr.trim() {
            "email" => Some(FieldKind::Email),
            "phone" => Some(FieldKind::Phone),
            _ => None,
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        match self {
            FieldKind::Email => validate_email(value),
            FieldKind::Phone => validate_phone(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(validate_email("care@nurturesync.com"));
        assert!(validate_email("a.b+c@clinic.co.uk"));
        assert!(!validate_email("care@nurturesync"));
        assert!(!validate_email("care nurse@clinic.com"));
        assert!(!validate_email("@clinic.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn phones() {
        assert!(validate_phone("+1 555-010-2030"));
        assert!(validate_phone("0401234567"));
        assert!(!validate_phone("555-0102"));
        assert!(!validate_phone("++15550102030"));
        assert!(!validate_phone("(555) 010-2030"));
    }

    #[test]
    fn field_kind_from_attribute() {
        assert_eq!(FieldKind::parse("email"), Some(FieldKind::Email));
        assert_eq!(FieldKind::parse(" phone "), Some(FieldKind::Phone));
        assert_eq!(FieldKind::parse("zip"), None);
        assert!(FieldKind::Phone.accepts("+358 40 123 4567"));
    }
}
