//! The persisted early-access signup.

use realshare_storage::{FieldValue, Fields};

/// Collection that holds one document per signup.
pub const EARLY_ACCESS_COLLECTION: &str = "earlyAccess";

/// Field holding the submitted address.
pub const EMAIL_FIELD: &str = "email";

/// Field holding the server-assigned creation time.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// One early-access signup as written to the database.
///
/// `createdAt` is always left to the server clock. Records are append-only:
/// nothing in this crate reads, updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyAccessRecord {
    email: String,
}

impl EarlyAccessRecord {
    /// Record for `email`.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Document fields for this record.
    #[must_use]
    pub fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(EMAIL_FIELD.to_owned(), FieldValue::String(self.email));
        fields.insert(CREATED_AT_FIELD.to_owned(), FieldValue::ServerTimestamp);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_carry_email_and_server_timestamp() {
        let fields = EarlyAccessRecord::new("investor@example.com").into_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields.get(EMAIL_FIELD),
            Some(&FieldValue::String("investor@example.com".to_owned()))
        );
        assert_eq!(fields.get(CREATED_AT_FIELD), Some(&FieldValue::ServerTimestamp));
    }
}
