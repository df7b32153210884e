//! The email field of the early-access form.

/// Current value of the early-access email input.
///
/// Lives for one form interaction: filled from the input, read on submit,
/// cleared after a submit that did not fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailCapture {
    email: String,
}

impl EmailCapture {
    /// Capture the raw value of the input.
    ///
    /// Leading and trailing whitespace is stripped, matching how browsers
    /// sanitize the value of an `<input type="email">`.
    #[must_use]
    pub fn from_input(raw: &str) -> Self {
        Self {
            email: raw.trim().to_owned(),
        }
    }

    /// Current field value.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
    }

    /// Reset the field to empty.
    pub fn clear(&mut self) {
        self.email.clear();
    }
}
