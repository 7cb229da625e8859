use super::{FieldKey, FieldMap};

/// Derives structured fields from extracted document text.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, text: &str) -> FieldMap;
}

/// Ignores the text and returns a fixed invoice record. Identifier fields are left for
/// the user to fill in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderExtractor;

impl PlaceholderExtractor {
    pub(crate) fn record(&self) -> FieldMap {
        [
            (FieldKey::InvoiceNumber, "336EB2B70001"),
            (FieldKey::DateIssue, "2025-02-16"),
            (FieldKey::DateDue, "2025-02-16"),
            (FieldKey::VendorName, "Anthropic"),
            (FieldKey::Description, "Claude services subscription"),
            (FieldKey::VendorEmail, "support@anthropic.com"),
            (
                FieldKey::VendorAddress,
                "548 Market St, San Francisco, CA 94104",
            ),
            (FieldKey::ClientName, "Jane Doe"),
            (FieldKey::ClientEmail, "jane.doe@example.com"),
            (FieldKey::ClientAddress, "1 Example Street, Nice, France"),
            (FieldKey::AmountDue, "€195.00"),
            (
                FieldKey::Summary,
                "336EB2B70001 · €195.00 due February 16, 2025",
            ),
        ]
        .into_iter()
        .map(|(key, value)| (key, value.to_string()))
        .collect()
    }
}

impl FieldExtractor for PlaceholderExtractor {
    fn extract(&self, _text: &str) -> FieldMap {
        self.record()
    }
}
