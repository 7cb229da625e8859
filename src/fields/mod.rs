use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

mod document_type;
mod extractor;
mod identifier;

pub use document_type::DocumentType;
pub use extractor::{FieldExtractor, PlaceholderExtractor};
pub use identifier::format_identifier;

/// The fixed set of editable fields, declared in display and export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    InvoiceNumber,
    DateIssue,
    DateDue,
    VendorUuid,
    VendorName,
    Description,
    VendorEmail,
    VendorAddress,
    ClientUuid,
    ClientName,
    ClientEmail,
    ClientAddress,
    AmountDue,
    Summary,
}

impl FieldKey {
    pub const ALL: [FieldKey; 14] = [
        FieldKey::InvoiceNumber,
        FieldKey::DateIssue,
        FieldKey::DateDue,
        FieldKey::VendorUuid,
        FieldKey::VendorName,
        FieldKey::Description,
        FieldKey::VendorEmail,
        FieldKey::VendorAddress,
        FieldKey::ClientUuid,
        FieldKey::ClientName,
        FieldKey::ClientEmail,
        FieldKey::ClientAddress,
        FieldKey::AmountDue,
        FieldKey::Summary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvoiceNumber => "invoice_number",
            Self::DateIssue => "date_issue",
            Self::DateDue => "date_due",
            Self::VendorUuid => "vendor_uuid",
            Self::VendorName => "vendor_name",
            Self::Description => "description",
            Self::VendorEmail => "vendor_email",
            Self::VendorAddress => "vendor_address",
            Self::ClientUuid => "client_uuid",
            Self::ClientName => "client_name",
            Self::ClientEmail => "client_email",
            Self::ClientAddress => "client_address",
            Self::AmountDue => "amount_due",
            Self::Summary => "summary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InvoiceNumber => "Invoice number",
            Self::DateIssue => "Date of issue",
            Self::DateDue => "Date due",
            Self::VendorUuid => "Vendor UUID",
            Self::VendorName => "Vendor name",
            Self::Description => "Description",
            Self::VendorEmail => "Vendor email",
            Self::VendorAddress => "Vendor address",
            Self::ClientUuid => "Client UUID",
            Self::ClientName => "Client name",
            Self::ClientEmail => "Client email",
            Self::ClientAddress => "Client address",
            Self::AmountDue => "Amount due",
            Self::Summary => "Summary line",
        }
    }

    pub fn is_identifier(self) -> bool {
        matches!(self, Self::VendorUuid | Self::ClientUuid)
    }

    /// Hint shown while an identifier field is empty.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::VendorUuid => Some("Bdgbn_"),
            Self::ClientUuid => Some("Kmnpx_"),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field values keyed in declaration order, so iteration and JSON output follow the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    values: BTreeMap<FieldKey, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record the form starts with before any upload.
    pub fn sample() -> Self {
        let mut map = PlaceholderExtractor.record();
        map.set_field(FieldKey::VendorUuid, "Bdgbn_");
        map.set_field(FieldKey::ClientUuid, "Kmnpx_");
        map
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Applies a user edit; identifier fields are normalized on every change.
    pub fn apply_edit(&mut self, key: FieldKey, input: &str) {
        if key.is_identifier() {
            self.set_field(key, format_identifier(input));
        } else {
            self.set_field(key, input);
        }
    }

    pub fn remove(&mut self, key: FieldKey) -> Option<String> {
        self.values.remove(&key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

impl FromIterator<(FieldKey, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
