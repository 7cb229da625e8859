use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Invoice,
    Letter,
    Mandate,
    Offer,
    Report,
    Contract,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Invoice,
        DocumentType::Letter,
        DocumentType::Mandate,
        DocumentType::Offer,
        DocumentType::Report,
        DocumentType::Contract,
        DocumentType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Letter => "letter",
            Self::Mandate => "mandate",
            Self::Offer => "offer",
            Self::Report => "report",
            Self::Contract => "contract",
            Self::Other => "other",
        }
    }

    /// Cycles through the types in menu order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|ty| *ty == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| AppError::invalid_argument(format!("unknown document type: {value}")))
    }
}
