use serde::{Deserialize, Serialize};

/// The eight pedagogical course categories. This set is closed: payloads may
/// carry other labels, but nothing outside these eight ever reaches
/// aggregation or rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryCode {
    Hsmc,
    Bsc,
    Esc,
    Pcc,
    Pec,
    Oec,
    Eec,
    Mc,
}

/// Fixed iteration and rendering order for every percentage vector and
/// category listing in the dashboard.
pub const CATEGORY_ORDER: [CategoryCode; 8] = [
    CategoryCode::Hsmc,
    CategoryCode::Bsc,
    CategoryCode::Esc,
    CategoryCode::Pcc,
    CategoryCode::Pec,
    CategoryCode::Oec,
    CategoryCode::Eec,
    CategoryCode::Mc,
];

impl CategoryCode {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryCode::Hsmc => "HSMC",
            CategoryCode::Bsc => "BSC",
            CategoryCode::Esc => "ESC",
            CategoryCode::Pcc => "PCC",
            CategoryCode::Pec => "PEC",
            CategoryCode::Oec => "OEC",
            CategoryCode::Eec => "EEC",
            CategoryCode::Mc => "MC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryCode::Hsmc => "Humanities & Social Science Courses (HSMC)",
            CategoryCode::Bsc => "Basic Science Courses (BSC)",
            CategoryCode::Esc => "Engineering Science Courses (ESC)",
            CategoryCode::Pcc => "Program Core Courses (PCC)",
            CategoryCode::Pec => "Professional Elective Courses (PEC)",
            CategoryCode::Oec => "Open Elective Courses (OEC)",
            CategoryCode::Eec => "Employability Enhancement Courses (EEC)",
            CategoryCode::Mc => "Mandatory Courses (MC)",
        }
    }

    /// Parse a wire label. Unknown labels are not an error; callers skip them.
    pub fn parse(value: &str) -> Option<CategoryCode> {
        CATEGORY_ORDER
            .iter()
            .copied()
            .find(|code| code.as_str() == value)
    }
}

/// Ordered `(code, display name)` pairs for renderers.
pub fn labels() -> [(CategoryCode, &'static str); 8] {
    let mut out = [(CategoryCode::Hsmc, ""); 8];
    for (slot, code) in out.iter_mut().zip(CATEGORY_ORDER) {
        *slot = (code, code.label());
    }
    out
}
