// 🏛️ Attribute Schema - fixed catalog of course attributes
// Each kind carries its own coercion and multiplicity rules

use serde::{Serialize, Serializer};
use std::fmt;

// ============================================================================
// ATTRIBUTE DEFINITION
// ============================================================================

/// Static description of one attribute kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// Key used in normalized output (e.g., "CRN")
    pub display_name: &'static str,

    /// Raw values must parse as integers
    pub coerce_to_integer: bool,

    /// A record may hold an ordered list of values for this kind
    pub allows_multiple: bool,
}

const fn def(display_name: &'static str, coerce_to_integer: bool, allows_multiple: bool) -> AttributeDefinition {
    AttributeDefinition {
        display_name,
        coerce_to_integer,
        allows_multiple,
    }
}

/// Indexed by `AttributeKind as usize`; keep in declaration order.
const DEFINITIONS: [AttributeDefinition; 13] = [
    def("CRN", true, false),
    def("Course", false, false),
    def("*Campus", false, false),
    def("Days", false, true),
    def("Time", false, true),
    def("Location", false, true),
    def("Hrs", true, false),
    def("Title", false, false),
    def("Instructor", false, true),
    def("Seats", true, false),
    def("Limit", true, false),
    def("Enroll", true, false),
    def("subject", false, false),
];

// ============================================================================
// ATTRIBUTE KIND
// ============================================================================

/// AttributeKind - one scraped column of a course offering.
///
/// Declaration order is the schema order and drives `Ord`, so records
/// iterate their attributes the same way regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    ReferenceNumber,
    ShortCourseName,
    Campus,
    Days,
    Time,
    Location,
    Hours,
    Title,
    Instructor,
    SeatsAvailable,
    SeatsLimit,
    EnrolledStudents,
    Subject,
}

impl AttributeKind {
    /// Every kind, in schema order
    pub const ALL: [AttributeKind; 13] = [
        AttributeKind::ReferenceNumber,
        AttributeKind::ShortCourseName,
        AttributeKind::Campus,
        AttributeKind::Days,
        AttributeKind::Time,
        AttributeKind::Location,
        AttributeKind::Hours,
        AttributeKind::Title,
        AttributeKind::Instructor,
        AttributeKind::SeatsAvailable,
        AttributeKind::SeatsLimit,
        AttributeKind::EnrolledStudents,
        AttributeKind::Subject,
    ];

    /// Kinds a continuation row contributes to the course it follows
    pub const CONTINUATION_KINDS: [AttributeKind; 4] = [
        AttributeKind::Days,
        AttributeKind::Time,
        AttributeKind::Location,
        AttributeKind::Instructor,
    ];

    pub fn definition(&self) -> &'static AttributeDefinition {
        &DEFINITIONS[*self as usize]
    }

    pub fn display_name(&self) -> &'static str {
        self.definition().display_name
    }

    pub fn coerce_to_integer(&self) -> bool {
        self.definition().coerce_to_integer
    }

    pub fn allows_multiple(&self) -> bool {
        self.definition().allows_multiple
    }

    /// Variant identifier (e.g., "ReferenceNumber")
    pub fn variant_name(&self) -> &'static str {
        match self {
            AttributeKind::ReferenceNumber => "ReferenceNumber",
            AttributeKind::ShortCourseName => "ShortCourseName",
            AttributeKind::Campus => "Campus",
            AttributeKind::Days => "Days",
            AttributeKind::Time => "Time",
            AttributeKind::Location => "Location",
            AttributeKind::Hours => "Hours",
            AttributeKind::Title => "Title",
            AttributeKind::Instructor => "Instructor",
            AttributeKind::SeatsAvailable => "SeatsAvailable",
            AttributeKind::SeatsLimit => "SeatsLimit",
            AttributeKind::EnrolledStudents => "EnrolledStudents",
            AttributeKind::Subject => "Subject",
        }
    }

    /// Resolve a column/key name by display name or variant name.
    /// Comparison is ASCII case-insensitive.
    pub fn from_name(name: &str) -> Option<AttributeKind> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|kind| {
            kind.display_name().eq_ignore_ascii_case(name)
                || kind.variant_name().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for AttributeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
