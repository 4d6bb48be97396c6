//! Resource types and their static configuration.
//!
//! Every resource the admin client manages is described by one [`ResourceSpec`]: the REST
//! collection segment, display names, the generic load-failure message and the field schema used
//! to build drafts and tables. The view-model in [`crate::controller`] is generic over this
//! record, so adding a resource means adding a spec, not another list component.

use crate::{ClientError, ClientResult};
use std::fmt;
use std::str::FromStr;

/// The five resource types exposed by the clinic API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Appointment,
    Patient,
    Doctor,
    Clinic,
    Affiliation,
}

impl ResourceKind {
    /// All kinds in dashboard order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Clinic,
        ResourceKind::Doctor,
        ResourceKind::Affiliation,
        ResourceKind::Patient,
        ResourceKind::Appointment,
    ];

    pub fn spec(self) -> &'static ResourceSpec {
        match self {
            ResourceKind::Appointment => &APPOINTMENTS,
            ResourceKind::Patient => &PATIENTS,
            ResourceKind::Doctor => &DOCTORS,
            ResourceKind::Clinic => &CLINICS,
            ResourceKind::Affiliation => &AFFILIATIONS,
        }
    }

    /// Collection segment used in `/api/{path}/`.
    pub fn path(self) -> &'static str {
        self.spec().path
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = ClientError;

    /// Accepts the collection segment or the singular name, case-insensitively.
    fn from_str(s: &str) -> ClientResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| {
                let spec = kind.spec();
                wanted == spec.path || wanted == spec.singular.to_ascii_lowercase()
            })
            .ok_or_else(|| {
                ClientError::InvalidInput(format!(
                    "unknown resource '{}' (expected one of: appointments, patients, doctors, clinics, affiliations)",
                    s
                ))
            })
    }
}

/// A fixed option of a choice field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// How a field is presented and which lookup list, if any, feeds its options.
///
/// Kinds never coerce values; drafts carry plain strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    DateTime,
    Email,
    Phone,
    Choice(&'static [Choice]),
    /// Id of a record of another resource.
    Reference(ResourceKind),
    /// Code from the procedures catalogue.
    Procedure,
}

/// Source of a read-only lookup list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LookupSource {
    Records(ResourceKind),
    Procedures,
}

impl FieldKind {
    pub fn lookup_source(self) -> Option<LookupSource> {
        match self {
            FieldKind::Reference(kind) => Some(LookupSource::Records(kind)),
            FieldKind::Procedure => Some(LookupSource::Procedures),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub in_table: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        in_table: true,
    }
}

const fn detail_only(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        in_table: false,
    }
}

/// Static configuration of one resource type.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    pub path: &'static str,
    pub singular: &'static str,
    pub title: &'static str,
    pub load_error: &'static str,
    /// Editable fields, in form order.
    pub fields: &'static [FieldSpec],
    /// Server-assigned fields shown but never sent.
    pub read_only: &'static [FieldSpec],
}

impl ResourceSpec {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .chain(self.read_only.iter())
            .find(|f| f.name == name)
    }

    pub fn is_editable(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn table_columns(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields
            .iter()
            .chain(self.read_only.iter())
            .filter(|f| f.in_table)
    }

    pub fn detail_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().chain(self.read_only.iter())
    }

    /// Lookup lists the form needs, deduplicated, in field order.
    pub fn lookup_sources(&self) -> Vec<LookupSource> {
        let mut sources = Vec::new();
        for source in self.fields.iter().filter_map(|f| f.kind.lookup_source()) {
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
        sources
    }
}

const GENDERS: &[Choice] = &[
    Choice {
        value: "male",
        label: "Male",
    },
    Choice {
        value: "female",
        label: "Female",
    },
    Choice {
        value: "other",
        label: "Other",
    },
];

pub static APPOINTMENTS: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Appointment,
    path: "appointments",
    singular: "Appointment",
    title: "Your Appointments",
    load_error: "Failed to load appointments",
    fields: &[
        field(
            "patient",
            "Patient",
            FieldKind::Reference(ResourceKind::Patient),
        ),
        field("doctor", "Doctor", FieldKind::Reference(ResourceKind::Doctor)),
        field("clinic", "Clinic", FieldKind::Reference(ResourceKind::Clinic)),
        field("procedure", "Procedure", FieldKind::Procedure),
        field("date", "Date", FieldKind::DateTime),
    ],
    read_only: &[field("date_booked", "Date Booked", FieldKind::DateTime)],
};

pub static PATIENTS: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Patient,
    path: "patients",
    singular: "Patient",
    title: "Available Patients",
    load_error: "Failed to fetch patients",
    fields: &[
        field("name", "Name", FieldKind::Text),
        field("date_of_birth", "Date of Birth", FieldKind::Date),
        field("address", "Address", FieldKind::Text),
        field("phone_number", "Phone Number", FieldKind::Phone),
        field("ssn_no", "SSN", FieldKind::Text),
        field("gender", "Gender", FieldKind::Choice(GENDERS)),
    ],
    read_only: &[],
};

pub static DOCTORS: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Doctor,
    path: "doctors",
    singular: "Doctor",
    title: "Available Doctors",
    load_error: "Failed to fetch doctors",
    fields: &[
        field("name", "Name", FieldKind::Text),
        field("specialties", "Specialties", FieldKind::Procedure),
        field("email", "Email", FieldKind::Email),
        field("phone_number", "Phone Number", FieldKind::Phone),
        field("npi", "NPI", FieldKind::Text),
    ],
    read_only: &[],
};

pub static CLINICS: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Clinic,
    path: "clinics",
    singular: "Clinic",
    title: "Available Clinics",
    load_error: "Failed to fetch clinics",
    fields: &[
        field("name", "Name", FieldKind::Text),
        field("city", "City", FieldKind::Text),
        field("state", "State", FieldKind::Text),
        field("phone_number", "Phone Number", FieldKind::Phone),
        field("email", "Email", FieldKind::Email),
        detail_only("address", "Address", FieldKind::Text),
    ],
    read_only: &[],
};

pub static AFFILIATIONS: ResourceSpec = ResourceSpec {
    kind: ResourceKind::Affiliation,
    path: "affiliations",
    singular: "Affiliation",
    title: "Doctor Affiliations",
    load_error: "Failed to fetch affiliations",
    fields: &[
        field("doctor", "Doctor", FieldKind::Text),
        field("clinic", "Clinic", FieldKind::Text),
        field("office_address", "Office Address", FieldKind::Text),
        field("working_schedule", "Working Schedule", FieldKind::Text),
    ],
    read_only: &[],
};
