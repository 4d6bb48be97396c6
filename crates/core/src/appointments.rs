//! Appointment board.
//!
//! Appointments use the generic [`ResourceList`]; activation additionally fetches the patients,
//! doctors, clinics and procedures lookups in parallel to populate the form's selection options.
//! This module adds the detail panel, which always re-reads the appointment from the server so
//! the booking timestamp is current.

use crate::controller::ResourceList;
use crate::lookups::{LookupOption, Lookups};
use crate::record::{display_datetime, Record, RecordId};
use crate::remote::RemoteResources;
use crate::resource::{ResourceKind, APPOINTMENTS};
use crate::session::Session;
use crate::ClientResult;
use std::sync::Arc;

pub type AppointmentBoard<R> = ResourceList<R>;

pub fn appointment_board<R>(remote: Arc<R>, session: Arc<Session>) -> AppointmentBoard<R>
where
    R: RemoteResources + ?Sized,
{
    ResourceList::new(remote, session, ResourceKind::Appointment)
}

/// Read-only view of one appointment with references resolved to names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub id: RecordId,
    pub patient: String,
    pub doctor: String,
    pub clinic: String,
    pub procedure: String,
    pub date: String,
    pub date_booked: String,
}

impl AppointmentDetails {
    pub fn from_record(record: &Record, lookups: &Lookups) -> Self {
        let resolve = |name: &str| {
            let raw = record.text(name);
            APPOINTMENTS
                .field(name)
                .and_then(|field| lookups.label_for(field, &raw))
                .map(str::to_string)
                .unwrap_or(raw)
        };

        Self {
            id: record.id,
            patient: resolve("patient"),
            doctor: resolve("doctor"),
            clinic: resolve("clinic"),
            procedure: resolve("procedure"),
            date: display_datetime(&record.text("date")),
            date_booked: display_datetime(&record.text("date_booked")),
        }
    }

    /// Label/value pairs in display order.
    pub fn lines(&self) -> [(&'static str, &str); 6] {
        [
            ("Patient", self.patient.as_str()),
            ("Doctor", self.doctor.as_str()),
            ("Clinic", self.clinic.as_str()),
            ("Procedure", self.procedure.as_str()),
            ("Date", self.date.as_str()),
            ("Date Booked", self.date_booked.as_str()),
        ]
    }
}

impl<R: RemoteResources + ?Sized> ResourceList<R> {
    /// Fetches one appointment fresh from the server and resolves its references.
    pub async fn appointment_details(&self, id: RecordId) -> ClientResult<AppointmentDetails> {
        let record = self.fetch_one(id).await?;
        Ok(AppointmentDetails::from_record(&record, self.lookups()))
    }

    /// Options for a reference or procedure field of this list's form.
    pub fn field_options(&self, name: &str) -> &[LookupOption] {
        self.spec()
            .field(name)
            .map(|field| self.lookups().options_for(field))
            .unwrap_or(&[])
    }
}
