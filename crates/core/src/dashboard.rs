//! Dashboard: every resource list of the clinic on one screen.

use crate::appointments::{appointment_board, AppointmentBoard};
use crate::controller::ResourceList;
use crate::remote::RemoteResources;
use crate::resource::ResourceKind;
use crate::session::{Session, TokenStore};
use crate::ClientResult;
use std::sync::Arc;

pub struct Dashboard<R: ?Sized> {
    pub clinics: ResourceList<R>,
    pub doctors: ResourceList<R>,
    pub affiliations: ResourceList<R>,
    pub patients: ResourceList<R>,
    pub appointments: AppointmentBoard<R>,
}

impl<R: RemoteResources + ?Sized> Dashboard<R> {
    pub fn new(remote: Arc<R>, session: Arc<Session>) -> Self {
        Self {
            clinics: ResourceList::new(remote.clone(), session.clone(), ResourceKind::Clinic),
            doctors: ResourceList::new(remote.clone(), session.clone(), ResourceKind::Doctor),
            affiliations: ResourceList::new(
                remote.clone(),
                session.clone(),
                ResourceKind::Affiliation,
            ),
            patients: ResourceList::new(remote.clone(), session.clone(), ResourceKind::Patient),
            appointments: appointment_board(remote, session),
        }
    }

    /// Loads every section concurrently; each section records its own outcome.
    pub async fn activate(&mut self) {
        let Self {
            clinics,
            doctors,
            affiliations,
            patients,
            appointments,
        } = self;

        futures::join!(
            clinics.load(),
            doctors.load(),
            affiliations.load(),
            patients.load(),
            appointments.load()
        );
    }

    /// Sections in display order.
    pub fn sections(&self) -> [&ResourceList<R>; 5] {
        [
            &self.clinics,
            &self.doctors,
            &self.affiliations,
            &self.patients,
            &self.appointments,
        ]
    }

    pub fn section(&self, kind: ResourceKind) -> &ResourceList<R> {
        match kind {
            ResourceKind::Clinic => &self.clinics,
            ResourceKind::Doctor => &self.doctors,
            ResourceKind::Affiliation => &self.affiliations,
            ResourceKind::Patient => &self.patients,
            ResourceKind::Appointment => &self.appointments,
        }
    }

    pub fn section_mut(&mut self, kind: ResourceKind) -> &mut ResourceList<R> {
        match kind {
            ResourceKind::Clinic => &mut self.clinics,
            ResourceKind::Doctor => &mut self.doctors,
            ResourceKind::Affiliation => &mut self.affiliations,
            ResourceKind::Patient => &mut self.patients,
            ResourceKind::Appointment => &mut self.appointments,
        }
    }
}

/// Where the user lands after logging out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterLogout {
    Login,
}

/// Forgets the stored credential. Returns the view to show next.
pub fn logout(store: &TokenStore) -> ClientResult<AfterLogout> {
    if store.clear()? {
        tracing::info!("logged out; removed {}", store.path().display());
    } else {
        tracing::info!("logout requested with no stored token");
    }
    Ok(AfterLogout::Login)
}
