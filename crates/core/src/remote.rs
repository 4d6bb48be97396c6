use crate::draft::Draft;
use crate::record::{Procedure, Record, RecordId};
use crate::resource::ResourceKind;
use crate::session::Session;
use crate::ClientResult;
use async_trait::async_trait;

/// Capability set of the clinic REST API, one collection endpoint per resource kind.
///
/// Every call takes the session explicitly; implementations must call
/// [`Session::authorize`] before dispatching anything.
#[async_trait]
pub trait RemoteResources: Send + Sync {
    async fn list(&self, session: &Session, kind: ResourceKind) -> ClientResult<Vec<Record>>;

    async fn get(&self, session: &Session, kind: ResourceKind, id: RecordId)
        -> ClientResult<Record>;

    async fn create(&self, session: &Session, draft: &Draft) -> ClientResult<Record>;

    async fn update(&self, session: &Session, id: RecordId, draft: &Draft)
        -> ClientResult<Record>;

    async fn delete(&self, session: &Session, kind: ResourceKind, id: RecordId)
        -> ClientResult<()>;

    async fn procedures(&self, session: &Session) -> ClientResult<Vec<Procedure>>;
}
