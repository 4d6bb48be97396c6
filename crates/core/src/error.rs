use crate::record::RecordId;
use crate::resource::ResourceKind;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no access token stored; log in first")]
    MissingToken,
    #[error("access token expired at {0}")]
    SessionExpired(chrono::DateTime<chrono::Utc>),
    #[error("request failed: {0}")]
    Transport(BoxError),
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
    #[error("failed to decode response: {0}")]
    Decode(BoxError),
    #[error("{kind} record {id} is not in the current list")]
    UnknownRecord { kind: ResourceKind, id: RecordId },
    #[error("field `{0}` is required")]
    MissingField(&'static str),
    #[error("unknown field `{field}` for {kind}")]
    UnknownField { kind: ResourceKind, field: String },
    #[error("draft for {draft} cannot be submitted to {list}")]
    DraftKindMismatch {
        draft: ResourceKind,
        list: ResourceKind,
    },
    #[error("server answered for {kind} {returned} when {expected} was updated")]
    IdMismatch {
        kind: ResourceKind,
        expected: RecordId,
        returned: RecordId,
    },
    #[error("no form is open")]
    NoOpenForm,
    #[error("failed to read token file: {0}")]
    TokenRead(std::io::Error),
    #[error("failed to write token file: {0}")]
    TokenWrite(std::io::Error),
}

impl ClientError {
    /// True when the server rejected the credential.
    pub fn is_unauthorised(&self) -> bool {
        matches!(
            self,
            ClientError::UnexpectedStatus {
                status: 401 | 403,
                ..
            }
        )
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
