use crate::draft::Draft;
use crate::record::RecordId;

/// What a resource list currently shows on top of its table.
///
/// One tagged value replaces the separate add/view/update open flags and the selected id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Closed,
    Viewing(RecordId),
    Editing {
        id: RecordId,
        draft: Draft,
    },
    Creating(Draft),
}

impl ViewState {
    /// Record targeted by the open panel, if any.
    pub fn selection(&self) -> Option<RecordId> {
        match self {
            ViewState::Viewing(id) | ViewState::Editing { id, .. } => Some(*id),
            ViewState::Closed | ViewState::Creating(_) => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            ViewState::Editing { draft, .. } | ViewState::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            ViewState::Editing { draft, .. } | ViewState::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ViewState::Closed)
    }
}
