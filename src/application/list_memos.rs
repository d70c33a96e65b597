//! List memos use case

use crate::application::MemoStore;
use crate::domain::{Memo, MemoId};
use crate::error::{MemoError, Result};
use crate::infrastructure::DocumentStore;

/// Sort newest date first. The sort is stable, so memos sharing a date keep
/// their store order.
pub fn sort_by_date_desc(memos: &mut [Memo]) {
    memos.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Service producing the ordered memo list shown to users
pub struct MemoListService<'a, S> {
    memos: &'a MemoStore<S>,
}

impl<'a, S: DocumentStore> MemoListService<'a, S> {
    pub fn new(memos: &'a MemoStore<S>) -> Self {
        MemoListService { memos }
    }

    /// All memos, descending by date
    pub fn list_sorted(&self) -> Result<Vec<Memo>> {
        let mut memos = self.memos.list_all()?;
        sort_by_date_desc(&mut memos);
        Ok(memos)
    }

    /// Map 1-based positions in the sorted list to memo ids
    pub fn resolve_positions(&self, positions: &[usize]) -> Result<Vec<MemoId>> {
        let memos = self.list_sorted()?;

        positions
            .iter()
            .map(|&position| {
                position
                    .checked_sub(1)
                    .and_then(|index| memos.get(index))
                    .map(|memo| memo.id.clone())
                    .ok_or_else(|| MemoError::InvalidPosition {
                        position,
                        len: memos.len(),
                    })
            })
            .collect()
    }
}
