//! Inspiration gallery domain.
//!
//! 灵感画廊：只追加的条目列表与单飞加载标志。

use serde::{Deserialize, Serialize};

/// Number of items fetched per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Display-only reference to a gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub url: String,
    /// 1-based position in the gallery.
    pub ordinal: u64,
}

/// Offset cursor for the next batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

/// Gallery state.
///
/// `is_loading` is true for exactly the lifetime of one outstanding fetch.
/// `items` only ever grows at the tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryState {
    items: Vec<ItemRef>,
    is_loading: bool,
}

impl GalleryState {
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Claims the single fetch slot.
    ///
    /// Returns `None` while another fetch is outstanding; the caller must drop
    /// the request rather than queue it.
    pub fn try_begin_fetch(&mut self, limit: usize) -> Option<PageRequest> {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        Some(PageRequest {
            offset: self.items.len(),
            limit,
        })
    }

    /// Appends a completed batch in arrival order and releases the slot.
    pub fn complete_fetch(&mut self, batch: Vec<ItemRef>) -> usize {
        let appended = batch.len();
        self.items.extend(batch);
        self.is_loading = false;
        appended
    }

    /// Releases the slot without touching `items`.
    pub fn abort_fetch(&mut self) {
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn batch(offset: usize, limit: usize) -> Vec<ItemRef> {
        (0..limit)
            .map(|i| {
                let ordinal = (offset + i + 1) as u64;
                ItemRef {
                    url: format!("/img/{}", ordinal),
                    ordinal,
                }
            })
            .collect()
    }

    #[test]
    fn begin_fetch_uses_current_length_as_offset() {
        let mut state = GalleryState::default();
        let first = state.try_begin_fetch(DEFAULT_BATCH_SIZE).unwrap();
        assert_eq!(first, PageRequest { offset: 0, limit: 10 });
        state.complete_fetch(batch(first.offset, first.limit));

        let second = state.try_begin_fetch(DEFAULT_BATCH_SIZE).unwrap();
        assert_eq!(second.offset, 10);
    }

    #[test]
    fn second_begin_while_loading_is_rejected() {
        let mut state = GalleryState::default();
        assert!(state.try_begin_fetch(10).is_some());
        assert!(state.is_loading());
        assert!(state.try_begin_fetch(10).is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn abort_releases_slot_and_keeps_items() {
        let mut state = GalleryState::default();
        let request = state.try_begin_fetch(10).unwrap();
        state.complete_fetch(batch(request.offset, request.limit));

        state.try_begin_fetch(10).unwrap();
        state.abort_fetch();

        assert!(!state.is_loading());
        assert_eq!(state.len(), 10);
    }

    #[test]
    fn complete_fetch_preserves_arrival_order() {
        let mut state = GalleryState::default();
        state.try_begin_fetch(3).unwrap();
        let mut arrived = batch(0, 3);
        arrived.reverse();
        state.complete_fetch(arrived.clone());
        assert_eq!(state.items(), arrived.as_slice());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Begin,
        Complete,
        Abort,
    }

    proptest! {
        #[test]
        fn prop_items_are_append_only(
            ops in prop::collection::vec(
                prop_oneof![Just(Op::Begin), Just(Op::Complete), Just(Op::Abort)],
                0..100,
            )
        ) {
            let mut state = GalleryState::default();
            let mut outstanding: Option<PageRequest> = None;

            for op in ops {
                let before = state.items().to_vec();
                match op {
                    Op::Begin => {
                        let claimed = state.try_begin_fetch(DEFAULT_BATCH_SIZE);
                        prop_assert_eq!(claimed.is_some(), outstanding.is_none());
                        if claimed.is_some() {
                            outstanding = claimed;
                        }
                    }
                    Op::Complete => {
                        if let Some(request) = outstanding.take() {
                            let appended = state.complete_fetch(batch(request.offset, request.limit));
                            prop_assert_eq!(appended, DEFAULT_BATCH_SIZE);
                            prop_assert_eq!(state.len(), before.len() + DEFAULT_BATCH_SIZE);
                        }
                    }
                    Op::Abort => {
                        if outstanding.take().is_some() {
                            state.abort_fetch();
                        }
                    }
                }

                prop_assert_eq!(&state.items()[..before.len()], before.as_slice());
                prop_assert_eq!(state.is_loading(), outstanding.is_some());
            }
        }
    }
}
