//! Queue resolver
//!
//! Pure functions of [`PlaybackState`]: no I/O, no shared state, no history
//! writes. Recording a play is the caller's job.

use crate::error::{ResolveError, Result};
use crate::order::EffectiveOrder;
use crate::shuffle::{next_seed, shuffle_order};
use crate::types::{PlaybackState, RepeatMode, Resolution, TrackRef};

/// Attempts at drawing a reshuffle that does not start with the track that
/// just played.
const MAX_RESHUFFLE_ATTEMPTS: usize = 32;

/// Track after the current one, or `EndOfQueue`
///
/// # Errors
///
/// `EmptyContext` when the context has no tracks, `InvalidState` when the
/// current track is not in the context (or not at the given position).
pub fn resolve_next(state: &PlaybackState) -> Result<Resolution> {
    let current = locate(state)?;

    if state.repeat_mode == RepeatMode::One {
        return Ok(Resolution::Track(track_ref(state, current, state.shuffle_seed, false)));
    }

    let order = effective_order(state);
    let slot = order.slot_of(current);

    if slot + 1 < order.len() {
        let index = order.index_at(slot + 1);
        return Ok(Resolution::Track(track_ref(state, index, state.shuffle_seed, false)));
    }

    if state.repeat_mode != RepeatMode::All {
        return Ok(Resolution::EndOfQueue);
    }

    if state.is_shuffling && state.reshuffle_on_wrap {
        let (seed, first) = reshuffled_first(state, current);
        return Ok(Resolution::Track(track_ref(state, first, seed, true)));
    }

    Ok(Resolution::Track(track_ref(
        state,
        order.first(),
        state.shuffle_seed,
        true,
    )))
}

/// Track before the current one, or `StartOfQueue`
///
/// Walks the same effective ordering as [`resolve_next`] backwards. Wrapping
/// under repeat-all goes to the last element and never reshuffles.
///
/// # Errors
///
/// Same as [`resolve_next`].
pub fn resolve_previous(state: &PlaybackState) -> Result<Resolution> {
    let current = locate(state)?;

    if state.repeat_mode == RepeatMode::One {
        return Ok(Resolution::Track(track_ref(state, current, state.shuffle_seed, false)));
    }

    let order = effective_order(state);
    let slot = order.slot_of(current);

    if slot > 0 {
        let index = order.index_at(slot - 1);
        return Ok(Resolution::Track(track_ref(state, index, state.shuffle_seed, false)));
    }

    if state.repeat_mode == RepeatMode::All {
        return Ok(Resolution::Track(track_ref(
            state,
            order.last(),
            state.shuffle_seed,
            true,
        )));
    }

    Ok(Resolution::StartOfQueue)
}

/// Preview of up to `limit` tracks `resolve_next` would return in sequence
///
/// Stops at `EndOfQueue`. Repeat-one yields the current track once and
/// repeat-all stops after one lap of the context.
///
/// # Errors
///
/// Same as [`resolve_next`].
pub fn upcoming(state: &PlaybackState, limit: usize) -> Result<Vec<TrackRef>> {
    let current = locate(state)?;

    if state.repeat_mode == RepeatMode::One {
        let mut tracks = vec![track_ref(state, current, state.shuffle_seed, false)];
        tracks.truncate(limit);
        return Ok(tracks);
    }

    let cap = limit.min(state.context.len());
    let mut tracks = Vec::with_capacity(cap);
    let mut cursor = state.clone();

    while tracks.len() < cap {
        match resolve_next(&cursor)? {
            Resolution::Track(track) => {
                cursor = cursor.follow(&track);
                tracks.push(track);
            }
            Resolution::EndOfQueue | Resolution::StartOfQueue => break,
        }
    }

    Ok(tracks)
}

/// Context index of the current occurrence
fn locate(state: &PlaybackState) -> Result<usize> {
    let context = &state.context;
    if context.is_empty() {
        return Err(ResolveError::EmptyContext);
    }

    let invalid = || ResolveError::InvalidState {
        track_id: state.current_track_id.clone(),
        position: state.current_position,
    };

    match state.current_position {
        Some(position) => match context.get(position) {
            Some(track_id) if *track_id == state.current_track_id => Ok(position),
            _ => Err(invalid()),
        },
        None => context
            .position_of(&state.current_track_id)
            .ok_or_else(invalid),
    }
}

fn effective_order(state: &PlaybackState) -> EffectiveOrder {
    EffectiveOrder::new(
        state.context.len(),
        state.is_shuffling,
        state.shuffle_seed,
    )
}

fn track_ref(state: &PlaybackState, index: usize, shuffle_seed: u64, wrapped: bool) -> TrackRef {
    TrackRef {
        track_id: state.context.tracks()[index].clone(),
        position: index,
        shuffle_seed,
        wrapped,
    }
}

/// New seed and the first index of its permutation
///
/// Skips permutations that would replay the track that just finished,
/// unless every track in the context is that same track.
fn reshuffled_first(state: &PlaybackState, current: usize) -> (u64, usize) {
    let context = &state.context;
    let current_track = &context.tracks()[current];
    let has_other = context.tracks().iter().any(|t| t != current_track);

    let mut seed = next_seed(state.shuffle_seed);
    let mut first = shuffle_order(context.len(), seed)[0];

    if has_other {
        for _ in 0..MAX_RESHUFFLE_ATTEMPTS {
            if context.tracks()[first] != *current_track {
                break;
            }
            seed = next_seed(seed);
            first = shuffle_order(context.len(), seed)[0];
        }
    }

    (seed, first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::shuffle_order;
    use cadence_core::{ContextKind, ContextRef, PlaybackContext, TrackId};

    fn context(ids: &[&str]) -> PlaybackContext {
        PlaybackContext::new(
            ContextRef::new(ContextKind::Album, "album-1"),
            ids.iter().map(|id| TrackId::new(*id)).collect(),
        )
    }

    fn state(ids: &[&str], current: &str) -> PlaybackState {
        PlaybackState::new(context(ids), TrackId::new(current))
    }

    fn next_id(state: &PlaybackState) -> Option<String> {
        resolve_next(state)
            .unwrap()
            .into_track()
            .map(|t| t.track_id.as_str().to_string())
    }

    fn previous_id(state: &PlaybackState) -> Option<String> {
        resolve_previous(state)
            .unwrap()
            .into_track()
            .map(|t| t.track_id.as_str().to_string())
    }

    #[test]
    fn next_in_natural_order() {
        let s = state(&["A", "B", "C"], "B");
        assert_eq!(next_id(&s).as_deref(), Some("C"));
    }

    #[test]
    fn next_at_end_without_repeat_is_end_of_queue() {
        let s = state(&["A", "B", "C"], "C");
        assert_eq!(resolve_next(&s).unwrap(), Resolution::EndOfQueue);
    }

    #[test]
    fn next_at_end_with_repeat_all_wraps() {
        let s = state(&["A", "B", "C"], "C").with_repeat(RepeatMode::All);
        let track = resolve_next(&s).unwrap().into_track().unwrap();
        assert_eq!(track.track_id.as_str(), "A");
        assert_eq!(track.position, 0);
        assert!(track.wrapped);
    }

    #[test]
    fn previous_at_start_without_repeat_is_start_of_queue() {
        let s = state(&["A", "B", "C"], "A");
        assert_eq!(resolve_previous(&s).unwrap(), Resolution::StartOfQueue);
    }

    #[test]
    fn previous_at_start_with_repeat_all_wraps_to_last() {
        let s = state(&["A", "B", "C"], "A").with_repeat(RepeatMode::All);
        assert_eq!(previous_id(&s).as_deref(), Some("C"));
    }

    #[test]
    fn single_track_context_exhausts_both_ways() {
        for shuffling in [false, true] {
            let mut s = state(&["A"], "A");
            s.is_shuffling = shuffling;
            assert_eq!(resolve_next(&s).unwrap(), Resolution::EndOfQueue);
            assert_eq!(resolve_previous(&s).unwrap(), Resolution::StartOfQueue);
        }
    }

    #[test]
    fn repeat_one_pins_current_track() {
        let s = state(&["A", "B", "C"], "C").with_repeat(RepeatMode::One);
        assert_eq!(next_id(&s).as_deref(), Some("C"));
        assert_eq!(previous_id(&s).as_deref(), Some("C"));

        let shuffled = s.shuffled(11);
        assert_eq!(next_id(&shuffled).as_deref(), Some("C"));
    }

    #[test]
    fn unknown_current_track_is_invalid_state() {
        let s = state(&["A", "B"], "Z");
        assert!(matches!(
            resolve_next(&s),
            Err(ResolveError::InvalidState { .. })
        ));
        assert!(matches!(
            resolve_previous(&s),
            Err(ResolveError::InvalidState { .. })
        ));
    }

    #[test]
    fn repeat_one_still_validates_membership() {
        let s = state(&["A"], "Z").with_repeat(RepeatMode::One);
        assert!(matches!(
            resolve_next(&s),
            Err(ResolveError::InvalidState { .. })
        ));
    }

    #[test]
    fn empty_context_fails() {
        let s = state(&[], "A");
        assert_eq!(resolve_next(&s), Err(ResolveError::EmptyContext));
        assert_eq!(resolve_previous(&s), Err(ResolveError::EmptyContext));
        assert_eq!(upcoming(&s, 5), Err(ResolveError::EmptyContext));
    }

    #[test]
    fn position_disambiguates_duplicates() {
        let ids = ["A", "B", "A", "C"];
        let first = state(&ids, "A");
        assert_eq!(next_id(&first).as_deref(), Some("B"));

        let second = state(&ids, "A").at_position(2);
        let track = resolve_next(&second).unwrap().into_track().unwrap();
        assert_eq!(track.track_id.as_str(), "C");
        assert_eq!(track.position, 3);
    }

    #[test]
    fn mismatched_position_is_invalid_state() {
        let s = state(&["A", "B"], "A").at_position(1);
        assert_eq!(
            resolve_next(&s),
            Err(ResolveError::InvalidState {
                track_id: TrackId::new("A"),
                position: Some(1),
            })
        );
        let out_of_range = state(&["A", "B"], "A").at_position(9);
        assert!(resolve_next(&out_of_range).is_err());
    }

    #[test]
    fn shuffled_next_follows_permutation() {
        let ids = ["A", "B", "C", "D", "E", "F"];
        let seed = 2024;
        let order = shuffle_order(ids.len(), seed);

        let s = state(&ids, ids[order[0]]).shuffled(seed);
        let track = resolve_next(&s).unwrap().into_track().unwrap();
        assert_eq!(track.position, order[1]);
        assert_eq!(track.shuffle_seed, seed);
    }

    #[test]
    fn shuffled_wrap_reuses_permutation_by_default() {
        let ids = ["A", "B", "C", "D", "E"];
        let seed = 77;
        let order = shuffle_order(ids.len(), seed);
        let last = ids[order[ids.len() - 1]];

        let s = state(&ids, last).shuffled(seed).with_repeat(RepeatMode::All);
        let track = resolve_next(&s).unwrap().into_track().unwrap();
        assert_eq!(track.position, order[0]);
        assert_eq!(track.shuffle_seed, seed);
        assert!(track.wrapped);
    }

    #[test]
    fn reshuffle_on_wrap_draws_new_seed() {
        let ids = ["A", "B", "C", "D", "E"];
        let seed = 77;
        let order = shuffle_order(ids.len(), seed);
        let last_index = order[ids.len() - 1];

        let s = state(&ids, ids[last_index])
            .shuffled(seed)
            .with_repeat(RepeatMode::All)
            .reshuffle_on_wrap(true);
        let track = resolve_next(&s).unwrap().into_track().unwrap();

        assert!(track.wrapped);
        assert_ne!(track.shuffle_seed, seed);
        assert_eq!(shuffle_order(ids.len(), track.shuffle_seed)[0], track.position);
        assert_ne!(track.position, last_index);
    }

    #[test]
    fn reshuffle_is_deterministic() {
        let ids = ["A", "B", "C"];
        let order = shuffle_order(ids.len(), 5);
        let s = state(&ids, ids[order[2]])
            .shuffled(5)
            .with_repeat(RepeatMode::All)
            .reshuffle_on_wrap(true);
        assert_eq!(resolve_next(&s).unwrap(), resolve_next(&s).unwrap());
    }

    #[test]
    fn reshuffle_flag_ignored_when_not_shuffling() {
        let s = state(&["A", "B"], "B")
            .with_repeat(RepeatMode::All)
            .reshuffle_on_wrap(true);
        let track = resolve_next(&s).unwrap().into_track().unwrap();
        assert_eq!(track.track_id.as_str(), "A");
        assert_eq!(track.shuffle_seed, 0);
    }

    #[test]
    fn upcoming_lists_rest_of_context() {
        let s = state(&["A", "B", "C", "D"], "B");
        let ids: Vec<String> = upcoming(&s, 10)
            .unwrap()
            .into_iter()
            .map(|t| t.track_id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["C", "D"]);
    }

    #[test]
    fn upcoming_respects_limit_and_laps_once_with_repeat_all() {
        let s = state(&["A", "B", "C"], "B").with_repeat(RepeatMode::All);
        assert_eq!(upcoming(&s, 1).unwrap().len(), 1);

        let ids: Vec<String> = upcoming(&s, 10)
            .unwrap()
            .into_iter()
            .map(|t| t.track_id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn upcoming_with_repeat_one_is_current_track() {
        let s = state(&["A", "B"], "A").with_repeat(RepeatMode::One);
        let tracks = upcoming(&s, 5).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].track_id.as_str(), "A");
        assert!(upcoming(&s, 0).unwrap().is_empty());
    }
}
