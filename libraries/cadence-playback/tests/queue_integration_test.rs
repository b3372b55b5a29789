//! Queue resolution integration tests
//!
//! Real-world sessions driven through the public API: a client holding its
//! own state, pressing next/previous, toggling shuffle and repeat.

use cadence_core::{ContextKind, ContextRef, PlaybackContext, TrackId};
use cadence_playback::{
    resolve_next, resolve_previous, shuffle_order, upcoming, PlaybackState, RepeatMode,
    ResolveError, Resolution,
};

// ===== Test Helpers =====

fn album(ids: &[&str]) -> PlaybackContext {
    PlaybackContext::new(
        ContextRef::new(ContextKind::Album, "album-1"),
        ids.iter().map(|id| TrackId::new(*id)).collect(),
    )
}

/// Press next until the queue ends, returning the ids played
fn play_through(mut state: PlaybackState, max: usize) -> Vec<String> {
    let mut played = vec![state.current_track_id.as_str().to_string()];
    for _ in 0..max {
        match resolve_next(&state).unwrap() {
            Resolution::Track(track) => {
                played.push(track.track_id.as_str().to_string());
                state = state.follow(&track);
            }
            _ => break,
        }
    }
    played
}

// ===== Scenarios =====

#[test]
fn test_abc_next_from_b_then_end_of_queue() {
    let state = PlaybackState::new(album(&["A", "B", "C"]), TrackId::new("B"));

    let next = resolve_next(&state).unwrap().into_track().unwrap();
    assert_eq!(next.track_id, TrackId::new("C"));

    let state = state.follow(&next);
    assert_eq!(resolve_next(&state).unwrap(), Resolution::EndOfQueue);
}

#[test]
fn test_abc_repeat_all_from_c_wraps_to_a() {
    let state = PlaybackState::new(album(&["A", "B", "C"]), TrackId::new("C"))
        .with_repeat(RepeatMode::All);

    let next = resolve_next(&state).unwrap().into_track().unwrap();
    assert_eq!(next.track_id, TrackId::new("A"));
    assert!(next.wrapped);
}

#[test]
fn test_single_track_any_shuffle_no_repeat() {
    for shuffling in [false, true] {
        let mut state = PlaybackState::new(album(&["A"]), TrackId::new("A"));
        state.is_shuffling = shuffling;
        state.shuffle_seed = 99;

        assert_eq!(resolve_next(&state).unwrap(), Resolution::EndOfQueue);
        assert_eq!(resolve_previous(&state).unwrap(), Resolution::StartOfQueue);
    }
}

#[test]
fn test_missing_current_track_fails() {
    let state = PlaybackState::new(album(&["A", "B", "C"]), TrackId::new("X"));
    let err = resolve_next(&state).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidState { .. }));
    assert_eq!(err.to_string(), "Track X is not in the playback context");
}

// ===== Sessions =====

#[test]
fn test_full_album_play_through() {
    let state = PlaybackState::new(album(&["1", "2", "3", "4"]), TrackId::new("1"));
    assert_eq!(play_through(state, 10), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_shuffled_session_survives_restart() {
    let ids = ["1", "2", "3", "4", "5", "6", "7", "8"];
    let seed = 31337;
    let first = ids[shuffle_order(ids.len(), seed)[0]];

    let before = play_through(
        PlaybackState::new(album(&ids), TrackId::new(first)).shuffled(seed),
        20,
    );

    // A fresh process given only the client-held state resumes identically
    let resumed_from = &before[3];
    let resumed = play_through(
        PlaybackState::new(album(&ids), TrackId::new(resumed_from.as_str())).shuffled(seed),
        20,
    );

    assert_eq!(before.len(), ids.len());
    assert_eq!(&before[3..], resumed.as_slice());
}

#[test]
fn test_previous_retraces_shuffled_path() {
    let ids = ["a", "b", "c", "d", "e"];
    let seed = 8;
    let order = shuffle_order(ids.len(), seed);
    let mut state = PlaybackState::new(album(&ids), TrackId::new(ids[order[0]])).shuffled(seed);

    for _ in 0..3 {
        let next = resolve_next(&state).unwrap().into_track().unwrap();
        state = state.follow(&next);
    }
    assert_eq!(state.current_position, Some(order[3]));

    for expected in [order[2], order[1], order[0]] {
        let prev = resolve_previous(&state).unwrap().into_track().unwrap();
        assert_eq!(prev.position, expected);
        state = state.follow(&prev);
    }
    assert_eq!(resolve_previous(&state).unwrap(), Resolution::StartOfQueue);
}

#[test]
fn test_reshuffling_wrap_starts_new_lap_with_new_seed() {
    let ids = ["a", "b", "c", "d"];
    let seed = 4;
    let order = shuffle_order(ids.len(), seed);
    let state = PlaybackState::new(album(&ids), TrackId::new(ids[order[3]]))
        .shuffled(seed)
        .with_repeat(RepeatMode::All)
        .reshuffle_on_wrap(true);

    let wrapped = resolve_next(&state).unwrap().into_track().unwrap();
    assert!(wrapped.wrapped);
    assert_ne!(wrapped.shuffle_seed, seed);

    // The new lap traverses the new permutation in full
    let new_order = shuffle_order(ids.len(), wrapped.shuffle_seed);
    let lap = upcoming(&state.follow(&wrapped).with_repeat(RepeatMode::Off), 10).unwrap();
    let lap_positions: Vec<usize> = lap.iter().map(|t| t.position).collect();
    assert_eq!(lap_positions, new_order[1..].to_vec());
}

#[test]
fn test_toggling_shuffle_off_continues_in_natural_order() {
    let ids = ["a", "b", "c", "d", "e"];
    let state = PlaybackState::new(album(&ids), TrackId::new("c")).shuffled(17);
    let shuffled_next = resolve_next(&state).unwrap();

    let mut natural = state.clone();
    natural.is_shuffling = false;
    let next = resolve_next(&natural).unwrap().into_track().unwrap();
    assert_eq!(next.track_id, TrackId::new("d"));

    // Shuffle on again with the same seed restores the same successor
    assert_eq!(resolve_next(&state).unwrap(), shuffled_next);
}

#[test]
fn test_playlist_with_repeated_track_plays_each_occurrence() {
    let playlist = PlaybackContext::new(
        ContextRef::new(ContextKind::Playlist, "loop"),
        ["x", "y", "x", "z"].iter().map(|id| TrackId::new(*id)).collect(),
    );
    let state = PlaybackState::new(playlist, TrackId::new("x"));
    assert_eq!(play_through(state, 10), vec!["x", "y", "x", "z"]);
}
