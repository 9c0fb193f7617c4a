use sp2yt::types::{ArtistRef, RawTrack, SpotifyToken, Track, YouTubeCredentials};
use sp2yt::utils::*;

fn raw_track(id: Option<&str>, name: Option<&str>, artists: Option<&[&str]>) -> RawTrack {
    RawTrack {
        id: id.map(str::to_string),
        name: name.map(str::to_string),
        artists: artists.map(|names| {
            names
                .iter()
                .map(|n| ArtistRef {
                    name: n.to_string(),
                })
                .collect()
        }),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_generate_code_challenge_matches_rfc7636_example() {
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mJ92IJHeX4zCrF5LxeGhXX4-pGAmwk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_code_challenge_is_url_safe() {
    let challenge = generate_code_challenge(&generate_code_verifier());

    // SHA-256 digest, base64url without padding
    assert_eq!(challenge.len(), 43);
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));
    assert!(!challenge.contains('='));
}

#[test]
fn test_generate_csrf_state() {
    let state = generate_csrf_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_csrf_state());
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_playlist_id_from_url() {
    assert_eq!(
        playlist_id_from_url("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
    assert_eq!(
        playlist_id_from_url("https://open.spotify.com/playlist/abc123?si=deadbeef"),
        "abc123"
    );
    assert_eq!(
        playlist_id_from_url("https://open.spotify.com/playlist/abc123#top"),
        "abc123"
    );
    assert_eq!(playlist_id_from_url("abc123"), "abc123");
}

#[test]
fn test_playlist_id_from_url_with_trailing_slash_is_empty() {
    // Only the last segment counts; nothing else is validated.
    assert_eq!(playlist_id_from_url("https://open.spotify.com/playlist/"), "");
}

#[test]
fn test_hex_digest() {
    let digest = hex_digest(&["GET", "https://example.com"]);

    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(digest, hex_digest(&["GET", "https://example.com"]));
    // Part boundaries are significant
    assert_ne!(
        hex_digest(&["ab", "c"]),
        hex_digest(&["a", "bc"])
    );
}

#[test]
fn test_track_from_complete_raw_track() {
    let track = Track::try_from(raw_track(
        Some("t1"),
        Some("Song A"),
        Some(&["Artist X", "Artist Y"]),
    ))
    .expect("complete track");

    assert_eq!(track.id, "t1");
    assert_eq!(track.name, "Song A");
    assert_eq!(track.artists, vec!["Artist X", "Artist Y"]);
}

#[test]
fn test_track_from_incomplete_raw_track() {
    assert!(Track::try_from(raw_track(None, Some("Song A"), Some(&["X"]))).is_err());
    assert!(Track::try_from(raw_track(Some("t1"), None, Some(&["X"]))).is_err());
    assert!(Track::try_from(raw_track(Some("t1"), Some("Song A"), None)).is_err());
}

#[test]
fn test_spotify_token_usable() {
    let now = now_timestamp();
    let token = |expires_at| SpotifyToken {
        access_token: "abc".to_string(),
        expires_at,
    };

    assert!(token(now + 60).is_usable());
    assert!(!token(now.saturating_sub(1)).is_usable());
    assert!(
        !SpotifyToken {
            access_token: String::new(),
            expires_at: now + 60,
        }
        .is_usable()
    );
}

#[test]
fn test_youtube_credentials_validity_margin() {
    let now = now_timestamp();
    let creds = |expires_at| YouTubeCredentials {
        token: "ya29".to_string(),
        refresh_token: None,
        token_uri: "https://oauth2.googleapis.com/token".to_string(),
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        scopes: vec![],
        expires_at,
    };

    assert!(creds(now + 600).is_valid());
    // Expiring within the refresh margin already counts as invalid
    assert!(!creds(now + 120).is_valid());
    assert!(!creds(now.saturating_sub(10)).is_valid());
}
