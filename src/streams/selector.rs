use serde::Serialize;
use tracing::warn;

use super::{descriptor::StreamDescriptor, render::PlaybackInstruction};

/// Query marker of a pre-signed URL.
const PRESIGNED_MARKER: &str = "sign=";

/// Delivery-format preference; lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StreamRank {
    Mp4 = 0,
    Hls = 1,
    Other = 2,
}

impl StreamRank {
    pub fn of(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains(".mp4") {
            Self::Mp4
        } else if url.contains("m3u8") {
            Self::Hls
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnusableReason {
    /// The descriptor has no URL at all.
    MissingUrl,
    /// Neither a pre-signed URL nor a sign cookie.
    NoCredentials,
}

impl std::fmt::Display for UnusableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUrl => f.write_str("no stream URL"),
            Self::NoCredentials => f.write_str("no signature, no cookie"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RenderedStream {
    Playable {
        stream: StreamDescriptor,
        instruction: PlaybackInstruction,
    },
    Unusable {
        stream: StreamDescriptor,
        reason: UnusableReason,
    },
}

impl RenderedStream {
    pub fn stream(&self) -> &StreamDescriptor {
        match self {
            Self::Playable { stream, .. } | Self::Unusable { stream, .. } => stream,
        }
    }

    pub fn instruction(&self) -> Option<&PlaybackInstruction> {
        match self {
            Self::Playable { instruction, .. } => Some(instruction),
            Self::Unusable { .. } => None,
        }
    }
}

/// Selector result. An empty stream list is its own outcome, never an empty
/// `Ranked`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "streams", rename_all = "camelCase")]
pub enum Selection {
    NoStreams,
    Ranked(Vec<RenderedStream>),
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoStreams)
    }

    pub fn playable(&self) -> impl Iterator<Item = &PlaybackInstruction> {
        let rendered: &[RenderedStream] = match self {
            Self::NoStreams => &[],
            Self::Ranked(rendered) => rendered,
        };
        rendered.iter().filter_map(RenderedStream::instruction)
    }
}

/// Stable sort by [`StreamRank`]; equal ranks keep API order.
pub fn rank_streams(mut streams: Vec<StreamDescriptor>) -> Vec<StreamDescriptor> {
    streams.sort_by_key(|s| StreamRank::of(&s.url));
    streams
}

/// A `sign=` URL wins over a cookie; an empty cookie counts as absent.
pub fn classify(
    stream: &StreamDescriptor,
    referer: &str,
) -> Result<PlaybackInstruction, UnusableReason> {
    if stream.url.is_empty() {
        return Err(UnusableReason::MissingUrl);
    }

    if stream.url.contains(PRESIGNED_MARKER) {
        return Ok(PlaybackInstruction::direct(&stream.url));
    }

    match stream.sign_cookie.as_deref() {
        Some(cookie) if !cookie.is_empty() => Ok(PlaybackInstruction::cookie_protected(
            &stream.url,
            referer,
            cookie,
        )),
        _ => Err(UnusableReason::NoCredentials),
    }
}

/// Ranks the streams and derives the playback instruction for each.
///
/// `referer` is the API origin, sent along with the cookie to media hosts.
pub fn select_and_render(streams: Vec<StreamDescriptor>, referer: &str) -> Selection {
    if streams.is_empty() {
        return Selection::NoStreams;
    }

    let rendered = rank_streams(streams)
        .into_iter()
        .map(|stream| match classify(&stream, referer) {
            Ok(instruction) => RenderedStream::Playable {
                stream,
                instruction,
            },
            Err(reason) => {
                warn!("Stream unusable ({}): {:?}", reason, stream.url);
                RenderedStream::Unusable { stream, reason }
            }
        })
        .collect();

    Selection::Ranked(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::render::AccessKind;

    const ORIGIN: &str = "https://api.inmoviebox.com";

    fn urls(selection: &Selection) -> Vec<&str> {
        match selection {
            Selection::NoStreams => Vec::new(),
            Selection::Ranked(rendered) => {
                rendered.iter().map(|r| r.stream().url.as_str()).collect()
            }
        }
    }

    #[test]
    fn test_rank_of_url() {
        assert_eq!(StreamRank::of("https://cdn/a.MP4?x=1"), StreamRank::Mp4);
        assert_eq!(StreamRank::of("https://cdn/master.M3U8"), StreamRank::Hls);
        assert_eq!(StreamRank::of("https://cdn/manifest.mpd"), StreamRank::Other);
        assert_eq!(StreamRank::of(""), StreamRank::Other);
    }

    #[test]
    fn test_sorted_input_keeps_order() {
        let streams = vec![
            StreamDescriptor::new("a.mp4?sign=1"),
            StreamDescriptor::new("b.m3u8?sign=1"),
            StreamDescriptor::new("c.mpd?sign=1"),
        ];
        let selection = select_and_render(streams, ORIGIN);
        assert_eq!(urls(&selection), ["a.mp4?sign=1", "b.m3u8?sign=1", "c.mpd?sign=1"]);
    }

    #[test]
    fn test_reversed_input_is_reordered() {
        let streams = vec![
            StreamDescriptor::new("c.mpd"),
            StreamDescriptor::new("b.m3u8"),
            StreamDescriptor::new("a.mp4"),
        ];
        let selection = select_and_render(streams, ORIGIN);
        assert_eq!(urls(&selection), ["a.mp4", "b.m3u8", "c.mpd"]);
    }

    #[test]
    fn test_ties_keep_api_order() {
        let streams = vec![
            StreamDescriptor::new("https://cdn/2.mpd"),
            StreamDescriptor::new("https://cdn/720.mp4"),
            StreamDescriptor::new("https://cdn/1.mpd"),
            StreamDescriptor::new("https://cdn/1080.mp4"),
        ];
        let ranked = rank_streams(streams);
        let order: Vec<&str> = ranked.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            order,
            [
                "https://cdn/720.mp4",
                "https://cdn/1080.mp4",
                "https://cdn/2.mpd",
                "https://cdn/1.mpd"
            ]
        );
    }

    #[test]
    fn test_presigned_wins_over_cookie() {
        let stream = StreamDescriptor::new("https://cdn/v.mp4?sign=abc&t=1").with_sign_cookie("foo=bar");
        let instruction = classify(&stream, ORIGIN).unwrap();
        assert_eq!(instruction.access, AccessKind::Direct);
        assert!(instruction.headers.is_empty());
    }

    #[test]
    fn test_cookie_protected() {
        let stream = StreamDescriptor::new("https://cdn/v.mpd").with_sign_cookie("foo=bar");
        let instruction = classify(&stream, ORIGIN).unwrap();
        assert_eq!(instruction.access, AccessKind::CookieProtected);
        assert_eq!(instruction.header("Cookie"), Some("foo=bar"));
        assert_eq!(instruction.header("Referer"), Some(ORIGIN));
    }

    #[test]
    fn test_empty_cookie_is_unusable() {
        let stream = StreamDescriptor::new("https://cdn/v.mpd").with_sign_cookie("");
        assert_eq!(classify(&stream, ORIGIN), Err(UnusableReason::NoCredentials));
    }

    #[test]
    fn test_missing_url_is_unusable() {
        let stream = StreamDescriptor::new("").with_sign_cookie("foo=bar");
        assert_eq!(classify(&stream, ORIGIN), Err(UnusableReason::MissingUrl));
    }

    #[test]
    fn test_unusable_does_not_drop_others() {
        let streams = vec![
            StreamDescriptor::new("https://cdn/x.mpd"),
            StreamDescriptor::new("https://cdn/y.mpd").with_sign_cookie("k=v"),
            StreamDescriptor::new("https://cdn/z.mp4?sign=s"),
        ];
        let Selection::Ranked(rendered) = select_and_render(streams, ORIGIN) else {
            panic!("expected ranked streams");
        };

        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0].stream().url, "https://cdn/z.mp4?sign=s");
        assert!(matches!(
            rendered[1],
            RenderedStream::Unusable {
                reason: UnusableReason::NoCredentials,
                ..
            }
        ));
        assert_eq!(
            rendered[2].instruction().map(|i| i.access),
            Some(AccessKind::CookieProtected)
        );
    }

    #[test]
    fn test_empty_list_is_distinct_from_all_unusable() {
        let empty = select_and_render(Vec::new(), ORIGIN);
        assert_eq!(empty, Selection::NoStreams);
        assert!(empty.is_empty());

        let all_unusable = select_and_render(vec![StreamDescriptor::new("https://cdn/x.mpd")], ORIGIN);
        assert!(!all_unusable.is_empty());
        assert_ne!(empty, all_unusable);
        assert_eq!(all_unusable.playable().count(), 0);
    }
}
