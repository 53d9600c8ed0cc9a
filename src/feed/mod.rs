//! Feed events that drive body creation and growth
//!
//! A feed line is a JSON object `{"label": ..., "color": ...}`. A color
//! means a new label (spawn); no color means more activity on a known one
//! (growth). Lines without a `label` key are treated as raw stream
//! records and run through a [`LabelTracker`].

pub mod tracker;

pub use tracker::LabelTracker;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::sim::Color;

/// One event from the feed
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A label seen for the first time
    Spawn { label: String, color: Color },
    /// Repeated activity under an existing label
    Growth { label: String },
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    label: String,
    #[serde(default)]
    color: Option<String>,
}

impl FeedEvent {
    pub fn label(&self) -> &str {
        match self {
            FeedEvent::Spawn { label, .. } | FeedEvent::Growth { label } => label,
        }
    }

    /// Parse one feed line. Every failure is an [`Error::Feed`].
    pub fn from_json(line: &str) -> Result<Self> {
        let wire: WireEvent =
            serde_json::from_str(line).map_err(|e| Error::Feed(e.to_string()))?;
        if wire.label.trim().is_empty() {
            return Err(Error::Feed("empty label".into()));
        }
        match wire.color {
            Some(c) => {
                let color = Color::parse(&c).map_err(|e| Error::Feed(e.to_string()))?;
                Ok(FeedEvent::Spawn {
                    label: wire.label,
                    color,
                })
            }
            None => Ok(FeedEvent::Growth { label: wire.label }),
        }
    }

    /// Decode a line that is either a feed event or a raw stream record.
    ///
    /// The raw form is only tried when the line has no `label` key, so a
    /// malformed event reports its own error.
    pub fn decode_line(line: &str, tracker: &mut LabelTracker) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| Error::Feed(e.to_string()))?;
        if value.get("label").is_some() {
            Self::from_json(line)
        } else {
            tracker.observe_raw(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spawn() {
        let e = FeedEvent::from_json(r##"{"label": "enwiki", "color": "#1A2B3C"}"##).unwrap();
        assert_eq!(
            e,
            FeedEvent::Spawn {
                label: "enwiki".into(),
                color: Color::parse("#1A2B3C").unwrap(),
            }
        );
    }

    #[test]
    fn test_parse_growth_with_null_or_missing_color() {
        let a = FeedEvent::from_json(r#"{"label": "enwiki", "color": null}"#).unwrap();
        let b = FeedEvent::from_json(r#"{"label": "enwiki"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.label(), "enwiki");
        assert!(matches!(a, FeedEvent::Growth { .. }));
    }

    #[test]
    fn test_malformed_events_are_feed_errors() {
        for line in [
            "not json",
            r##"{"color": "#000000"}"##,
            r#"{"label": "  "}"#,
            r#"{"label": "x", "color": "red"}"#,
            r#"{"label": 5}"#,
        ] {
            let err = FeedEvent::from_json(line).unwrap_err();
            assert!(err.is_non_fatal(), "{line} gave {err}");
        }
    }

    #[test]
    fn test_decode_line_picks_form_by_label_key() {
        let mut tracker = LabelTracker::new(1);
        let e = FeedEvent::decode_line(r##"{"label": "enwiki", "color": "#010203"}"##, &mut tracker)
            .unwrap();
        assert!(matches!(e, FeedEvent::Spawn { .. }));
        assert_eq!(tracker.label_count(), 0);

        let e = FeedEvent::decode_line(r#"{"database": "dewiki"}"#, &mut tracker).unwrap();
        assert_eq!(e.label(), "dewiki");
        assert_eq!(tracker.count("dewiki"), 1);
    }

    #[test]
    fn test_decode_line_keeps_event_error() {
        let mut tracker = LabelTracker::new(1);
        let err = FeedEvent::decode_line(r#"{"label": "x", "color": "red"}"#, &mut tracker)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("color"), "{msg}");
        assert!(!msg.contains("database"), "{msg}");
        assert!(err.is_non_fatal());

        assert!(FeedEvent::decode_line("not json", &mut tracker).unwrap_err().is_non_fatal());
        assert_eq!(tracker.label_count(), 0);
    }
}
