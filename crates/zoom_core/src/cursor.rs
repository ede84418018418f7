//! Custom follow-cursor: `--cursor` parsing, presets and the follow state machine.
//!
//! A container opts in with a `--cursor` custom property. The value is either
//! a preset name (`dot`) or a quoted HTML literal using string escaping, for
//! example `"<div class=\"zoom-follow-cursor ring\"></div>"`.

use std::collections::HashMap;

use crate::constants::{DOT_PRESET, DOT_PRESET_MARKUP};
use crate::geometry::{Point, Rect};
use crate::input::{InputEvent, InputKind, InputSource};

/// Named cursor markups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPresets {
    presets: HashMap<String, String>,
}

impl Default for CursorPresets {
    fn default() -> Self {
        let mut presets = HashMap::new();
        presets.insert(DOT_PRESET.to_string(), DOT_PRESET_MARKUP.to_string());
        Self { presets }
    }
}

impl CursorPresets {
    /// Built-in presets plus `extra`; entries in `extra` win on name clashes.
    pub fn with_extra<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut presets = Self::default();
        presets.presets.extend(extra);
        presets
    }

    /// Markup registered under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.presets.get(name).map(String::as_str)
    }
}

/// A parsed `--cursor` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSpec {
    value: String,
    malformed: bool,
}

impl CursorSpec {
    /// Parse a computed `--cursor` value. Returns `None` when unset.
    ///
    /// Quoted values are unescaped and unquoted. A literal that does not
    /// unescape cleanly is kept with its quotes stripped and flagged as
    /// malformed; it is still used.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        if !value.starts_with('"') {
            return Some(Self {
                value: value.to_string(),
                malformed: false,
            });
        }

        let (unescaped, malformed) = match unescape_literal(value) {
            Ok(unescaped) => (unescaped, false),
            Err(e) => {
                log::warn!("Cursor literal did not unescape, using it as-is: {}", e);
                (value.to_string(), true)
            }
        };
        Some(Self {
            value: strip_outer(&unescaped).to_string(),
            malformed,
        })
    }

    /// The value after unquoting: a preset name or raw markup.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the literal failed to unescape.
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Markup to insert: the preset's if the value names one, else the value.
    pub fn markup<'a>(&'a self, presets: &'a CursorPresets) -> &'a str {
        presets.get(&self.value).unwrap_or(&self.value)
    }
}

/// Unescape a quoted literal with JSON string rules.
///
/// Bare quotes (not preceded by an odd run of backslashes) and a dangling
/// trailing backslash are escaped first so the whole value, surrounding
/// quotes included, reads as one string.
fn unescape_literal(quoted: &str) -> Result<String, serde_json::Error> {
    let mut escaped = String::with_capacity(quoted.len() + 8);
    let mut backslashes = 0usize;
    for c in quoted.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                if backslashes % 2 == 0 {
                    escaped.push('\\');
                }
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
        escaped.push(c);
    }
    if backslashes % 2 == 1 {
        escaped.push('\\');
    }

    serde_json::from_str::<String>(&format!("\"{escaped}\""))
}

/// Drop the first and last character.
fn strip_outer(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// What the caller should do with the cursor element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorUpdate {
    Ignored,
    /// Add `follow-cursor`.
    Show,
    /// Translate the cursor element to this container-relative point.
    Move(Point),
    /// Remove `follow-cursor`.
    Hide,
}

/// Follow-cursor state for one container.
///
/// Independent of the zoom lock: the cursor keeps following while zoom
/// tracking is frozen.
#[derive(Debug, Clone, Default)]
pub struct CursorFollower {
    visible: bool,
    position: Option<Point>,
}

impl CursorFollower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// React to one event. Only mouse enter/move/leave matter.
    pub fn handle(&mut self, event: &InputEvent, rect: Rect) -> CursorUpdate {
        if event.source != InputSource::Mouse {
            return CursorUpdate::Ignored;
        }
        match event.kind {
            InputKind::Enter => {
                self.visible = true;
                CursorUpdate::Show
            }
            InputKind::Move => match event.client {
                Some(client) => {
                    let position = rect.relative(client);
                    self.position = Some(position);
                    CursorUpdate::Move(position)
                }
                None => CursorUpdate::Ignored,
            },
            InputKind::Leave => {
                self.visible = false;
                CursorUpdate::Hide
            }
            InputKind::TouchEnd | InputKind::Select => CursorUpdate::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_cursor() {
        assert_eq!(CursorSpec::parse(""), None);
        assert_eq!(CursorSpec::parse("   "), None);
    }

    #[test]
    fn test_bare_preset_name() {
        let presets = CursorPresets::default();
        let spec = CursorSpec::parse(" dot ").unwrap();

        assert_eq!(spec.markup(&presets), DOT_PRESET_MARKUP);
    }

    #[test]
    fn test_quoted_preset_name() {
        let presets = CursorPresets::default();
        let spec = CursorSpec::parse("\"dot\"").unwrap();

        assert_eq!(spec.value(), "dot");
        assert_eq!(spec.markup(&presets), DOT_PRESET_MARKUP);
    }

    #[test]
    fn test_escaped_literal() {
        let presets = CursorPresets::default();
        let spec = CursorSpec::parse(r#""<div class=\"x\"></div>""#).unwrap();

        assert!(!spec.is_malformed());
        assert_eq!(spec.markup(&presets), r#"<div class="x"></div>"#);
    }

    #[test]
    fn test_escaped_backslash() {
        let spec = CursorSpec::parse(r#""<span>a\\b</span>""#).unwrap();

        assert_eq!(spec.value(), r"<span>a\b</span>");
    }

    #[test]
    fn test_unescaped_inner_quotes_survive() {
        let spec = CursorSpec::parse(r#""<div class="y"></div>""#).unwrap();

        assert!(!spec.is_malformed());
        assert_eq!(spec.value(), r#"<div class="y"></div>"#);
    }

    #[test]
    fn test_malformed_literal_falls_back_to_raw() {
        let spec = CursorSpec::parse(r#""<div class=\q></div>""#).unwrap();

        assert!(spec.is_malformed());
        assert_eq!(spec.value(), r"<div class=\q></div>");
    }

    #[test]
    fn test_unknown_name_is_raw_markup() {
        let presets = CursorPresets::default();
        let spec = CursorSpec::parse("<i class=\"zoom-follow-cursor\"></i>").unwrap();

        assert_eq!(spec.markup(&presets), "<i class=\"zoom-follow-cursor\"></i>");
    }

    #[test]
    fn test_extra_presets_override() {
        let presets = CursorPresets::with_extra([
            ("ring".to_string(), "<b></b>".to_string()),
            ("dot".to_string(), "<u></u>".to_string()),
        ]);

        assert_eq!(presets.get("ring"), Some("<b></b>"));
        assert_eq!(presets.get("dot"), Some("<u></u>"));
    }

    #[test]
    fn test_follower_cycle() {
        let rect = Rect::new(50.0, 50.0, 200.0, 100.0);
        let mut follower = CursorFollower::new();

        let enter = InputEvent::mouse(InputKind::Enter, 60.0, 60.0);
        assert_eq!(follower.handle(&enter, rect), CursorUpdate::Show);
        assert!(follower.is_visible());

        // Not clamped, unlike the zoom position.
        let outside = InputEvent::mouse(InputKind::Move, 10.0, 300.0);
        assert_eq!(
            follower.handle(&outside, rect),
            CursorUpdate::Move(Point::new(-40.0, 250.0))
        );

        let leave = InputEvent::mouse(InputKind::Leave, 0.0, 0.0);
        assert_eq!(follower.handle(&leave, rect), CursorUpdate::Hide);
        assert!(!follower.is_visible());
    }

    #[test]
    fn test_follower_boundaries_without_position() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut follower = CursorFollower::new();

        let enter = InputEvent::mouse_boundary(InputKind::Enter);
        assert_eq!(follower.handle(&enter, rect), CursorUpdate::Show);
        let leave = InputEvent::mouse_boundary(InputKind::Leave);
        assert_eq!(follower.handle(&leave, rect), CursorUpdate::Hide);
        assert!(!follower.is_visible());
        assert_eq!(follower.position(), None);
    }

    #[test]
    fn test_follower_ignores_touch_and_clicks() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut follower = CursorFollower::new();

        let touch = InputEvent::touch(InputKind::Move, Some(Point::new(1.0, 1.0)), 1);
        assert_eq!(follower.handle(&touch, rect), CursorUpdate::Ignored);

        let click = InputEvent::mouse(InputKind::Select, 1.0, 1.0);
        assert_eq!(follower.handle(&click, rect), CursorUpdate::Ignored);
        assert_eq!(follower.position(), None);
    }
}
