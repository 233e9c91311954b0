//! Scroll- and time-driven state for the page: nav highlighting, the
//! launcher hint fade and the hero typewriter.

use std::time::Duration;

/// Probe point below the top of the viewport used for nav highlighting.
pub const NAV_PROBE_OFFSET: f32 = 100.0;
/// Height of the fixed navbar; nav jumps land this far below the top.
pub const NAVBAR_HEIGHT: f32 = 80.0;
pub const NAVBAR_ELEVATE_AFTER: f32 = 100.0;
const BOTTOM_SLACK: f32 = 10.0;

const HINT_FADE_START: f32 = 0.2;
const HINT_FADE_SPAN: f32 = 0.4;

/// Where a section sits inside the scrolled content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub top: f32,
    pub height: f32,
}

impl SectionSpan {
    fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Index of the section to highlight in the navbar.
///
/// At the bottom of the page the last section wins even if it is too short
/// to reach the probe point.
pub fn active_section(
    spans: &[SectionSpan],
    scroll_y: f32,
    viewport_h: f32,
    content_h: f32,
) -> Option<usize> {
    let probe = scroll_y + NAV_PROBE_OFFSET;
    if !spans.is_empty() && probe + viewport_h >= content_h - BOTTOM_SLACK {
        return Some(spans.len() - 1);
    }
    spans.iter().rposition(|span| span.contains(probe))
}

/// Scroll offset that brings `span` just under the navbar.
pub fn jump_target(span: SectionSpan) -> f32 {
    (span.top - NAVBAR_HEIGHT).max(0.0)
}

pub fn navbar_scrolled(scroll_y: f32) -> bool {
    scroll_y > NAVBAR_ELEVATE_AFTER
}

/// Scroll progress in `[0, 1]`; a page that cannot scroll reports 0.
pub fn scroll_fraction(scroll_y: f32, viewport_h: f32, content_h: f32) -> f32 {
    let range = content_h - viewport_h;
    if range <= 0.0 {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0)
}

/// Opacity of the "ask me" hint next to the chat launcher.
pub fn hint_opacity(fraction: f32) -> f32 {
    if fraction <= HINT_FADE_START {
        return 1.0;
    }
    (1.0 - (fraction - HINT_FADE_START) / HINT_FADE_SPAN).clamp(0.0, 1.0)
}

/// Reveals `text` one character at a time after an initial pause.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    start_delay: Duration,
    per_char: Duration,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_delay: Duration::from_millis(1_000),
            per_char: Duration::from_millis(100),
        }
    }

    /// Prefix visible `elapsed` after the page appeared.
    pub fn visible(&self, elapsed: Duration) -> &str {
        let Some(typing) = elapsed.checked_sub(self.start_delay) else {
            return "";
        };
        let shown = (typing.as_millis() / self.per_char.as_millis().max(1)) as usize;
        match self.text.char_indices().nth(shown) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        self.visible(elapsed).len() == self.text.len()
    }
}

/// Open/closed state of the floating chat widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatWidget {
    open: bool,
    hint_visible: bool,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self {
            open: false,
            hint_visible: true,
        }
    }
}

impl ChatWidget {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Flips the widget; the launcher hint goes away for good on first use.
    pub fn toggle(&mut self) {
        self.hint_visible = false;
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// A click landed somewhere on screen; `inside` is whether it hit the widget.
    pub fn click(&mut self, inside: bool) {
        if self.open && !inside {
            self.close();
        }
    }
}

/// One job on the experience timeline; details show only while expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub header: &'static str,
    pub details: &'static [&'static str],
    expanded: bool,
}

impl TimelineEntry {
    pub fn new(header: &'static str, details: &'static [&'static str]) -> Self {
        Self {
            header,
            details,
            expanded: false,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}
