//! Terminal frame rendering
//!
//! Pure string assembly; the main loop decides when to repaint.

use chrono::{DateTime, Utc};

/// One rendered statistic card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub value: String,
    pub sub: Option<String>,
}

/// Everything one frame shows
#[derive(Debug, Clone)]
pub struct FrameData {
    pub cards: Vec<CardView>,
    pub banners: Vec<String>,
    pub source_url: String,
    pub as_of: Option<DateTime<Utc>>,
}

/// Move the cursor home and clear the screen.
pub const CLEAR: &str = "\x1b[H\x1b[2J";

/// Assemble one frame of output.
pub fn render_frame(frame: &FrameData) -> String {
    let mut out = String::with_capacity(512);

    out.push_str("XRPool Yield Dashboard\n");
    out.push_str("======================\n\n");

    for banner in &frame.banners {
        out.push_str(&format!("  ! {}\n", banner));
    }
    if !frame.banners.is_empty() {
        out.push('\n');
    }

    for card in &frame.cards {
        out.push_str(&format!("  {}\n", card.title));
        out.push_str(&format!("    {}\n", card.value));
        if let Some(sub) = &card.sub {
            out.push_str(&format!("    {}\n", sub));
        }
        out.push('\n');
    }

    if let Some(at) = frame.as_of {
        out.push_str(&format!("  as of {}\n", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    out.push_str(&format!("  raw data: {}\n", frame.source_url));
    out.push_str("  [r] reload now   [q] quit\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> FrameData {
        FrameData {
            cards: vec![
                CardView {
                    title: "Total Pool".to_string(),
                    value: "1,000,000 XRP".to_string(),
                    sub: Some("≈ $500,000.00".to_string()),
                },
                CardView {
                    title: "Fixed APY".to_string(),
                    value: "4.00%".to_string(),
                    sub: None,
                },
            ],
            banners: vec![],
            source_url: "https://example.com/sheet.csv".to_string(),
            as_of: None,
        }
    }

    #[test]
    fn test_cards_and_footer() {
        let out = render_frame(&frame());
        assert!(out.contains("Total Pool"));
        assert!(out.contains("1,000,000 XRP"));
        assert!(out.contains("≈ $500,000.00"));
        assert!(out.contains("4.00%"));
        assert!(out.contains("raw data: https://example.com/sheet.csv"));
        assert!(out.contains("[r] reload now"));
        assert!(!out.contains('!'));
    }

    #[test]
    fn test_banner_rendering() {
        let mut data = frame();
        data.banners.push("Pool data: unexpected status: 503".to_string());

        let out = render_frame(&data);
        assert!(out.contains("! Pool data: unexpected status: 503"));
    }

    #[test]
    fn test_as_of_line() {
        let mut data = frame();
        data.as_of = Some("2026-08-29T12:00:00Z".parse().unwrap());

        let out = render_frame(&data);
        assert!(out.contains("as of 2026-08-29 12:00:00 UTC"));
    }
}
