//! Plain-text rendering of shows and episodes
//!
//! The presenter turns normalized records into terminal output. It knows
//! nothing about how records are fetched.

use crate::show_lookup::{Episode, Show};

/// Rendered in place of an absent or blank summary
const NO_SUMMARY: &str = "(no summary)";

/// Rendered in place of a missing episode title
const UNTITLED: &str = "(untitled)";

/// Converts a provider summary (HTML) into plain text.
pub fn summary_text(summary: Option<&str>) -> String {
    let text = summary
        .map(|s| nanohtml2text::html2text(s).trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        NO_SUMMARY.to_string()
    } else {
        text
    }
}

/// Renders a single show as a multi-line card.
pub fn render_show_card(show: &Show) -> String {
    format!(
        "{} [#{}]\n  Image: {}\n  {}",
        show.name,
        show.id,
        show.image,
        summary_text(show.summary.as_deref())
    )
}

/// Renders a list of shows as cards separated by blank lines.
pub fn render_shows(shows: &[Show]) -> String {
    if shows.is_empty() {
        return "No shows found.".to_string();
    }

    shows
        .iter()
        .map(render_show_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders one episode as `<name> (Season <s> - Episode <n>)`.
pub fn render_episode_line(episode: &Episode) -> String {
    let name = episode.name.as_deref().unwrap_or(UNTITLED);

    match episode.number {
        Some(number) => format!(
            "{} (Season {} - Episode {})",
            name, episode.season, number
        ),
        None => format!("{} (Season {} - Special)", name, episode.season),
    }
}

/// Renders an episode list, one episode per line.
pub fn render_episodes(episodes: &[Episode]) -> String {
    if episodes.is_empty() {
        return "No episodes found.".to_string();
    }

    episodes
        .iter()
        .map(|episode| format!("- {}", render_episode_line(episode)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short one-line label for selection menus.
pub fn show_label(show: &Show) -> String {
    format!("{} [#{}]", show.name, show.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::show_lookup::PLACEHOLDER_IMAGE_URL;

    fn show(summary: Option<&str>) -> Show {
        Show {
            id: 139,
            name: "Girls".to_string(),
            summary: summary.map(str::to_string),
            image: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    #[test]
    fn test_summary_markup_is_stripped() {
        let text = summary_text(Some("<p>Four friends in New York.</p>"));
        assert_eq!(text, "Four friends in New York.");
    }

    #[test]
    fn test_missing_summary_placeholder() {
        assert_eq!(summary_text(None), NO_SUMMARY);
        assert_eq!(summary_text(Some("")), NO_SUMMARY);
        assert_eq!(summary_text(Some("<p> </p>")), NO_SUMMARY);
    }

    #[test]
    fn test_show_card_contains_fields() {
        let card = render_show_card(&show(Some("<p>Hello</p>")));

        assert!(card.starts_with("Girls [#139]"));
        assert!(card.contains(PLACEHOLDER_IMAGE_URL));
        assert!(card.contains("Hello"));
        assert!(!card.contains("<p>"));
    }

    #[test]
    fn test_render_shows_empty() {
        assert_eq!(render_shows(&[]), "No shows found.");
    }

    #[test]
    fn test_render_shows_keeps_order() {
        let mut second = show(None);
        second.id = 2;
        second.name = "Second".to_string();

        let rendered = render_shows(&[show(None), second]);
        let girls = rendered.find("Girls").unwrap();
        let other = rendered.find("Second").unwrap();
        assert!(girls < other);
    }

    #[test]
    fn test_episode_line_format() {
        let episode = Episode {
            id: 1,
            name: Some("Pilot".to_string()),
            season: 1,
            number: Some(1),
        };
        assert_eq!(render_episode_line(&episode), "Pilot (Season 1 - Episode 1)");
    }

    #[test]
    fn test_special_episode_line() {
        let episode = Episode {
            id: 7,
            name: Some("Christmas Special".to_string()),
            season: 2,
            number: None,
        };
        assert_eq!(
            render_episode_line(&episode),
            "Christmas Special (Season 2 - Special)"
        );
    }

    #[test]
    fn test_untitled_episode_line() {
        let episode = Episode {
            id: 2,
            name: None,
            season: 1,
            number: Some(2),
        };
        assert_eq!(
            render_episode_line(&episode),
            "(untitled) (Season 1 - Episode 2)"
        );
    }

    #[test]
    fn test_render_episodes() {
        let episodes = vec![
            Episode {
                id: 1,
                name: Some("Pilot".to_string()),
                season: 1,
                number: Some(1),
            },
            Episode {
                id: 2,
                name: Some("All Adventurous Women Do".to_string()),
                season: 1,
                number: Some(2),
            },
        ];

        assert_eq!(
            render_episodes(&episodes),
            "- Pilot (Season 1 - Episode 1)\n- All Adventurous Women Do (Season 1 - Episode 2)"
        );
        assert_eq!(render_episodes(&[]), "No episodes found.");
    }

    #[test]
    fn test_show_label() {
        assert_eq!(show_label(&show(None)), "Girls [#139]");
    }
}
