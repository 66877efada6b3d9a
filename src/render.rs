//! HTML fragments for the search list and guessed-movie cards.
//!
//! Markup follows the classes the game's templates style:
//! `.search-result` rows in `#search-results`, and
//! `.movie-card` > `.movie-poster` + `.movie-info` in `.guessed-movies`.

use crate::config::ClientConfig;
use crate::model::{GuessedMovie, MovieSuggestion};
use crate::util::escape_html;

// ── Search results ─────────────────────────────────────────────────

/// Render one clickable row per suggestion. The row's `data-movie-id` is
/// read by the delegated click handler on the results container.
pub fn render_suggestions(movies: &[MovieSuggestion]) -> String {
    let mut html = String::with_capacity(movies.len() * 96);
    for movie in movies {
        html.push_str(&format!(
            r#"<div class="search-result" data-movie-id="{}">{} ({})</div>"#,
            movie.id,
            escape_html(&movie.title),
            escape_html(&movie.year),
        ));
    }
    html
}

// ── Strikes ────────────────────────────────────────────────────────

/// Number of strike slots to mark active: the server count, capped at the
/// slots the page actually has.
pub fn active_strikes(strikes: u32, slots: usize) -> usize {
    (strikes as usize).min(slots)
}

// ── Movie cards ────────────────────────────────────────────────────

/// Full poster URL, or the local placeholder when the movie has none.
pub fn poster_url(poster_path: Option<&str>, config: &ClientConfig) -> String {
    match poster_path.map(str::trim) {
        Some(path) if !path.is_empty() => format!("{}{}", config.poster_base_url, path),
        _ => config.placeholder_poster.clone(),
    }
}

/// First four characters of an ISO date, `"N/A"` when there is no date.
pub fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if !date.is_empty() => date.chars().take(4).collect(),
        _ => "N/A".to_string(),
    }
}

/// Revenue as a percentage of the round's top earner, clamped to 0..=100.
/// A zero top earner yields 0 instead of dividing by zero.
pub fn revenue_percent(revenue: u64, highest_revenue: u64) -> f64 {
    if highest_revenue == 0 {
        return 0.0;
    }
    let pct = revenue as f64 * 100.0 / highest_revenue as f64;
    pct.clamp(0.0, 100.0)
}

/// CSS width value: `80%`, `33.33%`. At most two decimals, no trailing zeros.
pub fn format_percent(pct: f64) -> String {
    let rounded = (pct * 100.0).round() / 100.0;
    format!("{}%", rounded)
}

/// Revenue in whole millions of dollars: `$800M`.
pub fn format_revenue_millions(revenue: u64) -> String {
    format!("${}M", (revenue as f64 / 1_000_000.0).round() as u64)
}

/// Render a guessed-movie card.
pub fn render_movie_card(movie: &GuessedMovie, highest_revenue: u64, config: &ClientConfig) -> String {
    let title = escape_html(&movie.title);
    let poster = escape_html(&poster_url(movie.poster_path.as_deref(), config));
    let year = escape_html(&release_year(movie.release_date.as_deref()));
    let width = format_percent(revenue_percent(movie.revenue, highest_revenue));
    let revenue = format_revenue_millions(movie.revenue);

    format!(
        r#"<div class="movie-card">
  <img class="movie-poster" src="{poster}" alt="{title}">
  <div class="movie-info">
    <h3>{title}</h3>
    <p class="movie-year">{year}</p>
    <div class="revenue-bar"><div class="revenue-fill" style="width: {width}"></div></div>
    <p class="movie-revenue">{revenue}</p>
  </div>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> GuessedMovie {
        GuessedMovie {
            title: "Inception".to_string(),
            poster_path: Some("/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg".to_string()),
            release_date: Some("2010-07-16".to_string()),
            revenue: 800_000_000,
        }
    }

    #[test]
    fn suggestions_render_one_row_each() {
        let movies = vec![
            MovieSuggestion {
                id: 27205,
                title: "Inception".to_string(),
                year: "2010".to_string(),
            },
            MovieSuggestion {
                id: 13,
                title: "Forrest Gump".to_string(),
                year: "1994".to_string(),
            },
        ];
        let html = render_suggestions(&movies);
        assert_eq!(html.matches(r#"class="search-result""#).count(), 2);
        assert!(html.contains(r#"data-movie-id="27205""#));
        assert!(html.contains("Forrest Gump (1994)"));
    }

    #[test]
    fn suggestions_empty_list_renders_nothing() {
        assert!(render_suggestions(&[]).is_empty());
    }

    #[test]
    fn suggestion_titles_are_escaped() {
        let movies = vec![MovieSuggestion {
            id: 1,
            title: "<script>".to_string(),
            year: "N/A".to_string(),
        }];
        let html = render_suggestions(&movies);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt; (N/A)"));
    }

    #[test]
    fn strikes_capped_at_slots() {
        assert_eq!(active_strikes(2, 3), 2);
        assert_eq!(active_strikes(0, 3), 0);
        assert_eq!(active_strikes(5, 3), 3);
        assert_eq!(active_strikes(1, 0), 0);
    }

    #[test]
    fn card_bar_width_and_revenue() {
        let html = render_movie_card(&inception(), 1_000_000_000, &ClientConfig::default());
        assert!(html.contains("width: 80%"));
        assert!(html.contains("$800M"));
        assert!(html.contains("<h3>Inception</h3>"));
        assert!(html.contains(">2010<"));
        assert!(html.contains(r#"src="https://image.tmdb.org/t/p/w200/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg""#));
    }

    #[test]
    fn card_uses_placeholder_without_poster() {
        let movie = GuessedMovie {
            poster_path: None,
            ..inception()
        };
        let html = render_movie_card(&movie, 1_000_000_000, &ClientConfig::default());
        assert!(html.contains(r#"src="/static/placeholder.png""#));

        let movie = GuessedMovie {
            poster_path: Some(String::new()),
            ..inception()
        };
        let html = render_movie_card(&movie, 1_000_000_000, &ClientConfig::default());
        assert!(html.contains(r#"src="/static/placeholder.png""#));
    }

    #[test]
    fn card_without_date_shows_na() {
        let movie = GuessedMovie {
            release_date: None,
            ..inception()
        };
        let html = render_movie_card(&movie, 1_000_000_000, &ClientConfig::default());
        assert!(html.contains(">N/A<"));
    }

    #[test]
    fn top_earner_fills_bar() {
        assert_eq!(format_percent(revenue_percent(5, 5)), "100%");
    }

    #[test]
    fn zero_highest_revenue_gives_empty_bar() {
        assert_eq!(revenue_percent(800, 0), 0.0);
        assert_eq!(format_percent(revenue_percent(800, 0)), "0%");
    }

    #[test]
    fn percent_is_clamped_and_rounded() {
        assert_eq!(format_percent(revenue_percent(2, 1)), "100%");
        assert_eq!(format_percent(revenue_percent(1, 3)), "33.33%");
    }

    #[test]
    fn millions_round_to_nearest() {
        assert_eq!(format_revenue_millions(800_000_000), "$800M");
        assert_eq!(format_revenue_millions(677_387_716), "$677M");
        assert_eq!(format_revenue_millions(2_923_706_026), "$2924M");
        assert_eq!(format_revenue_millions(0), "$0M");
    }

    #[test]
    fn year_is_first_four_characters() {
        assert_eq!(release_year(Some("1994-07-06")), "1994");
        assert_eq!(release_year(Some("")), "N/A");
        assert_eq!(release_year(None), "N/A");
    }
}
