use crate::types::profile::{CodechefProfile, RatingEntry, RatingTable, SubmissionStats};
use cp_scrape_libs::{document, fetch::Result, keys, model::OrderedMap};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::fetcher::PageFetcher;

const SITE_ROOT: &str = "https://www.codechef.com";

/// Personal-info keys that are scraped but never reported.
const UNWANTED_KEYS: [&str; 4] = ["studentprofessional", "teams_list", "link", "motto"];

/// The two profile markups CodeChef has served over time: the legacy
/// table-based page and the container-based page that replaced it. Either may
/// still be encountered, so both extraction strategies are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    Legacy,
    Modern,
}

pub struct ProfilePageScraper {
    profile: Selector,
    user_details_container: Selector,
    user_name_box: Selector,
    user_thumb_img: Selector,
    header_h1: Selector,
    header_img: Selector,
    details_li: Selector,
    solved_articles: Selector,
    problem_stats: Selector,
    rating_table: Selector,
    table: Selector,
    tr: Selector,
    td: Selector,
    p: Selector,
    b: Selector,
    a: Selector,
}

impl ProfilePageScraper {
    pub fn new() -> Self {
        ProfilePageScraper {
            profile: document::selector("div.profile"),
            user_details_container: document::selector("div.user-details-container"),
            user_name_box: document::selector("div.user-name-box"),
            user_thumb_img: document::selector("div.user-thumb-pic img"),
            header_h1: document::selector("header h1"),
            header_img: document::selector("header img"),
            details_li: document::selector("section.user-details li"),
            solved_articles: document::selector("section.problems-solved article"),
            problem_stats: document::selector("table#problem_stats"),
            rating_table: document::selector("table.rating-table"),
            table: document::selector("table"),
            tr: document::selector("tr"),
            td: document::selector("td"),
            p: document::selector("p"),
            b: document::selector("b"),
            a: document::selector("a"),
        }
    }

    /// Probe for the distinguishing container of each layout.
    pub fn detect_layout(&self, html: &Html) -> Option<PageLayout> {
        if html.select(&self.user_details_container).next().is_some() {
            Some(PageLayout::Modern)
        } else if html.select(&self.profile).next().is_some() {
            Some(PageLayout::Legacy)
        } else {
            None
        }
    }

    pub fn extract_profile(&self, handle: &str, html: &Html) -> Result<CodechefProfile> {
        let layout = document::require(self.detect_layout(html), "profile container")?;
        tracing::debug!("profile page of {} uses the {:?} layout", handle, layout);

        let mut profile = match layout {
            PageLayout::Legacy => self.extract_legacy(handle, html),
            PageLayout::Modern => self.extract_modern(handle, html),
        }?;
        keys::remove_keys(&mut profile.personal, &UNWANTED_KEYS);
        Ok(profile)
    }

    fn extract_legacy(&self, handle: &str, html: &Html) -> Result<CodechefProfile> {
        let profile_tab = document::require(html.select(&self.profile).next(), "div.profile")?;

        let name_box = document::require(
            document::first_match(profile_tab, &self.user_name_box),
            "div.user-name-box",
        )?;
        let realname = document::text_of(name_box).trim().to_string();

        let picture = document::require(
            document::first_match(profile_tab, &self.user_thumb_img),
            "div.user-thumb-pic img",
        )?;
        let display_picture = picture_url(document::require(
            document::attribute(picture, "src"),
            "display picture src",
        )?);

        // The name/picture table is followed by the table holding the
        // personal-info rows and the problem listings.
        let first_table = document::require(
            document::first_match(profile_tab, &self.table),
            "profile header table",
        )?;
        let info_table = document::require(
            document::find_next(first_table, &self.table),
            "personal info table",
        )?;
        let mut row = document::require(
            document::first_match(info_table, &self.tr),
            "personal info row",
        )?;

        let mut personal = OrderedMap::new();
        while !document::text_of(row).trim_start().starts_with("Problems") {
            personal_entry(&mut personal, &document::text_of(row))?;
            row = document::require(document::find_next(row, &self.tr), "personal info row")?;
        }

        let solved = self.problem_groups_of_row(row)?;
        let partial_row = document::require(
            document::find_next(row, &self.tr),
            "partially solved problems row",
        )?;
        let partial = self.problem_groups_of_row(partial_row)?;

        let stats_table = document::require(
            html.select(&self.problem_stats).next(),
            "table#problem_stats",
        )?;
        let stats = self.submission_stats(stats_table)?;

        let rating_table = document::require(
            html.select(&self.rating_table).next(),
            "table.rating-table",
        )?;
        let rating = self.rating_scopes(rating_table)?;

        Ok(CodechefProfile {
            handle: handle.to_string(),
            realname,
            display_picture,
            stars: None,
            personal,
            solved,
            partial,
            stats: Some(stats),
            rating: Some(rating),
        })
    }

    fn extract_modern(&self, handle: &str, html: &Html) -> Result<CodechefProfile> {
        let container = document::require(
            html.select(&self.user_details_container).next(),
            "div.user-details-container",
        )?;

        let heading = document::require(
            document::first_match(container, &self.header_h1),
            "profile header line",
        )?;
        let heading_text = document::text_of(heading);
        let (realname, stars) = split_star_rating(heading_text.trim());

        let picture = document::require(
            document::first_match(container, &self.header_img),
            "profile header image",
        )?;
        let display_picture = picture_url(document::require(
            document::attribute(picture, "src"),
            "display picture src",
        )?);

        let mut personal = OrderedMap::new();
        for item in container.select(&self.details_li) {
            let text = document::text_of(item);
            if text.trim_start().starts_with("Problems") {
                break;
            }
            personal_entry(&mut personal, &text)?;
        }

        let mut articles = container.select(&self.solved_articles);
        let solved_scope = document::require(articles.next(), "fully solved section")?;
        let partial_scope = document::require(articles.next(), "partially solved section")?;
        let solved = self.problem_groups(solved_scope)?;
        let partial = self.problem_groups(partial_scope)?;

        // The container-based page does not always render the statistics
        // and rating tables.
        let stats = match html.select(&self.problem_stats).next() {
            Some(table) => Some(self.submission_stats(table)?),
            None => None,
        };
        let rating = match html.select(&self.rating_table).next() {
            Some(table) => Some(self.rating_scopes(table)?),
            None => None,
        };

        Ok(CodechefProfile {
            handle: handle.to_string(),
            realname,
            display_picture,
            stars,
            personal,
            solved,
            partial,
            stats,
            rating,
        })
    }

    /// The problem listings sit in the cell after the row's heading cell.
    fn problem_groups_of_row(&self, row: ElementRef) -> Result<OrderedMap<Vec<String>>> {
        let first_cell = document::require(document::first_match(row, &self.td), "problems cell")?;
        let list_cell = document::require(
            document::find_next(first_cell, &self.td),
            "problems list cell",
        )?;
        self.problem_groups(list_cell)
    }

    /// Each `<p>` is one problem group: a `<b>` heading naming the contest
    /// and one `<a>` per problem. Headings starting with "Practice" fold
    /// into the literal PRACTICE label.
    fn problem_groups(&self, scope: ElementRef) -> Result<OrderedMap<Vec<String>>> {
        let mut groups = OrderedMap::new();
        for group in scope.select(&self.p) {
            let heading = document::require(
                document::first_match(group, &self.b),
                "problem group heading",
            )?;
            let label = document::text_of(heading);
            let label = if label.starts_with("Practice") {
                String::from("PRACTICE")
            } else {
                label
            };
            let problems = group.select(&self.a).map(document::text_of).collect();
            groups.insert(label, problems);
        }
        Ok(groups)
    }

    /// Second row of the statistics table: nine positional counters.
    fn submission_stats(&self, table: ElementRef) -> Result<SubmissionStats> {
        let header = document::require(document::first_match(table, &self.tr), "stats header row")?;
        let counts = document::require(document::find_next(header, &self.tr), "stats counts row")?;

        let mut columns = Vec::new();
        for cell in counts.select(&self.td) {
            let text = document::text_of(cell);
            columns.push(document::require(
                text.trim().parse::<i64>().ok(),
                "stats counter",
            )?);
        }
        document::require(SubmissionStats::from_columns(&columns), "nine stats counters")
    }

    /// The three data rows after the header, in fixed scope order.
    fn rating_scopes(&self, table: ElementRef) -> Result<RatingTable> {
        let mut entries = Vec::new();
        for row in table.select(&self.tr).skip(1).take(3) {
            entries.push(self.rating_entry(row)?);
        }
        match <[RatingEntry; 3]>::try_from(entries) {
            Ok([long, short, ltime]) => Ok(RatingTable { long, short, ltime }),
            Err(_) => document::require(None, "three rating rows"),
        }
    }

    fn rating_entry(&self, row: ElementRef) -> Result<RatingEntry> {
        let cells: Vec<ElementRef> = row.select(&self.td).collect();
        let rank_cell = document::require(cells.get(1).copied(), "rating rank cell")?;
        let value_cell = document::require(cells.get(2).copied(), "rating value cell")?;

        let rank_text = document::text_of(rank_cell);
        let rank_text = rank_text.trim();
        let (numerator, denominator) = if rank_text == "NA" {
            (0, 0)
        } else {
            let (num, den) = document::require(rank_text.split_once('/'), "rank fraction")?;
            (
                document::require(num.trim().parse::<u32>().ok(), "rank numerator")?,
                document::require(den.trim().parse::<u32>().ok(), "rank denominator")?,
            )
        };

        let value_text = document::text_of(value_cell);
        let value = document::require(
            value_text
                .trim()
                .trim_matches(|c| matches!(c, '(' | ')' | '?'))
                .parse::<f64>()
                .ok(),
            "rating value",
        )?;
        Ok(RatingEntry(numerator, denominator, value))
    }
}

/// Profile pictures hosted by the site itself are served from a relative
/// `/sites/...` path.
fn picture_url(src: &str) -> String {
    if src.starts_with("/sites/") {
        format!("{}{}", SITE_ROOT, src)
    } else {
        src.to_string()
    }
}

/// One personal-info row, split on the first colon into a key/value pair.
fn personal_entry(personal: &mut OrderedMap<String>, text: &str) -> Result<()> {
    let cleaned = text.replace('\n', "");
    let (label, value) = document::require(cleaned.split_once(':'), "personal info separator")?;
    personal.insert(keys::to_key(label), value.trim().to_string());
    Ok(())
}

/// The header line reads like "Shaurya Chaturvedi 4★"; the star count is the
/// character immediately before the first star glyph.
fn split_star_rating(heading: &str) -> (String, Option<String>) {
    match heading.split_once('★') {
        Some((before, _)) => {
            let mut name = before.to_string();
            let stars = name.pop().map(String::from);
            (name.trim().to_string(), stars)
        }
        None => (heading.to_string(), None),
    }
}

static SCRAPER: Lazy<ProfilePageScraper> = Lazy::new(ProfilePageScraper::new);

/// Scrape the profile page of `handle` into the normalized record.
pub async fn user_data(handle: &str) -> Result<CodechefProfile> {
    let fetcher = PageFetcher::new();
    let html = fetcher.user_page(handle).await?;
    SCRAPER.extract_profile(handle, &html)
}

#[cfg(test)]
mod test {
    use super::*;
    use cp_scrape_libs::ScrapeError;

    const LEGACY_PAGE: &str = r#"<html><body>
<div class="profile">
<table><tr><td>
<div class="user-name-box">Shaurya Chaturvedi</div>
<div class="user-thumb-pic"><img src="/sites/default/files/pic.jpg"></div>
</td></tr></table>
<table>
<tr><td>Username:</td><td>shauryachats</td></tr>
<tr><td>Student/Professional:</td><td>Student</td></tr>
<tr><td>Country:</td><td>India</td></tr>
<tr><td>Motto:</td><td>keep coding</td></tr>
<tr><td>Problems Successfully Solved</td><td>
<p><b>Practice Problems</b><a>TEST</a><a>HS08TEST</a></p>
<p><b>JAN14</b><a>FROGV</a></p>
</td></tr>
<tr><td>Problems Partially Solved</td><td>
<p><b>MARCH14</b><a>GERALD07</a></p>
</td></tr>
</table>
</div>
<table id="problem_stats">
<tr><th>PC</th><th>PP</th><th>PS</th><th>ACP</th><th>ACC</th><th>WA</th><th>CTE</th><th>RTE</th><th>TLE</th></tr>
<tr><td>0</td><td>52</td><td>40</td><td>61</td><td>45</td><td>30</td><td>5</td><td>8</td><td>2</td></tr>
</table>
<table class="rating-table">
<tr><th>Contest</th><th>Rank</th><th>Rating</th></tr>
<tr><td>Long</td><td>1200/30000</td><td>(3.5?)</td></tr>
<tr><td>Short</td><td>NA</td><td>(0.0?)</td></tr>
<tr><td>Lunchtime</td><td>500/8000</td><td>(6.2?)</td></tr>
</table>
</body></html>"#;

    const MODERN_PAGE: &str = r#"<html><body>
<div class="user-details-container">
<header>
<img src="/sites/default/files/pic.jpg">
<h1>Shaurya Chaturvedi 4★</h1>
</header>
<section class="user-details">
<ul>
<li>Username: shauryachats</li>
<li>Country: India</li>
<li>Motto: keep coding</li>
</ul>
</section>
<section class="rating-data-section problems-solved">
<article>
<p><b>Practice Problems</b><a>TEST</a></p>
<p><b>JAN14</b><a>FROGV</a></p>
</article>
<article>
<p><b>MARCH14</b><a>GERALD07</a></p>
</article>
</section>
</div>
</body></html>"#;

    #[test]
    fn test_detect_layout() {
        let scraper = ProfilePageScraper::new();
        assert_eq!(
            scraper.detect_layout(&Html::parse_document(LEGACY_PAGE)),
            Some(PageLayout::Legacy)
        );
        assert_eq!(
            scraper.detect_layout(&Html::parse_document(MODERN_PAGE)),
            Some(PageLayout::Modern)
        );
        assert_eq!(
            scraper.detect_layout(&Html::parse_document("<html><body></body></html>")),
            None
        );
    }

    #[test]
    fn test_legacy_profile_extraction() {
        let scraper = ProfilePageScraper::new();
        let html = Html::parse_document(LEGACY_PAGE);
        let profile = scraper.extract_profile("shauryachats", &html).unwrap();

        assert_eq!(profile.handle, "shauryachats");
        assert_eq!(profile.realname, "Shaurya Chaturvedi");
        assert_eq!(
            profile.display_picture,
            "https://www.codechef.com/sites/default/files/pic.jpg"
        );
        assert_eq!(profile.stars, None);
        assert_eq!(
            profile.personal.get("country"),
            Some(&String::from("India"))
        );
        assert_eq!(
            profile.solved.get("PRACTICE"),
            Some(&vec![String::from("TEST"), String::from("HS08TEST")])
        );
        assert_eq!(
            profile.solved.get("JAN14"),
            Some(&vec![String::from("FROGV")])
        );
        assert_eq!(
            profile.partial.get("MARCH14"),
            Some(&vec![String::from("GERALD07")])
        );
        assert_eq!(
            profile.stats,
            Some(SubmissionStats {
                pc: 0,
                pp: 52,
                ps: 40,
                acp: 61,
                acc: 45,
                wa: 30,
                cte: 5,
                rte: 8,
                tle: 2,
            })
        );
        let rating = profile.rating.unwrap();
        assert_eq!(rating.long, RatingEntry(1200, 30000, 3.5));
        assert_eq!(rating.short, RatingEntry(0, 0, 0.0));
        assert_eq!(rating.ltime, RatingEntry(500, 8000, 6.2));
    }

    #[test]
    fn test_denylisted_keys_never_appear() {
        let scraper = ProfilePageScraper::new();

        for page in [LEGACY_PAGE, MODERN_PAGE] {
            let html = Html::parse_document(page);
            let profile = scraper.extract_profile("shauryachats", &html).unwrap();
            for key in UNWANTED_KEYS {
                assert!(!profile.personal.contains_key(key), "found {}", key);
            }
        }
    }

    #[test]
    fn test_modern_profile_extraction() {
        let scraper = ProfilePageScraper::new();
        let html = Html::parse_document(MODERN_PAGE);
        let profile = scraper.extract_profile("shauryachats", &html).unwrap();

        assert_eq!(profile.handle, "shauryachats");
        assert_eq!(profile.realname, "Shaurya Chaturvedi");
        assert_eq!(profile.stars, Some(String::from("4")));
        assert_eq!(
            profile.personal.get("username"),
            Some(&String::from("shauryachats"))
        );
        assert_eq!(
            profile.solved.get("PRACTICE"),
            Some(&vec![String::from("TEST")])
        );
        assert_eq!(
            profile.partial.get("MARCH14"),
            Some(&vec![String::from("GERALD07")])
        );
        assert_eq!(profile.stats, None);
        assert_eq!(profile.rating, None);
    }

    #[test]
    fn test_missing_container_is_a_parse_error() {
        let scraper = ProfilePageScraper::new();
        let html = Html::parse_document("<html><body><p>no profile here</p></body></html>");

        let err = scraper.extract_profile("ghost", &html).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_split_star_rating() {
        assert_eq!(
            split_star_rating("Shaurya Chaturvedi 4★"),
            (String::from("Shaurya Chaturvedi"), Some(String::from("4")))
        );
        assert_eq!(split_star_rating("Plain Name"), (String::from("Plain Name"), None));
    }
}
