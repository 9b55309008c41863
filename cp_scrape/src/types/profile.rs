use cp_scrape_libs::model::OrderedMap;
use serde::Serialize;

/// Everything scraped from a CodeChef profile page. Declaration order is the
/// JSON output order; `personal` is flattened into the top-level object.
#[derive(Debug, Serialize)]
pub struct CodechefProfile {
    pub handle: String,
    pub realname: String,
    pub display_picture: String,
    /// Star rating shown next to the username; only present on the
    /// container-based page layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<String>,
    #[serde(flatten)]
    pub personal: OrderedMap<String>,
    pub solved: OrderedMap<Vec<String>>,
    pub partial: OrderedMap<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SubmissionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingTable>,
}

/// The nine counters of the submission-statistics table, in source column
/// order: problems created, attempted, solved, accepted count, accepted
/// percentage, wrong answer, compile error, runtime error, TLE.
#[derive(Debug, Serialize, PartialEq)]
pub struct SubmissionStats {
    pub pc: i64,
    pub pp: i64,
    pub ps: i64,
    pub acp: i64,
    pub acc: i64,
    pub wa: i64,
    pub cte: i64,
    pub rte: i64,
    pub tle: i64,
}

impl SubmissionStats {
    pub fn from_columns(columns: &[i64]) -> Option<Self> {
        match *columns {
            [pc, pp, ps, acp, acc, wa, cte, rte, tle] => Some(SubmissionStats {
                pc,
                pp,
                ps,
                acp,
                acc,
                wa,
                cte,
                rte,
                tle,
            }),
            _ => None,
        }
    }
}

/// Rank numerator, rank denominator and rating for one scope of the rating
/// table; serializes as a 3-element array. A rank displayed as "NA" is 0/0.
#[derive(Debug, Serialize, PartialEq)]
pub struct RatingEntry(pub u32, pub u32, pub f64);

/// The first three data rows of the rating table, in fixed scope order:
/// long contests, short contests, lunchtime.
#[derive(Debug, Serialize, PartialEq)]
pub struct RatingTable {
    pub long: RatingEntry,
    pub short: RatingEntry,
    pub ltime: RatingEntry,
}

/// The allowlisted fields of a Codeforces `user.info` answer plus the set of
/// solved problem identifiers. Fields absent from the answer are omitted
/// from the JSON output rather than defaulted.
#[derive(Debug, Default, Serialize)]
pub struct CodeforcesProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    pub solved: Vec<String>,
}

/// A SPOJ user's solved-problem cells, flattened in document order.
#[derive(Debug, Serialize, PartialEq)]
pub struct SpojProfile {
    pub handle: String,
    pub solved: Vec<String>,
}
