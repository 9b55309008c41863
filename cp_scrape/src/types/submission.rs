use serde::Serialize;

/// One row of the recent-submissions listing.
#[derive(Debug, Serialize, PartialEq)]
pub struct SubmissionRecord {
    /// Absolute Unix timestamp; relative times ("45 min") are resolved
    /// against the wall clock at parse time.
    pub sub_time: i64,
    pub problem_code: String,
    /// "accepted", or the verdict label shown by the site.
    #[serde(rename = "type")]
    pub verdict: String,
    pub points: String,
    pub language: String,
}

/// Recent-submission listing cut to the requested count, newest first.
/// `truncated` is set when the site ran out of submissions (or the page
/// ceiling was hit) before the count was reached.
#[derive(Debug, Serialize, PartialEq)]
pub struct RecentSubmissions {
    pub records: Vec<SubmissionRecord>,
    pub truncated: bool,
}
