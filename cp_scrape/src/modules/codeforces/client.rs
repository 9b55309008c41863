use crate::types::profile::CodeforcesProfile;
use cp_scrape_libs::fetch::{self, Result};
use itertools::Itertools;
use serde::Deserialize;

const INFO_URL: &str = "https://codeforces.com/api/user.info";
const STATUS_URL: &str = "https://codeforces.com/api/user.status";

/// The API pages submissions; a page this large approximates "all of them".
const SUBMISSION_PAGE_SIZE: u32 = 100_000;

/// Envelope common to every API method.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: String,
    result: Option<T>,
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    rating: Option<i64>,
    country: Option<String>,
    max_rating: Option<i64>,
    handle: Option<String>,
    organization: Option<String>,
    contribution: Option<i64>,
    rank: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Submission {
    verdict: Option<String>,
    problem: ProblemRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemRef {
    contest_id: Option<i64>,
    index: String,
}

/// Profile and solved-problem set of `handle`. A failed `user.info` answer
/// (unknown handle) yields `Ok(None)` without a second call.
pub async fn user_data(handle: &str) -> Result<Option<CodeforcesProfile>> {
    let client = fetch::api_client();

    let info: ApiResponse<Vec<UserInfo>> = client
        .get(INFO_URL)
        .query(&[("handles", handle)])
        .send()
        .await?
        .json()
        .await?;
    if info.status == "FAILED" {
        tracing::warn!("user.info failed for {}: {:?}", handle, info.comment);
        return Ok(None);
    }
    let mut profile = info
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(profile_from)
        .unwrap_or_default();

    let status: ApiResponse<Vec<Submission>> = client
        .get(STATUS_URL)
        .query(&[
            ("handle", handle),
            ("from", "1"),
            ("count", SUBMISSION_PAGE_SIZE.to_string().as_str()),
        ])
        .send()
        .await?
        .json()
        .await?;
    profile.solved = solved_from(status.result.unwrap_or_default());

    Ok(Some(profile))
}

/// Only the allowlisted fields are copied; everything else the API reports
/// is dropped.
fn profile_from(info: UserInfo) -> CodeforcesProfile {
    CodeforcesProfile {
        rating: info.rating,
        country: info.country,
        max_rating: info.max_rating,
        handle: info.handle,
        organization: info.organization,
        contribution: info.contribution,
        rank: info.rank,
        solved: Vec::new(),
    }
}

/// Every submission judged OK contributes `<contestId><index>`, deduplicated.
fn solved_from(submissions: Vec<Submission>) -> Vec<String> {
    submissions
        .into_iter()
        .filter(|sub| sub.verdict.as_deref() == Some("OK"))
        .filter_map(|sub| {
            let contest = sub.problem.contest_id?;
            Some(format!("{}{}", contest, sub.problem.index))
        })
        .unique()
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_failed_status_deserializes_without_result() {
        let raw = r#"{"status":"FAILED","comment":"handles: User with handle ghost not found"}"#;
        let resp: ApiResponse<Vec<UserInfo>> = serde_json::from_str(raw).unwrap();

        assert_eq!(resp.status, "FAILED");
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_allowlisted_fields_are_optional() {
        let raw = r#"{"status":"OK","result":[{"handle":"anta","rating":2800,"maxRating":3000,"friendOfCount":500}]}"#;
        let resp: ApiResponse<Vec<UserInfo>> = serde_json::from_str(raw).unwrap();
        let profile = profile_from(resp.result.unwrap().into_iter().next().unwrap());

        assert_eq!(profile.handle.as_deref(), Some("anta"));
        assert_eq!(profile.rating, Some(2800));
        assert_eq!(profile.max_rating, Some(3000));
        assert_eq!(profile.organization, None);

        let rendered = serde_json::to_string(&profile).unwrap();
        assert!(rendered.contains("max_rating"));
        assert!(!rendered.contains("organization"));
    }

    #[test]
    fn test_solved_from_filters_and_dedups() {
        let raw = r#"{"status":"OK","result":[
            {"verdict":"OK","problem":{"contestId":1000,"index":"A"}},
            {"verdict":"WRONG_ANSWER","problem":{"contestId":1000,"index":"B"}},
            {"verdict":"OK","problem":{"contestId":1000,"index":"A"}},
            {"verdict":"OK","problem":{"index":"C"}},
            {"verdict":"OK","problem":{"contestId":25,"index":"E"}}
        ]}"#;
        let resp: ApiResponse<Vec<Submission>> = serde_json::from_str(raw).unwrap();

        let solved = solved_from(resp.result.unwrap());
        assert_eq!(solved.len(), 2);
        assert!(solved.contains(&String::from("1000A")));
        assert!(solved.contains(&String::from("25E")));
    }
}
