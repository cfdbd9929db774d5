use mediaintel_llm::ApiError;

use super::*;

const UPLOAD: &str = "Date,Engagements,Sentiment,Platform,Media Type,Location\n\
    2024-01-01,100,Positive,Twitter,Video,Jakarta\n\
    2024-01-02,30,Negative,Facebook,Image,\n\
    2024-01-03,60,Positive,Twitter,Video,Jakarta\n\
    not-a-date,999,Neutral,Twitter,Text,Medan\n";

struct Reply(Result<&'static str, u16>);

impl TextGenerator for Reply {
    async fn generate(&self, _prompt: &str) -> Result<String, ApiError> {
        self.0.map(str::to_string).map_err(|status| ApiError::Status {
            status,
            message: "unavailable".to_string(),
        })
    }
}

struct Hang;

impl TextGenerator for Hang {
    async fn generate(&self, _prompt: &str) -> Result<String, ApiError> {
        std::future::pending().await
    }
}

fn loaded(drop_incomplete_rows: bool) -> Session {
    let mut session = Session::new(drop_incomplete_rows, Persona::Professional);
    session
        .load(UPLOAD.as_bytes().to_vec())
        .expect("fixture should parse");
    session
}

#[test]
fn new_session_has_empty_report() {
    let session = Session::new(true, Persona::Professional);
    assert!(session.report().is_empty());
    assert!(session.cleaning().is_none());
    assert_eq!(session.options(), FilterOptions::default());
    assert!(session.summary_prompt().is_none());
}

#[test]
fn load_cleans_and_reports() {
    let session = loaded(true);
    let cleaning = session.cleaning().unwrap();
    assert_eq!(cleaning.initial_count, 4);
    // bad date and the blank location
    assert_eq!(cleaning.rows_removed, 2);
    assert_eq!(session.report().row_count, 2);
}

#[test]
fn toggling_incomplete_rows_recleans() {
    let mut session = loaded(true);
    session.set_drop_incomplete_rows(false).unwrap();
    assert!(!session.drop_incomplete_rows());
    assert_eq!(session.report().row_count, 3);
    assert_eq!(session.cleaning().unwrap().rows_removed, 1);
}

#[test]
fn filters_narrow_the_report() {
    let mut session = loaded(false);
    session.set_filter(Field::Platform, Some("Twitter".to_string()));
    assert_eq!(session.report().row_count, 2);

    session.set_date_from(Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    assert_eq!(session.report().row_count, 1);

    session.clear_filters();
    assert_eq!(session.report().row_count, 3);
    assert!(session.filter().is_unconstrained());
}

#[test]
fn options_ignore_active_filters() {
    let mut session = loaded(false);
    session.set_filter(Field::Platform, Some("Facebook".to_string()));
    assert_eq!(session.options().platforms, vec!["Facebook", "Twitter"]);
}

#[test]
fn unmatched_filter_gives_empty_report() {
    let mut session = loaded(true);
    session.set_filter(Field::Sentiment, Some("positive".to_string()));
    assert!(session.report().is_empty());
    assert!(session.summary_prompt().is_none());
}

#[test]
fn prompt_follows_persona() {
    let mut session = loaded(true);
    assert!(session
        .summary_prompt()
        .unwrap()
        .starts_with("As an internal professional"));
    session.set_persona(Persona::Consultant);
    assert_eq!(session.persona(), Persona::Consultant);
    assert!(session
        .summary_prompt()
        .unwrap()
        .starts_with("As an expert consultant"));
}

#[tokio::test]
async fn summarize_records_success() {
    let mut session = loaded(true);
    session
        .summarize(&Reply(Ok("Focus on Twitter.")), std::future::pending())
        .await;
    assert_eq!(session.summary().text(), Some("Focus on Twitter."));
}

#[tokio::test]
async fn summarize_failure_keeps_report() {
    let mut session = loaded(true);
    let before = session.report().clone();
    session
        .summarize(&Reply(Err(500)), std::future::pending())
        .await;
    assert!(session.summary().error().unwrap().contains("500"));
    assert_eq!(session.report(), &before);
}

#[tokio::test]
async fn cancelled_summary_returns_to_idle() {
    let mut session = loaded(true);
    session.summarize(&Hang, async {}).await;
    assert_eq!(session.summary(), &SummaryState::Idle);
}

#[test]
fn loading_new_upload_resets_summary() {
    let mut session = loaded(true);
    session.summary_unavailable("no key".to_string());
    session
        .load(b"Platform,Engagements\nTwitter,4\n".to_vec())
        .unwrap();
    assert_eq!(session.summary(), &SummaryState::Idle);
    assert_eq!(session.report().row_count, 1);
}

#[test]
fn bad_upload_keeps_previous_state() {
    let mut session = loaded(true);
    assert!(session.load(vec![0xff, 0xfe]).is_err());
    assert_eq!(session.report().row_count, 2);
}
