//! Output formatting utilities

use crate::domain::{canonical, humanize, Memo};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::json;

/// A memo as presented to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoView {
    pub id: String,
    pub date: String,
    pub text: String,
    pub human: String,
}

/// Prepare memos for display, humanizing each date against `now`
pub fn memo_views<Tz: TimeZone>(memos: &[Memo], now: &DateTime<Tz>) -> Vec<MemoView> {
    memos
        .iter()
        .map(|memo| {
            let date = canonical(memo.date);
            MemoView {
                human: humanize(&date, now),
                id: memo.id.to_string(),
                date,
                text: memo.text.clone(),
            }
        })
        .collect()
}

/// Format a list of memos for display
pub fn format_memo_list(views: &[MemoView]) -> String {
    if views.is_empty() {
        return "No memos found".to_string();
    }

    let mut output = String::new();
    for (index, view) in views.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:<14} {}  {}  [{}]\n",
            index + 1,
            view.human,
            view.date,
            view.text,
            view.id
        ));
    }
    output
}

/// Status object returned for create/remove requests
pub fn format_status(success: bool) -> String {
    json!({ "result": { "success": success } }).to_string()
}
