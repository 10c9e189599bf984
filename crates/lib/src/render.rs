use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Document, Record, Site};

const CATEGORY: &str = "Gitee Issues";
const HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());
static INLINE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid timestamp {value:?} on issue {issue}: {source}")]
    Timestamp {
        issue: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Turn a title into a slug that is safe to use as a file name.
///
/// Titles that leave nothing behind fall back to `article-<local time>`.
pub fn sanitize_filename(title: &str) -> String {
    sanitize_filename_at(title, Local::now().naive_local())
}

pub fn sanitize_filename_at(title: &str, now: NaiveDateTime) -> String {
    let name = UNSAFE_CHARS.replace_all(title, "");
    let name = WHITESPACE.replace_all(&name, "-");
    let name = HYPHENS.replace_all(&name, "-");
    let name = name.trim_matches('-');
    if name.is_empty() {
        format!("article-{}", now.format("%Y%m%d%H%M%S"))
    } else {
        name.to_string()
    }
}

/// Parse an API timestamp. A trailing `Z` is accepted as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    match value.strip_suffix('Z') {
        Some(rest) => DateTime::parse_from_rfc3339(&format!("{rest}+00:00")),
        None => DateTime::parse_from_rfc3339(value),
    }
}

/// Drop inline images, line by line. Everything else is left alone.
pub fn process_markdown(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    body.split('\n')
        .map(|line| INLINE_IMAGE.replace_all(line, ""))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(site: &Site, record: &Record) -> Result<Document, RenderError> {
    let timestamp = |value: &str| {
        parse_timestamp(value).map_err(|source| RenderError::Timestamp {
            issue: record.number.to_string(),
            value: value.to_string(),
            source,
        })
    };
    let created = timestamp(&record.created_at)?;
    let updated = timestamp(record.updated_at.as_deref().unwrap_or(record.created_at.as_str()))?;

    let filename = format!(
        "{}-{}.md",
        created.format("%Y-%m-%d"),
        sanitize_filename(&record.title)
    );

    let number = &record.number;
    let header = format!(
        "---
title: \"{title}\"
date: {date}
last_modified_at: {modified}
categories: [{CATEGORY}]
tags: [{number}]
comments: true
---

## Original link

This article was generated automatically from a Gitee issue. Source: [Issue #{number}]({url})

---

",
        title = record.title,
        date = created.format(HEADER_TIME_FORMAT),
        modified = updated.format(HEADER_TIME_FORMAT),
        url = site.issue_url(number),
    );

    let body = match record.body.as_deref() {
        Some(body) if !body.trim().is_empty() => process_markdown(body),
        _ => format!(
            "**{}**\n\n> This article comes from a Gitee issue whose body was empty; the title has been used as its content.",
            record.title
        ),
    };

    Ok(Document {
        filename,
        content: header + &body,
    })
}
