//! CSV projection of the final dataset for the intercept system.
//!
//! `title` and `snippet` are always quoted with embedded quotes doubled.
//! `domain` and `url` are written bare: well-formed hosts and URLs never
//! contain commas or quotes.

use crate::types::SiteRecord;

/// Header row of the intercept CSV.
pub const CSV_HEADER: &str = "domain,title,url,snippet";

/// Render `records` as CSV text, one `\n`-terminated row per record.
pub fn project_csv(records: &[SiteRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 128);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.domain);
        out.push(',');
        push_quoted(&mut out, &record.title);
        out.push(',');
        out.push_str(&record.url);
        out.push(',');
        push_quoted(&mut out, &record.snippet);
        out.push('\n');
    }
    out
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str, title: &str, snippet: &str) -> SiteRecord {
        SiteRecord {
            title: title.to_string(),
            url: format!("https://{domain}/page"),
            domain: domain.to_string(),
            snippet: snippet.to_string(),
            position: 1,
            source: "google".into(),
            query: "кредит".into(),
        }
    }

    #[test]
    fn empty_dataset_is_header_only() {
        assert_eq!(project_csv(&[]), "domain,title,url,snippet\n");
    }

    #[test]
    fn quotes_are_doubled() {
        let csv = project_csv(&[record("a.ru", r#"A "best" site"#, "")]);
        let row = csv.lines().nth(1).expect("row");
        assert_eq!(row, r#"a.ru,"A ""best"" site",https://a.ru/page,"""#);
    }

    #[test]
    fn empty_title_and_snippet_emit_empty_quoted_fields() {
        let csv = project_csv(&[record("a.ru", "", "")]);
        assert_eq!(
            csv,
            "domain,title,url,snippet\na.ru,\"\",https://a.ru/page,\"\"\n"
        );
    }

    #[test]
    fn commas_inside_quoted_fields_preserved() {
        let csv = project_csv(&[record("b.ru", "Кредит, займ", "Быстро, онлайн")]);
        assert!(csv.contains(r#"b.ru,"Кредит, займ",https://b.ru/page,"Быстро, онлайн""#));
    }

    #[test]
    fn rows_follow_dataset_order() {
        let csv = project_csv(&[record("z.ru", "z", ""), record("a.ru", "a", "")]);
        let domains: Vec<_> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap_or_default())
            .collect();
        assert_eq!(domains, ["z.ru", "a.ru"]);
    }
}
