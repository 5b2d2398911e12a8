//! Spreadsheet export of the filtered review list.

use crate::dashboard::format_local;
use crate::locale;
use crate::models::review::Review;
use chrono::NaiveDate;

/// Byte order mark so spreadsheet tools open the file as UTF-8.
const UTF8_BOM: &str = "\u{feff}";

/// Leading characters a spreadsheet would evaluate as a formula.
const FORMULA_PREFIXES: [char; 6] = ['=', '+', '-', '@', '\t', '\r'];

fn csv_quote(s: &str) -> String {
    let s = if s.starts_with(&FORMULA_PREFIXES[..]) {
        format!("'{s}")
    } else {
        s.to_string()
    };
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s
    }
}

/// Rating item columns in order of first appearance across the rows.
fn rating_columns(reviews: &[Review]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for review in reviews {
        for item in review.ratings.keys() {
            if !columns.contains(item) {
                columns.push(item.clone());
            }
        }
    }
    columns
}

/// One header row plus one row per review. Reviews lacking a rating item
/// leave that cell empty.
pub fn reviews_to_csv(reviews: &[Review], utc_offset_hours: i32) -> String {
    let items = rating_columns(reviews);

    let mut header = vec![
        locale::EXPORT_COL_CLASS.to_string(),
        locale::EXPORT_COL_TIME.to_string(),
        locale::EXPORT_COL_IP.to_string(),
        locale::EXPORT_COL_COMMENT.to_string(),
    ];
    header.extend(items.iter().cloned());

    let mut csv = String::from(UTF8_BOM);
    csv.push_str(&header.iter().map(|h| csv_quote(h)).collect::<Vec<_>>().join(","));
    csv.push('\n');

    for review in reviews {
        let mut row = vec![
            csv_quote(&review.class_name),
            csv_quote(&format_local(&review.submitted_at, utc_offset_hours)),
            csv_quote(&review.ip_address),
            csv_quote(&review.comment),
        ];
        row.extend(items.iter().map(|item| {
            review
                .ratings
                .get(item)
                .map(|level| csv_quote(level.label()))
                .unwrap_or_default()
        }));
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}{}.csv", locale::EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{filter_reviews, ClassFilter};
    use crate::models::review::RatingLevel;
    use chrono::{TimeZone, Utc};

    fn review(id: &str, class_name: &str, comment: &str, ratings: &[(&str, RatingLevel)]) -> Review {
        Review {
            id: id.to_string(),
            class_name: class_name.to_string(),
            ratings: ratings.iter().map(|(i, l)| (i.to_string(), *l)).collect(),
            comment: comment.to_string(),
            submitted_at: Utc.with_ymd_and_hms(2024, 9, 1, 1, 0, 0).unwrap(),
            ip_address: "192.0.2.4".to_string(),
        }
    }

    fn data_rows(csv: &str) -> usize {
        csv.lines().count() - 1
    }

    #[test]
    fn row_count_follows_the_filter_not_the_total() {
        let reviews = vec![
            review("a", "Lá 1", "tốt", &[]),
            review("b", "Lá 2", "tốt", &[]),
            review("c", "Lá 1", "tốt", &[]),
        ];
        let filtered = filter_reviews(&reviews, &ClassFilter::Class("Lá 1".into()));
        assert_eq!(data_rows(&reviews_to_csv(&filtered, 7)), 2);
        assert_eq!(data_rows(&reviews_to_csv(&reviews, 7)), 3);
        assert_eq!(data_rows(&reviews_to_csv(&[], 7)), 0);
    }

    #[test]
    fn header_has_fixed_columns_then_rating_items() {
        use RatingLevel::*;
        let reviews = vec![
            review("a", "Lá 1", "ok", &[("Vệ sinh", Satisfied)]),
            review("b", "Lá 1", "ok", &[("Bữa ăn", Unsatisfied), ("Vệ sinh", Unsatisfied)]),
        ];
        let csv = reviews_to_csv(&reviews, 7);
        let header = csv.lines().next().unwrap().trim_start_matches(UTF8_BOM);
        assert_eq!(header, "Lớp,Thời gian,Địa chỉ IP,Ý kiến khác,Vệ sinh,Bữa ăn");
        let first = csv.lines().nth(1).unwrap();
        assert_eq!(first, "Lá 1,01/09/2024 08:00,192.0.2.4,ok,Hài lòng,");
    }

    #[test]
    fn comments_with_separators_are_quoted() {
        let csv = reviews_to_csv(&[review("a", "Lá 1", "Tốt, nhưng \"hơi\" ồn\nlắm", &[])], 7);
        assert!(csv.contains("\"Tốt, nhưng \"\"hơi\"\" ồn\nlắm\""));
    }

    #[test]
    fn formula_cells_are_neutralized() {
        let csv = reviews_to_csv(
            &[review("a", "@Lá 1", "=HYPERLINK(\"http://evil\";\"click\")", &[])],
            7,
        );
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("'@Lá 1,"));
        assert!(row.ends_with(",\"'=HYPERLINK(\"\"http://evil\"\";\"\"click\"\")\""));

        assert_eq!(csv_quote("+84 90"), "'+84 90");
        assert_eq!(csv_quote("-1"), "'-1");
        assert_eq!(csv_quote("\tx"), "'\tx");
        assert_eq!(csv_quote("\rx"), "\"'\rx\"");
        assert_eq!(csv_quote("Lá 1 - buổi sáng"), "Lá 1 - buổi sáng");
    }

    #[test]
    fn file_name_carries_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(export_file_name(date), "Danh_sach_danh_gia_2024-09-01.csv");
    }
}
