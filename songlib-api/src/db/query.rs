//! Dynamic query construction for song listings
//!
//! Builds a parameterized count query and select query from an optional
//! filter plus sort and pagination parameters. Predicates accumulate as
//! (fragment, bound value) pairs so any subset of filter fields composes
//! without special-casing, and values never end up interpolated into the
//! SQL string. Sort columns are mapped through a closed enum, so user
//! input never reaches the ORDER BY clause directly.

/// Columns returned by every song select
pub const SONG_COLUMNS: &str =
    "id, group_name, song_name, release_date, text, link, created_at, updated_at";

/// Sortable song fields, mapped to their storage columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Group,
    Song,
    ReleaseDate,
    Text,
    Link,
}

impl SortField {
    /// Parse the caller-facing field name; unrecognized input yields None
    /// (callers fall back to primary key order).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "group" => Some(Self::Group),
            "song" => Some(Self::Song),
            "releaseDate" => Some(Self::ReleaseDate),
            "text" => Some(Self::Text),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Group => "group_name",
            Self::Song => "song_name",
            Self::ReleaseDate => "release_date",
            Self::Text => "text",
            Self::Link => "link",
        }
    }
}

/// Sort direction; ascending unless DESC is explicitly requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Optional predicates narrowing a song listing
///
/// Every field is independently optional; absent (or empty) fields
/// impose no predicate. Only the lyric text match is a substring match,
/// all other fields compare for equality.
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: SortOrder,
}

/// Rendered statements plus their bound arguments
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    /// Counts all rows matching the filter, ignoring pagination
    pub count_sql: String,
    /// Ordered, limited page select
    pub select_sql: String,
    /// Predicate bindings, in predicate order (shared by both statements)
    pub args: Vec<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Render count and select statements for the given filter and page
pub fn build_song_query(filter: &SongFilter, page: i64, limit: i64) -> BuiltQuery {
    let mut predicates: Vec<&'static str> = Vec::new();
    let mut args: Vec<String> = Vec::new();

    // LIKE is case-insensitive in SQLite for ASCII, matching the
    // substring semantics the text filter needs.
    let fields: [(&'static str, &Option<String>); 5] = [
        ("group_name = ?", &filter.group),
        ("song_name = ?", &filter.song),
        ("release_date = ?", &filter.release_date),
        ("text LIKE '%' || ? || '%'", &filter.text),
        ("link = ?", &filter.link),
    ];
    for (fragment, value) in fields {
        if let Some(value) = value {
            if !value.is_empty() {
                predicates.push(fragment);
                args.push(value.clone());
            }
        }
    }

    let mut base = format!("SELECT {SONG_COLUMNS} FROM songs");
    if !predicates.is_empty() {
        base.push_str(" WHERE ");
        base.push_str(&predicates.join(" AND "));
    }

    // Count wraps the filtered, unordered, unlimited statement
    let count_sql = format!("SELECT COUNT(*) FROM ({base}) AS filtered");

    let order_column = filter.sort_by.map_or("id", SortField::column);
    let select_sql = format!(
        "{base} ORDER BY {order_column} {} LIMIT ? OFFSET ?",
        filter.sort_order.keyword()
    );

    BuiltQuery {
        count_sql,
        select_sql,
        args,
        limit,
        offset: (page - 1) * limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where_clause() {
        let q = build_song_query(&SongFilter::default(), 1, 10);

        assert_eq!(
            q.count_sql,
            format!("SELECT COUNT(*) FROM (SELECT {SONG_COLUMNS} FROM songs) AS filtered")
        );
        assert_eq!(
            q.select_sql,
            format!("SELECT {SONG_COLUMNS} FROM songs ORDER BY id ASC LIMIT ? OFFSET ?")
        );
        assert!(q.args.is_empty());
        assert_eq!(q.limit, 10);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn test_predicates_compose_in_field_order() {
        let filter = SongFilter {
            group: Some("Muse".to_string()),
            text: Some("love".to_string()),
            ..Default::default()
        };
        let q = build_song_query(&filter, 1, 10);

        assert!(q
            .select_sql
            .contains("WHERE group_name = ? AND text LIKE '%' || ? || '%'"));
        assert_eq!(q.args, vec!["Muse".to_string(), "love".to_string()]);
    }

    #[test]
    fn test_count_reflects_filter_but_not_pagination() {
        let filter = SongFilter {
            link: Some("https://example.com".to_string()),
            ..Default::default()
        };
        let q = build_song_query(&filter, 3, 25);

        assert!(q.count_sql.contains("WHERE link = ?"));
        assert!(!q.count_sql.contains("LIMIT"));
        assert!(!q.count_sql.contains("ORDER BY"));
    }

    #[test]
    fn test_empty_string_fields_impose_no_predicate() {
        let filter = SongFilter {
            group: Some(String::new()),
            song: Some("Madness".to_string()),
            ..Default::default()
        };
        let q = build_song_query(&filter, 1, 10);

        assert!(q.select_sql.contains("WHERE song_name = ?"));
        assert!(!q.select_sql.contains("group_name"));
        assert_eq!(q.args, vec!["Madness".to_string()]);
    }

    #[test]
    fn test_sort_field_maps_to_storage_column() {
        let filter = SongFilter {
            sort_by: Some(SortField::ReleaseDate),
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let q = build_song_query(&filter, 1, 10);

        assert!(q.select_sql.contains("ORDER BY release_date DESC"));
    }

    #[test]
    fn test_unrecognized_sort_field_is_rejected_at_parse() {
        assert_eq!(SortField::parse("group"), Some(SortField::Group));
        assert_eq!(SortField::parse("releaseDate"), Some(SortField::ReleaseDate));
        assert_eq!(SortField::parse("bogus"), None);
        assert_eq!(SortField::parse(""), None);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse(""), SortOrder::Asc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Asc);
    }

    #[test]
    fn test_offset_computation() {
        let q = build_song_query(&SongFilter::default(), 3, 10);
        assert_eq!(q.offset, 20);
        assert_eq!(q.limit, 10);

        let q = build_song_query(&SongFilter::default(), 1, 100);
        assert_eq!(q.offset, 0);
    }
}
