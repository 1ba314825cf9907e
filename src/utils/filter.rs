/// Text fields matched by the list search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

fn contains<T: Searchable + ?Sized>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Items with a search field containing `query`, ignoring case; `""` keeps everything.
pub fn filter<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }
    let needle = query.to_lowercase();

    items
        .iter()
        .filter(|item| contains(*item, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        email: Option<&'static str>,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            let mut fields = vec![self.name];
            fields.extend(self.email);
            fields
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Ana Pérez", email: Some("ana@corp.com") },
            Row { name: "Luis Gómez", email: None },
            Row { name: "ANAÍS Ruiz", email: Some("ar@corp.com") },
        ]
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(filter(&rows(), ""), rows());
    }

    #[test]
    fn whitespace_is_part_of_the_query() {
        let names: Vec<_> = filter(&rows(), "Ana ").iter().map(|r| r.name).collect();
        assert_eq!(names, ["Ana Pérez"]);
        assert!(filter(&rows(), "   ").is_empty());
        assert_eq!(filter(&rows(), " ruiz").len(), 1);
    }

    #[test]
    fn matching_ignores_case() {
        let names: Vec<_> = filter(&rows(), "ana").iter().map(|r| r.name).collect();
        assert_eq!(names, ["Ana Pérez", "ANAÍS Ruiz"]);
        assert_eq!(filter(&rows(), "GÓMEZ").len(), 1);
        assert_eq!(filter(&rows(), "corp.COM").len(), 2);
        assert!(filter(&rows(), "zzz").is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        for query in ["", "a", "ruiz", "@", "nothing"] {
            let once = filter(&rows(), query);
            assert_eq!(filter(&once, query), once, "query {query:?}");
        }
    }
}
