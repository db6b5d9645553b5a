//! In-memory model of the news page: the list table, the injected update
//! form and the current view.

use entity::prelude::*;

pub const HEADER: [&str; 7] = [
    "ID",
    "Title",
    "Category",
    "Likes",
    "Date Updated",
    "Date Created",
    "Actions",
];

pub const LIST_VIEW: &str = "/";
pub const CREATE_VIEW: &str = "/add";

/// Identity of one rendered row element. Never reused, so a row rendered
/// by a later fetch is a different row even when it shows the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowKey(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: RowKey,
    pub id: NewsId,
    pub title: String,
    pub category: String,
    pub likes: i64,
    pub date_updated: String,
    pub date_created: String,
    pub fading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateForm {
    pub id: NewsId,
    pub values: NewsForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    rows: Vec<Row>,
    next_key: u64,
    update_form: Option<UpdateForm>,
    location: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_key: 0,
            update_form: None,
            location: LIST_VIEW.to_string(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Drops every data row and renders one per item, in order.
    pub fn replace_rows(&mut self, items: &[NewsItem]) {
        let rows = items
            .iter()
            .map(|item| {
                self.next_key += 1;
                Row {
                    key: RowKey(self.next_key),
                    id: item.id.clone(),
                    title: item.title.clone(),
                    category: item.category.clone(),
                    likes: item.likes,
                    date_updated: format_date(item.date_updated.as_deref()),
                    date_created: format_date(item.date_created.as_deref()),
                    fading: false,
                }
            })
            .collect();
        self.rows = rows;
    }

    pub fn row_for(&self, id: &NewsId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.id == id)
    }

    /// Returns false when the row is no longer in the table.
    pub fn start_fade(&mut self, key: RowKey) -> bool {
        match self.rows.iter_mut().find(|row| row.key == key) {
            Some(row) => {
                row.fading = true;
                true
            }
            None => false,
        }
    }

    /// Returns false when the row is no longer in the table.
    pub fn remove_row(&mut self, key: RowKey) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.key != key);
        self.rows.len() != before
    }

    pub fn update_form(&self) -> Option<&UpdateForm> {
        self.update_form.as_ref()
    }

    pub fn open_update_form(&mut self, form: UpdateForm) {
        self.update_form = Some(form);
    }

    pub fn close_update_form(&mut self) -> bool {
        self.update_form.take().is_some()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn navigate(&mut self, location: &str) {
        self.location = location.to_string();
    }
}

/// `5/1/2024 10:20:30 AM`, or `N/A` when missing or unparsable.
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|at| at.format("%-m/%-d/%Y %-I:%M:%S %p").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    fn item(id: i64, title: &str) -> NewsItem {
        NewsItem {
            id: NewsId::from(id),
            title: title.to_string(),
            description: String::new(),
            category: "Politics".to_string(),
            editor_first_name: String::new(),
            editor_last_name: String::new(),
            likes: id,
            date_created: Some("2024-05-01T15:04:05.000Z".to_string()),
            date_updated: None,
        }
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(Some("2024-05-01T15:04:05.000Z")),
            "5/1/2024 3:04:05 PM"
        );
        assert_eq!(
            format_date(Some("2024-12-31T00:00:00Z")),
            "12/31/2024 12:00:00 AM"
        );
        assert_eq!(format_date(Some("garbage")), "N/A");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_replace_rows_renews_keys() {
        // Arrange
        let mut document = Document::new();
        document.replace_rows(&[item(1, "a"), item(2, "b")]);
        let first = document.rows()[0].key;

        // Act
        document.replace_rows(&[item(1, "a")]);

        // Assert
        assert_eq!(document.rows().len(), 1);
        assert_ne!(document.rows()[0].key, first);
        assert_eq!(document.rows()[0].date_updated, "N/A");
        assert!(!document.start_fade(first));
        assert!(!document.remove_row(first));
    }

    #[test]
    fn test_fade_then_remove() {
        let mut document = Document::new();
        document.replace_rows(&[item(1, "a"), item(2, "b"), item(3, "c")]);
        let key = document.row_for(&NewsId::from(2)).unwrap().key;

        assert!(document.start_fade(key));
        assert!(document.rows()[1].fading);
        assert!(document.remove_row(key));

        let ids: Vec<_> =
            document.rows().iter().map(|row| row.id.clone()).collect();
        assert_eq!(ids, vec![NewsId::from(1), NewsId::from(3)]);
    }

    #[test]
    fn test_update_form_open_close() {
        let mut document = Document::new();
        assert!(!document.close_update_form());

        document.open_update_form(UpdateForm {
            id: NewsId::from(1),
            values: NewsForm::from(&item(1, "a")),
        });

        assert_eq!(document.update_form().unwrap().values.title, "a");
        assert!(document.close_update_form());
        assert!(document.update_form().is_none());
    }
}
