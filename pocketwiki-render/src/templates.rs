//! Askama template definitions.

use askama::Template;

/// Entry list, doubling as the search results page when `query` is set.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_title: String,
    pub entries: Vec<String>,
    pub query: Option<String>,
}

/// A single rendered entry. `body` is trusted HTML from the converter
/// and is inserted unescaped.
#[derive(Template)]
#[template(path = "entry.html")]
pub struct EntryTemplate {
    pub site_title: String,
    pub title: String,
    pub body: String,
}

/// Shared form for creating and editing entries.
#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub site_title: String,
    pub title: String,
    pub content: String,
    pub editing: bool,
    pub error: Option<String>,
}

/// Missing-entry page.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub site_title: String,
    pub title: String,
}

/// Internal-error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub site_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_entries() {
        let html = IndexTemplate {
            site_title: "wiki".into(),
            entries: vec!["CSS".into(), "Git".into()],
            query: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("All Pages"));
        assert!(html.contains("/wiki/CSS"));
        assert!(html.contains("/wiki/Git"));
    }

    #[test]
    fn index_shows_search_results_heading() {
        let html = IndexTemplate {
            site_title: "wiki".into(),
            entries: vec![],
            query: Some("git".into()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Search results"));
        assert!(html.contains("git"));
    }

    #[test]
    fn entry_body_is_not_escaped() {
        let html = EntryTemplate {
            site_title: "wiki".into(),
            title: "Rust".into(),
            body: "<h1>Rust</h1>".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("<h1>Rust</h1>"));
        assert!(html.contains("/edit/Rust"));
    }

    #[test]
    fn entry_title_is_escaped() {
        let html = EntryTemplate {
            site_title: "wiki".into(),
            title: "<script>".into(),
            body: String::new(),
        }
        .render()
        .unwrap();
        assert!(html.contains("&#60;script&#62;"));
        assert!(!html.contains("<h1><script></h1>"));
    }

    #[test]
    fn form_reports_errors() {
        let html = FormTemplate {
            site_title: "wiki".into(),
            title: "Dup".into(),
            content: String::new(),
            editing: false,
            error: Some("Title already in use".into()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Title already in use"));
    }

    #[test]
    fn error_page_links_home() {
        let html = ErrorTemplate {
            site_title: "wiki".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Something went wrong"));
        assert!(html.contains("href=\"/\""));
    }

    #[test]
    fn edit_form_locks_the_title() {
        let html = FormTemplate {
            site_title: "wiki".into(),
            title: "Rust".into(),
            content: "# Rust".into(),
            editing: true,
            error: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("readonly"));
        assert!(html.contains("# Rust"));
    }
}
