//! HTML extraction for listing and question pages
//!
//! Listing pages yield one detail link per teaser heading. Question pages
//! yield four text fields, each extracted independently so that missing
//! markup only blanks the affected field.

use crate::config::SelectorConfig;
use crate::output::QaRecord;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Compiled CSS selectors for the target site
#[derive(Debug, Clone)]
pub struct PageSelectors {
    listing_heading: Selector,
    listing_link: Selector,
    title: Selector,
    question: Selector,
    replier: Selector,
    answer: Selector,
}

impl PageSelectors {
    /// Compiles every selector in the `[selectors]` config section
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            listing_heading: compile("listing-heading", &config.listing_heading)?,
            listing_link: compile("listing-link", &config.listing_link)?,
            title: compile("title", &config.title)?,
            question: compile("question", &config.question)?,
            replier: compile("replier", &config.replier)?,
            answer: compile("answer", &config.answer)?,
        })
    }
}

fn compile(field: &'static str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector {
        field,
        message: format!("{:?}", e),
    })
}

/// A question page field that can be missing from the markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QaField {
    Title,
    Question,
    Replier,
    Answer,
}

impl QaField {
    pub const ALL: [QaField; 4] = [Self::Title, Self::Question, Self::Replier, Self::Answer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Question => "question",
            Self::Replier => "replier",
            Self::Answer => "answer",
        }
    }
}

impl fmt::Display for QaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question page turned into a record
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub record: QaRecord,

    /// Missing fields that deserve a warning, in field order
    pub warnings: Vec<QaField>,
}

/// Extracts the detail link of every teaser heading on a listing page
///
/// Links are returned as written in the markup; headings without a link are
/// skipped.
pub fn extract_question_urls(html: &str, selectors: &PageSelectors) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.listing_heading)
        .filter_map(|heading| {
            let href = heading
                .select(&selectors.listing_link)
                .next()
                .and_then(|link| link.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty());

            if href.is_none() {
                tracing::debug!("Listing heading without a link: {:?}", element_text(heading));
            }

            href.map(str::to_string)
        })
        .collect()
}

/// Extracts a question record from a detail page
///
/// # Warning rules
///
/// - missing title: always warned
/// - missing question: warned only when the title was found, since a page
///   without a title has already been reported
/// - missing replier or answer: always warned
pub fn extract_record(html: &str, url: &str, selectors: &PageSelectors) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = first_text(&document, &selectors.title);
    let question = first_text(&document, &selectors.question);
    let replier = first_text(&document, &selectors.replier);
    let answer = first_text(&document, &selectors.answer);

    let mut warnings = Vec::new();
    if title.is_none() {
        warnings.push(QaField::Title);
    }
    if question.is_none() && title.is_some() {
        warnings.push(QaField::Question);
    }
    if replier.is_none() {
        warnings.push(QaField::Replier);
    }
    if answer.is_none() {
        warnings.push(QaField::Answer);
    }

    ExtractedPage {
        record: QaRecord::new(title, question, replier, answer, url),
        warnings,
    }
}

/// Trimmed text of the first element matching `selector`
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> PageSelectors {
        PageSelectors::from_config(&SelectorConfig::default()).unwrap()
    }

    const FULL_PAGE: &str = r#"
        <html><body>
            <h1>  租屋押金可以不退嗎？ </h1>
            <p class="page-desc page-question-desc">房東拒絕退還押金</p>
            <div class="inline-block"> 王律師 </div>
            <div class="QaAnswerOne-content-main">
                <p>依民法規定，</p><p>押金應返還。</p>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_extract_question_urls() {
        let html = r#"
            <html><body>
                <h3><a href="/QA/1">First</a></h3>
                <h3><a href="/QA/2">Second</a></h3>
                <h3><a href="/QA/1">First again</a></h3>
            </body></html>
        "#;
        let urls = extract_question_urls(html, &selectors());
        assert_eq!(urls, vec!["/QA/1", "/QA/2", "/QA/1"]);
    }

    #[test]
    fn test_extract_question_urls_skips_headings_without_link() {
        let html = r#"
            <html><body>
                <h3>Popular topics</h3>
                <h3><a>No target</a></h3>
                <h3><span><a href=" https://example.com/QA/9 ">Nested</a></span></h3>
                <a href="/QA/outside">Not in a heading</a>
            </body></html>
        "#;
        let urls = extract_question_urls(html, &selectors());
        assert_eq!(urls, vec!["https://example.com/QA/9"]);
    }

    #[test]
    fn test_extract_question_urls_empty_page() {
        let urls = extract_question_urls("<html><body></body></html>", &selectors());
        assert!(urls.is_empty());
    }

    #[test]
    fn test_extract_full_record() {
        let page = extract_record(FULL_PAGE, "/QA/42", &selectors());

        assert!(page.warnings.is_empty());
        assert_eq!(page.record.title.as_deref(), Some("租屋押金可以不退嗎？"));
        assert_eq!(page.record.question.as_deref(), Some("房東拒絕退還押金"));
        assert_eq!(page.record.replier.as_deref(), Some("王律師"));
        assert_eq!(page.record.answer.as_deref(), Some("依民法規定，押金應返還。"));
        assert_eq!(page.record.url, "/QA/42");
    }

    #[test]
    fn test_missing_question_warns_once() {
        let html = r#"
            <h1>X</h1>
            <div class="inline-block">Y</div>
            <div class="QaAnswerOne-content-main">Z</div>
        "#;
        let page = extract_record(html, "https://example.com/QA/7", &selectors());

        assert_eq!(page.record.title.as_deref(), Some("X"));
        assert_eq!(page.record.question, None);
        assert_eq!(page.record.replier.as_deref(), Some("Y"));
        assert_eq!(page.record.answer.as_deref(), Some("Z"));
        assert_eq!(page.record.text, "X\nNone\nY\nZ\nhttps://example.com/QA/7");
        assert_eq!(page.warnings, vec![QaField::Question]);
    }

    #[test]
    fn test_missing_title_suppresses_question_warning() {
        let html = r#"
            <div class="inline-block">Y</div>
            <div class="QaAnswerOne-content-main">Z</div>
        "#;
        let page = extract_record(html, "/QA/8", &selectors());

        assert_eq!(page.record.title, None);
        assert_eq!(page.record.question, None);
        assert_eq!(page.warnings, vec![QaField::Title]);
    }

    #[test]
    fn test_missing_title_with_question_present() {
        let html = r#"
            <p class="page-desc page-question-desc">Q</p>
            <div class="inline-block">Y</div>
            <div class="QaAnswerOne-content-main">Z</div>
        "#;
        let page = extract_record(html, "/QA/8", &selectors());

        assert_eq!(page.record.question.as_deref(), Some("Q"));
        assert_eq!(page.warnings, vec![QaField::Title]);
    }

    #[test]
    fn test_empty_page_still_yields_record() {
        let page = extract_record("<html></html>", "/QA/0", &selectors());

        assert_eq!(page.record.url, "/QA/0");
        assert_eq!(page.record.text, "None\nNone\nNone\nNone\n/QA/0");
        assert_eq!(
            page.warnings,
            vec![QaField::Title, QaField::Replier, QaField::Answer]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"<h1>First</h1><h1>Second</h1>"#;
        let page = extract_record(html, "/QA/1", &selectors());
        assert_eq!(page.record.title.as_deref(), Some("First"));
    }

    #[test]
    fn test_question_requires_both_classes() {
        let html = r#"<h1>T</h1><p class="page-desc">Only one class</p>"#;
        let page = extract_record(html, "/QA/1", &selectors());
        assert_eq!(page.record.question, None);
    }

    #[test]
    fn test_custom_selectors() {
        let config = SelectorConfig {
            title: "h2.headline".to_string(),
            ..SelectorConfig::default()
        };
        let selectors = PageSelectors::from_config(&config).unwrap();
        let page = extract_record(r#"<h1>Wrong</h1><h2 class="headline">Right</h2>"#, "/QA/1", &selectors);
        assert_eq!(page.record.title.as_deref(), Some("Right"));
    }

    #[test]
    fn test_field_names() {
        let names: Vec<_> = QaField::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["title", "question", "replier", "answer"]);
    }
}
