use hv_core::{Error, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub mod le360;

/// CSS selectors describing one site's markup.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub name: &'static str,
    pub emoji: &'static str,
    pub category_urls: Vec<String>,
    pub listing: ListingSelectors,
    pub article: ArticleSelectors,
}

#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// Present once the article list has rendered
    pub container: &'static str,
    /// One per teaser
    pub item: &'static str,
    /// Within an item
    pub link: &'static str,
    /// Within an item
    pub image: &'static str,
}

#[derive(Debug, Clone)]
pub struct ArticleSelectors {
    pub category: &'static str,
    pub title: &'static str,
    pub paragraphs: &'static str,
    pub published_at: &'static str,
    /// Marker waited on when settling by condition instead of by delay
    pub ready_marker: &'static str,
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| Error::InvalidSelector(format!("{}: {:?}", selector, e)))
    }

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// Text of an element with runs of whitespace collapsed
    pub fn element_text(element: &ElementRef) -> String {
        element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Trimmed text of the first match, if any
    pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
        document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    pub fn all_texts(document: &Html, selector: &Selector) -> Vec<String> {
        document
            .select(selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    pub fn resolve_href(base: &Url, href: &str) -> Result<String> {
        base.join(href.trim())
            .map(|u| u.to_string())
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", href, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::utils;
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://fr.le360.ma/societe").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_parse_selector() {
        assert!(utils::parse_selector("div.ssa-list-item").is_ok());
        assert!(matches!(
            utils::parse_selector("div[[").unwrap_err(),
            Error::InvalidSelector(_)
        ));
    }

    #[test]
    fn test_first_text() {
        let html = r#"
            <div class="title">  Test Title </div>
            <div class="title">Second</div>
        "#;
        let document = Html::parse_document(html);

        let title = utils::parse_selector(".title").unwrap();
        let missing = utils::parse_selector(".invalid").unwrap();
        assert_eq!(utils::first_text(&document, &title), Some("Test Title".to_string()));
        assert_eq!(utils::first_text(&document, &missing), None);
    }

    #[test]
    fn test_all_texts() {
        let html = r#"
            <div class="item">Item 1</div>
            <div class="item">Item 2</div>
        "#;
        let document = Html::parse_document(html);

        let texts = utils::all_texts(&document, &utils::parse_selector(".item").unwrap());
        assert_eq!(texts, vec!["Item 1", "Item 2"]);
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let html = "<a>  Le <b>Maroc</b>\n   en  tête </a>";
        let document = Html::parse_fragment(html);
        let a = document.select(&utils::parse_selector("a").unwrap()).next().unwrap();
        assert_eq!(utils::element_text(&a), "Le Maroc en tête");
    }

    #[test]
    fn test_resolve_href() {
        let base = utils::parse_url("https://fr.le360.ma/societe").unwrap();
        assert_eq!(
            utils::resolve_href(&base, "/societe/un-article_X/").unwrap(),
            "https://fr.le360.ma/societe/un-article_X/"
        );
        assert_eq!(
            utils::resolve_href(&base, "https://other.test/a").unwrap(),
            "https://other.test/a"
        );
    }
}
