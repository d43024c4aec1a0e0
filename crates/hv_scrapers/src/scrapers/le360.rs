//! Le360 (French edition) markup.

use super::{ArticleSelectors, ListingSelectors, SiteProfile};

pub const BASE_URL: &str = "https://fr.le360.ma";

/// Category slugs in crawl order. Some appear twice and are crawled twice.
const CATEGORIES: &[&str] = &[
    "societe", "politique", "economie",
    "sport", "culture", "monde",
    "medias", "regions", "insolite",
    "afrique", "education", "religion",
    "sciences", "technologie", "sante",
    "enquetes", "immobilier", "entreprise",
    "energie", "agriculture", "transport",
    "environnement", "tourisme", "emploi",
    "formation", "entreprenariat", "finance",
    "assurances", "bourse", "immobilier",
    "automobile", "industrie", "telecom",
    "medias", "energie", "agriculture",
    "tourisme", "international", "medias",
];

pub fn category_urls() -> Vec<String> {
    CATEGORIES
        .iter()
        .map(|slug| format!("{}/{}", BASE_URL, slug))
        .collect()
}

pub fn profile() -> SiteProfile {
    SiteProfile {
        name: "Le360",
        emoji: "🇲🇦",
        category_urls: category_urls(),
        listing: ListingSelectors {
            container: "div.article-list--headline-container",
            item: "div.ssa-list-item",
            link: "a",
            image: "div.custom-image-wrapper img",
        },
        article: ArticleSelectors {
            category: "div.overline-container a.overline-link",
            title: "h1.headline-container",
            paragraphs: "p.default__StyledText-sc-10mj2vp-0.fSEbof.body-paragraph",
            published_at: "div.subheadline-date",
            ready_marker: "h1.headline-container",
        },
    }
}
