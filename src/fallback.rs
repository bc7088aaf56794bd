//! Hard-coded fallback dataset, versioned in code.
//!
//! Served as a drop-in substitute for the live collection whenever the store
//! is unreachable or the published set comes back empty. The dataset is tiny
//! by design: enough for the site to render something meaningful while the
//! store is down, never a cache of live data.
use chrono::{TimeZone, Utc};

use crate::model::{Article, Author};

/// The full fallback dataset, in no particular order.
pub fn articles() -> Vec<Article> {
    vec![turnover_milestone(), ai_in_business()]
}

/// Published fallback articles, date descending, the shape `get_all_news`
/// promises its callers.
pub(crate) fn published_sorted() -> Vec<Article> {
    let mut articles: Vec<Article> = articles().into_iter().filter(|a| a.published).collect();
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles
}

/// Published and featured fallback articles, date descending.
pub(crate) fn featured_sorted() -> Vec<Article> {
    let mut articles: Vec<Article> = articles()
        .into_iter()
        .filter(|a| a.published && a.featured)
        .collect();
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles
}

/// Point lookup into the fallback dataset.
pub(crate) fn by_id(id: &str) -> Option<Article> {
    articles().into_iter().find(|a| a.id.as_deref() == Some(id))
}

fn turnover_milestone() -> Article {
    Article {
        id: Some("1".to_string()),
        title: "SAIVO Achieves 70M Som Turnover Milestone".to_string(),
        subtitle: "Our company celebrates reaching 70 million som in turnover within just 6 months of operation".to_string(),
        content: "\
<p>SAIVO has achieved a remarkable milestone by reaching 70 million som in turnover within just 6 months of operation. This achievement represents not just financial success, but a testament to our team's dedication and our clients' trust in our innovative solutions.</p>\n\
<p>Starting from our first major project worth 35 million som in November 2024, we have consistently delivered high-quality software solutions that have exceeded client expectations. Our rapid growth demonstrates the strong demand for quality tech services in Uzbekistan's evolving digital landscape.</p>\n\
<p>\"This milestone is just the beginning,\" says CEO Bahodir Buxorov. \"We're committed to continuing our growth trajectory while maintaining the high standards of quality and innovation that our clients expect from us.\"</p>\n\
<p>The success has been driven by our focus on custom software development, mobile applications, and AI-powered solutions that help businesses streamline their operations and achieve their digital transformation goals.</p>\n\
<p>Looking ahead, SAIVO plans to expand its service offerings and explore new market opportunities while continuing to serve as a trusted technology partner for businesses across Uzbekistan and beyond.</p>"
            .to_string(),
        image_url: "https://images.unsplash.com/photo-1551434678-e076c223a692?w=800&q=80".to_string(),
        category: "Company News".to_string(),
        author: Author {
            name: "Bahodir Buxorov".to_string(),
            role: "CEO".to_string(),
        },
        date: Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap(),
        read_time: "4".to_string(),
        tags: vec![
            "milestone".to_string(),
            "growth".to_string(),
            "success".to_string(),
            "turnover".to_string(),
        ],
        featured: true,
        published: true,
        likes: 24,
        views: 156,
    }
}

fn ai_in_business() -> Article {
    Article {
        id: Some("2".to_string()),
        title: "The Future of AI in Business Automation".to_string(),
        subtitle: "Exploring how artificial intelligence is revolutionizing business processes".to_string(),
        content: "\
<p>Artificial Intelligence is no longer a futuristic concept—it's a present reality transforming how businesses operate across the globe. At SAIVO, we've witnessed firsthand how AI-powered solutions can dramatically improve efficiency and drive growth for our clients.</p>\n\
<p>In Uzbekistan's rapidly evolving business landscape, companies are increasingly recognizing the need to adopt AI technologies to remain competitive. From automated customer service chatbots to predictive analytics for inventory management, AI is reshaping traditional business models.</p>\n\
<p>Our experience in developing AI solutions has shown us that successful implementation requires more than just cutting-edge technology—it demands a deep understanding of business processes and clear strategic vision. We work closely with our clients to identify the areas where AI can deliver the most significant impact.</p>\n\
<p>Key areas where we've seen AI make a difference include:</p>\n\
<ul>\n\
<li>Customer service automation through intelligent chatbots</li>\n\
<li>Predictive analytics for better decision-making</li>\n\
<li>Process automation to reduce manual tasks</li>\n\
<li>Data analysis for actionable business insights</li>\n\
</ul>\n\
<p>As we look to the future, we believe that businesses that embrace AI today will be the leaders of tomorrow. The question isn't whether to adopt AI, but how quickly and effectively you can integrate it into your operations.</p>"
            .to_string(),
        image_url: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800&q=80".to_string(),
        category: "Technology".to_string(),
        author: Author {
            name: "Salimbay Elimuratov".to_string(),
            role: "CTO".to_string(),
        },
        date: Utc.with_ymd_and_hms(2025, 5, 10, 0, 0, 0).unwrap(),
        read_time: "6".to_string(),
        tags: vec![
            "AI".to_string(),
            "automation".to_string(),
            "technology".to_string(),
            "business".to_string(),
        ],
        featured: false,
        published: true,
        likes: 18,
        views: 98,
    }
}
