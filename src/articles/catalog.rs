use super::ViewCounter;
use crate::Result;
use tracing::debug;

pub const DEFAULT_CATEGORY: &str = "health";

struct Article {
    title: &'static str,
    content: &'static str,
}

const HEALTH: &[Article] = &[
    Article {
        title: "The health industry in transition: challenges and opportunities",
        content: "Growing attention to health is pushing the industry to transform.",
    },
    Article {
        title: "Health and life: a new era of medical technology",
        content: "Advances in medical technology are changing how people see health and how they live.",
    },
    Article {
        title: "Health storm! Well-known drug maker accused of faking medicines",
        content: "A well-known pharmaceutical company is said to have shipped drugs with serious quality problems.",
    },
    Article {
        title: "Health crisis! Serious infection outbreak at a fitness centre",
        content: "A well-known fitness centre is reported to be at the centre of a serious infection outbreak.",
    },
];

const POLITICS: &[Article] = &[
    Article {
        title: "Social change driven by government: challenges and opportunities",
        content: "Government plays a key role in driving social change.",
    },
    Article {
        title: "Political storm! Corruption scandal involving a prominent politician exposed",
        content: "Reports claim a prominent politician is caught up in a large corruption scandal.",
    },
];

const COMMERCE: &[Article] = &[
    Article {
        title: "Business strategy in a new landscape: innovation and data",
        content: "In the digital age, companies have to keep innovating.",
    },
    Article {
        title: "A shifting business environment: challenges and opportunities",
        content: "Globalisation and technological change shape today's business environment.",
    },
];

pub fn categories() -> &'static [&'static str] {
    &["health", "politics", "commerce"]
}

fn articles_for(category: &str) -> &'static [Article] {
    match category {
        "health" => HEALTH,
        "politics" => POLITICS,
        "commerce" => COMMERCE,
        _ => &[],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub id: String,
    pub counter_id: String,
    pub title: String,
    pub content: String,
    pub views: u64,
}

impl ArticleCard {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("[{}] {}", self.id, self.title),
            format!("    {}", self.content),
            format!("    views: {}", self.views),
        ]
    }
}

pub struct CategoryArticleListing {
    counter: ViewCounter,
}

impl CategoryArticleListing {
    pub fn new(counter: ViewCounter) -> Self {
        Self { counter }
    }

    /// Cards for `category` with their current view counts. Unknown
    /// categories have no articles.
    pub async fn show(&self, category: &str) -> Result<Vec<ArticleCard>> {
        let articles = articles_for(category);
        debug!("Listing {} articles for category {}", articles.len(), category);

        let mut cards = Vec::with_capacity(articles.len());
        for (index, article) in articles.iter().enumerate() {
            let id = format!("{}-article-{}", category, index);
            let views = self.counter.count(&id).await?;
            cards.push(ArticleCard {
                counter_id: format!("counter-{}", id),
                id,
                title: article.title.to_string(),
                content: article.content.to_string(),
                views,
            });
        }

        Ok(cards)
    }
}
