//! crates/schemes_connect_core/src/community.rs
//!
//! The community forum: posts, likes and comments held in memory for the
//! session, seeded with a few sample discussions.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::directory::{matches_search, CategoryFilter};

/// Categories a post may be filed under.
pub const FORUM_CATEGORIES: [&str; 7] = [
    "General Discussion",
    "Healthcare Schemes",
    "Education Schemes",
    "Agriculture",
    "Financial Assistance",
    "Housing",
    "Employment",
];

/// Author name used for everything the local user writes.
pub const LOCAL_AUTHOR: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForumError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Post {0} not found")]
    PostNotFound(Uuid),
    #[error("There is no post number {0}.")]
    NoPostNumbered(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    pub comments: Vec<Comment>,
}

/// Renders the age of a timestamp as "5m ago", "3h ago" or "2d ago".
pub fn format_relative(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let age = now - then;
    if age < Duration::hours(1) {
        format!("{}m ago", age.num_minutes().max(0))
    } else if age < Duration::days(1) {
        format!("{}h ago", age.num_hours())
    } else {
        format!("{}d ago", age.num_days())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Forum {
    posts: Vec<Post>,
}

impl Forum {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// A forum holding the sample discussions, timestamped relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let comment = |author: &str, content: &str, ago: Duration| Comment {
            id: Uuid::new_v4(),
            author: author.to_string(),
            content: content.to_string(),
            timestamp: now - ago,
        };

        let posts = vec![
            Post {
                id: Uuid::new_v4(),
                title: "How to apply for PM Kisan scheme?".to_string(),
                content: "I'm a farmer with 1.5 hectares of land. Can someone guide me through the PM Kisan application process? What documents are needed?".to_string(),
                category: "Agriculture".to_string(),
                author: "Ramesh Kumar".to_string(),
                timestamp: now - Duration::hours(1),
                likes: 24,
                comments: vec![
                    comment(
                        "Suresh Patel",
                        "You need your land records, Aadhaar card, and bank account details. Apply through the official PM Kisan portal or CSC center.",
                        Duration::minutes(30),
                    ),
                    comment(
                        "Admin",
                        "You can also use the SchemesConnect chatbot for step-by-step guidance!",
                        Duration::minutes(15),
                    ),
                ],
            },
            Post {
                id: Uuid::new_v4(),
                title: "Ayushman Bharat eligibility doubt".to_string(),
                content: "My family income is around ₹3 Lakhs per year. Are we eligible for Ayushman Bharat? The official website is confusing.".to_string(),
                category: "Healthcare Schemes".to_string(),
                author: "Priya Sharma".to_string(),
                timestamp: now - Duration::hours(2),
                likes: 18,
                comments: vec![comment(
                    "Health Expert",
                    "PMJAY eligibility is based on SECC 2011 data. You can check your eligibility on the mera.pmjay.gov.in portal using your Aadhaar or ration card.",
                    Duration::hours(1),
                )],
            },
            Post {
                id: Uuid::new_v4(),
                title: "Success Story: Got my first house under PMAY!".to_string(),
                content: "After 6 months of application process, finally received approval for Pradhan Mantri Awas Yojana. Thanks to this community for all the guidance! 🏠".to_string(),
                category: "Housing".to_string(),
                author: "Meera Devi".to_string(),
                timestamp: now - Duration::days(1),
                likes: 156,
                comments: vec![
                    comment(
                        "Rajesh",
                        "Congratulations! Can you share what documents you submitted?",
                        Duration::hours(12),
                    ),
                    comment(
                        "Meera Devi",
                        "I submitted income certificate, Aadhaar, bank statement, and land ownership proof. The process was smooth at the municipal office.",
                        Duration::hours(6),
                    ),
                ],
            },
        ];

        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: Uuid) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Position of a post in the forum, counting from 1 at the top.
    pub fn number_of(&self, id: Uuid) -> Option<usize> {
        self.posts.iter().position(|post| post.id == id).map(|i| i + 1)
    }

    /// Id of the post shown as `number` (1-based).
    pub fn id_numbered(&self, number: usize) -> Result<Uuid, ForumError> {
        number
            .checked_sub(1)
            .and_then(|index| self.posts.get(index))
            .map(|post| post.id)
            .ok_or(ForumError::NoPostNumbered(number))
    }

    /// Posts whose title or content contains `search` (case-insensitive) and
    /// whose category matches.
    pub fn filter(&self, search: &str, category: &CategoryFilter) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| {
                matches_search(&[post.title.as_str(), post.content.as_str()], search)
            })
            .filter(|post| category.matches(&post.category))
            .collect()
    }

    /// Publishes a new post at the top of the forum.
    pub fn create_post(
        &mut self,
        title: &str,
        content: &str,
        category: &str,
        now: DateTime<Utc>,
    ) -> Result<&Post, ForumError> {
        let (title, content, category) = (title.trim(), content.trim(), category.trim());
        if title.is_empty() || content.is_empty() || category.is_empty() {
            return Err(ForumError::MissingFields);
        }

        self.posts.insert(
            0,
            Post {
                id: Uuid::new_v4(),
                title: title.to_string(),
                content: content.to_string(),
                category: category.to_string(),
                author: LOCAL_AUTHOR.to_string(),
                timestamp: now,
                likes: 0,
                comments: Vec::new(),
            },
        );
        Ok(&self.posts[0])
    }

    pub fn like(&mut self, post_id: Uuid) -> Result<u32, ForumError> {
        let post = self.post_mut(post_id)?;
        post.likes += 1;
        Ok(post.likes)
    }

    /// Appends a comment. Blank comments are ignored and yield `Ok(None)`.
    pub fn add_comment(
        &mut self,
        post_id: Uuid,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<&Comment>, ForumError> {
        let post = self.post_mut(post_id)?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        post.comments.push(Comment {
            id: Uuid::new_v4(),
            author: LOCAL_AUTHOR.to_string(),
            content: content.to_string(),
            timestamp: now,
        });
        Ok(post.comments.last())
    }

    fn post_mut(&mut self, post_id: Uuid) -> Result<&mut Post, ForumError> {
        self.posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or(ForumError::PostNotFound(post_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_forum_has_sample_posts() {
        let forum = Forum::seeded(Utc::now());
        assert_eq!(forum.posts().len(), 3);
        assert_eq!(forum.posts()[2].likes, 156);
        assert_eq!(forum.posts()[0].comments.len(), 2);
    }

    #[test]
    fn filter_by_search_and_category() {
        let forum = Forum::seeded(Utc::now());
        let all = CategoryFilter::parse("all");
        let housing = CategoryFilter::parse("Housing");
        assert_eq!(forum.filter("", &all).len(), 3);
        let hits = forum.filter("ayushman", &all);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].author, "Priya Sharma");
        assert_eq!(forum.filter("", &housing).len(), 1);
        assert!(forum.filter("kisan", &housing).is_empty());
    }

    #[test]
    fn new_post_goes_first_with_zero_likes() {
        let now = Utc::now();
        let mut forum = Forum::seeded(now);
        let post = forum
            .create_post("Scholarship dates", "When does NSP open?", "Education Schemes", now)
            .unwrap()
            .clone();
        assert_eq!(post.author, LOCAL_AUTHOR);
        assert_eq!(post.likes, 0);
        assert_eq!(forum.posts()[0].id, post.id);
        assert_eq!(forum.posts().len(), 4);
    }

    #[test]
    fn post_requires_every_field() {
        let mut forum = Forum::default();
        assert_eq!(
            forum.create_post("Title", " ", "Housing", Utc::now()).unwrap_err(),
            ForumError::MissingFields
        );
        assert!(forum.posts().is_empty());
    }

    #[test]
    fn like_and_comment() {
        let now = Utc::now();
        let mut forum = Forum::seeded(now);
        let id = forum.posts()[1].id;

        assert_eq!(forum.like(id).unwrap(), 19);
        assert!(forum.add_comment(id, "   ", now).unwrap().is_none());
        let comment = forum.add_comment(id, "Check the portal", now).unwrap().unwrap();
        assert_eq!(comment.author, LOCAL_AUTHOR);
        assert_eq!(forum.get(id).unwrap().comments.len(), 2);

        let missing = Uuid::new_v4();
        assert_eq!(forum.like(missing), Err(ForumError::PostNotFound(missing)));
    }

    #[test]
    fn posts_are_numbered_from_the_top() {
        let forum = Forum::seeded(Utc::now());
        let second = forum.posts()[1].id;
        assert_eq!(forum.id_numbered(2), Ok(second));
        assert_eq!(forum.number_of(second), Some(2));
        assert_eq!(forum.id_numbered(0), Err(ForumError::NoPostNumbered(0)));
        assert_eq!(forum.id_numbered(4), Err(ForumError::NoPostNumbered(4)));
    }

    #[test]
    fn relative_times() {
        let now = Utc::now();
        assert_eq!(format_relative(now, now - Duration::minutes(5)), "5m ago");
        assert_eq!(format_relative(now, now - Duration::hours(3)), "3h ago");
        assert_eq!(format_relative(now, now - Duration::days(2)), "2d ago");
        assert_eq!(format_relative(now, now + Duration::minutes(1)), "0m ago");
    }
}
