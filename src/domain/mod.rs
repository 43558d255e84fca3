pub mod follow;
pub mod source;
pub mod tweet;

pub use follow::FollowList;
pub use source::FeedSource;
pub use tweet::Tweet;
