/// Business logic layer
///
/// Services own the pool and enforce the rules the repositories do not:
/// ownership of posts, comment targets existing, self-follow rejection,
/// and the shared pagination contract.
pub mod comments;
pub mod feed;
pub mod follow;
pub mod groups;
pub mod posts;
pub mod users;

pub use comments::CommentService;
pub use feed::FeedService;
pub use follow::FollowService;
pub use groups::GroupService;
pub use posts::PostService;
pub use users::UserService;
