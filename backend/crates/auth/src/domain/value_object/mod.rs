//! Value Object Module

pub mod membership_rank;
pub mod resource_slug;
pub mod session_status;
pub mod session_token;

pub use membership_rank::MembershipRank;
pub use resource_slug::ResourceSlug;
pub use session_status::SessionStatus;
pub use session_token::SessionToken;
