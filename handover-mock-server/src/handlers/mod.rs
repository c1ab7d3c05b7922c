pub mod reply;

pub use reply::ReplyService;
