pub mod api_client;
pub mod notice;


pub use api_client::APIClient;
pub use notice::{Notice, NoticeLevel, NoticeListener, Notifier};
